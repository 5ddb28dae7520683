use crate::areas::history::History;
use crate::areas::object_store::ObjectStore;
use crate::areas::refs::Refs;
use crate::areas::remotes::Remotes;
use crate::areas::stage::Stage;
use crate::areas::workspace::Workspace;
use crate::artifacts::errors::StateError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Aggregate of every repository area; all commands are methods on it.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    stage: Arc<Mutex<Stage>>,
    object_store: ObjectStore,
    refs: Refs,
    remotes: Remotes,
    history: History,
    workspace: Workspace,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;
        let grit_path = path.join(".grit");

        let stage = Stage::new(grit_path.join("stage").into_boxed_path());
        let object_store = ObjectStore::new(grit_path.join("objects").into_boxed_path());
        let refs = Refs::new(grit_path.clone().into_boxed_path());
        let remotes = Remotes::new(grit_path.join("remotes").into_boxed_path());
        let history = History::new(&grit_path);
        let workspace = Workspace::new(path.clone().into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            stage: Arc::new(Mutex::new(stage)),
            object_store,
            refs,
            remotes,
            history,
            workspace,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn grit_path(&self) -> PathBuf {
        self.path.join(".grit")
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn stage(&self) -> Arc<Mutex<Stage>> {
        self.stage.clone()
    }

    pub fn object_store(&self) -> &ObjectStore {
        &self.object_store
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn remotes(&self) -> &Remotes {
        &self.remotes
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn is_initialized(&self) -> bool {
        self.grit_path().is_dir()
    }

    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(StateError::Uninitialized.into())
        }
    }

    /// HEAD's commit together with its hash.
    pub fn head_commit(&self) -> anyhow::Result<(ObjectId, Commit)> {
        let head_oid = self.refs.read_head()?;
        let commit = self.object_store.load_commit(&head_oid)?;
        Ok((head_oid, commit))
    }

    /// Resolve a full or abbreviated commit id to a stored commit.
    /// Anything that does not name exactly one stored commit fails with the
    /// missing-commit message, ambiguous prefixes and non-commit hashes
    /// included.
    pub fn resolve_commit(&self, raw_id: &str) -> anyhow::Result<(ObjectId, Commit)> {
        let object_id = if let Ok(object_id) = ObjectId::try_parse(raw_id.to_string()) {
            if !self.object_store.contains(&object_id) {
                return Err(StateError::MissingCommit.into());
            }
            object_id
        } else {
            let matches = self.object_store.find_by_prefix(raw_id)?;
            match matches.as_slice() {
                [object_id] => object_id.clone(),
                _ => return Err(StateError::MissingCommit.into()),
            }
        };

        let commit = self
            .object_store
            .load_commit(&object_id)
            .map_err(|_| StateError::MissingCommit)?;

        Ok((object_id, commit))
    }
}

//! Repository areas: the stateful pieces a command works against.

pub mod history;
pub mod object_store;
pub mod refs;
pub mod remotes;
pub mod repository;
pub mod stage;
pub mod workspace;

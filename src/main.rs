use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use grit::areas::repository::Repository;
use grit::artifacts::errors::UsageError;

#[derive(Parser)]
#[command(
    name = "grit",
    version = "0.1.0",
    about = "A small local version-control system",
    long_about = "A small local version-control system: snapshots files, records \
    commit history, supports branches and three-way merges, and syncs with other \
    repositories reachable as filesystem paths."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Create an empty repository in the current directory")]
    Init,
    #[command(about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1)]
        file: String,
    },
    #[command(about = "Record the staged changes as a new commit")]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(about = "Unstage a file, or stage a tracked file for removal")]
    Rm {
        #[arg(index = 1)]
        file: String,
    },
    #[command(about = "Show the current branch's history")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(about = "Print the ids of all commits with the given message")]
    Find {
        #[arg(index = 1)]
        message: String,
    },
    #[command(about = "Show branches, staged changes and untracked files")]
    Status,
    #[command(about = "Switch branches, or restore a file from a commit")]
    Checkout {
        #[arg(index = 1, help = "A branch name or a commit id")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore, after --")]
        files: Vec<String>,
    },
    #[command(about = "Create a branch at the current head")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(about = "Move the current branch to a commit and check it out")]
    Reset {
        #[arg(index = 1)]
        commit_id: String,
    },
    #[command(about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
    #[command(name = "add-remote", about = "Register another repository by path")]
    AddRemote {
        #[arg(index = 1)]
        name: String,
        #[arg(index = 2, help = "Path to the other repository's .grit directory")]
        path: String,
    },
    #[command(name = "rm-remote", about = "Forget a registered remote")]
    RmRemote {
        #[arg(index = 1)]
        name: String,
    },
    #[command(about = "Fast-forward a remote branch to the local head")]
    Push {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
    #[command(about = "Copy a remote branch into the local tracking branch")]
    Fetch {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
    #[command(about = "Fetch a remote branch and merge it")]
    Pull {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return report_parse_error(err),
    };

    let pwd = std::env::current_dir()?;
    let mut repository = Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

    // all command failures end the same way: fixed message, exit code 0
    if let Err(err) = run(&mut repository, cli.command).await {
        println!("{err}");
    }

    Ok(())
}

async fn run(repository: &mut Repository, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Init => repository.init().await,
        Commands::Add { file } => repository.add(&file).await,
        Commands::Commit { message } => repository.commit(&message).await,
        Commands::Rm { file } => repository.rm(&file).await,
        Commands::Log => repository.log().await,
        Commands::GlobalLog => repository.global_log().await,
        Commands::Find { message } => repository.find(&message).await,
        Commands::Status => repository.status().await,
        Commands::Checkout { target, files } => {
            repository.checkout(target.as_deref(), &files).await
        }
        Commands::Branch { name } => repository.branch(&name).await,
        Commands::RmBranch { name } => repository.rm_branch(&name).await,
        Commands::Reset { commit_id } => repository.reset(&commit_id).await,
        Commands::Merge { branch } => repository.merge(&branch).await,
        Commands::AddRemote { name, path } => repository.add_remote(&name, &path).await,
        Commands::RmRemote { name } => repository.rm_remote(&name).await,
        Commands::Push { remote, branch } => repository.push(&remote, &branch).await,
        Commands::Fetch { remote, branch } => repository.fetch(&remote, &branch).await,
        Commands::Pull { remote, branch } => repository.pull(&remote, &branch).await,
    }
}

/// Map clap's failures onto the fixed usage messages; help and version pass
/// through untouched. The process still exits 0.
fn report_parse_error(err: clap::Error) -> anyhow::Result<()> {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => print!("{err}"),
        ErrorKind::InvalidSubcommand => println!("{}", UsageError::UnknownCommand),
        ErrorKind::MissingSubcommand
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            println!("{}", UsageError::MissingCommand)
        }
        _ => println!("{}", UsageError::IncorrectOperands),
    }

    Ok(())
}

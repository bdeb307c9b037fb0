use anyhow::Result;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use jot::areas::repository::Repository;
use jot::artifacts::core::PagerWriter;

#[derive(Parser)]
#[command(
    name = "jot",
    version = "0.1.0",
    about = "A minimal snapshot version-control system",
    long_about = "jot tracks snapshots of a working directory in a \
    content-addressed object store, with branching and three-way merging. \
    It is a learning-scale engine, not a git replacement.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "init", about = "Initialize a new repository")]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        path: String,
    },
    #[command(name = "rm", about = "Stage a file removal")]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        path: String,
    },
    #[command(name = "commit", about = "Record the staged snapshot as a new commit")]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Show the linear history of the active branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit in the object store")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of commits with the given message")]
    Find {
        #[arg(index = 1, help = "The exact commit message to look for")]
        message: String,
    },
    #[command(name = "status", about = "Show branches and staged changes")]
    Status,
    #[command(
        name = "checkout",
        about = "Switch branches or restore files",
        long_about = "Three forms: `checkout <branch>` switches the working tree to a \
        branch; `checkout -- <path>` restores a file from the active commit; \
        `checkout <commit-id> -- <path>` restores a file from an arbitrary commit."
    )]
    Checkout {
        #[arg(index = 1, help = "Branch name, or a commit id when restoring a file")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "File to restore, after --")]
        path: Option<String>,
    },
    #[command(name = "branch", about = "Create a new branch at the current commit")]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "reset", about = "Move the active branch to an arbitrary commit")]
    Reset {
        #[arg(index = 1, help = "The commit id, abbreviations accepted")]
        commit_id: String,
    },
    #[command(name = "merge", about = "Merge a branch into the active branch")]
    Merge {
        #[arg(index = 1, help = "The branch to merge in")]
        branch: String,
    },
}

/// Pick the writer for history output: the pager on an interactive terminal,
/// plain stdout otherwise or when NO_PAGER is set
fn history_writer() -> (Box<dyn std::io::Write>, Option<minus::Pager>) {
    if std::env::var_os("NO_PAGER").is_none() && std::io::stdout().is_terminal() {
        let pager = minus::Pager::new();
        (Box::new(PagerWriter::new(pager.clone())), Some(pager))
    } else {
        (Box::new(std::io::stdout()), None)
    }
}

fn repository() -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init => repository()?.init()?,
        Commands::Add { path } => repository()?.add(path)?,
        Commands::Rm { path } => repository()?.rm(path)?,
        Commands::Commit { message } => repository()?.commit(message)?,
        Commands::Log => {
            let (writer, pager) = history_writer();
            let pwd = std::env::current_dir()?;
            let repository = Repository::new(&pwd.to_string_lossy(), writer)?;

            repository.log()?;

            if let Some(pager) = pager {
                minus::page_all(pager)?;
            }
        }
        Commands::GlobalLog => {
            let (writer, pager) = history_writer();
            let pwd = std::env::current_dir()?;
            let repository = Repository::new(&pwd.to_string_lossy(), writer)?;

            repository.global_log()?;

            if let Some(pager) = pager {
                minus::page_all(pager)?;
            }
        }
        Commands::Find { message } => repository()?.find(message)?,
        Commands::Status => repository()?.status()?,
        Commands::Checkout { target, path } => match (target, path) {
            (Some(branch), None) => repository()?.checkout_branch(branch)?,
            (None, Some(path)) => repository()?.checkout_file(path)?,
            (Some(commit_id), Some(path)) => repository()?.checkout_file_at(commit_id, path)?,
            (None, None) => anyhow::bail!("incorrect operands for checkout"),
        },
        Commands::Branch { name } => repository()?.branch(name)?,
        Commands::RmBranch { name } => repository()?.rm_branch(name)?,
        Commands::Reset { commit_id } => repository()?.reset(commit_id)?,
        Commands::Merge { branch } => repository()?.merge(branch)?,
    }

    Ok(())
}

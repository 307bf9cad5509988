use crate::areas::repository::Repository;
use crate::artifacts::abort::Abort;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

mod areas;
mod artifacts;
mod commands;

#[derive(Parser)]
#[command(
    name = "gitlet",
    version = "0.1.0",
    about = "A miniature version-control system",
    long_about = "Gitlet tracks snapshots of the plain files in the current \
    directory, organizes them into a commit graph with branches and \
    three-way merges, and can mirror its history to a second repository \
    referenced by path."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Create a new repository in the current directory")]
    Init,
    #[command(about = "Stage a file for the next commit")]
    Add {
        #[arg(value_name = "FILE")]
        file: String,
    },
    #[command(about = "Record the staged changes as a new commit")]
    Commit {
        #[arg(value_name = "MESSAGE")]
        message: String,
    },
    #[command(about = "Unstage a file and stage its removal")]
    Rm {
        #[arg(value_name = "FILE")]
        file: String,
    },
    #[command(about = "Show the current branch's history")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(about = "Print the ids of commits with the given message")]
    Find {
        #[arg(value_name = "MESSAGE")]
        message: String,
    },
    #[command(about = "Show branches, staged changes and untracked files")]
    Status,
    #[command(
        about = "Restore a file or switch branches",
        long_about = "Three forms: `checkout -- FILE` restores HEAD's version \
        of a file, `checkout COMMIT -- FILE` restores it from a commit \
        (id prefixes allowed), and `checkout BRANCH` switches branches."
    )]
    Checkout {
        #[arg(value_name = "TARGET")]
        target: Option<String>,
        #[arg(last = true, value_name = "FILE")]
        file: Option<String>,
    },
    #[command(about = "Create a branch at the current commit")]
    Branch {
        #[arg(value_name = "NAME")]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(value_name = "NAME")]
        name: String,
    },
    #[command(about = "Move the current branch to a commit (id prefixes allowed)")]
    Reset {
        #[arg(value_name = "COMMIT")]
        commit: String,
    },
    #[command(about = "Merge a branch into the current branch")]
    Merge {
        #[arg(value_name = "BRANCH")]
        branch: String,
    },
    #[command(name = "add-remote", about = "Record an alias for another repository")]
    AddRemote {
        #[arg(value_name = "NAME")]
        name: String,
        #[arg(value_name = "PATH")]
        path: String,
    },
    #[command(name = "rm-remote", about = "Forget a remote alias")]
    RmRemote {
        #[arg(value_name = "NAME")]
        name: String,
    },
    #[command(about = "Mirror the current branch onto a remote branch")]
    Push {
        #[arg(value_name = "REMOTE")]
        remote: String,
        #[arg(value_name = "BRANCH")]
        branch: String,
    },
    #[command(about = "Copy a remote branch into the local store")]
    Fetch {
        #[arg(value_name = "REMOTE")]
        remote: String,
        #[arg(value_name = "BRANCH")]
        branch: String,
    },
    #[command(about = "Fetch a remote branch and merge it")]
    Pull {
        #[arg(value_name = "REMOTE")]
        remote: String,
        #[arg(value_name = "BRANCH")]
        branch: String,
    },
}

fn main() {
    if std::env::args().len() <= 1 {
        println!("{}", Abort::NoCommand);
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = error.print();
                }
                ErrorKind::InvalidSubcommand => println!("{}", Abort::UnknownCommand),
                _ => println!("{}", Abort::BadOperands),
            }
            return;
        }
    };

    let path = match std::env::current_dir() {
        Ok(path) => path,
        Err(error) => {
            eprintln!("gitlet: {}", error);
            std::process::exit(1);
        }
    };
    let repository = Repository::new(path, Box::new(std::io::stdout()));

    if !matches!(cli.command, Commands::Init) && !repository.is_initialized() {
        println!("{}", Abort::NotARepository);
        return;
    }

    if let Err(error) = dispatch(&repository, cli.command) {
        match error.downcast_ref::<Abort>() {
            // every legal refusal is one line on stdout and a zero exit
            Some(abort) => println!("{}", abort),
            None => {
                eprintln!("gitlet: {:#}", error);
                std::process::exit(1);
            }
        }
    }
}

fn dispatch(repository: &Repository, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Init => repository.init(),
        Commands::Add { file } => repository.add(&file),
        Commands::Commit { message } => repository.commit(&message),
        Commands::Rm { file } => repository.rm(&file),
        Commands::Log => repository.log(),
        Commands::GlobalLog => repository.global_log(),
        Commands::Find { message } => repository.find(&message),
        Commands::Status => repository.status(),
        Commands::Checkout { target, file } => match (target, file) {
            (None, Some(file)) => repository.checkout_file_from_head(&file),
            (Some(token), Some(file)) => repository.checkout_file_at(&token, &file),
            (Some(branch), None) => repository.checkout_branch(&branch),
            (None, None) => Err(Abort::BadOperands.into()),
        },
        Commands::Branch { name } => repository.branch(&name),
        Commands::RmBranch { name } => repository.rm_branch(&name),
        Commands::Reset { commit } => repository.reset(&commit),
        Commands::Merge { branch } => repository.merge(&branch),
        Commands::AddRemote { name, path } => repository.add_remote(&name, &path),
        Commands::RmRemote { name } => repository.rm_remote(&name),
        Commands::Push { remote, branch } => repository.push(&remote, &branch),
        Commands::Fetch { remote, branch } => repository.fetch(&remote, &branch),
        Commands::Pull { remote, branch } => repository.pull(&remote, &branch),
    }
}

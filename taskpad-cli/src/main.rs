mod commands;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use taskpad_core::TaskRepository;
use taskpad_core::config::TaskpadConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "taskpad")]
#[command(about = "Manage tasks, folders and due-date reminders")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a task
    Add(commands::add::AddArgs),
    /// Change fields of an existing task
    Edit(commands::edit::EditArgs),
    /// Toggle a task between done and open
    Done { id: String },
    /// Delete a task
    Rm {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List tasks grouped by due date
    List {
        /// Folder name or id, or one of "today", "upcoming", "all"
        #[arg(short, long)]
        folder: Option<String>,

        /// Print JSON instead of a list
        #[arg(long)]
        json: bool,
    },
    /// Show a month calendar
    Calendar {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// List folders
    Folders,
    /// Create or delete folders
    Folder {
        #[command(subcommand)]
        command: FolderCommands,
    },
    /// Check reminders once and print the ones that are due
    Remind,
}

#[derive(Subcommand)]
enum FolderCommands {
    Add { name: String },
    /// Delete a folder; its tasks move to All Tasks
    Rm { folder: String },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = TaskpadConfig::load()?;
    let store = config.store();
    tracing::debug!(data_dir = %store.dir().display(), "opening task store");
    let mut repo = TaskRepository::load(store);

    match cli.command {
        Commands::Add(args) => commands::add::run(&mut repo, args, &config.default_folder),
        Commands::Edit(args) => commands::edit::run(&mut repo, args),
        Commands::Done { id } => commands::done::run(&mut repo, &id),
        Commands::Rm { id, yes } => commands::rm::run(&mut repo, &id, yes),
        Commands::List { folder, json } => {
            let folder = folder.unwrap_or_else(|| config.default_folder.clone());
            commands::list::run(&repo, &folder, json)
        }
        Commands::Calendar { month } => {
            commands::calendar::run(&repo, month.as_deref(), config.week_start)
        }
        Commands::Folders => commands::folder::list(&repo),
        Commands::Folder { command } => match command {
            FolderCommands::Add { name } => commands::folder::add(&mut repo, &name),
            FolderCommands::Rm { folder } => commands::folder::remove(&mut repo, &folder),
        },
        Commands::Remind => commands::remind::run(&mut repo),
    }
}

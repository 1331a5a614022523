use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use owo_colors::OwoColorize;
use taskpad_core::store::Store;
use taskpad_core::{TaskFields, TaskRepository};

use super::resolve_folder;
use crate::render::Render;
use crate::utils::due::{parse_due, parse_lead_time};
use crate::utils::voice::encode_voice_file;

#[derive(Args, Debug, Default)]
pub struct EditArgs {
    /// Id of the task to edit
    pub id: String,

    #[arg(short, long)]
    pub title: Option<String>,

    /// New notes; an empty string clears them
    #[arg(short, long)]
    pub notes: Option<String>,

    #[arg(short, long, conflicts_with = "no_due")]
    pub due: Option<String>,

    /// Remove the due date
    #[arg(long)]
    pub no_due: bool,

    /// Folder name or id
    #[arg(short, long)]
    pub folder: Option<String>,

    /// Reminder lead time; "0" turns the reminder off
    #[arg(long)]
    pub notify: Option<String>,

    #[arg(long, conflicts_with = "no_voice")]
    pub voice: Option<PathBuf>,

    /// Drop the attached voice note
    #[arg(long)]
    pub no_voice: bool,
}

pub fn run<S: Store>(repo: &mut TaskRepository<S>, args: EditArgs) -> Result<()> {
    let id = args.id.clone();
    let fields = apply_args(repo, args)?;
    let task = repo.update_task(&id, fields)?;

    println!("{}", format!("  Updated: {}", task.title).green());
    println!("  {}", task.render());

    Ok(())
}

/// Overlay the given flags on the task's current fields.
pub fn apply_args<S: Store>(repo: &TaskRepository<S>, args: EditArgs) -> Result<TaskFields> {
    let task = repo
        .task(&args.id)
        .with_context(|| format!("No task with id '{}'", args.id))?;
    let mut fields = TaskFields::from(task);

    if let Some(title) = args.title {
        fields.title = title;
    }
    if let Some(notes) = args.notes {
        fields.notes = Some(notes).filter(|n| !n.trim().is_empty());
    }
    if args.no_due {
        fields.due_date = None;
    } else if let Some(due) = args.due {
        fields.due_date = Some(parse_due(&due)?);
    }
    if let Some(folder) = args.folder {
        fields.folder_id = resolve_folder(repo, &folder)?;
    }
    if let Some(notify) = args.notify {
        fields.notify_before = parse_lead_time(&notify)?;
    }
    if args.no_voice {
        fields.voice_message = None;
    } else if let Some(path) = args.voice {
        fields.voice_message = Some(encode_voice_file(&path)?);
    }

    Ok(fields)
}

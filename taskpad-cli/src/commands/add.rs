use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use dialoguer::Input;
use owo_colors::OwoColorize;
use taskpad_core::store::Store;
use taskpad_core::{TaskFields, TaskRepository};

use super::resolve_folder;
use crate::render::Render;
use crate::utils::due::{parse_due, parse_lead_time};
use crate::utils::voice::encode_voice_file;

#[derive(Args, Debug, Default)]
pub struct AddArgs {
    /// Task title (prompted for when omitted)
    pub title: Option<String>,

    #[arg(short, long)]
    pub notes: Option<String>,

    /// Due date, e.g. "2025-03-20T15:00" or "tomorrow 3pm"
    #[arg(short, long)]
    pub due: Option<String>,

    /// Folder name or id
    #[arg(short, long)]
    pub folder: Option<String>,

    /// Remind this long before the due date, e.g. "30" or "1h"
    #[arg(long)]
    pub notify: Option<String>,

    /// Audio file to attach as a voice note
    #[arg(long)]
    pub voice: Option<PathBuf>,
}

pub fn run<S: Store>(
    repo: &mut TaskRepository<S>,
    args: AddArgs,
    default_folder: &str,
) -> Result<()> {
    let interactive = args.title.is_none();

    let fields = if interactive {
        prompt_fields(repo, args, default_folder)?
    } else {
        build_fields(repo, args, default_folder)?
    };

    let task = repo.create_task(fields)?;

    if interactive {
        println!();
    }
    println!("{}", format!("  Created: {}", task.title).green());
    println!("  {}", task.render());

    Ok(())
}

/// Fields from flags only.
pub fn build_fields<S: Store>(
    repo: &TaskRepository<S>,
    args: AddArgs,
    default_folder: &str,
) -> Result<TaskFields> {
    let title = args.title.unwrap_or_default();
    if title.trim().is_empty() {
        anyhow::bail!("A task needs a title");
    }

    let folder_id = resolve_folder(repo, args.folder.as_deref().unwrap_or(default_folder))?;
    let mut fields = TaskFields::new(title).folder(folder_id);

    if let Some(notes) = args.notes {
        fields = fields.notes(notes);
    }
    if let Some(due) = args.due {
        fields = fields.due(parse_due(&due)?);
    }
    if let Some(notify) = args.notify {
        fields = fields.notify_before(parse_lead_time(&notify)?);
    }
    if let Some(path) = args.voice {
        fields = fields.voice_message(encode_voice_file(&path)?);
    }

    Ok(fields)
}

fn prompt_fields<S: Store>(
    repo: &TaskRepository<S>,
    args: AddArgs,
    default_folder: &str,
) -> Result<TaskFields> {
    let title: String = Input::new()
        .with_prompt("  Title")
        .validate_with(|input: &String| {
            if input.trim().is_empty() {
                Err("A task needs a title")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let notes = match args.notes {
        Some(notes) => notes,
        None => optional_input("  Notes (skip)")?,
    };

    let due = match args.due {
        Some(due) => Some(parse_due(&due)?),
        None => prompt_with_retry("  Due? (skip)", parse_due)?,
    };

    let notify_before = match args.notify {
        Some(notify) => parse_lead_time(&notify)?,
        None if due.is_some() => {
            prompt_with_retry("  Remind how long before? (skip)", parse_lead_time)?
                .unwrap_or(0)
        }
        None => 0,
    };

    let folder_input = match args.folder {
        Some(folder) => folder,
        None => {
            let input = optional_input(&format!("  Folder ({})", default_folder))?;
            if input.is_empty() {
                default_folder.to_string()
            } else {
                input
            }
        }
    };

    let mut fields = TaskFields::new(title)
        .folder(resolve_folder(repo, &folder_input)?)
        .notify_before(notify_before);
    fields.notes = Some(notes).filter(|n| !n.is_empty());
    fields.due_date = due;
    if let Some(path) = args.voice {
        fields = fields.voice_message(encode_voice_file(&path)?);
    }

    Ok(fields)
}

fn optional_input(prompt: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(String::new())
        .show_default(false)
        .interact_text()?;
    Ok(input.trim().to_string())
}

/// Prompt until the input parses. Empty input skips the field.
fn prompt_with_retry<T, F>(prompt: &str, parse: F) -> Result<Option<T>>
where
    F: Fn(&str) -> Result<T>,
{
    loop {
        let input = optional_input(prompt)?;
        if input.is_empty() {
            return Ok(None);
        }
        match parse(&input) {
            Ok(result) => return Ok(Some(result)),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use taskpad_core::store::MemoryStore;

    fn args(title: &str) -> AddArgs {
        AddArgs {
            title: Some(title.to_string()),
            ..AddArgs::default()
        }
    }

    #[test]
    fn flags_become_fields() {
        let mut repo = TaskRepository::load(MemoryStore::new());
        let work = repo.create_folder("Work").unwrap();

        let fields = build_fields(
            &repo,
            AddArgs {
                notes: Some("slides".into()),
                due: Some("2025-03-20T15:00".into()),
                folder: Some("work".into()),
                notify: Some("1h".into()),
                ..args("Present")
            },
            "all",
        )
        .unwrap();

        assert_eq!(fields.title, "Present");
        assert_eq!(fields.notes.as_deref(), Some("slides"));
        assert_eq!(fields.folder_id, work.id);
        assert_eq!(fields.notify_before, 60);
        assert_eq!(
            fields.due_date.and_then(|d| d.datetime()),
            NaiveDate::from_ymd_opt(2025, 3, 20).unwrap().and_hms_opt(15, 0, 0)
        );
    }

    #[test]
    fn falls_back_to_default_folder() {
        let repo = TaskRepository::load(MemoryStore::new());
        let fields = build_fields(&repo, args("Buy milk"), "today").unwrap();
        assert_eq!(fields.folder_id, "today");
    }

    #[test]
    fn rejects_blank_title_and_unknown_folder() {
        let repo = TaskRepository::load(MemoryStore::new());
        assert!(build_fields(&repo, args("   "), "all").is_err());
        assert!(
            build_fields(
                &repo,
                AddArgs {
                    folder: Some("Nowhere".into()),
                    ..args("Lost")
                },
                "all"
            )
            .is_err()
        );
    }

    #[test]
    fn run_persists_the_task() {
        let mut repo = TaskRepository::load(MemoryStore::new());
        run(&mut repo, args("Water plants"), "all").unwrap();

        assert_eq!(repo.tasks().len(), 1);
        assert_eq!(repo.store().load_tasks()[0].title, "Water plants");
    }
}

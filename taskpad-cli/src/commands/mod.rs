pub mod add;
pub mod calendar;
pub mod done;
pub mod edit;
pub mod folder;
pub mod list;
pub mod remind;
pub mod rm;

use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveDateTime};
use taskpad_core::folder::is_builtin_id;
use taskpad_core::store::Store;
use taskpad_core::{FolderSelector, TaskRepository};

/// Reference date for views: the local calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Resolve a folder given by id or by name (case-insensitive).
pub fn resolve_folder<S: Store>(repo: &TaskRepository<S>, input: &str) -> Result<String> {
    if let Some(folder) = repo.folder(input) {
        return Ok(folder.id.clone());
    }

    let matches: Vec<_> = repo
        .folders()
        .iter()
        .filter(|f| f.name.eq_ignore_ascii_case(input.trim()))
        .collect();

    match matches.as_slice() {
        [folder] => Ok(folder.id.clone()),
        [] => {
            let available: Vec<_> = repo.folders().iter().map(|f| f.name.as_str()).collect();
            anyhow::bail!(
                "Folder '{}' not found. Available: {}",
                input,
                available.join(", ")
            )
        }
        _ => anyhow::bail!("Several folders are named '{}'. Use the folder id instead.", input),
    }
}

/// Resolve the folder a listing should show: a reserved tag or a user folder.
pub fn resolve_selector<S: Store>(repo: &TaskRepository<S>, input: &str) -> Result<FolderSelector> {
    if is_builtin_id(input) {
        return Ok(FolderSelector::from(input));
    }
    Ok(FolderSelector::from(resolve_folder(repo, input)?.as_str()))
}

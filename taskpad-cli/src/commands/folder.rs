use anyhow::Result;
use owo_colors::OwoColorize;
use taskpad_core::store::Store;
use taskpad_core::view::filter_by_folder;
use taskpad_core::{FolderSelector, TaskRepository};

use super::{resolve_folder, today};
use crate::render::Render;

/// List folders with how many open tasks each one shows.
pub fn list<S: Store>(repo: &TaskRepository<S>) -> Result<()> {
    let reference = today();

    for folder in repo.folders() {
        let open = filter_by_folder(repo.tasks(), &FolderSelector::from(folder), reference)
            .iter()
            .filter(|t| !t.completed)
            .count();
        println!("{} {}", folder.render(), format!("[{}]", open).dimmed());
    }

    Ok(())
}

pub fn add<S: Store>(repo: &mut TaskRepository<S>, name: &str) -> Result<()> {
    let folder = repo.create_folder(name)?;
    println!("{}", format!("  Created folder: {}", folder.name).green());
    Ok(())
}

pub fn remove<S: Store>(repo: &mut TaskRepository<S>, folder: &str) -> Result<()> {
    let id = resolve_folder(repo, folder)?;
    let name = repo.folder(&id).map(|f| f.name.clone()).unwrap_or_default();
    let moved = repo.delete_folder(&id)?;

    println!("{}", format!("  Deleted folder: {}", name).red());
    if moved > 0 {
        println!("  {} task(s) moved to All Tasks", moved);
    }

    Ok(())
}

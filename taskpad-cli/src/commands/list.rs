use anyhow::Result;
use owo_colors::OwoColorize;
use serde_json::json;
use taskpad_core::TaskRepository;
use taskpad_core::store::Store;
use taskpad_core::view::{TaskGroup, filter_by_folder, group_by_date};

use super::{resolve_selector, today};
use crate::render::Render;

pub fn run<S: Store>(repo: &TaskRepository<S>, folder: &str, json: bool) -> Result<()> {
    let selector = resolve_selector(repo, folder)?;
    let visible = filter_by_folder(repo.tasks(), &selector, today());
    let groups = group_by_date(visible, today());

    if json {
        println!("{}", serde_json::to_string_pretty(&groups_json(&groups))?);
        return Ok(());
    }

    if groups.is_empty() {
        println!("{}", "No tasks".dimmed());
        return Ok(());
    }

    let rendered: Vec<String> = groups.iter().map(|group| group.render()).collect();
    println!("{}", rendered.join("\n\n"));

    Ok(())
}

fn groups_json(groups: &[TaskGroup<'_>]) -> serde_json::Value {
    groups
        .iter()
        .map(|group| {
            json!({
                "label": group.label(),
                "tasks": group.tasks,
            })
        })
        .collect()
}

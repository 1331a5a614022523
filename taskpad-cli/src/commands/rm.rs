use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use taskpad_core::TaskRepository;
use taskpad_core::store::Store;

/// Delete a task. Unknown ids are not an error.
pub fn run<S: Store>(repo: &mut TaskRepository<S>, id: &str, yes: bool) -> Result<()> {
    let Some(title) = repo.task(id).map(|t| t.title.clone()) else {
        println!("{}", format!("  No task with id '{}'", id).dimmed());
        return Ok(());
    };

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("  Delete \"{}\"?", title))
            .default(false)
            .interact()?;
        if !confirmed {
            return Ok(());
        }
    }

    repo.delete_task(id)?;
    println!("{}", format!("  Deleted: {}", title).red());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskpad_core::TaskFields;
    use taskpad_core::store::MemoryStore;

    #[test]
    fn deletes_without_prompt_when_confirmed() {
        let mut repo = TaskRepository::load(MemoryStore::new());
        let id = repo.create_task(TaskFields::new("Old chore")).unwrap().id;

        run(&mut repo, &id, true).unwrap();
        assert!(repo.tasks().is_empty());
        assert!(repo.store().load_tasks().is_empty());
    }

    #[test]
    fn missing_task_is_a_no_op() {
        let mut repo = TaskRepository::load(MemoryStore::new());
        run(&mut repo, "task_missing", false).unwrap();
    }
}

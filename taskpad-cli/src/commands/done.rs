use anyhow::Result;
use owo_colors::OwoColorize;
use taskpad_core::TaskRepository;
use taskpad_core::store::Store;

pub fn run<S: Store>(repo: &mut TaskRepository<S>, id: &str) -> Result<()> {
    let completed = repo.toggle_completion(id)?;
    let title = repo.task(id).map(|t| t.title.clone()).unwrap_or_default();

    if completed {
        println!("{}", format!("  Done: {}", title).green());
    } else {
        println!("  Reopened: {}", title);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskpad_core::TaskFields;
    use taskpad_core::store::MemoryStore;

    #[test]
    fn toggles_back_and_forth() {
        let mut repo = TaskRepository::load(MemoryStore::new());
        let id = repo.create_task(TaskFields::new("Laundry")).unwrap().id;

        run(&mut repo, &id).unwrap();
        assert!(repo.task(&id).unwrap().completed);

        run(&mut repo, &id).unwrap();
        assert!(!repo.task(&id).unwrap().completed);
    }

    #[test]
    fn unknown_id_is_an_error() {
        let mut repo = TaskRepository::load(MemoryStore::new());
        assert!(run(&mut repo, "task_missing").is_err());
    }
}

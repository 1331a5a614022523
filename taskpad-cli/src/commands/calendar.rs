use anyhow::Result;
use taskpad_core::TaskRepository;
use taskpad_core::store::Store;
use taskpad_core::view::{MonthAnchor, WeekStart, build_calendar_grid};

use super::today;
use crate::render::Render;

/// Show the month grid for `month` ("YYYY-MM"), or the current month.
pub fn run<S: Store>(
    repo: &TaskRepository<S>,
    month: Option<&str>,
    week_start: WeekStart,
) -> Result<()> {
    let reference = today();
    let anchor = match month {
        Some(input) => input.parse::<MonthAnchor>()?,
        None => MonthAnchor::containing(reference),
    };

    let grid = build_calendar_grid(anchor, repo.tasks(), reference, week_start);
    println!("{}", grid.render());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskpad_core::store::MemoryStore;

    #[test]
    fn rejects_bad_month() {
        let repo = TaskRepository::load(MemoryStore::new());
        assert!(run(&repo, Some("2025-13"), WeekStart::Sunday).is_err());
        run(&repo, Some("2025-02"), WeekStart::Monday).unwrap();
    }
}

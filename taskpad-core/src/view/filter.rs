use chrono::NaiveDate;

use crate::folder::FolderSelector;
use crate::task::Task;

/// Tasks visible in a folder view, in stored order.
///
/// `Today` and `Upcoming` compare calendar days only, so a task due at
/// 23:59 on the reference day is "today", never "upcoming".
pub fn filter_by_folder<'a>(
    tasks: &'a [Task],
    selector: &FolderSelector,
    reference: NaiveDate,
) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| matches_selector(task, selector, reference))
        .collect()
}

fn matches_selector(task: &Task, selector: &FolderSelector, reference: NaiveDate) -> bool {
    match selector {
        FolderSelector::Today => task.due_day() == Some(reference),
        FolderSelector::Upcoming => task.due_day().is_some_and(|day| day > reference),
        FolderSelector::All => true,
        FolderSelector::Folder(id) => task.folder_id == *id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::due_date::DueDate;
    use chrono::Utc;

    fn task(id: &str, due: &str, folder: &str) -> Task {
        Task {
            id: id.to_string(),
            title: id.to_string(),
            notes: None,
            due_date: DueDate::parse(due),
            folder_id: folder.to_string(),
            completed: false,
            created_at: Utc::now(),
            notify_before: 0,
            notified: false,
            voice_message: None,
        }
    }

    fn ids(tasks: Vec<&Task>) -> Vec<&str> {
        tasks.into_iter().map(|t| t.id.as_str()).collect()
    }

    fn sample() -> Vec<Task> {
        vec![
            task("yesterday", "2026-10-18T12:00", "all"),
            task("early", "2026-10-19T00:00", "all"),
            task("late", "2026-10-19T23:59", "folder_1"),
            task("tomorrow", "2026-10-20T00:00", "folder_1"),
            task("later", "2026-12-01T08:00", "all"),
            task("undated", "", "folder_2"),
            task("garbled", "someday", "all"),
        ]
    }

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn today_is_same_calendar_day() {
        let tasks = sample();
        let today = filter_by_folder(&tasks, &FolderSelector::Today, reference());
        assert_eq!(ids(today), vec!["early", "late"]);
    }

    #[test]
    fn upcoming_starts_after_the_reference_day() {
        let tasks = sample();
        let upcoming = filter_by_folder(&tasks, &FolderSelector::Upcoming, reference());
        assert_eq!(ids(upcoming), vec!["tomorrow", "later"]);
    }

    #[test]
    fn all_returns_everything_in_order() {
        let tasks = sample();
        let all = filter_by_folder(&tasks, &FolderSelector::All, reference());
        assert_eq!(all.len(), tasks.len());
        assert_eq!(all[0].id, "yesterday");
    }

    #[test]
    fn user_folder_matches_exact_id() {
        let tasks = sample();
        let filed = filter_by_folder(&tasks, &FolderSelector::from("folder_1"), reference());
        assert_eq!(ids(filed), vec!["late", "tomorrow"]);

        let missing = filter_by_folder(&tasks, &FolderSelector::from("folder_9"), reference());
        assert!(missing.is_empty());
    }
}

//! Task records and the editable field set used to create or replace them.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::due_date::{self, DueDate};
use crate::folder::ALL_FOLDER_ID;

/// A task as stored in `tasks.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "due_date::deserialize_optional")]
    pub due_date: Option<DueDate>,
    #[serde(default = "default_folder_id")]
    pub folder_id: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    /// Reminder lead time in minutes, 0 for no reminder.
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub notify_before: u32,
    #[serde(default)]
    pub notified: bool,
    /// Opaque encoded audio, usually a `data:` URL.
    #[serde(default, deserialize_with = "non_empty_string")]
    pub voice_message: Option<String>,
}

impl Task {
    pub fn due_datetime(&self) -> Option<NaiveDateTime> {
        self.due_date.as_ref().and_then(DueDate::datetime)
    }

    /// Calendar day the task is due. Malformed due dates have none.
    pub fn due_day(&self) -> Option<NaiveDate> {
        self.due_date.as_ref().and_then(DueDate::date)
    }

    pub fn has_reminder(&self) -> bool {
        self.notify_before > 0 && self.due_datetime().is_some()
    }

    /// Time of day the task is due, e.g. "15:00".
    pub fn due_time_label(&self) -> Option<String> {
        self.due_datetime().map(|dt| dt.format("%H:%M").to_string())
    }

    pub fn reminder_label(&self) -> Option<String> {
        (self.notify_before > 0).then(|| format!("(Reminder: {} min before)", self.notify_before))
    }

    pub(crate) fn apply(&mut self, fields: TaskFields) {
        self.title = fields.title.trim().to_string();
        self.notes = fields
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        self.due_date = fields.due_date;
        self.folder_id = fields.folder_id;
        self.notify_before = fields.notify_before;
        self.voice_message = fields.voice_message;
        self.notified = false;
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Every user-editable field of a task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskFields {
    pub title: String,
    pub notes: Option<String>,
    pub due_date: Option<DueDate>,
    pub folder_id: String,
    pub notify_before: u32,
    pub voice_message: Option<String>,
}

impl TaskFields {
    pub fn new(title: impl Into<String>) -> Self {
        TaskFields {
            title: title.into(),
            notes: None,
            due_date: None,
            folder_id: default_folder_id(),
            notify_before: 0,
            voice_message: None,
        }
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn due(mut self, due: impl Into<DueDate>) -> Self {
        self.due_date = Some(due.into());
        self
    }

    pub fn folder(mut self, folder_id: impl Into<String>) -> Self {
        self.folder_id = folder_id.into();
        self
    }

    pub fn notify_before(mut self, minutes: u32) -> Self {
        self.notify_before = minutes;
        self
    }

    pub fn voice_message(mut self, payload: impl Into<String>) -> Self {
        self.voice_message = Some(payload.into());
        self
    }
}

impl From<&Task> for TaskFields {
    fn from(task: &Task) -> Self {
        TaskFields {
            title: task.title.clone(),
            notes: task.notes.clone(),
            due_date: task.due_date.clone(),
            folder_id: task.folder_id.clone(),
            notify_before: task.notify_before,
            voice_message: task.voice_message.clone(),
        }
    }
}

fn default_folder_id() -> String {
    ALL_FOLDER_ID.to_string()
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()))
}

// Older records can carry `null` here when the lead time select was empty.
fn lenient_minutes<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<u32> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_test_task() -> Task {
        Task {
            id: "task_1".to_string(),
            title: "Ship report".to_string(),
            notes: None,
            due_date: DueDate::parse("2025-03-20T15:00"),
            folder_id: "all".to_string(),
            completed: false,
            created_at: Utc.with_ymd_and_hms(2025, 3, 19, 8, 0, 0).unwrap(),
            notify_before: 30,
            notified: false,
            voice_message: None,
        }
    }

    #[test]
    fn reads_browser_era_record() {
        let json = r#"{
            "id": "task_1710000000000",
            "title": "Buy milk",
            "notes": "",
            "dueDate": "",
            "folderId": "today",
            "completed": false,
            "createdAt": "2024-03-09T16:00:00.000Z",
            "notifyBefore": 0,
            "notified": false,
            "voiceMessage": null
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, "task_1710000000000");
        assert_eq!(task.notes, None);
        assert_eq!(task.due_date, None);
        assert_eq!(task.voice_message, None);
        assert_eq!(task.folder_id, "today");
    }

    #[test]
    fn null_lead_time_reads_as_zero() {
        let json = r#"{"id":"t","title":"x","createdAt":"2024-03-09T16:00:00Z","notifyBefore":null}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.notify_before, 0);
        assert_eq!(task.folder_id, "all");
    }

    #[test]
    fn serializes_camel_case() {
        let value = serde_json::to_value(make_test_task()).unwrap();
        assert_eq!(value["dueDate"], "2025-03-20T15:00");
        assert_eq!(value["folderId"], "all");
        assert_eq!(value["notifyBefore"], 30);
    }

    #[test]
    fn labels() {
        let task = make_test_task();
        assert_eq!(task.due_time_label().as_deref(), Some("15:00"));
        assert_eq!(task.reminder_label().as_deref(), Some("(Reminder: 30 min before)"));
        assert!(task.has_reminder());
    }

    #[test]
    fn malformed_due_date_has_no_day() {
        let mut task = make_test_task();
        task.due_date = DueDate::parse("soon-ish");
        assert_eq!(task.due_day(), None);
        assert!(!task.has_reminder());
    }

    #[test]
    fn apply_replaces_fields_and_rearms() {
        let mut task = make_test_task();
        task.notified = true;
        task.completed = true;

        task.apply(TaskFields::new("  Ship final report ").notes("   "));

        assert_eq!(task.title, "Ship final report");
        assert_eq!(task.notes, None);
        assert_eq!(task.due_date, None);
        assert!(!task.notified);
        assert!(task.completed);
        assert_eq!(task.id, "task_1");
    }
}

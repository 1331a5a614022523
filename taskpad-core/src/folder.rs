//! Folders: the three built-in smart filters plus user categories.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const TODAY_FOLDER_ID: &str = "today";
pub const UPCOMING_FOLDER_ID: &str = "upcoming";
pub const ALL_FOLDER_ID: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
}

impl Folder {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Folder {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Folder list used on first run.
    pub fn defaults() -> Vec<Folder> {
        vec![
            Folder::new(TODAY_FOLDER_ID, "Today"),
            Folder::new(UPCOMING_FOLDER_ID, "Upcoming"),
            Folder::new(ALL_FOLDER_ID, "All Tasks"),
        ]
    }

    pub fn is_builtin(&self) -> bool {
        is_builtin_id(&self.id)
    }
}

pub fn is_builtin_id(id: &str) -> bool {
    matches!(id, TODAY_FOLDER_ID | UPCOMING_FOLDER_ID | ALL_FOLDER_ID)
}

impl fmt::Display for Folder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Which tasks a folder view shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderSelector {
    /// Due on the reference day.
    Today,
    /// Due on any day after the reference day.
    Upcoming,
    All,
    /// Tasks filed under a user folder id.
    Folder(String),
}

impl From<&str> for FolderSelector {
    fn from(id: &str) -> Self {
        match id {
            TODAY_FOLDER_ID => FolderSelector::Today,
            UPCOMING_FOLDER_ID => FolderSelector::Upcoming,
            ALL_FOLDER_ID => FolderSelector::All,
            other => FolderSelector::Folder(other.to_string()),
        }
    }
}

impl From<&Folder> for FolderSelector {
    fn from(folder: &Folder) -> Self {
        FolderSelector::from(folder.id.as_str())
    }
}

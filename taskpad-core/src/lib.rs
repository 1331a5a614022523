//! Core library for taskpad.
//!
//! - `store` persists the task and folder collections
//! - `repository` owns them and exposes the create/update/delete commands
//! - `view` derives folder lists, date groups and the month calendar
//! - `scheduler` fires due-date reminders

pub mod config;
pub mod due_date;
pub mod error;
pub mod folder;
pub mod repository;
pub mod scheduler;
pub mod store;
pub mod task;
pub mod view;

pub use due_date::DueDate;
pub use error::{TaskpadError, TaskpadResult};
pub use folder::{Folder, FolderSelector};
pub use repository::TaskRepository;
pub use task::{Task, TaskFields};

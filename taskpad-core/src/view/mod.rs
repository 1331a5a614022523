//! Read-only views derived from a snapshot of the repository.
//!
//! Nothing here mutates tasks. Views borrow from the snapshot they were
//! built from and must be rebuilt after any repository write.

mod calendar;
mod filter;
mod group;

pub use calendar::{CalendarCell, CalendarGrid, MonthAnchor, WeekStart, build_calendar_grid};
pub use filter::filter_by_folder;
pub use group::{DateBucket, TaskGroup, group_by_date};

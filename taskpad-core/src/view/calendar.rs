use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::TaskpadError;
use crate::task::Task;

/// First column of the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// Column index of `weekday` in a grid starting on this day.
    fn column(self, weekday: Weekday) -> u32 {
        match self {
            WeekStart::Sunday => weekday.num_days_from_sunday(),
            WeekStart::Monday => weekday.num_days_from_monday(),
        }
    }

    pub fn weekday_labels(self) -> [&'static str; 7] {
        match self {
            WeekStart::Sunday => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            WeekStart::Monday => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
        }
    }
}

/// A calendar month, identified by its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthAnchor {
    first_day: NaiveDate,
}

impl MonthAnchor {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| MonthAnchor { first_day })
    }

    /// The month `date` falls in.
    pub fn containing(date: NaiveDate) -> Self {
        MonthAnchor {
            first_day: date - Days::new(u64::from(date.day0())),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// Previous month. Stays put at the start of the supported date range.
    pub fn prev(&self) -> Self {
        self.first_day
            .checked_sub_months(Months::new(1))
            .map(|first_day| MonthAnchor { first_day })
            .unwrap_or(*self)
    }

    /// Next month. Stays put at the end of the supported date range.
    pub fn next(&self) -> Self {
        self.first_day
            .checked_add_months(Months::new(1))
            .map(|first_day| MonthAnchor { first_day })
            .unwrap_or(*self)
    }

    pub fn days_in_month(&self) -> u32 {
        self.first_day
            .iter_days()
            .take_while(|d| d.month() == self.month())
            .count() as u32
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// e.g. "October 2026"
    pub fn title(&self) -> String {
        self.first_day.format("%B %Y").to_string()
    }
}

impl fmt::Display for MonthAnchor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.first_day.format("%Y-%m"))
    }
}

impl FromStr for MonthAnchor {
    type Err = TaskpadError;

    /// Parse `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .map(MonthAnchor::containing)
            .map_err(|_| TaskpadError::Validation(format!("Invalid month '{}'. Expected YYYY-MM", s)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarCell<'a> {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_today: bool,
    /// Tasks due this day, in stored order.
    pub tasks: Vec<&'a Task>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarGrid<'a> {
    pub month: MonthAnchor,
    pub week_start: WeekStart,
    pub cells: Vec<CalendarCell<'a>>,
}

impl<'a> CalendarGrid<'a> {
    /// Rows of seven cells.
    pub fn weeks(&self) -> std::slice::Chunks<'_, CalendarCell<'a>> {
        self.cells.chunks(7)
    }
}

/// Build the month grid: whole weeks from the week containing the 1st
/// through the week containing the last day of the month.
pub fn build_calendar_grid<'a>(
    month: MonthAnchor,
    tasks: &'a [Task],
    reference: NaiveDate,
    week_start: WeekStart,
) -> CalendarGrid<'a> {
    let first_day = month.first_day();
    let lead = week_start.column(first_day.weekday());
    let cell_count = (lead + month.days_in_month()).div_ceil(7) * 7;
    let grid_start = first_day - Days::new(u64::from(lead));

    // Malformed and missing due dates have no day and land nowhere
    let mut by_day: HashMap<NaiveDate, Vec<&'a Task>> = HashMap::new();
    for task in tasks {
        if let Some(day) = task.due_day() {
            by_day.entry(day).or_default().push(task);
        }
    }

    let cells = grid_start
        .iter_days()
        .take(cell_count as usize)
        .map(|date| CalendarCell {
            date,
            is_current_month: month.contains(date),
            is_today: date == reference,
            tasks: by_day.remove(&date).unwrap_or_default(),
        })
        .collect();

    CalendarGrid {
        month,
        week_start,
        cells,
    }
}

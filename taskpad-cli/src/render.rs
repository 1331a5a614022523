//! TUI rendering traits for taskpad types.
//!
//! This module provides extension traits that add colored terminal rendering
//! to taskpad-core types using owo_colors.

use owo_colors::OwoColorize;
use taskpad_core::view::{CalendarCell, CalendarGrid, TaskGroup};
use taskpad_core::{Folder, Task};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Task {
    fn render(&self) -> String {
        let checkbox = if self.completed {
            "[x]".green().to_string()
        } else {
            "[ ]".to_string()
        };
        let title = if self.completed {
            self.title.strikethrough().dimmed().to_string()
        } else {
            self.title.clone()
        };

        let mut line = format!("{} {}", checkbox, title);

        if let Some(time) = self.due_time_label() {
            line.push_str(&format!(" {}", time.cyan()));
        }
        if let Some(reminder) = self.reminder_label() {
            line.push_str(&format!(" {}", reminder.dimmed()));
        }
        if self.voice_message.is_some() {
            line.push_str(&format!(" {}", "[voice]".magenta()));
        }
        line.push_str(&format!(" {}", self.id.dimmed()));

        let mut lines = vec![line];
        if let Some(notes) = &self.notes {
            lines.extend(notes.lines().map(|l| format!("    {}", l.dimmed())));
        }
        if let Some(due) = self.due_date.as_ref().filter(|d| d.is_malformed()) {
            lines.push(format!("    {} {}", "unreadable due date:".yellow(), due));
        }

        lines.join("\n")
    }
}

impl Render for TaskGroup<'_> {
    fn render(&self) -> String {
        let mut lines = vec![self.label().bold().to_string()];
        lines.extend(self.tasks.iter().map(|task| {
            task.render()
                .lines()
                .map(|l| format!("  {}", l))
                .collect::<Vec<_>>()
                .join("\n")
        }));
        lines.join("\n")
    }
}

impl Render for Folder {
    fn render(&self) -> String {
        if self.is_builtin() {
            format!("{} {}", self.name, format!("({})", self.id).dimmed())
        } else {
            format!("{} {}", self.name.bold(), self.id.dimmed())
        }
    }
}

/// Width of one day column in the month grid.
const CELL_WIDTH: usize = 5;

fn render_day(cell: &CalendarCell) -> String {
    let marker = if cell.tasks.is_empty() { " " } else { "*" };
    let text = format!("{:>3}{} ", cell.date.format("%-d"), marker);

    if cell.is_today {
        text.reversed().to_string()
    } else if !cell.is_current_month {
        text.dimmed().to_string()
    } else if !cell.tasks.is_empty() {
        text.cyan().to_string()
    } else {
        text
    }
}

impl Render for CalendarGrid<'_> {
    fn render(&self) -> String {
        let width = CELL_WIDTH * 7;
        let mut lines = vec![format!("{:^width$}", self.month.title()).bold().to_string()];

        lines.push(
            self.week_start
                .weekday_labels()
                .iter()
                .map(|l| format!("{:>4} ", l))
                .collect::<String>()
                .dimmed()
                .to_string(),
        );

        for week in self.weeks() {
            lines.push(week.iter().map(render_day).collect());
        }

        // Agenda for days that have tasks
        let agenda: Vec<&CalendarCell> = self.cells.iter().filter(|c| !c.tasks.is_empty()).collect();
        if !agenda.is_empty() {
            lines.push(String::new());
        }
        for cell in agenda {
            let day = cell.date.format("%a %b %-d").to_string();
            let day = if cell.is_current_month {
                day.bold().to_string()
            } else {
                day.dimmed().to_string()
            };
            lines.push(day);
            for task in &cell.tasks {
                let time = task.due_time_label().unwrap_or_default();
                let title = if task.completed {
                    task.title.strikethrough().dimmed().to_string()
                } else {
                    task.title.clone()
                };
                lines.push(format!("  {} {}", time.cyan(), title));
            }
        }

        lines.join("\n")
    }
}

// Break reminders: which mindful-break notifications are due right now.

pub mod handlers;
pub mod planner;

pub use planner::{due_notifications, parse_break_times, BreakNotification};

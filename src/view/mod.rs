//! Interactive terminal viewer for comparing schedules.

mod display;
mod runner;

pub use runner::{PolicyCursor, ScheduleViewer};

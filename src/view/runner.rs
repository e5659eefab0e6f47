use super::display::DisplayTerminal;
use crate::scheduler::Schedule;
use std::io;

pub enum RunnerEvent {
    Quit,
    Next,
    Previous,
    None,
}

/// Which of the compared schedules is on screen. Wraps around at both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolicyCursor {
    current: usize,
    len: usize,
}

impl PolicyCursor {
    pub fn new(len: usize) -> Self {
        Self { current: 0, len }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.current = (self.current + 1) % self.len;
        }
    }

    pub fn previous(&mut self) {
        if self.len > 0 {
            self.current = (self.current + self.len - 1) % self.len;
        }
    }
}

pub struct ScheduleViewer {
    terminal: DisplayTerminal,
    schedules: Vec<Schedule>,
    cursor: PolicyCursor,
}

impl ScheduleViewer {
    pub fn new(schedules: Vec<Schedule>) -> Result<Self, io::Error> {
        let terminal = DisplayTerminal::new()?;
        let cursor = PolicyCursor::new(schedules.len());

        Ok(Self {
            terminal,
            schedules,
            cursor,
        })
    }

    // Returns false if the viewer should quit
    pub fn run(&mut self) -> io::Result<bool> {
        let Some(schedule) = self.schedules.get(self.cursor.current()) else {
            return Ok(false);
        };
        self.terminal
            .draw(schedule, self.cursor.current(), self.schedules.len())?;

        match self.terminal.get_input() {
            RunnerEvent::Quit => return Ok(false),
            RunnerEvent::Next => self.cursor.next(),
            RunnerEvent::Previous => self.cursor.previous(),
            RunnerEvent::None => {}
        }
        Ok(true)
    }
}

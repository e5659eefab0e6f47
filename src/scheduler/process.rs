use crate::error::{Result, SchedError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Process {
    pid: u32,
    arrival_time: u64,
    burst_time: u64,
    priority: i32,

    remaining_time: u64,
    waiting_time: u64,
    turnaround_time: u64,
    completion_time: Option<u64>,
    // When the process last entered the ready state
    ready_since: u64,
}

impl Process {
    const DEFAULT_PRIORITY: i32 = 0;

    pub fn new(pid: u32, arrival_time: u64, burst_time: u64) -> Self {
        Process::with_priority(pid, arrival_time, burst_time, Process::DEFAULT_PRIORITY)
    }

    pub fn with_priority(pid: u32, arrival_time: u64, burst_time: u64, priority: i32) -> Self {
        Self {
            pid,
            arrival_time,
            burst_time,
            priority,
            remaining_time: burst_time,
            waiting_time: 0,
            turnaround_time: 0,
            completion_time: None,
            ready_since: arrival_time,
        }
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn arrival_time(&self) -> u64 {
        self.arrival_time
    }

    pub fn burst_time(&self) -> u64 {
        self.burst_time
    }

    /// Lower value means higher priority.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn remaining_time(&self) -> u64 {
        self.remaining_time
    }

    pub fn waiting_time(&self) -> u64 {
        self.waiting_time
    }

    pub fn turnaround_time(&self) -> u64 {
        self.turnaround_time
    }

    pub fn completion_time(&self) -> Option<u64> {
        self.completion_time
    }

    pub fn is_complete(&self) -> bool {
        self.remaining_time == 0
    }

    pub fn is_eligible(&self, now: u64) -> bool {
        self.arrival_time <= now && !self.is_complete()
    }

    /// Clears everything a previous run wrote, leaving only the static inputs.
    pub fn reset(&mut self) {
        self.remaining_time = self.burst_time;
        self.waiting_time = 0;
        self.turnaround_time = 0;
        self.completion_time = None;
        self.ready_since = self.arrival_time;
    }

    /// Runs the process for `span` units starting at `now`.
    /// Returns true if this slice completed the process.
    pub(crate) fn execute(&mut self, now: u64, span: u64) -> Result<bool> {
        if !self.is_eligible(now) {
            return Err(SchedError::invariant(
                self.pid,
                format!("dispatched at {now} while not eligible"),
            ));
        }
        if span == 0 || span > self.remaining_time {
            return Err(SchedError::invariant(
                self.pid,
                format!(
                    "span {span} outside 1..={} remaining",
                    self.remaining_time
                ),
            ));
        }

        // Time spent in the ready queue since the last slice
        let waited = now.checked_sub(self.ready_since).ok_or_else(|| {
            SchedError::invariant(
                self.pid,
                format!("dispatched at {now} before ready at {}", self.ready_since),
            )
        })?;
        self.waiting_time += waited;

        let end = now + span;
        self.remaining_time -= span;
        self.ready_since = end;

        if self.remaining_time > 0 {
            return Ok(false);
        }

        self.completion_time = Some(end);
        self.turnaround_time = end - self.arrival_time;
        if self.turnaround_time != self.waiting_time + self.burst_time {
            return Err(SchedError::invariant(
                self.pid,
                format!(
                    "turnaround {} != waiting {} + burst {}",
                    self.turnaround_time, self.waiting_time, self.burst_time
                ),
            ));
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eligibility() {
        let mut process = Process::new(1, 3, 2);
        assert!(!process.is_eligible(2));
        assert!(process.is_eligible(3));
        assert!(process.execute(3, 2).unwrap());
        assert!(process.is_complete());
        assert!(!process.is_eligible(10));
    }

    #[test]
    fn test_waiting_accumulates_between_slices() {
        let mut process = Process::new(7, 1, 5);
        // ready from 1, first slice at 2
        assert!(!process.execute(2, 2).unwrap());
        assert_eq!(process.waiting_time(), 1);
        assert_eq!(process.remaining_time(), 3);
        // ready again from 4, second slice at 9
        assert!(process.execute(9, 3).unwrap());
        assert_eq!(process.waiting_time(), 6);
        assert_eq!(process.completion_time(), Some(12));
        assert_eq!(process.turnaround_time(), 11);
    }

    #[test]
    fn test_start_at_arrival_waits_zero() {
        let mut process = Process::new(1, 4, 3);
        assert!(process.execute(4, 3).unwrap());
        assert_eq!(process.waiting_time(), 0);
        assert_eq!(process.turnaround_time(), 3);
    }

    #[test]
    fn test_bad_dispatch_is_rejected() {
        let mut process = Process::new(1, 5, 3);
        assert!(matches!(
            process.execute(4, 1),
            Err(SchedError::InvariantViolation { pid: 1, .. })
        ));
        assert!(process.execute(5, 4).is_err());
        assert!(process.execute(5, 0).is_err());
        assert_eq!(process.remaining_time(), 3);
    }

    #[test]
    fn test_reset() {
        let mut process = Process::with_priority(2, 0, 4, 3);
        process.execute(1, 4).unwrap();
        process.reset();
        assert_eq!(process, Process::with_priority(2, 0, 4, 3));
    }
}

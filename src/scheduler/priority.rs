use super::{next_arrival, run_to_completion_by, Dispatch, Process, Scheduler};

/// Non-preemptive priority scheduling. The smallest priority value wins.
pub struct PriorityScheduler;

impl Scheduler for PriorityScheduler {
    const NAME: &'static str = "Priority";

    fn select_next(&mut self, processes: &[Process], now: u64) -> Option<Dispatch> {
        run_to_completion_by(processes, now, Process::priority)
    }

    fn idle_until(&self, processes: &[Process], now: u64) -> u64 {
        next_arrival(processes, now)
    }
}

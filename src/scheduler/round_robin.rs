use super::{next_arrival, order_by, Dispatch, Process, Scheduler};

/// Preemptive round robin. Each pass visits processes in id order and gives every
/// eligible one at most `quantum` units.
pub struct RoundRobinScheduler {
    quantum: u64,
    order: Vec<usize>,
    current_process: usize,
    // Whether anything ran during the current pass
    pass_dispatched: bool,
}

impl RoundRobinScheduler {
    pub fn new(processes: &[Process], quantum: u64) -> Self {
        Self {
            quantum,
            order: order_by(processes, Process::pid),
            current_process: 0,
            pass_dispatched: false,
        }
    }

    /// Moves to the start of the next pass. Returns false if the pass that just
    /// ended ran nothing, in which case the CPU has to idle first.
    fn next_pass(&mut self) -> bool {
        self.current_process = 0;
        let dispatched = self.pass_dispatched;
        self.pass_dispatched = false;
        dispatched
    }
}

impl Scheduler for RoundRobinScheduler {
    const NAME: &'static str = "Round-Robin";

    fn select_next(&mut self, processes: &[Process], now: u64) -> Option<Dispatch> {
        loop {
            if self.current_process >= self.order.len() && !self.next_pass() {
                return None;
            }

            let index = self.order[self.current_process];
            self.current_process += 1;

            // Not arrived yet or already done: skip without penalty
            let process = processes.get(index)?;
            if process.is_eligible(now) {
                self.pass_dispatched = true;
                return Some(Dispatch {
                    index,
                    span: process.remaining_time().min(self.quantum),
                });
            }
        }
    }

    // Only reached after a whole pass found nothing eligible
    fn idle_until(&self, processes: &[Process], now: u64) -> u64 {
        next_arrival(processes, now)
    }
}

use super::{order_by, Dispatch, Process, Scheduler};

/// Runs processes to completion in arrival order, ties broken by id.
pub struct FcfsScheduler {
    order: Vec<usize>,
    next: usize,
}

impl FcfsScheduler {
    pub fn new(processes: &[Process]) -> Self {
        Self {
            order: order_by(processes, Process::arrival_time),
            next: 0,
        }
    }
}

impl Scheduler for FcfsScheduler {
    const NAME: &'static str = "First-Come-First-Served";

    fn select_next(&mut self, processes: &[Process], now: u64) -> Option<Dispatch> {
        let &index = self.order.get(self.next)?;
        let process = processes.get(index)?;
        if !process.is_eligible(now) {
            return None;
        }

        self.next += 1;
        Some(Dispatch {
            index,
            span: process.remaining_time(),
        })
    }

    // Jump straight to the next arrival instead of ticking towards it
    fn idle_until(&self, processes: &[Process], now: u64) -> u64 {
        self.order
            .get(self.next)
            .and_then(|&index| processes.get(index))
            .map_or(now + 1, Process::arrival_time)
    }
}

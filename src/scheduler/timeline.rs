use super::{Process, Scheduler};
use crate::error::{Result, SchedError};
use log::{debug, trace};

/// One stretch of the Gantt chart. `pid` is `None` while the CPU idles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slice {
    pub pid: Option<u32>,
    pub start: u64,
    pub end: u64,
}

impl Slice {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_idle(&self) -> bool {
        self.pid.is_none()
    }
}

/// The simulated clock together with everything that happened on it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Timeline {
    clock: u64,
    slices: Vec<Slice>,
    completion_order: Vec<u32>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drives `scheduler` over `processes` until every process has completed.
    ///
    /// The processes must already be reset. Whenever the policy finds nothing to run
    /// the clock moves forward to `idle_until`, and always by at least one unit, so a
    /// run ends once the last arrival has been served.
    pub fn drive<S: Scheduler>(scheduler: &mut S, processes: &mut [Process]) -> Result<Self> {
        let mut timeline = Timeline::new();

        while !processes.iter().all(Process::is_complete) {
            let now = timeline.clock;
            match scheduler.select_next(processes, now) {
                Some(dispatch) => {
                    let count = processes.len();
                    let process = processes
                        .get_mut(dispatch.index)
                        .ok_or(SchedError::InvalidDispatch {
                            index: dispatch.index,
                            count,
                        })?;
                    let completed = process.execute(now, dispatch.span)?;
                    let pid = process.pid();
                    debug!(
                        "[{}] t={now}: P{pid} runs {} units, {} left",
                        S::NAME,
                        dispatch.span,
                        process.remaining_time()
                    );

                    timeline.record(Some(pid), now, now + dispatch.span);
                    if completed {
                        debug!(
                            "[{}] t={}: P{pid} completed, waited {}",
                            S::NAME,
                            timeline.clock,
                            process.waiting_time()
                        );
                        timeline.completion_order.push(pid);
                    }
                }
                None => {
                    let until = scheduler.idle_until(processes, now).max(now + 1);
                    trace!("[{}] t={now}: idle until {until}", S::NAME);
                    timeline.record(None, now, until);
                }
            }
        }

        Ok(timeline)
    }

    fn record(&mut self, pid: Option<u32>, start: u64, end: u64) {
        self.clock = end;

        // Consecutive idle ticks collapse into one gap
        if pid.is_none() {
            if let Some(last) = self.slices.last_mut() {
                if last.is_idle() && last.end == start {
                    last.end = end;
                    return;
                }
            }
        }
        self.slices.push(Slice { pid, start, end });
    }

    /// Time at which the last process completed.
    pub fn makespan(&self) -> u64 {
        self.clock
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn completion_order(&self) -> &[u32] {
        &self.completion_order
    }

    pub fn busy_time(&self) -> u64 {
        self.slices
            .iter()
            .filter(|slice| !slice.is_idle())
            .map(Slice::len)
            .sum()
    }

    pub fn idle_time(&self) -> u64 {
        self.makespan() - self.busy_time()
    }
}

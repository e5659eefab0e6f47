mod fcfs;
mod metrics;
mod priority;
mod process;
mod round_robin;
mod sjf;
mod timeline;

use crate::error::{Result, SchedError};
use log::info;
use std::{collections::HashSet, fmt};

pub use fcfs::FcfsScheduler;
pub use metrics::{average_turnaround_time, average_waiting_time, Metrics};
pub use priority::PriorityScheduler;
pub use process::Process;
pub use round_robin::RoundRobinScheduler;
pub use sjf::SjfScheduler;
pub use timeline::{Slice, Timeline};

pub const DEFAULT_QUANTUM: u64 = 4;

/// Which process runs next, by its position in the process slice, and for how long.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dispatch {
    pub index: usize,
    pub span: u64,
}

/// A selection policy consumed by [`Timeline::drive`].
pub trait Scheduler {
    const NAME: &'static str;

    /// Picks the next process to run at `now`, or `None` if the CPU should idle.
    fn select_next(&mut self, processes: &[Process], now: u64) -> Option<Dispatch>;

    /// How far the clock may jump when `select_next` found nothing to run.
    fn idle_until(&self, _processes: &[Process], now: u64) -> u64 {
        now + 1
    }
}

/// Picks the eligible process with the smallest key and runs it to completion.
/// Ties go to the smallest id.
fn run_to_completion_by<K, F>(processes: &[Process], now: u64, key: F) -> Option<Dispatch>
where
    K: Ord,
    F: Fn(&Process) -> K,
{
    processes
        .iter()
        .enumerate()
        .filter(|(_, process)| process.is_eligible(now))
        .min_by_key(|(_, process)| (key(process), process.pid()))
        .map(|(index, process)| Dispatch {
            index,
            span: process.remaining_time(),
        })
}

/// Earliest arrival after `now` among unfinished processes, so idle stretches are
/// skipped in one step. Falls back to a single tick.
fn next_arrival(processes: &[Process], now: u64) -> u64 {
    processes
        .iter()
        .filter(|process| !process.is_complete() && process.arrival_time() > now)
        .map(Process::arrival_time)
        .min()
        .unwrap_or(now + 1)
}

/// Indices of `processes` ordered by `key`, ties broken by id.
fn order_by<K, F>(processes: &[Process], key: F) -> Vec<usize>
where
    K: Ord,
    F: Fn(&Process) -> K,
{
    let mut order: Vec<usize> = (0..processes.len()).collect();
    order.sort_by_key(|&index| (key(&processes[index]), processes[index].pid()));
    order
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Policy {
    Fcfs,
    Sjf,
    RoundRobin { quantum: u64 },
    Priority,
}

impl Policy {
    /// Every policy, in the order they are usually compared.
    pub fn all(quantum: u64) -> [Policy; 4] {
        [
            Policy::Fcfs,
            Policy::Sjf,
            Policy::RoundRobin { quantum },
            Policy::Priority,
        ]
    }

    pub fn parse(name: &str, quantum: i64) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Policy::Fcfs),
            "sjf" => Ok(Policy::Sjf),
            "priority" => Ok(Policy::Priority),
            "rr" | "round-robin" => {
                if quantum <= 0 {
                    return Err(SchedError::NonPositiveQuantum(quantum));
                }
                Ok(Policy::RoundRobin {
                    quantum: quantum as u64,
                })
            }
            _ => Err(SchedError::UnknownPolicy(name.to_owned())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Policy::Fcfs => FcfsScheduler::NAME,
            Policy::Sjf => SjfScheduler::NAME,
            Policy::RoundRobin { .. } => RoundRobinScheduler::NAME,
            Policy::Priority => PriorityScheduler::NAME,
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::RoundRobin { quantum } => write!(f, "{} (quantum {quantum})", self.name()),
            _ => write!(f, "{}", self.name()),
        }
    }
}

/// Rejects process sets the engine must not run on.
pub fn validate(processes: &[Process]) -> Result<()> {
    if processes.is_empty() {
        return Err(SchedError::EmptyWorkload);
    }

    let mut seen = HashSet::with_capacity(processes.len());
    let mut horizon = processes
        .iter()
        .map(Process::arrival_time)
        .max()
        .unwrap_or(0);
    for process in processes {
        if !seen.insert(process.pid()) {
            return Err(SchedError::DuplicateId(process.pid()));
        }
        if process.burst_time() == 0 {
            return Err(SchedError::NonPositiveBurst {
                pid: process.pid(),
                burst: 0,
            });
        }
        // The clock can't pass the last arrival plus all the work
        horizon = horizon
            .checked_add(process.burst_time())
            .ok_or(SchedError::TimeOverflow)?;
    }
    Ok(())
}

/// The outcome of one policy run.
#[derive(Clone, Debug, PartialEq)]
pub struct Schedule {
    policy: Policy,
    processes: Vec<Process>,
    timeline: Timeline,
    metrics: Metrics,
}

impl Schedule {
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Completed processes, in input order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn process(&self, pid: u32) -> Option<&Process> {
        self.processes.iter().find(|process| process.pid() == pid)
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

/// Simulates `policy` over a freshly reset copy of `processes`.
pub fn run(policy: Policy, processes: &[Process]) -> Result<Schedule> {
    validate(processes)?;

    let mut processes = processes.to_vec();
    processes.iter_mut().for_each(Process::reset);

    let timeline = match policy {
        Policy::Fcfs => Timeline::drive(&mut FcfsScheduler::new(&processes), &mut processes)?,
        Policy::Sjf => Timeline::drive(&mut SjfScheduler, &mut processes)?,
        Policy::RoundRobin { quantum } => {
            if quantum == 0 {
                return Err(SchedError::NonPositiveQuantum(0));
            }
            Timeline::drive(
                &mut RoundRobinScheduler::new(&processes, quantum),
                &mut processes,
            )?
        }
        Policy::Priority => Timeline::drive(&mut PriorityScheduler, &mut processes)?,
    };

    let metrics = Metrics::from_run(&processes, &timeline)?;
    info!(
        "{policy}: {} processes done at t={}, average waiting time {:.2}",
        processes.len(),
        timeline.makespan(),
        metrics.average_waiting_time
    );

    Ok(Schedule {
        policy,
        processes,
        timeline,
        metrics,
    })
}

/// Runs every policy over independent copies of the same processes.
pub fn compare(policies: &[Policy], processes: &[Process]) -> Result<Vec<Schedule>> {
    policies
        .iter()
        .map(|&policy| run(policy, processes))
        .collect()
}

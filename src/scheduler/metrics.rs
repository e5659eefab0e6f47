use super::{Process, Timeline};
use crate::error::{Result, SchedError};

/// Aggregate figures for one completed run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Metrics {
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    pub max_waiting_time: u64,
    pub makespan: u64,
    pub busy_time: u64,
    /// Fraction of the makespan the CPU spent running a process.
    pub cpu_utilization: f64,
    /// Completed processes per time unit.
    pub throughput: f64,
}

impl Metrics {
    pub fn from_run(processes: &[Process], timeline: &Timeline) -> Result<Self> {
        let average_waiting_time = average_waiting_time(processes)?;
        let average_turnaround_time = average_turnaround_time(processes)?;

        let makespan = timeline.makespan();
        let busy_time = timeline.busy_time();
        let (cpu_utilization, throughput) = if makespan == 0 {
            (0.0, 0.0)
        } else {
            (
                busy_time as f64 / makespan as f64,
                processes.len() as f64 / makespan as f64,
            )
        };

        Ok(Self {
            average_waiting_time,
            average_turnaround_time,
            max_waiting_time: processes
                .iter()
                .map(Process::waiting_time)
                .max()
                .unwrap_or(0),
            makespan,
            busy_time,
            cpu_utilization,
            throughput,
        })
    }
}

fn average_of(processes: &[Process], value: fn(&Process) -> u64) -> Result<f64> {
    if processes.is_empty() {
        return Err(SchedError::EmptyWorkload);
    }
    // Per-process values fit the clock but their sum may not
    let total: u128 = processes.iter().map(|process| value(process) as u128).sum();
    Ok(total as f64 / processes.len() as f64)
}

pub fn average_waiting_time(processes: &[Process]) -> Result<f64> {
    average_of(processes, Process::waiting_time)
}

pub fn average_turnaround_time(processes: &[Process]) -> Result<f64> {
    average_of(processes, Process::turnaround_time)
}

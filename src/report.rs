use crate::scheduler::{Schedule, Slice};
use std::fmt;

/// Per-process table, Gantt chart and summary for a single run.
pub struct ScheduleReport<'a>(pub &'a Schedule);

/// One row per policy, for runs over the same processes.
pub struct ComparisonReport<'a>(pub &'a [Schedule]);

pub struct GanttChart<'a>(pub &'a [Slice]);

impl fmt::Display for GanttChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|")?;
        for slice in self.0 {
            match slice.pid {
                Some(pid) => write!(f, " P{pid} {}-{} |", slice.start, slice.end)?,
                None => write!(f, " idle {}-{} |", slice.start, slice.end)?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for ScheduleReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schedule = self.0;
        let metrics = schedule.metrics();

        writeln!(f, "== {} ==", schedule.policy())?;
        writeln!(
            f,
            "{:>5} {:>8} {:>6} {:>9} {:>11} {:>8} {:>11}",
            "PID", "Arrival", "Burst", "Priority", "Completion", "Waiting", "Turnaround"
        )?;
        for process in schedule.processes() {
            writeln!(
                f,
                "{:>5} {:>8} {:>6} {:>9} {:>11} {:>8} {:>11}",
                process.pid(),
                process.arrival_time(),
                process.burst_time(),
                process.priority(),
                process.completion_time().unwrap_or(0),
                process.waiting_time(),
                process.turnaround_time()
            )?;
        }

        writeln!(f, "Gantt: {}", GanttChart(schedule.timeline().slices()))?;
        writeln!(
            f,
            "Average waiting time: {:.2}",
            metrics.average_waiting_time
        )?;
        writeln!(
            f,
            "Average turnaround time: {:.2}",
            metrics.average_turnaround_time
        )?;
        writeln!(
            f,
            "Makespan: {}, CPU utilization: {:.2}%, throughput: {:.4}/unit",
            metrics.makespan,
            metrics.cpu_utilization * 100.0,
            metrics.throughput
        )
    }
}

impl fmt::Display for ComparisonReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<36} {:>12} {:>15} {:>9}",
            "Policy", "Avg waiting", "Avg turnaround", "Makespan"
        )?;
        for schedule in self.0 {
            let metrics = schedule.metrics();
            writeln!(
                f,
                "{:<36} {:>12.2} {:>15.2} {:>9}",
                schedule.policy().to_string(),
                metrics.average_waiting_time,
                metrics.average_turnaround_time,
                metrics.makespan
            )?;
        }
        Ok(())
    }
}

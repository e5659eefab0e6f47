use super::{next_arrival, run_to_completion_by, Dispatch, Process, Scheduler};

/// Non-preemptive shortest job first.
pub struct SjfScheduler;

impl Scheduler for SjfScheduler {
    const NAME: &'static str = "Shortest-Job-First";

    fn select_next(&mut self, processes: &[Process], now: u64) -> Option<Dispatch> {
        run_to_completion_by(processes, now, Process::burst_time)
    }

    fn idle_until(&self, processes: &[Process], now: u64) -> u64 {
        next_arrival(processes, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{run, Policy};

    #[test]
    fn test_sjf_picks_shortest_eligible() {
        let processes = [
            Process::new(1, 0, 7),
            Process::new(2, 2, 4),
            Process::new(3, 4, 1),
            Process::new(4, 5, 4),
        ];
        let schedule = run(Policy::Sjf, &processes).unwrap();

        // 1 runs 0-7, then 3 (shortest), then 2 and 4 tie on burst, 2 has the smaller id
        assert_eq!(schedule.timeline().completion_order(), &[1, 3, 2, 4]);
        assert_eq!(schedule.process(1).unwrap().waiting_time(), 0);
        assert_eq!(schedule.process(3).unwrap().waiting_time(), 3);
        assert_eq!(schedule.process(2).unwrap().waiting_time(), 6);
        assert_eq!(schedule.process(4).unwrap().waiting_time(), 7);
        assert!((schedule.metrics().average_waiting_time - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_sjf_tie_break_ignores_declaration_order() {
        let processes = [Process::new(5, 0, 3), Process::new(2, 0, 3)];
        let schedule = run(Policy::Sjf, &processes).unwrap();
        assert_eq!(schedule.timeline().completion_order(), &[2, 5]);
    }

    #[test]
    fn test_sjf_is_not_preempted_by_shorter_arrival() {
        let processes = [Process::new(1, 0, 6), Process::new(2, 1, 1)];
        let schedule = run(Policy::Sjf, &processes).unwrap();
        assert_eq!(schedule.timeline().slices().len(), 2);
        assert_eq!(schedule.process(2).unwrap().waiting_time(), 5);
    }

    #[test]
    fn test_sjf_idles_until_first_arrival() {
        let processes = [Process::new(1, 3, 2)];
        let schedule = run(Policy::Sjf, &processes).unwrap();
        let slices = schedule.timeline().slices();
        assert!(slices[0].is_idle());
        assert_eq!((slices[0].start, slices[0].end), (0, 3));
        assert_eq!(schedule.process(1).unwrap().waiting_time(), 0);
    }
}

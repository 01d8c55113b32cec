use tracing::debug;

use super::Scheduler;
use crate::{
    core::{ExecutionTrace, Process, ReadyQueue, SchedCore},
    error::Result,
};

/// Non-preemptive, arrival order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FcfsScheduler;

impl Scheduler for FcfsScheduler {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn simulate(&self, processes: Vec<Process>) -> Result<ExecutionTrace> {
        let mut core = SchedCore::new(processes)?;
        let mut queue: ReadyQueue = core.initial_ready().into_iter().collect();
        let mut running = queue.pop_front();

        while let Some(current) = running {
            let outcome = core.tick(current, queue.iter());
            queue.extend(outcome.arrivals);

            if outcome.finished {
                debug!(process = %core.process(current).name, tick = core.now() - 1, "finished");
                running = queue.pop_front();
            }
        }

        Ok(core.into_trace())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_order_when_all_arrive_together() {
        let trace = FcfsScheduler
            .simulate(vec![
                Process::new("A", 0, 3),
                Process::new("B", 0, 1),
                Process::new("C", 0, 2),
            ])
            .unwrap();
        assert_eq!(trace.sequence_string(), "AAABCC");
    }

    #[test]
    fn test_arrivals_join_the_tail() {
        let trace = FcfsScheduler
            .simulate(vec![
                Process::new("A", 0, 2),
                Process::new("B", 1, 3),
                Process::new("C", 1, 1),
                Process::new("D", 2, 1),
            ])
            .unwrap();
        assert_eq!(trace.sequence_string(), "AABBBCD");
        assert_eq!(trace.records()[2].ready_queue, vec!["C", "D"]);
    }

    #[test]
    fn test_starts_at_first_arrival() {
        let trace = FcfsScheduler
            .simulate(vec![Process::new("A", 4, 2), Process::new("B", 5, 1)])
            .unwrap();
        assert_eq!(trace.records()[0].tick, 4);
        assert_eq!(trace.sequence_string(), "AAB");
    }

    #[test]
    fn test_empty_input() {
        assert!(FcfsScheduler.simulate(Vec::new()).is_err());
    }
}

use tracing::debug;

use super::Scheduler;
use crate::{
    core::{ExecutionTrace, Process, ReadyQueue, SchedCore},
    error::Result,
};

/// Non-preemptive, shortest total work first. Ties keep arrival order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SjfScheduler;

impl Scheduler for SjfScheduler {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn simulate(&self, processes: Vec<Process>) -> Result<ExecutionTrace> {
        let mut core = SchedCore::new(processes)?;
        let mut queue: ReadyQueue = core.initial_ready().into_iter().collect();
        queue.sort_by_total_executions(core.processes());
        let mut running = queue.pop_front();

        while let Some(current) = running {
            let outcome = core.tick(current, queue.iter());
            queue.extend(outcome.arrivals);
            queue.sort_by_total_executions(core.processes());

            if outcome.finished {
                debug!(process = %core.process(current).name, tick = core.now() - 1, "finished");
                running = queue.pop_front();
            }
        }

        Ok(core.into_trace())
    }
}

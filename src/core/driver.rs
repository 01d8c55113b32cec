use tracing::trace;

use super::{
    activation,
    observer::Observer,
    state::{Process, ProcessId, SimCtx, Ticks},
    trace::ExecutionTrace,
};
use crate::error::Result;

#[derive(Debug)]
pub struct TickOutcome {
    // The process that just ran has no work left
    pub finished: bool,
    // Arrivals at the new current tick, in input order
    pub arrivals: Vec<ProcessId>,
}

// Policies own the ready queue; the core executes, logs and activates arrivals
pub struct SchedCore {
    pub ctx: SimCtx,
    observer: Observer,
}

impl SchedCore {
    pub fn new(processes: Vec<Process>) -> Result<Self> {
        Ok(Self {
            ctx: SimCtx::new(processes)?,
            observer: Observer::new(),
        })
    }

    pub fn initial_ready(&self) -> Vec<ProcessId> {
        activation::initial_ready_subset(&self.ctx.processes)
    }

    pub fn tick<'a>(
        &mut self,
        running: ProcessId,
        waiting: impl IntoIterator<Item = &'a ProcessId>,
    ) -> TickOutcome {
        let waiting: Vec<ProcessId> = waiting.into_iter().copied().collect();
        let now = self.ctx.now;

        let finished = self.ctx.execute(running);
        let names = activation::names_of(&self.ctx.processes, &waiting);
        self.ctx
            .trace
            .record(now, &self.ctx.processes[running], names);
        self.observer.observe(&self.ctx, running, &waiting);

        trace!(
            tick = now,
            running = %self.ctx.process(running).name,
            remaining = self.ctx.process(running).remaining_executions,
            queued = waiting.len(),
            "tick"
        );

        self.ctx.advance_time(1);
        let arrivals = self.ctx.activate_arrivals();

        TickOutcome { finished, arrivals }
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn process(&self, id: ProcessId) -> &Process {
        self.ctx.process(id)
    }

    pub fn process_mut(&mut self, id: ProcessId) -> &mut Process {
        self.ctx.process_mut(id)
    }

    pub fn processes(&self) -> &[Process] {
        &self.ctx.processes
    }

    pub fn into_trace(self) -> ExecutionTrace {
        debug_assert_eq!(self.observer.steps(), self.ctx.trace.len() as u64);
        debug_assert!(
            self.ctx.all_arrived(),
            "Simulation ended with processes still to arrive"
        );
        debug_assert!(
            self.ctx.processes.iter().all(Process::has_finished),
            "Simulation ended with unfinished processes"
        );
        self.ctx.trace
    }
}

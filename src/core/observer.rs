use super::state::{ProcessId, SimCtx};

// Debug builds only
#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &SimCtx, running: ProcessId, waiting: &[ProcessId]) {
        self.step += 1;

        let records = ctx.trace.records();
        debug_assert_eq!(
            records.len() as u64,
            self.step,
            "Trace must hold exactly one record per tick"
        );
        if let [.., prev, last] = records {
            debug_assert_eq!(
                prev.tick + 1,
                last.tick,
                "Trace ticks must advance by exactly one"
            );
        }

        let process = ctx.process(running);
        debug_assert!(
            process.remaining_executions < process.total_executions,
            "Running process {} did no work",
            process.name
        );
        debug_assert!(
            process.arrival_time <= ctx.now,
            "Process {} ran before arriving",
            process.name
        );

        for (i, &id) in waiting.iter().enumerate() {
            let queued = ctx.process(id);
            debug_assert_ne!(
                id, running,
                "Running process {} must not appear in the ready queue",
                queued.name
            );
            debug_assert!(
                !queued.has_finished(),
                "Finished process {} still queued",
                queued.name
            );
            debug_assert!(
                !waiting[..i].contains(&id),
                "Process {} queued twice",
                queued.name
            );
        }
    }
}

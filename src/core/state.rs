use rustc_hash::FxHashSet;
use serde::Serialize;

use super::{activation, trace::ExecutionTrace};
use crate::error::{Result, SchedError};

// Index into the process Vec
pub type ProcessId = usize;
pub type Ticks = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Process {
    pub name: String,
    pub arrival_time: Ticks,
    pub total_executions: Ticks,
    pub remaining_executions: Ticks,
    // Ticks run without interruption since the last queue re-entry
    pub consecutive_executions: Ticks,
    pub finish_time: Option<Ticks>,
}

impl Process {
    pub fn new(name: impl Into<String>, arrival_time: Ticks, total_executions: Ticks) -> Self {
        Self {
            name: name.into(),
            arrival_time,
            total_executions,
            remaining_executions: total_executions,
            consecutive_executions: 0,
            finish_time: None,
        }
    }

    // No-op once finished
    pub fn execute(&mut self) {
        if self.has_finished() {
            return;
        }
        self.remaining_executions -= 1;
        self.consecutive_executions += 1;
    }

    pub fn has_finished(&self) -> bool {
        self.remaining_executions == 0
    }
}

// Process arena, not-yet-arrived set, clock and the trace being built
#[derive(Debug)]
pub struct SimCtx {
    pub now: Ticks,
    pub processes: Vec<Process>,
    pub sleeping: Vec<ProcessId>,
    pub trace: ExecutionTrace,
}

impl SimCtx {
    pub fn new(processes: Vec<Process>) -> Result<Self> {
        validate(&processes)?;

        let ready = activation::initial_ready_subset(&processes);
        let now = processes[ready[0]].arrival_time;
        let sleeping = (0..processes.len())
            .filter(|id| !ready.contains(id))
            .collect();

        Ok(Self {
            now,
            processes,
            sleeping,
            trace: ExecutionTrace::new(),
        })
    }

    pub fn process(&self, id: ProcessId) -> &Process {
        &self.processes[id]
    }

    pub fn process_mut(&mut self, id: ProcessId) -> &mut Process {
        &mut self.processes[id]
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    // Returns true if the process finished on this tick
    pub fn execute(&mut self, id: ProcessId) -> bool {
        let now = self.now;
        let process = self.process_mut(id);
        process.execute();
        if process.has_finished() && process.finish_time.is_none() {
            process.finish_time = Some(now);
        }
        process.has_finished()
    }

    pub fn activate_arrivals(&mut self) -> Vec<ProcessId> {
        let sleeping = std::mem::take(&mut self.sleeping);
        let (arrived, sleeping) = activation::activate_at(self.now, &self.processes, sleeping);
        self.sleeping = sleeping;
        arrived
    }

    pub fn all_arrived(&self) -> bool {
        self.sleeping.is_empty()
    }
}

fn validate(processes: &[Process]) -> Result<()> {
    if processes.is_empty() {
        return Err(SchedError::invalid("empty process set"));
    }

    let mut names = FxHashSet::default();
    for process in processes {
        if !names.insert(process.name.as_str()) {
            return Err(SchedError::invalid(format!(
                "duplicate process name {}",
                process.name
            )));
        }
        if process.total_executions == 0 {
            return Err(SchedError::invalid(format!(
                "process {} has no work",
                process.name
            )));
        }
        if process.remaining_executions != process.total_executions {
            return Err(SchedError::invalid(format!(
                "process {} has already run",
                process.name
            )));
        }
        if process.consecutive_executions != 0 {
            return Err(SchedError::invalid(format!(
                "process {} has a running streak before its first tick",
                process.name
            )));
        }
        if let Some(finish_time) = process.finish_time {
            return Err(SchedError::invalid(format!(
                "process {} already finished at tick {finish_time}",
                process.name
            )));
        }
    }

    // No idle CPU: each arrival must come before earlier work drains. All
    // policies are work-conserving so the busy period is order-independent.
    let mut by_arrival: Vec<&Process> = processes.iter().collect();
    by_arrival.sort_by_key(|p| p.arrival_time);
    let mut busy_until = by_arrival[0].arrival_time;
    for process in by_arrival {
        if process.arrival_time > busy_until {
            return Err(SchedError::invalid(format!(
                "CPU idle from tick {busy_until} until {} arrives at tick {}",
                process.name, process.arrival_time
            )));
        }
        busy_until = busy_until
            .checked_add(process.total_executions)
            .ok_or_else(|| {
                SchedError::invalid(format!(
                    "total work overflows the clock at process {}",
                    process.name
                ))
            })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_counts_down() {
        let mut p = Process::new("A", 0, 2);
        p.execute();
        assert_eq!(p.remaining_executions, 1);
        assert_eq!(p.consecutive_executions, 1);
        assert!(!p.has_finished());
        p.execute();
        assert!(p.has_finished());
    }

    #[test]
    fn test_execute_after_finish_is_noop() {
        let mut p = Process::new("A", 0, 1);
        p.execute();
        let finished = p.clone();
        p.execute();
        assert_eq!(p, finished);
        assert_eq!(p.remaining_executions, 0);
    }

    #[test]
    fn test_ctx_starts_at_earliest_arrival() {
        let ctx = SimCtx::new(vec![
            Process::new("A", 3, 2),
            Process::new("B", 2, 1),
            Process::new("C", 2, 4),
        ])
        .unwrap();
        assert_eq!(ctx.now, 2);
        assert_eq!(ctx.sleeping, vec![0]);
    }

    #[test]
    fn test_ctx_sets_finish_time() {
        let mut ctx = SimCtx::new(vec![Process::new("A", 0, 1)]).unwrap();
        assert!(ctx.execute(0));
        assert_eq!(ctx.process(0).finish_time, Some(0));
    }

    #[test]
    fn test_rejects_empty() {
        let err = SimCtx::new(Vec::new()).unwrap_err();
        assert!(matches!(err, SchedError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let err = SimCtx::new(vec![Process::new("A", 0, 1), Process::new("A", 1, 1)]).unwrap_err();
        assert_eq!(err, SchedError::invalid("duplicate process name A"));
    }

    #[test]
    fn test_rejects_zero_work() {
        let err = SimCtx::new(vec![Process::new("A", 0, 0)]).unwrap_err();
        assert!(matches!(err, SchedError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_idle_gap() {
        let err = SimCtx::new(vec![Process::new("A", 0, 2), Process::new("B", 3, 1)]).unwrap_err();
        assert!(matches!(err, SchedError::InvalidInput(_)));

        // Arriving exactly when the CPU frees up is fine
        assert!(SimCtx::new(vec![Process::new("A", 0, 2), Process::new("B", 2, 1)]).is_ok());
    }

    #[test]
    fn test_rejects_preset_consecutive_executions() {
        let mut a = Process::new("A", 0, 4);
        a.consecutive_executions = 5;
        let err = SimCtx::new(vec![a, Process::new("B", 0, 4)]).unwrap_err();
        assert!(matches!(err, SchedError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_preset_finish_time() {
        let mut a = Process::new("A", 0, 2);
        a.finish_time = Some(99);
        let err = SimCtx::new(vec![a]).unwrap_err();
        assert_eq!(err, SchedError::invalid("process A already finished at tick 99"));
    }

    #[test]
    fn test_rejects_work_overflow() {
        let err = SimCtx::new(vec![Process::new("A", 0, u64::MAX), Process::new("B", 0, 1)])
            .unwrap_err();
        assert!(matches!(err, SchedError::InvalidInput(_)));
    }
}

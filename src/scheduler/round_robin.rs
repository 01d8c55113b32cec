use tracing::debug;

use super::Scheduler;
use crate::{
    core::{ExecutionTrace, Process, ReadyQueue, SchedCore, Ticks},
    error::{Result, SchedError},
};

/// Where a process whose slice expired goes relative to processes arriving
/// on the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequeueMode {
    /// `[.., preempted, arrivals..]`
    #[default]
    IncumbentFirst,
    /// `[.., arrivals.., preempted]`
    ArrivalsFirst,
}

impl RequeueMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::IncumbentFirst => Self::ArrivalsFirst,
            Self::ArrivalsFirst => Self::IncumbentFirst,
        }
    }
}

// Sorted, consumed through a cursor
#[derive(Debug)]
struct ToggleSchedule {
    ticks: Vec<Ticks>,
    cursor: usize,
}

impl ToggleSchedule {
    fn new(ticks: &[Ticks]) -> Self {
        let mut ticks = ticks.to_vec();
        ticks.sort_unstable();
        ticks.dedup();
        Self { ticks, cursor: 0 }
    }

    fn fire(&mut self, now: Ticks) -> bool {
        while self.ticks.get(self.cursor).is_some_and(|&t| t < now) {
            self.cursor += 1;
        }
        if self.ticks.get(self.cursor) == Some(&now) {
            self.cursor += 1;
            return true;
        }
        false
    }
}

#[derive(Debug, Clone)]
pub struct RoundRobinScheduler {
    time_slice: Ticks,
    initial_mode: RequeueMode,
    mode_toggle_ticks: Vec<Ticks>,
}

impl RoundRobinScheduler {
    pub fn new(time_slice: Ticks) -> Self {
        Self {
            time_slice,
            initial_mode: RequeueMode::default(),
            mode_toggle_ticks: Vec::new(),
        }
    }

    pub fn with_mode(mut self, mode: RequeueMode) -> Self {
        self.initial_mode = mode;
        self
    }

    /// Ticks at which the requeue mode flips. A toggle on tick `t` applies
    /// to the requeue decision made when the clock reaches `t`.
    pub fn with_mode_toggles(mut self, ticks: impl IntoIterator<Item = Ticks>) -> Self {
        self.mode_toggle_ticks = ticks.into_iter().collect();
        self
    }

    pub fn time_slice(&self) -> Ticks {
        self.time_slice
    }
}

impl Scheduler for RoundRobinScheduler {
    fn name(&self) -> &'static str {
        "Round Robin"
    }

    fn simulate(&self, processes: Vec<Process>) -> Result<ExecutionTrace> {
        if self.time_slice == 0 {
            return Err(SchedError::invalid("time slice must be positive"));
        }

        let mut core = SchedCore::new(processes)?;
        // Running process stays at the front while it runs
        let mut queue: ReadyQueue = core.initial_ready().into_iter().collect();
        let mut toggles = ToggleSchedule::new(&self.mode_toggle_ticks);
        let mut mode = self.initial_mode;

        while let Some(running) = queue.front() {
            let outcome = core.tick(running, queue.iter().skip(1));
            debug_assert!(core.process(running).consecutive_executions <= self.time_slice);

            if toggles.fire(core.now()) {
                mode = mode.toggled();
                debug!(tick = core.now(), ?mode, "requeue mode toggled");
            }

            if outcome.finished {
                debug!(process = %core.process(running).name, tick = core.now() - 1, "finished");
                queue.pop_front();
                queue.extend(outcome.arrivals);
            } else if core.process(running).consecutive_executions == self.time_slice {
                core.process_mut(running).consecutive_executions = 0;
                queue.pop_front();
                match mode {
                    RequeueMode::IncumbentFirst => {
                        queue.push_back(running);
                        queue.extend(outcome.arrivals);
                    }
                    RequeueMode::ArrivalsFirst => {
                        queue.extend(outcome.arrivals);
                        queue.push_back(running);
                    }
                }
            } else {
                queue.extend(outcome.arrivals);
            }
        }

        Ok(core.into_trace())
    }
}

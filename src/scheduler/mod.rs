pub mod fcfs;
pub mod round_robin;
pub mod sjf;
pub mod srtn;

use crate::{
    core::{ExecutionTrace, Process, Ticks},
    error::Result,
};
pub use fcfs::FcfsScheduler;
pub use round_robin::{RequeueMode, RoundRobinScheduler};
pub use sjf::SjfScheduler;
pub use srtn::SrtnScheduler;

/// A scheduling policy. Each call runs one complete, independent simulation
/// over freshly created processes.
pub trait Scheduler {
    fn name(&self) -> &'static str;

    fn simulate(&self, processes: Vec<Process>) -> Result<ExecutionTrace>;
}

pub fn round_robin(
    processes: Vec<Process>,
    time_slice: Ticks,
    initial_mode: RequeueMode,
    mode_toggle_ticks: &[Ticks],
) -> Result<ExecutionTrace> {
    RoundRobinScheduler::new(time_slice)
        .with_mode(initial_mode)
        .with_mode_toggles(mode_toggle_ticks.iter().copied())
        .simulate(processes)
}

pub fn first_come_first_served(processes: Vec<Process>) -> Result<ExecutionTrace> {
    FcfsScheduler.simulate(processes)
}

pub fn shortest_job_first(processes: Vec<Process>) -> Result<ExecutionTrace> {
    SjfScheduler.simulate(processes)
}

pub fn shortest_remaining_time_next(processes: Vec<Process>) -> Result<ExecutionTrace> {
    SrtnScheduler.simulate(processes)
}

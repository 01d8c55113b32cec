use clap::ValueEnum;

use crate::{
    core::Ticks,
    scheduler::{
        FcfsScheduler, RequeueMode, RoundRobinScheduler, Scheduler, SjfScheduler, SrtnScheduler,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    RoundRobin,
    Fcfs,
    Sjf,
    Srtn,
}

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub algorithm: Algorithm,
    // Round Robin only
    pub time_slice: Ticks,
    pub initial_mode: RequeueMode,
    pub mode_toggle_ticks: Vec<Ticks>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::RoundRobin,
            time_slice: 2,
            initial_mode: RequeueMode::IncumbentFirst,
            mode_toggle_ticks: Vec::new(),
        }
    }
}

impl SimConfig {
    pub fn scheduler(&self) -> Box<dyn Scheduler> {
        match self.algorithm {
            Algorithm::RoundRobin => Box::new(
                RoundRobinScheduler::new(self.time_slice)
                    .with_mode(self.initial_mode)
                    .with_mode_toggles(self.mode_toggle_ticks.iter().copied()),
            ),
            Algorithm::Fcfs => Box::new(FcfsScheduler),
            Algorithm::Sjf => Box::new(SjfScheduler),
            Algorithm::Srtn => Box::new(SrtnScheduler),
        }
    }
}

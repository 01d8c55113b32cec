pub mod core;
pub mod error;
pub mod metrics;
pub mod scheduler;
pub mod sim;

pub use crate::core::{ExecutionInterval, ExecutionRecord, ExecutionTrace, Process};
pub use error::{Result, SchedError};
pub use scheduler::Scheduler;
pub use sim::{Job, Sim, Workload};

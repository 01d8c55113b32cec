pub mod activation;
pub mod driver;
pub mod observer;
pub mod queue;
pub mod state;
pub mod trace;

pub use driver::{SchedCore, TickOutcome};
pub use queue::ReadyQueue;
pub use state::{Process, ProcessId, SimCtx, Ticks};
pub use trace::{ExecutionInterval, ExecutionRecord, ExecutionTrace};

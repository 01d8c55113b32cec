pub mod config;
pub mod driver;
pub mod job;

pub use config::{Algorithm, SimConfig};
pub use driver::{Sim, SimReport};
pub use job::{Job, Workload, WorkloadParams, generate_workload};

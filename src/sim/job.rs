use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{Process, Ticks};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub name: String,
    pub arrival_time: Ticks,
    pub total_executions: Ticks,
}

impl Job {
    pub fn to_process(&self) -> Process {
        Process::new(self.name.clone(), self.arrival_time, self.total_executions)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    pub processes: Vec<Job>,
}

impl Workload {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    // Each simulation mutates its own copy
    pub fn to_processes(&self) -> Vec<Process> {
        self.processes.iter().map(Job::to_process).collect()
    }
}

/// Parameters for a Bernoulli arrival process over a fixed horizon
#[derive(Debug, Clone, Copy)]
pub struct WorkloadParams {
    pub ticks: Ticks,
    pub p_arrival: f64,
    pub p_short: f64,
    pub short_ticks: Ticks,
    pub long_ticks: Ticks,
}

impl Default for WorkloadParams {
    fn default() -> Self {
        Self {
            ticks: 20,
            p_arrival: 0.3,
            p_short: 0.3,
            short_ticks: 2,
            long_ticks: 6,
        }
    }
}

/// Each tick a job arrives with probability `p_arrival`. A job is forced
/// whenever the earlier work has drained, so the CPU never idles.
pub fn generate_workload(params: WorkloadParams, seed: u64) -> Workload {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut processes = Vec::new();
    let mut busy_until: Ticks = 0;

    for t in 0..params.ticks.max(1) {
        if t >= busy_until || rng.random::<f64>() < params.p_arrival {
            let total_executions = if rng.random::<f64>() < params.p_short {
                params.short_ticks
            } else {
                params.long_ticks
            }
            .max(1);

            busy_until = busy_until.max(t).saturating_add(total_executions);
            processes.push(Job {
                name: format!("P{}", processes.len()),
                arrival_time: t,
                total_executions,
            });
        }
    }

    Workload { processes }
}

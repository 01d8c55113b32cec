use serde::Serialize;
use tracing::info;

use super::{config::SimConfig, job::Workload};
use crate::{
    core::{ExecutionInterval, ExecutionTrace},
    error::Result,
    metrics::MetricsReport,
};

#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub algorithm: &'static str,
    pub trace: ExecutionTrace,
    pub intervals: Vec<ExecutionInterval>,
    pub metrics: MetricsReport,
}

pub struct Sim {
    config: SimConfig,
}

impl Sim {
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, workload: &Workload) -> Result<SimReport> {
        let scheduler = self.config.scheduler();
        let trace = scheduler.simulate(workload.to_processes())?;
        let intervals = trace.intervals()?;
        let metrics = MetricsReport::from_trace(&trace)?;

        info!(
            algorithm = scheduler.name(),
            processes = workload.processes.len(),
            ticks = trace.len(),
            switches = intervals.len().saturating_sub(1),
            avg_wait = metrics.wait_time.average,
            avg_return = metrics.return_time.average,
            "simulation complete"
        );

        Ok(SimReport {
            algorithm: scheduler.name(),
            trace,
            intervals,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Algorithm, Job};

    fn workload() -> Workload {
        Workload {
            processes: vec![
                Job {
                    name: "A".into(),
                    arrival_time: 0,
                    total_executions: 5,
                },
                Job {
                    name: "B".into(),
                    arrival_time: 1,
                    total_executions: 1,
                },
            ],
        }
    }

    #[test]
    fn test_run_each_algorithm() {
        let expected = [
            (Algorithm::RoundRobin, "AABAAA"),
            (Algorithm::Fcfs, "AAAAAB"),
            (Algorithm::Sjf, "AAAAAB"),
            (Algorithm::Srtn, "ABAAAA"),
        ];
        for (algorithm, sequence) in expected {
            let sim = Sim::new(SimConfig {
                algorithm,
                ..SimConfig::default()
            });
            let report = sim.run(&workload()).unwrap();
            assert_eq!(report.trace.sequence_string(), sequence, "{algorithm:?}");
        }
    }

    #[test]
    fn test_workload_reusable_across_runs() {
        let workload = workload();
        let sim = Sim::new(SimConfig::default());
        let first = sim.run(&workload).unwrap();
        let second = sim.run(&workload).unwrap();
        assert_eq!(first.trace.records(), second.trace.records());
        assert_eq!(first.metrics, second.metrics);
    }

    #[test]
    fn test_report_serializes() {
        let report = Sim::new(SimConfig::default()).run(&workload()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["algorithm"], "Round Robin");
        assert_eq!(json["trace"]["records"].as_array().unwrap().len(), 6);
        assert_eq!(json["intervals"][0]["process_name"], "A");
    }

    #[test]
    fn test_invalid_config_surfaces() {
        let sim = Sim::new(SimConfig {
            time_slice: 0,
            ..SimConfig::default()
        });
        assert!(sim.run(&workload()).is_err());
    }
}

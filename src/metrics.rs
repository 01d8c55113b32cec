use average::{Estimate, Mean};
use serde::Serialize;

use crate::{
    core::{ExecutionTrace, Process, Ticks},
    error::{Result, SchedError},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSummary {
    pub per_process: Vec<(String, Ticks)>,
    pub average: f64,
}

impl MetricSummary {
    pub fn get(&self, name: &str) -> Option<Ticks> {
        self.per_process
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }
}

// Inclusive of the finishing tick
pub fn return_time(trace: &ExecutionTrace) -> Result<MetricSummary> {
    summarize(trace, |p| {
        let last = last_finishing_tick(trace, p)?;
        elapsed(p, last).map(|t| t + 1)
    })
}

pub fn wait_time(trace: &ExecutionTrace) -> Result<MetricSummary> {
    summarize(trace, |p| {
        let first = trace
            .first_tick_of(&p.name)
            .ok_or_else(|| never_traced(&p.name))?;
        elapsed(p, first)
    })
}

pub fn wait_time_excluding_burst(trace: &ExecutionTrace) -> Result<MetricSummary> {
    summarize(trace, |p| {
        let last = last_finishing_tick(trace, p)?;
        let turnaround = elapsed(p, last)? + 1;
        turnaround.checked_sub(p.total_executions).ok_or_else(|| {
            SchedError::malformed(format!(
                "process {} finished in less time than its burst",
                p.name
            ))
        })
    })
}

// Batch systems report turnaround as the wait
pub fn batch_wait_time(trace: &ExecutionTrace) -> Result<MetricSummary> {
    return_time(trace)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub return_time: MetricSummary,
    pub wait_time: MetricSummary,
    pub wait_time_excluding_burst: MetricSummary,
}

impl MetricsReport {
    pub fn from_trace(trace: &ExecutionTrace) -> Result<Self> {
        Ok(Self {
            return_time: return_time(trace)?,
            wait_time: wait_time(trace)?,
            wait_time_excluding_burst: wait_time_excluding_burst(trace)?,
        })
    }
}

fn summarize(
    trace: &ExecutionTrace,
    metric: impl Fn(&Process) -> Result<Ticks>,
) -> Result<MetricSummary> {
    let processes = trace.processes();
    if processes.is_empty() {
        return Err(SchedError::invalid("no processes to compute metrics over"));
    }

    let per_process = processes
        .iter()
        .map(|p| Ok((p.name.clone(), metric(p)?)))
        .collect::<Result<Vec<_>>>()?;
    let mean: Mean = per_process.iter().map(|(_, v)| *v as f64).collect();

    Ok(MetricSummary {
        per_process,
        average: mean.estimate(),
    })
}

fn last_finishing_tick(trace: &ExecutionTrace, p: &Process) -> Result<Ticks> {
    trace
        .last_finishing_tick_of(&p.name)
        .ok_or_else(|| never_traced(&p.name))
}

fn elapsed(p: &Process, tick: Ticks) -> Result<Ticks> {
    tick.checked_sub(p.arrival_time).ok_or_else(|| {
        SchedError::malformed(format!(
            "process {} ran at tick {tick} before arriving at {}",
            p.name, p.arrival_time
        ))
    })
}

// A simulated process missing from its own trace is an engine bug
fn never_traced(name: &str) -> SchedError {
    SchedError::invalid(SchedError::not_found(name).to_string())
}

use std::fmt;

use rustc_hash::FxHashMap;
use serde::Serialize;

use super::state::{Process, Ticks};
use crate::error::{Result, SchedError};

// Copies, so later process changes do not rewrite history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionRecord {
    pub tick: Ticks,
    pub running: String,
    // After this tick ran
    pub remaining_executions: Ticks,
    // Excludes the running process
    pub ready_queue: Vec<String>,
}

// Both ends inclusive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionInterval {
    pub process_name: String,
    pub start_tick: Ticks,
    pub end_tick: Ticks,
}

impl ExecutionInterval {
    pub fn len(&self) -> Ticks {
        self.end_tick - self.start_tick + 1
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExecutionTrace {
    records: Vec<ExecutionRecord>,
    // Latest observed state per process, in first-seen order
    processes: Vec<Process>,
    #[serde(skip)]
    process_index: FxHashMap<String, usize>,
}

impl ExecutionTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, tick: Ticks, process: &Process, ready_queue: Vec<String>) {
        let out_of_order = self.records.last().is_some_and(|last| last.tick > tick);

        self.records.push(ExecutionRecord {
            tick,
            running: process.name.clone(),
            remaining_executions: process.remaining_executions,
            ready_queue,
        });
        self.update_process(tick, process);

        if out_of_order {
            self.records.sort_by_key(|r| r.tick);
        }
    }

    fn update_process(&mut self, tick: Ticks, process: &Process) {
        let mut snapshot = process.clone();
        if snapshot.has_finished() && snapshot.finish_time.is_none() {
            snapshot.finish_time = Some(tick);
        }

        match self.process_index.get(&snapshot.name) {
            Some(&index) => self.processes[index] = snapshot,
            None => {
                self.process_index
                    .insert(snapshot.name.clone(), self.processes.len());
                self.processes.push(snapshot);
            }
        }
    }

    pub fn intervals(&self) -> Result<Vec<ExecutionInterval>> {
        let (first, rest) = self
            .records
            .split_first()
            .ok_or_else(|| SchedError::malformed("no intervals in an empty trace"))?;

        let mut intervals = Vec::new();
        let mut current = ExecutionInterval {
            process_name: first.running.clone(),
            start_tick: first.tick,
            end_tick: first.tick,
        };

        for record in rest {
            if record.running != current.process_name {
                current.end_tick = record.tick.saturating_sub(1);
                let next = ExecutionInterval {
                    process_name: record.running.clone(),
                    start_tick: record.tick,
                    end_tick: record.tick,
                };
                intervals.push(std::mem::replace(&mut current, next));
            }
        }

        current.end_tick = rest.last().unwrap_or(first).tick;
        intervals.push(current);

        Ok(intervals)
    }

    pub fn render(&self, show_remaining: bool) -> String {
        self.records
            .iter()
            .map(|r| {
                let running = if show_remaining {
                    format!(
                        "{} ({} remaining executions)",
                        r.running, r.remaining_executions
                    )
                } else {
                    r.running.clone()
                };
                format!(
                    "time: {}\trunning: {}\tqueue: [{}]",
                    r.tick,
                    running,
                    r.ready_queue.join(", ")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn sequence_string(&self) -> String {
        self.records.iter().map(|r| r.running.as_str()).collect()
    }

    pub fn first_tick_of(&self, name: &str) -> Option<Ticks> {
        self.records
            .iter()
            .find(|r| r.running == name)
            .map(|r| r.tick)
    }

    pub fn last_finishing_tick_of(&self, name: &str) -> Option<Ticks> {
        self.records
            .iter()
            .rev()
            .find(|r| r.running == name && r.remaining_executions == 0)
            .map(|r| r.tick)
    }

    pub fn records(&self) -> &[ExecutionRecord] {
        &self.records
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn process(&self, name: &str) -> Option<&Process> {
        self.process_index.get(name).map(|&i| &self.processes[i])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl fmt::Display for ExecutionTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

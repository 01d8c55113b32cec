use super::state::{Process, ProcessId, Ticks};

pub fn initial_ready_subset(processes: &[Process]) -> Vec<ProcessId> {
    let Some(first) = processes.iter().map(|p| p.arrival_time).min() else {
        return Vec::new();
    };
    processes
        .iter()
        .enumerate()
        .filter(|(_, p)| p.arrival_time == first)
        .map(|(id, _)| id)
        .collect()
}

// (arriving at `tick`, still to come), both in sleeping order
pub fn activate_at(
    tick: Ticks,
    processes: &[Process],
    sleeping: Vec<ProcessId>,
) -> (Vec<ProcessId>, Vec<ProcessId>) {
    sleeping
        .into_iter()
        .partition(|&id| processes[id].arrival_time == tick)
}

pub fn sort_by_total_executions(processes: &[Process], ids: &mut [ProcessId]) {
    ids.sort_by_key(|&id| processes[id].total_executions);
}

pub fn sort_by_remaining_executions(processes: &[Process], ids: &mut [ProcessId]) {
    ids.sort_by_key(|&id| processes[id].remaining_executions);
}

pub fn names_of<'a>(
    processes: &[Process],
    ids: impl IntoIterator<Item = &'a ProcessId>,
) -> Vec<String> {
    ids.into_iter()
        .map(|&id| processes[id].name.clone())
        .collect()
}

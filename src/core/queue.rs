use std::collections::VecDeque;

use super::{
    activation,
    state::{Process, ProcessId},
};

// Front is dispatched next
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReadyQueue {
    ids: VecDeque<ProcessId>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, id: ProcessId) {
        debug_assert!(!self.contains(id), "Process {id} already queued");
        self.ids.push_back(id);
    }

    pub fn push_front(&mut self, id: ProcessId) {
        debug_assert!(!self.contains(id), "Process {id} already queued");
        self.ids.push_front(id);
    }

    pub fn pop_front(&mut self) -> Option<ProcessId> {
        self.ids.pop_front()
    }

    pub fn front(&self) -> Option<ProcessId> {
        self.ids.front().copied()
    }

    pub fn contains(&self, id: ProcessId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProcessId> {
        self.ids.iter()
    }

    // Stable: equal keys keep their queue order
    pub fn sort_by_total_executions(&mut self, processes: &[Process]) {
        activation::sort_by_total_executions(processes, self.ids.make_contiguous());
    }

    pub fn sort_by_remaining_executions(&mut self, processes: &[Process]) {
        activation::sort_by_remaining_executions(processes, self.ids.make_contiguous());
    }
}

impl Extend<ProcessId> for ReadyQueue {
    fn extend<I: IntoIterator<Item = ProcessId>>(&mut self, iter: I) {
        for id in iter {
            self.push_back(id);
        }
    }
}

impl FromIterator<ProcessId> for ReadyQueue {
    fn from_iter<I: IntoIterator<Item = ProcessId>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

// Snapshot management for stepping backward and forward through a replay

use crate::interpreter::engine::{apply_step_traced, replay, StepOutcome};
use crate::interpreter::errors::HistoryError;
use crate::memory::{heap::Heap, stack::Stack, Address};
use crate::parser::ast::Step;
use serde::Serialize;
use std::borrow::Cow;
use tracing::{debug, warn};

/// Memory state after replaying a prefix of the steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorySnapshot {
    pub stack: Stack,
    pub heap: Heap,
    pub address_counter: u64, // Next address to mint; only ever grows
    #[serde(rename = "lastTouchedAddress")]
    pub last_touched: Option<Address>, // Highlight only
}

impl MemorySnapshot {
    /// The state before any step has run
    pub fn empty() -> Self {
        Self::default()
    }

    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        // This is a rough estimate
        // Stack: name bytes plus slot and bookkeeping overhead
        let stack_size: usize = self.stack.iter().map(|(name, _)| 2 * name.len() + 48).sum();

        // Heap: one map entry per node
        let heap_size = self.heap.len() * 48;

        stack_size + heap_size + std::mem::size_of::<Self>()
    }
}

/// Bounded store of snapshots
#[derive(Debug)]
pub struct SnapshotCache {
    snapshots: Vec<MemorySnapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotCache {
    pub fn new(max_memory: usize) -> Self {
        SnapshotCache {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to the cache
    pub fn push(&mut self, snapshot: MemorySnapshot) -> Result<(), HistoryError> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            return Err(HistoryError::SnapshotLimitExceeded {
                current: self.current_memory,
                requested: snapshot_size,
                limit: self.max_memory,
            });
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&MemorySnapshot> {
        self.snapshots.get(index)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Get current memory usage
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    /// Get max memory limit
    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}

/// Navigable replay history
///
/// Position 0 is the empty snapshot; position `i` is the state after
/// `steps[i - 1]`. Snapshots are recorded up front until the cache limit is
/// hit; later positions are rebuilt with [`replay`] on demand.
#[derive(Debug)]
pub struct Timeline {
    steps: Vec<Step>,
    outcomes: Vec<StepOutcome>,
    cache: SnapshotCache,
    position: usize,
}

impl Timeline {
    /// Record the replay of `steps`, caching at most `snapshot_limit` bytes
    pub fn new(steps: Vec<Step>, snapshot_limit: usize) -> Self {
        let mut cache = SnapshotCache::new(snapshot_limit);
        let mut outcomes = Vec::with_capacity(steps.len());
        let mut caching = cache.push(MemorySnapshot::empty()).is_ok();
        let mut state = MemorySnapshot::empty();

        for step in &steps {
            let (next, outcome) = apply_step_traced(&state, step);
            outcomes.push(outcome);
            if caching {
                if let Err(e) = cache.push(next.clone()) {
                    warn!(error = %e, cached = cache.len(), "snapshot cache full, replaying on demand");
                    caching = false;
                }
            }
            state = next;
        }

        debug!(
            steps = steps.len(),
            cached = cache.len(),
            bytes = cache.memory_usage(),
            limit = cache.memory_limit(),
            "timeline recorded"
        );

        Timeline {
            steps,
            outcomes,
            cache,
            position: 0,
        }
    }

    /// Number of positions (steps + 1)
    pub fn len(&self) -> usize {
        self.steps.len() + 1
    }

    /// Always false: the empty snapshot is a position
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_at_start(&self) -> bool {
        self.position == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.position == self.steps.len()
    }

    /// Snapshots held in the cache
    #[cfg(test)]
    pub(crate) fn cached_positions(&self) -> usize {
        self.cache.len()
    }

    /// The snapshot at an arbitrary position
    #[cfg(test)]
    pub(crate) fn snapshot_at(
        &self,
        position: usize,
    ) -> Result<Cow<'_, MemorySnapshot>, HistoryError> {
        if position >= self.len() {
            return Err(HistoryError::OutOfRange {
                position,
                len: self.len(),
            });
        }
        Ok(self.materialize(position))
    }

    /// The snapshot at the current position
    pub fn current(&self) -> Cow<'_, MemorySnapshot> {
        self.materialize(self.position)
    }

    // Caller guarantees `position < self.len()`
    fn materialize(&self, position: usize) -> Cow<'_, MemorySnapshot> {
        match self.cache.get(position) {
            Some(snapshot) => Cow::Borrowed(snapshot),
            None => Cow::Owned(replay(&self.steps, position as isize - 1)),
        }
    }

    /// The step that produced the current snapshot
    pub fn current_step(&self) -> Option<&Step> {
        self.position.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    /// What the current step did
    pub fn current_outcome(&self) -> Option<&StepOutcome> {
        self.position.checked_sub(1).and_then(|i| self.outcomes.get(i))
    }

    /// Zero-based source line of the current step
    pub fn current_line(&self) -> Option<usize> {
        self.current_step().map(|step| step.line)
    }

    pub fn step_forward(&mut self) -> Result<(), HistoryError> {
        if self.is_at_end() {
            return Err(HistoryError::AtEnd);
        }
        self.position += 1;
        Ok(())
    }

    pub fn step_backward(&mut self) -> Result<(), HistoryError> {
        if self.is_at_start() {
            return Err(HistoryError::AtStart);
        }
        self.position -= 1;
        Ok(())
    }

    pub fn seek(&mut self, position: usize) -> Result<(), HistoryError> {
        if position >= self.len() {
            return Err(HistoryError::OutOfRange {
                position,
                len: self.len(),
            });
        }
        self.position = position;
        Ok(())
    }

    pub fn rewind_to_start(&mut self) {
        self.position = 0;
    }

    pub fn jump_to_end(&mut self) {
        self.position = self.steps.len();
    }
}

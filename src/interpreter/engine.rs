//! Step replay engine
//!
//! Folds recognized [`Step`]s onto a [`MemorySnapshot`]. Every call returns
//! a new snapshot and leaves its input untouched, so earlier snapshots stay
//! valid while the UI scrubs backward through history.
//!
//! # Silent no-ops
//!
//! `a.next = ...` through a variable that is unbound or null changes nothing
//! and raises nothing. [`apply_step_traced`] reports why such a step was
//! skipped so the UI can explain it; the resulting snapshot is the same as
//! [`apply_step`] produces.

use crate::memory::{heap::HeapNode, Address};
use crate::parser::ast::{Step, StepKind};
use crate::snapshot::MemorySnapshot;
use serde::Serialize;
use std::fmt;
use tracing::trace;

/// Why a step left memory unchanged
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "camelCase")]
pub enum SkipReason {
    /// The variable was never declared
    Unbound { variable: String },
    /// The variable holds null
    NullReference { variable: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unbound { variable } => {
                write!(f, "'{}' is not declared, step had no effect", variable)
            }
            SkipReason::NullReference { variable } => {
                write!(f, "'{}' is null, step had no effect", variable)
            }
        }
    }
}

/// What applying a step did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum StepOutcome {
    Applied,
    Skipped(SkipReason),
}

impl StepOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, StepOutcome::Applied)
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            StepOutcome::Applied => None,
            StepOutcome::Skipped(reason) => Some(reason),
        }
    }
}

/// Apply one step, producing the next snapshot
pub fn apply_step(state: &MemorySnapshot, step: &Step) -> MemorySnapshot {
    apply_step_traced(state, step).0
}

/// Apply one step and report whether it changed anything
pub fn apply_step_traced(state: &MemorySnapshot, step: &Step) -> (MemorySnapshot, StepOutcome) {
    let mut next = state.clone();
    let outcome = match &step.kind {
        StepKind::CreateNode {
            variable_name,
            value,
        } => {
            let addr = Address::minted(next.address_counter);
            next.address_counter += 1;
            next.heap.insert(addr, HeapNode::new(*value));
            next.stack.bind(variable_name, Some(addr));
            next.last_touched = Some(addr);
            StepOutcome::Applied
        }

        StepKind::SetNext {
            variable_name,
            target_variable_name,
        } => {
            let target = next.stack.address_of(target_variable_name);
            set_next(&mut next, variable_name, target)
        }

        StepKind::SetNull { variable_name } => set_next(&mut next, variable_name, None),

        StepKind::AssignVar {
            variable_name,
            source_variable_name,
        } => {
            let addr = next.stack.address_of(source_variable_name);
            next.stack.bind(variable_name, addr);
            next.last_touched = addr;
            StepOutcome::Applied
        }
    };

    trace!(
        line = step.line,
        variable = step.kind.variable_name(),
        ?outcome,
        "applied step"
    );
    (next, outcome)
}

/// Point the node held by `variable` at `target`, if there is such a node
fn set_next(state: &mut MemorySnapshot, variable: &str, target: Option<Address>) -> StepOutcome {
    let node = state
        .stack
        .address_of(variable)
        .and_then(|addr| state.heap.get_mut(addr).map(|node| (addr, node)));

    match node {
        Some((addr, node)) => {
            node.next = target;
            state.last_touched = Some(addr);
            StepOutcome::Applied
        }
        None => {
            state.last_touched = None;
            let variable = variable.to_string();
            if state.stack.is_bound(&variable) {
                StepOutcome::Skipped(SkipReason::NullReference { variable })
            } else {
                StepOutcome::Skipped(SkipReason::Unbound { variable })
            }
        }
    }
}

/// Replay `steps[0..=upto_index]` from the empty snapshot
///
/// A negative index yields the empty snapshot. An index past the end
/// replays every step.
pub fn replay(steps: &[Step], upto_index: isize) -> MemorySnapshot {
    let count = match usize::try_from(upto_index) {
        Ok(index) => (index + 1).min(steps.len()),
        Err(_) => 0,
    };

    steps[..count]
        .iter()
        .fold(MemorySnapshot::empty(), |state, step| apply_step(&state, step))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(line: usize, name: &str, value: i32) -> Step {
        Step::new(
            line,
            StepKind::CreateNode {
                variable_name: name.to_string(),
                value,
            },
        )
    }

    fn set_next_step(line: usize, from: &str, to: &str) -> Step {
        Step::new(
            line,
            StepKind::SetNext {
                variable_name: from.to_string(),
                target_variable_name: to.to_string(),
            },
        )
    }

    fn set_null(line: usize, name: &str) -> Step {
        Step::new(
            line,
            StepKind::SetNull {
                variable_name: name.to_string(),
            },
        )
    }

    fn assign(line: usize, name: &str, source: &str) -> Step {
        Step::new(
            line,
            StepKind::AssignVar {
                variable_name: name.to_string(),
                source_variable_name: source.to_string(),
            },
        )
    }

    #[test]
    fn test_create_node_mints_and_binds() {
        let state = apply_step(&MemorySnapshot::empty(), &create(0, "a", 5));
        let addr = Address::minted(0);

        assert_eq!(state.address_counter, 1);
        assert_eq!(state.stack.address_of("a"), Some(addr));
        assert_eq!(state.heap.get(addr), Some(&HeapNode { value: 5, next: None }));
        assert_eq!(state.last_touched, Some(addr));
    }

    #[test]
    fn test_input_snapshot_is_not_mutated() {
        let before = replay(&[create(0, "a", 1), create(1, "b", 2)], 1);
        let frozen = before.clone();

        let after = apply_step(&before, &set_next_step(2, "a", "b"));

        assert_eq!(before, frozen);
        assert_ne!(before, after);
    }

    #[test]
    fn test_redeclaration_keeps_old_node() {
        let state = replay(&[create(0, "a", 1), create(1, "a", 2)], 1);

        assert_eq!(state.heap.len(), 2);
        assert_eq!(state.stack.address_of("a"), Some(Address::minted(1)));
        assert_eq!(state.stack.len(), 1);
    }

    #[test]
    fn test_set_next_to_unbound_target_is_null() {
        let steps = [
            create(0, "a", 1),
            create(1, "b", 2),
            set_next_step(2, "a", "b"),
            set_next_step(3, "a", "ghost"),
        ];
        let state = replay(&steps, 3);

        assert_eq!(state.heap.get(Address::minted(0)).unwrap().next, None);
        assert_eq!(state.last_touched, Some(Address::minted(0)));
    }

    #[test]
    fn test_set_null_clears_link_and_touches_node() {
        let steps = [
            create(0, "a", 1),
            create(1, "b", 2),
            set_next_step(2, "a", "b"),
            set_null(3, "a"),
        ];
        let linked = replay(&steps, 2);
        let a = Address::minted(0);
        assert_eq!(linked.heap.get(a).unwrap().next, Some(Address::minted(1)));

        let (state, outcome) = apply_step_traced(&linked, &steps[3]);
        assert!(outcome.is_applied());
        assert_eq!(state.heap.get(a).unwrap().next, None);
        assert_eq!(state.last_touched, Some(a));
        assert_eq!(state.heap.len(), 2);
    }

    #[test]
    fn test_set_next_to_null_variable_clears_link() {
        let steps = [
            create(0, "a", 1),
            create(1, "b", 2),
            set_next_step(2, "a", "b"),
            assign(3, "n", "null"),
            set_next_step(4, "a", "n"),
        ];
        let state = replay(&steps, 4);
        let a = Address::minted(0);

        assert_eq!(state.heap.get(a).unwrap().next, None);
        assert_eq!(state.last_touched, Some(a));
    }

    #[test]
    fn test_set_next_through_null_is_skipped() {
        let steps = [
            create(0, "a", 1),
            assign(1, "cur", "null"),
        ];
        let state = replay(&steps, 1);

        let (next, outcome) = apply_step_traced(&state, &set_next_step(2, "cur", "a"));
        assert_eq!(next.heap, state.heap);
        assert_eq!(next.last_touched, None);
        assert_eq!(
            outcome,
            StepOutcome::Skipped(SkipReason::NullReference {
                variable: "cur".to_string()
            })
        );
    }

    #[test]
    fn test_set_null_on_unbound_is_skipped() {
        let (state, outcome) = apply_step_traced(&MemorySnapshot::empty(), &set_null(0, "x"));

        assert_eq!(state, MemorySnapshot::empty());
        assert_eq!(
            outcome.skip_reason(),
            Some(&SkipReason::Unbound {
                variable: "x".to_string()
            })
        );
    }

    #[test]
    fn test_assign_var_copies_address_without_minting() {
        let state = replay(&[create(0, "a", 9), assign(1, "b", "a")], 1);

        assert_eq!(state.heap.len(), 1);
        assert_eq!(state.address_counter, 1);
        assert_eq!(state.stack.address_of("b"), state.stack.address_of("a"));
        assert_eq!(state.last_touched, Some(Address::minted(0)));
    }

    #[test]
    fn test_assign_from_unbound_binds_null() {
        let state = replay(&[assign(0, "b", "nowhere")], 0);

        assert!(state.stack.is_bound("b"));
        assert_eq!(state.stack.address_of("b"), None);
        assert_eq!(state.last_touched, None);
    }

    #[test]
    fn test_replay_bounds() {
        let steps = [create(0, "a", 1), create(1, "b", 2)];

        assert_eq!(replay(&steps, -1), MemorySnapshot::empty());
        assert_eq!(replay(&steps, -20), MemorySnapshot::empty());
        assert_eq!(replay(&steps, 0).heap.len(), 1);
        assert_eq!(replay(&steps, 99), replay(&steps, 1));
        assert_eq!(replay(&[], 3), MemorySnapshot::empty());
    }
}

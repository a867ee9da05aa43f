//! Memory engine
//!
//! This module provides the replay logic:
//! - [`engine`]: Fold steps onto snapshots (`apply_step`, `replay`)
//! - [`chain`]: Chain linearization, head inference and alias lookup
//! - [`errors`]: Timeline navigation errors
//! - [`constants`]: Address layout and default limits
//!
//! # Execution Model
//!
//! There is no control flow. Steps are applied strictly in source order,
//! one snapshot per step, and applying a step never mutates the snapshot
//! it was applied to.

pub mod chain;
pub mod constants;
pub mod engine;
pub mod errors;

pub use chain::{build_chain, find_head, heap_layout, variables_at, ChainLink};
pub use engine::{apply_step, apply_step_traced, replay, SkipReason, StepOutcome};
pub use errors::HistoryError;

//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Java source with keyword highlighting, current step line and error lines
//! - [`stack`]: Variables and the address each one holds
//! - [`heap`]: Heap nodes drawn as chains, with cycle and alias markers
//! - [`diagnostics`]: Current step description, skipped-step reasons, recognition errors
//! - [`status`]: Status bar with keybindings and playback state
//! - `utils`: Shared block and scroll helpers
//!
//! Each pane module exports a primary `render_*` function that takes the
//! data it draws and a mutable scroll state.

mod utils;

pub mod diagnostics;
pub mod heap;
pub mod source;
pub mod stack;
pub mod status;

// Re-export render functions for convenience
pub use diagnostics::render_diagnostics_pane;
pub use heap::render_heap_pane;
pub use source::{render_source_pane, SourceRenderData, SourceScrollState};
pub use stack::render_stack_pane;
pub use status::{render_status_bar, StatusRenderData};

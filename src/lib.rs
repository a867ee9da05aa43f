//! # Introduction
//!
//! listtrace recognizes the handful of Java statements that build and rewire
//! a singly linked list, then replays them one at a time over a small
//! stack/heap memory model. The snapshot history is navigated forward and
//! backward through a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Source → Recognizer → Steps → Engine → Snapshots → TUI
//! ```
//!
//! 1. [`parser`]: line-by-line recognizer producing steps and per-line errors.
//! 2. [`interpreter`]: folds steps onto [`snapshot::MemorySnapshot`]s and
//!    answers chain, head and alias queries for rendering.
//! 3. [`memory`]: [`memory::Address`] labels, a
//!    [`memory::stack::Stack`] of variables and a [`memory::heap::Heap`] of nodes.
//! 4. [`snapshot`]: snapshots and the navigable [`snapshot::Timeline`].
//! 5. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Supported Java subset
//!
//! `Node a = new Node(5);`, `a.next = b;`, `a.next = null;`, `Node b = a;`,
//! `b = a;`. Class scaffolding, comments and control-flow lines are skipped;
//! anything else is reported as an unrecognized line.
//!
//! ```
//! use listtrace::interpreter::{build_chain, replay, ChainLink};
//! use listtrace::parser::recognize;
//!
//! let recognition = recognize("Node a = new Node(1);\nNode b = new Node(2);\na.next = b;");
//! let state = replay(&recognition.steps, 2);
//! let head = state.stack.address_of("a").unwrap();
//! let chain = build_chain(&state.heap, head);
//! assert!(matches!(chain.as_slice(), [ChainLink::Node(_), ChainLink::Node(_)]));
//! ```

pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod snapshot;
pub mod telemetry;
pub mod ui;

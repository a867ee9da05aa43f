//! Java snippet recognizer
//!
//! This module turns Java source text into an ordered list of memory steps:
//! - [`ast`]: Step and error records
//! - [`patterns`]: Boilerplate filter and statement shapes
//! - [`recognizer`]: The line-by-line pass
//!
//! # Recognized Statements
//!
//! ```text
//! Node a = new Node(5);   CreateNode
//! a.next = null;          SetNull
//! a.next = b;             SetNext
//! Node b = a;             AssignVar
//! b = a;                  AssignVar
//! ```
//!
//! # Recognizer Implementation
//!
//! This is not a Java parser. Lines are matched against a small table of
//! regular expressions; class scaffolding and control flow are dropped, and
//! anything else becomes an "Unrecognized syntax" error for that line.

pub mod ast;
pub mod patterns;
pub mod recognizer;

pub use ast::{ParseError, Recognition, Step, StepKind};
pub use recognizer::recognize;

//! Line patterns for the recognizer
//!
//! Two ordered tables drive recognition:
//!
//! - [`BOILERPLATE`]: lines that are dropped without producing a step or an
//!   error (class scaffolding, comments, braces, control flow, ...)
//! - [`SHAPES`]: the five statement shapes, tried in order, first match wins
//!
//! Identifiers are word characters (`\w+`); integer literals may carry a
//! leading minus sign. Every shape tolerates surrounding whitespace and an
//! optional trailing semicolon.

use super::ast::StepKind;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Builds a step from the captures of a matched shape.
///
/// Returns `None` when the captures cannot be converted (an integer literal
/// outside the `int` range).
pub type ShapeBuilder = fn(&Captures<'_>) -> Option<StepKind>;

/// One statement shape of the grammar
pub struct Shape {
    pub name: &'static str,
    pub pattern: Regex,
    pub build: ShapeBuilder,
}

fn compile(pattern: &str) -> Regex {
    // Patterns are fixed at compile time; a failure here is a programming error.
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid recognizer pattern {pattern:?}: {e}"))
}

/// Lines ignored silently, in evaluation order
pub static BOILERPLATE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // blank
        r"^\s*$",
        // comments: `//`, and block comment lines `/*`, `*`, `*/`
        r"^\s*(//|/\*|\*)",
        // lone braces
        r"^\s*[{}]\s*;?\s*$",
        // class declaration
        r"^\s*((public|private|protected|static|final|abstract)\s+)*class\s+\w+",
        // method signature prologue
        r"^\s*(public|private|protected|static)\s",
        // field declarations
        r"^\s*(int|long|short|byte|char|boolean|float|double|Node)\s+\w+\s*;\s*$",
        // constructor signature
        r"^\s*Node\s*\([^)]*\)\s*\{?\s*$",
        // constructor body
        r"^\s*this\.\w+\s*=",
        r"^\s*return\b",
        r"^\s*(import|package)\s",
        // control flow
        r"^\s*(\}\s*)?(if|else|while|for|do|switch|case|default|break|continue)\b",
    ]
    .into_iter()
    .map(compile)
    .collect()
});

/// The statement grammar, in precedence order
pub static SHAPES: LazyLock<Vec<Shape>> = LazyLock::new(|| {
    vec![
        Shape {
            name: "create-node",
            pattern: compile(r"^\s*Node\s+(\w+)\s*=\s*new\s+Node\s*\(\s*(-?[0-9]+)\s*\)\s*;?\s*$"),
            build: |caps| {
                let value = caps[2].parse::<i32>().ok()?;
                Some(StepKind::CreateNode {
                    variable_name: caps[1].to_string(),
                    value,
                })
            },
        },
        Shape {
            name: "set-null",
            pattern: compile(r"^\s*(\w+)\.next\s*=\s*null\s*;?\s*$"),
            build: |caps| {
                Some(StepKind::SetNull {
                    variable_name: caps[1].to_string(),
                })
            },
        },
        Shape {
            name: "set-next",
            pattern: compile(r"^\s*(\w+)\.next\s*=\s*(\w+)\s*;?\s*$"),
            build: |caps| {
                Some(StepKind::SetNext {
                    variable_name: caps[1].to_string(),
                    target_variable_name: caps[2].to_string(),
                })
            },
        },
        Shape {
            name: "declare-alias",
            pattern: compile(r"^\s*Node\s+(\w+)\s*=\s*(\w+)\s*;?\s*$"),
            build: assign_var,
        },
        Shape {
            name: "reassign",
            pattern: compile(r"^\s*(\w+)\s*=\s*(\w+)\s*;?\s*$"),
            build: assign_var,
        },
    ]
});

fn assign_var(caps: &Captures<'_>) -> Option<StepKind> {
    Some(StepKind::AssignVar {
        variable_name: caps[1].to_string(),
        source_variable_name: caps[2].to_string(),
    })
}

/// Whether a line is scaffolding the recognizer skips
pub fn is_boilerplate(line: &str) -> bool {
    BOILERPLATE.iter().any(|re| re.is_match(line))
}

/// Outcome of matching a line against [`SHAPES`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeMatch {
    Step(StepKind),
    /// A shape matched but its captures were unusable
    Malformed(&'static str),
    NoMatch,
}

/// Match a line against the statement shapes, first match wins
pub fn match_statement(line: &str) -> ShapeMatch {
    for shape in SHAPES.iter() {
        if let Some(caps) = shape.pattern.captures(line) {
            return match (shape.build)(&caps) {
                Some(kind) => ShapeMatch::Step(kind),
                None => ShapeMatch::Malformed(shape.name),
            };
        }
    }
    ShapeMatch::NoMatch
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boilerplate_lines() {
        for line in [
            "",
            "   \t",
            "// build the list",
            "  /* block",
            "   * middle",
            "   */",
            "}",
            "  {",
            "};",
            "public class LinkedList {",
            "class Node {",
            "    public static void main(String[] args) {",
            "    int data;",
            "    Node next;",
            "    Node(int data) {",
            "        this.data = data;",
            "        this.next = null;",
            "        return head;",
            "import java.util.*;",
            "package demo;",
            "while (cur != null) {",
            "} else {",
            "for (int i = 0; i < 3; i++) {",
        ] {
            assert!(is_boilerplate(line), "expected boilerplate: {:?}", line);
        }
    }

    #[test]
    fn test_statements_are_not_boilerplate() {
        for line in [
            "Node a = new Node(1);",
            "a.next = b;",
            "a.next = null;",
            "Node b = a;",
            "b = a;",
            "foo bar baz",
        ] {
            assert!(!is_boilerplate(line), "unexpected boilerplate: {:?}", line);
        }
    }

    #[test]
    fn test_create_node_with_negative_value() {
        assert_eq!(
            match_statement("  Node n = new Node( -42 )  "),
            ShapeMatch::Step(StepKind::CreateNode {
                variable_name: "n".to_string(),
                value: -42,
            })
        );
    }

    #[test]
    fn test_set_null_wins_over_set_next() {
        assert_eq!(
            match_statement("a.next = null;"),
            ShapeMatch::Step(StepKind::SetNull {
                variable_name: "a".to_string(),
            })
        );
    }

    #[test]
    fn test_declaration_and_reassignment_both_assign() {
        let expected = ShapeMatch::Step(StepKind::AssignVar {
            variable_name: "b".to_string(),
            source_variable_name: "a".to_string(),
        });
        assert_eq!(match_statement("Node b = a;"), expected);
        assert_eq!(match_statement("b = a"), expected);
    }

    #[test]
    fn test_literal_overflow_is_malformed() {
        assert_eq!(
            match_statement("Node a = new Node(99999999999);"),
            ShapeMatch::Malformed("create-node")
        );
    }

    #[test]
    fn test_no_match() {
        assert_eq!(match_statement("a.next.next = b;"), ShapeMatch::NoMatch);
        assert_eq!(match_statement("foo bar baz"), ShapeMatch::NoMatch);
    }
}

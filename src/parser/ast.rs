//! Step and error records produced by the recognizer
//!
//! A [`Step`] is one recognized source line that mutates the memory model.
//! Lines that match nothing produce a [`ParseError`] instead. Both carry the
//! zero-based line index they came from so the UI can highlight the source.
//!
//! Field names are serialized in camelCase (`sourceLineNumber`,
//! `variableName`, ...) and are treated as a stable contract for consumers
//! of `--dump json`.

use serde::Serialize;
use std::fmt;

/// The effect of one recognized statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all_fields = "camelCase")]
pub enum StepKind {
    /// `Node a = new Node(5);`
    CreateNode {
        variable_name: String,
        #[serde(rename = "integerValue")]
        value: i32,
    },

    /// `a.next = b;`
    SetNext {
        variable_name: String,
        target_variable_name: String,
    },

    /// `a.next = null;`
    SetNull { variable_name: String },

    /// `Node b = a;` or `b = a;`
    AssignVar {
        variable_name: String,
        source_variable_name: String,
    },
}

impl StepKind {
    /// The variable whose slot or node this step writes through
    pub fn variable_name(&self) -> &str {
        match self {
            StepKind::CreateNode { variable_name, .. }
            | StepKind::SetNext { variable_name, .. }
            | StepKind::SetNull { variable_name }
            | StepKind::AssignVar { variable_name, .. } => variable_name,
        }
    }
}

/// A recognized step tagged with its source line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(rename = "sourceLineNumber")]
    pub line: usize, // Zero-based
    #[serde(flatten)]
    pub kind: StepKind,
}

impl Step {
    pub fn new(line: usize, kind: StepKind) -> Self {
        Step { line, kind }
    }

    /// Human-readable description for the status and diagnostics panes
    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StepKind::CreateNode {
                variable_name,
                value,
            } => write!(
                f,
                "Create node with value {} and point '{}' at it",
                value, variable_name
            ),
            StepKind::SetNext {
                variable_name,
                target_variable_name,
            } => write!(
                f,
                "Set {}.next to the node referenced by '{}'",
                variable_name, target_variable_name
            ),
            StepKind::SetNull { variable_name } => {
                write!(f, "Set {}.next to null", variable_name)
            }
            StepKind::AssignVar {
                variable_name,
                source_variable_name,
            } => write!(
                f,
                "Point '{}' at the same node as '{}'",
                variable_name, source_variable_name
            ),
        }
    }
}

/// A line that matched neither the boilerplate filter nor any statement shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("line {}: {}", .line + 1, .message)]
pub struct ParseError {
    #[serde(rename = "sourceLineNumber")]
    pub line: usize, // Zero-based
    pub message: String,
}

impl ParseError {
    pub fn unrecognized(line: usize, text: &str) -> Self {
        ParseError {
            line,
            message: format!("Unrecognized syntax: \"{}\"", text.trim()),
        }
    }

    pub fn literal_out_of_range(line: usize, text: &str) -> Self {
        ParseError {
            line,
            message: format!("Integer literal out of range: \"{}\"", text.trim()),
        }
    }
}

/// Output of a recognition pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Recognition {
    pub steps: Vec<Step>,
    pub errors: Vec<ParseError>,
}

impl Recognition {
    /// Whether any line failed to recognize
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_serializes_with_stable_field_names() {
        let step = Step::new(
            3,
            StepKind::CreateNode {
                variable_name: "head".to_string(),
                value: -7,
            },
        );
        let json = serde_json::to_value(&step).unwrap();

        assert_eq!(json["kind"], "CreateNode");
        assert_eq!(json["sourceLineNumber"], 3);
        assert_eq!(json["variableName"], "head");
        assert_eq!(json["integerValue"], -7);
    }

    #[test]
    fn test_set_next_field_names() {
        let step = Step::new(
            0,
            StepKind::SetNext {
                variable_name: "a".to_string(),
                target_variable_name: "b".to_string(),
            },
        );
        let json = serde_json::to_value(&step).unwrap();

        assert_eq!(json["kind"], "SetNext");
        assert_eq!(json["targetVariableName"], "b");
    }

    #[test]
    fn test_parse_error_display_is_one_based() {
        let err = ParseError::unrecognized(4, "  foo bar  ");
        assert_eq!(err.message, "Unrecognized syntax: \"foo bar\"");
        assert_eq!(err.to_string(), "line 5: Unrecognized syntax: \"foo bar\"");
    }

    #[test]
    fn test_descriptions() {
        let step = Step::new(
            0,
            StepKind::SetNull {
                variable_name: "tail".to_string(),
            },
        );
        assert_eq!(step.description(), "Set tail.next to null");
    }
}

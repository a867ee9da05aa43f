//! Line-oriented statement recognizer
//!
//! Walks the source one line at a time. Each line is either skipped as
//! boilerplate, turned into a [`Step`], or reported as a [`ParseError`].
//! A bad line never stops the pass, so this function is total.

use super::ast::{ParseError, Recognition, Step};
use super::patterns::{is_boilerplate, match_statement, ShapeMatch};
use tracing::{debug, trace};

/// Recognize every line of `source`
///
/// Line numbers are zero-based indices into `source.split('\n')`. Both the
/// steps and the errors come out in ascending line order.
pub fn recognize(source: &str) -> Recognition {
    let mut recognition = Recognition::default();
    let mut line_count = 0;

    for (line_no, raw) in source.split('\n').enumerate() {
        line_count += 1;
        let line = raw.strip_suffix('\r').unwrap_or(raw);

        if is_boilerplate(line) {
            trace!(line = line_no, "skipping boilerplate");
            continue;
        }

        match match_statement(line) {
            ShapeMatch::Step(kind) => recognition.steps.push(Step::new(line_no, kind)),
            ShapeMatch::Malformed(shape) => {
                debug!(line = line_no, shape, "statement shape matched with bad literal");
                recognition
                    .errors
                    .push(ParseError::literal_out_of_range(line_no, line));
            }
            ShapeMatch::NoMatch => recognition
                .errors
                .push(ParseError::unrecognized(line_no, line)),
        }
    }

    debug!(
        lines = line_count,
        steps = recognition.steps.len(),
        errors = recognition.errors.len(),
        "recognition finished"
    );

    recognition
}

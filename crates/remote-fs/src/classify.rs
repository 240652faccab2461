//! Mapping of well-known remote failures to typed conditions
//!
//! Every stderr-text classifier lives in [`CLASSIFIERS`]. A failure that no
//! entry matches stays a generic execution error.

use crate::command::Operation;
use crate::error::ErrorKind;

/// One recognized failure: `pattern` found in stderr of `operation`.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    pub operation: Operation,
    pub pattern: &'static str,
    pub kind: ErrorKind,
}

/// All recognized failures, checked in order.
pub const CLASSIFIERS: &[Classifier] = &[Classifier {
    operation: Operation::Mkdir,
    pattern: "File exists",
    kind: ErrorKind::AlreadyExists,
}];

/// Find the typed condition for a failed run of `operation`, if any.
///
/// Only exit failures are considered; spawn and pipe errors have no remote
/// diagnostic to match against.
pub fn classify(operation: Operation, err: &remote_exec::Error) -> Option<ErrorKind> {
    let output = err.output()?;
    let stderr = output.stderr_lossy();
    CLASSIFIERS
        .iter()
        .find(|c| c.operation == operation && stderr.contains(c.pattern))
        .map(|c| c.kind)
}

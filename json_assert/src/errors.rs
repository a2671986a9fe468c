use std::{error::Error, fmt::Display};

use serde_json::Value;

use crate::eval::NodeKind;

pub type JsonAssertResult<T> = Result<T, JsonAssertError>;

#[derive(Debug, PartialEq)]
pub enum JsonAssertError {
    /// The path expression itself is malformed; carries the number of
    /// characters consumed when the failure was detected.
    PathSyntax(String, usize),
    /// Resolution walked off a non-container, e.g. indexing into a string.
    PathResolution(String),
    /// The expression resolved to nothing; carries the expression.
    NotFound(String),
    ValueMismatch {
        expression: String,
        expected: Value,
        actual: Value,
    },
    PredicateMismatch {
        expression: String,
        expectation: String,
        actual: Value,
    },
    ExistsViolation(String),
    TypeMismatch {
        expression: String,
        expected: NodeKind,
        actual: NodeKind,
    },
    /// The document text is not parseable JSON.
    InvalidDocument(String),
}

impl Error for JsonAssertError {}

impl Display for JsonAssertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonAssertError::PathSyntax(e, pos) => {
                f.write_fmt(format_args!("Invalid JSON path: {} at {}", e, pos))
            }
            JsonAssertError::PathResolution(e) => {
                f.write_fmt(format_args!("JSON path evaluation error: {}", e))
            }
            JsonAssertError::NotFound(expression) => {
                f.write_fmt(format_args!("No value at JSON path \"{}\"", expression))
            }
            JsonAssertError::ValueMismatch {
                expression,
                expected,
                actual,
            } => f.write_fmt(format_args!(
                "JSON path \"{}\" expected <{}> but was <{}>",
                expression, expected, actual
            )),
            JsonAssertError::PredicateMismatch {
                expression,
                expectation,
                actual,
            } => f.write_fmt(format_args!(
                "JSON path \"{}\" expected a value {} but was <{}>",
                expression, expectation, actual
            )),
            JsonAssertError::ExistsViolation(e) => f.write_str(e),
            JsonAssertError::TypeMismatch {
                expression,
                expected,
                actual,
            } => f.write_fmt(format_args!(
                "JSON path \"{}\" expected a value of kind {} but was {}",
                expression, expected, actual
            )),
            JsonAssertError::InvalidDocument(e) => {
                f.write_fmt(format_args!("Invalid JSON document: {}", e))
            }
        }
    }
}

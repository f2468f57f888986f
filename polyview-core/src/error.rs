/// Error types for loading polyhedron descriptions
use std::fmt;
use std::io;

use thiserror::Error;

/// What went wrong on a particular line of a polyhedron description
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// The `<vertex_count>,<face_count>` header is missing or not numeric
    MalformedHeader,
    /// A vertex or face record has the wrong shape or a non-numeric field
    MalformedRecord,
    /// A vertex id lies outside `1..=vertex_count`
    VertexOutOfRange { id: i64, vertex_count: usize },
    /// A face lists fewer than three vertices
    FaceTooSmall { len: usize },
    /// The input ended before all declared records were read
    MissingLines { expected: usize, found: usize },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedHeader => {
                write!(f, "malformed header, expected `<vertex_count>,<face_count>`")
            }
            Self::MalformedRecord => write!(f, "malformed record"),
            Self::VertexOutOfRange { id, vertex_count } => {
                write!(f, "vertex id {id} outside 1..={vertex_count}")
            }
            Self::FaceTooSmall { len } => {
                write!(f, "face lists {len} vertices, at least 3 required")
            }
            Self::MissingLines { expected, found } => {
                write!(f, "expected {expected} records, found {found}")
            }
        }
    }
}

/// Failure to parse a polyhedron description. `line` is 1-based.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

/// Failure to load a polyhedron from disk
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParseError::new(
            4,
            ParseErrorKind::VertexOutOfRange {
                id: 7,
                vertex_count: 3,
            },
        );
        assert_eq!(err.to_string(), "line 4: vertex id 7 outside 1..=3");

        let err = ParseError::new(1, ParseErrorKind::MissingLines { expected: 5, found: 2 });
        assert!(err.to_string().contains("expected 5 records"));
    }

    #[test]
    fn test_load_error_from_parse() {
        let err: LoadError = ParseError::new(1, ParseErrorKind::MalformedHeader).into();
        assert!(matches!(err, LoadError::Parse(_)));
        assert!(err.to_string().starts_with("parse error: line 1"));
    }
}

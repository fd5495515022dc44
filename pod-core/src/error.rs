use core::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProtocolError {
    UnexpectedEof { line: usize, expected: &'static str },
    FieldCount { line: usize, expected: usize, found: usize },
    InvalidInteger { line: usize, token: String },
    NegativeCount { line: usize, value: i64 },
    EmptyCourse,
    CheckpointOutOfRange { index: i64, count: usize },
    TruncatedTurn { received: usize },
    ExtraTurnLines { line: usize },
    ValueOutOfRange {
        line: Option<usize>,
        field: &'static str,
        value: i64,
    },
    InvalidConfig { field: &'static str },
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof { line, expected } => {
                write!(f, "input ended at line {line}, expected {expected}")
            }
            Self::FieldCount {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {line}: expected {expected} integer fields, found {found}"
            ),
            Self::InvalidInteger { line, token } => {
                write!(f, "line {line}: invalid integer '{token}'")
            }
            Self::NegativeCount { line, value } => {
                write!(f, "line {line}: count must be non-negative, got {value}")
            }
            Self::EmptyCourse => write!(f, "course has no checkpoints"),
            Self::CheckpointOutOfRange { index, count } => write!(
                f,
                "checkpoint index {index} out of range for a course of {count}"
            ),
            Self::TruncatedTurn { received } => write!(
                f,
                "turn input truncated: received {received} of 4 vehicle lines"
            ),
            Self::ExtraTurnLines { line } => {
                write!(f, "line {line}: more than 4 vehicle lines in one turn")
            }
            Self::ValueOutOfRange {
                line: Some(line),
                field,
                value,
            } => write!(f, "line {line}: {field} {value} is out of range"),
            Self::ValueOutOfRange {
                line: None,
                field,
                value,
            } => write!(f, "{field} {value} is out of range"),
            Self::InvalidConfig { field } => write!(f, "invalid policy config field: {field}"),
        }
    }
}

impl std::error::Error for ProtocolError {}

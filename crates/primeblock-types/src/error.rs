use thiserror::Error;

/// Parse failures for the checkpoint `key = value` codec.
///
/// A checkpoint resource that exists but cannot be parsed must fail loudly
/// rather than be coerced to defaults, so every way a file can deviate from
/// the expected shape has its own variant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckpointFormatError {
    /// A line is not a `key = value` pair.
    #[error("line {line} is not a `key = value` pair")]
    Syntax { line: usize },

    /// A key outside the checkpoint schema.
    #[error("unknown field: {field}")]
    UnknownField { field: String },

    /// The same key appears more than once.
    #[error("duplicate field: {field}")]
    DuplicateField { field: &'static str },

    /// A required key is absent.
    #[error("missing field: {field}")]
    MissingField { field: &'static str },

    /// A value is not a valid decimal integer, or violates a field
    /// invariant (a zero block size, for instance).
    #[error("invalid value for {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },
}

//! Defines the error type shared by every fallible operation.
use crate::sample::AttributeKind;

use std::io;


/// Errors raised while loading data or growing a tree.
/// Each variant aborts the current run;
/// degenerate subsets are never reported through this type.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// The type tag of an attribute is none of `b`, `d`, `c`.
    #[error("unknown type '{tag}' for attribute {attribute}")]
    UnknownAttributeType {
        /// Index of the offending attribute.
        attribute: usize,
        /// The tag found in the input.
        tag: char,
    },

    /// Attribute `0` must be the binary class label.
    #[error("the target attribute must be binary, got {kind}")]
    TargetNotBinary {
        /// Kind of the column given as target.
        kind: AttributeKind,
    },

    /// A binary column received a value other than `0`/`1`.
    #[error("example {example}, attribute {attribute} is not binary (value = {value})")]
    NonBinaryValue {
        /// Index of the example.
        example: usize,
        /// Index of the attribute.
        attribute: usize,
        /// The offending token.
        value: String,
    },

    /// A continuous column received NaN or an infinite value.
    #[error("example {example}, attribute {attribute} is not finite (value = {value})")]
    NonFiniteValue {
        /// Index of the example.
        example: usize,
        /// Index of the attribute.
        attribute: usize,
        /// The offending value.
        value: f64,
    },

    /// A column does not hold one value per example.
    #[error("attribute {attribute} has {found} values, expected {expected}")]
    LengthMismatch {
        /// Index of the attribute.
        attribute: usize,
        /// Number of examples of the set.
        expected: usize,
        /// Number of values in the column.
        found: usize,
    },

    /// A column holds a missing (null) value.
    #[error("attribute `{attribute}` contains missing values")]
    MissingValue {
        /// Name of the attribute.
        attribute: String,
    },

    /// Malformed SSV input.
    #[error("line {line}: {message}")]
    Format {
        /// 1-based line number in the input.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// Two example sets cannot be merged.
    #[error("incompatible example sets: {0}")]
    IncompatibleSchema(String),

    /// The requested train/prune/test split is not usable.
    #[error("invalid partition: {0}")]
    InvalidPartition(String),

    /// Reading an input file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An experiment parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// (De)serializing a tree or a configuration failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Converting a `polars::DataFrame` failed.
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}


/// Alias used across the crate.
pub type Result<T> = std::result::Result<T, TreeError>;

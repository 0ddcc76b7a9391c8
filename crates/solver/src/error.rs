use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Could not read input file {}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not write output file {}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Input is empty, expected a `<variables> <equations>` header")]
    MissingHeader,

    #[error("Line {line}: expected `<variables> <equations>`, found {found:?}")]
    BadHeader { line: usize, found: String },

    /// A value on an equation line is not a valid complex number.
    #[error("Invalid data found in input file. Unable to parse line {line}: {source}")]
    Value {
        line: usize,
        #[source]
        source: linear::Error,
    },

    #[error("Line {line}: expected {expected} values (coefficients and constant), found {found}")]
    RowLength {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Expected {expected} equations, found {found}")]
    EquationCount { expected: usize, found: usize },

    #[error(transparent)]
    Linear(#[from] linear::Error),
}

//! Dense linear systems `A x = b` over the complex numbers.
//!
//! The [`GaussJordan`] solver reduces the augmented matrix `[A | b]` with full (row and column)
//! pivoting and classifies the system as having a unique solution, infinitely many solutions or
//! none at all.
mod complex;
mod format;
mod gauss_jordan;
mod matrix;
mod traits;

pub use complex::{Complex, EPSILON};
pub use format::PrettyFormat;
pub use gauss_jordan::{GaussJordan, ZERO_TOL};
pub use matrix::Matrix;
pub use traits::LinearSystem;

use nalgebra::DVector;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "Cannot convert {input} to a complex number! \
        Must be represented as [real]+[imag]i with no spaces, i or -i is also acceptable."
    )]
    Parse { input: String },

    #[error("Division by zero ({lhs} / {rhs})")]
    DivisionByZero { lhs: String, rhs: String },

    #[error("Cannot format with < 0 decimal places (given: {places})")]
    InvalidPrecision { places: i32 },

    #[error("Invalid dimensions for matrix: {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("Row {row} has {found} elements, expected {expected}")]
    NonUniformRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Cannot access {axis} {index} of a matrix with {len} {axis}s")]
    IndexOutOfRange {
        axis: Axis,
        index: usize,
        len: usize,
    },

    #[error(
        "Constants must be a {expected_rows}x1 column to match the coefficients \
        (given: {rows}x{cols})"
    )]
    ShapeMismatch {
        expected_rows: usize,
        rows: usize,
        cols: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// Outcome of a completed solve. Exactly one classification holds.
#[derive(Clone, Debug, PartialEq)]
pub enum Solution {
    /// One value per variable, indexed by the variable's original position.
    Unique(DVector<Complex>),
    Infinite,
    NoSolution,
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solution::Unique(values) => {
                for value in values.iter() {
                    writeln!(f, "{value}")?;
                }
                Ok(())
            }
            Solution::Infinite => writeln!(f, "Infinitely many solutions"),
            Solution::NoSolution => writeln!(f, "No solutions"),
        }
    }
}

//! Dense rectangular matrix of [`Complex`] values with bounds-checked elementary row and column
//! operations.
use std::{fmt, ops::Index};

use nalgebra::DMatrix;

use crate::{Axis, Complex, Error};

#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    data: DMatrix<Complex>,
}

impl Matrix {
    /// Creates a `rows`×`cols` matrix filled with complex zero.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, Error> {
        if rows < 1 || cols < 1 {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        Ok(Matrix {
            data: DMatrix::zeros(rows, cols),
        })
    }

    /// Creates a matrix from a list of rows, all of which must have the same length.
    pub fn from_rows(rows: Vec<Vec<Complex>>) -> Result<Self, Error> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        if nrows < 1 || ncols < 1 {
            return Err(Error::InvalidDimensions {
                rows: nrows,
                cols: ncols,
            });
        }
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != ncols)
        {
            return Err(Error::NonUniformRows {
                row,
                expected: ncols,
                found,
            });
        }

        Ok(Matrix {
            data: DMatrix::from_fn(nrows, ncols, |r, c| rows[r][c]),
        })
    }

    /// Creates a single-column matrix.
    pub fn column_vector(values: &[Complex]) -> Result<Self, Error> {
        Matrix::from_rows(values.iter().map(|&v| vec![v]).collect())
    }

    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Complex, Error> {
        self.check_row(row)?;
        self.check_col(col)?;
        Ok(self.data[(row, col)])
    }

    pub fn set(&mut self, row: usize, col: usize, value: Complex) -> Result<(), Error> {
        self.check_row(row)?;
        self.check_col(col)?;
        self.data[(row, col)] = value;
        Ok(())
    }

    pub fn row(&self, row: usize) -> Result<Vec<Complex>, Error> {
        self.check_row(row)?;
        Ok(self.data.row(row).iter().copied().collect())
    }

    pub fn column(&self, col: usize) -> Result<Vec<Complex>, Error> {
        self.check_col(col)?;
        Ok(self.data.column(col).iter().copied().collect())
    }

    pub fn swap_rows(&mut self, row1: usize, row2: usize) -> Result<(), Error> {
        self.check_row(row1)?;
        self.check_row(row2)?;
        self.data.swap_rows(row1, row2);
        Ok(())
    }

    pub fn swap_columns(&mut self, col1: usize, col2: usize) -> Result<(), Error> {
        self.check_col(col1)?;
        self.check_col(col2)?;
        self.data.swap_columns(col1, col2);
        Ok(())
    }

    /// row ← factor · row
    pub fn scale_row(&mut self, row: usize, factor: Complex) -> Result<(), Error> {
        self.check_row(row)?;
        for col in 0..self.ncols() {
            self.data[(row, col)] = self.data[(row, col)] * factor;
        }
        Ok(())
    }

    /// row1 ← row1 + factor · row2. `row2` is left untouched.
    pub fn add_scaled_row(&mut self, row1: usize, row2: usize, factor: Complex) -> Result<(), Error> {
        self.check_row(row1)?;
        self.check_row(row2)?;
        for col in 0..self.ncols() {
            let addend = self.data[(row2, col)] * factor;
            self.data[(row1, col)] = self.data[(row1, col)] + addend;
        }
        Ok(())
    }

    fn check_row(&self, index: usize) -> Result<(), Error> {
        check_index(Axis::Row, index, self.nrows())
    }

    fn check_col(&self, index: usize) -> Result<(), Error> {
        check_index(Axis::Column, index, self.ncols())
    }
}

fn check_index(axis: Axis, index: usize, len: usize) -> Result<(), Error> {
    if index < len {
        Ok(())
    } else {
        Err(Error::IndexOutOfRange { axis, index, len })
    }
}

/// Unchecked element access; panics when out of bounds like `nalgebra` does.
impl Index<(usize, usize)> for Matrix {
    type Output = Complex;

    fn index(&self, index: (usize, usize)) -> &Complex {
        &self.data[index]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MATRIX {}x{}", self.nrows(), self.ncols())?;
        for row in self.data.row_iter() {
            for value in row.iter() {
                write!(f, "{value}\t")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

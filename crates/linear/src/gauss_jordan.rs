//! Gauss-Jordan elimination with full (row and column) pivoting.
//!
use log::{debug, trace};
use nalgebra::DVector;

use crate::{Complex, Error, LinearSystem, Matrix, Solution};

/// Entries with a modulus at or below this are treated as zero when searching for pivots and
/// classifying rows. It absorbs the rounding noise accumulated over elimination steps.
pub const ZERO_TOL: f64 = 1e-3;

/// Solves `A x = b` by reducing the augmented matrix `[A | b]` to reduced row-echelon form.
#[derive(Clone, Copy, Debug)]
pub struct GaussJordan {
    zero_tol: f64,
}

impl Default for GaussJordan {
    fn default() -> Self {
        GaussJordan::new()
    }
}

impl GaussJordan {
    /// Creates a new solver using [`ZERO_TOL`] as the pivot threshold.
    pub fn new() -> Self {
        GaussJordan { zero_tol: ZERO_TOL }
    }

    /// Creates a new solver with a custom pivot threshold.
    pub fn with_zero_tol(zero_tol: f64) -> Self {
        GaussJordan { zero_tol }
    }

    pub fn zero_tol(&self) -> f64 {
        self.zero_tol
    }

    fn is_nonzero(&self, value: Complex) -> bool {
        value.modulus() > self.zero_tol
    }

    /// Finds the next pivot, starting the search at `(start, start)`.
    ///
    /// The column below the start position is searched first, then the row to its right. If
    /// neither holds a non-zero entry the search moves one step down the diagonal and repeats.
    /// The constant column (`num_vars`) is never considered.
    ///
    /// Returns `None` once the coefficient part of the matrix is exhausted.
    fn find_pivot(&self, aug: &Matrix, start: usize, num_vars: usize) -> Option<(usize, usize)> {
        let (mut row, mut col) = (start, start);
        while row < aug.nrows() && col < num_vars {
            if let Some(r) = (row..aug.nrows()).find(|&r| self.is_nonzero(aug[(r, col)])) {
                return Some((r, col));
            }
            if let Some(c) = (col..num_vars).find(|&c| self.is_nonzero(aug[(row, c)])) {
                return Some((row, c));
            }
            row += 1;
            col += 1;
        }
        None
    }

    /// Column of the first non-zero entry in `row`, constant column included.
    fn leading_column(&self, aug: &Matrix, row: usize) -> Option<usize> {
        (0..aug.ncols()).find(|&c| self.is_nonzero(aug[(row, c)]))
    }

    /// Reduces `aug` to upper triangular form with a unit diagonal.
    ///
    /// For each elimination step `p` the pivot is moved to `(p, p)` by a row and/or column swap,
    /// row `p` is scaled so the pivot becomes one, and column `p` is cleared in every row below.
    ///
    /// Returns the column swaps performed, in order. Column swaps permute the variables, so they
    /// must be undone (in reverse) before reading off the solution.
    fn forward_eliminate(
        &self,
        aug: &mut Matrix,
        num_vars: usize,
    ) -> Result<Vec<(usize, usize)>, Error> {
        let num_eqns = aug.nrows();
        let mut col_swaps = Vec::new();

        for p in 0..num_vars.min(num_eqns) {
            let Some((pivot_row, pivot_col)) = self.find_pivot(aug, p, num_vars) else {
                // remaining rows are already zero in the coefficient part
                debug!("no pivot found from R{}", p + 1);
                break;
            };

            if pivot_row != p {
                aug.swap_rows(p, pivot_row)?;
                debug!("R{} <-> R{}", p + 1, pivot_row + 1);
            }

            if pivot_col != p {
                aug.swap_columns(p, pivot_col)?;
                debug!("C{} <-> C{}", p + 1, pivot_col + 1);
                col_swaps.push((p, pivot_col));
            }

            let pivot = aug[(p, p)];
            if !is_exactly(pivot, Complex::ONE) {
                // the pivot is above zero_tol, which may be finer than the equality tolerance
                let factor = pivot.recip();
                aug.scale_row(p, factor)?;
                debug!("{} * R{} -> R{}", factor, p + 1, p + 1);
            }

            for row in (p + 1)..num_eqns {
                let entry = aug[(row, p)];
                if !is_exactly(entry, Complex::ZERO) {
                    let factor = -entry;
                    aug.add_scaled_row(row, p, factor)?;
                    debug!("{} * R{} + R{} -> R{}", factor, p + 1, row + 1, row + 1);
                }
            }
        }

        Ok(col_swaps)
    }

    /// Clears every entry above the diagonal of the first `num_rows` rows.
    ///
    /// Relies on the output of [`Self::forward_eliminate`] for a full rank system: the leading
    /// one of row `k` sits in column `k`.
    fn back_substitute(
        &self,
        aug: &mut Matrix,
        num_rows: usize,
        num_vars: usize,
    ) -> Result<(), Error> {
        for row in 0..num_rows {
            for col in (row + 1)..num_vars {
                let entry = aug[(row, col)];
                if !is_exactly(entry, Complex::ZERO) {
                    let factor = -entry;
                    aug.add_scaled_row(row, col, factor)?;
                    debug!("{} * R{} + R{} -> R{}", factor, col + 1, row + 1, row + 1);
                }
            }
        }
        Ok(())
    }
}

impl LinearSystem for GaussJordan {
    fn solve(&self, coeffs: &Matrix, consts: &Matrix) -> Result<Solution, Error> {
        let num_eqns = coeffs.nrows();
        let num_vars = coeffs.ncols();
        if consts.ncols() != 1 || consts.nrows() != num_eqns {
            return Err(Error::ShapeMismatch {
                expected_rows: num_eqns,
                rows: consts.nrows(),
                cols: consts.ncols(),
            });
        }

        let mut aug = augment(coeffs, consts)?;
        trace!("augmented {}", aug);

        let col_swaps = self.forward_eliminate(&mut aug, num_vars)?;
        trace!("reduced {}", aug);

        let mut num_significant_eqns = 0;
        for row in 0..num_eqns {
            match self.leading_column(&aug, row) {
                // 0 = c with c != 0
                Some(col) if col == num_vars => {
                    debug!("R{} is inconsistent", row + 1);
                    return Ok(Solution::NoSolution);
                }
                Some(_) => num_significant_eqns += 1,
                None => {}
            }
        }

        if num_significant_eqns < num_vars {
            debug!(
                "{} significant equations for {} variables",
                num_significant_eqns, num_vars
            );
            return Ok(Solution::Infinite);
        }

        self.back_substitute(&mut aug, num_significant_eqns, num_vars)?;
        undo_column_swaps(&mut aug, &col_swaps)?;
        trace!("solved {}", aug);

        // The leading one of each row marks the variable it solves for.
        let mut solution = DVector::zeros(num_vars);
        for row in 0..num_eqns {
            if let Some(col) = self.leading_column(&aug, row).filter(|&c| c < num_vars) {
                solution[col] = aug[(row, num_vars)];
            }
        }

        Ok(Solution::Unique(solution))
    }
}

/// Builds `[coeffs | consts]`.
fn augment(coeffs: &Matrix, consts: &Matrix) -> Result<Matrix, Error> {
    let num_vars = coeffs.ncols();
    let mut aug = Matrix::zeros(coeffs.nrows(), num_vars + 1)?;
    for row in 0..coeffs.nrows() {
        for col in 0..num_vars {
            aug.set(row, col, coeffs[(row, col)])?;
        }
        aug.set(row, num_vars, consts[(row, 0)])?;
    }
    Ok(aug)
}

/// Replays `col_swaps` last to first, restoring the original variable order.
fn undo_column_swaps(aug: &mut Matrix, col_swaps: &[(usize, usize)]) -> Result<(), Error> {
    for &(col1, col2) in col_swaps.iter().rev() {
        aug.swap_columns(col1, col2)?;
    }
    Ok(())
}

fn is_exactly(value: Complex, target: Complex) -> bool {
    value.re() == target.re() && value.im() == target.im()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::dvector;

    use super::*;

    fn real_rows(rows: &[&[f64]]) -> Matrix {
        Matrix::from_rows(
            rows.iter()
                .map(|row| row.iter().copied().map(Complex::real).collect())
                .collect(),
        )
        .unwrap()
    }

    fn real_column(values: &[f64]) -> Matrix {
        let values: Vec<_> = values.iter().copied().map(Complex::real).collect();
        Matrix::column_vector(&values).unwrap()
    }

    fn unique(solution: Solution) -> DVector<Complex> {
        match solution {
            Solution::Unique(x) => x,
            other => panic!("expected a unique solution, got {other:?}"),
        }
    }

    #[test]
    fn test_unique_2x2() {
        let coeffs = real_rows(&[&[1.0, 1.0], &[1.0, -1.0]]);
        let consts = real_column(&[3.0, 1.0]);
        let x = unique(GaussJordan::new().solve(&coeffs, &consts).unwrap());
        assert_relative_eq!(x, dvector![Complex::real(2.0), Complex::real(1.0)]);
    }

    #[test]
    fn test_no_solution() {
        let coeffs = real_rows(&[&[1.0, 1.0], &[2.0, 2.0]]);
        let consts = real_column(&[3.0, 7.0]);
        assert_eq!(
            GaussJordan::new().solve(&coeffs, &consts).unwrap(),
            Solution::NoSolution
        );
    }

    #[test]
    fn test_infinite_solutions() {
        let coeffs = real_rows(&[&[1.0, 1.0], &[2.0, 2.0]]);
        let consts = real_column(&[3.0, 6.0]);
        assert_eq!(
            GaussJordan::new().solve(&coeffs, &consts).unwrap(),
            Solution::Infinite
        );
    }

    #[test]
    fn test_permuted_identity() {
        let coeffs = real_rows(&[&[0.0, 1.0], &[1.0, 0.0]]);
        let consts = real_column(&[5.0, 3.0]);
        let x = unique(GaussJordan::new().solve(&coeffs, &consts).unwrap());
        assert_relative_eq!(x, dvector![Complex::real(3.0), Complex::real(5.0)]);
    }

    #[test]
    fn test_dense_4x4() {
        let coeffs = real_rows(&[
            &[5.0, 0.0, 0.0, 1.0],
            &[2.0, 2.0, 2.0, 1.0],
            &[4.0, 5.0, 5.0, 5.0],
            &[1.0, 6.0, 4.0, 5.0],
        ]);
        let consts = real_column(&[9.0, 16.0, 49.0, 45.0]);
        let x = unique(GaussJordan::new().solve(&coeffs, &consts).unwrap());
        let expected = dvector![1.0, 2.0, 3.0, 4.0].map(Complex::real);
        assert_relative_eq!(x, expected, max_relative = 1e-9);
    }

    #[test]
    fn test_complex_3x3() {
        let i = Complex::I;
        let one = Complex::ONE;
        let coeffs = Matrix::from_rows(vec![
            vec![one, i, Complex::ZERO],
            vec![Complex::real(2.0), one, one + i],
            vec![Complex::ZERO, one - i, Complex::real(3.0)],
        ])
        .unwrap();
        let consts = Matrix::column_vector(&[
            Complex::new(1.0, 3.0),
            Complex::new(5.0, 1.0),
            Complex::new(2.0, -5.0),
        ])
        .unwrap();

        let x = unique(GaussJordan::new().solve(&coeffs, &consts).unwrap());
        let expected = dvector![Complex::new(1.0, 1.0), Complex::real(2.0), -i];
        assert_relative_eq!(x, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_overdetermined_with_redundant_rows() {
        let coeffs = real_rows(&[&[1.0, 1.0], &[1.0, -1.0], &[2.0, 2.0], &[3.0, 1.0]]);
        let consts = real_column(&[1.0, 3.0, 2.0, 5.0]);
        let x = unique(GaussJordan::new().solve(&coeffs, &consts).unwrap());
        assert_relative_eq!(x, dvector![Complex::real(2.0), Complex::real(-1.0)]);

        let coeffs = real_rows(&[&[1.0, 1.0], &[1.0, -1.0], &[1.0, 0.0]]);
        let consts = real_column(&[1.0, 3.0, 7.0]);
        assert_eq!(
            GaussJordan::new().solve(&coeffs, &consts).unwrap(),
            Solution::NoSolution
        );
    }

    #[test]
    fn test_underdetermined() {
        let coeffs = real_rows(&[&[1.0, 2.0, 3.0]]);
        let consts = real_column(&[6.0]);
        assert_eq!(
            GaussJordan::new().solve(&coeffs, &consts).unwrap(),
            Solution::Infinite
        );
    }

    #[test]
    fn test_zero_coefficients() {
        let coeffs = Matrix::zeros(2, 2).unwrap();
        assert_eq!(
            GaussJordan::new()
                .solve(&coeffs, &real_column(&[0.0, 0.0]))
                .unwrap(),
            Solution::Infinite
        );
        assert_eq!(
            GaussJordan::new()
                .solve(&coeffs, &real_column(&[0.0, 1.0]))
                .unwrap(),
            Solution::NoSolution
        );
    }

    #[test]
    fn test_inconsistency_found_past_the_diagonal() {
        // the contradiction sits in a row below the last possible pivot
        let coeffs = real_rows(&[&[1.0, 1.0], &[1.0, 1.0], &[0.0, 0.0]]);
        let consts = real_column(&[1.0, 1.0, 5.0]);
        assert_eq!(
            GaussJordan::new().solve(&coeffs, &consts).unwrap(),
            Solution::NoSolution
        );
    }

    #[test]
    fn test_zero_tol() {
        let coeffs = real_rows(&[&[1e-4, 0.0], &[0.0, 1.0]]);
        let consts = real_column(&[1e-4, 1.0]);

        assert_eq!(
            GaussJordan::new().solve(&coeffs, &consts).unwrap(),
            Solution::Infinite
        );

        let solver = GaussJordan::with_zero_tol(1e-9);
        assert_eq!(solver.zero_tol(), 1e-9);
        let x = unique(solver.solve(&coeffs, &consts).unwrap());
        assert_relative_eq!(x, dvector![Complex::ONE, Complex::ONE], epsilon = 1e-9);
    }

    #[test]
    fn test_pivot_below_equality_tolerance() {
        let coeffs = real_rows(&[&[5e-5, 0.0], &[0.0, 1.0]]);
        let consts = real_column(&[5e-5, 1.0]);
        let x = unique(GaussJordan::with_zero_tol(1e-9).solve(&coeffs, &consts).unwrap());
        assert_relative_eq!(x, dvector![Complex::ONE, Complex::ONE], epsilon = 1e-9);
    }

    #[test]
    fn test_inputs_untouched() {
        let coeffs = real_rows(&[&[0.0, 2.0], &[4.0, 1.0]]);
        let consts = real_column(&[2.0, 9.0]);
        let (coeffs_before, consts_before) = (coeffs.clone(), consts.clone());

        let x = unique(GaussJordan::new().solve(&coeffs, &consts).unwrap());
        assert_relative_eq!(x, dvector![Complex::real(2.0), Complex::ONE]);
        assert_eq!(coeffs, coeffs_before);
        assert_eq!(consts, consts_before);
    }

    #[test]
    fn test_shape_mismatch() {
        let coeffs = real_rows(&[&[1.0, 1.0], &[1.0, -1.0]]);
        assert!(matches!(
            GaussJordan::new().solve(&coeffs, &real_column(&[1.0, 2.0, 3.0])),
            Err(Error::ShapeMismatch {
                expected_rows: 2,
                rows: 3,
                cols: 1
            })
        ));
        assert!(matches!(
            GaussJordan::new().solve(&coeffs, &coeffs),
            Err(Error::ShapeMismatch { cols: 2, .. })
        ));
    }

    #[test]
    fn test_column_swaps_with_shared_column() {
        // column 2 takes part in both swaps
        let original = real_rows(&[&[1.0, 2.0, 3.0, 4.0], &[5.0, 6.0, 7.0, 8.0]]);
        let swaps = [(0, 2), (1, 2)];
        let mut aug = original.clone();
        for &(a, b) in &swaps {
            aug.swap_columns(a, b).unwrap();
        }
        assert_eq!(aug.row(0).unwrap()[..3], [3.0, 1.0, 2.0].map(Complex::real));

        undo_column_swaps(&mut aug, &swaps).unwrap();
        assert_eq!(aug, original);
    }

    #[test]
    fn test_forward_eliminate_column_pivot() {
        // column 0 is negligible everywhere, so the first pivot comes from a column swap
        let mut aug = real_rows(&[&[0.0, 2.0, 1.0, 4.0], &[0.0, 1.0, 1.0, 3.0]]);
        let swaps = GaussJordan::new().forward_eliminate(&mut aug, 3).unwrap();
        assert_eq!(swaps, vec![(0, 1), (1, 2)]);
        assert_eq!(aug.row(0).unwrap(), [1.0, 0.5, 0.0, 2.0].map(Complex::real));
        assert_eq!(aug.row(1).unwrap(), [0.0, 1.0, 0.0, 2.0].map(Complex::real));
    }
}

use crate::{Error, Matrix, Solution};

/// A strategy for solving the linear system `A x = b`.
pub trait LinearSystem {
    /// Solves the system with coefficients `coeffs` (one row per equation, one column per
    /// variable) and right-hand side `consts` (a single column with one row per equation).
    ///
    /// ## Returns
    /// * `Ok(Solution::Unique(x))` with `x` indexed by the original variable position.
    /// * `Ok(Solution::Infinite)` if the system is consistent but underdetermined.
    /// * `Ok(Solution::NoSolution)` if the system is inconsistent.
    /// * `Err(_)` only when the inputs violate the shape preconditions.
    ///
    /// Implementations must not modify `coeffs` or `consts`.
    fn solve(&self, coeffs: &Matrix, consts: &Matrix) -> Result<Solution, Error>;
}

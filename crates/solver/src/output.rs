use std::{fs, path::Path};

use linear::Solution;

use crate::error::Error;

/// Written in place of a result when the solver rejected the system.
pub const SOLVE_FAILED: &str = "Error determining solution";

/// File contents for a solve result: one value per line, or a status line.
pub fn render(result: Result<&Solution, &linear::Error>) -> String {
    match result {
        Ok(solution) => solution.to_string(),
        Err(_) => format!("{SOLVE_FAILED}\n"),
    }
}

/// One-line console summary of a solution.
pub fn summary(solution: &Solution) -> String {
    match solution {
        Solution::Unique(values) => {
            let values: Vec<String> = values.iter().map(ToString::to_string).collect();
            format!("The solution is: ({})", values.join(", "))
        }
        other => other.to_string().trim_end().to_owned(),
    }
}

pub fn write_result(path: &Path, result: Result<&Solution, &linear::Error>) -> Result<(), Error> {
    fs::write(path, render(result)).map_err(|source| Error::WriteOutput {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use linear::Complex;
    use nalgebra::dvector;

    use super::*;

    #[test]
    fn test_render() {
        let unique = Solution::Unique(dvector![Complex::real(2.0), Complex::new(0.5, -1.0)]);
        assert_eq!(render(Ok(&unique)), "2\n0.5-i\n");
        assert_eq!(render(Ok(&Solution::Infinite)), "Infinitely many solutions\n");
        assert_eq!(render(Ok(&Solution::NoSolution)), "No solutions\n");

        let err = linear::Error::InvalidDimensions { rows: 0, cols: 0 };
        assert_eq!(render(Err(&err)), "Error determining solution\n");
    }

    #[test]
    fn test_summary() {
        let unique = Solution::Unique(dvector![Complex::real(2.0), Complex::I]);
        assert_eq!(summary(&unique), "The solution is: (2, i)");
        assert_eq!(summary(&Solution::Infinite), "Infinitely many solutions");
        assert_eq!(summary(&Solution::NoSolution), "No solutions");
    }
}

//! Input file format:
//!
//! ```text
//! <variables> <equations>
//! a11 a12 ... a1n b1
//! ...
//! am1 am2 ... amn bm
//! ```
//!
//! Values are complex literals such as `3`, `-1.5`, `2-i` or `0.5i`. Blank lines are ignored.
use std::{fs, path::Path};

use linear::{Complex, Matrix};
use log::info;

use crate::error::Error;

/// Coefficients and constants of a parsed linear system.
#[derive(Debug)]
pub struct System {
    pub coeffs: Matrix,
    pub consts: Matrix,
}

pub fn read_system(path: &Path) -> Result<System, Error> {
    let text = fs::read_to_string(path).map_err(|source| Error::ReadInput {
        path: path.to_owned(),
        source,
    })?;
    let system = parse_system(&text)?;
    info!(
        "read {} equations in {} variables from {}",
        system.coeffs.nrows(),
        system.coeffs.ncols(),
        path.display()
    );
    Ok(system)
}

pub fn parse_system(text: &str) -> Result<System, Error> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (line, header) = lines.next().ok_or(Error::MissingHeader)?;
    let (num_vars, num_eqns) = parse_header(line, header)?;
    let num_values = num_vars.checked_add(1).ok_or_else(|| Error::BadHeader {
        line,
        found: header.to_owned(),
    })?;

    let equations: Vec<_> = lines.collect();
    if equations.len() != num_eqns {
        return Err(Error::EquationCount {
            expected: num_eqns,
            found: equations.len(),
        });
    }

    // every line is checked against the header before any matrix is sized from it
    let mut rows = Vec::with_capacity(equations.len());
    for (line, equation) in equations {
        let values = equation
            .split_whitespace()
            .map(str::parse::<Complex>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| Error::Value { line, source })?;

        if values.len() != num_values {
            return Err(Error::RowLength {
                line,
                expected: num_values,
                found: values.len(),
            });
        }
        rows.push(values);
    }

    let consts = Matrix::from_rows(rows.iter().map(|row| vec![row[num_vars]]).collect())?;
    let coeffs = Matrix::from_rows(
        rows.into_iter()
            .map(|mut row| {
                row.truncate(num_vars);
                row
            })
            .collect(),
    )?;

    Ok(System { coeffs, consts })
}

/// Parses `<variables> <equations>`.
fn parse_header(line: usize, header: &str) -> Result<(usize, usize), Error> {
    let bad_header = || Error::BadHeader {
        line,
        found: header.to_owned(),
    };
    let sizes = header
        .split_whitespace()
        .map(str::parse::<usize>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| bad_header())?;
    match sizes[..] {
        [num_vars, num_eqns] => Ok((num_vars, num_eqns)),
        _ => Err(bad_header()),
    }
}

//! Reads a linear system from a file, solves it with Gauss-Jordan elimination and writes the
//! solution (or the reason there is none) to another file.
use std::{ffi::OsString, path::PathBuf, process::ExitCode};

use clap::{ArgAction, Parser};
use linear::{GaussJordan, LinearSystem};
use log::LevelFilter;

mod error;
mod input;
mod output;

use error::Error;

#[derive(Parser, Debug)]
#[command(
    name = "solver",
    version,
    about = "Solve a system of linear equations over the complex numbers"
)]
struct Cli {
    /// Input file: a `<variables> <equations>` header, then one line per equation
    #[arg(long = "in", value_name = "FILE")]
    input: PathBuf,

    /// Output file receiving the solution, one value per line, or the classification
    #[arg(long = "out", value_name = "FILE")]
    output: PathBuf,

    /// Entries with a modulus at or below this count as zero during elimination
    #[arg(long = "zero-tol", value_name = "TOL", default_value_t = linear::ZERO_TOL)]
    zero_tol: f64,

    /// Increase verbosity (-v, -vv shows elimination steps, -vvv the matrices)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbosity: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse_from(std::env::args_os().map(legacy_flag));
    init_logger(cli.verbosity);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Accepts the single-dash `-in`/`-out` spelling of the file flags.
fn legacy_flag(arg: OsString) -> OsString {
    if arg == "-in" || arg == "-out" {
        let mut flag = OsString::from("-");
        flag.push(&arg);
        flag
    } else {
        arg
    }
}

/// `RUST_LOG` takes precedence over the verbosity flag.
fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    pretty_env_logger::formatted_builder()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: &Cli) -> Result<(), Error> {
    let system = input::read_system(&cli.input)?;

    println!("Start solving the equation.\n");
    let solver = GaussJordan::with_zero_tol(cli.zero_tol);
    let result = solver.solve(&system.coeffs, &system.consts);
    match &result {
        Ok(solution) => println!("{}", output::summary(solution)),
        Err(_) => println!("{}", output::SOLVE_FAILED),
    }

    output::write_result(&cli.output, result.as_ref())?;
    let saved = cli.output.file_name().unwrap_or(cli.output.as_os_str());
    println!("\nSaved to {}", saved.to_string_lossy());

    result.map(|_| ()).map_err(Error::from)
}

// Copyright contributors to the SIC-POVM Decomposition Checker project

use std::{error::Error, io, path::PathBuf};

use clap::{CommandFactory, Parser};
use env_logger::Env;
use log::debug;

use sic_common::{Decomposition, Tolerances, tolerance::DEFAULT_TOLERANCE};
use sic_verifier::{Verifier, report};

/// Checks whether the projective decomposition of the noisy version of a
/// SIC-POVM is valid.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON file containing the decomposition
    path: Option<PathBuf>,
    /// Bound on the second largest eigenvalue of each projector
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    rank_tolerance: f64,
    /// Bound on |P^2 - P|^2 for each normalized projector
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    projector_tolerance: f64,
    /// Bound on |sum P - I|^2 for each normalized measurement
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    completeness_tolerance: f64,
    /// Bound on the distance between each row and the noisy reference effect
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    visibility_tolerance: f64,
}

impl Cli {
    fn tolerances(&self) -> Tolerances {
        Tolerances {
            rank: self.rank_tolerance,
            projector: self.projector_tolerance,
            completeness: self.completeness_tolerance,
            visibility: self.visibility_tolerance,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // By default log INFO.
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let Some(path) = cli.path.as_ref() else {
        Cli::command().print_help()?;
        return Ok(());
    };
    let verifier = Verifier::new(cli.tolerances());
    debug!("Tolerances: {:?}", verifier.tolerances());

    let decomposition = Decomposition::read(path)?;
    let source = path.display().to_string();
    let visibility = report(&source, &decomposition, &verifier, &mut io::stdout().lock())?;
    debug!("Exited with visibility {visibility}");

    Ok(())
}

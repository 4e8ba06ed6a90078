// Copyright contributors to the SIC-POVM Decomposition Checker project

use std::{
    error::Error,
    io::{self, Write},
};

use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::info;
use sic_reference::{UnsupportedDimension, fiducial::fiducial};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum Construction {
    /// Every row sums to I/d^2 (visibility 0)
    Uniform,
    /// Uniform construction in a seeded random basis
    RotatedUniform,
    /// Noisy SIC-POVM with visibility d/(d^2-1)
    Covariant,
}

/// Write a projective decomposition of a noisy POVM as JSON to stdout
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    dimension: usize,
    #[arg(short, long, value_enum, default_value_t = Construction::Covariant)]
    construction: Construction,
    #[arg(short, long, default_value_t = 0)]
    seed: u64,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let d = cli.dimension;

    let decomposition = match cli.construction {
        Construction::Uniform => sic_synthesis::uniform(d)?,
        Construction::RotatedUniform => sic_synthesis::rotated_uniform(d, cli.seed)?,
        Construction::Covariant => {
            let psi = fiducial(d).ok_or(UnsupportedDimension(d))?;
            sic_synthesis::covariant(&psi)?
        }
    };
    info!(
        "Writing {:?} decomposition of a {d}-dimensional POVM with {} measurements",
        cli.construction,
        decomposition.len()
    );

    let mut stdout = io::stdout().lock();
    decomposition.write(&mut stdout)?;
    writeln!(stdout)?;

    Ok(())
}

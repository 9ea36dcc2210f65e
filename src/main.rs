use std::{path::PathBuf, str::FromStr};

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use indicatif::ParallelProgressIterator;
use itertools::{EitherOrBoth, Itertools};
use log::{warn, LevelFilter};
use rayon::prelude::*;
use ureq::Agent;

use crate::{filter::Scope, frequency::NormalizedFrequency, kind::FacilityKind};

mod chirp;
mod country;
mod error;
mod facility;
mod filter;
mod frequency;
mod kind;
mod nominatim;
mod openaip;
mod utils;

/// Get frequencies for specific countries from openAIP.
#[derive(Debug, Parser)]
struct Cli {
    /// ISO alpha-2 country codes.
    #[arg(short, long, required = true, num_args = 1..)]
    country: Vec<String>,

    /// Types of frequencies: airports, airspaces. Defaults to all.
    #[arg(short = 't', long = "type", num_args = 1.., value_parser = FacilityKind::from_str)]
    kinds: Vec<FacilityKind>,

    /// Postal codes to narrow down the output to a specific area, paired with the
    /// countries in order.
    #[arg(short, long, num_args = 1..)]
    postal_code: Vec<String>,

    /// Radius in kilometers around the postal code [default with a postal code: 50].
    #[arg(short, long)]
    radius: Option<f64>,

    #[arg(short, long, value_enum, default_value_t = Output::ConsoleJson)]
    output: Output,

    /// When writing a file, append this to the file name.
    #[arg(short, long, default_value = "")]
    suffix: String,

    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    #[arg(long, default_value = openaip::DEFAULT_STORAGE_URL)]
    storage_url: String,

    #[arg(long, default_value = nominatim::DEFAULT_GEOCODER_URL)]
    geocoder_url: String,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    debug: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Output {
    #[value(alias = "Console-JSON")]
    ConsoleJson,
    #[value(alias = "CHIRP-CSV")]
    ChirpCsv,
}

/// A country with its geographic narrowing, shared by every requested kind.
#[derive(Debug)]
struct Session {
    country: String,
    scope: Scope,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .parse_default_env()
        .init();

    if let Some(radius) = cli.radius {
        if !(radius >= 0.0) {
            bail!("Invalid radius: {radius}");
        }
    }

    let agent = utils::agent();
    let kinds = if cli.kinds.is_empty() {
        FacilityKind::all()
    } else {
        cli.kinds.clone()
    };

    let sessions = sessions(&cli, &agent)?;
    let runs = sessions.iter().cartesian_product(kinds).collect_vec();

    let results: Vec<Vec<NormalizedFrequency>> = runs
        .par_iter()
        .progress_with_style(utils::progress_style())
        .map(|(session, kind)| -> Result<Vec<NormalizedFrequency>> {
            let facilities = openaip::fetch(&agent, &cli.storage_url, &session.country, *kind)?;
            Ok(frequency::gather(&facilities, *kind, &session.scope))
        })
        .collect::<Result<_>>()?;

    for ((session, kind), frequencies) in runs.iter().zip(results) {
        match cli.output {
            Output::ConsoleJson => println!("{}", serde_json::to_string_pretty(&frequencies)?),
            Output::ChirpCsv => {
                chirp::write_file(
                    &cli.output_dir,
                    &session.country,
                    *kind,
                    &cli.suffix,
                    &frequencies,
                )?;
            }
        }
    }

    Ok(())
}

fn sessions(cli: &Cli, agent: &Agent) -> Result<Vec<Session>> {
    let mut sessions = Vec::new();
    for pair in cli.country.iter().zip_longest(&cli.postal_code) {
        let (country, postal_code) = match pair {
            EitherOrBoth::Both(country, postal_code) => (country, Some(postal_code)),
            EitherOrBoth::Left(country) => (country, None),
            EitherOrBoth::Right(postal_code) => {
                warn!("Postal code {postal_code} has no matching country, ignoring it");
                continue;
            }
        };

        let country = country::validate(country)?;
        let center = postal_code
            .map(|x| nominatim::geocode(agent, &cli.geocoder_url, x, &country))
            .transpose()?;
        sessions.push(Session {
            scope: Scope::new(center, cli.radius),
            country,
        });
    }
    Ok(sessions)
}

//! lattice CLI - Forge and relate celestial bodies
//!
//! A thin wrapper over the orbital_lattice library. Bodies are printed as
//! JSON on stdout; diagnostics go to stderr.

// Exclude from coverage - CLI binary tested via integration tests
#![cfg_attr(tarpaulin, ignore)]

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use orbital_lattice::core::DEFAULT_CONFIG_FILE;
use orbital_lattice::{ConstellationExport, Lattice, LatticeConfig};

/// 🌌 Orbital Lattice: celestial signatures for content hashes
#[derive(Parser, Debug)]
#[command(name = "lattice")]
#[command(version = orbital_lattice::VERSION)]
#[command(about = "🌌 Orbital Lattice: forge celestial bodies from content hashes")]
#[command(after_help = "EXAMPLES:
  # Forge a single body
  lattice forge --cid my-fn --soul bafkreif4010000a00f0000 --eigen 0.9,0.4

  # Build an export from a list of {cid, soul, eigenvalues}
  lattice export --input souls.json -o constellation.json

  # Re-forge an export and summarise it
  lattice import constellation.json

  # Stream the strongest part of the gravitational field
  lattice field constellation.json --limit 20
")]
struct Cli {
    /// Config file path (default: ./.lattice.json if present)
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Report progress on stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Forge one body and print it as JSON
    Forge {
        /// Content identifier
        #[arg(long)]
        cid: String,
        /// Soul hash (optionally prefixed with bafkrei, Qm or phash:)
        #[arg(long)]
        soul: String,
        /// Comma-separated eigenvalues
        #[arg(long = "eigen", value_delimiter = ',', num_args = 1.., required = true)]
        eigenvalues: Vec<f64>,
    },

    /// Build an export file from a list of souls
    Export {
        /// JSON array of {cid, soul, eigenvalues}
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output file path (default: stdout)
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Re-forge an export and print its census
    Import {
        /// Export file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Stream pairwise pulls of an export, one JSON object per line
    Field {
        /// Export file
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Stop after this many pairs
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print the five Lagrange points of a soul
    Lagrange {
        /// Soul hash
        #[arg(long)]
        soul: String,
    },
}

/// One line of an `export --input` file
#[derive(Debug, Serialize, Deserialize)]
struct SoulSpec {
    cid: String,
    soul: String,
    eigenvalues: Vec<f64>,
}

fn load_config(explicit: Option<&Path>, verbose: bool) -> anyhow::Result<LatticeConfig> {
    if let Some(path) = explicit {
        return LatticeConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()));
    }

    let default_config = Path::new(DEFAULT_CONFIG_FILE);
    if verbose && !default_config.exists() {
        eprintln!("[lattice] no {} found, using defaults", DEFAULT_CONFIG_FILE);
    }
    match LatticeConfig::load_from_file(default_config) {
        Ok(config) => Ok(config),
        Err(e) => {
            eprintln!("Warning: Could not load config file: {}", e);
            Ok(LatticeConfig::default())
        }
    }
}

fn write_output(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{}", content),
    }
    Ok(())
}

fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref(), cli.verbose)?;
    let lattice = Lattice::new(config)?;

    match cli.command {
        Command::Forge {
            cid,
            soul,
            eigenvalues,
        } => {
            let body = lattice.forge(cid, soul, &eigenvalues)?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }

        Command::Export { input, output } => {
            let content = std::fs::read_to_string(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let specs: Vec<SoulSpec> = serde_json::from_str(&content)
                .with_context(|| format!("parsing {}", input.display()))?;

            let bodies = specs
                .iter()
                .map(|spec| {
                    lattice
                        .forge(spec.cid.as_str(), spec.soul.as_str(), &spec.eigenvalues)
                        .with_context(|| format!("forging {}", spec.cid))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;

            if cli.verbose {
                eprintln!("[lattice] forged {} bodies", bodies.len());
            }
            write_output(output.as_deref(), &lattice.export(&bodies).to_json()?)?;
        }

        Command::Import { file } => {
            let export = ConstellationExport::load_from_file(&file)?;
            let report = export.import(lattice.factory())?;
            for drifted in &report.drifted {
                eprintln!(
                    "Warning: {} (entry {}) drifted from its export; re-forged",
                    drifted.cid, drifted.index
                );
            }
            let census = lattice.constellation(&report.bodies).census();
            println!("{}", serde_json::to_string_pretty(&census)?);
        }

        Command::Field { file, limit } => {
            let export = ConstellationExport::load_from_file(&file)?;
            let bodies = lattice.import(&export)?;
            let field = lattice.constellation(&bodies).field();
            let total = field.len();
            let take = limit.unwrap_or(total);

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            for pair in field.take(take) {
                writeln!(out, "{}", serde_json::to_string(&pair)?)?;
            }

            if cli.verbose {
                eprintln!("[lattice] streamed {} of {} pairs", take.min(total), total);
            }
        }

        Command::Lagrange { soul } => {
            let body = lattice.forge("lagrange-primary", soul, &[0.0])?;
            let points = lattice.gravity().find_lagrange_points(&body);
            println!("{}", serde_json::to_string_pretty(&points)?);
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = execute(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

//! jetcorr CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod run;

#[derive(Parser)]
#[command(name = "jetcorr")]
#[command(about = "jetcorr - Energy-Energy Correlator analysis for jet substructure")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a deterministic toy jet sample
    Simulate {
        /// Number of jets to generate
        #[arg(long, default_value = "500")]
        events: usize,

        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Output Parquet file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Compute the EEC spectrum: load, pad, select, correlate, plot
    Eec {
        /// Input jet table (Parquet, schema jetcorr_jets_v1)
        #[arg(short, long)]
        input: PathBuf,

        /// Analysis configuration (JSON). Flags below override its values.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Lower jet pt bound (GeV, exclusive)
        #[arg(long)]
        min_jet_pt: Option<f64>,

        /// Upper jet pt bound (GeV, exclusive)
        #[arg(long)]
        max_jet_pt: Option<f64>,

        /// Constituent pt threshold (GeV, strict)
        #[arg(long)]
        min_particle_pt: Option<f64>,

        /// Lower jet eta bound (exclusive)
        #[arg(long)]
        min_jet_eta: Option<f64>,

        /// Upper jet eta bound (exclusive)
        #[arg(long)]
        max_jet_eta: Option<f64>,

        /// Number of histogram bins
        #[arg(long)]
        bins: Option<usize>,

        /// Lower edge of the log axis
        #[arg(long)]
        axis_min: Option<f64>,

        /// Upper edge of the log axis
        #[arg(long)]
        axis_max: Option<f64>,

        /// Output SVG plot
        #[arg(short, long)]
        output: PathBuf,

        /// Also write the spectrum artifact (JSON)
        #[arg(long)]
        artifact: Option<PathBuf>,

        /// Write the JSON summary here instead of stdout
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Threads (0 = auto)
        #[arg(long, default_value = "0")]
        threads: usize,
    },

    /// Render a previously saved spectrum artifact
    Viz {
        /// Spectrum artifact (JSON)
        #[arg(short, long)]
        artifact: PathBuf,

        /// Output SVG plot
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Simulate { events, seed, output } => run::cmd_simulate(events, seed, &output),
        Commands::Eec {
            input,
            config,
            min_jet_pt,
            max_jet_pt,
            min_particle_pt,
            min_jet_eta,
            max_jet_eta,
            bins,
            axis_min,
            axis_max,
            output,
            artifact,
            summary,
            threads,
        } => {
            let overrides = run::CutOverrides {
                min_jet_pt,
                max_jet_pt,
                min_particle_pt,
                min_jet_eta,
                max_jet_eta,
                bins,
                axis_min,
                axis_max,
            };
            run::cmd_eec(
                &input,
                config.as_deref(),
                &overrides,
                &output,
                artifact.as_deref(),
                summary.as_deref(),
                threads,
            )
        }
        Commands::Viz { artifact, output } => run::cmd_viz(&artifact, &output),
    }
}

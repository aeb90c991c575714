use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;
mod config;
mod error;

use config::Config;
use error::{format_error_with_suggestions, CliError};

#[derive(Parser)]
#[command(name = "genotrack")]
#[command(about = "GenoTrack - sequence and transcript track renderer")]
#[command(version)]
#[command(long_about = "
GenoTrack draws a reference sequence and its transcripts as scale-accurate
tracks for a chosen genomic window.

Examples:
  genotrack render --fasta ref.fa --gtf genes.gtf --range 1,000-1,080 -o view.svg
  genotrack render --gtf genes.gtf --range 150-450 -o view.json
  genotrack info --fasta ref.fa --gtf genes.gtf
  genotrack config --example > genotrack.toml
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the sequence and transcript tracks to SVG or JSON
    Render(RenderArgs),

    /// Summarize sequences and transcripts in the input files
    Info {
        /// Reference sequence file (FASTA, optionally .gz)
        #[arg(long)]
        fasta: Option<PathBuf>,

        /// Annotation file (GTF, optionally .gz)
        #[arg(long)]
        gtf: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show or write the configuration
    Config {
        /// Print an example genotrack.toml with every default
        #[arg(long)]
        example: bool,

        /// Write the effective configuration to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Reference sequence file (FASTA, optionally .gz)
    #[arg(long)]
    pub fasta: Option<PathBuf>,

    /// Annotation file (GTF, optionally .gz)
    #[arg(long)]
    pub gtf: Option<PathBuf>,

    /// Genomic window, 1-based inclusive (e.g. '150-450' or '1,000..1,100')
    #[arg(short, long)]
    pub range: Option<String>,

    /// Sequence to draw (defaults to the annotation's sequence, then the first FASTA record)
    #[arg(long)]
    pub sequence_id: Option<String>,

    /// Output file
    #[arg(short, long, required = true)]
    pub output: PathBuf,

    /// Output format (auto-detected from extension)
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Canvas width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Font size for bases and axis labels
    #[arg(long)]
    pub font_size: Option<f64>,

    /// Widest window (end - start) drawn base by base
    #[arg(long)]
    pub per_base_limit: Option<u64>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    Svg,
    Json,
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Render(args) => {
            commands::render::execute(&config, args)?;
        }

        Commands::Info { fasta, gtf, json } => {
            commands::info::execute(fasta, gtf, json)?;
        }

        Commands::Config { example, output } => {
            let effective = if example { Config::default() } else { config };
            match output {
                Some(path) => {
                    effective.save_to_file(&path)?;
                    log::info!("Wrote configuration to {}", path.display());
                }
                None if example => print!("{}", Config::example_toml()?),
                None => print!("{}", effective.to_toml()?),
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    if let Err(err) = run(cli) {
        if let Some(cli_err) = err.downcast_ref::<CliError>() {
            eprintln!("Error: {}", format_error_with_suggestions(cli_err));
            std::process::exit(1);
        }
        return Err(err);
    }
    Ok(())
}

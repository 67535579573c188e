use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use bnstide::batch::{LambdaPoint, LambdaSample, evaluate_lambda_batch};
use bnstide::config::AnalysisConfig;
use bnstide::output::{OutputFormat, PhaseRow, Record, SampleSummary};
use bnstide::tides::{BinaryLoveMode, MassPair, dissipative_phase, eos_scatter, lambda_a_fit};

#[derive(Parser, Debug)]
#[command(name = "bnstide")]
#[command(about = "Dissipative tidal phase and Binary Love conversions for BNS analyses")]
struct Args {
    /// TOML analysis configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format: text, csv, json
    #[arg(short = 'f', long, value_enum, default_value = "text", global = true)]
    format: OutputFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Dissipative tidal phase on the configured grid or explicit frequencies
    Phase {
        /// Comma-separated frequencies in Hz (default: configured grid)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        frequencies: Option<Vec<f64>>,

        /// Primary mass in solar masses (default: injection)
        #[arg(long)]
        mass_1: Option<f64>,

        /// Secondary mass in solar masses (default: injection)
        #[arg(long)]
        mass_2: Option<f64>,

        /// Dissipative tidal parameter (default: injection)
        #[arg(long, allow_hyphen_values = true)]
        xi_tilde: Option<f64>,

        /// Only print frequencies at or above the waveform minimum frequency
        #[arg(long)]
        above_minimum: bool,
    },

    /// Convert lambda_s to component tidal deformabilities
    Lambdas {
        /// Symmetric tidal deformability (default: injection)
        #[arg(long)]
        lambda_s: Option<f64>,

        /// Mass ratio m2/m1 in (0, 1] (default: from injection masses)
        #[arg(short = 'q', long)]
        mass_ratio: Option<f64>,

        /// Fit only or fit plus EOS-scatter draw (default: configured mode)
        #[arg(short, long, value_enum)]
        mode: Option<BinaryLoveMode>,

        /// Seed for the EOS-scatter draws
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of conversions to draw
        #[arg(short = 'n', long, default_value_t = 1)]
        samples: usize,

        /// Worker threads (default: configured workers)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Print summary statistics instead of individual samples
        #[arg(long)]
        summary: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &args.config {
        Some(path) => AnalysisConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    let verbose = args.verbose > 0;

    match args.command {
        Command::Phase {
            frequencies,
            mass_1,
            mass_2,
            xi_tilde,
            above_minimum,
        } => {
            let injection = &config.injection;
            let masses = MassPair::new(
                mass_1.unwrap_or(injection.binary.mass_1),
                mass_2.unwrap_or(injection.binary.mass_2),
            )?;
            let xi_tilde = xi_tilde.or(injection.xi_tilde).unwrap_or(0.0);
            let frequencies = frequencies.unwrap_or_else(|| config.grid.frequencies());
            log::info!(
                "phase: {} frequencies, m1={:.4}, m2={:.4}, xi_tilde={}",
                frequencies.len(),
                masses.mass_1(),
                masses.mass_2(),
                xi_tilde
            );

            let phase = dissipative_phase(&frequencies, &masses, xi_tilde)
                .context("Dissipative phase failed")?;

            let rows = frequencies
                .iter()
                .zip(&phase)
                .filter(|(f, _)| !above_minimum || **f >= config.waveform.minimum_frequency)
                .map(|(&frequency, &phase)| PhaseRow { frequency, phase });
            print_records(args.format, rows, verbose);
        }
        Command::Lambdas {
            lambda_s,
            mass_ratio,
            mode,
            seed,
            samples,
            workers,
            summary,
        } => {
            let lambda_s = lambda_s.unwrap_or(config.injection.lambda_s);
            let mass_ratio = match mass_ratio {
                Some(q) => q,
                None => config.injection.binary.masses()?.mass_ratio(),
            };
            let mode = mode.unwrap_or(config.binary_love.mode);
            let seed = seed.or(config.binary_love.seed);
            let workers = workers.unwrap_or(config.batch.workers);

            let point = LambdaPoint {
                lambda_s,
                mass_ratio,
            };
            let points = vec![point; samples];
            let results = evaluate_lambda_batch(&points, mode, workers, seed)
                .context("Binary Love conversion failed")?;

            if summary {
                print_summary(lambda_s, mass_ratio, mode, &results)?;
            } else {
                print_records(args.format, results.iter().copied(), verbose);
            }
        }
        Command::Config => {
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}

fn print_records<R: Record>(format: OutputFormat, records: impl Iterator<Item = R>, verbose: bool) {
    if let Some(header) = format.header::<R>() {
        println!("{}", header);
    }
    for record in records {
        println!("{}", format.format(&record, verbose));
    }
}

fn print_summary(
    lambda_s: f64,
    mass_ratio: f64,
    mode: BinaryLoveMode,
    results: &[LambdaSample],
) -> Result<()> {
    let fit = lambda_a_fit(lambda_s, mass_ratio)?;
    let scatter = eos_scatter(lambda_s, mass_ratio)?;

    println!("lambda_s = {:.3}, q = {:.4}, mode = {:?}", lambda_s, mass_ratio, mode);
    println!("fit lambda_a = {:.4}", fit);
    if mode == BinaryLoveMode::Marginalized {
        println!(
            "expected lambda_a = {:.4} +/- {:.4}",
            fit + scatter.mean,
            scatter.std_dev
        );
    }

    let columns: [(&str, fn(&LambdaSample) -> f64); 3] = [
        ("lambda_a", |s| s.lambda_a),
        ("lambda_1", |s| s.lambda_1),
        ("lambda_2", |s| s.lambda_2),
    ];
    for (name, column) in columns {
        if let Some(stats) = SampleSummary::from_values(results.iter().map(column)) {
            println!(
                "{:<9} n={} mean={:.4} std={:.4} min={:.4} max={:.4}",
                name, stats.count, stats.mean, stats.std_dev, stats.min, stats.max
            );
        }
    }
    Ok(())
}

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use bnstide::batch::{LambdaPoint, evaluate_lambda_batch};
use bnstide::output::{OutputFormat, Record, SampleSummary};
use bnstide::tides::{BinaryLoveMode, eos_scatter, lambda_a_fit};

#[derive(Parser, Debug)]
#[command(name = "love_scatter")]
#[command(about = "Compare marginalized Binary Love draws against the analytic EOS scatter")]
struct Args {
    /// lambda_s values: comma-separated (e.g., "100,400,800") or range (e.g., "100-1000:100")
    #[arg(short, long, default_value = "100,200,400,800,1600")]
    lambda_s: String,

    /// Mass ratios: comma-separated or range
    #[arg(short, long, default_value = "0.6,0.7,0.8,0.9,1.0")]
    mass_ratios: String,

    /// Draws per grid point
    #[arg(short = 'n', long, default_value_t = 10_000)]
    samples: usize,

    /// Base seed for reproducibility
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Worker threads
    #[arg(short, long, default_value_t = 4)]
    workers: usize,

    /// Output format: text, csv, json
    #[arg(short = 'f', long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Serialize)]
struct ScatterRow {
    lambda_s: f64,
    mass_ratio: f64,
    fit: f64,
    mu_r: f64,
    sigma_r: f64,
    mean: f64,
    std_dev: f64,
    /// (mean - mu_r) in units of the standard error
    pull: f64,
}

impl Record for ScatterRow {
    const CSV_HEADER: &'static str = "lambda_s,mass_ratio,fit,mu_r,sigma_r,mean,std_dev,pull";

    fn csv_fields(&self) -> Vec<String> {
        [
            self.lambda_s,
            self.mass_ratio,
            self.fit,
            self.mu_r,
            self.sigma_r,
            self.mean,
            self.std_dev,
            self.pull,
        ]
        .iter()
        .map(|v| format!("{:.4}", v))
        .collect()
    }

    fn text(&self, verbose: bool) -> String {
        let line = format!(
            "lambda_s: {:>7.1}  q: {:.3}  mu_r: {:>7.3} (emp {:>7.3})  sigma_r: {:>7.3} (emp {:>7.3})",
            self.lambda_s, self.mass_ratio, self.mu_r, self.mean, self.sigma_r, self.std_dev
        );
        if verbose {
            format!("{line}  fit: {:>8.3}  pull: {:+.2}", self.fit, self.pull)
        } else {
            line
        }
    }
}

fn parse_values(s: &str) -> Result<Vec<f64>> {
    if let Some((range, step)) = s.split_once(':') {
        let step: f64 = step.trim().parse().context("Invalid step value")?;
        if !(step > 0.0 && step.is_finite()) {
            anyhow::bail!("Step must be positive");
        }
        let (start, end) = range
            .split_once('-')
            .context("Invalid range format. Use 'start-end:step'")?;
        let start: f64 = start.trim().parse().context("Invalid start value")?;
        let end: f64 = end.trim().parse().context("Invalid end value")?;
        if !(start.is_finite() && end >= start && end.is_finite()) {
            anyhow::bail!("Range end must not be below start");
        }

        let count = ((end - start) / step + 1e-9).floor() as usize + 1;
        Ok((0..count).map(|k| start + k as f64 * step).collect())
    } else {
        s.split(',')
            .map(|p| p.trim().parse::<f64>().context("Invalid value"))
            .collect()
    }
}

fn scatter_row(
    lambda_s: f64,
    mass_ratio: f64,
    samples: usize,
    workers: usize,
    seed: u64,
) -> Result<Option<ScatterRow>> {
    let fit = lambda_a_fit(lambda_s, mass_ratio)?;
    let scatter = eos_scatter(lambda_s, mass_ratio)?;

    let points = vec![
        LambdaPoint {
            lambda_s,
            mass_ratio,
        };
        samples
    ];
    let draws = evaluate_lambda_batch(&points, BinaryLoveMode::Marginalized, workers, Some(seed))?;
    let Some(stats) = SampleSummary::from_values(draws.iter().map(|d| d.lambda_a - fit)) else {
        return Ok(None);
    };

    let standard_error = scatter.std_dev / (stats.count as f64).sqrt();
    Ok(Some(ScatterRow {
        lambda_s,
        mass_ratio,
        fit,
        mu_r: scatter.mean,
        sigma_r: scatter.std_dev,
        mean: stats.mean,
        std_dev: stats.std_dev,
        pull: (stats.mean - scatter.mean) / standard_error,
    }))
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

    let lambda_s_values = parse_values(&args.lambda_s).context("Invalid --lambda-s")?;
    let mass_ratios = parse_values(&args.mass_ratios).context("Invalid --mass-ratios")?;

    if let Some(header) = args.format.header::<ScatterRow>() {
        println!("{}", header);
    }

    let mut grid_index = 0u64;
    for &lambda_s in &lambda_s_values {
        for &mass_ratio in &mass_ratios {
            let seed = args.seed.wrapping_add(grid_index * args.workers as u64);
            grid_index += 1;

            let row = scatter_row(lambda_s, mass_ratio, args.samples, args.workers, seed)
                .with_context(|| format!("lambda_s={lambda_s}, q={mass_ratio}"))?;
            match row {
                Some(row) => {
                    if row.pull.abs() > 3.0 {
                        log::warn!(
                            "lambda_s={lambda_s}, q={mass_ratio}: empirical mean is {:.1} standard errors from mu_r",
                            row.pull
                        );
                    }
                    println!("{}", args.format.format(&row, args.verbose > 0));
                }
                None => log::warn!("no samples requested"),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_values("100, 200,400").unwrap(), vec![100.0, 200.0, 400.0]);
        assert!(parse_values("100,abc").is_err());
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(
            parse_values("100-400:100").unwrap(),
            vec![100.0, 200.0, 300.0, 400.0]
        );
        assert!(parse_values("100-400:0").is_err());
        assert!(parse_values("100:10").is_err());
    }

    #[test]
    fn test_parse_reversed_range() {
        assert!(parse_values("400-100:100").is_err());
        assert_eq!(parse_values("250-250:50").unwrap(), vec![250.0]);
    }
}

mod csv;
mod json;
mod text;

use rolling_stats::Stats;
use serde::Serialize;

use crate::batch::LambdaSample;
use crate::tides::phase_factor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// A row that can be written in every output format
pub trait Record: Serialize {
    const CSV_HEADER: &'static str;

    fn csv_fields(&self) -> Vec<String>;

    fn text(&self, verbose: bool) -> String;
}

impl OutputFormat {
    pub fn header<R: Record>(self) -> Option<&'static str> {
        match self {
            OutputFormat::Csv => Some(R::CSV_HEADER),
            OutputFormat::Text | OutputFormat::Json => None,
        }
    }

    pub fn format<R: Record>(self, record: &R, verbose: bool) -> String {
        match self {
            OutputFormat::Text => text::format(record, verbose),
            OutputFormat::Json => json::format(record),
            OutputFormat::Csv => csv::format(record),
        }
    }
}

/// Dissipative phase at one frequency
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseRow {
    pub frequency: f64,
    pub phase: f64,
}

impl Record for PhaseRow {
    const CSV_HEADER: &'static str = "frequency,phase";

    fn csv_fields(&self) -> Vec<String> {
        vec![format!("{}", self.frequency), format!("{:e}", self.phase)]
    }

    fn text(&self, verbose: bool) -> String {
        if verbose {
            let factor = phase_factor(self.phase);
            format!(
                "f: {:>10.4} Hz  dphi: {:>+14.6e} rad  exp(-i dphi): {:+.6} {:+.6}i",
                self.frequency, self.phase, factor.re, factor.im
            )
        } else {
            format!("f: {:>10.4} Hz  dphi: {:>+14.6e} rad", self.frequency, self.phase)
        }
    }
}

impl Record for LambdaSample {
    const CSV_HEADER: &'static str = "lambda_s,mass_ratio,lambda_a,lambda_1,lambda_2";

    fn csv_fields(&self) -> Vec<String> {
        [
            self.lambda_s,
            self.mass_ratio,
            self.lambda_a,
            self.lambda_1,
            self.lambda_2,
        ]
        .iter()
        .map(|v| format!("{:.6}", v))
        .collect()
    }

    fn text(&self, verbose: bool) -> String {
        if verbose {
            format!(
                "lambda_s: {:>9.3}  q: {:.4}  lambda_a: {:>9.3}  lambda_1: {:>9.3}  lambda_2: {:>9.3}",
                self.lambda_s, self.mass_ratio, self.lambda_a, self.lambda_1, self.lambda_2
            )
        } else {
            format!(
                "lambda_1: {:>9.3}  lambda_2: {:>9.3}",
                self.lambda_1, self.lambda_2
            )
        }
    }
}

/// Summary statistics of a set of samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl SampleSummary {
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut stats: Stats<f64> = Stats::new();
        for value in values {
            stats.update(value);
        }
        Self::from_stats(&stats)
    }

    pub fn from_stats(stats: &Stats<f64>) -> Option<Self> {
        if stats.count == 0 {
            return None;
        }
        Some(Self {
            count: stats.count,
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: stats.min,
            max: stats.max,
        })
    }
}

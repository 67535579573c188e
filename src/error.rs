use thiserror::Error;

#[derive(Error, Debug)]
pub enum TideError {
    #[error("Invalid {parameter} = {value}: {reason}")]
    Domain {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Length mismatch: expected {expected} values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Waveform generator failed: {0}")]
    Waveform(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parameter point {index}: {source}")]
    AtPoint {
        index: usize,
        #[source]
        source: Box<TideError>,
    },
}

impl TideError {
    /// Attach the index of the parameter point that produced this error.
    pub fn at_point(self, index: usize) -> Self {
        TideError::AtPoint {
            index,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, TideError>;

/// Reject NaN and infinities.
pub(crate) fn ensure_finite(parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TideError::Domain {
            parameter,
            value,
            reason: "must be finite",
        })
    }
}

/// Reject values that are not strictly positive (or not finite).
pub(crate) fn ensure_positive(parameter: &'static str, value: f64) -> Result<f64> {
    ensure_finite(parameter, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(TideError::Domain {
            parameter,
            value,
            reason: "must be positive",
        })
    }
}

/// Reject negative values (and non-finite ones); zero is allowed.
pub(crate) fn ensure_non_negative(parameter: &'static str, value: f64) -> Result<f64> {
    ensure_finite(parameter, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(TideError::Domain {
            parameter,
            value,
            reason: "must not be negative",
        })
    }
}

pub(crate) fn ensure_same_len(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(TideError::ShapeMismatch { expected, actual })
    }
}

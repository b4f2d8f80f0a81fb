//!
//! Numerical parameters of model validation and inference
//!
use crate::distribution::DEFAULT_TOLERANCE;
use crate::error::{HmmError, Result};
use serde::{Deserialize, Serialize};

///
/// ModelParams
///
/// * `tolerance`: allowed `|sum - 1|` of emission distributions and of the
///   outgoing transition probabilities of each state.
/// * `tie_tolerance`: relative difference of two Viterbi log-scores under
///   which they are treated as tied (and the lower state index is kept).
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    pub tolerance: f64,
    pub tie_tolerance: f64,
}

impl ModelParams {
    pub fn new(tolerance: f64, tie_tolerance: f64) -> ModelParams {
        ModelParams {
            tolerance,
            tie_tolerance,
        }
    }
    /// Default tie tolerance with a custom sum tolerance
    pub fn with_tolerance(tolerance: f64) -> ModelParams {
        ModelParams {
            tolerance,
            ..ModelParams::default()
        }
    }
    ///
    /// Both tolerances must be finite and non-negative.
    ///
    pub fn check(&self) -> Result<()> {
        for (name, value) in [("tolerance", self.tolerance), ("tie_tolerance", self.tie_tolerance)] {
            if !value.is_finite() || value < 0.0 {
                return Err(HmmError::InvalidParams(format!("{} = {}", name, value)));
            }
        }
        Ok(())
    }
    /// Is `sum` close enough to one?
    pub fn is_normalized(&self, sum: f64) -> bool {
        (sum - 1.0).abs() <= self.tolerance
    }
    ///
    /// `candidate` beats `best` only if it is larger by more than the tie
    /// tolerance (relative to `max(1, |best|)`).
    ///
    pub fn is_strictly_better(&self, candidate: f64, best: f64) -> bool {
        if best == f64::NEG_INFINITY {
            return candidate > best;
        }
        candidate - best > self.tie_tolerance * best.abs().max(1.0)
    }
}

impl Default for ModelParams {
    fn default() -> ModelParams {
        ModelParams::new(DEFAULT_TOLERANCE, 1e-12)
    }
}

impl std::fmt::Display for ModelParams {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "tolerance: {}", self.tolerance)?;
        writeln!(f, "tie_tolerance: {}", self.tie_tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_normalized() {
        let params = ModelParams::default();
        assert!(params.is_normalized(1.0));
        assert!(params.is_normalized(1.0 + 1e-12));
        assert!(!params.is_normalized(0.99));
        assert!(ModelParams::with_tolerance(0.05).is_normalized(0.99));
    }

    #[test]
    fn params_tie_breaking() {
        let params = ModelParams::default();
        assert!(params.is_strictly_better(-1.0, -2.0));
        assert!(!params.is_strictly_better(-2.0, -1.0));
        // rounding-level difference is a tie
        assert!(!params.is_strictly_better(-3.0 + 1e-15, -3.0));
        assert!(params.is_strictly_better(-3.0, f64::NEG_INFINITY));
        assert!(!params.is_strictly_better(f64::NEG_INFINITY, f64::NEG_INFINITY));
    }

    #[test]
    fn params_check() {
        assert!(ModelParams::default().check().is_ok());
        assert!(ModelParams::new(0.0, 0.0).check().is_ok());
        assert!(matches!(
            ModelParams::new(f64::NAN, 1e-12).check(),
            Err(HmmError::InvalidParams(msg)) if msg.starts_with("tolerance")
        ));
        assert!(matches!(
            ModelParams::new(1e-9, -1.0).check(),
            Err(HmmError::InvalidParams(msg)) if msg.starts_with("tie_tolerance")
        ));
        assert!(ModelParams::new(f64::INFINITY, 1e-12).check().is_err());
    }

    #[test]
    fn params_serde() {
        let params = ModelParams::new(1e-6, 1e-10);
        let json = serde_json::to_string(&params).unwrap();
        let back: ModelParams = serde_json::from_str(&json).unwrap();
        assert_eq!(params, back);
        assert_eq!(params.to_string(), "tolerance: 0.000001\ntie_tolerance: 0.0000000001\n");
    }
}

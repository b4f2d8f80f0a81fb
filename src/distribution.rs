//!
//! Discrete emission distribution
//!
use crate::common::Symbol;
use crate::error::{HmmError, Result};
use crate::prob::Prob;
use fnv::FnvHashMap;

/// Default tolerance of `|sum(p) - 1|`
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

///
/// Immutable table `symbol -> probability` whose probabilities sum to one.
///
/// Symbols keep the order they were given in, so iteration (and the
/// serialized form) is deterministic.
///
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteDistribution<T: Symbol> {
    probs: FnvHashMap<T, f64>,
    symbols: Vec<T>,
}

impl<T: Symbol> DiscreteDistribution<T> {
    ///
    /// Create a distribution with the default tolerance (`1e-9`).
    ///
    pub fn new<I>(table: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        Self::with_tolerance(table, DEFAULT_TOLERANCE)
    }
    ///
    /// Create a distribution, allowing the total to deviate from 1 by at
    /// most `tolerance`.
    ///
    pub fn with_tolerance<I>(table: I, tolerance: f64) -> Result<Self>
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        let mut probs = FnvHashMap::default();
        let mut symbols = Vec::new();
        for (symbol, p) in table {
            if !p.is_finite() || p < 0.0 {
                return Err(HmmError::InvalidDistribution(format!(
                    "probability {} of {:?} is not a non-negative number",
                    p, symbol
                )));
            }
            if probs.insert(symbol.clone(), p).is_some() {
                return Err(HmmError::InvalidDistribution(format!(
                    "symbol {:?} appears more than once",
                    symbol
                )));
            }
            symbols.push(symbol);
        }
        let total: f64 = symbols.iter().map(|s| probs[s]).sum();
        if (total - 1.0).abs() > tolerance {
            return Err(HmmError::InvalidDistribution(format!(
                "probabilities sum to {}",
                total
            )));
        }
        Ok(DiscreteDistribution { probs, symbols })
    }
    ///
    /// Probability of emitting `symbol`.
    /// Symbols outside of the support have probability 0.
    ///
    pub fn probability(&self, symbol: &T) -> f64 {
        self.probs.get(symbol).copied().unwrap_or(0.0)
    }
    ///
    /// `probability` in log space
    ///
    pub fn log_probability(&self, symbol: &T) -> Prob {
        Prob::from_prob(self.probability(symbol))
    }
    /// Symbols in the given order
    pub fn symbols(&self) -> &[T] {
        &self.symbols
    }
    /// Iterate `(symbol, probability)` in the given order
    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> + '_ {
        self.symbols.iter().map(move |s| (s, self.probs[s]))
    }
    /// Number of symbols (including ones with probability 0)
    pub fn len(&self) -> usize {
        self.symbols.len()
    }
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl<T: Symbol> std::fmt::Display for DiscreteDistribution<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (symbol, p)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}: {}", symbol, p)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn distribution_probability() {
        let d = DiscreteDistribution::new(vec![("yes", 0.1), ("no", 0.9)]).unwrap();
        assert_eq!(d.probability(&"yes"), 0.1);
        assert_eq!(d.probability(&"no"), 0.9);
        // outside of support
        assert_eq!(d.probability(&"maybe"), 0.0);
        assert!(d.log_probability(&"maybe").is_zero());
        assert_abs_diff_eq!(d.log_probability(&"no").to_value(), 0.9, epsilon = 1e-12);
        assert_eq!(d.symbols(), &["yes", "no"]);
        assert_eq!(d.len(), 2);
        assert_eq!(d.to_string(), r#"{"yes": 0.1, "no": 0.9}"#);
    }

    #[test_case(vec![('a', 0.5), ('b', 0.4)] ; "sum below one")]
    #[test_case(vec![('a', 0.7), ('b', 0.4)] ; "sum above one")]
    #[test_case(vec![('a', 1.2), ('b', -0.2)] ; "negative entry")]
    #[test_case(vec![('a', f64::NAN), ('b', 1.0)] ; "nan entry")]
    #[test_case(vec![('a', 0.5), ('a', 0.5)] ; "repeated symbol")]
    #[test_case(vec![] ; "empty table")]
    fn distribution_invalid(table: Vec<(char, f64)>) {
        let r = DiscreteDistribution::new(table);
        assert!(matches!(r, Err(HmmError::InvalidDistribution(_))));
    }

    #[test]
    fn distribution_tolerance() {
        let table = vec![(0u8, 0.5), (1u8, 0.5000001)];
        assert!(DiscreteDistribution::new(table.clone()).is_err());
        assert!(DiscreteDistribution::with_tolerance(table, 1e-6).is_ok());
    }

    #[test]
    fn distribution_allows_zero_entries() {
        let d = DiscreteDistribution::new(vec![("x", 1.0), ("y", 0.0)]).unwrap();
        assert_eq!(d.len(), 2);
        assert!(d.log_probability(&"y").is_zero());
        assert!(d.log_probability(&"x").is_one());
    }
}

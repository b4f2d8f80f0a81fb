//!
//! Backward algorithm definitions
//!
use super::model::Model;
use super::table::LogTable;
use crate::common::Symbol;
use crate::error::Result;
use crate::prob::Prob;
use log::debug;
use ndarray::Array2;
use serde::Serialize;

///
/// Result of the backward algorithm.
///
/// `table[t][k]` = P(emits `y[t+1..=T]` (and is absorbed) | in state `k` at time `t`)
///
#[derive(Debug, Clone, Serialize)]
pub struct BackwardResult {
    table: LogTable,
    full_prob: Prob,
}

impl BackwardResult {
    pub fn table(&self) -> &LogTable {
        &self.table
    }
    pub fn n_emissions(&self) -> usize {
        self.table.n_rows() - 1
    }
    /// P(Y), read off `b_0[start]`
    pub fn full_prob(&self) -> Prob {
        self.full_prob
    }
    pub fn log_probability(&self) -> f64 {
        self.full_prob.to_log_value()
    }
    pub fn to_log_matrix(&self) -> Array2<f64> {
        self.table.to_log_matrix()
    }
    pub fn to_prob_matrix(&self) -> Array2<f64> {
        self.table.to_prob_matrix()
    }
}

impl<T: Symbol> Model<T> {
    ///
    /// Run Backward algorithm to the emissions
    ///
    /// ```text
    /// b_T[k] = 1 (or a_k,end if the model ends explicitly)  for emitting k
    /// b_t[k] = \sum_{l: childs of k} a_kl e_l(y_t+1) b_t+1[l]   (t = T-1..=0)
    /// ```
    ///
    pub fn backward(&self, emissions: &[T]) -> Result<BackwardResult> {
        self.check_emissions(emissions.len())?;
        let n = emissions.len();
        let mut table = LogTable::zero(n + 1, self.node_count());
        self.b_init(n, &mut table);
        for t in (0..n).rev() {
            self.b_step(t, &emissions[t], &mut table);
        }
        let full_prob = table[(0, self.start())];
        debug!(
            "backward: n_emissions={} log_probability={}",
            n,
            full_prob.to_log_value()
        );
        Ok(BackwardResult { table, full_prob })
    }
    fn b_init(&self, n: usize, table: &mut LogTable) {
        for (k, _) in self.emitting_states() {
            table[(n, k)] = if self.ends_explicitly() {
                self.trans_prob(k, self.end())
            } else {
                Prob::one()
            };
        }
        if n == 0 {
            table[(0, self.start())] = Prob::one();
        }
    }
    ///
    /// fill row `t` from row `t + 1`, where `emission` is `y_t+1`.
    ///
    fn b_step(&self, t: usize, emission: &T, table: &mut LogTable) {
        let emits: Vec<Prob> = self
            .states()
            .map(|(l, lw)| lw.emission(emission) * table[(t + 1, l)])
            .collect();
        for (k, _) in self.states() {
            if k == self.end() {
                continue;
            }
            table[(t, k)] = self
                .childs(k)
                .map(|(_, l, ew)| ew.trans_prob() * emits[l.index()])
                .sum();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hmm::mocks::{mock_ending, mock_random, mock_weather};

    #[test]
    fn backward_weather_table() {
        let m = mock_weather().unwrap();
        let r = m.backward(&["yes", "no", "yes"]).unwrap();
        let b = r.to_prob_matrix();
        assert_eq!(b.dim(), (4, 4));
        // t=3
        assert_eq!(b[[3, 0]], 1.0);
        assert_eq!(b[[3, 1]], 1.0);
        // t=2: Sunny 0.8*0.1 + 0.2*0.8, Rainy 0.4*0.1 + 0.6*0.8
        assert_abs_diff_eq!(b[[2, 0]], 0.24, epsilon = 1e-12);
        assert_abs_diff_eq!(b[[2, 1]], 0.52, epsilon = 1e-12);
        // t=1: Sunny 0.8*0.9*0.24 + 0.2*0.2*0.52, Rainy 0.4*0.9*0.24 + 0.6*0.2*0.52
        assert_abs_diff_eq!(b[[1, 0]], 0.1936, epsilon = 1e-12);
        assert_abs_diff_eq!(b[[1, 1]], 0.1488, epsilon = 1e-12);
        // start at t=0 is the likelihood
        assert_abs_diff_eq!(b[[0, 2]], 0.0692, epsilon = 1e-12);
        assert_abs_diff_eq!(r.full_prob().to_value(), 0.0692, epsilon = 1e-12);
    }

    #[test]
    fn backward_matches_forward() {
        let m = mock_weather().unwrap();
        for es in [
            vec!["yes"],
            vec!["no", "no", "yes"],
            vec!["yes", "yes", "no", "yes", "no"],
        ]
        .iter()
        {
            let f = m.forward(es).unwrap().log_probability();
            let b = m.backward(es).unwrap().log_probability();
            assert_abs_diff_eq!(f, b, epsilon = 1e-9);
        }
        let m = mock_ending().unwrap();
        let b = m.backward(&['x', 'x']).unwrap();
        assert_abs_diff_eq!(b.full_prob().to_value(), 0.25, epsilon = 1e-12);

        let m = mock_random(5, 4, 3).unwrap();
        let es = m.sample_seeded(20, 7).unwrap().to_sequence();
        let f = m.forward(&es).unwrap().log_probability();
        let b = m.backward(&es).unwrap().log_probability();
        assert_abs_diff_eq!(f, b, epsilon = 1e-8);
    }

    #[test]
    fn backward_empty_and_impossible() {
        let m = mock_weather().unwrap();
        let r = m.backward(&[]).unwrap();
        assert_eq!(r.n_emissions(), 0);
        assert_eq!(r.log_probability(), 0.0);
        let r = m.backward(&["yes", "hail"]).unwrap();
        assert_eq!(r.log_probability(), f64::NEG_INFINITY);
    }
}

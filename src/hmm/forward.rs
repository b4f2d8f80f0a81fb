//!
//! Forward algorithm definitions
//!
use super::model::Model;
use super::table::LogTable;
use crate::common::Symbol;
use crate::error::Result;
use crate::prob::Prob;
use log::{debug, info};
use ndarray::Array2;
use serde::Serialize;

///
/// Result of the forward algorithm.
///
/// `table[t][k]` = P(emits `y[1..=t]` and is in state `k` at time `t`)
/// for `t = 0..=T`. Row 0 is the state before any observation.
///
/// Serializes to `{"table": [[..], ..], "full_prob": ".."}` with
/// probabilities in the string form of `Prob`.
///
#[derive(Debug, Clone, Serialize)]
pub struct ForwardResult {
    table: LogTable,
    full_prob: Prob,
}

impl ForwardResult {
    pub fn table(&self) -> &LogTable {
        &self.table
    }
    /// The number of emissions (`T`)
    pub fn n_emissions(&self) -> usize {
        self.table.n_rows() - 1
    }
    /// P(Y) summed over all paths
    pub fn full_prob(&self) -> Prob {
        self.full_prob
    }
    /// log P(Y)
    pub fn log_probability(&self) -> f64 {
        self.full_prob.to_log_value()
    }
    /// `(T+1) x (N+2)` log-probability matrix
    pub fn to_log_matrix(&self) -> Array2<f64> {
        self.table.to_log_matrix()
    }
    /// `(T+1) x (N+2)` probability matrix
    pub fn to_prob_matrix(&self) -> Array2<f64> {
        self.table.to_prob_matrix()
    }
}

impl<T: Symbol> Model<T> {
    ///
    /// Run Forward algorithm to the emissions
    ///
    /// ```text
    /// f_0[start] = 1, f_0[k] = 0 (k != start)
    /// f_t[k] = e_k(y_t) \sum_{l: parents of k} a_lk f_t-1[l]   (t = 1..=T)
    /// ```
    ///
    /// start/end never emit, so their columns are 0 for `t >= 1`.
    ///
    pub fn forward(&self, emissions: &[T]) -> Result<ForwardResult> {
        self.check_emissions(emissions.len())?;
        let mut table = LogTable::zero(emissions.len() + 1, self.node_count());
        self.f_init(&mut table);
        for (i, emission) in emissions.iter().enumerate() {
            self.f_step(i + 1, emission, &mut table);
        }
        let full_prob = self.f_full_prob(&table);
        if full_prob.is_zero() {
            info!(
                "forward: emissions of length {} are impossible under {}",
                emissions.len(),
                self.name()
            );
        }
        debug!(
            "forward: n_emissions={} log_probability={}",
            emissions.len(),
            full_prob.to_log_value()
        );
        Ok(ForwardResult { table, full_prob })
    }
    ///
    /// Log-likelihood `log P(Y)` of the emissions over all paths.
    ///
    /// * empty emissions: `0.0`
    /// * impossible emissions: `-inf`
    ///
    pub fn log_probability(&self, emissions: &[T]) -> Result<f64> {
        Ok(self.forward(emissions)?.log_probability())
    }
    ///
    /// Likelihood `P(Y)` in linear space
    ///
    pub fn probability(&self, emissions: &[T]) -> Result<f64> {
        Ok(self.forward(emissions)?.full_prob().to_value())
    }
    fn f_init(&self, table: &mut LogTable) {
        table[(0, self.start())] = Prob::one();
    }
    ///
    /// fill row `t` from row `t - 1`, for the emission `y_t`
    ///
    fn f_step(&self, t: usize, emission: &T, table: &mut LogTable) {
        for (k, kw) in self.emitting_states() {
            let p_emit = kw.emission(emission);
            if p_emit.is_zero() {
                continue;
            }
            let from_parents: Prob = self
                .parents(k)
                .map(|(_, l, ew)| ew.trans_prob() * table[(t - 1, l)])
                .sum();
            table[(t, k)] = p_emit * from_parents;
        }
    }
    ///
    /// `P(Y)` from the last row.
    ///
    /// ```text
    /// P(Y) = \sum_k f_T[k]          (no transitions into end)
    ///      = \sum_k f_T[k] a_k,end  (otherwise)
    /// ```
    fn f_full_prob(&self, table: &LogTable) -> Prob {
        let last = table.n_rows() - 1;
        if last == 0 {
            return Prob::one();
        }
        if !self.ends_explicitly() {
            // start/end columns are zero after the first emission
            return table.row_sum(last);
        }
        self.emitting_states()
            .map(|(k, _)| table[(last, k)] * self.trans_prob(k, self.end()))
            .sum()
    }
}

//
// Tests
//

//!
//! Posterior state probabilities from the result of Forward/Backward.
//!
//! - **State prob** (for each time and each state)
//!     `γ_t[k] = P(in state k at time t | Y) = f_t[k] b_t[k] / P(Y)`
//!
//! - **State freq** (for each state)
//!     The expected usage frequency of each state while emitting `Y`,
//!     that is the sum of state probs over time.
//!
use super::backward::BackwardResult;
use super::forward::ForwardResult;
use super::model::Model;
use super::table::LogTable;
use crate::common::Symbol;
use crate::error::{HmmError, Result};
use crate::prob::Prob;
use log::info;
use ndarray::Array1;
use petgraph::graph::NodeIndex;
use serde::Serialize;

///
/// `T x (N+2)` table of posterior state probabilities.
/// Row `i` is the time `t = i + 1`, i.e. the `i`-th emission.
///
#[derive(Debug, Clone, Serialize)]
pub struct Posterior {
    table: LogTable,
    full_prob: Prob,
}

impl Posterior {
    ///
    /// Combine forward and backward results of the same emissions.
    ///
    /// Fails with `MismatchedTables` if the two tables differ in shape.
    ///
    pub fn new(forward: &ForwardResult, backward: &BackwardResult) -> Result<Self> {
        let shape = |t: &LogTable| (t.n_rows(), t.n_states());
        if shape(forward.table()) != shape(backward.table()) {
            return Err(HmmError::MismatchedTables {
                forward: shape(forward.table()),
                backward: shape(backward.table()),
            });
        }
        let n = forward.n_emissions();
        let full_prob = forward.full_prob();
        let n_states = forward.table().n_states();
        let mut table = LogTable::zero(n, n_states);
        if !full_prob.is_zero() {
            for t in 1..=n {
                for k in 0..n_states {
                    let k = NodeIndex::new(k);
                    table[(t - 1, k)] =
                        forward.table()[(t, k)] * backward.table()[(t, k)] / full_prob;
                }
            }
        }
        Ok(Posterior { table, full_prob })
    }
    pub fn table(&self) -> &LogTable {
        &self.table
    }
    pub fn n_emissions(&self) -> usize {
        self.table.n_rows()
    }
    pub fn full_prob(&self) -> Prob {
        self.full_prob
    }
    ///
    /// `P(in state k when emitting the i-th symbol | Y)` (0-origin `i`)
    ///
    pub fn state_prob(&self, i: usize, k: NodeIndex) -> Prob {
        self.table[(i, k)]
    }
    ///
    /// Expected number of emissions made by each state
    ///
    pub fn state_frequencies(&self) -> Array1<f64> {
        self.table.to_prob_matrix().sum_axis(ndarray::Axis(0))
    }
    ///
    /// The most probable state of each position (lowest index wins ties).
    /// Empty if `P(Y) = 0`.
    ///
    pub fn decode(&self) -> Vec<NodeIndex> {
        if self.full_prob.is_zero() {
            return Vec::new();
        }
        (0..self.n_emissions())
            .map(|i| {
                let row = self.table.row(i);
                let mut best = 0;
                for (k, &p) in row.iter().enumerate() {
                    if p > row[best] {
                        best = k;
                    }
                }
                NodeIndex::new(best)
            })
            .collect()
    }
}

impl<T: Symbol> Model<T> {
    ///
    /// Posterior state probabilities of the emissions.
    ///
    pub fn posterior(&self, emissions: &[T]) -> Result<Posterior> {
        let forward = self.forward(emissions)?;
        let backward = self.backward(emissions)?;
        let posterior = Posterior::new(&forward, &backward)?;
        if posterior.full_prob().is_zero() && !emissions.is_empty() {
            info!("posterior: impossible emissions, all posteriors are zero");
        }
        Ok(posterior)
    }
    ///
    /// Posterior (maximum a posteriori per position) decoding.
    /// Returns one emitting state per emission, or an empty vec if the
    /// emissions are impossible.
    ///
    pub fn posterior_decode(&self, emissions: &[T]) -> Result<Vec<NodeIndex>> {
        Ok(self.posterior(emissions)?.decode())
    }
}

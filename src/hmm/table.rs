//!
//! Table definitions
//!
//! ## LogTable
//!
//! the prob assigned for each (time, state)
//!
//! F[t][state] or B[t][state] or V[t][state]
//!
use crate::prob::Prob;
use ndarray::{Array2, ArrayView1, Axis};
use petgraph::graph::NodeIndex;
use serde::{Serialize, Serializer};
use std::ops::{Index, IndexMut};

///
/// `(n_rows) x (n_states)` matrix of log probabilities.
/// Row is a time step, column is a state index.
///
#[derive(Debug, Clone, PartialEq)]
pub struct LogTable(Array2<Prob>);

impl LogTable {
    ///
    /// table filled with `p = 0`
    ///
    pub fn zero(n_rows: usize, n_states: usize) -> Self {
        LogTable(Array2::zeros((n_rows, n_states)))
    }
    pub fn n_rows(&self) -> usize {
        self.0.nrows()
    }
    pub fn n_states(&self) -> usize {
        self.0.ncols()
    }
    ///
    /// probabilities of all states at time `t`
    ///
    pub fn row(&self, t: usize) -> ArrayView1<Prob> {
        self.0.index_axis(Axis(0), t)
    }
    ///
    /// Sum of probabilities of row `t` over all states
    ///
    pub fn row_sum(&self, t: usize) -> Prob {
        self.row(t).sum()
    }
    ///
    /// log probabilities as plain `f64` (`-inf` for `p = 0`)
    ///
    pub fn to_log_matrix(&self) -> Array2<f64> {
        self.0.mapv(|x| x.to_log_value())
    }
    ///
    /// probabilities as plain `f64` in linear space
    ///
    pub fn to_prob_matrix(&self) -> Array2<f64> {
        self.0.mapv(|x| x.to_value())
    }
}

impl Index<(usize, NodeIndex)> for LogTable {
    type Output = Prob;
    fn index(&self, (t, v): (usize, NodeIndex)) -> &Prob {
        &self.0[[t, v.index()]]
    }
}

impl IndexMut<(usize, NodeIndex)> for LogTable {
    fn index_mut(&mut self, (t, v): (usize, NodeIndex)) -> &mut Prob {
        &mut self.0[[t, v.index()]]
    }
}

///
/// Serialized as a list of rows. Each `Prob` is written in its string form,
/// so `p = 0` survives as `-inf`.
///
impl Serialize for LogTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.outer_iter().map(|row| row.to_vec()))
    }
}

impl std::fmt::Display for LogTable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        // Header
        write!(f, "t")?;
        for v in 0..self.n_states() {
            write!(f, "\t{}", v)?;
        }
        writeln!(f)?;
        for (t, row) in self.0.axis_iter(Axis(0)).enumerate() {
            write!(f, "{}", t)?;
            for x in row.iter() {
                write!(f, "\t{:.4}", x.to_value())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

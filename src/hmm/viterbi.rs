//!
//! Viterbi algorithm definitions
//!
//! ```text
//! v_0[start] = 1, v_0[k] = 0 (k != start)
//! v_t[k] = e_k(y_t) max_l v_t-1[l] a_lk
//! ```
//!
//! Predecessors are scanned in ascending index order and a later candidate
//! replaces the current best only when it is larger by more than
//! `ModelParams::tie_tolerance`, so ties go to the lowest state index.
//!
use super::model::Model;
use super::table::LogTable;
use crate::common::Symbol;
use crate::error::{HmmError, Result};
use crate::prob::Prob;
use itertools::Itertools;
use log::{debug, info};
use ndarray::Array2;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

///
/// The most likely state path and its joint log-probability.
///
/// `path[0]` is the start state and `path[t]` is the state that emitted
/// the `t`-th observation. Empty if the observations are impossible.
///
/// In JSON the log-probability is a string, so `-inf` survives.
///
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViterbiPath {
    #[serde_as(as = "DisplayFromStr")]
    pub log_probability: f64,
    pub path: Vec<NodeIndex>,
}

impl ViterbiPath {
    /// `exp(log_probability)`
    pub fn probability(&self) -> f64 {
        self.log_probability.exp()
    }
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
    pub fn len(&self) -> usize {
        self.path.len()
    }
    ///
    /// State names along the path
    ///
    pub fn names<'a, T: Symbol>(&self, model: &'a Model<T>) -> Vec<&'a str> {
        self.path.iter().map(|&v| model.state(v).name()).collect()
    }
    /// Path as plain matrix indices
    pub fn to_indices(&self) -> Vec<usize> {
        self.path.iter().map(|v| v.index()).collect()
    }
}

impl std::fmt::Display for ViterbiPath {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}",
            self.log_probability,
            self.path.iter().map(|v| v.index()).join(",")
        )
    }
}

impl<T: Symbol> Model<T> {
    ///
    /// Most likely state path of the emissions.
    ///
    /// * empty emissions: `[start]` with log-probability `0.0`
    /// * impossible emissions: empty path with log-probability `-inf`
    ///
    pub fn viterbi(&self, emissions: &[T]) -> Result<ViterbiPath> {
        self.check_emissions(emissions.len())?;
        let n = emissions.len();
        if n == 0 {
            return Ok(ViterbiPath {
                log_probability: 0.0,
                path: vec![self.start()],
            });
        }

        let mut table = LogTable::zero(n + 1, self.node_count());
        let mut back: Array2<Option<NodeIndex>> =
            Array2::from_elem((n + 1, self.node_count()), None);
        table[(0, self.start())] = Prob::one();
        for (i, emission) in emissions.iter().enumerate() {
            self.v_step(i + 1, emission, &mut table, &mut back);
        }

        // terminal
        let mut best: Option<(NodeIndex, Prob)> = None;
        for (k, _) in self.emitting_states() {
            let score = if self.ends_explicitly() {
                table[(n, k)] * self.trans_prob(k, self.end())
            } else {
                table[(n, k)]
            };
            if score.is_zero() {
                continue;
            }
            best = match best {
                Some((_, p)) if !self.is_better(score, p) => best,
                _ => Some((k, score)),
            };
        }

        let (last, score) = match best {
            Some(best) => best,
            None => {
                info!(
                    "viterbi: emissions of length {} are impossible under {}",
                    n,
                    self.name()
                );
                return Ok(ViterbiPath {
                    log_probability: f64::NEG_INFINITY,
                    path: Vec::new(),
                });
            }
        };

        // traceback
        let mut path = vec![last];
        let mut v = last;
        for t in (1..=n).rev() {
            match back[[t, v.index()]] {
                Some(prev) => {
                    path.push(prev);
                    v = prev;
                }
                None => break,
            }
        }
        path.reverse();
        debug!(
            "viterbi: n_emissions={} log_probability={}",
            n,
            score.to_log_value()
        );
        Ok(ViterbiPath {
            log_probability: score.to_log_value(),
            path,
        })
    }
    ///
    /// fill row `t` of the Viterbi table and its back pointers
    ///
    fn v_step(
        &self,
        t: usize,
        emission: &T,
        table: &mut LogTable,
        back: &mut Array2<Option<NodeIndex>>,
    ) {
        for (k, kw) in self.emitting_states() {
            let p_emit = kw.emission(emission);
            if p_emit.is_zero() {
                continue;
            }
            let mut best: Option<(NodeIndex, Prob)> = None;
            for (l, _) in self.states() {
                let candidate = table[(t - 1, l)] * self.trans_prob(l, k);
                if candidate.is_zero() {
                    continue;
                }
                best = match best {
                    Some((_, p)) if !self.is_better(candidate, p) => best,
                    _ => Some((l, candidate)),
                };
            }
            if let Some((l, p)) = best {
                table[(t, k)] = p * p_emit;
                back[[t, k.index()]] = Some(l);
            }
        }
    }
    fn is_better(&self, candidate: Prob, best: Prob) -> bool {
        self.params()
            .is_strictly_better(candidate.to_log_value(), best.to_log_value())
    }
    ///
    /// Joint log-probability `log P(path, Y)` of an explicit state path and
    /// the emissions.
    ///
    /// `path` is either a path of emitting states, one per emission, or
    /// the same path preceded by the start state (as in `ViterbiPath`).
    ///
    pub fn path_log_probability(&self, path: &[NodeIndex], emissions: &[T]) -> Result<f64> {
        let states = if path.len() == emissions.len() + 1 && path[0] == self.start() {
            &path[1..]
        } else if path.len() == emissions.len() {
            path
        } else {
            return Err(HmmError::InvalidPath(format!(
                "{} states for {} emissions",
                path.len(),
                emissions.len()
            )));
        };
        if let Some(v) = states.iter().find(|v| v.index() >= self.n_states()) {
            return Err(HmmError::InvalidPath(format!(
                "state {} does not emit",
                v.index()
            )));
        }
        if states.is_empty() {
            return Ok(0.0);
        }
        let mut prob = Prob::one();
        let mut prev = self.start();
        for (&k, emission) in states.iter().zip(emissions.iter()) {
            prob *= self.trans_prob(prev, k) * self.emission(k, emission);
            prev = k;
        }
        if self.ends_explicitly() {
            prob *= self.trans_prob(prev, self.end());
        }
        Ok(prob.to_log_value())
    }
}

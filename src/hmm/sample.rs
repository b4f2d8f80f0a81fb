//!
//! Sampling emissions from the Model
//!
use super::model::Model;
use crate::common::Symbol;
use crate::error::Result;
use crate::prob::Prob;
use itertools::Itertools;
use log::debug;
use ndarray::Array2;
use petgraph::graph::NodeIndex;
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

///
/// Struct for storing sampling results from the model.
///
/// Each item is a visited state and its emission (`None` for the start and
/// end states, which emit nothing).
///
#[derive(Debug, Clone, PartialEq)]
pub struct History<T: Symbol>(Vec<(NodeIndex, Option<T>)>);

impl<T: Symbol> History<T> {
    ///
    /// Constructor of empty sample store.
    ///
    pub fn new() -> Self {
        History(Vec::new())
    }
    ///
    /// Append a new state and its emission
    ///
    pub fn push(&mut self, state: NodeIndex, emission: Option<T>) {
        self.0.push((state, emission));
    }
    ///
    /// Visited states, including the start state (and the end state if the
    /// walk was absorbed).
    ///
    pub fn states(&self) -> Vec<NodeIndex> {
        self.0.iter().map(|(v, _)| *v).collect()
    }
    ///
    /// States that emitted, paired with their emissions
    ///
    pub fn symbols(&self) -> impl Iterator<Item = (NodeIndex, &T)> + '_ {
        self.0
            .iter()
            .filter_map(|(v, emission)| emission.as_ref().map(|x| (*v, x)))
    }
    ///
    /// Create the emission sequence from sampling history
    ///
    pub fn to_sequence(&self) -> Vec<T> {
        self.symbols().map(|(_, x)| x.clone()).collect()
    }
    pub fn n_emissions(&self) -> usize {
        self.symbols().count()
    }
    ///
    /// Number of states the count tables cover: the states of `model`,
    /// widened to the largest index in the history.
    ///
    fn n_count_states(&self, model: &Model<T>) -> usize {
        self.0
            .iter()
            .map(|(v, _)| v.index() + 1)
            .max()
            .unwrap_or(0)
            .max(model.node_count())
    }
    ///
    /// How many times each state was visited, indexed by `NodeIndex`
    ///
    pub fn to_state_counts(&self, model: &Model<T>) -> Vec<usize> {
        let mut counts = vec![0; self.n_count_states(model)];
        for (v, _) in self.0.iter() {
            counts[v.index()] += 1;
        }
        counts
    }
    ///
    /// How many times each transition was taken, as a dense
    /// `(N+2) x (N+2)` count matrix
    ///
    pub fn to_transition_counts(&self, model: &Model<T>) -> Array2<usize> {
        let n = self.n_count_states(model);
        let mut counts = Array2::zeros((n, n));
        for ((v, _), (w, _)) in self.0.iter().tuple_windows() {
            counts[[v.index(), w.index()]] += 1;
        }
        counts
    }
}

impl<T: Symbol> Default for History<T> {
    fn default() -> Self {
        History::new()
    }
}

impl<T: Symbol> std::fmt::Display for History<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (state, emission) in self.0.iter() {
            match emission {
                Some(x) => writeln!(f, "{} -> {:?}", state.index(), x)?,
                None => writeln!(f, "{} -> -", state.index())?,
            }
        }
        Ok(())
    }
}

///
/// pick randomly from the choices with its own probability.
/// `None` if no choice has a positive weight.
///
pub fn pick_with_prob<R: Rng, X: Clone>(rng: &mut R, choices: &[(X, Prob)]) -> Option<X> {
    choices
        .choose_weighted(rng, |item| item.1.to_value())
        .ok()
        .map(|item| item.0.clone())
}

impl<T: Symbol> Model<T> {
    ///
    /// Walk the model from the start state and emit up to `length`
    /// symbols.
    ///
    /// The walk stops early when it enters the end state, or when the
    /// current state has no outgoing probability.
    ///
    pub fn sample<R: Rng>(&self, rng: &mut R, length: usize) -> Result<History<T>> {
        self.check_emissions(length)?;
        let mut history = History::new();
        let mut v = self.start();
        history.push(v, None);
        let mut n_emitted = 0;
        while n_emitted < length {
            let childs: Vec<(NodeIndex, Prob)> = self
                .childs(v)
                .map(|(_, w, ew)| (w, ew.trans_prob()))
                .collect();
            let w = match pick_with_prob(rng, &childs) {
                Some(w) => w,
                None => break,
            };
            if w == self.end() {
                history.push(w, None);
                break;
            }
            let symbols: Vec<(T, Prob)> = match self.state(w).distribution() {
                Some(d) => d.iter().map(|(x, p)| (x.clone(), Prob::from_prob(p))).collect(),
                None => break,
            };
            match pick_with_prob(rng, &symbols) {
                Some(x) => history.push(w, Some(x)),
                None => break,
            }
            n_emitted += 1;
            v = w;
        }
        debug!(
            "sample: {} emissions requested, {} emitted",
            length, n_emitted
        );
        Ok(history)
    }
    ///
    /// `sample` with a `Xoshiro256PlusPlus` rng seeded by `seed`
    ///
    pub fn sample_seeded(&self, length: usize, seed: u64) -> Result<History<T>> {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        self.sample(&mut rng, length)
    }
}

//!
//! Baked (compiled, immutable) model
//!
use super::params::ModelParams;
use super::state::{State, StateRole};
use crate::common::Symbol;
use crate::error::{HmmError, Result};
use crate::graph::iterators::{EdgesIterator, Neighbors, NodesIterator};
use crate::prob::Prob;
use fnv::FnvHashMap;
use ndarray::Array2;
use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};

///
/// Transition edge: probability of moving from the source state to the
/// target state.
///
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TransEdge {
    probability: f64,
    trans_prob: Prob,
}

impl TransEdge {
    pub fn new(probability: f64) -> TransEdge {
        TransEdge {
            probability,
            trans_prob: Prob::from_prob(probability),
        }
    }
    /// Transition probability in linear space
    pub fn probability(&self) -> f64 {
        self.probability
    }
    /// Transition probability in log space
    pub fn trans_prob(&self) -> Prob {
        self.trans_prob
    }
}

impl std::fmt::Display for TransEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "p={}", self.probability)
    }
}

///
/// Immutable hidden Markov model produced by `ModelBuilder::bake`.
///
/// `NodeIndex` of the graph is the row/column of the dense transition
/// matrix: emitting states `0..N`, start `N`, end `N + 1`.
///
/// A model is never mutated after baking; inference methods take `&self`
/// and allocate their own tables, so a model can be shared across threads.
///
#[derive(Debug, Clone)]
pub struct Model<T: Symbol> {
    name: String,
    params: ModelParams,
    graph: DiGraph<State<T>, TransEdge>,
    trans: Array2<Prob>,
    start: NodeIndex,
    end: NodeIndex,
    index: FnvHashMap<String, NodeIndex>,
    ends_explicitly: bool,
}

impl<T: Symbol> Model<T> {
    pub(crate) fn new(
        name: String,
        params: ModelParams,
        graph: DiGraph<State<T>, TransEdge>,
        trans: Array2<Prob>,
        start: NodeIndex,
        end: NodeIndex,
        index: FnvHashMap<String, NodeIndex>,
    ) -> Self {
        let ends_explicitly = graph.neighbors_directed(end, petgraph::Incoming).count() > 0;
        Model {
            name,
            params,
            graph,
            trans,
            start,
            end,
            index,
            ends_explicitly,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn params(&self) -> &ModelParams {
        &self.params
    }
    ///
    /// Number of states including start and end (`N + 2`)
    ///
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }
    ///
    /// Number of transitions that were added explicitly
    ///
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
    ///
    /// Number of emitting states (`N`)
    ///
    pub fn n_states(&self) -> usize {
        self.graph.node_count() - 2
    }
    pub fn start(&self) -> NodeIndex {
        self.start
    }
    pub fn end(&self) -> NodeIndex {
        self.end
    }
    ///
    /// The model has transitions into the end state, so a sequence must
    /// be absorbed by the end state after its last emission.
    ///
    pub fn ends_explicitly(&self) -> bool {
        self.ends_explicitly
    }
    ///
    /// Index of the state named `name`
    ///
    pub fn index_of(&self, name: &str) -> Result<NodeIndex> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| HmmError::UnknownState(name.to_string()))
    }
    pub fn state(&self, v: NodeIndex) -> &State<T> {
        &self.graph[v]
    }
    pub fn role(&self, v: NodeIndex) -> StateRole {
        self.graph[v].role()
    }
    ///
    /// All states in index order.
    /// Item of the iterator is `(NodeIndex, &State)`.
    ///
    pub fn states(&self) -> NodesIterator<State<T>> {
        NodesIterator::new(&self.graph)
    }
    ///
    /// Emitting states `0..N`
    ///
    pub fn emitting_states(&self) -> impl Iterator<Item = (NodeIndex, &State<T>)> + '_ {
        self.states().take(self.n_states())
    }
    ///
    /// All transitions.
    /// Item is `(EdgeIndex, source, target, &TransEdge)`.
    ///
    pub fn edges(&self) -> EdgesIterator<TransEdge> {
        EdgesIterator::new(&self.graph)
    }
    ///
    /// Outgoing transitions of `v`.
    /// Item is `(EdgeIndex, child, &TransEdge)`.
    ///
    pub fn childs(&self, v: NodeIndex) -> Neighbors<TransEdge> {
        Neighbors::childs(&self.graph, v)
    }
    ///
    /// Incoming transitions of `v`.
    /// Item is `(EdgeIndex, parent, &TransEdge)`.
    ///
    pub fn parents(&self, v: NodeIndex) -> Neighbors<TransEdge> {
        Neighbors::parents(&self.graph, v)
    }
    ///
    /// Transitions `(from name, to name, probability)`
    ///
    pub fn transitions(&self) -> impl Iterator<Item = (&str, &str, f64)> + '_ {
        self.edges().map(move |(_, v, w, ew)| {
            (self.graph[v].name(), self.graph[w].name(), ew.probability())
        })
    }
    ///
    /// Transition probability `v -> w` (zero if there is no such edge)
    ///
    pub fn trans_prob(&self, v: NodeIndex, w: NodeIndex) -> Prob {
        self.trans[[v.index(), w.index()]]
    }
    ///
    /// Probability of `v` emitting `symbol`
    ///
    pub fn emission(&self, v: NodeIndex, symbol: &T) -> Prob {
        self.graph[v].emission(symbol)
    }
    pub(crate) fn log_trans(&self) -> &Array2<Prob> {
        &self.trans
    }
    ///
    /// Check that a sequence of `n_emissions` observations can be
    /// evaluated at all.
    ///
    pub(crate) fn check_emissions(&self, n_emissions: usize) -> Result<()> {
        if n_emissions > 0 && self.n_states() == 0 {
            Err(HmmError::EmptyModel)
        } else {
            Ok(())
        }
    }
    ///
    /// Graphviz DOT of the topology.
    ///
    pub fn to_dot(&self) -> String {
        format!("{}", Dot::with_config(&self.graph, &[]))
    }
}

impl<T: Symbol> std::fmt::Display for Model<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "Model {}", self.name)?;
        for (v, state) in self.states() {
            writeln!(f, "{}\t{}\t{}", v.index(), state.role(), state)?;
        }
        for (_, v, w, ew) in self.edges() {
            writeln!(f, "{} -> {}\t{}", v.index(), w.index(), ew)?;
        }
        Ok(())
    }
}

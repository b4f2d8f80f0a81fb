//!
//! Build phase of a model
//!
//! `ModelBuilder` collects states and transitions, and `bake()` compiles
//! them into an immutable `Model`.
//!
use super::model::{Model, TransEdge};
use super::params::ModelParams;
use super::state::State;
use crate::common::{Symbol, StateRef};
use crate::error::{HmmError, Result};
use crate::graph::iterators::{EdgesIterator, Neighbors, NodesIterator};
use crate::prob::Prob;
use fnv::FnvHashMap;
use log::{debug, info};
use ndarray::Array2;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};

///
/// Mutable model under construction.
///
/// The start state `"{name}-start"` and the end state `"{name}-end"` exist
/// from the beginning; emitting states are added with `add_state`.
///
#[derive(Debug, Clone)]
pub struct ModelBuilder<T: Symbol> {
    name: String,
    params: ModelParams,
    graph: DiGraph<State<T>, TransEdge>,
    start: NodeIndex,
    end: NodeIndex,
    index: FnvHashMap<String, NodeIndex>,
}

impl<T: Symbol> ModelBuilder<T> {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self::with_params(name, ModelParams::default())
    }
    pub fn with_params<S: Into<String>>(name: S, params: ModelParams) -> Self {
        let name = name.into();
        let mut graph = DiGraph::new();
        let mut index = FnvHashMap::default();
        let start_name = format!("{}-start", name);
        let end_name = format!("{}-end", name);
        let start = graph.add_node(State::start(start_name.clone()));
        let end = graph.add_node(State::end(end_name.clone()));
        index.insert(start_name, start);
        index.insert(end_name, end);
        ModelBuilder {
            name,
            params,
            graph,
            start,
            end,
            index,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn params(&self) -> &ModelParams {
        &self.params
    }
    pub fn start_name(&self) -> &str {
        self.graph[self.start].name()
    }
    pub fn end_name(&self) -> &str {
        self.graph[self.end].name()
    }
    ///
    /// Register an emitting state.
    ///
    pub fn add_state(&mut self, state: State<T>) -> Result<NodeIndex> {
        if self.index.contains_key(state.name()) {
            return Err(HmmError::DuplicateState(state.name().to_string()));
        }
        let name = state.name().to_string();
        let v = self.graph.add_node(state);
        self.index.insert(name, v);
        Ok(v)
    }
    ///
    /// Register emitting states in order.
    ///
    pub fn add_states<I>(&mut self, states: I) -> Result<()>
    where
        I: IntoIterator<Item = State<T>>,
    {
        for state in states {
            self.add_state(state)?;
        }
        Ok(())
    }
    ///
    /// Add a transition `from -> to` with probability `probability`.
    ///
    /// Adding the same pair again replaces the probability.
    ///
    pub fn add_transition<'a, F, U>(&mut self, from: F, to: U, probability: f64) -> Result<EdgeIndex>
    where
        F: Into<StateRef<'a>>,
        U: Into<StateRef<'a>>,
    {
        let v = self.resolve(from.into())?;
        let w = self.resolve(to.into())?;
        if w == self.start || v == self.end {
            return Err(HmmError::ForbiddenTransition {
                from: self.graph[v].name().to_string(),
                to: self.graph[w].name().to_string(),
            });
        }
        if !(0.0..=1.0).contains(&probability) {
            return Err(HmmError::InvalidProbability {
                from: self.graph[v].name().to_string(),
                to: self.graph[w].name().to_string(),
                probability,
            });
        }
        Ok(self.graph.update_edge(v, w, TransEdge::new(probability)))
    }
    fn resolve(&self, state: StateRef) -> Result<NodeIndex> {
        match state {
            StateRef::Start => Ok(self.start),
            StateRef::End => Ok(self.end),
            StateRef::Name(name) => self
                .index
                .get(name)
                .copied()
                .ok_or_else(|| HmmError::UnknownState(name.to_string())),
        }
    }
    ///
    /// Number of states including start and end
    ///
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }
    ///
    /// Number of distinct transitions added
    ///
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
    ///
    /// States in registration order (start, end, then emitting states).
    ///
    pub fn states(&self) -> NodesIterator<State<T>> {
        NodesIterator::new(&self.graph)
    }
    ///
    /// Transitions `(from name, to name, probability)` in insertion order
    ///
    pub fn transitions(&self) -> impl Iterator<Item = (&str, &str, f64)> + '_ {
        EdgesIterator::new(&self.graph).map(move |(_, v, w, ew)| {
            (self.graph[v].name(), self.graph[w].name(), ew.probability())
        })
    }
    ///
    /// Validate and compile into an immutable `Model`.
    ///
    /// Index layout of the compiled model: the `N` emitting states take
    /// `0..N` in registration order, the start state is `N` and the end
    /// state is `N + 1`.
    ///
    /// The outgoing probabilities of the start state and of every emitting
    /// state must sum to 1 within `params.tolerance`. The builder is left
    /// untouched, so it can be baked again.
    ///
    pub fn bake(&self) -> Result<Model<T>> {
        self.params.check()?;
        // old index -> new index
        let n = self.graph.node_count() - 2;
        let relabel = |v: NodeIndex| -> NodeIndex {
            if v == self.start {
                NodeIndex::new(n)
            } else if v == self.end {
                NodeIndex::new(n + 1)
            } else {
                NodeIndex::new(v.index() - 2)
            }
        };

        let mut order: Vec<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|&v| v != self.start && v != self.end)
            .collect();
        order.push(self.start);
        order.push(self.end);

        let mut graph = DiGraph::with_capacity(n + 2, self.graph.edge_count());
        for &v in order.iter() {
            graph.add_node(self.graph[v].clone());
        }
        let mut trans: Array2<Prob> = Array2::zeros((n + 2, n + 2));
        for (_, v, w, ew) in EdgesIterator::new(&self.graph) {
            let (v, w) = (relabel(v), relabel(w));
            graph.add_edge(v, w, *ew);
            trans[[v.index(), w.index()]] = ew.trans_prob();
        }

        // every row except the end state is a distribution
        for &v in order.iter().filter(|&&v| v != self.end) {
            let sum: f64 = Neighbors::childs(&self.graph, v)
                .map(|(_, _, ew)| ew.probability())
                .sum();
            if !self.params.is_normalized(sum) {
                return Err(HmmError::UnnormalizedTransitions {
                    state: self.graph[v].name().to_string(),
                    sum,
                });
            }
            debug!("bake: {} row sum {}", self.graph[v].name(), sum);
        }

        let index = order
            .iter()
            .map(|&v| (self.graph[v].name().to_string(), relabel(v)))
            .collect();
        info!(
            "baked model {}: {} emitting states (start={}, end={}), {} transitions",
            self.name,
            n,
            n,
            n + 1,
            graph.edge_count()
        );
        Ok(Model::new(
            self.name.clone(),
            self.params,
            graph,
            trans,
            NodeIndex::new(n),
            NodeIndex::new(n + 1),
            index,
        ))
    }
}

//!
//! globally-available parts
//!
pub use crate::common::{ni, StateRef, Symbol};
pub use crate::distribution::DiscreteDistribution;
pub use crate::error::{HmmError, Result};
pub use crate::hmm::{
    HiddenMarkovModel, Model, ModelBuilder, ModelParams, Posterior, State, StateRole,
    ViterbiPath,
};
pub use crate::io::json::ModelDef;
pub use crate::prob::{p, Prob};
pub use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};

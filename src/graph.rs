//!
//! Graph utilities on top of `petgraph`
//!
pub mod iterators;

pub use iterators::{EdgesIterator, Neighbors, NodesIterator};

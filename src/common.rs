//!
//! Common types shared by the distribution, model and engines
//!
pub use petgraph::graph::{EdgeIndex, NodeIndex};
use std::fmt::Debug;
use std::hash::Hash;

///
/// Discrete observation value (emission output).
///
/// Anything hashable and comparable works: `&'static str`, `String`,
/// `char`, `u8`, or a fieldless enum.
///
pub trait Symbol: Eq + Hash + Clone + Debug {}

impl<T: Eq + Hash + Clone + Debug> Symbol for T {}

///
/// Reference to an endpoint of a transition while building a model.
///
/// `Start` and `End` are the structural pseudo-states; `Name` refers to a
/// registered emitting state (or to the start/end state by its name).
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateRef<'a> {
    Start,
    End,
    Name(&'a str),
}

impl<'a> From<&'a str> for StateRef<'a> {
    fn from(name: &'a str) -> Self {
        StateRef::Name(name)
    }
}

impl<'a> From<&'a String> for StateRef<'a> {
    fn from(name: &'a String) -> Self {
        StateRef::Name(name.as_str())
    }
}

///
/// short-hand of `NodeIndex::new`
///
pub fn ni(index: usize) -> NodeIndex {
    NodeIndex::new(index)
}

///
/// short-hand of `EdgeIndex::new`
///
pub fn ei(index: usize) -> EdgeIndex {
    EdgeIndex::new(index)
}

//!
//! Discrete-output hidden Markov models on a petgraph topology
//!
//! ```
//! use hmmgraph::prelude::*;
//!
//! let mut b = ModelBuilder::new("weather");
//! let sunny = DiscreteDistribution::new(vec![("yes", 0.1), ("no", 0.9)]).unwrap();
//! let rainy = DiscreteDistribution::new(vec![("yes", 0.8), ("no", 0.2)]).unwrap();
//! b.add_state(State::new("Sunny", sunny)).unwrap();
//! b.add_state(State::new("Rainy", rainy)).unwrap();
//! b.add_transition(StateRef::Start, "Sunny", 0.5).unwrap();
//! b.add_transition(StateRef::Start, "Rainy", 0.5).unwrap();
//! b.add_transition("Sunny", "Sunny", 0.8).unwrap();
//! b.add_transition("Sunny", "Rainy", 0.2).unwrap();
//! b.add_transition("Rainy", "Sunny", 0.4).unwrap();
//! b.add_transition("Rainy", "Rainy", 0.6).unwrap();
//! let m = b.bake().unwrap();
//!
//! let lp = m.log_probability(&["yes", "no", "yes"]).unwrap();
//! assert!((lp.exp() - 0.0692).abs() < 1e-12);
//! let v = m.viterbi(&["yes", "no", "yes"]).unwrap();
//! assert_eq!(v.names(&m), vec!["weather-start", "Rainy", "Sunny", "Rainy"]);
//! ```
//!
pub mod common;
pub mod distribution;
pub mod error;
pub mod graph;
pub mod hmm;
pub mod io;
pub mod prelude;
pub mod prob;

#[cfg(test)]
#[macro_use]
extern crate approx;

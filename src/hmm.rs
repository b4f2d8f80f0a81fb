//!
//! Discrete-output hidden Markov model
//!
//! # Overview of calculation
//!
//! y = y[1],...,y[T] : Emissions of length T
//!
//! Forward
//! F[t][k]
//!  = P(emits y[1..=t] and is in state k at t) for 0<=t<=T
//!
//! Backward
//! B[t][k]
//!  = P(emits y[t+1..=T] | in state k at t) for 0<=t<=T
//!
//! Posterior
//! G[t][k]
//!  = P(in state k at t | y) = F[t][k] B[t][k] / P(y)  for 1<=t<=T
//!
//! Viterbi
//! V[t][k]
//!  = max over paths of P(emits y[1..=t] along the path ending at k)
//!
//! The start state is the only state at t=0 and no state other than the
//! emitting states is visited for t>=1. When the model has transitions
//! into the end state, every sequence must be absorbed by it after y[T].
//!
//! # Phases
//!
//! `ModelBuilder` collects states and transitions, `ModelBuilder::bake`
//! validates them and produces an immutable `Model`, which owns all the
//! inference methods. `HiddenMarkovModel` wraps both phases in a single
//! object.
//!
pub mod backward;
pub mod builder;
pub mod facade;
pub mod forward;
pub mod matrix;
pub mod mocks;
pub mod model;
pub mod params;
pub mod posterior;
pub mod sample;
pub mod state;
pub mod table;
pub mod viterbi;

pub use backward::BackwardResult;
pub use builder::ModelBuilder;
pub use facade::HiddenMarkovModel;
pub use forward::ForwardResult;
pub use model::{Model, TransEdge};
pub use params::ModelParams;
pub use posterior::Posterior;
pub use sample::History;
pub use state::{State, StateKind, StateRole};
pub use table::LogTable;
pub use viterbi::ViterbiPath;

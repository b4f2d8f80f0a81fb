//!
//! Error types of model construction and inference
//!
//! Every variant is a usage error reported at the point of violation.
//! Zero-probability observation sequences are not errors; they are
//! returned as `-inf` log-likelihoods.
//!
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HmmError {
    /// Emission table with negative/non-finite entries, repeated symbols,
    /// or a total that is not 1.
    #[error("invalid distribution: {0}")]
    InvalidDistribution(String),

    #[error("state `{0}` is already registered")]
    DuplicateState(String),

    #[error("state `{0}` is not registered in the model")]
    UnknownState(String),

    #[error("transition probability {probability} of `{from}` -> `{to}` is not in [0, 1]")]
    InvalidProbability {
        from: String,
        to: String,
        probability: f64,
    },

    /// Transitions into the start state or out of the end state.
    #[error("transition `{from}` -> `{to}` is not allowed")]
    ForbiddenTransition { from: String, to: String },

    #[error("outgoing transitions of state `{state}` sum to {sum}, not 1")]
    UnnormalizedTransitions { state: String, sum: f64 },

    #[error("model is already baked")]
    AlreadyBaked,

    #[error("model is not baked yet")]
    ModelNotBaked,

    #[error("model has no emitting states")]
    EmptyModel,

    /// State path that does not start at the start state or that visits
    /// a non-emitting state after it.
    #[error("invalid state path: {0}")]
    InvalidPath(String),

    /// Forward and backward tables of different emissions or models,
    /// as `(rows, states)`.
    #[error("forward table {forward:?} and backward table {backward:?} do not match")]
    MismatchedTables {
        forward: (usize, usize),
        backward: (usize, usize),
    },

    /// Negative or non-finite tolerances.
    #[error("invalid params: {0}")]
    InvalidParams(String),

    #[error("model definition: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HmmError>;

//!
//! JSON model definitions
//!
//! ```json
//! {
//!   "name": "weather",
//!   "params": { "tolerance": 1e-9, "tie_tolerance": 1e-12 },
//!   "states": [
//!     { "name": "Sunny", "distribution": [["yes", 0.1], ["no", 0.9]] }
//!   ],
//!   "transitions": [
//!     { "from": "weather-start", "to": "Sunny", "probability": 1.0 },
//!     { "from": "Sunny", "to": "Sunny", "probability": 1.0 }
//!   ]
//! }
//! ```
//!
//! Distributions are lists of `[symbol, probability]` pairs so that any
//! serializable symbol type (not only strings) can be a JSON key.
//! `params` may be omitted.
//!
use super::write_string;
use crate::common::Symbol;
use crate::distribution::DiscreteDistribution;
use crate::error::Result;
use crate::hmm::builder::ModelBuilder;
use crate::hmm::model::Model;
use crate::hmm::params::ModelParams;
use crate::hmm::state::State;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateDef<T> {
    pub name: String,
    pub distribution: Vec<(T, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionDef {
    pub from: String,
    pub to: String,
    pub probability: f64,
}

///
/// Serializable definition of a model: emitting states in registration
/// order and transitions by state name.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDef<T> {
    pub name: String,
    #[serde(default)]
    pub params: ModelParams,
    pub states: Vec<StateDef<T>>,
    pub transitions: Vec<TransitionDef>,
}

fn state_def<T: Symbol>(state: &State<T>) -> Option<StateDef<T>> {
    state.distribution().map(|d| StateDef {
        name: state.name().to_string(),
        distribution: d.iter().map(|(x, p)| (x.clone(), p)).collect(),
    })
}

fn transition_def((from, to, probability): (&str, &str, f64)) -> TransitionDef {
    TransitionDef {
        from: from.to_string(),
        to: to.to_string(),
        probability,
    }
}

impl<T: Symbol> ModelDef<T> {
    pub fn from_builder(builder: &ModelBuilder<T>) -> Self {
        ModelDef {
            name: builder.name().to_string(),
            params: *builder.params(),
            states: builder.states().filter_map(|(_, s)| state_def(s)).collect(),
            transitions: builder.transitions().map(transition_def).collect(),
        }
    }
    ///
    /// Rebuild the builder. Every state and transition goes through the
    /// usual validation of `ModelBuilder`.
    ///
    pub fn to_builder(&self) -> Result<ModelBuilder<T>> {
        self.params.check()?;
        let mut b = ModelBuilder::with_params(self.name.as_str(), self.params);
        for s in self.states.iter() {
            let d = DiscreteDistribution::with_tolerance(
                s.distribution.iter().cloned(),
                self.params.tolerance,
            )?;
            b.add_state(State::new(s.name.as_str(), d))?;
        }
        for t in self.transitions.iter() {
            b.add_transition(t.from.as_str(), t.to.as_str(), t.probability)?;
        }
        Ok(b)
    }
    ///
    /// Rebuild and bake.
    ///
    pub fn to_model(&self) -> Result<Model<T>> {
        self.to_builder()?.bake()
    }
}

impl<T: Serialize> ModelDef<T> {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
    pub fn save(&self, filename: &str) -> Result<()> {
        write_string(filename, &self.to_json()?)?;
        Ok(())
    }
}

impl<T: DeserializeOwned> ModelDef<T> {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
    pub fn load(filename: &str) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(filename)?)
    }
}

impl<T: Symbol> Model<T> {
    ///
    /// Definition that rebuilds an equivalent model
    ///
    pub fn to_def(&self) -> ModelDef<T> {
        ModelDef {
            name: self.name().to_string(),
            params: *self.params(),
            states: self
                .emitting_states()
                .filter_map(|(_, s)| state_def(s))
                .collect(),
            transitions: self.transitions().map(transition_def).collect(),
        }
    }
}

//!
//! Single-object interface over `ModelBuilder` and `Model`.
//!
//! `HiddenMarkovModel` starts in the building phase and switches to the
//! baked phase on `bake()`. Calls made in the wrong phase fail with
//! `AlreadyBaked` or `ModelNotBaked`.
//!
use super::builder::ModelBuilder;
use super::forward::ForwardResult;
use super::model::Model;
use super::params::ModelParams;
use super::state::State;
use super::viterbi::ViterbiPath;
use crate::common::{StateRef, Symbol};
use crate::error::{HmmError, Result};
use ndarray::Array2;
use petgraph::graph::{EdgeIndex, NodeIndex};

#[derive(Debug, Clone)]
enum Phase<T: Symbol> {
    Building(ModelBuilder<T>),
    Baked(Model<T>),
}

#[derive(Debug, Clone)]
pub struct HiddenMarkovModel<T: Symbol> {
    phase: Phase<T>,
}

impl<T: Symbol> HiddenMarkovModel<T> {
    pub fn new<S: Into<String>>(name: S) -> Self {
        HiddenMarkovModel {
            phase: Phase::Building(ModelBuilder::new(name)),
        }
    }
    pub fn with_params<S: Into<String>>(name: S, params: ModelParams) -> Self {
        HiddenMarkovModel {
            phase: Phase::Building(ModelBuilder::with_params(name, params)),
        }
    }
    pub fn name(&self) -> &str {
        match &self.phase {
            Phase::Building(b) => b.name(),
            Phase::Baked(m) => m.name(),
        }
    }
    pub fn is_baked(&self) -> bool {
        matches!(self.phase, Phase::Baked(_))
    }
    fn builder_mut(&mut self) -> Result<&mut ModelBuilder<T>> {
        match &mut self.phase {
            Phase::Building(b) => Ok(b),
            Phase::Baked(_) => Err(HmmError::AlreadyBaked),
        }
    }
    pub fn add_state(&mut self, state: State<T>) -> Result<NodeIndex> {
        self.builder_mut()?.add_state(state)
    }
    pub fn add_states<I>(&mut self, states: I) -> Result<()>
    where
        I: IntoIterator<Item = State<T>>,
    {
        self.builder_mut()?.add_states(states)
    }
    pub fn add_transition<'a, F, U>(&mut self, from: F, to: U, probability: f64) -> Result<EdgeIndex>
    where
        F: Into<StateRef<'a>>,
        U: Into<StateRef<'a>>,
    {
        self.builder_mut()?.add_transition(from, to, probability)
    }
    ///
    /// Compile the model. Fails with `AlreadyBaked` on the second call;
    /// on a validation error the model stays in the building phase.
    ///
    pub fn bake(&mut self) -> Result<()> {
        let model = match &self.phase {
            Phase::Building(b) => b.bake()?,
            Phase::Baked(_) => return Err(HmmError::AlreadyBaked),
        };
        self.phase = Phase::Baked(model);
        Ok(())
    }
    ///
    /// The baked model
    ///
    pub fn model(&self) -> Result<&Model<T>> {
        match &self.phase {
            Phase::Building(_) => Err(HmmError::ModelNotBaked),
            Phase::Baked(m) => Ok(m),
        }
    }
    /// Consume into the baked model
    pub fn into_model(self) -> Result<Model<T>> {
        match self.phase {
            Phase::Building(_) => Err(HmmError::ModelNotBaked),
            Phase::Baked(m) => Ok(m),
        }
    }
    pub fn node_count(&self) -> usize {
        match &self.phase {
            Phase::Building(b) => b.node_count(),
            Phase::Baked(m) => m.node_count(),
        }
    }
    pub fn edge_count(&self) -> usize {
        match &self.phase {
            Phase::Building(b) => b.edge_count(),
            Phase::Baked(m) => m.edge_count(),
        }
    }
    pub fn forward(&self, emissions: &[T]) -> Result<ForwardResult> {
        self.model()?.forward(emissions)
    }
    pub fn log_probability(&self, emissions: &[T]) -> Result<f64> {
        self.model()?.log_probability(emissions)
    }
    pub fn viterbi(&self, emissions: &[T]) -> Result<ViterbiPath> {
        self.model()?.viterbi(emissions)
    }
    pub fn dense_transition_matrix(&self, order: Option<&[&str]>) -> Result<Array2<f64>> {
        self.model()?.dense_transition_matrix(order)
    }
}

impl<T: Symbol> From<ModelBuilder<T>> for HiddenMarkovModel<T> {
    fn from(builder: ModelBuilder<T>) -> Self {
        HiddenMarkovModel {
            phase: Phase::Building(builder),
        }
    }
}

impl<T: Symbol> From<Model<T>> for HiddenMarkovModel<T> {
    fn from(model: Model<T>) -> Self {
        HiddenMarkovModel {
            phase: Phase::Baked(model),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::DiscreteDistribution;
    use crate::hmm::mocks::mock_weather_builder;

    fn weather() -> HiddenMarkovModel<&'static str> {
        let mut hmm = HiddenMarkovModel::new("weather");
        let sunny = DiscreteDistribution::new(vec![("yes", 0.1), ("no", 0.9)]).unwrap();
        let rainy = DiscreteDistribution::new(vec![("yes", 0.8), ("no", 0.2)]).unwrap();
        hmm.add_states(vec![State::new("Sunny", sunny), State::new("Rainy", rainy)])
            .unwrap();
        hmm.add_transition(StateRef::Start, "Sunny", 0.5).unwrap();
        hmm.add_transition(StateRef::Start, "Rainy", 0.5).unwrap();
        hmm.add_transition("Sunny", "Sunny", 0.8).unwrap();
        hmm.add_transition("Sunny", "Rainy", 0.2).unwrap();
        hmm.add_transition("Rainy", "Sunny", 0.4).unwrap();
        hmm.add_transition("Rainy", "Rainy", 0.6).unwrap();
        hmm
    }

    #[test]
    fn facade_phases() {
        let mut hmm = weather();
        assert!(!hmm.is_baked());
        assert_eq!(hmm.node_count(), 4);
        assert_eq!(hmm.edge_count(), 6);
        assert!(matches!(
            hmm.log_probability(&["yes"]),
            Err(HmmError::ModelNotBaked)
        ));
        assert!(matches!(hmm.viterbi(&["yes"]), Err(HmmError::ModelNotBaked)));
        assert!(matches!(hmm.forward(&["yes"]), Err(HmmError::ModelNotBaked)));
        assert!(matches!(
            hmm.dense_transition_matrix(None),
            Err(HmmError::ModelNotBaked)
        ));
        assert!(matches!(hmm.model(), Err(HmmError::ModelNotBaked)));

        hmm.bake().unwrap();
        assert!(hmm.is_baked());
        assert!(matches!(hmm.bake(), Err(HmmError::AlreadyBaked)));
        assert!(matches!(
            hmm.add_transition("Sunny", "Rainy", 0.1),
            Err(HmmError::AlreadyBaked)
        ));
        let d = DiscreteDistribution::new(vec![("yes", 1.0)]).unwrap();
        assert!(matches!(
            hmm.add_state(State::new("Foggy", d)),
            Err(HmmError::AlreadyBaked)
        ));
        assert_eq!(hmm.node_count(), 4);
        assert_eq!(hmm.edge_count(), 6);
        assert_abs_diff_eq!(
            hmm.log_probability(&["yes", "no", "yes"]).unwrap(),
            0.0692_f64.ln(),
            epsilon = 1e-9
        );
        let v = hmm.viterbi(&["yes", "no", "yes"]).unwrap();
        assert_eq!(
            v.names(hmm.model().unwrap()),
            vec!["weather-start", "Rainy", "Sunny", "Rainy"]
        );
    }

    #[test]
    fn facade_failed_bake_keeps_building() {
        let mut hmm: HiddenMarkovModel<&str> = mock_weather_builder().unwrap().into();
        hmm.add_transition("Sunny", "Sunny", 0.5).unwrap();
        assert!(matches!(
            hmm.bake(),
            Err(HmmError::UnnormalizedTransitions { .. })
        ));
        assert!(!hmm.is_baked());
        hmm.add_transition("Sunny", "Sunny", 0.8).unwrap();
        hmm.bake().unwrap();
        let m = hmm.into_model().unwrap();
        assert_eq!(m.n_states(), 2);
    }
}

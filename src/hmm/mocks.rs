//!
//! Mock models for testing
//!
use super::builder::ModelBuilder;
use super::model::Model;
use super::state::State;
use crate::common::StateRef;
use crate::distribution::DiscreteDistribution;
use crate::error::Result;
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

///
/// Two-state weather model observed through an umbrella
///
/// ```text
/// start -> Sunny 0.5, start -> Rainy 0.5
/// Sunny -> Sunny 0.8, Sunny -> Rainy 0.2
/// Rainy -> Sunny 0.4, Rainy -> Rainy 0.6
///
/// Sunny: yes 0.1, no 0.9
/// Rainy: yes 0.8, no 0.2
/// ```
///
pub fn mock_weather_builder() -> Result<ModelBuilder<&'static str>> {
    let mut b = ModelBuilder::new("weather");
    let sunny = DiscreteDistribution::new(vec![("yes", 0.1), ("no", 0.9)])?;
    let rainy = DiscreteDistribution::new(vec![("yes", 0.8), ("no", 0.2)])?;
    b.add_state(State::new("Sunny", sunny))?;
    b.add_state(State::new("Rainy", rainy))?;
    b.add_transition(StateRef::Start, "Sunny", 0.5)?;
    b.add_transition(StateRef::Start, "Rainy", 0.5)?;
    b.add_transition("Sunny", "Sunny", 0.8)?;
    b.add_transition("Sunny", "Rainy", 0.2)?;
    b.add_transition("Rainy", "Sunny", 0.4)?;
    b.add_transition("Rainy", "Rainy", 0.6)?;
    Ok(b)
}

///
/// Baked `mock_weather_builder`
///
pub fn mock_weather() -> Result<Model<&'static str>> {
    mock_weather_builder()?.bake()
}

///
/// Single state model that ends explicitly
///
/// ```text
/// start --1.0--> A --0.5--> end
///                ^ |
///                +-+ 0.5
/// ```
/// `A` always emits `'x'`, so `P(x^n) = 0.5^n`.
///
pub fn mock_ending() -> Result<Model<char>> {
    let mut b = ModelBuilder::new("ending");
    b.add_state(State::new("A", DiscreteDistribution::new(vec![('x', 1.0)])?))?;
    b.add_transition(StateRef::Start, "A", 1.0)?;
    b.add_transition("A", "A", 0.5)?;
    b.add_transition("A", StateRef::End, 0.5)?;
    b.bake()
}

///
/// Fully connected model with random transition and emission probabilities.
///
/// States are `s0, s1, ...` and symbols are `0..n_symbols`.
/// The model never ends explicitly.
///
pub fn mock_random(n_states: usize, n_symbols: u8, seed: u64) -> Result<Model<u8>> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut b = ModelBuilder::new("random");
    let names: Vec<String> = (0..n_states).map(|i| format!("s{}", i)).collect();
    for name in names.iter() {
        let ps = random_probs(&mut rng, n_symbols as usize);
        let d = DiscreteDistribution::new((0..n_symbols).zip(ps))?;
        b.add_state(State::new(name.as_str(), d))?;
    }
    for (name, p) in names.iter().zip(random_probs(&mut rng, n_states)) {
        b.add_transition(StateRef::Start, name, p)?;
    }
    for from in names.iter() {
        for (to, p) in names.iter().zip(random_probs(&mut rng, n_states)) {
            b.add_transition(from, to, p)?;
        }
    }
    b.bake()
}

///
/// `n` positive random probabilities summing to 1
///
fn random_probs<R: Rng>(rng: &mut R, n: usize) -> Vec<f64> {
    let ws: Vec<f64> = (0..n).map(|_| rng.gen_range(0.1..1.0)).collect();
    let total: f64 = ws.iter().sum();
    ws.into_iter().map(|w| w / total).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mocks_are_valid() {
        let m = mock_weather().unwrap();
        assert_eq!(m.n_states(), 2);
        let m = mock_ending().unwrap();
        assert_eq!(m.n_states(), 1);
        assert!(m.ends_explicitly());
        let m = mock_random(4, 3, 0).unwrap();
        assert_eq!(m.node_count(), 6);
        assert_eq!(m.edge_count(), 4 + 16);
        assert!(!m.ends_explicitly());
        // same seed, same model
        let m2 = mock_random(4, 3, 0).unwrap();
        assert_eq!(m.log_transition_matrix(), m2.log_transition_matrix());
    }
}

//!
//! Hidden states
//!
use crate::common::Symbol;
use crate::distribution::DiscreteDistribution;
use crate::prob::Prob;

///
/// What a state does: the two structural pseudo-states emit nothing,
/// every other state emits through its distribution.
///
#[derive(Debug, Clone, PartialEq)]
pub enum StateKind<T: Symbol> {
    Start,
    End,
    Emitting(DiscreteDistribution<T>),
}

///
/// Role of a state without its distribution, for reporting.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateRole {
    Start,
    End,
    Emitting,
}

impl std::fmt::Display for StateRole {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            StateRole::Start => write!(f, "start"),
            StateRole::End => write!(f, "end"),
            StateRole::Emitting => write!(f, "emitting"),
        }
    }
}

///
/// Named hidden state
///
#[derive(Debug, Clone, PartialEq)]
pub struct State<T: Symbol> {
    name: String,
    kind: StateKind<T>,
}

impl<T: Symbol> State<T> {
    ///
    /// Emitting state with the emission distribution
    ///
    pub fn new<S: Into<String>>(name: S, distribution: DiscreteDistribution<T>) -> Self {
        State {
            name: name.into(),
            kind: StateKind::Emitting(distribution),
        }
    }
    pub(crate) fn start(name: String) -> Self {
        State {
            name,
            kind: StateKind::Start,
        }
    }
    pub(crate) fn end(name: String) -> Self {
        State {
            name,
            kind: StateKind::End,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn kind(&self) -> &StateKind<T> {
        &self.kind
    }
    pub fn role(&self) -> StateRole {
        match self.kind {
            StateKind::Start => StateRole::Start,
            StateKind::End => StateRole::End,
            StateKind::Emitting(_) => StateRole::Emitting,
        }
    }
    pub fn is_emitting(&self) -> bool {
        self.role() == StateRole::Emitting
    }
    ///
    /// Emission distribution (`None` for start/end)
    ///
    pub fn distribution(&self) -> Option<&DiscreteDistribution<T>> {
        match &self.kind {
            StateKind::Emitting(d) => Some(d),
            _ => None,
        }
    }
    ///
    /// Probability of emitting `symbol` from this state.
    /// Always zero for start/end, which never consume an observation.
    ///
    pub fn emission(&self, symbol: &T) -> Prob {
        match &self.kind {
            StateKind::Emitting(d) => d.log_probability(symbol),
            _ => Prob::zero(),
        }
    }
}

impl<T: Symbol> std::fmt::Display for State<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.kind {
            StateKind::Emitting(d) => write!(f, "{} {}", self.name, d),
            _ => write!(f, "{} ({})", self.name, self.role()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_roles() {
        let d = DiscreteDistribution::new(vec![('a', 1.0)]).unwrap();
        let s = State::new("A", d);
        assert_eq!(s.name(), "A");
        assert_eq!(s.role(), StateRole::Emitting);
        assert!(s.emission(&'a').is_one());
        assert!(s.emission(&'b').is_zero());
        assert_eq!(s.to_string(), "A {'a': 1}");

        let start: State<char> = State::start("m-start".to_string());
        assert_eq!(start.role(), StateRole::Start);
        assert!(start.distribution().is_none());
        assert!(start.emission(&'a').is_zero());
        assert_eq!(start.to_string(), "m-start (start)");
        let end: State<char> = State::end("m-end".to_string());
        assert_eq!(end.role(), StateRole::End);
        assert!(!end.is_emitting());
    }
}

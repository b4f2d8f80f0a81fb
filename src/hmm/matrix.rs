//!
//! Dense transition matrix views for reporting
//!
use super::model::Model;
use crate::common::Symbol;
use crate::error::{HmmError, Result};
use crate::prob::Prob;
use fnv::FnvHashSet;
use ndarray::Array2;
use petgraph::graph::NodeIndex;

impl<T: Symbol> Model<T> {
    ///
    /// Names of all states in index order
    ///
    pub fn state_names(&self) -> Vec<&str> {
        self.states().map(|(_, s)| s.name()).collect()
    }
    ///
    /// Log-space transition matrix in index order, `(N+2) x (N+2)`
    ///
    pub fn log_transition_matrix(&self) -> &Array2<Prob> {
        self.log_trans()
    }
    ///
    /// Transition probabilities as a dense matrix.
    ///
    /// * `None`: rows and columns in index order (`0..N` emitting, `N`
    ///   start, `N+1` end).
    /// * `Some(names)`: row `i` and column `i` both correspond to
    ///   `names[i]`. Giving only some of the names yields the sub-matrix
    ///   of those states.
    ///
    pub fn dense_transition_matrix(&self, order: Option<&[&str]>) -> Result<Array2<f64>> {
        let indices: Vec<NodeIndex> = match order {
            None => self.states().map(|(v, _)| v).collect(),
            Some(names) => {
                let mut seen = FnvHashSet::default();
                let mut indices = Vec::with_capacity(names.len());
                for &name in names {
                    if !seen.insert(name) {
                        return Err(HmmError::DuplicateState(name.to_string()));
                    }
                    indices.push(self.index_of(name)?);
                }
                indices
            }
        };
        let n = indices.len();
        Ok(Array2::from_shape_fn((n, n), |(i, j)| {
            self.trans_prob(indices[i], indices[j]).to_value()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hmm::mocks::mock_weather;
    use ndarray::{array, Axis};

    #[test]
    fn dense_matrix_default_order() {
        let m = mock_weather().unwrap();
        assert_eq!(
            m.state_names(),
            vec!["Sunny", "Rainy", "weather-start", "weather-end"]
        );
        let a = m.dense_transition_matrix(None).unwrap();
        let expected = array![
            [0.8, 0.2, 0.0, 0.0],
            [0.4, 0.6, 0.0, 0.0],
            [0.5, 0.5, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0],
        ];
        assert_abs_diff_eq!(a, expected, epsilon = 1e-12);
        // every row except end sums to one
        for (i, row) in a.axis_iter(Axis(0)).enumerate() {
            if i != m.end().index() {
                assert_abs_diff_eq!(row.sum(), 1.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn dense_matrix_permuted() {
        let m = mock_weather().unwrap();
        let a = m
            .dense_transition_matrix(Some(&["weather-start", "Rainy", "Sunny", "weather-end"]))
            .unwrap();
        let expected = array![
            [0.0, 0.5, 0.5, 0.0],
            [0.0, 0.6, 0.4, 0.0],
            [0.0, 0.2, 0.8, 0.0],
            [0.0, 0.0, 0.0, 0.0],
        ];
        assert_abs_diff_eq!(a, expected, epsilon = 1e-12);

        let sub = m.dense_transition_matrix(Some(&["Rainy", "Sunny"])).unwrap();
        assert_abs_diff_eq!(sub, array![[0.6, 0.4], [0.2, 0.8]], epsilon = 1e-12);
    }

    #[test]
    fn dense_matrix_bad_order() {
        let m = mock_weather().unwrap();
        assert!(matches!(
            m.dense_transition_matrix(Some(&["Sunny", "Foggy"])),
            Err(HmmError::UnknownState(name)) if name == "Foggy"
        ));
        assert!(matches!(
            m.dense_transition_matrix(Some(&["Sunny", "Sunny"])),
            Err(HmmError::DuplicateState(_))
        ));
    }
}

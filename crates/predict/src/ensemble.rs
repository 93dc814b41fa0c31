//! Prediction ensembles: one row per input value, one column per draw.

use ndarray::{Array2, ArrayView1, Axis};

use crate::error::PredictError;

/// A finite `(n_inputs, n_draws)` matrix of predicted values.
#[derive(Debug, Clone, PartialEq)]
pub struct Ensemble {
    values: Array2<f64>,
}

impl Ensemble {
    /// Wraps `values`, rejecting any non-finite entry.
    pub(crate) fn new(values: Array2<f64>) -> Result<Self, PredictError> {
        if let Some(((row, col), _)) = values.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(PredictError::NonFiniteEnsemble { row, col });
        }
        Ok(Self { values })
    }

    /// The underlying matrix.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Consumes the ensemble and returns the matrix.
    pub fn into_inner(self) -> Array2<f64> {
        self.values
    }

    /// `(n_inputs, n_draws)`.
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    pub fn n_inputs(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_draws(&self) -> usize {
        self.values.ncols()
    }

    /// Ensemble members for input `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= n_inputs()`.
    pub fn row(&self, i: usize) -> ArrayView1<'_, f64> {
        self.values.row(i)
    }

    /// Iterates over the rows in input order.
    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, f64>> + '_ {
        self.values.axis_iter(Axis(0))
    }

    /// Mean across draws for each input.
    pub fn row_means(&self) -> Vec<f64> {
        self.rows().map(|r| bayspar_stats::mean(&r.to_vec())).collect()
    }

    /// Sample standard deviation across draws for each input.
    pub fn row_stds(&self) -> Vec<f64> {
        self.rows().map(|r| bayspar_stats::sd(&r.to_vec())).collect()
    }

    /// Row-major copy, one `Vec` per input.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(|r| r.to_vec()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn rejects_non_finite() {
        let err = Ensemble::new(array![[1.0, 2.0], [3.0, f64::NAN]]).unwrap_err();
        assert!(matches!(
            err,
            PredictError::NonFiniteEnsemble { row: 1, col: 1 }
        ));
        assert!(Ensemble::new(array![[f64::INFINITY]]).is_err());
    }

    #[test]
    fn shape_and_rows() {
        let e = Ensemble::new(array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(e.shape(), (2, 3));
        assert_eq!(e.n_inputs(), 2);
        assert_eq!(e.n_draws(), 3);
        assert_eq!(e.row(1).to_vec(), vec![4.0, 5.0, 6.0]);
        assert_eq!(e.to_rows(), vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    }

    #[test]
    fn row_means() {
        let e = Ensemble::new(array![[1.0, 2.0, 3.0], [4.0, 5.0, 9.0]]).unwrap();
        let m = e.row_means();
        assert_relative_eq!(m[0], 2.0);
        assert_relative_eq!(m[1], 6.0);
    }

    #[test]
    fn row_stds() {
        let e = Ensemble::new(array![[1.0, 1.0, 1.0], [3.0, 7.0, 5.0]]).unwrap();
        let s = e.row_stds();
        assert_eq!(s[0], 0.0);
        assert_relative_eq!(s[1], 2.0);
    }
}

// Design matrix construction
//
// One row per trial, one column per inlining site plus a trailing constant
// column. Site columns hold 1.0/0.0 from the site selector; the constant
// column holds the mean observed time in every row, which keeps it on the
// same scale as the target vector.

use super::statistics::mean;
use super::SolveError;
use crate::records::BenchmarkTrial;
use crate::selection;
use nalgebra::{DMatrix, DVector};

/// Regression inputs reconstructed from a trial list
#[derive(Debug, Clone)]
pub struct DesignMatrix {
    /// `trials x (sites + 1)` indicator matrix
    pub matrix: DMatrix<f64>,
    /// Observed times, in trial order
    pub target: DVector<f64>,
    /// Value written into the constant column of every row
    pub bias: f64,
}

impl DesignMatrix {
    /// Build the matrix and target vector for `site_count` sites
    pub fn build(trials: &[BenchmarkTrial], site_count: usize) -> Result<Self, SolveError> {
        if trials.is_empty() {
            return Err(SolveError::EmptyTrials);
        }

        let times: Vec<f64> = trials.iter().map(|t| t.time).collect();
        let bias = mean(&times);
        let cols = site_count + 1;

        let mut data = Vec::with_capacity(trials.len() * cols);
        for trial in trials {
            let row = selection::select(trial.seed, trial.threshold, site_count);
            data.extend(row.into_iter().map(|active| if active { 1.0 } else { 0.0 }));
            data.push(bias);
        }

        let matrix = DMatrix::from_row_slice(trials.len(), cols, &data);
        let target = DVector::from_vec(times);

        tracing::debug!(
            "Built {}x{} design matrix (constant column = {})",
            matrix.nrows(),
            matrix.ncols(),
            bias
        );

        Ok(Self {
            matrix,
            target,
            bias,
        })
    }

    /// Number of trials (rows)
    pub fn trial_count(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of unknowns: sites plus the constant term
    pub fn unknown_count(&self) -> usize {
        self.matrix.ncols()
    }
}

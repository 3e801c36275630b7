// Summary statistics over observed trial times
//
// Min, max and median come from a sorted copy; the trial list itself keeps
// its input order for matrix construction.

use super::SolveError;
use crate::records::BenchmarkTrial;

/// Min/median/mean/max of the observed trial times
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialSummary {
    pub count: usize,
    pub min: f64,
    pub median: f64,
    pub mean: f64,
    pub max: f64,
}

impl TrialSummary {
    /// Summarize a non-empty slice of times
    pub fn from_times(times: &[f64]) -> Result<Self, SolveError> {
        if times.is_empty() {
            return Err(SolveError::EmptyTrials);
        }

        let mut sorted = times.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        Ok(Self {
            count: n,
            min: sorted[0],
            median: median_of_sorted(&sorted),
            mean: mean(times),
            max: sorted[n - 1],
        })
    }

    /// Summarize the observed times of a trial list
    pub fn from_trials(trials: &[BenchmarkTrial]) -> Result<Self, SolveError> {
        let times: Vec<f64> = trials.iter().map(|t| t.time).collect();
        Self::from_times(&times)
    }
}

/// Median of an ascending, non-empty slice
///
/// Averages the two middle values for even lengths; for odd lengths both
/// indices land on the same element.
pub fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    (sorted[(n - 1) / 2] + sorted[n / 2]) / 2.0
}

/// Arithmetic mean, summed in input order
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

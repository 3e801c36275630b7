// Least-squares estimation of per-site inlining effects
//
// Each randomized trial turned on a seed-determined subset of inlining sites
// and produced one observed benchmark time. Rebuilding each trial's subset
// gives a linear system
//
//     time[t] = sum_i active[t][i] * coef[i] + mean_time * coef[constant]
//
// whose least-squares solution estimates how much each site contributes.
// Negative coefficients are sites that made the benchmark faster.
//
// Implementation:
// - fit: summary, matrix build and solve, with the last two profiled
// - design: rows rebuilt with the same selector that generated the trials
// - solver: nalgebra SVD with an explicit rank check
// - statistics: min/median/mean/max of the observed times for the report

mod config;
mod design;
mod solver;
mod statistics;

pub use config::SolveConfig;
pub use design::DesignMatrix;
pub use solver::{solve, solve_least_squares};
pub use statistics::{mean, median_of_sorted, TrialSummary};

use crate::profiling::{ProfilingCategory, ProfilingContext};
use crate::records::BenchmarkTrial;
use thiserror::Error;

/// Errors raised while building or solving the regression
#[derive(Error, Debug)]
pub enum SolveError {
    #[error("no benchmark trials to solve against")]
    EmptyTrials,

    #[error("design matrix is rank deficient (rank {rank} of {columns} columns); add trials or drop sites")]
    RankDeficient { rank: usize, columns: usize },

    #[error("least-squares decomposition failed: {0}")]
    Decomposition(String),

    #[error("non-finite value in least-squares system or solution")]
    NonFinite,

    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),
}

/// Solved regression: one coefficient per site, then the constant term
#[derive(Debug, Clone)]
pub struct RegressionFit {
    pub coefficients: Vec<f64>,
    pub summary: TrialSummary,
}

/// Build the design matrix for `site_count` sites and solve it
///
/// Matrix construction and the solve are timed into `profile`.
pub fn fit(
    trials: &[BenchmarkTrial],
    site_count: usize,
    config: &SolveConfig,
    profile: &mut ProfilingContext,
) -> Result<RegressionFit, SolveError> {
    let summary = TrialSummary::from_trials(trials)?;
    let design = profile.measure(ProfilingCategory::MatrixBuild, || {
        DesignMatrix::build(trials, site_count)
    })?;

    tracing::debug!(
        "Solving {} trials for {} unknowns",
        design.trial_count(),
        design.unknown_count()
    );
    let coefficients = profile.measure(ProfilingCategory::Solve, || solve(&design, config))?;

    Ok(RegressionFit {
        coefficients,
        summary,
    })
}

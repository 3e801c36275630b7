// Ordinary least-squares solve via SVD
//
// nalgebra's QR solve only handles square systems, and the design matrix is
// either tall (more trials than sites) or, for large experiments, wide, so the
// solve goes through the singular value decomposition. A rank check runs
// first: the system is degenerate when its rank falls below min(rows, cols).
// A wide system with full row rank fits every trial exactly and gets the
// minimum-norm solution.

use super::config::SolveConfig;
use super::design::DesignMatrix;
use super::SolveError;
use nalgebra::{DMatrix, DVector};

/// Solve `min ||a x - b||^2` for `x`
pub fn solve_least_squares(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    config: &SolveConfig,
) -> Result<DVector<f64>, SolveError> {
    config.validate().map_err(SolveError::InvalidConfig)?;

    let (rows, cols) = a.shape();
    if rows == 0 {
        return Err(SolveError::EmptyTrials);
    }
    if b.len() != rows {
        return Err(SolveError::Decomposition(format!(
            "target has {} entries but matrix has {} rows",
            b.len(),
            rows
        )));
    }
    if a.iter().chain(b.iter()).any(|v| !v.is_finite()) {
        return Err(SolveError::NonFinite);
    }

    let svd = a.clone().svd(true, true);
    let largest = svd.singular_values.max();
    let tolerance = config.tolerance(rows, cols, largest);
    let rank = svd.rank(tolerance);

    tracing::debug!(
        "SVD of {}x{} matrix: largest singular value {}, tolerance {}, rank {}",
        rows,
        cols,
        largest,
        tolerance,
        rank
    );

    if rank < rows.min(cols) {
        return Err(SolveError::RankDeficient {
            rank,
            columns: cols,
        });
    }

    let x = svd
        .solve(b, tolerance)
        .map_err(|e| SolveError::Decomposition(e.to_string()))?;

    if x.iter().any(|v| !v.is_finite()) {
        return Err(SolveError::NonFinite);
    }

    Ok(x)
}

/// Solve a design matrix for one coefficient per site plus the constant term
pub fn solve(design: &DesignMatrix, config: &SolveConfig) -> Result<Vec<f64>, SolveError> {
    let x = solve_least_squares(&design.matrix, &design.target, config)?;
    Ok(x.iter().copied().collect())
}

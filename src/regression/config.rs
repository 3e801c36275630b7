// Configuration for the least-squares solve
//
// The solve goes through an SVD, so the only tunable is where small singular
// values stop counting towards the rank.

/// Configuration for the least-squares solve
///
/// # Example
/// ```
/// use solve_inlines::regression::SolveConfig;
///
/// let config = SolveConfig::default();
/// assert!(config.rcond.is_none());
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SolveConfig {
    /// Relative singular-value cutoff
    ///
    /// Singular values at or below `rcond * largest` are treated as zero.
    /// `None` uses `max(rows, cols) * f64::EPSILON`, the usual machine
    /// precision rank cutoff.
    pub rcond: Option<f64>,
}

impl SolveConfig {
    /// Absolute singular-value tolerance for a matrix of the given shape
    pub fn tolerance(&self, rows: usize, cols: usize, largest_singular_value: f64) -> f64 {
        let rcond = self
            .rcond
            .unwrap_or_else(|| rows.max(cols) as f64 * f64::EPSILON);
        rcond * largest_singular_value
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(rcond) = self.rcond {
            if !rcond.is_finite() || !(0.0..1.0).contains(&rcond) {
                return Err(format!("rcond must be in [0, 1), got {}", rcond));
            }
        }
        Ok(())
    }
}

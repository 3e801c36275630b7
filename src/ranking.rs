//! Ranking of solved coefficients
//!
//! Coefficients are ordered ascending, so the most beneficial sites (most
//! negative coefficients) come first. The last coefficient index is the
//! synthetic constant term: it takes part in the ordering, but best/worst
//! lists skip it and widen their window by one so that they still name
//! `n` real sites.

/// Number of entries shown at each end of the full report
pub const REPORT_LIMIT: usize = 50;

/// Benefit checkpoints are only traced within this many leading entries
pub const TRACE_LIMIT: usize = 50;

/// One row of the percentile table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percentile {
    /// 0, 10, ..., 100
    pub percent: usize,
    /// Position in the sorted order
    pub position: usize,
    pub value: f64,
}

/// A point where cumulative benefit crossed the next whole unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenefitCheckpoint {
    /// Negative coefficients counted so far
    pub count: usize,
    /// Sum of those coefficients
    pub benefit: f64,
    /// Coefficient that crossed the threshold
    pub last: f64,
}

/// Result of walking the negative coefficients in ascending order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BenefitScan {
    pub negative_count: usize,
    pub total_benefit: f64,
    pub checkpoints: Vec<BenefitCheckpoint>,
}

/// Coefficients together with their ascending order
#[derive(Debug, Clone)]
pub struct Ranking {
    coefficients: Vec<f64>,
    order: Vec<usize>,
}

impl Ranking {
    /// Rank a coefficient vector whose last entry is the constant term
    ///
    /// # Panics
    /// Panics if `coefficients` is empty; a solved system always has at
    /// least the constant term.
    pub fn new(coefficients: Vec<f64>) -> Self {
        assert!(
            !coefficients.is_empty(),
            "coefficient vector must include the constant term"
        );

        let mut order: Vec<usize> = (0..coefficients.len()).collect();
        order.sort_by(|&a, &b| coefficients[a].total_cmp(&coefficients[b]));

        Self {
            coefficients,
            order,
        }
    }

    /// Number of ranked entries, including the constant term
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Never true for a solved system
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Index of the synthetic constant term
    pub fn constant_index(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Whether an index refers to the constant term rather than a site
    pub fn is_constant(&self, index: usize) -> bool {
        index == self.constant_index()
    }

    /// Coefficient of the constant term
    pub fn constant_term(&self) -> f64 {
        self.coefficients[self.constant_index()]
    }

    pub fn coefficient(&self, index: usize) -> f64 {
        self.coefficients[index]
    }

    /// Indices in ascending coefficient order
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Up to `n` site indices with the smallest coefficients, best first
    pub fn best(&self, n: usize) -> Vec<usize> {
        let mut width = n.min(self.len());
        if width < self.len() && self.order[..width].iter().any(|&i| self.is_constant(i)) {
            width += 1;
        }
        self.sites_only(&self.order[..width])
    }

    /// Up to `n` site indices with the largest coefficients, worst last
    pub fn worst(&self, n: usize) -> Vec<usize> {
        let len = self.len();
        let mut width = n.min(len);
        if width < len && self.order[len - width..].iter().any(|&i| self.is_constant(i)) {
            width += 1;
        }
        self.sites_only(&self.order[len - width..])
    }

    fn sites_only(&self, window: &[usize]) -> Vec<usize> {
        window
            .iter()
            .copied()
            .filter(|&i| !self.is_constant(i))
            .collect()
    }

    /// Sorted position used for the `percent`th percentile
    ///
    /// `(percent / 10 * len + 5) / 10`, clamped to the last position.
    pub fn percentile_position(&self, percent: usize) -> usize {
        let position = (percent / 10 * self.len() + 5) / 10;
        position.min(self.len() - 1)
    }

    /// The 0th, 10th, ..., 100th percentiles of all coefficients
    pub fn percentiles(&self) -> Vec<Percentile> {
        (0..=10)
            .map(|step| {
                let percent = step * 10;
                let position = self.percentile_position(percent);
                Percentile {
                    percent,
                    position,
                    value: self.coefficients[self.order[position]],
                }
            })
            .collect()
    }

    /// Sorted positions of the `REPORT_LIMIT` (or fewer) best entries
    pub fn head_positions(&self) -> std::ops::Range<usize> {
        0..REPORT_LIMIT.min(self.len())
    }

    /// Sorted positions of the `REPORT_LIMIT` (or fewer) worst entries
    pub fn tail_positions(&self) -> std::ops::Range<usize> {
        self.len() - REPORT_LIMIT.min(self.len())..self.len()
    }

    /// Count and sum the negative coefficients, smallest first
    ///
    /// Stops at the first non-negative coefficient. Each time the running
    /// sum reaches the next whole unit below zero (-1, -2, ...) a checkpoint
    /// is taken if it happens within the first `TRACE_LIMIT` entries.
    pub fn benefit_scan(&self) -> BenefitScan {
        let mut scan = BenefitScan::default();
        let mut next_mark = -1.0;

        for (position, &index) in self.order.iter().enumerate() {
            let value = self.coefficients[index];
            if value >= 0.0 {
                break;
            }

            scan.negative_count += 1;
            scan.total_benefit += value;

            if scan.total_benefit <= next_mark {
                if position < TRACE_LIMIT {
                    scan.checkpoints.push(BenefitCheckpoint {
                        count: scan.negative_count,
                        benefit: scan.total_benefit,
                        last: value,
                    });
                }
                next_mark -= 1.0;
            }
        }

        scan
    }
}

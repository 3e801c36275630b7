//! Run profiling for solve-inlines
//!
//! Solving for thousands of inlining sites can take a while, so a run can
//! record how long each stage took. `ProfileGuard` is created at the top of
//! `main` and writes its JSON summary when dropped, so the profile file is
//! complete on every exit path: normal completion, usage exits and fatal
//! errors propagated with `?`.

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Stages of a run that can be profiled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfilingCategory {
    /// Reading and parsing the inlines and trials files
    Parse,
    /// Rebuilding the design matrix from trial seeds
    MatrixBuild,
    /// SVD and least-squares solve
    Solve,
    /// Ranking coefficients and writing output
    Report,
}

impl ProfilingCategory {
    pub const ALL: [ProfilingCategory; 4] = [
        ProfilingCategory::Parse,
        ProfilingCategory::MatrixBuild,
        ProfilingCategory::Solve,
        ProfilingCategory::Report,
    ];
}

/// Profiling context that tracks time spent in each stage
#[derive(Debug)]
pub struct ProfilingContext {
    parse_time: Duration,
    matrix_time: Duration,
    solve_time: Duration,
    report_time: Duration,
    start_time: Instant,
}

impl Default for ProfilingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfilingContext {
    /// Create a new profiling context, starting the wall clock
    pub fn new() -> Self {
        Self {
            parse_time: Duration::ZERO,
            matrix_time: Duration::ZERO,
            solve_time: Duration::ZERO,
            report_time: Duration::ZERO,
            start_time: Instant::now(),
        }
    }

    /// Measure the time taken by an operation
    ///
    /// # Example
    /// ```
    /// use solve_inlines::profiling::{ProfilingCategory, ProfilingContext};
    ///
    /// let mut ctx = ProfilingContext::new();
    /// let result = ctx.measure(ProfilingCategory::Report, || format!("test"));
    /// assert_eq!(result, "test");
    /// ```
    pub fn measure<F, R>(&mut self, category: ProfilingCategory, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        self.record_time(category, start.elapsed());
        result
    }

    /// Record time spent in a category
    pub fn record_time(&mut self, category: ProfilingCategory, duration: Duration) {
        match category {
            ProfilingCategory::Parse => self.parse_time += duration,
            ProfilingCategory::MatrixBuild => self.matrix_time += duration,
            ProfilingCategory::Solve => self.solve_time += duration,
            ProfilingCategory::Report => self.report_time += duration,
        }
    }

    /// Get time spent in a specific category
    pub fn time_in_category(&self, category: ProfilingCategory) -> Duration {
        match category {
            ProfilingCategory::Parse => self.parse_time,
            ProfilingCategory::MatrixBuild => self.matrix_time,
            ProfilingCategory::Solve => self.solve_time,
            ProfilingCategory::Report => self.report_time,
        }
    }

    /// Get the total wall clock time since profiling started
    pub fn wall_time(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Sum of all measured stages
    pub fn measured_time(&self) -> Duration {
        self.parse_time + self.matrix_time + self.solve_time + self.report_time
    }

    /// Snapshot for serialization
    pub fn summary(&self, completed: bool) -> ProfileSummary {
        let wall = self.wall_time();
        let stages = ProfilingCategory::ALL
            .iter()
            .map(|&category| {
                let time = self.time_in_category(category);
                StageTiming {
                    stage: category,
                    seconds: time.as_secs_f64(),
                    percent_of_wall: percent(time, wall),
                }
            })
            .collect();

        ProfileSummary {
            completed,
            wall_seconds: wall.as_secs_f64(),
            measured_seconds: self.measured_time().as_secs_f64(),
            stages,
        }
    }
}

fn percent(part: Duration, whole: Duration) -> f64 {
    if whole.is_zero() {
        0.0
    } else {
        part.as_secs_f64() / whole.as_secs_f64() * 100.0
    }
}

/// Time spent in one stage
#[derive(Debug, Clone, Serialize)]
pub struct StageTiming {
    pub stage: ProfilingCategory,
    pub seconds: f64,
    pub percent_of_wall: f64,
}

/// Profile written at the end of a run
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    /// False when the run ended early on an error or usage exit
    pub completed: bool,
    pub wall_seconds: f64,
    pub measured_seconds: f64,
    pub stages: Vec<StageTiming>,
}

/// Scoped profile capture, flushed to its file on drop
#[derive(Debug)]
pub struct ProfileGuard {
    context: ProfilingContext,
    sink: Option<(PathBuf, BufWriter<File>)>,
    completed: bool,
}

impl ProfileGuard {
    /// Start profiling, writing to `path` if one is given
    ///
    /// The file is created immediately so an unwritable path fails before
    /// any work is done.
    pub fn start(path: Option<&Path>) -> std::io::Result<Self> {
        let sink = match path {
            Some(p) => Some((p.to_path_buf(), BufWriter::new(File::create(p)?))),
            None => None,
        };

        Ok(Self {
            context: ProfilingContext::new(),
            sink,
            completed: false,
        })
    }

    /// Time one stage of the run
    pub fn measure<F, R>(&mut self, category: ProfilingCategory, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        self.context.measure(category, f)
    }

    /// Stage timers, for library calls that time their own stages
    pub fn context_mut(&mut self) -> &mut ProfilingContext {
        &mut self.context
    }

    /// Mark the run as having finished normally
    pub fn complete(&mut self) {
        self.completed = true;
    }

    fn write_profile(&mut self) -> std::io::Result<()> {
        let summary = self.context.summary(self.completed);
        tracing::debug!(
            "Run profile: wall {:.3}s, measured {:.3}s, completed {}",
            summary.wall_seconds,
            summary.measured_seconds,
            summary.completed
        );

        if let Some((_, writer)) = self.sink.as_mut() {
            serde_json::to_writer_pretty(&mut *writer, &summary)?;
            writeln!(writer)?;
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for ProfileGuard {
    fn drop(&mut self) {
        if let Err(e) = self.write_profile() {
            let path = self
                .sink
                .as_ref()
                .map(|(p, _)| p.display().to_string())
                .unwrap_or_default();
            eprintln!("solve-inlines: failed to write profile {}: {}", path, e);
        }
    }
}

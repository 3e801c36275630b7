//! CLI argument parsing for solve-inlines

use crate::selection::DEFAULT_THRESHOLD;
use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

/// Extended usage shown after argument errors
pub const USAGE: &str = "\
solve-inlines [--best N] [--worst N] INLINES_FILE RANDOM_BENCH_FILE
or
solve-inlines --seed N [--threshold N] INLINES_FILE > INLINES_SUBSET_FILE

The first form combines an inlines file with a file containing lines summarizing
randomized choice benchmark runs, where each line has the form
\"threshold,seed,result\" and threshold is a number between 0 and 100 inclusive,
to allow a least-squares estimation of which inlining sites are most important.
--best and --worst modify the output to be ordered lists of the best (best-first)
and worst (worst-last) lines from the point of view of improving benchmark
performance.

The second form uses seed and threshold (default 67) to generate an input for a
single randomized choice benchmark run. The subset file is written to standard
output.

Because solving for the best/worst inlines can be time-consuming, the
--cpu-profile FILE option records how long each stage of the run took.";

#[derive(Parser, Debug)]
#[command(name = "solve-inlines")]
#[command(version)]
#[command(
    about = "Least-squares estimate of which inlining decisions affect a benchmark",
    long_about = None,
    after_long_help = USAGE
)]
pub struct Cli {
    /// Print the best N inlines in CSV form (best first)
    #[arg(long = "best", value_name = "N", default_value = "0")]
    pub best: usize,

    /// Print the worst N inlines in CSV form (worst last)
    #[arg(long = "worst", value_name = "N", default_value = "0")]
    pub worst: usize,

    /// Seed for generating a random selection of the inlines file (0 = none)
    #[arg(long = "seed", value_name = "N", allow_negative_numbers = true)]
    pub seed: Option<i64>,

    /// Percentage (0-100) of randomly selected lines to include
    #[arg(
        long = "threshold",
        value_name = "N",
        default_value_t = DEFAULT_THRESHOLD,
        allow_negative_numbers = true
    )]
    pub threshold: i32,

    /// Write a run profile (JSON stage timings) to FILE
    #[arg(long = "cpu-profile", value_name = "FILE")]
    pub cpu_profile: Option<PathBuf>,

    /// Enable debug tracing on stderr
    #[arg(long = "debug")]
    pub debug: bool,

    /// Inlines file, followed by the randomized benchmark file unless --seed is given
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,
}

/// Invalid combination of arguments
#[derive(Error, Debug, PartialEq, Eq)]
pub enum UsageError {
    #[error("two files are required.")]
    NeedTwoFiles,

    #[error("--seed is incompatible with --best, --worst, and requires a single file argument")]
    SeedMisuse,
}

/// What a run should do, resolved from the arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Write the subset of inlines selected by one seed/threshold pair
    Subset {
        seed: i64,
        threshold: i32,
        inlines: PathBuf,
    },
    /// Solve, then print ranked best/worst records as CSV
    Rank {
        best: usize,
        worst: usize,
        inlines: PathBuf,
        trials: PathBuf,
    },
    /// Solve, then print the full report
    Report { inlines: PathBuf, trials: PathBuf },
}

impl Cli {
    /// Resolve the argument combination into a run mode
    ///
    /// A seed of 0 is the same as no seed.
    pub fn mode(&self) -> Result<Mode, UsageError> {
        match self.seed.filter(|&seed| seed != 0) {
            None => {
                let [inlines, trials] = self.files.as_slice() else {
                    return Err(UsageError::NeedTwoFiles);
                };
                let (inlines, trials) = (inlines.clone(), trials.clone());

                if self.best > 0 || self.worst > 0 {
                    Ok(Mode::Rank {
                        best: self.best,
                        worst: self.worst,
                        inlines,
                        trials,
                    })
                } else {
                    Ok(Mode::Report { inlines, trials })
                }
            }
            Some(seed) => {
                if self.best > 0 || self.worst > 0 || self.files.len() != 1 {
                    return Err(UsageError::SeedMisuse);
                }
                Ok(Mode::Subset {
                    seed,
                    threshold: self.threshold,
                    inlines: self.files[0].clone(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_report_mode() {
        let cli = Cli::parse_from(["solve-inlines", "inlines.csv", "bench.csv"]);
        assert_eq!(
            cli.mode().unwrap(),
            Mode::Report {
                inlines: PathBuf::from("inlines.csv"),
                trials: PathBuf::from("bench.csv"),
            }
        );
    }

    #[test]
    fn test_cli_rank_mode() {
        let cli = Cli::parse_from([
            "solve-inlines",
            "--best",
            "5",
            "--worst",
            "3",
            "inlines.csv",
            "bench.csv",
        ]);
        match cli.mode().unwrap() {
            Mode::Rank { best, worst, .. } => {
                assert_eq!(best, 5);
                assert_eq!(worst, 3);
            }
            other => panic!("Expected Rank mode, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_subset_mode() {
        let cli = Cli::parse_from(["solve-inlines", "--seed", "42", "inlines.csv"]);
        assert_eq!(
            cli.mode().unwrap(),
            Mode::Subset {
                seed: 42,
                threshold: 67,
                inlines: PathBuf::from("inlines.csv"),
            }
        );
    }

    #[test]
    fn test_cli_threshold_custom() {
        let cli = Cli::parse_from([
            "solve-inlines",
            "--seed",
            "42",
            "--threshold",
            "30",
            "inlines.csv",
        ]);
        assert_eq!(cli.threshold, 30);
    }

    #[test]
    fn test_cli_threshold_default() {
        let cli = Cli::parse_from(["solve-inlines", "a", "b"]);
        assert_eq!(cli.threshold, DEFAULT_THRESHOLD);
        assert_eq!(cli.best, 0);
        assert_eq!(cli.worst, 0);
        assert!(cli.seed.is_none());
        assert!(cli.cpu_profile.is_none());
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_negative_seed() {
        let cli = Cli::parse_from(["solve-inlines", "--seed", "-9", "inlines.csv"]);
        assert_eq!(cli.seed, Some(-9));
    }

    #[test]
    fn test_cli_zero_seed_is_no_seed() {
        let cli = Cli::parse_from(["solve-inlines", "--seed", "0", "inlines.csv", "bench.csv"]);
        assert_eq!(
            cli.mode().unwrap(),
            Mode::Report {
                inlines: PathBuf::from("inlines.csv"),
                trials: PathBuf::from("bench.csv"),
            }
        );

        let cli = Cli::parse_from(["solve-inlines", "--seed", "0", "inlines.csv"]);
        assert_eq!(cli.mode(), Err(UsageError::NeedTwoFiles));
    }

    #[test]
    fn test_cli_negative_seed_selects_subset() {
        let cli = Cli::parse_from(["solve-inlines", "--seed", "-3", "inlines.csv"]);
        assert!(matches!(cli.mode().unwrap(), Mode::Subset { seed: -3, .. }));
    }

    #[test]
    fn test_cli_needs_two_files() {
        let cli = Cli::parse_from(["solve-inlines", "inlines.csv"]);
        assert_eq!(cli.mode(), Err(UsageError::NeedTwoFiles));

        let cli = Cli::parse_from(["solve-inlines", "a", "b", "c"]);
        assert_eq!(cli.mode(), Err(UsageError::NeedTwoFiles));
    }

    #[test]
    fn test_cli_seed_with_best_rejected() {
        let cli = Cli::parse_from(["solve-inlines", "--seed", "1", "--best", "2", "inlines.csv"]);
        assert_eq!(cli.mode(), Err(UsageError::SeedMisuse));
    }

    #[test]
    fn test_cli_seed_with_two_files_rejected() {
        let cli = Cli::parse_from(["solve-inlines", "--seed", "1", "a", "b"]);
        assert_eq!(cli.mode(), Err(UsageError::SeedMisuse));
    }

    #[test]
    fn test_cli_profile_path() {
        let cli = Cli::parse_from(["solve-inlines", "--cpu-profile", "p.json", "a", "b"]);
        assert_eq!(cli.cpu_profile, Some(PathBuf::from("p.json")));
    }
}

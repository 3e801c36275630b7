//! Inlining records and randomized benchmark trials
//!
//! Both inputs are comma-separated text with `#` comments. An inlining
//! record line looks like
//!
//! ```text
//! src/reflectlite/value.go:440:25: ,front_end,INLINE_SITE,reflectlite,Value.assignTo,440,25,reflectlite,directlyAssignable,217
//! ```
//!
//! and a trial line is `threshold, seed, time[, noise]`.

use crate::csv_input::{self, CsvLine};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Minimum number of fields on an inlining record line
pub const INLINE_FIELD_COUNT: usize = 10;

/// Minimum number of fields on a trial line
pub const TRIAL_FIELD_COUNT: usize = 3;

/// Noise value used when a trial line has no fourth field
pub const NOISE_ABSENT: i32 = -1;

/// Errors raised while reading either input file
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: expected at least {expected} fields, found {found}")]
    MissingField {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid integer in field {field}: {value:?}")]
    InvalidInteger {
        line: usize,
        field: usize,
        value: String,
    },

    #[error("line {line}: invalid number in field {field}: {value:?}")]
    InvalidFloat {
        line: usize,
        field: usize,
        value: String,
    },

    #[error("line {line}: unterminated quoted field")]
    UnterminatedQuote { line: usize },
}

/// A single compiler inlining decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineRecord {
    pub caller_package: String,
    pub caller_function: String,
    pub caller_line: i32,
    pub caller_column: i32,
    pub inline_package: String,
    pub inline_function: String,
    pub inline_size: i32,
    /// Raw fields, kept for reproducing subsets and best/worst lists verbatim
    pub fields: Vec<String>,
}

impl InlineRecord {
    /// Build a record from the raw fields of one input line
    pub fn from_fields(line: usize, fields: Vec<String>) -> Result<Self, ParseError> {
        if fields.len() < INLINE_FIELD_COUNT {
            return Err(ParseError::MissingField {
                line,
                expected: INLINE_FIELD_COUNT,
                found: fields.len(),
            });
        }

        let caller_line = parse_int(line, 5, &fields[5])?;
        let caller_column = parse_int(line, 6, &fields[6])?;
        let inline_size = parse_int(line, 9, &fields[9])?;

        Ok(Self {
            caller_package: fields[3].clone(),
            caller_function: fields[4].clone(),
            caller_line,
            caller_column,
            inline_package: fields[7].clone(),
            inline_function: fields[8].clone(),
            inline_size,
            fields,
        })
    }

    /// The raw fields joined back with commas, without any re-quoting
    pub fn raw_line(&self) -> String {
        self.fields.join(",")
    }
}

/// One randomized build-and-benchmark run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkTrial {
    pub seed: i64,
    pub threshold: i32,
    pub time: f64,
    /// Non-negative when present, [`NOISE_ABSENT`] otherwise. Not used yet.
    pub noise: i32,
}

impl BenchmarkTrial {
    /// Build a trial from the raw fields of one input line
    pub fn from_fields(line: usize, fields: &[String]) -> Result<Self, ParseError> {
        if fields.len() < TRIAL_FIELD_COUNT {
            return Err(ParseError::MissingField {
                line,
                expected: TRIAL_FIELD_COUNT,
                found: fields.len(),
            });
        }

        let threshold = parse_int(line, 0, fields[0].trim())?;
        let seed = parse_int(line, 1, fields[1].trim())?;
        let time = parse_float(line, 2, fields[2].trim())?;
        let noise = match fields.get(3) {
            Some(value) => parse_int(line, 3, value.trim())?,
            None => NOISE_ABSENT,
        };

        Ok(Self {
            seed,
            threshold,
            time,
            noise,
        })
    }
}

/// Parse inlining records from the text of an inlines file
pub fn parse_inlines(text: &str) -> Result<Vec<InlineRecord>, ParseError> {
    data_lines(text)?
        .into_iter()
        .map(|CsvLine { line, fields }| InlineRecord::from_fields(line, fields))
        .collect()
}

/// Parse benchmark trials from the text of a randomized-benchmark file
pub fn parse_benchmarks(text: &str) -> Result<Vec<BenchmarkTrial>, ParseError> {
    data_lines(text)?
        .iter()
        .map(|l| BenchmarkTrial::from_fields(l.line, &l.fields))
        .collect()
}

/// Read and parse an inlines file
pub fn read_inlines(path: &Path) -> Result<Vec<InlineRecord>, ParseError> {
    let records = parse_inlines(&read_text(path)?)?;
    tracing::debug!("Read {} inlining records from {}", records.len(), path.display());
    Ok(records)
}

/// Read and parse a randomized-benchmark file
pub fn read_benchmarks(path: &Path) -> Result<Vec<BenchmarkTrial>, ParseError> {
    let trials = parse_benchmarks(&read_text(path)?)?;
    tracing::debug!("Read {} benchmark trials from {}", trials.len(), path.display());
    Ok(trials)
}

fn read_text(path: &Path) -> Result<String, ParseError> {
    std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn data_lines(text: &str) -> Result<Vec<CsvLine>, ParseError> {
    csv_input::read_lines(text).map_err(|e| ParseError::UnterminatedQuote { line: e.line })
}

fn parse_int<T: std::str::FromStr>(line: usize, field: usize, value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidInteger {
        line,
        field,
        value: value.to_string(),
    })
}

fn parse_float(line: usize, field: usize, value: &str) -> Result<f64, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidFloat {
        line,
        field,
        value: value.to_string(),
    })
}

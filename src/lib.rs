//! solve-inlines - least-squares ranking of compiler inlining decisions
//!
//! Each randomized benchmark trial builds a program with a seed-selected
//! subset of inlining sites enabled. Rebuilding those subsets from the
//! seeds gives a linear system mapping active sites to observed times,
//! whose least-squares solution estimates each site's effect on the
//! benchmark. This library provides the site selector, the regression,
//! coefficient ranking and the text reports built on top of them.

pub mod cli;
pub mod csv_input;
pub mod csv_output;
pub mod profiling;
pub mod ranking;
pub mod records;
pub mod regression;
pub mod report;
pub mod selection;

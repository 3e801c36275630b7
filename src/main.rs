use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use solve_inlines::cli::{Cli, Mode};
use solve_inlines::profiling::{ProfileGuard, ProfilingCategory};
use solve_inlines::ranking::Ranking;
use solve_inlines::records::{self, InlineRecord};
use solve_inlines::regression::{self, SolveConfig, TrialSummary};
use solve_inlines::report;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Inputs and solution shared by the best/worst and full-report modes
struct Solved {
    records: Vec<InlineRecord>,
    summary: TrialSummary,
    ranking: Ranking,
}

/// Parse both files, rebuild the design matrix and solve it
fn solve_files(inlines: &Path, trials: &Path, profile: &mut ProfileGuard) -> Result<Solved> {
    let records = profile.measure(ProfilingCategory::Parse, || records::read_inlines(inlines))?;
    let trials = profile.measure(ProfilingCategory::Parse, || records::read_benchmarks(trials))?;

    let fit = regression::fit(
        &trials,
        records.len(),
        &SolveConfig::default(),
        profile.context_mut(),
    )
    .with_context(|| {
        format!(
            "solving for {} inlining sites over {} trials",
            records.len(),
            trials.len()
        )
    })?;

    Ok(Solved {
        records,
        summary: fit.summary,
        ranking: Ranking::new(fit.coefficients),
    })
}

/// Execute the selected mode, writing results to stdout
fn run(mode: Mode, profile: &mut ProfileGuard) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match mode {
        Mode::Subset {
            seed,
            threshold,
            inlines,
        } => {
            let records =
                profile.measure(ProfilingCategory::Parse, || records::read_inlines(&inlines))?;
            profile.measure(ProfilingCategory::Report, || {
                report::write_subset(&mut out, &records, seed, threshold)
            })?;
        }
        Mode::Rank {
            best,
            worst,
            inlines,
            trials,
        } => {
            let solved = solve_files(&inlines, &trials, profile)?;
            profile.measure(ProfilingCategory::Report, || -> io::Result<()> {
                report::write_header(&mut out, solved.records.len(), &solved.summary)?;
                report::write_best_worst(&mut out, &solved.records, &solved.ranking, best, worst)
            })?;
        }
        Mode::Report { inlines, trials } => {
            let solved = solve_files(&inlines, &trials, profile)?;
            profile.measure(ProfilingCategory::Report, || {
                report::write_full_report(&mut out, &solved.records, &solved.summary, &solved.ranking)
            })?;
        }
    }

    out.flush().context("failed to write output")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    // Profile covers the whole run and is written when it goes out of scope
    let mut profile = ProfileGuard::start(args.cpu_profile.as_deref()).with_context(|| {
        format!(
            "failed to create profile file {}",
            args.cpu_profile.as_deref().unwrap_or(Path::new("")).display()
        )
    })?;

    let mode = match args.mode() {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", Cli::command().render_long_help());
            return Ok(());
        }
    };

    run(mode, &mut profile)?;
    profile.complete();
    Ok(())
}

//! Text output for the three run modes
//!
//! - subset: the records a single (seed, threshold) trial activates, as CSV
//! - best/worst: ranked records as raw CSV lines, loadable as an inlines file
//! - full report: summary header, percentiles, both ends of the ranking and
//!   the total alleged benefit of all negative coefficients

use crate::csv_output::CsvOutput;
use crate::ranking::Ranking;
use crate::records::InlineRecord;
use crate::regression::TrialSummary;
use crate::selection;
use std::io::{self, Write};

/// Write the records selected by `seed`/`threshold`, in input order
///
/// Returns the number of records written.
pub fn write_subset<W: Write>(
    out: &mut W,
    records: &[InlineRecord],
    seed: i64,
    threshold: i32,
) -> io::Result<usize> {
    let mask = selection::select(seed, threshold, records.len());

    let mut csv = CsvOutput::new();
    for (record, _) in records.iter().zip(&mask).filter(|&(_, &active)| active) {
        csv.add_record(record);
    }

    out.write_all(csv.to_csv().as_bytes())?;
    tracing::debug!(
        "Subset for seed {} threshold {}: {} of {} records",
        seed,
        threshold,
        csv.len(),
        records.len()
    );
    Ok(csv.len())
}

/// Summary header line; starts with `#` so ranked output stays loadable
pub fn write_header<W: Write>(
    out: &mut W,
    record_count: usize,
    summary: &TrialSummary,
) -> io::Result<()> {
    writeln!(
        out,
        "# Number of inlines is {}, trials is {}, min time is {:.6}, median time is {:.6}, avg time is {:.6}, max time is {:.6}",
        record_count, summary.count, summary.min, summary.median, summary.mean, summary.max
    )
}

/// Write the `best` most beneficial records, then the `worst` least
///
/// Best records come best first; worst records come worst last. A blank
/// line separates the two lists when both are requested.
pub fn write_best_worst<W: Write>(
    out: &mut W,
    records: &[InlineRecord],
    ranking: &Ranking,
    best: usize,
    worst: usize,
) -> io::Result<()> {
    if best > 0 {
        for i in ranking.best(best) {
            writeln!(out, "{}", records[i].raw_line())?;
        }
        if worst > 0 {
            writeln!(out)?;
        }
    }

    if worst > 0 {
        for i in ranking.worst(worst) {
            writeln!(out, "{}", records[i].raw_line())?;
        }
    }

    Ok(())
}

/// Write the full human-readable report
pub fn write_full_report<W: Write>(
    out: &mut W,
    records: &[InlineRecord],
    summary: &TrialSummary,
    ranking: &Ranking,
) -> io::Result<()> {
    write_header(out, records.len(), summary)?;
    writeln!(out, "Base term = {:.6}", ranking.constant_term())?;

    for p in ranking.percentiles() {
        writeln!(
            out,
            "{}th percentile[{}] = {:.6}",
            p.percent, p.position, p.value
        )?;
    }

    for position in ranking.head_positions() {
        write_ranked_entry(out, records, ranking, position)?;
    }
    writeln!(out)?;
    for position in ranking.tail_positions() {
        write_ranked_entry(out, records, ranking, position)?;
    }

    let scan = ranking.benefit_scan();
    for c in &scan.checkpoints {
        writeln!(
            out,
            "At {}, alleged benefit is {:.6}, last = {:.6}",
            c.count, c.benefit, c.last
        )?;
    }
    writeln!(
        out,
        "Number of negative coefficients = {}, alleged total benefit = {:.6}",
        scan.negative_count, scan.total_benefit
    )
}

fn write_ranked_entry<W: Write>(
    out: &mut W,
    records: &[InlineRecord],
    ranking: &Ranking,
    position: usize,
) -> io::Result<()> {
    let index = ranking.order()[position];
    let value = ranking.coefficient(index);

    if ranking.is_constant(index) {
        return writeln!(out, "sorted[{}] = {:.6}, constant term", position, value);
    }

    let rec = &records[index];
    writeln!(
        out,
        "sorted[{}] = {:.6}, {}.{} at {}:{} inlines {}.{}, size {}",
        position,
        value,
        rec.caller_package,
        rec.caller_function,
        rec.caller_line,
        rec.caller_column,
        rec.inline_package,
        rec.inline_function,
        rec.inline_size
    )
}

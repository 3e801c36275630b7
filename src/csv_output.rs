//! CSV output for inlining subsets
//!
//! Subset files are fed back to the compiler as inlines files, so every
//! record is written with its fields as read. Fields are only quoted when
//! reading them back would otherwise split or trim them differently.

use crate::records::InlineRecord;

/// CSV output formatter for inlining records
#[derive(Debug, Default)]
pub struct CsvOutput {
    rows: Vec<String>,
}

impl CsvOutput {
    /// Create an empty formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record, preserving its raw fields
    pub fn add_record(&mut self, record: &InlineRecord) {
        self.rows.push(format_fields(&record.fields));
    }

    /// Number of records added so far
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Generate CSV output as string, one record per line
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        for row in &self.rows {
            output.push_str(row);
            output.push('\n');
        }
        output
    }
}

/// Escape CSV field (handle commas, quotes, newlines, leading whitespace)
pub fn escape_field(field: &str) -> String {
    let needs_quotes = field.contains(&[',', '"', '\r', '\n'][..])
        || field.starts_with(|c: char| c.is_whitespace());

    if needs_quotes {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Format a list of fields as one CSV row (without line terminator)
pub fn format_fields(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

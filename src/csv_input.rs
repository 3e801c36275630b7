//! Minimal comma-separated input reader
//!
//! Handles the subset of CSV that compiler inlining dumps and benchmark
//! summaries actually use:
//! - `#`-prefixed comment lines and blank lines are skipped
//! - fields are split on `,`
//! - double-quoted fields may contain commas and `""` escapes
//!
//! Quoted fields may not span lines.

/// One data line from a CSV input, with its 1-based line number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvLine {
    pub line: usize,
    pub fields: Vec<String>,
}

/// A quoted field was opened but never closed on the same line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnterminatedQuote {
    pub line: usize,
}

/// Split the full text of a CSV input into data lines
pub fn read_lines(text: &str) -> Result<Vec<CsvLine>, UnterminatedQuote> {
    let mut lines = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        if raw.is_empty() || raw.starts_with('#') {
            continue;
        }

        let fields = split_fields(raw).ok_or(UnterminatedQuote { line })?;
        lines.push(CsvLine { line, fields });
    }

    Ok(lines)
}

/// Split a single line into fields, returning `None` on an unterminated quote
fn split_fields(raw: &str) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = raw.chars().peekable();
    let mut in_quotes = false;
    let mut at_field_start = true;

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            ',' => {
                fields.push(std::mem::take(&mut field));
                at_field_start = true;
                continue;
            }
            '"' if at_field_start => in_quotes = true,
            _ => field.push(c),
        }
        at_field_start = false;
    }

    if in_quotes {
        return None;
    }

    fields.push(field);
    Some(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_fields() {
        let lines = read_lines("a,b,c\n").unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].line, 1);
        assert_eq!(lines[0].fields, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let text = "# header\n\n1,2,3\n# trailing\n4,5,6\n";
        let lines = read_lines(text).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].line, 3);
        assert_eq!(lines[1].line, 5);
        assert_eq!(lines[1].fields, vec!["4", "5", "6"]);
    }

    #[test]
    fn test_empty_fields_preserved() {
        let lines = read_lines("x,,y,\n").unwrap();
        assert_eq!(lines[0].fields, vec!["x", "", "y", ""]);
    }

    #[test]
    fn test_quoted_field_with_comma() {
        let lines = read_lines("\"a,b\",c\n").unwrap();
        assert_eq!(lines[0].fields, vec!["a,b", "c"]);
    }

    #[test]
    fn test_quoted_field_with_escaped_quote() {
        let lines = read_lines("\"say \"\"hi\"\"\",z\n").unwrap();
        assert_eq!(lines[0].fields, vec!["say \"hi\"", "z"]);
    }

    #[test]
    fn test_quote_inside_unquoted_field_is_literal() {
        let lines = read_lines("ab\"c,d\n").unwrap();
        assert_eq!(lines[0].fields, vec!["ab\"c", "d"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let lines = read_lines("1,2\r\n3,4\r\n").unwrap();
        assert_eq!(lines[0].fields, vec!["1", "2"]);
        assert_eq!(lines[1].fields, vec!["3", "4"]);
    }

    #[test]
    fn test_unterminated_quote() {
        let err = read_lines("ok,1\n\"broken,2\n").unwrap_err();
        assert_eq!(err, UnterminatedQuote { line: 2 });
    }
}

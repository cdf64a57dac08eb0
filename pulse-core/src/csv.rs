//! Minimal CSV reader for the bad-request inspector.
//!
//! No schema, no coercion, no row errors: a malformed line just yields
//! whatever fields it splits into.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Error, Result};

/// Columns the bad-request inspector renders, in display order.
pub const BAD_REQUEST_COLUMNS: [&str; 10] = [
    "method",
    "path",
    "body",
    "single_q",
    "double_q",
    "dashes",
    "braces",
    "spaces",
    "badwords",
    "Predicted_Label",
];

/// Header name to cell value for one data line.
pub type CsvRow = BTreeMap<String, String>;

/// Parsed upload: headers in file order plus one row per data line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<CsvRow>,
}

impl CsvTable {
    pub fn parse(text: &str) -> Self {
        let lines: Vec<&str> = split_lines(text.trim());
        if lines.len() < 2 {
            return Self::default();
        }

        let headers: Vec<String> = lines[0].split(',').map(|h| h.trim().to_string()).collect();
        let rows = lines[1..]
            .iter()
            .map(|line| {
                let values = split_fields(line);
                headers
                    .iter()
                    .enumerate()
                    .map(|(i, h)| {
                        let cell = values.get(i).map(|v| strip_quotes(v)).unwrap_or("");
                        (h.clone(), cell.to_string())
                    })
                    .collect()
            })
            .collect();

        Self { headers, rows }
    }

    /// Read and parse a local file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Parse CSV text into rows keyed by header name.
pub fn parse_csv(text: &str) -> Vec<CsvRow> {
    CsvTable::parse(text).rows
}

fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect()
}

/// Split on commas that are not inside an open double-quoted span.
fn split_fields(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(&line[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    fields.push(&line[start..]);
    fields
}

/// Drop at most one leading and one trailing quote.
fn strip_quotes(field: &str) -> &str {
    let field = field.strip_prefix('"').unwrap_or(field);
    field.strip_suffix('"').unwrap_or(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn quoted_comma_stays_in_field() {
        let rows = parse_csv("a,b,c\n1,\"2,2\",3");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["a"], "1");
        assert_eq!(rows[0]["b"], "2,2");
        assert_eq!(rows[0]["c"], "3");
    }

    #[test]
    fn header_only_or_empty_yields_nothing() {
        assert!(parse_csv("").is_empty());
        assert!(parse_csv("a,b,c").is_empty());
        assert!(parse_csv("   \n\n  a,b  \n ").is_empty());
    }

    #[test]
    fn crlf_and_outer_whitespace() {
        let rows = parse_csv("\n  method, path \r\nGET,/index\r\nPOST,/login\r\n\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["method"], "GET");
        assert_eq!(rows[1]["path"], "/login");
    }

    #[test]
    fn short_rows_fill_with_empty_strings() {
        let rows = parse_csv("a,b,c\n1");
        assert_eq!(rows[0]["a"], "1");
        assert_eq!(rows[0]["b"], "");
        assert_eq!(rows[0]["c"], "");
    }

    #[test]
    fn surplus_fields_are_ignored() {
        let rows = parse_csv("a,b\n1,2,3,4");
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[0]["b"], "2");
    }

    #[test]
    fn only_one_outer_quote_is_stripped() {
        let rows = parse_csv("a,b\n\"\"x\"\",\"say \"\"hi\"\"\"");
        assert_eq!(rows[0]["a"], "\"x\"");
        assert_eq!(rows[0]["b"], "say \"\"hi\"\"");
    }

    #[test]
    fn header_is_split_naively() {
        let table = CsvTable::parse("\"x,y\",z\n1,2,3");
        assert_eq!(table.headers, vec!["\"x", "y\"", "z"]);
        assert_eq!(table.rows[0]["\"x"], "1");
    }

    #[test]
    fn duplicate_header_keeps_later_value() {
        let rows = parse_csv("a,a\n1,2");
        assert_eq!(rows[0]["a"], "2");
    }

    #[test]
    fn table_keeps_header_order() {
        let table = CsvTable::parse("zeta,alpha\n1,2");
        assert_eq!(table.headers, vec!["zeta", "alpha"]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn load_reads_bad_request_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", BAD_REQUEST_COLUMNS.join(",")).unwrap();
        writeln!(file, "GET,/search,\"q=1,2\",0,0,0,0,0,0,good").unwrap();
        let table = CsvTable::load(file.path()).unwrap();
        assert_eq!(table.headers.len(), BAD_REQUEST_COLUMNS.len());
        assert_eq!(table.rows[0]["body"], "q=1,2");
        assert_eq!(table.rows[0]["Predicted_Label"], "good");
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let err = CsvTable::load("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, Error::Csv { .. }));
    }
}

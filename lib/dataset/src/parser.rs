use clusterx_core::{Record, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, warn};

/// Characters that separate features on a line, besides whitespace
const DELIMITERS: [char; 3] = [',', ';', ':'];

/// Records read from a delimited text source
#[derive(Debug, Clone, Default)]
pub struct ParsedDataset {
    pub records: Vec<Record>,
    /// Numeric plus categorical features per record
    pub feature_count: usize,
    /// Lines dropped because their schema differed from the first line
    pub skipped: usize,
    /// File name, when read from a path
    pub source_name: Option<String>,
}

impl ParsedDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

/// Reads one record per line from comma, semicolon, colon, tab or
/// whitespace separated text.
///
/// Tokens that parse as a finite `f64` become numeric features, everything
/// else is categorical. Non-finite values are accepted only in the exact
/// spellings `NaN` and `Infinity` (optionally signed); `nan`, `inf` and
/// similar tokens stay categorical. The first record fixes the schema; later lines with a
/// different numeric/categorical split are skipped. Reading stops at the
/// first empty line.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimitedParser;

impl DelimitedParser {
    pub fn new() -> Self {
        Self
    }

    /// Split a single line into a record
    pub fn parse_line(&self, line: &str) -> Record {
        let mut numeric = Vec::new();
        let mut categorical = Vec::new();

        for token in line
            .split(|c: char| c.is_whitespace() || DELIMITERS.contains(&c))
            .filter(|t| !t.is_empty())
        {
            match parse_number(token) {
                Some(value) => numeric.push(value),
                None => categorical.push(token.to_string()),
            }
        }

        Record::new(line, numeric, categorical)
    }

    pub fn read<R: BufRead>(&self, reader: R) -> Result<ParsedDataset> {
        let mut records: Vec<Record> = Vec::new();
        let mut skipped = 0;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                debug!(line = index + 1, "empty line, stopping");
                break;
            }

            let record = self.parse_line(line);
            if let Some(first) = records.first() {
                if !first.same_schema(&record) {
                    warn!(
                        line = index + 1,
                        numeric = record.num_numeric(),
                        categorical = record.num_categorical(),
                        expected_numeric = first.num_numeric(),
                        expected_categorical = first.num_categorical(),
                        "skipping line with mismatched features"
                    );
                    skipped += 1;
                    continue;
                }
            }
            records.push(record);
        }

        let feature_count = records.first().map_or(0, Record::num_features);
        info!(records = records.len(), features = feature_count, skipped, "parsed dataset");

        Ok(ParsedDataset {
            records,
            feature_count,
            skipped,
            source_name: None,
        })
    }

    /// Open and read a file
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<ParsedDataset> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut dataset = self.read(BufReader::new(file))?;
        dataset.source_name = path.file_name().map(|n| n.to_string_lossy().into_owned());
        Ok(dataset)
    }
}

/// Parse a numeric token, rejecting `f64`'s lenient non-finite spellings
fn parse_number(token: &str) -> Option<f64> {
    let value = token.parse::<f64>().ok()?;
    if value.is_finite() {
        return Some(value);
    }
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    matches!(unsigned, "NaN" | "Infinity").then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    const YEAST: &str = "ADT1_YEAST  0.58  0.61  0.47  0.13  0.50  0.00  0.48  0.22  MIT\n\
                         ADT2_YEAST  0.43  0.67  0.48  0.27  0.50  0.00  0.53  0.22  MIT\n\
                         ADT3_YEAST  0.64  0.62  0.49  0.15  0.50  0.00  0.53  0.22  MIT\n";

    #[test]
    fn test_parse_numeric_line() {
        let record = DelimitedParser::new().parse_line("5.1,3.5,1.4,0.2");
        assert_eq!(record.numeric(), &[5.1, 3.5, 1.4, 0.2]);
        assert_eq!(record.num_categorical(), 0);
        assert_eq!(record.original_text(), "5.1,3.5,1.4,0.2");
    }

    #[test]
    fn test_parse_runs_of_whitespace() {
        let record = DelimitedParser::new().parse_line("0.49  0.29  0.48  0.50  0.56  0.24  0.35");
        assert_eq!(record.num_features(), 7);
        assert_eq!(record.num_numeric(), 7);
    }

    #[test]
    fn test_parse_mixed_line() {
        let record = DelimitedParser::new()
            .parse_line("ADT1_YEAST  0.58  0.61  0.47  0.13  0.50  0.00  0.48  0.22  MIT");
        assert_eq!(record.num_numeric(), 8);
        assert_eq!(record.categorical(), &["ADT1_YEAST".to_string(), "MIT".to_string()]);
    }

    #[test]
    fn test_parse_non_finite_tokens() {
        let record = DelimitedParser::new().parse_line("1.5 nan inf Inf infinity 1e999");
        assert_eq!(record.numeric(), &[1.5]);
        assert_eq!(record.categorical(), &["nan", "inf", "Inf", "infinity", "1e999"]);

        let record = DelimitedParser::new().parse_line("NaN,-Infinity,+Infinity,MIT");
        assert_eq!(record.num_numeric(), 3);
        assert!(record.numeric_at(0).is_nan());
        assert_eq!(record.numeric_at(1), f64::NEG_INFINITY);
        assert_eq!(record.numeric_at(2), f64::INFINITY);
        assert_eq!(record.categorical(), &["MIT".to_string()]);
    }

    #[test]
    fn test_parse_all_delimiters() {
        let record = DelimitedParser::new().parse_line("1;2:3\t4, 5 x");
        assert_eq!(record.numeric(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(record.categorical(), &["x".to_string()]);
    }

    #[test]
    fn test_read_dataset() {
        let dataset = DelimitedParser::new().read(Cursor::new(YEAST)).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.feature_count, 10);
        assert_eq!(dataset.skipped, 0);
        assert!(dataset.source_name.is_none());
    }

    #[test]
    fn test_read_stops_at_empty_line() {
        let input = "1,2\n3,4\n\n5,6\n";
        let dataset = DelimitedParser::new().read(Cursor::new(input)).unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_read_skips_mismatched_rows() {
        // Same total width but a different numeric/categorical split
        let input = "1,2,a\n3,4\n5,6,b\nc,7,d\n";
        let dataset = DelimitedParser::new().read(Cursor::new(input)).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.skipped, 2);
        assert_eq!(dataset.feature_count, 3);
    }

    #[test]
    fn test_read_crlf() {
        let dataset = DelimitedParser::new().read(Cursor::new("1,2\r\n3,4\r\n")).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records[1].original_text(), "3,4");
    }

    #[test]
    fn test_read_empty_input() {
        let dataset = DelimitedParser::new().read(Cursor::new("")).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.feature_count, 0);
    }

    #[test]
    fn test_read_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("yeast.data");
        let mut file = File::create(&path).unwrap();
        file.write_all(YEAST.as_bytes()).unwrap();
        drop(file);

        let dataset = DelimitedParser::new().read_path(&path).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.source_name.as_deref(), Some("yeast.data"));
    }

    #[test]
    fn test_read_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = DelimitedParser::new()
            .read_path(dir.path().join("missing.data"))
            .unwrap_err();
        assert!(matches!(err, clusterx_core::Error::Io(_)));
    }
}

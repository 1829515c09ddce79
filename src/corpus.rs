//! Corpus files: typed utterance rows, batch annotation and CSV I/O.
//!
//! Rows are validated once when read. A missing text or count column is an
//! error for the whole file; a bad row is not. Rows whose count cell is not
//! a non-negative integer, or whose field count differs from the header,
//! are kept with a [`RowDefect`] and annotated with the manual-review
//! sentinel. All other columns pass through untouched, in their original
//! order.
//!
//! Annotation is embarrassingly parallel; each row's feature count is
//! written exactly once, to that row.

use crate::classifier::{Classifier, Outcome, MANUAL_REVIEW_SENTINEL};
use crate::config::AnnotateConfig;
use crate::error::{Error, Result};
use crate::tokenize::Tokenizer;
use rayon::prelude::*;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Why a row could not be read cleanly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowDefect {
    /// The count cell is not a non-negative integer (empty cells included).
    InvalidCount(String),
    /// The record has a different number of fields than the header.
    FieldCount {
        /// Fields in the header.
        expected: usize,
        /// Fields in the record.
        found: usize,
    },
}

impl fmt::Display for RowDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowDefect::InvalidCount(raw) => write!(f, "invalid count {:?}", raw),
            RowDefect::FieldCount { expected, found } => {
                write!(f, "expected {} fields, found {}", expected, found)
            }
        }
    }
}

/// One utterance record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtteranceRow {
    /// Utterance text.
    pub content: String,
    /// Literal count of "be"/"Be" substrings in `content`; `None` when the
    /// cell is missing or unreadable.
    pub instances_count: Option<usize>,
    /// Number of occurrences needing review; `None` until annotated.
    pub feature_count: Option<usize>,
    /// Values of the passthrough columns, aligned with
    /// [`Corpus::passthrough_columns`].
    pub extra: Vec<String>,
    /// Set when the record was malformed. Such rows are flagged, not
    /// classified.
    pub defect: Option<RowDefect>,
    /// Source line, for rows read from CSV.
    pub line: Option<u64>,
}

impl UtteranceRow {
    /// Row with no passthrough columns.
    pub fn new(content: impl Into<String>, instances_count: usize) -> Self {
        Self {
            content: content.into(),
            instances_count: Some(instances_count),
            feature_count: None,
            extra: Vec::new(),
            defect: None,
            line: None,
        }
    }

    /// Text written back to the count column. An unparseable cell is
    /// written as it was read.
    fn count_cell(&self) -> String {
        match (self.instances_count, &self.defect) {
            (Some(n), _) => n.to_string(),
            (None, Some(RowDefect::InvalidCount(raw))) => raw.clone(),
            (None, _) => String::new(),
        }
    }

    fn location(&self, index: usize) -> String {
        match self.line {
            Some(line) => format!("line {}", line),
            None => format!("row {}", index),
        }
    }
}

/// Counts gathered while annotating a corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationSummary {
    /// Rows annotated.
    pub rows: usize,
    /// Rows with a feature count above 0.
    pub flagged_rows: usize,
    /// Sum of all feature counts.
    pub candidates: usize,
    /// Rows whose literal count was 0.
    pub zero_count_rows: usize,
    /// Rows whose literal count matched no token.
    pub inconsistent_rows: usize,
    /// Rows with empty text.
    pub empty_rows: usize,
    /// Malformed rows (bad count cell or field count).
    pub malformed_rows: usize,
}

impl AnnotationSummary {
    /// `outcome` is `None` for malformed rows.
    fn record(&mut self, outcome: Option<Outcome>, feature_count: usize) {
        self.rows += 1;
        self.candidates += feature_count;
        if feature_count > 0 {
            self.flagged_rows += 1;
        }
        match outcome {
            None => self.malformed_rows += 1,
            Some(Outcome::NoInstancesCounted) => self.zero_count_rows += 1,
            Some(Outcome::Inconsistent) => self.inconsistent_rows += 1,
            Some(Outcome::EmptyContent) => self.empty_rows += 1,
            Some(Outcome::Classified | Outcome::FusedOnly) => {}
        }
    }
}

/// Output column kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Passthrough(usize),
    Count,
    Feature,
    Content,
}

/// A table of utterance rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    passthrough: Vec<String>,
    rows: Vec<UtteranceRow>,
}

impl Corpus {
    /// Corpus from rows without passthrough columns.
    pub fn from_rows(rows: Vec<UtteranceRow>) -> Self {
        Self {
            passthrough: Vec::new(),
            rows,
        }
    }

    /// Names of the columns carried through unchanged.
    pub fn passthrough_columns(&self) -> &[String] {
        &self.passthrough
    }

    /// All rows, in file order.
    pub fn rows(&self) -> &[UtteranceRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Read a CSV file with a header row.
    pub fn read_csv(path: &Path, config: &AnnotateConfig) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| Error::invalid_input(format!("{}: {}", path.display(), e)))?;
        Self::from_reader(file, config)
    }

    /// Read CSV with a header row from any reader.
    ///
    /// Only a bad header or an I/O failure is an error. Malformed records
    /// are kept and marked with a [`RowDefect`].
    pub fn from_reader<R: Read>(reader: R, config: &AnnotateConfig) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = reader.headers()?.clone();

        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| Error::missing_column(name))
        };
        let content_idx = find(&config.content_column)?;
        let count_idx = find(&config.count_column)?;
        // An existing feature column is recomputed, not passed through
        let feature_idx = headers.iter().position(|h| h == config.feature_column);

        let passthrough_idx: Vec<usize> = (0..headers.len())
            .filter(|i| *i != content_idx && *i != count_idx && Some(*i) != feature_idx)
            .collect();
        let passthrough = passthrough_idx
            .iter()
            .map(|i| headers[*i].to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.byte_records() {
            let record = record?;
            let cell = |i: usize| -> String {
                record
                    .get(i)
                    .map(String::from_utf8_lossy)
                    .map(Cow::into_owned)
                    .unwrap_or_default()
            };

            let raw_count = cell(count_idx).trim().to_string();
            let instances_count = parse_count(&raw_count);
            let defect = if record.len() != headers.len() {
                Some(RowDefect::FieldCount {
                    expected: headers.len(),
                    found: record.len(),
                })
            } else if instances_count.is_none() {
                Some(RowDefect::InvalidCount(raw_count))
            } else {
                None
            };

            rows.push(UtteranceRow {
                content: cell(content_idx),
                instances_count,
                feature_count: None,
                extra: passthrough_idx.iter().map(|i| cell(*i)).collect(),
                defect,
                line: record.position().map(|p| p.line()),
            });
        }

        let malformed = rows.iter().filter(|r| r.defect.is_some()).count();
        log::info!("Read {} rows ({} malformed)", rows.len(), malformed);
        Ok(Self { passthrough, rows })
    }

    /// Annotate every row, returning summary counts.
    pub fn annotate<T: Tokenizer>(
        &mut self,
        classifier: &Classifier<T>,
        parallel: bool,
    ) -> AnnotationSummary {
        self.annotate_with(classifier, parallel, || {})
    }

    /// Annotate every row, calling `on_row` after each one (from worker
    /// threads when `parallel`).
    pub fn annotate_with<T, F>(
        &mut self,
        classifier: &Classifier<T>,
        parallel: bool,
        on_row: F,
    ) -> AnnotationSummary
    where
        T: Tokenizer,
        F: Fn() + Sync,
    {
        let annotate_row = |(index, row): (usize, &mut UtteranceRow)| {
            let (outcome, feature_count) = match (&row.defect, row.instances_count) {
                (None, Some(instances_count)) => {
                    let analysis = classifier.analyze(&row.content, instances_count);
                    if analysis.outcome == Outcome::Inconsistent {
                        log::warn!(
                            "{}: {} 'be' counted but none found in {:?}; flagged for review",
                            row.location(index),
                            instances_count,
                            row.content
                        );
                    }
                    (Some(analysis.outcome), analysis.feature_count)
                }
                (defect, _) => {
                    log::warn!(
                        "{}: malformed row ({}); flagged for review",
                        row.location(index),
                        defect.as_ref().map_or_else(|| "no count".to_string(), |d| d.to_string())
                    );
                    (None, MANUAL_REVIEW_SENTINEL)
                }
            };
            row.feature_count = Some(feature_count);
            on_row();
            (outcome, feature_count)
        };

        let outcomes: Vec<(Option<Outcome>, usize)> = if parallel {
            self.rows
                .par_iter_mut()
                .enumerate()
                .map(annotate_row)
                .collect()
        } else {
            self.rows.iter_mut().enumerate().map(annotate_row).collect()
        };

        let mut summary = AnnotationSummary::default();
        for (outcome, feature_count) in outcomes {
            summary.record(outcome, feature_count);
        }
        log::info!(
            "Annotated {} rows: {} flagged, {} candidates",
            summary.rows,
            summary.flagged_rows,
            summary.candidates
        );
        summary
    }

    fn output_columns(&self, config: &AnnotateConfig) -> Result<Vec<(String, Column)>> {
        let mut all: Vec<(String, Column)> = self
            .passthrough
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), Column::Passthrough(i)))
            .collect();
        all.push((config.count_column.clone(), Column::Count));
        all.push((config.feature_column.clone(), Column::Feature));
        all.push((config.content_column.clone(), Column::Content));

        let Some(order) = &config.column_order else {
            return Ok(all);
        };
        order
            .iter()
            .map(|name| {
                all.iter()
                    .find(|(n, _)| n == name)
                    .cloned()
                    .ok_or_else(|| Error::config(format!("unknown column in column_order: {name:?}")))
            })
            .collect()
    }

    /// Write the corpus as CSV.
    ///
    /// Default column order is the passthrough columns, then the count,
    /// feature and content columns.
    pub fn to_writer<W: Write>(&self, writer: W, config: &AnnotateConfig) -> Result<()> {
        let columns = self.output_columns(config)?;
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(columns.iter().map(|(name, _)| name.as_str()))?;
        for row in &self.rows {
            let record: Vec<String> = columns
                .iter()
                .map(|(_, column)| match *column {
                    Column::Passthrough(i) => row.extra.get(i).cloned().unwrap_or_default(),
                    Column::Count => row.count_cell(),
                    Column::Feature => row
                        .feature_count
                        .map(|c| c.to_string())
                        .unwrap_or_default(),
                    Column::Content => row.content.clone(),
                })
                .collect();
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write the corpus to a CSV file.
    pub fn write_csv(&self, path: &Path, config: &AnnotateConfig) -> Result<()> {
        let file = File::create(path)?;
        self.to_writer(file, config)
    }
}

/// Parse a count cell. Accepts "3" and the "3.0" form written by
/// dataframe exporters for integer columns holding nulls.
fn parse_count(raw: &str) -> Option<usize> {
    if let Ok(n) = raw.parse::<usize>() {
        return Some(n);
    }
    let (whole, frac) = raw.split_once('.')?;
    if !frac.is_empty() && frac.chars().all(|c| c == '0') {
        whole.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
,File,Line,InstancesCountPerLine,Content
0,a.txt,1,1,they be working
1,a.txt,2,1,you should be studying
2,b.txt,7,2,\"should be careful, and be working\"
";

    fn read(csv: &str) -> Corpus {
        Corpus::from_reader(csv.as_bytes(), &AnnotateConfig::default()).unwrap()
    }

    #[test]
    fn test_read_passthrough() {
        let corpus = read(CSV);
        assert_eq!(corpus.passthrough_columns(), ["", "File", "Line"]);
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.rows()[2].instances_count, Some(2));
        assert_eq!(corpus.rows()[2].line, Some(4));
        assert!(corpus.rows().iter().all(|r| r.defect.is_none()));
        assert_eq!(corpus.rows()[2].extra, ["2", "b.txt", "7"]);
    }

    #[test]
    fn test_missing_column() {
        let err = Corpus::from_reader("Text,Count\nhi,1\n".as_bytes(), &AnnotateConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::MissingColumn(ref c) if c == "Content"));
    }

    #[test]
    fn test_bad_count_is_flagged_not_fatal() {
        let csv = "InstancesCountPerLine,Content\n\
                   1,they be working\n\
                   ,she be there\n\
                   -1,x\n\
                   1,you should be here\n";
        let mut corpus = read(csv);
        assert_eq!(corpus.len(), 4);
        assert_eq!(
            corpus.rows()[1].defect,
            Some(RowDefect::InvalidCount(String::new()))
        );
        assert_eq!(
            corpus.rows()[2].defect,
            Some(RowDefect::InvalidCount("-1".into()))
        );

        let summary = corpus.annotate(&Classifier::new(), true);
        let counts: Vec<_> = corpus.rows().iter().map(|r| r.feature_count).collect();
        let flag = Some(MANUAL_REVIEW_SENTINEL);
        assert_eq!(counts, [Some(1), flag, flag, Some(0)]);
        assert_eq!(summary.malformed_rows, 2);
        assert_eq!(summary.flagged_rows, 3);
    }

    #[test]
    fn test_ragged_rows_are_flagged() {
        let csv = "InstancesCountPerLine,Content\n\
                   1,they be working\n\
                   1,she be there,extra\n\
                   1\n\
                   1,you should be here\n";
        let mut corpus = read(csv);
        assert_eq!(corpus.len(), 4);
        assert_eq!(
            corpus.rows()[1].defect,
            Some(RowDefect::FieldCount { expected: 2, found: 3 })
        );
        assert_eq!(
            corpus.rows()[2].defect,
            Some(RowDefect::FieldCount { expected: 2, found: 1 })
        );
        assert_eq!(corpus.rows()[2].content, "");

        let summary = corpus.annotate(&Classifier::new(), false);
        let counts: Vec<_> = corpus.rows().iter().map(|r| r.feature_count).collect();
        let flag = Some(MANUAL_REVIEW_SENTINEL);
        assert_eq!(counts, [Some(1), flag, flag, Some(0)]);
        assert_eq!(summary.malformed_rows, 2);
    }

    #[test]
    fn test_invalid_count_written_back_verbatim() {
        let mut corpus = read("InstancesCountPerLine,Content\nn/a,they be\n");
        corpus.annotate(&Classifier::new(), false);
        let mut out = Vec::new();
        corpus.to_writer(&mut out, &AnnotateConfig::default()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "InstancesCountPerLine,FeatureCountPerLine,Content\nn/a,1,they be\n"
        );
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("3"), Some(3));
        assert_eq!(parse_count("2.0"), Some(2));
        assert_eq!(parse_count("2.5"), None);
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("x"), None);
    }

    #[test]
    fn test_annotate_sequential_and_parallel_agree() {
        let classifier = Classifier::new();
        let mut seq = read(CSV);
        let mut par = read(CSV);
        let s1 = seq.annotate(&classifier, false);
        let s2 = par.annotate(&classifier, true);
        assert_eq!(seq, par);
        assert_eq!(s1, s2);

        let counts: Vec<_> = seq.rows().iter().map(|r| r.feature_count).collect();
        assert_eq!(counts, [Some(1), Some(0), Some(1)]);
        assert_eq!(s1.rows, 3);
        assert_eq!(s1.flagged_rows, 2);
        assert_eq!(s1.candidates, 2);
    }

    #[test]
    fn test_annotate_counts_anomalies() {
        let mut corpus = Corpus::from_rows(vec![
            UtteranceRow::new("they be working", 0),
            UtteranceRow::new("they were there", 1),
            UtteranceRow::new("", 1),
        ]);
        let summary = corpus.annotate(&Classifier::new(), false);
        assert_eq!(summary.zero_count_rows, 1);
        assert_eq!(summary.inconsistent_rows, 1);
        assert_eq!(summary.empty_rows, 1);
        assert_eq!(summary.flagged_rows, 2);
    }

    #[test]
    fn test_write_default_order() {
        let mut corpus = read(CSV);
        corpus.annotate(&Classifier::new(), false);
        let mut out = Vec::new();
        corpus.to_writer(&mut out, &AnnotateConfig::default()).unwrap();
        let out = String::from_utf8(out).unwrap();
        let mut lines = out.lines();
        assert_eq!(
            lines.next(),
            Some(",File,Line,InstancesCountPerLine,FeatureCountPerLine,Content")
        );
        assert_eq!(lines.next(), Some("0,a.txt,1,1,1,they be working"));
    }

    #[test]
    fn test_write_explicit_order() {
        let corpus = read(CSV);
        let config = AnnotateConfig {
            column_order: Some(vec!["Content".into(), "File".into()]),
            ..Default::default()
        };
        let mut out = Vec::new();
        corpus.to_writer(&mut out, &config).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Content,File\nthey be working,a.txt\n"));
    }

    #[test]
    fn test_write_unknown_column() {
        let corpus = read(CSV);
        let config = AnnotateConfig {
            column_order: Some(vec!["Speaker".into()]),
            ..Default::default()
        };
        let err = corpus.to_writer(Vec::new(), &config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_existing_feature_column_is_replaced() {
        let csv = "InstancesCountPerLine,FeatureCountPerLine,Content\n1,,they be working\n";
        let mut corpus = read(csv);
        assert!(corpus.passthrough_columns().is_empty());
        corpus.annotate(&Classifier::new(), false);
        assert_eq!(corpus.rows()[0].feature_count, Some(1));
    }
}

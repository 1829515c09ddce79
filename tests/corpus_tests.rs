//! Corpus file round trips through the CSV reader, annotator and writer.

use habitual_be::{AnnotateConfig, Classifier, Corpus, Error, RowDefect};
use std::fs;

const TRANSCRIPT: &str = "\
,File,Line,Speaker,InstancesCountPerLine,Content
0,ATL_se0_ag1_f_01.txt,12,ATL_se0_ag1_f_01,1,they be working all the time
1,ATL_se0_ag1_f_01.txt,15,int,1,you should be studying
2,ATL_se0_ag1_f_01.txt,20,ATL_se0_ag1_f_01,0,she be there
3,ATL_se0_ag1_f_01.txt,24,ATL_se0_ag1_f_01,1,the best thing
4,ATL_se0_ag1_f_01.txt,31,ATL_se0_ag1_f_01,2,\"don't be silly, they don't be home\"
";

#[test]
fn annotate_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.csv");
    let output = dir.path().join("out.csv");
    fs::write(&input, TRANSCRIPT).unwrap();

    let config = AnnotateConfig::default();
    let mut corpus = Corpus::read_csv(&input, &config).unwrap();
    let summary = corpus.annotate(&Classifier::new(), true);
    corpus.write_csv(&output, &config).unwrap();

    assert_eq!(summary.rows, 5);
    assert_eq!(summary.zero_count_rows, 1);
    assert_eq!(summary.inconsistent_rows, 1);
    assert_eq!(summary.flagged_rows, 4);
    assert_eq!(summary.candidates, 4);

    let written = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(
        lines[0],
        ",File,Line,Speaker,InstancesCountPerLine,FeatureCountPerLine,Content"
    );
    assert_eq!(
        lines[2],
        "1,ATL_se0_ag1_f_01.txt,15,int,1,0,you should be studying"
    );
    assert_eq!(
        lines[5],
        "4,ATL_se0_ag1_f_01.txt,31,ATL_se0_ag1_f_01,2,1,\"don't be silly, they don't be home\""
    );

    // Re-reading the output recomputes the same counts
    let mut again = Corpus::read_csv(&output, &config).unwrap();
    assert_eq!(again.passthrough_columns(), corpus.passthrough_columns());
    again.annotate(&Classifier::new(), false);
    assert_eq!(again, corpus);
}

#[test]
fn custom_columns_from_config() {
    let csv = "Text,N\nthey be working,1\n";
    let config = AnnotateConfig::from_toml_str(
        r#"
content_column = "Text"
count_column = "N"
feature_column = "Habitual"
column_order = ["Habitual", "Text"]
"#,
    )
    .unwrap();

    let mut corpus = Corpus::from_reader(csv.as_bytes(), &config).unwrap();
    corpus.annotate(&Classifier::new(), false);
    let mut out = Vec::new();
    corpus.to_writer(&mut out, &config).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "Habitual,Text\n1,they be working\n");
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Corpus::read_csv(&dir.path().join("nope.csv"), &AnnotateConfig::default())
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[test]
fn missing_count_column() {
    let err = Corpus::from_reader("Content\nthey be\n".as_bytes(), &AnnotateConfig::default())
        .unwrap_err();
    assert!(matches!(err, Error::MissingColumn(ref c) if c == "InstancesCountPerLine"));
}

#[test]
fn malformed_rows_do_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.csv");
    let output = dir.path().join("out.csv");
    fs::write(
        &input,
        "InstancesCountPerLine,Content\n\
         1,they be working\n\
         ,she be there\n\
         1,you should be here,oops\n\
         1,they don't be home\n",
    )
    .unwrap();

    let config = AnnotateConfig::default();
    let mut corpus = Corpus::read_csv(&input, &config).unwrap();
    assert_eq!(corpus.len(), 4);
    assert_eq!(
        corpus.rows()[2].defect,
        Some(RowDefect::FieldCount { expected: 2, found: 3 })
    );
    assert_eq!(corpus.rows()[2].line, Some(4));

    let summary = corpus.annotate(&Classifier::new(), true);
    assert_eq!(summary.malformed_rows, 2);
    assert_eq!(summary.flagged_rows, 4);
    corpus.write_csv(&output, &config).unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "InstancesCountPerLine,FeatureCountPerLine,Content\n\
         1,1,they be working\n\
         ,1,she be there\n\
         1,1,you should be here\n\
         1,1,they don't be home\n"
    );
}

#[test]
fn empty_corpus() {
    let mut corpus =
        Corpus::from_reader("InstancesCountPerLine,Content\n".as_bytes(), &AnnotateConfig::default())
            .unwrap();
    assert!(corpus.is_empty());
    let summary = corpus.annotate(&Classifier::new(), true);
    assert_eq!(summary.rows, 0);
}

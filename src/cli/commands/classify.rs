//! Classify command - one utterance, optionally with per-occurrence decisions

use clap::Parser;
use serde::Serialize;

use super::super::output::{color, count_colored, verdict_color, write_output};
use super::super::parser::OutputFormat;
use super::super::utils::get_input_text;

use crate::{count_be_instances, Analysis, Classifier};

/// Classify a single utterance
#[derive(Parser, Debug)]
pub struct ClassifyArgs {
    /// Utterance to classify
    #[arg(short, long)]
    pub text: Option<String>,

    /// Read the utterance from file
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<String>,

    /// Literal "be" count (default: counted from the text)
    #[arg(short, long, value_name = "N")]
    pub count: Option<usize>,

    /// Show the decision and deciding rule for every occurrence
    #[arg(short, long)]
    pub explain: bool,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,

    /// Positional text argument
    #[arg(trailing_var_arg = true)]
    pub positional: Vec<String>,
}

#[derive(Serialize)]
struct ClassifyReport<'a> {
    text: &'a str,
    instances_count: usize,
    #[serde(flatten)]
    analysis: &'a Analysis,
}

pub fn run(args: ClassifyArgs) -> Result<(), String> {
    let text = get_input_text(&args.text, args.file.as_deref(), &args.positional)?;
    let text = text.trim_end_matches(['\n', '\r']);
    let instances_count = args.count.unwrap_or_else(|| count_be_instances(text));

    let analysis = Classifier::new().analyze(text, instances_count);

    let output = match args.format {
        OutputFormat::Human => render_human(&analysis, instances_count, args.explain),
        OutputFormat::Json => {
            let report = ClassifyReport {
                text,
                instances_count,
                analysis: &analysis,
            };
            serde_json::to_string_pretty(&report)
                .map_err(|e| format!("Failed to serialize analysis: {}", e))?
                + "\n"
        }
        OutputFormat::Tsv => render_tsv(&analysis, instances_count, args.explain),
    };

    write_output(&output, None)
}

fn render_human(analysis: &Analysis, instances_count: usize, explain: bool) -> String {
    let mut out = format!(
        "feature count: {} ({})\n",
        count_colored(analysis.feature_count),
        analysis.outcome
    );
    if analysis.outcome.is_sentinel() {
        out.push_str(&format!(
            "{} literal count {} needs manual review\n",
            color("33", "warning:"),
            instances_count
        ));
    }
    if !explain {
        return out;
    }

    out.push_str(&format!("\ntokens: {}\n", analysis.tokens.join(" ")));
    for occ in &analysis.occurrences {
        out.push_str(&format!(
            "  be@{:<3} {:<13} {}\n",
            occ.position,
            color(verdict_color(occ.verdict), &occ.verdict.to_string()),
            occ.rule.unwrap_or("fallthrough")
        ));
    }
    for position in &analysis.fused {
        out.push_str(&format!(
            "  {}@{:<2} ignored (fused with punctuation)\n",
            analysis.tokens[*position],
            position
        ));
    }
    out
}

fn render_tsv(analysis: &Analysis, instances_count: usize, explain: bool) -> String {
    if explain {
        let mut out = "position\tverdict\trule\n".to_string();
        for occ in &analysis.occurrences {
            out.push_str(&format!(
                "{}\t{}\t{}\n",
                occ.position,
                occ.verdict,
                occ.rule.unwrap_or("fallthrough")
            ));
        }
        out
    } else {
        format!(
            "instances_count\tfeature_count\toutcome\n{}\t{}\t{}\n",
            instances_count, analysis.feature_count, analysis.outcome
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tsv_summary() {
        let analysis = Classifier::new().analyze("they be working", 1);
        let out = render_tsv(&analysis, 1, false);
        assert_eq!(out, "instances_count\tfeature_count\toutcome\n1\t1\tclassified\n");
    }

    #[test]
    fn test_tsv_explain() {
        let analysis = Classifier::new().analyze("should be careful and be working", 2);
        let out = render_tsv(&analysis, 2, true);
        assert!(out.contains("1\tnon-habitual\tsingle-trigger-at-l1\n"));
        assert!(out.contains("4\tcandidate\tfallthrough\n"));
    }

    #[test]
    fn test_human_explain_lists_each_occurrence() {
        let analysis = Classifier::new().analyze("they be working and she be", 2);
        let out = render_human(&analysis, 2, true);
        assert!(out.contains("\ntokens: they be working and she be\n"));
        assert_eq!(out.matches("  be@").count(), 2);
        assert!(out.contains("utterance-final\n"));
    }

    #[test]
    fn test_report_json_is_flat() {
        let analysis = Classifier::new().analyze("they be working", 1);
        let report = ClassifyReport {
            text: "they be working",
            instances_count: 1,
            analysis: &analysis,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["feature_count"], 1);
        assert_eq!(value["outcome"], "classified");
        assert_eq!(value["occurrences"][0]["verdict"], "candidate");
    }
}

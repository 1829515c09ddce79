//! Lexicon command - print the word lists the rules consult

use clap::Parser;

use super::super::output::{color, write_output};
use super::super::parser::LexiconKind;

use crate::lexicon::{WordClass, PUNCTUATION_TRIGGERS};

/// Print lexicon entries
#[derive(Parser, Debug)]
pub struct LexiconArgs {
    /// Lexicon to print (default: a summary of all classes)
    #[arg(value_enum)]
    pub kind: Option<LexiconKind>,
}

pub fn run(args: LexiconArgs) -> Result<(), String> {
    let output = match args.kind {
        None => {
            let mut out = String::new();
            for class in WordClass::ALL {
                out.push_str(&format!("{:<18} {:>4}\n", class.name(), class.len()));
            }
            out.push_str(&format!(
                "{:<18} {:>4}\n",
                "punctuation",
                PUNCTUATION_TRIGGERS.len()
            ));
            format!("{}\n{}", color("1;36", "Lexicons"), out)
        }
        Some(kind) => match kind.word_class() {
            Some(class) => class.entries().join("\n") + "\n",
            None => {
                PUNCTUATION_TRIGGERS
                    .iter()
                    .map(char::to_string)
                    .collect::<Vec<_>>()
                    .join("\n")
                    + "\n"
            }
        },
    };
    write_output(&output, None)
}

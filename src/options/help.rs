//! Help rendering for option parsers.

use std::str::FromStr;

use serde::Serialize;

use super::{InputArgument, InputOption, OptionParser};

/// Output format for rendered help.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HelpFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for HelpFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown help format: {}", s)),
        }
    }
}

#[derive(Debug, Serialize)]
struct HelpDocument<'a> {
    command: String,
    description: Option<&'a str>,
    subcommands: Vec<SubcommandEntry<'a>>,
    options: Vec<&'a InputOption>,
    arguments: &'a [InputArgument],
    epilog: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct SubcommandEntry<'a> {
    name: &'a str,
    help: &'a str,
}

/// Render `parser` as a JSON help document.
pub(crate) fn render_json(parser: &OptionParser) -> String {
    let doc = HelpDocument {
        command: parser.display_name(),
        description: parser.description.as_deref(),
        subcommands: parser
            .subcommands
            .values()
            .map(|s| SubcommandEntry {
                name: &s.name,
                help: &s.help,
            })
            .collect(),
        options: parser.options.iter().collect(),
        arguments: &parser.arguments,
        epilog: parser.epilog.as_deref(),
    };
    serde_json::to_string_pretty(&doc).unwrap_or_else(|_| "{}".to_string())
}

/// Text shown when help is requested for an undeclared subcommand.
pub(crate) fn unknown_subcommand(parser: &OptionParser, subcommand: &str) -> String {
    let mut out = format!(
        "Unable to find the `{} {}` subcommand. See `{} --help`.",
        parser.display_name(),
        subcommand,
        parser.display_name()
    );
    let names: Vec<&str> = parser.subcommands.keys().map(String::as_str).collect();
    if let Some(best) = suggest(subcommand, &names) {
        out.push_str(&format!("\n\nDid you mean: `{} {}`?", parser.display_name(), best));
    }
    let available = names.join(", ");
    if !available.is_empty() {
        out.push_str(&format!("\n\nAvailable subcommands: {}", available));
    }
    out
}

/// Closest candidate within a small edit distance.
pub fn suggest<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let lower = input.to_lowercase();
    let mut best: Option<(&'a str, usize)> = None;
    for &candidate in candidates {
        let dist = levenshtein(&lower, candidate);
        if dist <= 3 && best.map_or(true, |(_, d)| dist < d) {
            best = Some((candidate, dist));
        }
    }
    best.map(|(c, _)| c)
}

/// Simple Levenshtein distance calculation.
fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let n = b_chars.len();

    let mut prev_row: Vec<usize> = (0..=n).collect();
    let mut curr_row = vec![0usize; n + 1];

    for (i, a_ch) in a_chars.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_ch) in b_chars.iter().enumerate() {
            let cost = if a_ch == b_ch { 0 } else { 1 };
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[n]
}

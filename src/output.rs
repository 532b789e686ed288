//! Output formatting for counting results

use crate::query::MatchCount;
use serde_json::json;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Print one `pattern: count` line per batch result
///
/// Failed queries print an error marker instead of a count, never a
/// misleading 0.
pub fn print_match_counts(results: &[MatchCount], color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);

    for result in results {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(stdout, "{}", result.pattern)?;
        stdout.reset()?;
        write!(stdout, ": ")?;

        match &result.outcome {
            Ok(count) => {
                stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                writeln!(stdout, "{}", count)?;
            }
            Err(err) => {
                stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
                writeln!(stdout, "error: {}", err)?;
            }
        }
        stdout.reset()?;
    }

    Ok(())
}

/// Print the aggregate total of the trie scan
pub fn print_total_hits(total: u64, color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);

    write!(stdout, "Total hits: ")?;
    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
    writeln!(stdout, "{}", total)?;
    stdout.reset()?;

    Ok(())
}

/// Render batch results as a JSON array
///
/// Successful queries carry a `count` field, failed ones an `error` field.
pub fn match_counts_to_json(results: &[MatchCount]) -> serde_json::Value {
    let items: Vec<serde_json::Value> = results
        .iter()
        .map(|result| match &result.outcome {
            Ok(count) => json!({ "pattern": result.pattern, "count": count }),
            Err(err) => json!({ "pattern": result.pattern, "error": err.to_string() }),
        })
        .collect();

    json!(items)
}

/// Render the trie-scan total as a JSON object
pub fn total_hits_to_json(total: u64) -> serde_json::Value {
    json!({ "total_hits": total })
}

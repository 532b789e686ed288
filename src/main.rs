use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use occ::query::{DispatchConfig, MatchCount, count_batch};
use occ::scan::{PatternTrie, count_linear, scan_total};
use occ::output;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "occ")]
#[command(about = "Suffix-array-backed substring occurrence counter")]
struct Cli {
    /// Patterns to count, in output order
    #[arg(required = true)]
    patterns: Vec<String>,

    /// Text to search
    #[arg(short, long, conflicts_with = "file")]
    text: Option<String>,

    /// Read the text from a file instead
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Counting backend
    #[arg(short, long, value_enum, default_value_t = Backend::Suffix)]
    backend: Backend,

    /// Worker threads for batch dispatch (0 = all cores)
    #[arg(short, long, default_value_t = 0)]
    workers: usize,

    /// Emit results as JSON
    #[arg(long)]
    json: bool,

    /// Print wall-clock timing
    #[arg(long)]
    time: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    /// Sorted suffix index with per-pattern counts
    Suffix,
    /// Prefix trie scan reporting one aggregate total
    Trie,
    /// Per-pattern linear scan (reference backend)
    Linear,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let text = load_text(&cli)?;
    let color = !cli.no_color;
    let start = Instant::now();

    match cli.backend {
        Backend::Suffix => {
            let config = DispatchConfig {
                worker_count: cli.workers,
            };
            let results = count_batch(&text, &cli.patterns, config)
                .context("counting failed")?;

            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output::match_counts_to_json(&results))?
                );
            } else {
                output::print_match_counts(&results, color)?;
            }
        }

        Backend::Trie => {
            let trie =
                PatternTrie::from_patterns(&cli.patterns).context("building pattern trie")?;
            let total = scan_total(&trie, &text);

            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output::total_hits_to_json(total))?
                );
            } else {
                output::print_total_hits(total, color)?;
            }
        }

        Backend::Linear => {
            let results: Vec<MatchCount> = cli
                .patterns
                .iter()
                .map(|pattern| MatchCount {
                    pattern: pattern.clone(),
                    outcome: count_linear(&text, pattern.as_bytes()),
                })
                .collect();

            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output::match_counts_to_json(&results))?
                );
            } else {
                output::print_match_counts(&results, color)?;
            }
        }
    }

    if cli.time {
        eprintln!("Time taken: {} microseconds", start.elapsed().as_micros());
    }

    Ok(())
}

/// Resolve the input text from `--text` or `--file`.
fn load_text(cli: &Cli) -> Result<Vec<u8>> {
    if let Some(text) = &cli.text {
        return Ok(text.clone().into_bytes());
    }

    if let Some(path) = &cli.file {
        return std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    bail!("provide the text with --text or --file");
}

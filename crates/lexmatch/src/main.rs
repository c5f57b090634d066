//! lexmatch - fuzzy best-match lookup against a reference dictionary
//!
//! Usage:
//!     lexmatch normalize "Café del Mar"
//!     lexmatch importance --corpus corpus.txt --output terms.json
//!     lexmatch match --candidates titles.json --query "wind in the willows"
//!
//! Results are written to stdout as JSON, one object per line; logs go to
//! stderr. See `lexmatch::config` for environment variables.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lexmatch::engine::{normalize, ImportanceTable, MatchResult, Stopwords};
use lexmatch::{input, Config, Error, Session};
use serde::Serialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "lexmatch")]
#[command(about = "Fuzzy best-match lookup of free-form text against a reference dictionary")]
#[command(version)]
struct Args {
    /// Default log filter (overrides LEXMATCH_LOG; RUST_LOG still wins)
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the five normal forms of a text
    Normalize {
        text: String,

        /// Stopword file, one word per line
        #[arg(long)]
        stopwords: Option<PathBuf>,
    },

    /// Build the term importance table and write it as JSON
    Importance {
        /// Corpus file, one text per line
        #[arg(long, required_unless_present = "candidates")]
        corpus: Option<PathBuf>,

        /// Use candidate texts as the corpus
        #[arg(long, conflicts_with = "corpus")]
        candidates: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Find the best candidate for each query
    Match {
        /// Candidate dictionary: JSON object of name -> text, or one text per line
        #[arg(long)]
        candidates: PathBuf,

        /// Corpus for term importance (default: the candidate texts)
        #[arg(long)]
        corpus: Option<PathBuf>,

        /// Stopword file, one word per line
        #[arg(long)]
        stopwords: Option<PathBuf>,

        /// Query text; repeatable
        #[arg(short, long = "query")]
        queries: Vec<String>,

        /// File of queries, one per line (stdin when no queries are given)
        #[arg(long)]
        queries_file: Option<PathBuf>,

        /// Per-query timeout in milliseconds (overrides LEXMATCH_TIMEOUT_MS)
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Dictionary size at which scoring goes parallel (overrides LEXMATCH_PARALLEL_THRESHOLD)
        #[arg(long)]
        parallel_threshold: Option<usize>,

        /// Print only the query, best match and best score
        #[arg(long)]
        best_only: bool,
    },
}

/// Compact per-query output for `--best-only`
#[derive(Serialize)]
struct BestMatch<'a> {
    query: &'a str,
    best_match: Option<&'a str>,
    best_score: f64,
}

impl<'a> From<&'a MatchResult> for BestMatch<'a> {
    fn from(result: &'a MatchResult) -> Self {
        Self {
            query: &result.query,
            best_match: result.best_match.as_deref(),
            best_score: result.best_score,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = Config::from_env();
    if let Some(filter) = args.log {
        config.log_filter = filter;
    }
    lexmatch::tracing::init_from_config(&config)?;

    match args.command {
        Command::Normalize { text, stopwords } => {
            let stopwords = match stopwords {
                Some(path) => input::load_stopwords(&path)?,
                None => Stopwords::new(),
            };
            let normalized = normalize(&text, &stopwords);
            println!("{}", serde_json::to_string_pretty(&normalized)?);
        }

        Command::Importance {
            corpus,
            candidates,
            output,
        } => {
            let table = match (corpus, candidates) {
                (Some(path), _) => ImportanceTable::build(input::load_corpus(&path)?),
                (None, Some(path)) => ImportanceTable::build(input::load_candidates(&path)?.values()),
                (None, None) => {
                    return Err(Error::Config("either --corpus or --candidates is required".into()).into())
                }
            };

            let json = serde_json::to_string_pretty(&table)?;
            match output {
                Some(path) => {
                    fs::write(&path, json)?;
                    info!(terms = table.len(), path = %path.display(), "wrote importance table");
                }
                None => println!("{}", json),
            }
        }

        Command::Match {
            candidates,
            corpus,
            stopwords,
            queries,
            queries_file,
            timeout_ms,
            parallel_threshold,
            best_only,
        } => {
            if timeout_ms.is_some() {
                config.timeout_ms = timeout_ms;
            }
            if let Some(n) = parallel_threshold {
                config.parallel_threshold = n;
            }

            info!("Starting lexmatch v{}", env!("CARGO_PKG_VERSION"));
            let session = Session::load(&candidates, corpus.as_deref(), stopwords.as_deref(), config)?;

            let mut queries = queries;
            if let Some(path) = queries_file {
                queries.extend(input::load_lines(&path)?);
            }
            if queries.is_empty() {
                queries = io::stdin()
                    .lock()
                    .lines()
                    .map(|l| l.map(|s| s.trim().to_string()))
                    .filter(|l| l.as_ref().map_or(true, |s| !s.is_empty()))
                    .collect::<io::Result<_>>()?;
            }

            let results = session.run_batch(&queries)?;

            let stdout = io::stdout();
            let mut out = stdout.lock();
            for result in &results {
                if best_only {
                    serde_json::to_writer(&mut out, &BestMatch::from(result))?;
                } else {
                    serde_json::to_writer(&mut out, result)?;
                }
                writeln!(out)?;
            }

            let matched = results.iter().filter(|r| r.is_match()).count();
            info!(queries = results.len(), matched, "done");
        }
    }

    Ok(())
}

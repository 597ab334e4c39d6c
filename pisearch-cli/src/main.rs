use clap::{Parser, Subcommand};
use colored::Colorize;
use pisearch::{
    BatchEntry, CliOverrides, CorpusCache, FoundMatch, MatchReport, PiConfig, PiSearcher,
    Query, SearchError,
};
use std::{
    fs,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, SearchError>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Text file holding the digits of pi
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    /// Configuration file (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Number of digits shown before and after a match
    #[arg(short = 'C', long = "context", global = true)]
    context: Option<usize>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Number of threads to use for batch searches
    #[arg(short = 'j', long, global = true)]
    threads: Option<NonZeroUsize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a birthday given as month, day and year
    Date {
        /// Month (1-12)
        month: u32,
        /// Day of the month (1-31)
        day: u32,
        /// Year (1-9999)
        year: u32,
    },

    /// Search for a name encoded as letter positions (A=1 ... Z=26)
    Name {
        /// Name to encode; words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Search for a free-form query such as 7/20/1991, 1991-07-20 or "Ada"
    Find {
        query: String,
    },

    /// Search every query in a file, one per line
    Batch {
        /// Input file; blank lines and lines starting with '#' are skipped
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    run(Cli::parse()).await
}

async fn run(cli: Cli) -> Result<()> {
    let config = PiConfig::load_from(cli.config.as_deref())?.merge_with_cli(CliOverrides {
        corpus_path: cli.corpus,
        context_radius: cli.context,
        thread_count: cli.threads,
        log_level: cli.log_level,
    });
    init_logging(&config.log_level);

    let searcher = PiSearcher::from_config(&config).with_cache(CorpusCache::global());

    match cli.command {
        Commands::Date { month, day, year } => {
            let result = searcher.search_date(month, day, year).await?;
            let report = searcher.report(result).await?;
            print_report(&report, cli.json)
        }
        Commands::Name { name } => {
            let result = searcher.search_name(&name.join(" ")).await?;
            let report = searcher.report(result).await?;
            print_report(&report, cli.json)
        }
        Commands::Find { query } => {
            let query = Query::parse(&query)?;
            let result = searcher.search_query(&query).await?;
            let report = searcher.report(result).await?;
            print_report(&report, cli.json)
        }
        Commands::Batch { file } => {
            let inputs = read_batch_file(&file)?;
            let entries = searcher.search_batch(&inputs).await?;
            print_batch(&entries, cli.json)
        }
    }?;

    searcher.metrics().log_stats();
    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_batch_file(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

fn print_report(report: &MatchReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    match report {
        MatchReport::Found(found) => print_found(found),
        MatchReport::NotFound { tried } => print_not_found(tried),
    }
    Ok(())
}

fn print_found(found: &FoundMatch) {
    println!("{}", "Found!".green().bold());
    println!(
        "The string {} appears at position {} (1-indexed) in the first {} digits of pi.",
        found.candidate.bold(),
        group_thousands(found.display_position()).bold(),
        group_thousands(found.decimal_digits())
    );
    println!("About {}% through the digits", found.percentage_label());
    println!(
        "...{}{}{}...",
        found.context.before.dimmed(),
        found.context.matched.yellow().bold(),
        found.context.after.dimmed()
    );
    if found.tried.len() > 1 {
        println!(
            "Matched using: {} (tried {})",
            found.candidate,
            found.tried.join(", ")
        );
    }
}

fn print_not_found(tried: &[String]) {
    println!("{}", "Not found".red().bold());
    let listed = if tried.is_empty() {
        "-".to_string()
    } else {
        tried.join(", ")
    };
    println!("None of the searched strings ({listed}) appear in the digits.");
    println!("Longer dates are less likely to appear; try a different format.");
}

fn print_batch(entries: &[BatchEntry], json: bool) -> Result<()> {
    if json {
        let values: Vec<serde_json::Value> = entries
            .iter()
            .map(|entry| match &entry.outcome {
                Ok(report) => serde_json::json!({ "input": entry.input, "result": report }),
                Err(e) => serde_json::json!({ "input": entry.input, "error": e.to_string() }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    let mut found = 0;
    for entry in entries {
        match &entry.outcome {
            Ok(MatchReport::Found(m)) => {
                found += 1;
                println!(
                    "{}: {} at position {} ({}%)",
                    entry.input.blue(),
                    m.candidate.green(),
                    group_thousands(m.display_position()),
                    m.percentage_label()
                );
            }
            Ok(MatchReport::NotFound { tried }) => {
                println!(
                    "{}: {} (tried {})",
                    entry.input.blue(),
                    "not found".red(),
                    tried.join(", ")
                );
            }
            Err(e) => println!("{}: {}", entry.input.blue(), e.to_string().red()),
        }
    }
    println!("\nFound {} of {} queries", found, entries.len());
    Ok(())
}

/// `1000000` -> `1,000,000`
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

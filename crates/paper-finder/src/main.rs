//! Paper Finder - Entry Point
//!
//! One-shot search, entry management, and a debounced interactive mode.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use paper_finder::config::Config;
use paper_finder::error::SearchResult;
use paper_finder::formatters::{self, EMPTY_STATE};
use paper_finder::models::{NewEntry, Paper, ResponseFormat, SortOrder};
use paper_finder::search::{self, Debouncer, Searcher};
use paper_finder::store::EntryStore;

#[derive(Parser, Debug)]
#[command(name = "paper-finder")]
#[command(about = "Search CrossRef and arXiv and keep your own paper list")]
#[command(version)]
struct Cli {
    /// Entry store file (defaults to the XDG data directory)
    #[arg(long, global = true, env = "PAPER_FINDER_STORE")]
    store_path: Option<PathBuf>,

    /// Contact address for the CrossRef polite pool
    #[arg(long, global = true, env = "CROSSREF_MAILTO")]
    crossref_mailto: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search both sources once and print the merged list
    Search {
        /// Search terms
        query: String,

        #[command(flatten)]
        output: OutputArgs,

        /// Results requested from each source
        #[arg(long, env = "PAPER_FINDER_LIMIT")]
        limit: Option<u32>,
    },

    /// Add an entry to your list
    Add {
        /// Paper title
        #[arg(long)]
        title: String,

        /// Landing page URL
        #[arg(long)]
        link: String,

        /// Comma-separated author names
        #[arg(long, default_value = "")]
        authors: String,

        /// Publication year
        #[arg(long)]
        year: Option<i32>,

        /// Direct PDF URL
        #[arg(long)]
        pdf: Option<String>,

        /// Topic or subject
        #[arg(long)]
        topic: Option<String>,
    },

    /// Print your entries
    List {
        /// Only entries whose title or authors contain this text
        #[arg(long)]
        filter: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Remove entries with the given link
    Remove {
        /// Link of the entry to remove
        link: String,
    },

    /// Remove all entries
    Clear,

    /// Read queries from stdin, one per line, and search as you type
    Interactive {
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Args, Debug, Clone, Copy)]
struct OutputArgs {
    /// Ordering: newest, oldest, relevance
    #[arg(long, default_value = "newest")]
    sort: SortOrder,

    /// Output format: markdown, json
    #[arg(long, default_value = "markdown")]
    format: ResponseFormat,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // stdout carries rendered results, logs go to stderr
    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), command = ?cli.command, "Starting");

    let mut config = Config::from_env()?;
    if let Some(mailto) = cli.crossref_mailto {
        config.crossref_mailto = Some(mailto);
    }
    if let Some(path) = cli.store_path {
        config = config.with_store_path(path);
    }

    match cli.command {
        Command::Search { query, output, limit } => {
            if let Some(limit) = limit {
                config = config.with_limit(limit)?;
            }
            let searcher = Searcher::from_config(&config)?.with_sort_order(output.sort);
            print_outcome(searcher.search(&query).await, output.format);
        }
        Command::Add { title, link, authors, year, pdf, topic } => {
            let store = EntryStore::new(&config.store_path);
            let entry = NewEntry { title, authors, year, link, pdf, topic };
            let paper = store.add(entry).await?;
            println!("Added \"{}\" to {}", paper.title, store.path().display());
        }
        Command::List { filter, output } => {
            let entries = EntryStore::new(&config.store_path).load().await?;
            let mut entries = search::filter_papers(entries, filter.as_deref().unwrap_or(""));
            search::sort_papers(&mut entries, output.sort);
            println!("{}", formatters::render(&entries, output.format));
        }
        Command::Remove { link } => {
            let removed = EntryStore::new(&config.store_path).remove(&link).await?;
            println!("Removed {removed} entr{}", if removed == 1 { "y" } else { "ies" });
        }
        Command::Clear => {
            let store = EntryStore::new(&config.store_path);
            store.clear().await?;
            println!("Cleared {}", store.path().display());
        }
        Command::Interactive { output } => {
            let searcher = Searcher::from_config(&config)?.with_sort_order(output.sort);
            run_interactive(Arc::new(searcher), &config, output.format).await?;
        }
    }

    Ok(())
}

/// Print results, or the generic failure message.
fn print_outcome(outcome: SearchResult<Vec<Paper>>, format: ResponseFormat) {
    match outcome {
        Ok(papers) => println!("{}", formatters::render(&papers, format)),
        Err(e) => {
            tracing::error!(error = %e, "Search failed");
            println!("{}", e.to_user_message());
        }
    }
}

/// Each stdin line replaces the current query; only the latest search prints.
async fn run_interactive(
    searcher: Arc<Searcher>,
    config: &Config,
    format: ResponseFormat,
) -> anyhow::Result<()> {
    let (mut debouncer, mut updates) = Debouncer::new(config.debounce_delay, move |query: String| {
        let searcher = Arc::clone(&searcher);
        async move { searcher.search(&query).await }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    tracing::info!("Interactive search ready, one query per line");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(query) if query.trim().is_empty() => {
                        debouncer.cancel();
                        println!("{EMPTY_STATE}");
                    }
                    Some(query) => {
                        debouncer.trigger(query);
                    }
                    None => break,
                }
            }
            Some(update) = updates.recv() => {
                if update.generation == debouncer.current_generation() {
                    print_outcome(update.result, format);
                }
            }
        }
    }

    // Input closed; let the last query report before exiting.
    if let Some(update) = debouncer.settle(&mut updates).await {
        print_outcome(update.result, format);
    }

    Ok(())
}

//! articlesearch CLI - client for the article search server
//!
//! Results are written to stdout; logs go to stderr.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use articlesearch::interactive::run_interactive;
use articlesearch::{build_client, load_config, log_filter, Overrides};

use anyhow::{Context, Result};
use articlesearch_client::{SearchOutcome, SharedQuery, StaticQuery, WriterSink};
use articlesearch_core::config::{Config, RenderFormat};
use articlesearch_core::{SearchMode, SortOrder};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "articlesearch")]
#[command(about = "Query an article search server and render the results")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Search endpoint URL (overrides client.endpoint)
    #[arg(long, value_name = "URL", global = true)]
    endpoint: Option<String>,

    /// Output format for result blocks (overrides render.format)
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single search
    Search {
        /// Query text, sent exactly as given
        query: String,

        #[command(flatten)]
        options: SearchOptions,

        /// Shorthand for --format json
        #[arg(long)]
        json: bool,
    },
    /// Read queries from stdin, one per line, and search each as it arrives
    Interactive {
        #[command(flatten)]
        options: SearchOptions,
    },
}

#[derive(clap::Args)]
struct SearchOptions {
    /// Maximum number of results to request
    #[arg(short = 'k', long)]
    topk: Option<usize>,

    /// Retrieval mode: semantic, keyword or hybrid
    #[arg(long)]
    mode: Option<SearchMode>,

    /// Result order: relevance or newest
    #[arg(long)]
    sort: Option<SortOrder>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Html,
    Text,
    Json,
}

impl From<OutputFormat> for RenderFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Html => RenderFormat::Html,
            OutputFormat::Text => RenderFormat::Text,
            OutputFormat::Json => RenderFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let mut overrides = Overrides {
        endpoint: cli.endpoint.clone(),
        format: cli.format.map(RenderFormat::from),
        ..Overrides::default()
    };

    match cli.command {
        Some(Commands::Search {
            query,
            options,
            json,
        }) => {
            apply_search_options(&mut overrides, options);
            if json {
                overrides.format = Some(RenderFormat::Json);
            }
            let config = load_config(cli.config.as_deref(), &overrides)?;
            search(&config, query).await
        }
        Some(Commands::Interactive { options }) => {
            apply_search_options(&mut overrides, options);
            let config = load_config(cli.config.as_deref(), &overrides)?;
            interactive(&config).await
        }
        None => {
            println!("Run 'articlesearch search <QUERY>' to search, or --help for more options");
            Ok(())
        }
    }
}

/// Initialize logging system; logs go to stderr so stdout carries only results
fn init_logging(verbose: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    Ok(())
}

fn apply_search_options(overrides: &mut Overrides, options: SearchOptions) {
    overrides.topk = options.topk;
    overrides.mode = options.mode;
    overrides.sort = options.sort;
}

/// Run one search and print its results
async fn search(config: &Config, query: String) -> Result<()> {
    let sink = Arc::new(WriterSink::new(std::io::stdout()));
    let client = build_client(config, Arc::new(StaticQuery::new(query.clone())), sink)?;

    let outcome = client
        .search()
        .await
        .with_context(|| format!("Search against {} failed", client.endpoint()))?;

    match outcome {
        SearchOutcome::Rendered { count: 0, .. } => {
            info!("No results found for {query:?}");
        }
        SearchOutcome::Rendered { count, took_ms } => match took_ms {
            Some(ms) => info!("{count} results for {query:?} (server took {ms} ms)"),
            None => info!("{count} results for {query:?}"),
        },
        SearchOutcome::Superseded => {
            debug!("Search for {query:?} was superseded");
        }
    }

    Ok(())
}

/// Search each line of stdin until end of input
async fn interactive(config: &Config) -> Result<()> {
    let input = SharedQuery::new("");
    let sink = Arc::new(WriterSink::new(std::io::stdout()));
    let client = Arc::new(build_client(config, Arc::new(input.clone()), sink)?);

    info!("Enter one query per line; end input (Ctrl-D) to quit");

    let reader = tokio::io::BufReader::new(tokio::io::stdin());
    let summary = run_interactive(client, input, reader).await?;

    info!(
        "Session finished: {} searches started, {} rendered, {} superseded, {} failed",
        summary.started, summary.rendered, summary.superseded, summary.failed
    );

    Ok(())
}

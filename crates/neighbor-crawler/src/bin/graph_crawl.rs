//! graph-crawl: breadth-first crawl of a remote neighbors service
//!
//! Usage:
//!   graph-crawl "Tom Hanks" 2
//!   graph-crawl --config crawler.yaml --max-workers 16 "Kevin Bacon" 3
//!
//! Levels are printed to stdout; diagnostics go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use neighbor_crawler::{Crawler, CrawlerConfig, NodeId, Traversal};

#[derive(Parser, Debug)]
#[command(name = "graph-crawl")]
#[command(about = "Breadth-first crawl of a remote neighbors service")]
#[command(version)]
struct Cli {
    /// Start node, taken literally (it is URL-encoded before sending)
    node_name: String,

    /// Number of BFS rounds to run
    depth: usize,

    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Neighbors endpoint, overrides the config file
    #[arg(long, env = "GRAPH_CRAWL_BASE_URL")]
    base_url: Option<String>,

    /// Maximum concurrent workers per level
    #[arg(long)]
    max_workers: Option<usize>,

    /// Stop at the first empty level
    #[arg(long)]
    stop_on_empty: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn crawler_config(&self) -> Result<CrawlerConfig> {
        let mut config = match &self.config {
            Some(path) => CrawlerConfig::from_yaml_file(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => CrawlerConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(max_workers) = self.max_workers {
            config = config.with_max_workers(max_workers);
        }
        if self.stop_on_empty {
            config = config.with_stop_on_empty_level(true);
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_levels(out: &mut impl Write, traversal: &Traversal) -> io::Result<()> {
    for level in traversal.levels() {
        for node in level {
            writeln!(out, "- {node}")?;
        }
        writeln!(out, "{}", level.len())?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // Usage errors exit with 1; --help and --version are not errors
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.crawler_config()?;
    let crawler = Crawler::http(config)?;

    let started = Instant::now();
    let traversal = crawler.traverse(NodeId::new(cli.node_name), cli.depth).await;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    print_levels(&mut out, &traversal)?;
    writeln!(out, "Time to crawl: {}s", started.elapsed().as_secs_f64())?;
    out.flush()?;
    Ok(())
}

use std::fs::OpenOptions;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use futures::future::join_all;
use regex::Regex;
use tracing::error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use yaml_livecheck::config::{Config, db_path, log_path};
use yaml_livecheck::fetch::{CachingFetcher, HttpFetcher, PageCache, PageFetcher};
use yaml_livecheck::strategy::{KeyPath, YamlStrategy};

const LOG_ENV: &str = "YAML_LIVECHECK_LOG";

#[derive(Parser)]
#[command(name = "yaml-livecheck")]
#[command(version, about = "Find upstream versions in YAML documents")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract versions from the YAML document at each URL
    Check {
        #[arg(required = true)]
        urls: Vec<String>,

        /// Key path selecting version values, e.g. `releases.*.version`
        #[arg(long)]
        path: String,

        /// Pattern applied to each selected value; the first capture group is kept
        #[arg(long)]
        regex: Option<String>,

        /// Read content from a file instead of fetching (single URL only)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Bypass the page cache
        #[arg(long)]
        no_cache: bool,
    },
    /// Manage the page cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Delete expired pages
    Purge,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging()?;

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli.command, config))
}

fn init_logging() -> anyhow::Result<WorkerGuard> {
    let path = log_path();
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}

async fn run(command: Command, config: Config) -> anyhow::Result<()> {
    match command {
        Command::Check {
            urls,
            path,
            regex,
            file,
            no_cache,
        } => {
            let fetcher = build_fetcher(&config, no_cache)?;
            check(YamlStrategy::new(fetcher), &urls, &path, regex.as_deref(), file).await
        }
        Command::Cache {
            action: CacheAction::Purge,
        } => {
            let cache = PageCache::new(&db_path(), config.cache.ttl)?;
            let removed = cache.purge_stale()?;
            println!("Removed {} expired page(s)", removed);
            Ok(())
        }
    }
}

fn build_fetcher(config: &Config, no_cache: bool) -> anyhow::Result<Box<dyn PageFetcher>> {
    let http = HttpFetcher::new(&config.http).context("Failed to create HTTP client")?;

    if no_cache || !config.cache.enabled {
        return Ok(Box::new(http));
    }

    let cache = PageCache::new(&db_path(), config.cache.ttl).context("Failed to open page cache")?;
    Ok(Box::new(CachingFetcher::new(http, cache)))
}

async fn check<F: PageFetcher>(
    strategy: YamlStrategy<F>,
    urls: &[String],
    path: &str,
    regex: Option<&str>,
    file: Option<PathBuf>,
) -> anyhow::Result<()> {
    let key_path = KeyPath::parse(path)?;
    let regex = regex
        .map(Regex::new)
        .transpose()
        .context("Invalid --regex pattern")?;
    let extractor = match regex {
        Some(_) => key_path.regex_extractor(),
        None => key_path.extractor(),
    };

    let content = match file {
        Some(_) if urls.len() > 1 => bail!("--file can only be used with a single URL"),
        Some(file) => Some(
            std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?,
        ),
        None => None,
    };

    let results = join_all(urls.iter().map(|url| {
        strategy.find_versions(url, regex.as_ref(), content.as_deref(), Some(&extractor))
    }))
    .await;

    let mut failures = 0;
    for (url, result) in urls.iter().zip(results) {
        match result {
            Ok(match_data) => println!("{}", serde_json::to_string_pretty(&match_data)?),
            Err(e) => {
                error!("Failed to check {}: {}", url, e);
                eprintln!("{}: {}", url, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} URL(s) failed", failures, urls.len());
    }

    Ok(())
}

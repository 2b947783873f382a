//! Job Scout CLI
//!
//! Runs one monitoring pass per invocation; scheduling is left to cron or a
//! systemd timer.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use job_scout::config::MonitorConfig;
use job_scout::fetch::HttpFetcher;
use job_scout::pipeline::{run_once, Pipeline};
use job_scout::sink::{NotificationSink, StdoutSink, WebhookSink};

/// Job-board monitor
#[derive(Parser, Debug)]
#[command(name = "job-scout")]
#[command(version)]
#[command(about = "Search job boards, filter by region, and send an outreach digest")]
struct Args {
    /// JSON config file (defaults are used when omitted)
    #[arg(short, long, global = true, env = "JOB_SCOUT_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one monitoring pass
    Run {
        /// Print the digest instead of posting it to the webhook
        #[arg(long)]
        dry_run: bool,
    },
    /// List configured sources and their extractors
    Sources,
    /// Run one source's extractor against a saved page
    Extract {
        /// Source id as configured
        #[arg(short, long)]
        source: String,
        /// Saved HTML page
        #[arg(short, long)]
        file: PathBuf,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<MonitorConfig> {
    let config = MonitorConfig::load(path).with_context(|| match path {
        Some(path) => format!("loading {}", path.display()),
        None => "loading default configuration".to_string(),
    })?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = load_config(args.config.as_deref())?;
    let pipeline = Pipeline::new(&config);

    match args.command.unwrap_or(Command::Run { dry_run: false }) {
        Command::Run { dry_run } => {
            tracing::info!("Starting job search for '{}'", config.search_query);
            let fetcher = HttpFetcher::new(&config.fetch)?;

            let sink: Box<dyn NotificationSink> = match (&config.webhook_url, dry_run) {
                (Some(url), false) => Box::new(WebhookSink::new(url.clone())),
                _ => Box::new(StdoutSink),
            };

            let summary = run_once(&pipeline, &config.sources, &fetcher, sink.as_ref()).await?;
            let failed = summary.report.failed_sources();
            if failed > 0 {
                tracing::warn!(
                    "{} of {} sources failed",
                    failed,
                    summary.report.outcomes.len()
                );
            }
        }
        Command::Sources => {
            for source in &config.sources {
                println!(
                    "{:<12} {:<10} {:<32} {}",
                    source.source_id,
                    source.extractor_kind().name(),
                    source.base_url(),
                    source.search_url
                );
            }
        }
        Command::Extract { source, file } => {
            let Some(source) = config.source(&source) else {
                bail!("unknown source '{}'", source);
            };
            let html = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let (candidates, records) = pipeline.process_source(source, &html)?;
            tracing::info!(
                "{}: {} candidates, {} in target region",
                source.source_id,
                candidates,
                records.len()
            );
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }

    Ok(())
}

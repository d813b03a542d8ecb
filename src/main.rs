use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing::{debug, info};

mod config;
mod dom;
mod download;
mod fetch;
mod output;
mod pep;
mod telemetry;
mod versions;
mod whats_new;

use config::Config;
use fetch::CachedClient;
use output::Emitter;
use output::config::OutputFormat;

#[derive(Parser)]
#[command(name = "docscrape", about = "Python documentation scraper CLI")]
struct Cli {
    /// Output selection; plain tab-separated rows when omitted
    #[arg(global = true, short, long, value_enum)]
    output: Option<OutputFormat>,
    /// Drop the HTTP response cache before running
    #[arg(global = true, short = 'c', long)]
    clear_cache: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Release-notes pages for each Python version
    WhatsNew,
    /// Version list with statuses from the docs sidebar
    LatestVersions,
    /// Download the packed-HTML documentation archive
    Download,
    /// Reconcile PEP statuses against their detail pages and count them
    Pep,
}

impl Commands {
    fn mode(&self) -> &'static str {
        match self {
            Commands::WhatsNew => "whats-new",
            Commands::LatestVersions => "latest-versions",
            Commands::Download => "download",
            Commands::Pep => "pep",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    telemetry::config::init_tracing();
    info!("scraper started");
    debug!(
        mode = cli.command.mode(),
        output = ?cli.output,
        clear_cache = cli.clear_cache,
        "command line arguments"
    );

    let config = Config::from_env();
    let client = CachedClient::new(&config)?;
    if cli.clear_cache {
        client.clear_cache()?;
    }

    let results = match &cli.command {
        Commands::WhatsNew => whats_new::run(&client, &config).await?,
        Commands::LatestVersions => versions::run(&client, &config).await?,
        Commands::Download => {
            download::run(&client, &config).await?;
            None
        }
        Commands::Pep => pep::run(&client, &config).await?,
    };

    if let Some(table) = results {
        let emitter = Emitter::new(cli.output, &config.results_dir);
        emitter.emit(cli.command.mode(), &table)?;
    }

    info!("scraper finished");
    Ok(())
}

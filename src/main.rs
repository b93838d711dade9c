//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `site_profile` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Printing results as JSON
//!
//! All core functionality is implemented in the library crate.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use site_profile::config::{DEFAULT_LISTEN_ADDR, HTTP_TIMEOUT_SECS, RENDER_TIMEOUT_SECS};
use site_profile::initialization::{init_logger_with, init_resources};
use site_profile::seo::seo_summary;
use site_profile::server::start_api_server;
use site_profile::{compare, Config, ExtractionMode, LogFormat, LogLevel};

#[derive(Debug, Parser)]
#[command(name = "site_profile", version, about = "Profiles public web pages")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level
    #[arg(long, value_enum, default_value = "info", global = true)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain", global = true)]
    log_format: LogFormat,

    /// Timeout for one page analysis, in seconds
    #[arg(long, default_value_t = RENDER_TIMEOUT_SECS, global = true)]
    render_timeout: u64,

    /// Timeout for plain HTTP fetches, in seconds
    #[arg(long, default_value_t = HTTP_TIMEOUT_SECS, global = true)]
    http_timeout: u64,

    /// User-Agent presented to analyzed sites
    #[arg(long, global = true)]
    user_agent: Option<String>,

    /// Chromium binary (also read from SITE_PROFILE_CHROMIUM)
    #[arg(long, global = true)]
    chromium: Option<PathBuf>,

    /// Never launch a browser; fetch pages over plain HTTP
    #[arg(long, global = true)]
    http_only: bool,

    /// JSON signature file replacing the built-in tool taxonomy
    #[arg(long, global = true)]
    signatures: Option<PathBuf>,

    /// Skip full-page screenshots
    #[arg(long, global = true)]
    no_screenshot: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the HTTP JSON API
    Serve {
        /// Address to bind
        #[arg(long, default_value = DEFAULT_LISTEN_ADDR)]
        listen: SocketAddr,

        /// Remote endpoint used as the basic side of comparisons
        #[arg(long)]
        remote_basic: Option<String>,

        /// Remote endpoint used as the enhanced side of comparisons
        #[arg(long)]
        remote_enhanced: Option<String>,
    },
    /// Profile one page and print it as JSON
    Analyze {
        url: String,

        /// Document facets only
        #[arg(long)]
        basic: bool,
    },
    /// Run the basic and enhanced profiles side by side
    Compare { url: String },
    /// Print a lightweight SEO summary
    Seo { url: String },
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config {
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
            render_timeout_secs: self.render_timeout,
            http_timeout_secs: self.http_timeout,
            chromium_path: self.chromium.clone(),
            http_only: self.http_only,
            signatures: self.signatures.clone(),
            capture_screenshot: !self.no_screenshot,
            ..Default::default()
        };
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        if let Command::Serve {
            listen,
            remote_basic,
            remote_enhanced,
        } = &self.command
        {
            config.listen_addr = *listen;
            config.remote_basic_endpoint = remote_basic.clone();
            config.remote_enhanced_endpoint = remote_enhanced.clone();
        }
        config
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize result")?
    );
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.config();
    let resources = init_resources(&config)
        .await
        .context("Failed to initialize")?;

    match cli.command {
        Command::Serve { .. } => {
            let state = resources.server_state(&config).await;
            start_api_server(config.listen_addr, state).await
        }
        Command::Analyze { url, basic } => {
            let mode = if basic {
                ExtractionMode::Basic
            } else {
                ExtractionMode::Enhanced
            };
            let profile = resources.analyzer.analyze(&url, mode).await?;
            print_json(&profile)
        }
        Command::Compare { url } => {
            let basic = resources.basic_backend(&config).await;
            let enhanced = resources.enhanced_backend(&config);
            let report = compare(&url, basic.as_ref(), enhanced.as_ref()).await?;
            print_json(&report)
        }
        Command::Seo { url } => {
            let summary = seo_summary(&resources.client, &resources.taxonomy, &url).await?;
            print_json(&summary)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run(cli).await {
        log::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

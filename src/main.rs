use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use poise::serenity_prelude as serenity;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing_subscriber::fmt::writer::MakeWriterExt;

use crate::config::Config;

mod absence;
mod classes;
mod config;
mod discord;
mod verify;
mod wcl;

const MAX_LOGIN_RETRIES: u32 = 5;
const INITIAL_RETRY_DELAY: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() {
    // Console plus daily-rotated file logging.
    let file_appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .filename_prefix("bot")
        .filename_suffix("log")
        .build("logs")
        .expect("initializing rolling file appender failed");

    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr.and(non_blocking))
        .with_ansi(true)
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let config_path = if args.is_empty() {
        Cow::from("./config.toml")
    } else {
        Cow::from(args.remove(0))
    };

    let config = match get_config(&*config_path).await {
        Ok(config) => Arc::new(config),
        Err(e) => {
            tracing::error!("Failed to load config: {}", e);
            return;
        }
    };

    if let Err(e) = run_with_retry(config).await {
        tracing::error!("Fatal error: could not keep the bot connected: {}", e);
        tracing::error!("  {:?}", e);
        std::process::exit(1);
    }
}

async fn get_config<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
    let mut f = File::open(path)
        .await
        .context("could not open config file")?;
    let mut toml = String::new();
    f.read_to_string(&mut toml)
        .await
        .context("could not read config file")?;
    let config = toml::from_str(&toml).context("could not parse config file")?;

    Ok(config)
}

/// Retries the gateway connection on network-class failures with
/// exponential backoff. Anything else is fatal.
async fn run_with_retry(config: Arc<Config>) -> anyhow::Result<()> {
    let mut delay = INITIAL_RETRY_DELAY;
    for attempt in 1..=MAX_LOGIN_RETRIES {
        match discord::start(Arc::clone(&config)).await {
            Ok(()) => return Ok(()),
            Err(e) if attempt < MAX_LOGIN_RETRIES && is_network_error(&e) => {
                tracing::warn!("Login attempt {}/{} failed: {:#}", attempt, MAX_LOGIN_RETRIES, e);
                tracing::info!("Retrying in {:?}", delay);
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
            Err(e) => return Err(e),
        }
    }
    anyhow::bail!("max login retries reached")
}

fn is_network_error(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<serenity::Error>(),
        Some(
            serenity::Error::Http(_)
                | serenity::Error::Gateway(_)
                | serenity::Error::Io(_)
                | serenity::Error::Tungstenite(_)
        )
    )
}

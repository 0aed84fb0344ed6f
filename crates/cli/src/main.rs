//! wavebot binary: wire the engine to a console transport.
//!
//! Each stdin line is dispatched as a public message in a simulated
//! channel; lines starting with `/w ` are dispatched as private messages.
//! Real chat transports plug in behind the same [`Transport`] seam.

use std::sync::Arc;

use {
    anyhow::Result,
    async_trait::async_trait,
    clap::Parser,
    tokio::{
        io::{AsyncBufReadExt, BufReader},
        sync::mpsc,
    },
    tracing::info,
    tracing_subscriber::EnvFilter,
};

use {
    wavebot_common::{Destination, IncomingMessage, Origin},
    wavebot_dispatch::{Dispatcher, OutputRouter, Transport, serve},
    wavebot_handlers::build_registry,
    wavebot_radio::RadioClient,
    wavebot_store::{ConfigStore, MemoryConfigStore, SqliteConfigStore},
};

#[derive(Parser)]
#[command(name = "wavebot", about = "wavebot — radio status relay for chat")]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, default_value_t = false)]
    json_logs: bool,

    /// SQLite database URL for durable state (in-memory store when omitted).
    #[arg(long, env = "WAVEBOT_DB")]
    db: Option<String>,

    /// Command prefix.
    #[arg(long, default_value = "!")]
    prefix: String,

    /// Radio API base URL.
    #[arg(long, env = "WAVEBOT_RADIO_URL")]
    radio_url: Option<String>,

    /// Simulated channel id for console input.
    #[arg(long, default_value = "#console")]
    channel: String,

    /// Simulated sender id for console input.
    #[arg(long, default_value = "operator")]
    nick: String,
}

/// Transport that prints to stdout, labeling each destination.
struct ConsoleTransport;

#[async_trait]
impl Transport for ConsoleTransport {
    async fn send(&self, destination: &Destination, text: &str) -> Result<()> {
        match destination {
            Destination::Channel { channel_id } => println!("[{channel_id}] {text}"),
            Destination::User { user_id } => println!("[dm -> {user_id}] {text}"),
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    if cli.json_logs {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let store: Arc<dyn ConfigStore> = match &cli.db {
        Some(url) => Arc::new(SqliteConfigStore::new(url).await?),
        None => Arc::new(MemoryConfigStore::new()),
    };

    let radio = match &cli.radio_url {
        Some(url) => RadioClient::with_base_url(url)?,
        None => RadioClient::new()?,
    };

    let registry = Arc::new(build_registry(&cli.prefix, radio, store.clone())?);
    let router = OutputRouter::new(store, cli.prefix.as_str());
    let dispatcher = Arc::new(Dispatcher::new(
        registry.clone(),
        router,
        Arc::new(ConsoleTransport),
    ));

    info!(
        commands = registry.len(),
        prefix = %cli.prefix,
        durable = cli.db.is_some(),
        "wavebot ready"
    );

    let (tx, rx) = mpsc::channel(64);
    let engine = tokio::spawn(serve(dispatcher, rx));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        if line == "/quit" {
            break;
        }
        let msg = match line.strip_prefix("/w ") {
            Some(text) => IncomingMessage {
                sender_id: cli.nick.clone(),
                text: text.to_string(),
                origin: Origin::Private,
            },
            None => IncomingMessage {
                sender_id: cli.nick.clone(),
                text: line,
                origin: Origin::Public {
                    channel_id: cli.channel.clone(),
                },
            },
        };
        if tx.send(msg).await.is_err() {
            break;
        }
    }

    drop(tx);
    engine.await?;
    Ok(())
}

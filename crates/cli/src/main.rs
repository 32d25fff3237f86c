//! Interactive host driver for the gated-download subsystem.
//!
//! Stands in for a catalog page: lists the registered assets, opens the
//! authorization prompt, and renders queue notifications to the terminal.

use std::io::Write as _;
use std::time::Duration;

use anyhow::Context;
use codevault_core::asset::AssetRegistry;
use codevault_core::messages::{message, MessageKey};
use codevault_fetcher::AssetFetcher;
use codevault_gate::{GateController, GateState, RequestOutcome};
use codevault_ledger::{DownloadLedger, Ledger};
use codevault_notify::{NotificationEvent, NotificationQueue};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::CliConfig;

mod config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "codevault=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CliConfig::from_env()?;
    let registry = AssetRegistry::from_path(&config.registry_path)
        .with_context(|| format!("loading asset registry from {}", config.registry_path))?;
    tracing::info!(assets = registry.len(), "Asset registry loaded");

    let ledger = DownloadLedger::open(&config.state_dir)?;
    let queue = NotificationQueue::default();
    let fetcher = AssetFetcher::new(config.download_dir.as_str())
        .with_timeout(Duration::from_secs(config.fetch_timeout_secs));
    let mut gate = GateController::new(ledger, fetcher, queue.clone(), config.locale);

    // Render notifications as the queue reports them.
    let mut events = queue.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            if let NotificationEvent::Added(n) = event {
                println!("  [{}] {}", n.kind.label(), n.message);
            }
        }
    });

    println!("Commands: list | download <asset-id> | quit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt("> ")?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        match line.split_once(' ') {
            _ if line == "quit" => break,
            _ if line == "list" => {
                for asset in registry.iter() {
                    let count = gate.ledger().get_download_count(&asset.id);
                    println!(
                        "  {:<28} {} ({}/{} downloads)",
                        asset.id, asset.title, count, asset.max_downloads_per_session
                    );
                }
            }
            Some(("download", id)) => {
                let Some(asset) = registry.get(id.trim()) else {
                    println!("  unknown asset id: {id}");
                    continue;
                };
                if gate.request_download(asset) == RequestOutcome::PromptOpened {
                    println!("  {}", message(config.locale, MessageKey::AuthRequired));
                    println!("  {}", message(config.locale, MessageKey::AuthMessage));
                    run_prompt(&mut gate, &mut lines).await?;
                }
            }
            _ if line.is_empty() => {}
            _ => println!("  unknown command: {line}"),
        }
    }

    Ok(())
}

/// Drive the open prompt until the download succeeds or the user cancels.
async fn run_prompt(
    gate: &mut GateController<DownloadLedger, AssetFetcher>,
    lines: &mut Lines<BufReader<Stdin>>,
) -> anyhow::Result<()> {
    while gate.state() == GateState::PromptOpen {
        prompt("code (or 'cancel')> ")?;
        let Some(line) = lines.next_line().await? else {
            gate.cancel();
            break;
        };
        if line.trim() == "cancel" {
            gate.cancel();
            break;
        }
        let _ = gate.submit_code(&line).await;
    }
    Ok(())
}

fn prompt(text: &str) -> std::io::Result<()> {
    print!("{text}");
    std::io::stdout().flush()
}

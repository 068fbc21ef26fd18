//! tempo - Effort estimates and business-hours tracking for card boards.
//!
//! This binary runs the power-up against a sample board, storing effort
//! values in the local data directory instead of a host service.

use anyhow::Context;
use chrono::Local;
use tempo_board::{PowerUp, SortStrategy};
use tempo_config::Config;
use tempo_protocol::HostContext;
use tempo_protocol::dummy::dummy_board;
use tempo_store::FileService;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = Config::load().await.context("loading configuration")?;
    let service = FileService::from_config(&config.store).context("opening effort storage")?;
    info!(path = %service.base_path().display(), "using file storage");

    let power_up = PowerUp::new(service, &config);
    let board = HostContext::for_board(dummy_board());
    let now = Local::now();

    for card in &board.board_cards {
        let Some(context) = board.focus(&card.id) else {
            continue;
        };

        let badges = power_up.card_detail_badges(&context).await?;
        let remaining = power_up.remaining_hours(&now, &context)?;

        let badge_text: Vec<_> = badges
            .iter()
            .map(|badge| format!("[{}: {}]", badge.title, badge.text))
            .collect();
        println!(
            "{:<28} {:>8.2} business hours left  {}",
            card.name,
            remaining,
            badge_text.join(" ")
        );
    }

    let sorted = power_up.sort(SortStrategy::ByName, &board.board_cards);
    let names: Vec<_> = sorted
        .sorted_ids
        .iter()
        .filter_map(|id| board.board_cards.iter().find(|card| &card.id == id))
        .map(|card| card.name.as_str())
        .collect();
    println!("\nBy name: {}", names.join(", "));

    Ok(())
}

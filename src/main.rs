use strikewatch::services::binance::BinanceClient;
use strikewatch::services::notifier::DiscordNotifier;
use strikewatch::store::AlertStore;
use strikewatch::{AppState, alert_monitor, config};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = config::load();

    if settings.discord_bot_token.trim().is_empty() {
        tracing::error!("DISCORD_BOT_TOKEN not set. Create .env from .env.example");
        std::process::exit(1);
    }

    let store = AlertStore::open(&settings.database_path).expect("Failed to open alert database");

    let state = AppState {
        settings: settings.clone(),
        store,
    };

    let source = BinanceClient::new();
    let notifier = DiscordNotifier::new(settings.discord_bot_token.clone());

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let monitor = alert_monitor::spawn_alert_monitor(state, source, notifier, shutdown_rx);

    tracing::info!("strikewatch running, press Ctrl-C to stop");
    tokio::signal::ctrl_c().await.expect("failed to listen for ctrl-c");

    let _ = shutdown_tx.send(true);
    let _ = monitor.await;
}

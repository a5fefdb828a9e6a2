use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use crate::AppState;
use crate::error::Result;
use crate::services::binance::CandleSource;
use crate::services::commands;
use crate::services::dedup::DedupTracker;
use crate::services::dispatcher::{self, FireAndForget, RetirePolicy};
use crate::services::evaluator;
use crate::services::notifier::Notifier;

/// Spawn the single poller task. It owns its own dedup tracker, re-reads the
/// interval and announcement channel every cycle (live reconfiguration) and
/// runs until `shutdown` fires. A tick error is logged and the next cycle
/// proceeds; the monitor never brings the process down.
pub fn spawn_alert_monitor<C, N>(
    state: AppState,
    source: C,
    notifier: N,
    mut shutdown: watch::Receiver<bool>,
) -> tokio::task::JoinHandle<()>
where
    C: CandleSource + 'static,
    N: Notifier + 'static,
{
    tokio::spawn(async move {
        let mut dedup = DedupTracker::new();
        let policy = FireAndForget;
        tracing::info!("alert monitor started");

        loop {
            if let Err(e) = run_tick(&state, &source, &notifier, &policy, &mut dedup).await {
                tracing::error!("[alert-monitor] tick error: {}", e);
            }

            let interval = commands::poll_interval(&state.store)
                .unwrap_or(crate::config::DEFAULT_POLL_INTERVAL_SECS);

            tokio::select! {
                _ = time::sleep(Duration::from_secs(interval)) => {}
                _ = shutdown.changed() => {
                    tracing::info!("alert monitor stopped");
                    return;
                }
            }
        }
    })
}

/// One poll cycle: per symbol with active alerts, fetch the latest closed
/// candle, skip already-seen close times, evaluate every alert and dispatch
/// the hits.
pub async fn run_tick<C, N>(
    state: &AppState,
    source: &C,
    notifier: &N,
    policy: &dyn RetirePolicy,
    dedup: &mut DedupTracker,
) -> Result<()>
where
    C: CandleSource,
    N: Notifier,
{
    let default_destination = commands::default_destination(&state.store)?;
    let cycle_fallback = state.settings.fallback_channel_id.as_deref();

    let symbols = state.store.distinct_symbols()?;
    if symbols.is_empty() {
        return Ok(());
    }

    for symbol in symbols {
        let candle = match source.fetch_latest_closed(&symbol).await {
            Ok(Some(c)) => c,
            Ok(None) => {
                // Empty result is not a transport error but yields nothing
                // to evaluate either; dedup state stays untouched.
                tracing::warn!("no candle data for {}", symbol);
                continue;
            }
            Err(e) => {
                tracing::warn!("candle fetch failed for {}: {}", symbol, e);
                continue;
            }
        };

        if !dedup.should_process(&symbol, candle.close_time) {
            continue;
        }

        for alert in state.store.list_by_symbol(&symbol)? {
            if let Some(hit) = evaluator::evaluate(&alert, &candle) {
                dispatcher::dispatch_hit(
                    &state.store,
                    notifier,
                    policy,
                    &alert,
                    &hit,
                    &candle,
                    default_destination.as_deref(),
                    cycle_fallback,
                )
                .await?;
            }
        }
    }

    Ok(())
}

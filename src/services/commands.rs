//! Inbound command surface for the chat front end: add / remove / list
//! alerts, channel and interval settings, and a candle diagnostic.

use crate::config::{
    ANNOUNCEMENT_CHANNEL_KEY, DEFAULT_POLL_INTERVAL_SECS, MAX_POLL_INTERVAL_SECS,
    MIN_POLL_INTERVAL_SECS, POLL_INTERVAL_KEY,
};
use crate::error::{Error, Result};
use crate::models::{Alert, CandleDebug, Direction, display_symbol};
use crate::services::binance::BinanceClient;
use crate::store::AlertStore;

pub async fn candle_debug(client: &BinanceClient, symbol: &str) -> Result<Option<CandleDebug>> {
    client.fetch_debug(symbol).await
}

pub fn add_alert(
    store: &AlertStore,
    symbol: &str,
    strike_price: f64,
    direction: Option<&str>,
    note: &str,
    destination_override: Option<&str>,
) -> Result<Alert> {
    let direction = Direction::parse(direction.unwrap_or_default())?;
    store.add(symbol, strike_price, direction, note, destination_override)
}

pub fn remove_alert(store: &AlertStore, id: i64) -> Result<bool> {
    store.remove(id)
}

pub fn list_alerts(store: &AlertStore) -> Result<Vec<Alert>> {
    store.list_all()
}

/// One list entry, e.g. `#3 BTC/USDT @ $100000.00 (touch) | Key level`.
pub fn format_alert_line(alert: &Alert) -> String {
    let mut line = format!(
        "#{} {} @ ${:.2} ({})",
        alert.id,
        display_symbol(&alert.symbol),
        alert.strike_price,
        alert.direction.as_str()
    );
    if !alert.note.is_empty() {
        line.push_str(" | ");
        line.push_str(&alert.note);
    }
    line
}

pub fn format_candle_debug(candle: &CandleDebug) -> String {
    format!(
        "{} latest closed 1m candle\nOpen: ${:.2} | High: ${:.2} | Low: ${:.2} | Close: ${:.2}\nVolume: {:.2}\nOpen: {} | Close: {}",
        display_symbol(&candle.symbol),
        candle.open,
        candle.high,
        candle.low,
        candle.close,
        candle.volume,
        candle.open_time_display(),
        candle.close_time_display()
    )
}

pub fn set_default_destination(store: &AlertStore, destination_id: &str) -> Result<()> {
    let destination_id = destination_id.trim();
    if destination_id.is_empty() {
        return Err(Error::Validation("destination id must not be empty".to_string()));
    }
    store.set_setting(ANNOUNCEMENT_CHANNEL_KEY, destination_id)
}

pub fn default_destination(store: &AlertStore) -> Result<Option<String>> {
    store.get_setting(ANNOUNCEMENT_CHANNEL_KEY)
}

pub fn set_poll_interval(store: &AlertStore, seconds: u64) -> Result<()> {
    if !(MIN_POLL_INTERVAL_SECS..=MAX_POLL_INTERVAL_SECS).contains(&seconds) {
        return Err(Error::Validation(format!(
            "poll interval must be between {MIN_POLL_INTERVAL_SECS} and {MAX_POLL_INTERVAL_SECS} seconds"
        )));
    }
    store.set_setting(POLL_INTERVAL_KEY, &seconds.to_string())
}

/// Effective poll interval: the stored value clamped to the allowed range;
/// the default when unset or unparsable.
pub fn poll_interval(store: &AlertStore) -> Result<u64> {
    let seconds = store
        .get_setting(POLL_INTERVAL_KEY)?
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);
    Ok(seconds.clamp(MIN_POLL_INTERVAL_SECS, MAX_POLL_INTERVAL_SECS))
}

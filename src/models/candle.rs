use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One completed time bucket of price data. Never mutated after construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub high: f64,
    pub low: f64,
    /// Close time in epoch milliseconds.
    pub close_time: i64,
}

impl Candle {
    pub fn close_time_display(&self) -> String {
        format_epoch_millis(self.close_time)
    }
}

/// Full OHLCV variant, only used by the diagnostic command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandleDebug {
    pub symbol: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub open_time: i64,
    pub close_time: i64,
}

impl CandleDebug {
    pub fn open_time_display(&self) -> String {
        format_epoch_millis(self.open_time)
    }

    pub fn close_time_display(&self) -> String {
        format_epoch_millis(self.close_time)
    }
}

/// Epoch millis -> "2025-01-31 14:05 UTC". Falls back to the raw number for
/// timestamps chrono cannot represent.
pub fn format_epoch_millis(ms: i64) -> String {
    match Utc.timestamp_millis_opt(ms).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => ms.to_string(),
    }
}

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Trigger condition for an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Fires when the candle range includes the strike.
    #[default]
    Touch,
    /// Fires when the candle high reaches the strike.
    Up,
    /// Fires when the candle low reaches the strike.
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Touch => "touch",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// Human label used in notifications ("Touched" / "Up" / "Down").
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Touch => "Touched",
            Direction::Up => "Up",
            Direction::Down => "Down",
        }
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        match s.trim().to_lowercase().as_str() {
            "" | "touch" => Ok(Direction::Touch),
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(Error::Validation(format!(
                "invalid direction '{other}' (expected touch, up or down)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: i64,

    /// Normalized pair, e.g. "BTCUSDT".
    pub symbol: String,

    pub strike_price: f64,
    pub direction: Direction,

    /// Free text shown when the alert fires; no semantic effect.
    pub note: String,

    /// Explicit delivery channel; when None the dispatcher falls back to the
    /// configured announcement channel.
    pub destination_override: Option<String>,

    pub created_at: String,
}

/// Normalize a user-supplied pair: uppercase, strip "/", default the quote
/// currency to USDT (e.g. "btc" -> "BTCUSDT", "eth/usdt" -> "ETHUSDT").
pub fn normalize_symbol(raw: &str) -> String {
    let mut symbol = raw.trim().to_uppercase().replace('/', "");
    if !symbol.ends_with("USDT") {
        symbol.push_str("USDT");
    }
    symbol
}

/// Format a normalized pair for display (e.g. "BTCUSDT" -> "BTC/USDT").
pub fn display_symbol(symbol: &str) -> String {
    match symbol.strip_suffix("USDT") {
        Some(base) if !base.is_empty() => format!("{base}/USDT"),
        _ => symbol.to_string(),
    }
}

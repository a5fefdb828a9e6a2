use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::{Candle, CandleDebug, normalize_symbol};

pub const BINANCE_API_URL: &str = "https://api.binance.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// Kline row indices: [open_time, open, high, low, close, volume, close_time, ...]
const OPEN_TIME_INDEX: usize = 0;
const OPEN_INDEX: usize = 1;
const HIGH_INDEX: usize = 2;
const LOW_INDEX: usize = 3;
const CLOSE_INDEX: usize = 4;
const VOLUME_INDEX: usize = 5;
const CLOSE_TIME_INDEX: usize = 6;

/// Source of closed candles. The contract is that a returned candle's close
/// time has already elapsed; in-progress buckets are never handed out.
/// `Ok(None)` means the source had no data, which is not an error.
pub trait CandleSource: Send + Sync {
    fn fetch_latest_closed(
        &self,
        symbol: &str,
    ) -> impl Future<Output = Result<Option<Candle>>> + Send;
}

/// Public market-data client (no API key needed for klines).
#[derive(Clone)]
pub struct BinanceClient {
    http: Client,
    base_url: String,
}

impl BinanceClient {
    pub fn new() -> Self {
        Self::with_base_url(BINANCE_API_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { http, base_url }
    }

    /// Fetch the two most recent 1m klines; the newest one may still be forming.
    async fn klines(&self, symbol: &str) -> Result<Vec<Vec<Value>>> {
        let url = format!("{}/api/v3/klines", self.base_url);
        let res = self
            .http
            .get(&url)
            .query(&[("symbol", symbol), ("interval", "1m"), ("limit", "2")])
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(Error::BadResponse(format!(
                "Binance klines failed for {symbol}: {status} {body}"
            )));
        }

        res.json::<Vec<Vec<Value>>>().await.map_err(Error::from)
    }

    /// Newest kline whose close time has already elapsed, or None.
    fn last_closed(rows: &[Vec<Value>]) -> Option<&Vec<Value>> {
        let now_ms = Utc::now().timestamp_millis();
        rows.iter()
            .rev()
            .find(|row| matches!(field_i64(row, CLOSE_TIME_INDEX), Ok(t) if t <= now_ms))
    }

    /// Latest closed candle with full OHLCV, for the diagnostic command.
    pub async fn fetch_debug(&self, symbol: &str) -> Result<Option<CandleDebug>> {
        let symbol = normalize_symbol(symbol);
        let rows = self.klines(&symbol).await?;
        let Some(row) = Self::last_closed(&rows) else {
            return Ok(None);
        };

        Ok(Some(CandleDebug {
            symbol,
            open: field_f64(row, OPEN_INDEX)?,
            high: field_f64(row, HIGH_INDEX)?,
            low: field_f64(row, LOW_INDEX)?,
            close: field_f64(row, CLOSE_INDEX)?,
            volume: field_f64(row, VOLUME_INDEX)?,
            open_time: field_i64(row, OPEN_TIME_INDEX)?,
            close_time: field_i64(row, CLOSE_TIME_INDEX)?,
        }))
    }
}

impl CandleSource for BinanceClient {
    async fn fetch_latest_closed(&self, symbol: &str) -> Result<Option<Candle>> {
        let symbol = normalize_symbol(symbol);
        let rows = self.klines(&symbol).await?;
        let Some(row) = Self::last_closed(&rows) else {
            return Ok(None);
        };

        Ok(Some(Candle {
            high: field_f64(row, HIGH_INDEX)?,
            low: field_f64(row, LOW_INDEX)?,
            close_time: field_i64(row, CLOSE_TIME_INDEX)?,
        }))
    }
}

// Binance serializes prices as strings and timestamps as numbers.
fn field_f64(row: &[Value], index: usize) -> Result<f64> {
    row.get(index)
        .and_then(|v| match v {
            Value::String(s) => s.parse::<f64>().ok(),
            Value::Number(n) => n.as_f64(),
            _ => None,
        })
        .ok_or_else(|| Error::BadResponse(format!("kline field {index} is not a price")))
}

fn field_i64(row: &[Value], index: usize) -> Result<i64> {
    row.get(index)
        .and_then(Value::as_i64)
        .ok_or_else(|| Error::BadResponse(format!("kline field {index} is not a timestamp")))
}

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde_json::{Value, json};

use crate::error::{Error, Result};

pub const DISCORD_API_URL: &str = "https://discord.com/api/v10";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Structured description of a triggered alert, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertNotification {
    /// e.g. "BTC/USDT Price Alert"
    pub title: String,
    pub direction_label: &'static str,
    pub strike_price: f64,
    /// "Candle Range" | "Candle High" | "Candle Low"
    pub price_field: &'static str,
    pub price_display: String,
    pub note: Option<String>,
    /// Candle close time, human readable UTC.
    pub candle_time: String,
    pub color: u32,
}

/// Hands a notification to the chat platform. Implementations own their
/// transport and timeouts; the dispatcher only sees success or failure.
pub trait Notifier: Send + Sync {
    fn deliver(
        &self,
        destination: &str,
        payload: &AlertNotification,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Posts notifications as embeds to a Discord channel via the REST API.
#[derive(Clone)]
pub struct DiscordNotifier {
    http: Client,
    bot_token: String,
    api_url: String,
}

impl DiscordNotifier {
    pub fn new(bot_token: String) -> Self {
        Self::with_api_url(bot_token, DISCORD_API_URL.to_string())
    }

    pub fn with_api_url(bot_token: String, api_url: String) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            http,
            bot_token,
            api_url,
        }
    }

    fn embed(payload: &AlertNotification) -> Value {
        let mut fields = vec![
            json!({
                "name": "Strike",
                "value": format!("${:.2} ({})", payload.strike_price, payload.direction_label),
                "inline": true,
            }),
            json!({
                "name": payload.price_field,
                "value": payload.price_display,
                "inline": true,
            }),
        ];
        if let Some(note) = &payload.note {
            fields.push(json!({ "name": "Note", "value": note, "inline": false }));
        }
        fields.push(json!({
            "name": "Candle Time",
            "value": payload.candle_time,
            "inline": false,
        }));

        json!({
            "title": payload.title,
            "color": payload.color,
            "fields": fields,
        })
    }
}

impl Notifier for DiscordNotifier {
    async fn deliver(&self, destination: &str, payload: &AlertNotification) -> Result<()> {
        let url = format!("{}/channels/{}/messages", self.api_url, destination);
        let body = json!({ "embeds": [Self::embed(payload)] });

        let res = self
            .http
            .post(&url)
            .header("Authorization", format!("Bot {}", self.bot_token))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Delivery(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(Error::Delivery(format!(
                "Discord send to {destination} failed: {status} {body}"
            )));
        }

        Ok(())
    }
}

use std::collections::HashMap;

/// Per-symbol marker of the last candle close time already evaluated.
///
/// Owned by the scheduler instance (not a process-wide singleton) and never
/// persisted: after a restart the first fetched candle is simply evaluated
/// again, which at worst costs one redundant pass.
///
/// Only an exactly-equal close time is skipped. An older close time (e.g.
/// after a data anomaly) is processed and becomes the new marker; detecting
/// out-of-order candles is deliberately out of scope.
#[derive(Debug, Default)]
pub struct DedupTracker {
    last_seen: HashMap<String, i64>,
}

impl DedupTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test-and-set: returns true exactly once per (symbol, close_time) until
    /// a different close time is seen for that symbol, recording the new
    /// value as a side effect.
    pub fn should_process(&mut self, symbol: &str, close_time: i64) -> bool {
        if self.last_seen.get(symbol) == Some(&close_time) {
            return false;
        }
        self.last_seen.insert(symbol.to_string(), close_time);
        true
    }
}

use crate::models::{Alert, Candle, Direction};

/// Outcome of a triggered alert: the price figure to report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub trigger_price: f64,
}

/// Decide whether one closed candle triggers one alert. Pure, no I/O.
///
/// Boundaries are inclusive: a candle whose high or low exactly equals the
/// strike counts as a hit. A single qualifying candle is sufficient; there is
/// no hysteresis or minimum-move filter.
pub fn evaluate(alert: &Alert, candle: &Candle) -> Option<Hit> {
    let strike = alert.strike_price;
    match alert.direction {
        Direction::Touch if candle.low <= strike && strike <= candle.high => {
            Some(Hit { trigger_price: strike })
        }
        Direction::Up if candle.high >= strike => Some(Hit {
            trigger_price: candle.high,
        }),
        Direction::Down if candle.low <= strike => Some(Hit {
            trigger_price: candle.low,
        }),
        _ => None,
    }
}

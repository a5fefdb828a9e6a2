pub mod alert;
pub mod candle;

pub use alert::{Alert, Direction, display_symbol, normalize_symbol};
pub use candle::{Candle, CandleDebug};

pub mod binance;
pub mod commands;
pub mod dedup;
pub mod dispatcher;
pub mod evaluator;
pub mod notifier;

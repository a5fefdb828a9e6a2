//! Library entrypoint for strikewatch.
//!
//! This file exists mainly to make integration tests easy (tests under
//! `tests/` can import the app state, store, services and monitor).

pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub mod services;

pub mod alert_monitor;

#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub store: store::AlertStore,
}

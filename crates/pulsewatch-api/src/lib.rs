// pulsewatch-api: Async Rust client for the pulsewatch monitoring service HTTP API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod manual;
mod monitoring;
mod posts;
mod reports;
mod settings;

pub use client::ApiClient;
pub use error::Error;

pub mod api;
pub mod charts;
pub mod client;
pub mod config;
pub mod envelope;
pub mod errors;
pub mod export;
pub mod handlers;
pub mod models;

pub use client::JsonClient;
pub use config::resolve_base_url;
pub use envelope::{UpdateEnvelope, UpdateOutcome};
pub use errors::ClientError;
pub use models::{Method, RequestDescriptor};

// myuplink-api: Async Rust client for the myUplink cloud API.

pub mod auth;
pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use auth::Credentials;
pub use client::MyUplinkClient;
pub use error::Error;
pub use transport::TransportConfig;

/// Default production endpoint for the myUplink cloud API.
pub const DEFAULT_BASE_URL: &str = "https://api.myuplink.com";

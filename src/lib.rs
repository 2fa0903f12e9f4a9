//! Rust client for the SMS.RU plain-text HTTP API.
//!
//! The crate is split the usual way: a domain layer of strong types, a transport
//! layer for the wire format (query encoding, line-based responses), and a small
//! client layer issuing the requests.
//!
//! ```rust,no_run
//! use smsru_plain::{ApiId, SenderId, SmsRuClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), smsru_plain::SmsRuError> {
//!     let client = SmsRuClient::new(ApiId::new("...")?, Some(SenderId::new("shop")?));
//!     let sms = client.new_sms("79251234567", "hello");
//!     let response = client.send_sms(&sms).await?;
//!     println!("{} ({})", response.id, response.status);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{ClientConfig, ConfigError, SmsRuClient, SmsRuClientBuilder, SmsRuError};
pub use domain::{
    ApiId, PartnerId, Response, STATUS_DESCRIPTIONS, SenderId, Sms, SmsId, StatusCode,
    ValidationError,
};

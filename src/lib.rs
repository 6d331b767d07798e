//! Typed Rust client for the MSG91 SendOTP HTTP API.
//!
//! The crate is split into a domain layer of strong types, a transport layer for
//! request encoding and response classification, and a small client layer that
//! dispatches requests and hands the outcome back either as a `Result` or through
//! a callback.
//!
//! ```rust,no_run
//! use sendotp::{AuthKey, OtpClient, OtpResponse};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OtpClient::new(AuthKey::new("...")?);
//!     client.send("919999999999", "OTPSMS", None).await?;
//!     let payload = client.verify("919999999999", "1234").await?;
//!     println!("verified: {}", OtpResponse::from_payload(&payload)?.is_success());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{Callback, Completion, ErrorKind, OtpClient, OtpClientBuilder, OtpError};
pub use domain::{
    AuthKey, Endpoint, MessageTemplate, Method, Otp, OtpExpiry, OtpRequest, OtpResponse,
    RawResponse, ResponseData, ResponseType, RetryType, ValidationError,
};

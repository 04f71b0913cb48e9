//! Typed blocking Rust client for the Nexmo HTTP APIs.
//!
//! Covers account balance, SMS, text-to-speech calls and number insight
//! lookups. The crate is split into a domain layer of strong types, a
//! transport layer for endpoints and wire-format quirks, and a small client
//! layer orchestrating requests.
//!
//! ```rust,no_run
//! use nexmo::{Credentials, NexmoClient, SendSms};
//!
//! fn main() -> Result<(), nexmo::NexmoError> {
//!     let client = NexmoClient::new(Credentials::new("key", "secret")?)?;
//!     if client.is_valid_phone("555-123-4567") {
//!         let payload = client.send_sms(SendSms::new("555-123-4567", "hello"))?;
//!         println!("{}", payload.to_json_string());
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    ClientErrorState, Credentials, ErrorKind, NexmoClient, NexmoClientBuilder, NexmoConfig,
    NexmoError, TransportErrorCode,
};
pub use domain::{
    ApiKey, ApiSecret, CallingCodeTable, CountryCallingCode, HttpMethod, KnownStatusCode,
    NetworkType, Operation, Payload, PhoneNumber, PhoneNumberNormalizer, Region, ResponseFormat,
    SendSms, SendTextToSpeech, SenderId, StatusCode, ValidationError,
};

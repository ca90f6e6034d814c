//! CLM loyalty-program client
//!
//! This crate talks to the CLM loyalty-program SOAP service: it renders
//! typed, validated requests into the service's envelope, posts them, and
//! turns the answer into the operation's `return` payload or a classified
//! error.
//!
//! # Features
//!
//! - **Account lookups**: balance, customer profile, transactions, account
//!   summary
//! - **Account changes**: merge, non-airline accrual, full or partial
//!   reversal, enrollment
//! - **Local validation**: accrual and reversal preconditions are checked
//!   before anything is sent
//! - **Error taxonomy**: every service-side failure surfaces as a
//!   [`ServiceError`] with a fixed code triple and an internal diagnostic
//! - **Structured logging**: each call is logged through `tracing` with the
//!   pretty-printed request and response
//!
//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use clmclient::{Accrual, ClientConfig, LoyaltyClient, OperationResult};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = LoyaltyClient::connect(ClientConfig::from_env()?)?;
//!
//!     let summary = client.get_account_summary("100200300").await?;
//!     println!("Tier: {:?}", summary.field_str("tier"));
//!
//!     let at = NaiveDate::from_ymd_opt(2024, 2, 9)
//!         .unwrap()
//!         .and_hms_opt(18, 30, 0)
//!         .unwrap();
//!     let accrual = Accrual::new("100200300", "HOTEL", "PUR", "INV-1", at, 120.0, "Jo", "Doe")
//!         .with_benefit_codes(["DOUBLE", "WEEKEND"]);
//!     client.accrual(&accrual).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Connection failures, timeouts, non-200 answers and bodies without the
//! expected response element all yield the same
//! [`ConnectionFailure`] kind (`503:50301: Bonus program is unavailable`).
//! The cause is only available through
//! [`ServiceError::internal_message`] and the logs.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod models;
pub mod requests;
pub mod response;
pub mod results;
pub mod transport;

// Re-exports
pub use client::{LoyaltyClient, operations};
pub use config::ClientConfig;
pub use error::{ConnectionFailure, Error, Result, ServiceError, ServiceFailure};
pub use models::{
    Address, CommunicationPreferences, Customer, ExtendedAttribute, PhoneData, WireForm,
};
pub use requests::{Accrual, AccrualReversal, BenefitCodes};
pub use results::OperationResult;
pub use transport::{HttpTransport, Transport, TransportError, TransportResponse};

//! Loyalty program client
//!
//! One method per supported operation. Each method checks its own
//! preconditions, shapes the `data` mapping and runs the shared pipeline:
//! envelope → transport → response interpretation → log.
//!
//! # Example
//!
//! ```no_run
//! use clmclient::{ClientConfig, LoyaltyClient};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> clmclient::Result<()> {
//!     let config = ClientConfig::new("login", "password", "https://clm.example.com/ws")
//!         .with_timeout(Duration::from_secs(10));
//!     let client = LoyaltyClient::connect(config)?;
//!
//!     let balance = client.get_balance("100200300").await?;
//!     println!("{}", balance);
//!     Ok(())
//! }
//! ```
//!
//! # Session
//!
//! The client owns its transport. It is acquired by [`LoyaltyClient::connect`]
//! (or handed over with [`LoyaltyClient::with_transport`]) and released when
//! the client is dropped, however many calls went through it and whether they
//! failed or not. Methods take `&self`; concurrent calls are independent.

use crate::config::ClientConfig;
use crate::envelope;
use crate::error::{Error, Result, ServiceError};
use crate::models::{Customer, WireForm};
use crate::requests::{Accrual, AccrualReversal};
use crate::response::{self, pretty_or_raw};
use crate::transport::{DEFAULT_HEADERS, HttpTransport, Transport};
use clmsoap::WireMap;
use serde_json::{Value, json};
use std::time::Instant;
use tracing::{Level, debug, enabled, warn};
use uuid::Uuid;

/// Operation names on the wire
pub mod operations {
    pub const GET_BALANCE: &str = "getBalance";
    pub const GET_CUSTOMER: &str = "getCustomer";
    pub const GET_TRANSACTIONS: &str = "getTransactions";
    pub const GET_ACCOUNT_SUMMARY: &str = "getAccountSummary";
    pub const MERGE_ACCOUNT: &str = "mergeAccount";
    pub const ACCRUAL: &str = "nonAirAccrual";
    pub const REVERSAL: &str = "nonAirReversal";
    pub const ENROLL: &str = "enroll";
}

/// Loyalty program SOAP client
#[derive(Debug, Clone)]
pub struct LoyaltyClient<T: Transport = HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl LoyaltyClient<HttpTransport> {
    /// Validate `config` and open an HTTP transport
    pub fn connect(config: ClientConfig) -> Result<Self> {
        Self::with_transport(config, HttpTransport::new())
    }
}

impl<T: Transport> LoyaltyClient<T> {
    /// Validate `config` and use `transport` for every call
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    /// Get the configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ========================================================================
    // Account lookups
    // ========================================================================

    /// Points balance of a card
    pub async fn get_balance(&self, card_number: &str) -> Result<Value> {
        self.request(operations::GET_BALANCE, card_params(card_number))
            .await
    }

    /// Customer profile of a card holder
    pub async fn get_customer(&self, card_number: &str) -> Result<Value> {
        self.request(operations::GET_CUSTOMER, card_params(card_number))
            .await
    }

    /// Transactions of a card
    pub async fn get_transactions(&self, card_number: &str) -> Result<Value> {
        self.request(operations::GET_TRANSACTIONS, card_params(card_number))
            .await
    }

    /// Balance plus basic profile data (name, tier)
    pub async fn get_account_summary(&self, card_number: &str) -> Result<Value> {
        self.request(operations::GET_ACCOUNT_SUMMARY, card_params(card_number))
            .await
    }

    // ========================================================================
    // Account changes
    // ========================================================================

    /// Merge the donor account `source_card_number` into
    /// `destination_card_number`
    pub async fn merge_account(
        &self,
        source_card_number: &str,
        destination_card_number: &str,
    ) -> Result<Value> {
        let mut params = WireMap::new();
        params.insert("sourceCardNo".into(), json!(source_card_number));
        params.insert("destinationCardNo".into(), json!(destination_card_number));
        self.request(operations::MERGE_ACCOUNT, params).await
    }

    /// Award points for a non-airline transaction
    ///
    /// Fails with [`Error::InvalidArgument`] before any request if the value
    /// is not positive.
    pub async fn accrual(&self, accrual: &Accrual) -> Result<Value> {
        let params = accrual.to_params()?;
        self.request(operations::ACCRUAL, params).await
    }

    /// Reverse a previous accrual, fully or partially
    ///
    /// Fails with [`Error::InvalidArgument`] before any request if neither
    /// transaction id is given or the value is not positive.
    pub async fn reverse_accrual(&self, reversal: &AccrualReversal) -> Result<Value> {
        let params = reversal.to_params()?;
        self.request(operations::REVERSAL, params).await
    }

    /// Enroll a new member
    ///
    /// `is_complete == false` is a quick enrollment, completed later.
    pub async fn enroll(&self, customer: &Customer, is_complete: bool) -> Result<Value> {
        let params = enroll_params(customer, is_complete)?;
        self.request(operations::ENROLL, params).await
    }

    // ========================================================================
    // Pipeline
    // ========================================================================

    async fn request(&self, operation: &str, data: WireMap) -> Result<Value> {
        let request_id = Uuid::new_v4();
        let started = Instant::now();

        let request_text = envelope::build_envelope(&self.config, operation, data)?;

        let response = match self
            .transport
            .post(
                self.config.uri(),
                request_text.as_bytes().to_vec(),
                DEFAULT_HEADERS,
                self.config.timeout(),
            )
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let detail = e.to_string();
                log_failure(request_id, operation, started, &request_text, None, None, &detail);
                return Err(ServiceError::connection(detail).into());
            }
        };

        match response::interpret(operation, response.status, &response.body) {
            Ok(value) => {
                if enabled!(Level::DEBUG) {
                    debug!(
                        request_id = %request_id,
                        operation,
                        http_status = response.status,
                        request_text = %format!("Comarch soap request:\n\n{}\n", pretty_or_raw(&request_text)),
                        response_text = %format!("Comarch soap response:\n\n{}\n", pretty_or_raw(&response.body)),
                        duration_seconds = elapsed_secs(started),
                        "Request {} method {}",
                        request_id,
                        operation
                    );
                }
                Ok(value)
            }
            Err(e) => {
                let internal = e.internal_message().unwrap_or_default();
                let detail = match response::fault_summary(&response.body) {
                    Some(fault) => format!("{}\n{}", fault, internal),
                    None => internal.to_string(),
                };
                log_failure(
                    request_id,
                    operation,
                    started,
                    &request_text,
                    Some(response.status),
                    Some(&response.body),
                    &detail,
                );
                Err(Error::Service(e))
            }
        }
    }
}

fn card_params(card_number: &str) -> WireMap {
    WireMap::from_iter([("cardNo".to_string(), json!(card_number))])
}

/// Builds the `data` mapping of an enrollment
///
/// `incompleteData` is `"N"` for a complete enrollment and `"Y"` for a quick
/// one.
pub fn enroll_params(customer: &Customer, is_complete: bool) -> Result<WireMap> {
    let mut params = WireMap::new();
    params.insert("customer".into(), Value::Object(customer.to_wire_form()?));
    params.insert(
        "incompleteData".into(),
        json!(if is_complete { "N" } else { "Y" }),
    );
    Ok(params)
}

fn elapsed_secs(started: Instant) -> f64 {
    (started.elapsed().as_secs_f64() * 1000.0).round() / 1000.0
}

fn log_failure(
    request_id: Uuid,
    operation: &str,
    started: Instant,
    request_text: &str,
    http_status: Option<u16>,
    response_text: Option<&str>,
    error_detail: &str,
) {
    let response_text =
        response_text.map(|r| format!("Comarch soap response:\n\n{}\n", pretty_or_raw(r)));
    warn!(
        request_id = %request_id,
        operation,
        http_status,
        request_text = %format!("Comarch soap request:\n\n{}\n", pretty_or_raw(request_text)),
        response_text = response_text.as_deref(),
        duration_seconds = elapsed_secs(started),
        error_detail,
        "Request {} method {} failed with error:\n {}",
        request_id,
        operation,
        error_detail
    );
}

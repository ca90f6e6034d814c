//! # clmsoap - SOAP plumbing for the CLM loyalty client
//!
//! This crate renders request envelopes and reads response envelopes for
//! document/literal SOAP services whose payloads are plain element trees
//! (no `xsi:type`, no encoding style).
//!
//! ## Features
//!
//! - Rendering of a request envelope around a value tree payload
//! - Parsing of response envelopes and lookup of `{operation}Response`
//! - Conversion between XML elements and `serde_json::Value` trees
//! - SOAP Fault extraction for diagnostics
//! - Pretty-printing of XML documents for logs
//!
//! ## Value mapping
//!
//! Payloads are expressed as `serde_json::Value` trees:
//!
//! - an object becomes one child element per key
//! - an array repeats its key once per item
//! - `null` and `{}` become empty elements
//! - strings, numbers and booleans become text
//!
//! Parsing goes the other way, dropping namespace prefixes from keys and
//! collapsing repeated siblings into arrays.
//!
//! ## Example
//!
//! ```
//! use clmsoap::{build_soap_request, parse_soap_envelope};
//! use serde_json::json;
//!
//! let payload = json!({"getBalance": {"data": {"cardNo": "100200300"}}});
//! let xml = build_soap_request(
//!     "http://interfaces.esb.clm.comarch.com/",
//!     "getBalance",
//!     payload.as_object().unwrap(),
//! )
//! .unwrap();
//! assert!(xml.contains("<int:getBalance>"));
//!
//! let response = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
//!   <soap:Body>
//!     <ns2:getBalanceResponse xmlns:ns2="http://interfaces.esb.clm.comarch.com/">
//!       <return><balance>120</balance></return>
//!     </ns2:getBalanceResponse>
//!   </soap:Body>
//! </soap:Envelope>"#;
//!
//! let envelope = parse_soap_envelope(response.as_bytes()).unwrap();
//! assert!(envelope.operation_response("getBalance").is_some());
//! ```

mod builder;
mod envelope;
mod fault;
mod parser;
mod pretty;
mod value;

pub use builder::build_soap_request;
pub use envelope::{SoapBody, SoapEnvelope, SoapHeader};
pub use fault::SoapFault;
pub use parser::{SoapError, parse_soap_envelope};
pub use pretty::prettify_xml;
pub use value::{WireMap, element_to_value, value_to_elements};

/// SOAP 1.1 envelope namespace
pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Prefix bound to [`SOAP_ENVELOPE_NS`] in rendered requests
pub const SOAP_ENVELOPE_PREFIX: &str = "soapenv";

/// Prefix bound to the service interface namespace in rendered requests
pub const INTERFACE_PREFIX: &str = "int";

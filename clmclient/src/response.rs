//! Response interpretation
//!
//! Turns a raw HTTP answer into the `return` payload of the operation, or a
//! [`ConnectionFailure`](crate::error::ConnectionFailure). Only structural
//! presence is checked; the payload is handed back untyped.

use crate::error::ServiceError;
use clmsoap::{element_to_value, parse_soap_envelope, prettify_xml};
use serde_json::Value;

/// Name of the result element inside `{operation}Response`
pub const RETURN_ELEMENT: &str = "return";

/// Prefix of the internal detail attached to unusable responses
pub const ERROR_RESPONSE_PREFIX: &str = "Comarch soap error response";

/// Extracts the `return` payload of `operation` from a raw response
///
/// Non-200 statuses are rejected without looking at the body. A body that
/// does not parse, or lacks `{operation}Response/return`, is rejected with
/// the pretty-printed body as internal detail.
///
/// Repeated `return` elements are handed back as an array, in document order.
pub fn interpret(operation: &str, status: u16, body: &str) -> Result<Value, ServiceError> {
    if status != 200 {
        return Err(ServiceError::connection(format!(
            "Response status code: {}; response: {}",
            status, body
        )));
    }

    let result = parse_soap_envelope(body.as_bytes())
        .ok()
        .and_then(|envelope| {
            match envelope.operation_response(operation).map(element_to_value) {
                Some(Value::Object(mut fields)) => fields.remove(RETURN_ELEMENT),
                _ => None,
            }
        });

    result.ok_or_else(|| {
        ServiceError::connection(format!(
            "{}:\n\n{}\n",
            ERROR_RESPONSE_PREFIX,
            pretty_or_raw(body)
        ))
    })
}

/// Returns `faultcode: faultstring` when `body` carries a SOAP fault
pub fn fault_summary(body: &str) -> Option<String> {
    parse_soap_envelope(body.as_bytes())
        .ok()
        .and_then(|envelope| envelope.fault())
        .map(|fault| fault.to_string())
}

/// Pretty-prints `xml`, or returns it unchanged if it is not a document
pub fn pretty_or_raw(xml: &str) -> String {
    prettify_xml(xml).unwrap_or_else(|_| xml.to_string())
}

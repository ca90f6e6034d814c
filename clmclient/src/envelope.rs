//! Request envelope for the loyalty service
//!
//! Every request carries an authentication context next to the operation
//! parameters, both grouped under one key inside the `int:{operation}` body
//! element:
//!
//! ```xml
//! <int:getBalance>
//!   <getBalance>
//!     <context><langCode>en-us</langCode><clientLogin/><clientPass/></context>
//!     <data><cardNo>...</cardNo></data>
//!   </getBalance>
//! </int:getBalance>
//! ```
//!
//! The grouping key is the operation name, except for the operations listed
//! in [`GROUPING_KEY_REMAP`].

use crate::config::ClientConfig;
use crate::error::Result;
use clmsoap::{WireMap, build_soap_request};
use serde_json::{Value, json};

/// Service interface namespace (bound to the `int` prefix)
pub const INTERFACE_NS: &str = "http://interfaces.esb.clm.comarch.com/";

/// Language of the authentication context
pub const LANG_CODE: &str = "en-us";

/// Operations whose parameter group is not named after the operation
pub const GROUPING_KEY_REMAP: &[(&str, &str)] = &[("nonAirReversal", "reversal")];

/// Returns the key the parameters of `operation` are grouped under
pub fn grouping_key(operation: &str) -> &str {
    GROUPING_KEY_REMAP
        .iter()
        .find(|(name, _)| *name == operation)
        .map(|(_, key)| *key)
        .unwrap_or(operation)
}

/// Builds the body element content for `operation`
pub fn build_payload(config: &ClientConfig, operation: &str, data: WireMap) -> WireMap {
    let group = json!({
        "context": {
            "langCode": LANG_CODE,
            "clientLogin": config.username(),
            "clientPass": config.password(),
        },
        "data": Value::Object(data),
    });

    WireMap::from_iter([(grouping_key(operation).to_string(), group)])
}

/// Renders the full request envelope for `operation`
pub fn build_envelope(config: &ClientConfig, operation: &str, data: WireMap) -> Result<String> {
    let payload = build_payload(config, operation, data);
    Ok(build_soap_request(INTERFACE_NS, operation, &payload)?)
}

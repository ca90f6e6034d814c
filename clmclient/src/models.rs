//! Domain model of the loyalty program
//!
//! Caller-owned value objects that know how to render themselves to the
//! provider's field naming convention. Each type carries its own omission
//! policy:
//!
//! - [`Address`] always sends every field, absent ones as explicit nulls
//! - [`PhoneData`] drops absent fields
//! - [`Customer`] drops absent or empty optional scalars
//! - [`CommunicationPreferences`] and [`ExtendedAttribute`] send everything

use crate::error::Result;
use chrono::NaiveDate;
use clmsoap::WireMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Date layout of `dateOfBirth`
pub const BIRTHDATE_FORMAT: &str = "%d%m%Y";

/// Rendering of a domain object into its wire mapping
pub trait WireForm: Serialize {
    /// Returns the provider field name → value mapping of `self`
    fn to_wire_form(&self) -> Result<WireMap> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(<serde_json::Error as serde::ser::Error>::custom(format!(
                "expected a mapping, got {}",
                other
            ))
            .into()),
        }
    }
}

// ============================================================================
// Customer
// ============================================================================

/// A loyalty program member
///
/// Minimal field set required to enroll a new member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    pub login: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(rename = "dateOfBirth", serialize_with = "serialize_birthdate")]
    pub birthdate: NaiveDate,
    pub phones: Vec<PhoneData>,
    #[serde(rename = "address")]
    pub addresses: Vec<Address>,
    #[serde(rename = "commPrefs")]
    pub communication_preferences: CommunicationPreferences,
    #[serde(rename = "extAttributes")]
    pub extended_attributes: Vec<ExtendedAttribute>,
    #[serde(skip_serializing_if = "is_blank")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub gender: Option<String>,
    /// Loyalty card number; left out on enrollment, the provider assigns one
    #[serde(rename = "cardNumber", skip_serializing_if = "is_blank")]
    pub card_number: Option<String>,
}

impl Customer {
    /// Create a customer with no phones, addresses or extended attributes
    pub fn new(
        login: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birthdate: NaiveDate,
        communication_preferences: CommunicationPreferences,
    ) -> Self {
        Self {
            login: login.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            birthdate,
            phones: Vec::new(),
            addresses: Vec::new(),
            communication_preferences,
            extended_attributes: Vec::new(),
            title: None,
            gender: None,
            card_number: None,
        }
    }

    pub fn with_phone(mut self, phone: PhoneData) -> Self {
        self.phones.push(phone);
        self
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.addresses.push(address);
        self
    }

    pub fn with_extended_attribute(mut self, attribute: ExtendedAttribute) -> Self {
        self.extended_attributes.push(attribute);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_card_number(mut self, card_number: impl Into<String>) -> Self {
        self.card_number = Some(card_number.into());
        self
    }
}

impl WireForm for Customer {}

fn serialize_birthdate<S: Serializer>(
    date: &NaiveDate,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format(BIRTHDATE_FORMAT))
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

// ============================================================================
// Address
// ============================================================================

/// A customer's postal address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    /// Whether this is the default address
    #[serde(rename = "defaultAddress")]
    pub default_address: bool,
    /// H - home, B - business
    #[serde(rename = "addressType")]
    pub address_type: String,
    /// Street with house and flat numbers
    #[serde(rename = "addressLine1")]
    pub address_line_1: String,
    #[serde(rename = "addressLine2")]
    pub address_line_2: Option<String>,
    #[serde(rename = "addressLine3")]
    pub address_line_3: Option<String>,
    /// ISO 3166-1 alpha-3 country code
    pub country: String,
    pub state: Option<String>,
    pub city: String,
    #[serde(rename = "zipCode")]
    pub zip_code: String,
    /// Member's email address, used as a login
    pub email: String,
}

impl Address {
    pub fn new(
        default_address: bool,
        address_type: impl Into<String>,
        address_line_1: impl Into<String>,
        country: impl Into<String>,
        city: impl Into<String>,
        zip_code: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            default_address,
            address_type: address_type.into(),
            address_line_1: address_line_1.into(),
            address_line_2: None,
            address_line_3: None,
            country: country.into(),
            state: None,
            city: city.into(),
            zip_code: zip_code.into(),
            email: email.into(),
        }
    }

    pub fn with_address_line_2(mut self, line: impl Into<String>) -> Self {
        self.address_line_2 = Some(line.into());
        self
    }

    pub fn with_address_line_3(mut self, line: impl Into<String>) -> Self {
        self.address_line_3 = Some(line.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }
}

impl WireForm for Address {}

// ============================================================================
// Phone
// ============================================================================

/// A customer's phone numbers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhoneData {
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    /// H - home, B - business, M - mobile
    #[serde(rename = "phoneType", skip_serializing_if = "Option::is_none")]
    pub phone_type: Option<String>,
    #[serde(rename = "altPhoneNumber", skip_serializing_if = "Option::is_none")]
    pub alt_phone_number: Option<String>,
    #[serde(rename = "altPhoneType", skip_serializing_if = "Option::is_none")]
    pub alt_phone_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
}

impl PhoneData {
    pub fn new(phone_number: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            phone_type: None,
            alt_phone_number: None,
            alt_phone_type: None,
            fax: None,
        }
    }

    pub fn with_phone_type(mut self, phone_type: impl Into<String>) -> Self {
        self.phone_type = Some(phone_type.into());
        self
    }

    pub fn with_alt_phone(
        mut self,
        number: impl Into<String>,
        phone_type: Option<String>,
    ) -> Self {
        self.alt_phone_number = Some(number.into());
        self.alt_phone_type = phone_type;
        self
    }

    pub fn with_fax(mut self, fax: impl Into<String>) -> Self {
        self.fax = Some(fax.into());
        self
    }
}

impl WireForm for PhoneData {}

// ============================================================================
// Communication preferences
// ============================================================================

/// Customer communication preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommunicationPreferences {
    /// Preferred contact language
    #[serde(rename = "preferredLanguage")]
    pub language: String,
    /// Statement channel: S - SMS, E - email
    #[serde(rename = "statementPreference")]
    pub statement: String,
    /// Whether contact through the call center is permitted
    #[serde(rename = "commPermissionCc")]
    pub permission_call_center: bool,
    /// Whether contact by email is permitted
    #[serde(rename = "commPermissionEmail")]
    pub permission_email: bool,
}

impl CommunicationPreferences {
    pub fn new(
        language: impl Into<String>,
        statement: impl Into<String>,
        permission_call_center: bool,
        permission_email: bool,
    ) -> Self {
        Self {
            language: language.into(),
            statement: statement.into(),
            permission_call_center,
            permission_email,
        }
    }
}

impl WireForm for CommunicationPreferences {}

// ============================================================================
// Extended attributes
// ============================================================================

/// Project-specific customer attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtendedAttribute {
    pub code: String,
    pub value: Option<String>,
}

impl ExtendedAttribute {
    pub fn new(code: impl Into<String>, value: Option<String>) -> Self {
        Self {
            code: code.into(),
            value,
        }
    }
}

impl WireForm for ExtendedAttribute {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn prefs() -> CommunicationPreferences {
        CommunicationPreferences::new("en", "E", true, false)
    }

    fn address() -> Address {
        Address::new(true, "H", "1 Main St", "RUS", "Moscow", "101000", "jo@example.com")
    }

    fn customer() -> Customer {
        Customer::new(
            "jo@example.com",
            "Jo",
            "Doe",
            NaiveDate::from_ymd_opt(1990, 3, 7).unwrap(),
            prefs(),
        )
    }

    #[test]
    fn test_address_emits_all_fields() {
        let wire = address().to_wire_form().unwrap();

        assert_eq!(wire.len(), 10);
        assert_eq!(wire["defaultAddress"], json!(true));
        assert_eq!(wire["addressLine1"], json!("1 Main St"));
        assert_eq!(wire["addressLine2"], Value::Null);
        assert_eq!(wire["addressLine3"], Value::Null);
        assert_eq!(wire["state"], Value::Null);
        assert_eq!(wire["zipCode"], json!("101000"));
    }

    #[test]
    fn test_address_key_count_is_constant() {
        let full = address()
            .with_address_line_2("Apt 4")
            .with_address_line_3("Floor 2")
            .with_state("MOW")
            .to_wire_form()
            .unwrap();
        let bare = address().to_wire_form().unwrap();

        assert_eq!(full.len(), bare.len());
        assert_eq!(full["addressLine2"], json!("Apt 4"));
        assert_eq!(full["state"], json!("MOW"));
    }

    #[test]
    fn test_phone_drops_absent_fields() {
        let wire = PhoneData::new("+70000000000").to_wire_form().unwrap();
        assert_eq!(wire.len(), 1);
        assert_eq!(wire["phoneNumber"], json!("+70000000000"));

        let wire = PhoneData::new("+70000000000")
            .with_phone_type("M")
            .with_alt_phone("+71111111111", None)
            .to_wire_form()
            .unwrap();
        assert_eq!(wire.len(), 3);
        assert!(!wire.contains_key("altPhoneType"));
        assert!(!wire.contains_key("fax"));
        assert!(wire.values().all(|v| !v.is_null()));
    }

    #[test]
    fn test_phone_full() {
        let wire = PhoneData::new("1")
            .with_phone_type("H")
            .with_alt_phone("2", Some("B".to_string()))
            .with_fax("3")
            .to_wire_form()
            .unwrap();
        assert_eq!(wire.len(), 5);
        assert_eq!(wire["altPhoneType"], json!("B"));
    }

    #[test]
    fn test_communication_preferences() {
        let wire = prefs().to_wire_form().unwrap();
        assert_eq!(
            Value::Object(wire),
            json!({
                "preferredLanguage": "en",
                "statementPreference": "E",
                "commPermissionCc": true,
                "commPermissionEmail": false
            })
        );
    }

    #[test]
    fn test_extended_attribute_keeps_null_value() {
        let wire = ExtendedAttribute::new("MEAL", None).to_wire_form().unwrap();
        assert_eq!(Value::Object(wire), json!({"code": "MEAL", "value": null}));
    }

    #[test]
    fn test_customer_wire_form() {
        let wire = customer()
            .with_phone(PhoneData::new("+70000000000"))
            .with_address(address())
            .with_extended_attribute(ExtendedAttribute::new("A", Some("1".to_string())))
            .with_extended_attribute(ExtendedAttribute::new("B", None))
            .to_wire_form()
            .unwrap();

        assert_eq!(wire["login"], json!("jo@example.com"));
        // names are sent as given
        assert_eq!(wire["firstName"], json!("Jo"));
        assert_eq!(wire["lastName"], json!("Doe"));
        assert_eq!(wire["dateOfBirth"], json!("07031990"));
        assert_eq!(wire["phones"], json!([{"phoneNumber": "+70000000000"}]));
        assert_eq!(wire["address"].as_array().unwrap().len(), 1);
        assert_eq!(wire["commPrefs"]["preferredLanguage"], json!("en"));
        assert_eq!(
            wire["extAttributes"],
            json!([{"code": "A", "value": "1"}, {"code": "B", "value": null}])
        );
        assert!(!wire.contains_key("title"));
        assert!(!wire.contains_key("gender"));
        assert!(!wire.contains_key("cardNumber"));
    }

    #[test]
    fn test_customer_lists_always_present() {
        let wire = customer().to_wire_form().unwrap();
        assert_eq!(wire["phones"], json!([]));
        assert_eq!(wire["address"], json!([]));
        assert_eq!(wire["extAttributes"], json!([]));
    }

    #[test]
    fn test_customer_optional_scalars() {
        let wire = customer()
            .with_title("MR")
            .with_gender("M")
            .with_card_number("100200300")
            .to_wire_form()
            .unwrap();
        assert_eq!(wire["title"], json!("MR"));
        assert_eq!(wire["gender"], json!("M"));
        assert_eq!(wire["cardNumber"], json!("100200300"));

        let wire = customer().with_card_number("").to_wire_form().unwrap();
        assert!(!wire.contains_key("cardNumber"));
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let c = customer().with_address(address()).with_title("MS");
        assert_eq!(c.to_wire_form().unwrap(), c.to_wire_form().unwrap());
    }
}

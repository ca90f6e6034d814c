//! Parameters of the point accrual and reversal operations
//!
//! Both requests are validated locally before anything is sent; a violation
//! yields [`Error::InvalidArgument`](crate::error::Error::InvalidArgument).

use crate::error::{Error, Result};
use chrono::NaiveDateTime;
use clmsoap::WireMap;
use serde_json::{Value, json};

/// Date layout of `trnDate`
pub const TRN_DATE_FORMAT: &str = "%Y%m%d";

/// Time layout of `trnTime`
pub const TRN_TIME_FORMAT: &str = "%H%M";

/// One or several benefit codes, sent comma-separated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BenefitCodes(Vec<String>);

impl BenefitCodes {
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|c| c.is_empty())
    }

    /// Comma-joined wire value
    pub fn joined(&self) -> String {
        self.0
            .iter()
            .filter(|c| !c.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl From<&str> for BenefitCodes {
    fn from(code: &str) -> Self {
        Self(vec![code.to_string()])
    }
}

impl From<String> for BenefitCodes {
    fn from(code: String) -> Self {
        Self(vec![code])
    }
}

impl From<Vec<String>> for BenefitCodes {
    fn from(codes: Vec<String>) -> Self {
        Self(codes)
    }
}

impl From<&[&str]> for BenefitCodes {
    fn from(codes: &[&str]) -> Self {
        Self(codes.iter().map(|c| c.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for BenefitCodes {
    fn from(codes: [&str; N]) -> Self {
        Self(codes.iter().map(|c| c.to_string()).collect())
    }
}

fn insert_opt(map: &mut WireMap, key: &str, value: Option<&str>) {
    if let Some(v) = value.filter(|v| !v.is_empty()) {
        map.insert(key.to_string(), json!(v));
    }
}

fn ensure_positive(value: f64) -> Result<()> {
    // NaN fails the comparison too; infinities would serialize as null
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_argument(format!(
            "value must be positive, got {}",
            value
        )))
    }
}

// ============================================================================
// Accrual
// ============================================================================

/// Points accrual for a non-airline transaction
#[derive(Debug, Clone, PartialEq)]
pub struct Accrual {
    pub card_number: String,
    pub partner_code: String,
    pub transaction_type: String,
    /// Transaction id on the partner side, used to detect duplicates
    pub partner_transaction_id: String,
    pub transaction_datetime: NaiveDateTime,
    /// Amount the points are computed from, must be positive
    pub value: f64,
    pub first_name: String,
    pub last_name: String,
    pub benefit_codes: BenefitCodes,
    pub description: Option<String>,
}

impl Accrual {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        card_number: impl Into<String>,
        partner_code: impl Into<String>,
        transaction_type: impl Into<String>,
        partner_transaction_id: impl Into<String>,
        transaction_datetime: NaiveDateTime,
        value: f64,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            card_number: card_number.into(),
            partner_code: partner_code.into(),
            transaction_type: transaction_type.into(),
            partner_transaction_id: partner_transaction_id.into(),
            transaction_datetime,
            value,
            first_name: first_name.into(),
            last_name: last_name.into(),
            benefit_codes: BenefitCodes::default(),
            description: None,
        }
    }

    pub fn with_benefit_codes(mut self, codes: impl Into<BenefitCodes>) -> Self {
        self.benefit_codes = codes.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive(self.value)
    }

    /// Validates and returns the `data` mapping
    pub fn to_params(&self) -> Result<WireMap> {
        self.validate()?;

        let mut params = WireMap::new();
        params.insert("cardNo".into(), json!(self.card_number));
        params.insert("partnerCode".into(), json!(self.partner_code));
        params.insert("trnType".into(), json!(self.transaction_type));
        params.insert("partnerTrnId".into(), json!(self.partner_transaction_id));
        params.insert(
            "trnDate".into(),
            json!(self.transaction_datetime.format(TRN_DATE_FORMAT).to_string()),
        );
        params.insert(
            "trnTime".into(),
            json!(self.transaction_datetime.format(TRN_TIME_FORMAT).to_string()),
        );
        params.insert("value".into(), json!(self.value));
        params.insert("firstName".into(), json!(self.first_name.to_uppercase()));
        params.insert("lastName".into(), json!(self.last_name.to_uppercase()));
        if !self.benefit_codes.is_empty() {
            params.insert("benefitCodes".into(), json!(self.benefit_codes.joined()));
        }
        insert_opt(&mut params, "description", self.description.as_deref());

        Ok(params)
    }
}

// ============================================================================
// Reversal
// ============================================================================

/// Full or partial reversal of a previous accrual
///
/// The reversed transaction is identified by its internal id, its partner id,
/// or both. Without `value` the whole accrual is reversed.
#[derive(Debug, Clone, PartialEq)]
pub struct AccrualReversal {
    pub card_number: String,
    pub partner_code: String,
    pub transaction_type: String,
    pub transaction_id: Option<String>,
    pub partner_transaction_id: Option<String>,
    pub value: Option<f64>,
    pub description: Option<String>,
}

impl AccrualReversal {
    pub fn new(
        card_number: impl Into<String>,
        partner_code: impl Into<String>,
        transaction_type: impl Into<String>,
    ) -> Self {
        Self {
            card_number: card_number.into(),
            partner_code: partner_code.into(),
            transaction_type: transaction_type.into(),
            transaction_id: None,
            partner_transaction_id: None,
            value: None,
            description: None,
        }
    }

    pub fn with_transaction_id(mut self, id: impl Into<String>) -> Self {
        self.transaction_id = Some(id.into());
        self
    }

    pub fn with_partner_transaction_id(mut self, id: impl Into<String>) -> Self {
        self.partner_transaction_id = Some(id.into());
        self
    }

    /// Makes this a partial reversal of `value`
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_full(&self) -> bool {
        self.value.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        let has_id = |id: &Option<String>| id.as_deref().is_some_and(|v| !v.is_empty());
        if !has_id(&self.transaction_id) && !has_id(&self.partner_transaction_id) {
            return Err(Error::invalid_argument(
                "transaction id or partner transaction id is required",
            ));
        }
        if let Some(value) = self.value {
            ensure_positive(value)?;
        }
        Ok(())
    }

    /// Validates and returns the `data` mapping
    pub fn to_params(&self) -> Result<WireMap> {
        self.validate()?;

        let mut transaction = WireMap::new();
        transaction.insert("trnType".into(), json!(self.transaction_type));
        insert_opt(&mut transaction, "trnId", self.transaction_id.as_deref());
        insert_opt(
            &mut transaction,
            "partnerTrnId",
            self.partner_transaction_id.as_deref(),
        );

        let mut params = WireMap::new();
        params.insert("cardNo".into(), json!(self.card_number));
        params.insert("partnerCode".into(), json!(self.partner_code));
        params.insert("transaction".into(), Value::Object(transaction));
        if let Some(value) = self.value {
            params.insert("value".into(), json!(value));
        }
        insert_opt(&mut params, "description", self.description.as_deref());

        Ok(params)
    }
}

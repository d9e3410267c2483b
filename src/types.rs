//! Domain types shared across the checkout session and response flows.

use std::collections::HashMap;

use masking::Secret;

/// Amount in major denomination kept as a float, as handed over by the
/// host platform quote.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct FloatMajorUnit(f64);

impl FloatMajorUnit {
    /// forms a new major unit from amount
    pub fn new(value: f64) -> Self {
        Self(value)
    }
}

/// Amount formatted as a major-unit string, the denomination the gateway
/// accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct StringMajorUnit(String);

impl StringMajorUnit {
    /// forms a new major unit from amount
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// gets amount as string value
    pub fn get_amount_as_string(&self) -> &str {
        &self.0
    }
}

/// Converts amounts into the denomination the gateway accepts.
pub trait AmountConvertor: Send {
    type Output;
    fn convert(&self, amount: FloatMajorUnit) -> Self::Output;
}

/// Exactly two decimal digits with a dot separator, independent of locale.
pub struct StringMajorUnitForGateway;

impl AmountConvertor for StringMajorUnitForGateway {
    type Output = StringMajorUnit;
    fn convert(&self, amount: FloatMajorUnit) -> StringMajorUnit {
        StringMajorUnit(format!("{:.2}", amount.0))
    }
}

/// Snapshot of the active quote, passed in by the checkout controller
/// instead of being read from ambient session state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutQuote {
    pub grand_total: FloatMajorUnit,
    /// ISO currency code of the store the quote was created in.
    pub currency_code: String,
    pub is_multishipping: bool,
}

/// Authenticated customer attached to the checkout, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerContext {
    /// Host platform customer id, rendered as a string.
    pub customer_id: String,
}

/// Gateway-side customer handle returned by provisioning.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct GatewayCustomer {
    pub customer_id: String,
}

/// Payment record attached to an order. The typed card fields mirror the
/// host platform's structured payment columns; everything else lands in
/// the open-ended additional-information map.
#[derive(Debug, Clone, Default)]
pub struct PaymentRecord {
    pub last_trans_id: Option<String>,
    pub transaction_id: Option<String>,
    pub cc_type: Option<String>,
    pub cc_last4: Option<Secret<String>>,
    pub cc_exp_month: Option<Secret<String>>,
    pub cc_exp_year: Option<Secret<String>>,
    /// `None` until a response has been handled; `Some(false)` afterwards,
    /// settlement is decided by later gateway callbacks.
    pub is_transaction_closed: Option<bool>,
    pub should_close_parent_transaction: Option<bool>,
    pub(crate) additional_information: HashMap<String, String>,
}

impl PaymentRecord {
    pub fn set_additional_information(&mut self, key: &str, value: impl Into<String>) {
        self.additional_information.insert(key.to_string(), value.into());
    }

    pub fn get_additional_information(&self, key: &str) -> Option<&str> {
        self.additional_information.get(key).map(String::as_str)
    }

    pub fn additional_information(&self) -> &HashMap<String, String> {
        &self.additional_information
    }
}

/// Order as loaded from the host platform by increment id.
#[derive(Debug, Clone, Default)]
pub struct Order {
    pub increment_id: String,
    /// Set after a successful response so the host sends a fresh order
    /// confirmation.
    pub can_send_new_email_flag: bool,
    pub payment: PaymentRecord,
}

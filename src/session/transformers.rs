//! Request types for the hosted payment session endpoint.
//!
//! Field names are part of the gateway wire contract and must not change.

use std::collections::HashMap;

use base64::Engine;
use error_stack::ResultExt;
use serde::Serialize;

use crate::configs::ChallengePreference;
use crate::errors::{CustomResult, SessionError};
use crate::types::StringMajorUnit;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcquiredSessionRequest {
    pub transaction: AcquiredTransaction,
    pub tds: AcquiredTds,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<AcquiredCustomer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<AcquiredPayment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcquiredTransaction {
    pub order_id: String,
    pub amount: StringMajorUnit,
    /// Lowercase ISO code.
    pub currency: String,
    pub capture: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcquiredTds {
    pub is_active: bool,
    pub challenge_preference: ChallengePreference,
    pub contact_url: String,
    pub redirect_url: String,
    pub webhook_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcquiredCustomer {
    pub customer_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcquiredPayment {
    pub create_card: bool,
    /// Host customer id the stored card is filed under.
    pub reference: String,
}

/// Rewrites `http://` to `https://` by substring replacement. Values that
/// already contain `https://` pass through, and values carrying neither
/// scheme token are returned unchanged rather than prefixed, keeping the
/// output bit-identical for configs that omit a scheme.
pub(crate) fn force_https(url: &str) -> String {
    if url.contains("https://") {
        url.to_string()
    } else {
        url.replace("http://", "https://")
    }
}

/// Serializes custom data and base64-encodes it into the `custom_data`
/// transaction field.
pub(crate) fn encode_custom_data(
    custom_data: &HashMap<String, String>,
) -> CustomResult<String, SessionError> {
    let serialized =
        serde_json::to_string(custom_data).change_context(SessionError::BuildFailed)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(serialized))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn force_https_leaves_https_urls_unchanged() {
        assert_eq!(
            force_https("https://store.example/acquired/webhook"),
            "https://store.example/acquired/webhook"
        );
    }

    #[test]
    fn force_https_rewrites_plain_http() {
        assert_eq!(
            force_https("http://store.example/acquired/webhook"),
            "https://store.example/acquired/webhook"
        );
    }

    #[test]
    fn force_https_leaves_scheme_less_values_unchanged() {
        assert_eq!(force_https("store.example/acquired/webhook"), "store.example/acquired/webhook");
    }

    #[test]
    fn force_https_is_idempotent() {
        let once = force_https("http://store.example/path");
        assert_eq!(force_https(&once), once);
    }

    #[test]
    fn custom_data_round_trips_through_base64() {
        let mut data = HashMap::new();
        data.insert("invoice".to_string(), "INV-42".to_string());
        data.insert("channel".to_string(), "web".to_string());

        let encoded = encode_custom_data(&data).unwrap();
        let decoded = base64::engine::general_purpose::STANDARD.decode(encoded).unwrap();
        let parsed: HashMap<String, String> = serde_json::from_slice(&decoded).unwrap();
        assert_eq!(parsed, data);
    }

    #[test]
    fn optional_blocks_are_omitted_from_the_wire_payload() {
        let request = AcquiredSessionRequest {
            transaction: AcquiredTransaction {
                order_id: "100000001".to_string(),
                amount: StringMajorUnit::new("12.00".to_string()),
                currency: "gbp".to_string(),
                capture: true,
                custom1: None,
                custom2: None,
                custom_data: None,
            },
            tds: AcquiredTds {
                is_active: true,
                challenge_preference: ChallengePreference::NoPreference,
                contact_url: "https://store.example/contact".to_string(),
                redirect_url: "https://store.example/acquired/threedsecure/response".to_string(),
                webhook_url: "https://store.example/acquired/webhook".to_string(),
            },
            customer: None,
            payment: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "transaction": {
                    "order_id": "100000001",
                    "amount": "12.00",
                    "currency": "gbp",
                    "capture": true
                },
                "tds": {
                    "is_active": true,
                    "challenge_preference": "no_preference",
                    "contact_url": "https://store.example/contact",
                    "redirect_url": "https://store.example/acquired/threedsecure/response",
                    "webhook_url": "https://store.example/acquired/webhook"
                }
            })
        );
    }
}

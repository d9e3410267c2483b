//! Applies the gateway transaction response onto the order payment.
//!
//! Field names on the response types are part of the gateway wire
//! contract and must not change.

use error_stack::ResultExt;
use masking::{PeekInterface, Secret};
use serde::{Deserialize, Serialize};

use crate::errors::{CustomResult, HandlerError};
use crate::types::{Order, PaymentRecord};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AcquiredTransactionResponse {
    pub transaction_id: String,
    pub payment_method: String,
    /// Merchant id the transaction settled under.
    pub mid: String,
    pub authorization_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<AcquiredCardDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check: Option<AcquiredCheckDetails>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AcquiredCardDetails {
    pub scheme: String,
    /// Last four digits only; the gateway never returns the full PAN.
    pub number: Secret<String>,
    pub expiry_month: Secret<String>,
    pub expiry_year: Secret<String>,
    pub holder_name: Secret<String>,
}

/// AVS and CVV verification results.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AcquiredCheckDetails {
    pub avs_line1: String,
    pub avs_postcode: String,
    pub cvv: String,
}

/// Writes the transaction outcome onto the order payment record. The
/// transaction is left open and the parent transaction is not auto-closed;
/// settlement is decided by later gateway callbacks. Atomicity of the
/// writes is owned by the host persistence layer.
pub struct PaymentDetailsHandler;

impl PaymentDetailsHandler {
    /// Parses the raw gateway response and applies it. Failures are logged
    /// and surfaced as a single [`HandlerError`]; partial writes are not
    /// rolled back here.
    pub fn handle(&self, order: &mut Order, response: &[u8]) -> CustomResult<(), HandlerError> {
        let transaction: AcquiredTransactionResponse = serde_json::from_slice(response)
            .change_context(HandlerError::ApplyFailed)
            .map_err(|error| {
                tracing::error!(?error, "Payment Details Handler failed");
                error
            })?;
        self.apply_transaction(order, &transaction);
        Ok(())
    }

    /// Applies an already-parsed transaction outcome.
    pub fn apply_transaction(&self, order: &mut Order, transaction: &AcquiredTransactionResponse) {
        Self::set_transaction_data(&mut order.payment, transaction);
        Self::set_additional_transaction_data(&mut order.payment, transaction);

        order.can_send_new_email_flag = true;
        order.payment.is_transaction_closed = Some(false);
        order.payment.should_close_parent_transaction = Some(false);
    }

    fn set_transaction_data(payment: &mut PaymentRecord, transaction: &AcquiredTransactionResponse) {
        payment.last_trans_id = Some(transaction.transaction_id.clone());
        payment.transaction_id = Some(transaction.transaction_id.clone());
        if let Some(card) = &transaction.card {
            payment.cc_type = Some(card.scheme.clone());
            payment.cc_last4 = Some(card.number.clone());
            payment.cc_exp_month = Some(card.expiry_month.clone());
            payment.cc_exp_year = Some(card.expiry_year.clone());
        }
    }

    fn set_additional_transaction_data(
        payment: &mut PaymentRecord,
        transaction: &AcquiredTransactionResponse,
    ) {
        payment.set_additional_information("payment_method", &transaction.payment_method);
        payment.set_additional_information("mid", &transaction.mid);
        payment.set_additional_information("transaction_id", &transaction.transaction_id);
        payment.set_additional_information("authorization_code", &transaction.authorization_code);

        if let Some(card) = &transaction.card {
            payment.set_additional_information("cc_type", &card.scheme);
            payment.set_additional_information("holder_name", card.holder_name.peek());
            payment.set_additional_information("cc_last4", card.number.peek());
            payment.set_additional_information(
                "cc_exp",
                format!("{}/{}", card.expiry_month.peek(), card.expiry_year.peek()),
            );
        }

        if let Some(check) = &transaction.check {
            payment.set_additional_information("avs_line1", &check.avs_line1);
            payment.set_additional_information("avs_postcode", &check.avs_postcode);
            payment.set_additional_information("cvv", &check.cvv);
        }
    }
}

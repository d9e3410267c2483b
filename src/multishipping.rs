//! Multishipping checkouts authorize once against a synthetic aggregate
//! order id and fan the authorization out to the reserved sub-orders
//! after the gateway confirms.

use error_stack::report;

use crate::consts;
use crate::errors::{CustomResult, HostError};
use crate::interfaces::OrderIdSequence;
use crate::session::transformers::AcquiredTransaction;
use crate::types::CheckoutQuote;

/// Order ids reserved for the shipment groups of one cart, in the order
/// the sequence service returned them.
#[derive(Debug, Clone, PartialEq)]
pub struct MultishippingReservation {
    order_ids: Vec<String>,
}

impl MultishippingReservation {
    /// Reserves one order id per shipment group. A reservation always
    /// holds at least one id.
    pub fn reserve(
        sequence: &dyn OrderIdSequence,
        quote: &CheckoutQuote,
    ) -> CustomResult<Self, HostError> {
        let order_ids = sequence.reserve_order_ids(quote)?;
        if order_ids.is_empty() {
            return Err(report!(HostError::OrderIdReservationFailed)
                .attach_printable("sequence service returned no order ids"));
        }
        Ok(Self { order_ids })
    }

    pub fn order_ids(&self) -> &[String] {
        &self.order_ids
    }

    /// Synthetic order id the gateway authorizes against; the host later
    /// reconciles it back to the real orders listed in `custom2`.
    pub fn aggregate_order_id(&self) -> String {
        format!("{}{}", self.order_ids[0], consts::MULTISHIPPING_ORDER_SUFFIX)
    }

    pub fn joined_order_ids(&self) -> String {
        self.order_ids.join(",")
    }

    /// Rewrites the transaction for the aggregate authorization: capture
    /// off, marker in `custom1`, the reserved ids in `custom2` and the
    /// synthetic id in `order_id`.
    pub fn apply(&self, transaction: &mut AcquiredTransaction) {
        transaction.capture = false;
        transaction.custom1 = Some(consts::MULTISHIPPING_MARKER.to_string());
        transaction.custom2 = Some(self.joined_order_ids());
        transaction.order_id = self.aggregate_order_id();
    }
}

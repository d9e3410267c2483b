//! Seams onto the host platform and the gateway SDK.
//!
//! The composing application wires concrete implementations in through
//! the service constructors; nothing here performs I/O itself.

use crate::errors::{CustomResult, HostError, OrderError};
use crate::types::{CheckoutQuote, GatewayCustomer, Order};

/// Provisions (or fetches) the gateway-side customer for the active
/// authenticated session.
pub trait CustomerProvisioner {
    fn execute(&self) -> CustomResult<GatewayCustomer, HostError>;
}

/// Reserves order increment ids for a multishipping checkout, one per
/// shipment group, in a stable order. Atomicity across concurrent
/// reservations for the same cart is owned by the host sequence service.
pub trait OrderIdSequence {
    fn reserve_order_ids(&self, quote: &CheckoutQuote) -> CustomResult<Vec<String>, HostError>;
}

/// Loads orders by their public increment id.
pub trait OrderRepository {
    fn load_by_increment_id(&self, increment_id: &str) -> CustomResult<Order, OrderError>;
}

/// Host symmetric encryption facility.
pub trait Encryptor {
    fn encrypt(&self, plaintext: &str) -> CustomResult<String, HostError>;
}

/// Builds absolute store URLs for the given route name.
pub trait RouteUrlBuilder {
    fn get_url(&self, route: &str) -> String;
}

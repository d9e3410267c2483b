//! Error types surfaced by the integration.
//!
//! Each operation keeps its own failure domain; underlying causes travel
//! in the [`error_stack::Report`] attached to the context.

/// Type alias for `Result<T, error_stack::Report<E>>`.
pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// Failure while assembling the hosted session payload.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("Get Payment Session data failed")]
    BuildFailed,
    #[error("Get Payment Session data failed: {0}")]
    BuildFailedWithReason(String),
}

/// Failure while resolving an order on the host platform.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderError {
    #[error("Order not found for increment id {0}")]
    NotFound(String),
}

/// Failure while applying a gateway transaction response onto a payment.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HandlerError {
    #[error("Payment Details Handler failed")]
    ApplyFailed,
}

/// Failures raised by host platform collaborators behind the seams in
/// [`crate::interfaces`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HostError {
    #[error("customer provisioning with the gateway failed")]
    CustomerProvisioningFailed,
    #[error("order id reservation failed")]
    OrderIdReservationFailed,
    #[error("encryption failed")]
    EncryptionFailed,
}

//! Constants shared by the session and response flows.

/// Key under which the per-order nonce salt is stored in the payment
/// additional-information map.
pub const NONCE_SALT_KEY: &str = "acquired_nonce_salt";

/// Length of a freshly generated nonce salt.
pub const NONCE_SALT_LENGTH: usize = 32;

/// Delimiter joining the nonce segments before encryption.
pub const NONCE_DELIMITER: &str = "::";

/// Marker written into `custom1` for multishipping aggregate transactions.
pub const MULTISHIPPING_MARKER: &str = "multishipping order";

/// Suffix appended to the first reserved order id to form the synthetic
/// aggregate order id the gateway authorizes against.
pub const MULTISHIPPING_ORDER_SUFFIX: &str = "-ACQM";

/// Store route the gateway redirects the browser to after 3-D-Secure.
pub const THREEDSECURE_RESPONSE_ROUTE: &str = "acquired/threedsecure/response";

/// Store route receiving gateway webhook callbacks.
pub const WEBHOOK_ROUTE: &str = "acquired/webhook";

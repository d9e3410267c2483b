//! One-time nonce binding an order, its last transaction id and a stored
//! per-order salt.
//!
//! The nonce is rendered straight into the hosted response page, so this
//! module never propagates an error to its caller: every failure path
//! degrades to a visible diagnostic message instead of breaking the page.

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::consts;
use crate::interfaces::{Encryptor, OrderRepository};

/// Diagnostic rendered when the payment carries no stored salt.
const MISSING_SALT_DIAGNOSTIC: &str = "Missing nonce salt";

/// Outcome of a nonce derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NonceOutcome {
    /// Ciphertext proving the authenticity of the return redirect.
    Token(String),
    /// Human-readable message rendered in place of a token.
    Diagnostic(String),
}

impl NonceOutcome {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Token(value) | Self::Diagnostic(value) => value,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Self::Token(value) | Self::Diagnostic(value) => value,
        }
    }

    pub fn is_token(&self) -> bool {
        matches!(self, Self::Token(_))
    }
}

/// Derives the encrypted nonce for the hosted response page.
pub struct NonceCorrelator<'a> {
    orders: &'a dyn OrderRepository,
    encryptor: &'a dyn Encryptor,
}

impl<'a> NonceCorrelator<'a> {
    pub fn new(orders: &'a dyn OrderRepository, encryptor: &'a dyn Encryptor) -> Self {
        Self { orders, encryptor }
    }

    /// Encrypts `(order increment id, last transaction id, salt)` joined
    /// with a fixed delimiter. Lookup, salt and encryption failures all
    /// come back as [`NonceOutcome::Diagnostic`].
    pub fn encrypted_nonce(&self, order_increment_id: &str) -> NonceOutcome {
        let order = match self.orders.load_by_increment_id(order_increment_id) {
            Ok(order) => order,
            Err(error) => return NonceOutcome::Diagnostic(error.current_context().to_string()),
        };

        let payment = &order.payment;
        let Some(salt) = payment.get_additional_information(consts::NONCE_SALT_KEY) else {
            return NonceOutcome::Diagnostic(MISSING_SALT_DIAGNOSTIC.to_string());
        };

        let plaintext = [
            order_increment_id,
            payment.last_trans_id.as_deref().unwrap_or_default(),
            salt,
        ]
        .join(consts::NONCE_DELIMITER);

        match self.encryptor.encrypt(&plaintext) {
            Ok(ciphertext) => NonceOutcome::Token(ciphertext),
            Err(error) => NonceOutcome::Diagnostic(error.current_context().to_string()),
        }
    }
}

/// Generates the random per-order salt the checkout stores under
/// [`consts::NONCE_SALT_KEY`] before redirecting to the gateway.
pub fn generate_nonce_salt() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(consts::NONCE_SALT_LENGTH)
        .map(char::from)
        .collect()
}

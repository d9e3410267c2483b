//! Acquired.com hosted checkout integration.
//!
//! Bridges a host e-commerce checkout to the Acquired.com hosted-session
//! API: builds the session-creation payload, reserves order ids for
//! multishipping checkouts, derives the encrypted nonce that authenticates
//! the browser redirect back to the store and applies the gateway
//! transaction response onto the order payment record.
//!
//! The host platform's persistence, routing and transport stay outside
//! this crate; they are reached through the seams in [`interfaces`].

pub mod configs;
pub mod consts;
pub mod errors;
pub mod interfaces;
pub mod multishipping;
pub mod nonce;
pub mod response;
pub mod session;
pub mod types;

pub use configs::{ChallengePreference, GatewayConfig, TdsConfig};
pub use nonce::{NonceCorrelator, NonceOutcome};
pub use response::PaymentDetailsHandler;
pub use session::PaymentSessionBuilder;

//! # Checkout Proxy Library
//!
//! Backend of a PayPal checkout flow: every browser call is forwarded to
//! the PayPal REST API with a freshly acquired client-credentials token and
//! the provider's JSON is relayed back.
//!
//! Modules:
//! - `config`: settings file, credentials and the assembled service config
//! - `provider`: token provider and order facade
//! - `receipts`: receipt side effect of completed orders
//! - `server`: axum routes, checkout page and static assets

pub mod config;
pub mod helpers;
pub mod observability;
pub mod provider;
pub mod receipts;
pub mod server;
#[cfg(test)]
mod tests;
pub mod utils;


pub use crate::config::service::ServiceConfig;
pub use crate::provider::{CheckoutError, Intent, OrderFacade, TokenProvider};

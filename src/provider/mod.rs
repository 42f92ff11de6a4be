//! PayPal REST API: client-credentials tokens and the order lifecycle.

pub mod call;
pub mod error;
pub mod intent;
pub mod orders;
pub mod token;

pub use error::CheckoutError;
pub use intent::Intent;
pub use orders::OrderFacade;
pub use token::{AccessToken, TokenProvider};

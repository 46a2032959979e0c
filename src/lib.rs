//! # snailpay - SnailPay API client
//!
//! An async Rust client for the SnailPay payment service: verify payment
//! codes, create payment and subscription links, list payments,
//! subscriptions and payouts, request payouts and refund payments.
//!
//! ```no_run
//! use snailpay::{PaymentLinkParams, SnailClient};
//!
//! # async fn run() -> snailpay::Result<()> {
//! let client = SnailClient::new("sk_live_...")?;
//!
//! let payment = client.verify_payment("ABCDEFGHIJ").await?;
//! println!("{} paid {}", payment.email, payment.amount);
//!
//! let link = client
//!     .create_payment_link(&PaymentLinkParams::new("Shell", "https://img/shell.png", 4.5))
//!     .await?;
//! println!("{}", link.url);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod credential;
pub mod dispatch;
pub mod endpoints;
pub mod error;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use client::SnailClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use credential::ApiKey;
pub use error::{Result, SnailError};
pub use transport::{HttpTransport, Transport, TransportError};
pub use types::*;

/// Current version of the snailpay library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

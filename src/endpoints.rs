//! SnailPay endpoint catalog

use http::Method;

/// An API endpoint: HTTP method plus a path relative to the base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub path: &'static str,
}

impl Endpoint {
    const fn new(method: Method, path: &'static str) -> Self {
        Self { method, path }
    }
}

pub const VERIFY_PAYMENT: Endpoint = Endpoint::new(Method::GET, "verify-payment");
pub const PAYMENT_LINK: Endpoint = Endpoint::new(Method::POST, "payment-link");
pub const SUBSCRIPTION_LINK: Endpoint = Endpoint::new(Method::POST, "subscription-link");
pub const PAYMENT_LIST: Endpoint = Endpoint::new(Method::GET, "payment-list");
pub const SUBSCRIPTION_LIST: Endpoint = Endpoint::new(Method::GET, "subscription-list");
pub const PAYMENT_LINK_LIST: Endpoint = Endpoint::new(Method::GET, "payment-link-list");
pub const SUBSCRIPTION_LINK_LIST: Endpoint = Endpoint::new(Method::GET, "subscription-link-list");
pub const PAYOUT: Endpoint = Endpoint::new(Method::GET, "payout");
pub const NEW_PAYOUT: Endpoint = Endpoint::new(Method::POST, "new-payout");
pub const REFUND_PAYMENT: Endpoint = Endpoint::new(Method::POST, "refund-payment");

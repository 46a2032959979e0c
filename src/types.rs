//! Request and response shapes for the SnailPay API

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::value::MapAccessDeserializer;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of characters in a payment verification code
pub const VERIFICATION_CODE_LEN: usize = 10;

fn unix_seconds(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

// Derived struct impls also accept JSON arrays positionally, so `[]` would
// decode into an all-default value. Response shapes are derived with
// `remote = "Self"` and only reach that impl through a JSON object.
macro_rules! object_only {
    ($($ty:ident),* $(,)?) => {$(
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                $ty::serialize(self, serializer)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                struct ObjectVisitor;

                impl<'de> Visitor<'de> for ObjectVisitor {
                    type Value = $ty;

                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        write!(f, "a JSON object for {}", stringify!($ty))
                    }

                    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<$ty, A::Error> {
                        $ty::deserialize(MapAccessDeserializer::new(map))
                    }
                }

                deserializer.deserialize_map(ObjectVisitor)
            }
        }
    )*};
}

object_only!(
    Payment,
    PaymentLink,
    SubscriptionLink,
    ListPayment,
    ListSubscription,
    Payouts,
    Payout,
);

/// A verified payment
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, remote = "Self")]
pub struct Payment {
    /// Creation time, Unix seconds
    pub created: i64,
    /// Customer identifier
    pub customer: String,
    /// Customer email
    pub email: String,
    /// Payment status as reported by the service (e.g. "paid")
    pub status: String,
    /// Amount in minor currency units
    pub amount: i64,
    /// Product identifier
    pub product: String,
    /// Whether the payment belongs to a subscription
    pub subscription: bool,
}

impl Payment {
    /// Creation time as a UTC timestamp
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        unix_seconds(self.created)
    }
}

/// Parameters for creating a payment link
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentLinkParams {
    /// Product image URL
    pub image: String,
    /// Display name
    pub name: String,
    /// Price
    pub price: f64,
}

impl PaymentLinkParams {
    pub fn new(name: impl Into<String>, image: impl Into<String>, price: f64) -> Self {
        Self {
            image: image.into(),
            name: name.into(),
            price,
        }
    }
}

/// A created payment link
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, remote = "Self")]
pub struct PaymentLink {
    pub url: String,
}

/// Parameters for creating a subscription link
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionLinkParams {
    /// Product image URL
    pub image: String,
    /// Display name
    pub name: String,
    /// Recurring price
    pub price: f64,
}

impl SubscriptionLinkParams {
    pub fn new(name: impl Into<String>, image: impl Into<String>, price: f64) -> Self {
        Self {
            image: image.into(),
            name: name.into(),
            price,
        }
    }
}

/// A created subscription link
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, remote = "Self")]
pub struct SubscriptionLink {
    pub url: String,
}

/// One row of the payment listing
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, remote = "Self")]
pub struct ListPayment {
    pub amount: i64,
    pub customer: String,
    pub email: String,
    pub id: String,
    /// Unix seconds
    pub timestamp: i64,
    pub status: String,
}

impl ListPayment {
    pub fn timestamp_at(&self) -> Option<DateTime<Utc>> {
        unix_seconds(self.timestamp)
    }
}

/// One row of the subscription listing
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, remote = "Self")]
pub struct ListSubscription {
    pub amount: i64,
    pub customer: String,
    pub email: String,
    pub id: String,
    /// Unix seconds
    pub timestamp: i64,
    pub status: String,
}

impl ListSubscription {
    pub fn timestamp_at(&self) -> Option<DateTime<Utc>> {
        unix_seconds(self.timestamp)
    }
}

/// Payout history and account balances.
///
/// The service sends these keys in PascalCase; camelCase and snake_case
/// spellings are accepted too.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, remote = "Self")]
pub struct Payouts {
    #[serde(rename = "PayoutList", alias = "payoutList", alias = "payout_list")]
    pub payout_list: Vec<Payout>,
    #[serde(rename = "Withdrawn", alias = "withdrawn")]
    pub withdrawn: f64,
    #[serde(rename = "Balance", alias = "balance")]
    pub balance: f64,
    #[serde(rename = "Pending", alias = "pending")]
    pub pending: f64,
}

/// A single payout
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, remote = "Self")]
pub struct Payout {
    /// Request time, Unix seconds
    pub date: i64,
    pub amount: i64,
    /// Expected arrival, Unix seconds
    pub arrival_date: i64,
    pub status: String,
}

impl Payout {
    pub fn date_at(&self) -> Option<DateTime<Utc>> {
        unix_seconds(self.date)
    }

    pub fn arrival_at(&self) -> Option<DateTime<Utc>> {
        unix_seconds(self.arrival_date)
    }
}

/// Body of a refund request
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RefundRequest {
    /// Payment ids to refund, in order
    pub payments: Vec<String>,
}

impl RefundRequest {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            payments: ids.into_iter().map(Into::into).collect(),
        }
    }
}

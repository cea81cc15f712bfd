//! Payment types
//!
//! One payment row per transaction, tied to a booking and a status from
//! the `payment_statuses` lookup. The method is a closed set:
//! - `CreditCard`: `credit_card`
//! - `Paypal`: `paypal`
//! - `Stripe`: `stripe`

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Payment status lookup row (pending, completed, failed, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentStatus {
    pub payment_status_id: i64,
    pub status_name: String,
}

/// Supported payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    Paypal,
    Stripe,
}

impl PaymentMethod {
    /// Get the string representation stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::Stripe => "stripe",
        }
    }

    /// Get all payment methods
    pub fn all() -> &'static [PaymentMethod] {
        &[PaymentMethod::CreditCard, PaymentMethod::Paypal, PaymentMethod::Stripe]
    }
}

impl FromStr for PaymentMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "credit_card" => Ok(PaymentMethod::CreditCard),
            "paypal" => Ok(PaymentMethod::Paypal),
            "stripe" => Ok(PaymentMethod::Stripe),
            _ => Err(Error::InvalidValue(format!("Unknown payment method: {}", s))),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Column values for a payment that is about to be recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPayment {
    pub booking_id: i64,
    pub payment_status_id: i64,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    /// External processor reference, unique across payments
    pub transaction_id: String,
}

/// A stored payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub payment_id: i64,
    pub booking_id: i64,
    pub payment_status_id: i64,
    pub amount: f64,
    pub payment_date: String,
    pub payment_method: PaymentMethod,
    pub transaction_id: String,
}

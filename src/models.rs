//! Entity records persisted by the repository.
//!
//! Field names on the wire match the historical JSON layout of the store
//! (camelCase, and the short `msg`/`type`/`time` keys on notifications),
//! so an existing database hydrates without migration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stocked product. `qty` is never negative after a sanctioned mutation;
/// the repository clamps at the boundary.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub qty: i64,
    pub price: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub name: String,
    /// Outstanding balance, never negative.
    pub debt: f64,
    /// Set when `debt` becomes positive, cleared when it reaches zero.
    /// Drives the overdue-debt sweep.
    #[serde(default)]
    pub debt_date: Option<DateTime<Utc>>,
}

/// One line of a sale or of the open cart.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: i64,
    pub name: String,
    pub price: f64,
    pub qty: i64,
}

/// A completed sale. Immutable once recorded.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    /// Issued by the invoice counter; strictly increasing, never reused.
    pub invoice_number: u64,
    pub items: Vec<CartLine>,
    pub total: f64,
    pub timestamp: DateTime<Utc>,
}

/// A customer debt entry recorded by the debt-collection flow.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: i64,
    pub customer_id: i64,
    pub amount: f64,
    pub date: DateTime<Utc>,
}

/// Money owed to a supplier rather than by a customer.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDebt {
    pub id: i64,
    pub supplier: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub id: i64,
    pub customer_id: i64,
    pub address: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub delivered: bool,
}

/// An application account. Credentials are stored and compared in
/// cleartext; see `core::auth::verify_credentials`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub role: String,
    /// Display name shown in the UI and in login notifications.
    pub name: String,
}

/// Severity of a notification entry.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Warning,
    Danger,
}

/// One entry of the bounded notification log.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Notification {
    #[serde(rename = "msg")]
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(rename = "time")]
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

/// The `{username, password}` pair persisted for auto-login.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SavedCredentials {
    pub username: String,
    pub password: String,
}

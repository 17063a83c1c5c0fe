//! Payment-related types for the payment action engine
//!
//! This module defines the Payment aggregate as the commerce platform sends it,
//! together with its transactions and money amounts. Field names follow the
//! platform's camelCase JSON so snapshots deserialize without a mapping layer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Amount in minor units (e.g. cents)
pub type CentAmount = i64;

/// Custom field carrying a "list payment methods" request
pub const PAYMENT_METHODS_REQUEST_FIELD: &str = "paymentMethodsRequest";

/// Custom field carrying the answer to a "list payment methods" request
pub const PAYMENT_METHODS_RESPONSE_FIELD: &str = "paymentMethodsResponse";

fn default_fraction_digits() -> u32 {
    2
}

/// Money amount in minor units
///
/// `cent_amount` is scaled by `fraction_digits`: 1234 with 2 fraction digits
/// means 12.34 in the given currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Amount in minor units, negative for discounts
    pub cent_amount: CentAmount,

    /// ISO 4217 currency code
    pub currency_code: String,

    /// Number of fractional digits of the minor unit (defaults to 2)
    #[serde(default = "default_fraction_digits")]
    pub fraction_digits: u32,
}

impl Money {
    /// Create a money amount with an explicit scale
    pub fn new(cent_amount: CentAmount, currency_code: &str, fraction_digits: u32) -> Self {
        Money {
            cent_amount,
            currency_code: currency_code.to_string(),
            fraction_digits,
        }
    }
}

/// Transaction types a payment can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Reserve funds without capturing them
    Authorization,

    /// Release a previous authorization (whole or partial)
    CancelAuthorization,

    /// Capture funds
    Charge,

    /// Return captured funds to the customer
    Refund,
}

impl TransactionType {
    /// Every transaction type, in declaration order
    pub const ALL: [TransactionType; 4] = [
        TransactionType::Authorization,
        TransactionType::CancelAuthorization,
        TransactionType::Charge,
        TransactionType::Refund,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Lifecycle state of a transaction
///
/// `Initial` marks the single pending intent the engine must act on.
/// `Pending` is set once the provider acknowledged the intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionState {
    Initial,
    Pending,
    Success,
    Failure,
}

impl TransactionState {
    /// Every transaction state, in declaration order
    pub const ALL: [TransactionState; 4] = [
        TransactionState::Initial,
        TransactionState::Pending,
        TransactionState::Success,
        TransactionState::Failure,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Custom fields attached to a payment or transaction
///
/// The engine only reads a handful of side-channel fields; everything else
/// (line and shipment hints for partial captures, provider responses) is
/// carried through untouched for the action executors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomFields {
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

impl CustomFields {
    /// Whether `name` holds a value other than null or an empty string
    pub fn is_filled(&self, name: &str) -> bool {
        match self.fields.get(name) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(_) => true,
        }
    }

    /// Set a field, returning self for chaining
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }
}

/// One intent or event within a payment's lifecycle
///
/// Transactions are append-only: the caller never deletes or reorders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type")]
    pub tx_type: TransactionType,

    pub state: TransactionState,

    pub amount: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomFields>,
}

impl Transaction {
    /// Create a transaction with the given type, state and amount
    pub fn new(tx_type: TransactionType, state: TransactionState, amount: Money) -> Self {
        Transaction {
            id: None,
            tx_type,
            state,
            amount,
            custom: None,
        }
    }

    /// Whether this transaction has the given type and state
    pub fn is(&self, tx_type: TransactionType, state: TransactionState) -> bool {
        self.tx_type == tx_type && self.state == state
    }
}

/// Payment method declared by the customer
///
/// `method` has the form `method[,issuer]`, e.g. `ideal,ideal_ABNANL2A`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

/// The aggregate under evaluation
///
/// Owned by the commerce platform; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Platform identifier, only used for reporting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Provider order reference; absent until an order has been created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default)]
    pub payment_method_info: PaymentMethodInfo,

    pub amount_planned: Money,

    #[serde(default)]
    pub transactions: Vec<Transaction>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomFields>,
}

impl Payment {
    /// Create a payment without key, method or transactions
    pub fn new(amount_planned: Money) -> Self {
        Payment {
            id: None,
            key: None,
            payment_method_info: PaymentMethodInfo::default(),
            amount_planned,
            transactions: Vec::new(),
            custom: None,
        }
    }

    /// Whether an order already exists at the provider
    ///
    /// An empty key is treated the same as a missing one.
    pub fn has_key(&self) -> bool {
        self.key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }

    /// Whether a "list payment methods" request is waiting for an answer
    pub fn methods_request_pending(&self) -> bool {
        self.custom.as_ref().is_some_and(|custom| {
            custom.is_filled(PAYMENT_METHODS_REQUEST_FIELD)
                && !custom.is_filled(PAYMENT_METHODS_RESPONSE_FIELD)
        })
    }
}

//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `payment`: the Payment aggregate, its transactions and money amounts
//! - `decision`: the engine's output
//! - `error`: Error types for the engine and its I/O

pub mod decision;
pub mod error;
pub mod payment;

pub use decision::{ControllerAction, Decision};
pub use error::{EngineError, MoneyError};
pub use payment::{
    CentAmount, CustomFields, Money, Payment, PaymentMethodInfo, Transaction, TransactionState,
    TransactionType, PAYMENT_METHODS_REQUEST_FIELD, PAYMENT_METHODS_RESPONSE_FIELD,
};

//! Payment Action Engine Library
//! # Overview
//!
//! This library decides which single payment provider action, if any, should
//! run next for a commerce payment, given the payment's append-only
//! transaction log. The decision is a pure function of the snapshot: the same
//! log always yields the same action.
//!
//! # Architecture
//!
//! - [`types`] - Data model (Payment, Transaction, Money, Decision, errors)
//! - [`core`] - Decision logic:
//!   - [`core::money`] - Exact minor-unit / provider decimal conversion
//!   - [`core::classifier`] - Queries over the transaction log
//!   - [`core::pay_now`] and [`core::pay_later`] - Ordered rule tables per flow
//!   - [`core::dispatcher`] - Method validation and flow routing
//!   - [`core::extension`] - Extension response contract around an executor
//! - [`io`] - JSON Lines snapshot input and CSV decision report
//! - [`strategy`] - Sync and async batch evaluation pipelines
//! - [`cli`] - CLI arguments parsing
//!
//! # Flows
//!
//! - **Pay-now** methods charge immediately: Charge opens the order, Refund
//!   either refunds a settled charge or cancels an open order.
//! - **Pay-later** methods authorize first: Authorization opens the order,
//!   Charge ships it, CancelAuthorization cancels it and Refund refunds it.
//!
//! ```
//! use payment_action_engine::core::determine_action;
//! use payment_action_engine::types::{
//!     ControllerAction, Money, Payment, PaymentMethodInfo, Transaction, TransactionState,
//!     TransactionType,
//! };
//!
//! let amount = Money::new(1000, "EUR", 2);
//! let mut payment = Payment::new(amount.clone());
//! payment.payment_method_info = PaymentMethodInfo { method: Some("creditcard".to_string()) };
//! payment.transactions.push(Transaction::new(
//!     TransactionType::Charge,
//!     TransactionState::Initial,
//!     amount,
//! ));
//!
//! assert_eq!(determine_action(&payment).action, ControllerAction::CreateOrder);
//! ```

pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod strategy;
pub mod types;

pub use core::{determine_action, FlowDispatcher, MethodCatalog, ProviderMethodCatalog};
pub use io::write_decisions_csv;
pub use types::{
    ControllerAction, Decision, EngineError, Money, MoneyError, Payment, Transaction,
    TransactionState, TransactionType,
};

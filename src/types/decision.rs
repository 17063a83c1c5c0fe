//! Decision types produced by the engine
//!
//! A [`Decision`] names the single provider action to run next, or explains
//! why nothing can be done. It is computed fresh from every snapshot and never
//! stored.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Provider action the caller should execute next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ControllerAction {
    /// Nothing to do (steady state, or the log is invalid)
    NoAction,

    /// Answer a "list payment methods" request
    GetPaymentMethods,

    /// Open an order at the provider for the first time
    CreateOrder,

    /// Add a new payment to an existing order (method switch or retry)
    CreateOrderPayment,

    /// Capture an authorized order, fully or per line
    CreateShipment,

    /// Cancel an order, or some of its lines
    CancelOrder,

    /// Refund captured funds
    CreateCustomRefund,
}

impl ControllerAction {
    /// Every action, in declaration order
    pub const ALL: [ControllerAction; 7] = [
        ControllerAction::NoAction,
        ControllerAction::GetPaymentMethods,
        ControllerAction::CreateOrder,
        ControllerAction::CreateOrderPayment,
        ControllerAction::CreateShipment,
        ControllerAction::CancelOrder,
        ControllerAction::CreateCustomRefund,
    ];

    /// Wire name of the action (same text as the serde representation)
    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerAction::NoAction => "noAction",
            ControllerAction::GetPaymentMethods => "getPaymentMethods",
            ControllerAction::CreateOrder => "createOrder",
            ControllerAction::CreateOrderPayment => "createOrderPayment",
            ControllerAction::CreateShipment => "createShipment",
            ControllerAction::CancelOrder => "cancelOrder",
            ControllerAction::CreateCustomRefund => "createCustomRefund",
        }
    }
}

impl fmt::Display for ControllerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of evaluating one payment snapshot
///
/// `error_message` is empty for every action other than `NoAction`, and for
/// intentional no-ops such as waiting on a provider webhook. It is non-empty
/// exactly when the snapshot cannot be acted on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub action: ControllerAction,
    pub error_message: String,
}

impl Decision {
    /// Decide to run `action`
    pub fn action(action: ControllerAction) -> Self {
        Decision {
            action,
            error_message: String::new(),
        }
    }

    /// Intentional no-op
    pub fn no_action() -> Self {
        Self::action(ControllerAction::NoAction)
    }

    /// No-op caused by an invalid snapshot
    pub fn rejected(message: impl Into<String>) -> Self {
        Decision {
            action: ControllerAction::NoAction,
            error_message: message.into(),
        }
    }

    /// Whether this decision reports an invalid snapshot
    pub fn is_rejection(&self) -> bool {
        self.action == ControllerAction::NoAction && !self.error_message.is_empty()
    }
}

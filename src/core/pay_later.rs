//! Pay-later flow
//!
//! State machine for methods that authorize first and capture later
//! (installments, invoices). All four transaction types are meaningful here:
//!
//! ```text
//! Authorization(Initial) ──createOrder / createOrderPayment──▶ Authorization(Success)
//!        │                                                          │
//!        └─ CancelAuthorization(Initial) ──cancelOrder               ├─ Charge(Initial) ──createShipment
//!                                                                   └─ Refund(Initial) ──createCustomRefund
//!                                                                       (after Charge(Success))
//! ```

use crate::core::rules::{always, Flow, FlowContext, Outcome, Rule, ONLY_ONE_INITIAL, PENDING_RESERVED};
use crate::core::traits::FlowResolver;
use crate::types::ControllerAction;
use crate::types::TransactionState::{Initial, Pending, Success};
use crate::types::TransactionType::{Authorization, CancelAuthorization, Charge, Refund};

pub const MISSING_AUTHORIZATION: &str =
    "cannot add a refund, cancel or charge without an Authorization";
pub const CAPTURE_WITHOUT_AUTHORIZATION: &str =
    "cannot create a capture without a successful Authorization";
pub const REFUND_WITHOUT_CAPTURE: &str = "cannot create a Refund without a successful capture";

fn multiple_initial(ctx: &FlowContext<'_>) -> bool {
    ctx.ledger.initial_count() > 1
}

fn follow_up_without_authorization(ctx: &FlowContext<'_>) -> bool {
    let ledger = &ctx.ledger;
    (ledger.has_type(CancelAuthorization) || ledger.has_type(Charge) || ledger.has_type(Refund))
        && !ledger.has_type(Authorization)
}

fn capture_without_authorization(ctx: &FlowContext<'_>) -> bool {
    ctx.ledger.has(Charge, Initial) && !ctx.ledger.has(Authorization, Success)
}

fn refund_without_capture(ctx: &FlowContext<'_>) -> bool {
    ctx.ledger.has_type(Refund) && !ctx.ledger.has(Charge, Success)
}

fn pending_without_order(ctx: &FlowContext<'_>) -> bool {
    ctx.ledger.has(Authorization, Pending) && !ctx.has_key
}

fn first_authorization(ctx: &FlowContext<'_>) -> bool {
    !ctx.has_key && ctx.ledger.has(Authorization, Initial)
}

fn authorization_on_existing_order(ctx: &FlowContext<'_>) -> bool {
    ctx.has_key && ctx.ledger.has(Authorization, Initial)
}

fn capture_requested(ctx: &FlowContext<'_>) -> bool {
    ctx.has_key && ctx.ledger.has(Authorization, Success) && ctx.ledger.has(Charge, Initial)
}

fn cancel_requested(ctx: &FlowContext<'_>) -> bool {
    ctx.ledger.has(CancelAuthorization, Initial)
}

fn refund_requested(ctx: &FlowContext<'_>) -> bool {
    ctx.ledger.has(Authorization, Success)
        && ctx.ledger.has(Charge, Success)
        && ctx.ledger.has(Refund, Initial)
}

/// Pay-later decision table, highest precedence first
pub static PAY_LATER_RULES: &[Rule] = &[
    Rule {
        name: "multiple_initial",
        applies: multiple_initial,
        outcome: Outcome::Reject(ONLY_ONE_INITIAL),
    },
    Rule {
        name: "follow_up_without_authorization",
        applies: follow_up_without_authorization,
        outcome: Outcome::Reject(MISSING_AUTHORIZATION),
    },
    Rule {
        name: "capture_without_authorization",
        applies: capture_without_authorization,
        outcome: Outcome::Reject(CAPTURE_WITHOUT_AUTHORIZATION),
    },
    Rule {
        name: "refund_without_capture",
        applies: refund_without_capture,
        outcome: Outcome::Reject(REFUND_WITHOUT_CAPTURE),
    },
    Rule {
        name: "pending_without_order",
        applies: pending_without_order,
        outcome: Outcome::Reject(PENDING_RESERVED),
    },
    Rule {
        name: "create_order",
        applies: first_authorization,
        outcome: Outcome::Act(ControllerAction::CreateOrder),
    },
    Rule {
        name: "create_order_payment",
        applies: authorization_on_existing_order,
        outcome: Outcome::Act(ControllerAction::CreateOrderPayment),
    },
    Rule {
        name: "create_shipment",
        applies: capture_requested,
        outcome: Outcome::Act(ControllerAction::CreateShipment),
    },
    Rule {
        name: "cancel_order",
        applies: cancel_requested,
        outcome: Outcome::Act(ControllerAction::CancelOrder),
    },
    Rule {
        name: "create_custom_refund",
        applies: refund_requested,
        outcome: Outcome::Act(ControllerAction::CreateCustomRefund),
    },
    Rule {
        name: "steady_state",
        applies: always,
        outcome: Outcome::Idle,
    },
];

/// Resolver for authorize-then-capture methods
#[derive(Debug, Clone, Copy, Default)]
pub struct PayLaterResolver;

impl FlowResolver for PayLaterResolver {
    fn flow(&self) -> Flow {
        Flow::PayLater
    }

    fn rules(&self) -> &'static [Rule] {
        PAY_LATER_RULES
    }
}

//! Pay-now flow
//!
//! State machine for methods that capture immediately. Only `Charge` and
//! `Refund` transactions belong here; authorization types mean the caller
//! picked the wrong flow.

use crate::core::rules::{always, Flow, FlowContext, Outcome, Rule, ONLY_ONE_INITIAL, PENDING_RESERVED};
use crate::core::traits::FlowResolver;
use crate::types::ControllerAction;
use crate::types::TransactionState::{Initial, Pending, Success};
use crate::types::TransactionType::{Authorization, CancelAuthorization, Charge, Refund};

pub const AUTHORIZATION_NOT_ALLOWED: &str =
    "Authorization and CancelAuthorization transactions are not valid for pay-now methods";
pub const REFUND_WITHOUT_CHARGE: &str = "cannot refund with no Charge";
pub const CHARGE_IN_FLIGHT: &str = "only one Charge may be in flight";

fn multiple_initial(ctx: &FlowContext<'_>) -> bool {
    ctx.ledger.initial_count() > 1
}

fn authorization_present(ctx: &FlowContext<'_>) -> bool {
    ctx.ledger.has_type(Authorization) || ctx.ledger.has_type(CancelAuthorization)
}

fn refund_without_charge(ctx: &FlowContext<'_>) -> bool {
    ctx.ledger.has_type(Refund) && !ctx.ledger.has_type(Charge)
}

fn charge_in_flight(ctx: &FlowContext<'_>) -> bool {
    ctx.ledger.has(Charge, Initial) && ctx.ledger.has(Charge, Pending)
}

fn pending_without_order(ctx: &FlowContext<'_>) -> bool {
    ctx.ledger.has(Charge, Pending) && !ctx.has_key
}

/// A single fresh charge intent and nothing captured or underway
fn fresh_charge(ctx: &FlowContext<'_>) -> bool {
    ctx.ledger.count(Charge, Initial) == 1
        && !ctx.ledger.has(Charge, Success)
        && !ctx.ledger.has(Charge, Pending)
}

fn first_charge(ctx: &FlowContext<'_>) -> bool {
    !ctx.has_key && fresh_charge(ctx)
}

fn charge_on_existing_order(ctx: &FlowContext<'_>) -> bool {
    ctx.has_key && fresh_charge(ctx)
}

fn refund_requested(ctx: &FlowContext<'_>) -> bool {
    !ctx.ledger.has(Charge, Initial)
        && !ctx.ledger.has(Charge, Pending)
        && ctx.ledger.count(Charge, Success) == 1
        && ctx.ledger.has(Refund, Initial)
}

/// The customer never completed the payment: cancel instead of refunding
fn refund_of_open_charge(ctx: &FlowContext<'_>) -> bool {
    ctx.ledger.count(Charge, Pending) == 1
        && !ctx.ledger.has(Charge, Success)
        && ctx.ledger.has(Refund, Initial)
}

/// Pay-now decision table, highest precedence first
pub static PAY_NOW_RULES: &[Rule] = &[
    Rule {
        name: "multiple_initial",
        applies: multiple_initial,
        outcome: Outcome::Reject(ONLY_ONE_INITIAL),
    },
    Rule {
        name: "authorization_present",
        applies: authorization_present,
        outcome: Outcome::Reject(AUTHORIZATION_NOT_ALLOWED),
    },
    Rule {
        name: "refund_without_charge",
        applies: refund_without_charge,
        outcome: Outcome::Reject(REFUND_WITHOUT_CHARGE),
    },
    Rule {
        name: "charge_in_flight",
        applies: charge_in_flight,
        outcome: Outcome::Reject(CHARGE_IN_FLIGHT),
    },
    Rule {
        name: "pending_without_order",
        applies: pending_without_order,
        outcome: Outcome::Reject(PENDING_RESERVED),
    },
    Rule {
        name: "create_order",
        applies: first_charge,
        outcome: Outcome::Act(ControllerAction::CreateOrder),
    },
    Rule {
        name: "create_order_payment",
        applies: charge_on_existing_order,
        outcome: Outcome::Act(ControllerAction::CreateOrderPayment),
    },
    Rule {
        name: "create_custom_refund",
        applies: refund_requested,
        outcome: Outcome::Act(ControllerAction::CreateCustomRefund),
    },
    Rule {
        name: "cancel_order",
        applies: refund_of_open_charge,
        outcome: Outcome::Act(ControllerAction::CancelOrder),
    },
    Rule {
        name: "steady_state",
        applies: always,
        outcome: Outcome::Idle,
    },
];

/// Resolver for immediate-capture methods
#[derive(Debug, Clone, Copy, Default)]
pub struct PayNowResolver;

impl FlowResolver for PayNowResolver {
    fn flow(&self) -> Flow {
        Flow::PayNow
    }

    fn rules(&self) -> &'static [Rule] {
        PAY_NOW_RULES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rules::first_match;
    use crate::types::TransactionState::Failure;
    use crate::types::{Decision, Money, Payment, Transaction, TransactionState, TransactionType};
    use rstest::rstest;

    fn tx(tx_type: TransactionType, state: TransactionState) -> Transaction {
        Transaction::new(tx_type, state, Money::new(1000, "EUR", 2))
    }

    fn payment(key: Option<&str>, transactions: Vec<Transaction>) -> Payment {
        let mut payment = Payment::new(Money::new(1000, "EUR", 2));
        payment.key = key.map(str::to_string);
        payment.transactions = transactions;
        payment
    }

    fn matched_rule(key: bool, transactions: &[Transaction]) -> &'static str {
        let ctx = FlowContext::from_parts(transactions, key);
        first_match(PAY_NOW_RULES, &ctx).unwrap().name
    }

    #[rstest]
    #[case::multiple_initial(true, vec![tx(Charge, Initial), tx(Refund, Initial)], "multiple_initial")]
    #[case::authorization(false, vec![tx(Authorization, Initial)], "authorization_present")]
    #[case::cancel_authorization(true, vec![tx(Charge, Success), tx(CancelAuthorization, Success)], "authorization_present")]
    #[case::refund_without_charge(false, vec![tx(Refund, Initial)], "refund_without_charge")]
    #[case::charge_in_flight(true, vec![tx(Charge, Pending), tx(Charge, Initial)], "charge_in_flight")]
    #[case::pending_without_key(false, vec![tx(Charge, Pending)], "pending_without_order")]
    #[case::create_order(false, vec![tx(Charge, Initial)], "create_order")]
    #[case::create_order_after_failure(false, vec![tx(Charge, Failure), tx(Charge, Initial)], "create_order")]
    #[case::create_order_payment(true, vec![tx(Charge, Initial)], "create_order_payment")]
    #[case::method_switch_after_failure(true, vec![tx(Charge, Failure), tx(Charge, Initial)], "create_order_payment")]
    #[case::refund(true, vec![tx(Charge, Success), tx(Refund, Initial)], "create_custom_refund")]
    #[case::second_refund(true, vec![tx(Charge, Success), tx(Refund, Success), tx(Refund, Initial)], "create_custom_refund")]
    #[case::refund_of_open_payment(true, vec![tx(Charge, Pending), tx(Refund, Initial)], "cancel_order")]
    #[case::awaiting_webhook(true, vec![tx(Charge, Pending)], "steady_state")]
    #[case::paid(true, vec![tx(Charge, Success)], "steady_state")]
    #[case::second_charge_after_success(true, vec![tx(Charge, Success), tx(Charge, Initial)], "steady_state")]
    #[case::refund_with_two_captures(true, vec![tx(Charge, Success), tx(Charge, Success), tx(Refund, Initial)], "steady_state")]
    #[case::refund_of_failed_charge(true, vec![tx(Charge, Failure), tx(Refund, Initial)], "steady_state")]
    fn test_rule_precedence(
        #[case] key: bool,
        #[case] transactions: Vec<Transaction>,
        #[case] expected_rule: &str,
    ) {
        assert_eq!(matched_rule(key, &transactions), expected_rule);
    }

    #[test]
    fn test_table_ends_with_catch_all() {
        let last = PAY_NOW_RULES.last().unwrap();
        assert_eq!(last.name, "steady_state");
        assert_eq!(last.outcome, Outcome::Idle);
    }

    #[test]
    fn test_refund_without_charge() {
        let decision = PayNowResolver.resolve(&payment(None, vec![tx(Refund, Initial)]));
        assert_eq!(decision.action, ControllerAction::NoAction);
        assert_eq!(decision.error_message, "cannot refund with no Charge");
    }

    #[rstest]
    #[case::create_order(None, vec![tx(Charge, Initial)], ControllerAction::CreateOrder)]
    #[case::create_order_payment(Some("ord_1"), vec![tx(Charge, Initial)], ControllerAction::CreateOrderPayment)]
    #[case::refund(Some("ord_1"), vec![tx(Charge, Success), tx(Refund, Initial)], ControllerAction::CreateCustomRefund)]
    #[case::cancel(Some("ord_1"), vec![tx(Charge, Pending), tx(Refund, Initial)], ControllerAction::CancelOrder)]
    fn test_actions(
        #[case] key: Option<&str>,
        #[case] transactions: Vec<Transaction>,
        #[case] expected: ControllerAction,
    ) {
        assert_eq!(
            PayNowResolver.resolve(&payment(key, transactions)),
            Decision::action(expected)
        );
    }

    #[test]
    fn test_pending_charge_without_key_is_an_error() {
        let decision = PayNowResolver.resolve(&payment(None, vec![tx(Charge, Pending)]));
        assert_eq!(decision, Decision::rejected(PENDING_RESERVED));
    }
}

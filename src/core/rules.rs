//! Ordered decision tables
//!
//! Each payment flow is a list of [`Rule`]s evaluated top to bottom; the first
//! rule whose predicate holds decides. Earlier rules guard log invariants,
//! later ones are the happy-path transitions, and every table ends with a
//! catch-all steady state.

use crate::core::classifier::TransactionLedger;
use crate::types::{ControllerAction, Decision, Payment, Transaction};
use std::fmt;

/// Shared by every flow: the log may hold a single pending intent
pub const ONLY_ONE_INITIAL: &str = "only one transaction can be in Initial state at any time";

/// Shared by every flow: `Pending` is set by the provider, never by the caller
pub const PENDING_RESERVED: &str =
    "Pending is reserved for provider acknowledgement and requires an existing order";

/// Payment method family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flow {
    /// Funds are captured immediately
    PayNow,
    /// Funds are authorized first and captured later
    PayLater,
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flow::PayNow => f.write_str("pay-now"),
            Flow::PayLater => f.write_str("pay-later"),
        }
    }
}

/// Everything a rule predicate may look at
#[derive(Debug, Clone, Copy)]
pub struct FlowContext<'a> {
    pub ledger: TransactionLedger<'a>,
    pub has_key: bool,
}

impl<'a> FlowContext<'a> {
    pub fn new(payment: &'a Payment) -> Self {
        Self::from_parts(&payment.transactions, payment.has_key())
    }

    pub fn from_parts(transactions: &'a [Transaction], has_key: bool) -> Self {
        FlowContext {
            ledger: TransactionLedger::new(transactions),
            has_key,
        }
    }
}

/// What a matching rule decides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Run a provider action
    Act(ControllerAction),
    /// The log violates an invariant
    Reject(&'static str),
    /// Nothing to do yet
    Idle,
}

impl Outcome {
    pub fn decision(self) -> Decision {
        match self {
            Outcome::Act(action) => Decision::action(action),
            Outcome::Reject(message) => Decision::rejected(message),
            Outcome::Idle => Decision::no_action(),
        }
    }
}

/// One row of a decision table
#[derive(Clone, Copy)]
pub struct Rule {
    /// Stable identifier, used in logs and tests
    pub name: &'static str,
    pub applies: fn(&FlowContext<'_>) -> bool,
    pub outcome: Outcome,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("outcome", &self.outcome)
            .finish()
    }
}

/// Catch-all predicate closing every table
pub(crate) fn always(_: &FlowContext<'_>) -> bool {
    true
}

/// First rule of `rules` that applies to `ctx`
pub fn first_match<'r>(rules: &'r [Rule], ctx: &FlowContext<'_>) -> Option<&'r Rule> {
    rules.iter().find(|rule| (rule.applies)(ctx))
}

/// Evaluate a decision table
///
/// Every table ends with an `always` rule, so a rule is found for any context.
pub fn resolve(flow: Flow, rules: &[Rule], ctx: &FlowContext<'_>) -> Decision {
    let Some(rule) = first_match(rules, ctx) else {
        debug_assert!(false, "{} table has no catch-all rule", flow);
        return Decision::no_action();
    };
    tracing::debug!(
        flow = %flow,
        rule = rule.name,
        outcome = ?rule.outcome,
        transactions = ctx.ledger.transactions().len(),
        "Decision rule matched"
    );
    rule.outcome.decision()
}

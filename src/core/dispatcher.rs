//! Flow dispatcher
//!
//! Entry point of the engine. Answers "list payment methods" requests before
//! anything else, validates the payment method against the catalog, and hands
//! the transaction log to the resolver of the method's family.

use crate::core::catalog::ProviderMethodCatalog;
use crate::core::pay_later::PayLaterResolver;
use crate::core::pay_now::PayNowResolver;
use crate::core::traits::{FlowResolver, MethodCatalog};
use crate::types::{ControllerAction, Decision, Payment};

pub const METHOD_MISSING: &str = "payment method must be set in paymentMethodInfo.method";

/// Payment method split from its optional issuer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSelection<'a> {
    pub method: &'a str,
    pub issuer: Option<&'a str>,
}

/// Parse `method[,issuer]`
///
/// Returns `None` when no method name is given. A blank issuer after the
/// comma counts as no issuer.
pub fn parse_method(raw: &str) -> Option<MethodSelection<'_>> {
    let (method, issuer) = match raw.split_once(',') {
        Some((method, issuer)) => (method.trim(), Some(issuer.trim())),
        None => (raw.trim(), None),
    };

    if method.is_empty() {
        return None;
    }

    Some(MethodSelection {
        method,
        issuer: issuer.filter(|issuer| !issuer.is_empty()),
    })
}

/// Routes payments to the resolver of their method family
#[derive(Debug, Clone)]
pub struct FlowDispatcher<C> {
    catalog: C,
}

impl<C: MethodCatalog> FlowDispatcher<C> {
    pub fn new(catalog: C) -> Self {
        FlowDispatcher { catalog }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Decide the next action for `payment`
    ///
    /// # Returns
    ///
    /// A [`Decision`]; invalid input and invalid logs come back as `NoAction`
    /// with an error message, never as an error.
    pub fn determine_action(&self, payment: &Payment) -> Decision {
        let decision = self.evaluate(payment);

        if decision.is_rejection() {
            tracing::warn!(
                payment = payment.id.as_deref().unwrap_or_default(),
                reason = %decision.error_message,
                "Payment cannot be acted on"
            );
        } else {
            tracing::debug!(
                payment = payment.id.as_deref().unwrap_or_default(),
                action = %decision.action,
                "Action determined"
            );
        }

        decision
    }

    fn evaluate(&self, payment: &Payment) -> Decision {
        if payment.methods_request_pending() {
            return Decision::action(ControllerAction::GetPaymentMethods);
        }

        if payment.transactions.is_empty() {
            return Decision::no_action();
        }

        let raw = payment.payment_method_info.method.as_deref().unwrap_or_default();
        let Some(selection) = parse_method(raw) else {
            return Decision::rejected(METHOD_MISSING);
        };

        if !self.catalog.is_known(selection.method) {
            return Decision::rejected(format!(
                "payment method '{}' is not supported",
                selection.method
            ));
        }

        if selection.issuer.is_some() && !self.catalog.supports_issuer(selection.method) {
            return Decision::rejected(format!(
                "payment method '{}' does not support issuers",
                selection.method
            ));
        }

        if self.catalog.is_pay_later(selection.method) {
            PayLaterResolver.resolve(payment)
        } else {
            PayNowResolver.resolve(payment)
        }
    }
}

/// Decide the next action for `payment` against the standard catalog
pub fn determine_action(payment: &Payment) -> Decision {
    FlowDispatcher::new(ProviderMethodCatalog::standard()).determine_action(payment)
}

//! Core traits for the decision engine and its collaborators
//!
//! This module defines the seams of the engine:
//! - [`MethodCatalog`]: which payment methods exist, take issuers, or pay later
//! - [`FlowResolver`]: a payment flow expressed as an ordered rule table
//! - [`ActionExecutor`]: whoever performs the provider call for a decided action

use crate::core::extension::{ExtensionError, UpdateAction};
use crate::core::rules::{self, Flow, FlowContext, Rule};
use crate::types::{ControllerAction, Decision, Payment};
use std::fmt::Debug;
use std::sync::Arc;

/// Capability describing the provider's payment method catalog
///
/// Injected into the dispatcher so the catalog can change without touching
/// the state machines.
pub trait MethodCatalog: Debug + Send + Sync {
    /// Whether `method` is a payment method the provider offers
    fn is_known(&self, method: &str) -> bool;

    /// Whether `method` accepts a secondary issuer token
    fn supports_issuer(&self, method: &str) -> bool;

    /// Whether `method` authorizes before capturing
    fn is_pay_later(&self, method: &str) -> bool;
}

impl<T: MethodCatalog + ?Sized> MethodCatalog for &T {
    fn is_known(&self, method: &str) -> bool {
        (**self).is_known(method)
    }

    fn supports_issuer(&self, method: &str) -> bool {
        (**self).supports_issuer(method)
    }

    fn is_pay_later(&self, method: &str) -> bool {
        (**self).is_pay_later(method)
    }
}

impl<T: MethodCatalog + ?Sized> MethodCatalog for Arc<T> {
    fn is_known(&self, method: &str) -> bool {
        (**self).is_known(method)
    }

    fn supports_issuer(&self, method: &str) -> bool {
        (**self).supports_issuer(method)
    }

    fn is_pay_later(&self, method: &str) -> bool {
        (**self).is_pay_later(method)
    }
}

/// A payment flow resolved by an ordered decision table
pub trait FlowResolver {
    /// Which method family this resolver handles
    fn flow(&self) -> Flow;

    /// The decision table, highest precedence first
    fn rules(&self) -> &'static [Rule];

    /// Decide the next action for `payment`
    fn resolve(&self, payment: &Payment) -> Decision {
        rules::resolve(self.flow(), self.rules(), &FlowContext::new(payment))
    }
}

/// Performs the provider call for a decided action
///
/// Implementations build the provider request, call the provider, and map
/// its response to platform update actions. The engine never calls the
/// provider itself.
pub trait ActionExecutor {
    fn execute(
        &self,
        action: ControllerAction,
        payment: &Payment,
    ) -> Result<Vec<UpdateAction>, Vec<ExtensionError>>;
}

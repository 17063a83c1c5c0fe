//! Core business logic module
//!
//! This module contains the decision engine components:
//! - `money` - Exact conversion between minor units and provider amounts
//! - `classifier` - Queries over a payment's transaction log
//! - `rules` - Ordered decision tables shared by both flows
//! - `pay_now` / `pay_later` - The two flow state machines
//! - `catalog` - The provider's payment method catalog
//! - `dispatcher` - Method validation and routing to a flow
//! - `extension` - Mapping decisions to the platform's extension contract
//! - `traits` - Seams for catalogs, resolvers and action executors

pub mod catalog;
pub mod classifier;
pub mod dispatcher;
pub mod extension;
pub mod money;
pub mod pay_later;
pub mod pay_now;
pub mod rules;
pub mod traits;

pub use catalog::{MethodSpec, ProviderMethodCatalog};
pub use classifier::{filter_by_type, find_initial, includes_state, TransactionLedger};
pub use dispatcher::{determine_action, FlowDispatcher};
pub use extension::{handle_payment, ExtensionError, ExtensionResponse, UpdateAction};
pub use money::{from_provider_amount, to_provider_amount, ProviderAmount};
pub use pay_later::PayLaterResolver;
pub use pay_now::PayNowResolver;
pub use rules::{Flow, FlowContext, Rule};
pub use traits::{ActionExecutor, FlowResolver, MethodCatalog};

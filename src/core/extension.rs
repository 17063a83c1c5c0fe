//! Platform extension contract
//!
//! The commerce platform calls the extension synchronously on every payment
//! mutation and expects either a list of update actions (2xx) or a list of
//! structured errors (4xx). This module turns a [`Decision`] into that answer,
//! delegating the provider call itself to an [`ActionExecutor`].

use crate::core::dispatcher::FlowDispatcher;
use crate::core::traits::{ActionExecutor, MethodCatalog};
use crate::types::{ControllerAction, Payment};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error code the platform shows for rejected payment mutations
pub const INVALID_OPERATION: &str = "InvalidOperation";

/// Platform update action, e.g. `{"action": "addTransaction", "transaction": {...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateAction {
    pub action: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl UpdateAction {
    pub fn new(action: &str) -> Self {
        UpdateAction {
            action: action.to_string(),
            fields: Map::new(),
        }
    }

    /// Set a field, returning self for chaining
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }
}

/// Structured error returned to the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionError {
    pub code: String,
    pub message: String,
}

impl ExtensionError {
    pub fn invalid_operation(message: &str) -> Self {
        ExtensionError {
            code: INVALID_OPERATION.to_string(),
            message: message.to_string(),
        }
    }
}

/// Answer to one extension call
///
/// Serializes to the platform body: `{"actions": [...]}` or `{"errors": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtensionResponse {
    Actions(Vec<UpdateAction>),
    Errors(Vec<ExtensionError>),
}

impl ExtensionResponse {
    /// HTTP status the transport should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            ExtensionResponse::Actions(_) => 200,
            ExtensionResponse::Errors(_) => 400,
        }
    }
}

/// Decide and execute the next action for `payment`
///
/// - `NoAction` with a message: one `InvalidOperation` error
/// - `NoAction` without a message: no update actions
/// - anything else: whatever the executor returns
pub fn handle_payment<C, E>(
    payment: &Payment,
    dispatcher: &FlowDispatcher<C>,
    executor: &E,
) -> ExtensionResponse
where
    C: MethodCatalog,
    E: ActionExecutor + ?Sized,
{
    let decision = dispatcher.determine_action(payment);

    match decision.action {
        ControllerAction::NoAction if decision.is_rejection() => ExtensionResponse::Errors(vec![
            ExtensionError::invalid_operation(&decision.error_message),
        ]),
        ControllerAction::NoAction => ExtensionResponse::Actions(Vec::new()),
        action => match executor.execute(action, payment) {
            Ok(actions) => ExtensionResponse::Actions(actions),
            Err(errors) => {
                tracing::warn!(
                    payment = payment.id.as_deref().unwrap_or_default(),
                    action = %action,
                    errors = errors.len(),
                    "Action execution failed"
                );
                ExtensionResponse::Errors(errors)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::ProviderMethodCatalog;
    use crate::core::pay_now::REFUND_WITHOUT_CHARGE;
    use crate::types::{Money, Transaction, TransactionState, TransactionType};
    use serde_json::json;
    use std::cell::RefCell;

    /// Records every call and answers with a fixed outcome
    struct RecordingExecutor {
        calls: RefCell<Vec<ControllerAction>>,
        fail: bool,
    }

    impl RecordingExecutor {
        fn new(fail: bool) -> Self {
            RecordingExecutor {
                calls: RefCell::new(Vec::new()),
                fail,
            }
        }
    }

    impl ActionExecutor for RecordingExecutor {
        fn execute(
            &self,
            action: ControllerAction,
            _payment: &Payment,
        ) -> Result<Vec<UpdateAction>, Vec<ExtensionError>> {
            self.calls.borrow_mut().push(action);
            if self.fail {
                Err(vec![ExtensionError {
                    code: "ProviderError".to_string(),
                    message: "provider unavailable".to_string(),
                }])
            } else {
                Ok(vec![UpdateAction::new("setKey").with("key", "ord_1")])
            }
        }
    }

    fn pay_now(transactions: Vec<(TransactionType, TransactionState)>) -> Payment {
        let mut payment = Payment::new(Money::new(1000, "EUR", 2));
        payment.payment_method_info.method = Some("creditcard".to_string());
        payment.transactions = transactions
            .into_iter()
            .map(|(tx_type, state)| Transaction::new(tx_type, state, Money::new(1000, "EUR", 2)))
            .collect();
        payment
    }

    #[test]
    fn test_action_is_executed() {
        let dispatcher = FlowDispatcher::new(ProviderMethodCatalog::standard());
        let executor = RecordingExecutor::new(false);
        let payment = pay_now(vec![(TransactionType::Charge, TransactionState::Initial)]);

        let response = handle_payment(&payment, &dispatcher, &executor);

        assert_eq!(*executor.calls.borrow(), vec![ControllerAction::CreateOrder]);
        assert_eq!(response.status_code(), 200);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "actions": [ { "action": "setKey", "key": "ord_1" } ] })
        );
    }

    #[test]
    fn test_executor_errors_are_returned() {
        let dispatcher = FlowDispatcher::new(ProviderMethodCatalog::standard());
        let executor = RecordingExecutor::new(true);
        let payment = pay_now(vec![(TransactionType::Charge, TransactionState::Initial)]);

        let response = handle_payment(&payment, &dispatcher, &executor);
        assert_eq!(response.status_code(), 400);
        assert!(matches!(response, ExtensionResponse::Errors(ref errors) if errors[0].code == "ProviderError"));
    }

    #[test]
    fn test_rejection_becomes_invalid_operation() {
        let dispatcher = FlowDispatcher::new(ProviderMethodCatalog::standard());
        let executor = RecordingExecutor::new(false);
        let payment = pay_now(vec![(TransactionType::Refund, TransactionState::Initial)]);

        let response = handle_payment(&payment, &dispatcher, &executor);

        assert!(executor.calls.borrow().is_empty());
        assert_eq!(
            response,
            ExtensionResponse::Errors(vec![ExtensionError::invalid_operation(
                REFUND_WITHOUT_CHARGE
            )])
        );
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "errors": [ { "code": "InvalidOperation", "message": REFUND_WITHOUT_CHARGE } ] })
        );
    }

    #[test]
    fn test_steady_state_answers_without_actions() {
        let dispatcher = FlowDispatcher::new(ProviderMethodCatalog::standard());
        let executor = RecordingExecutor::new(false);
        let mut payment = pay_now(vec![(TransactionType::Charge, TransactionState::Pending)]);
        payment.key = Some("ord_1".to_string());

        let response = handle_payment(&payment, &dispatcher, &executor);

        assert!(executor.calls.borrow().is_empty());
        assert_eq!(response, ExtensionResponse::Actions(Vec::new()));
        assert_eq!(response.status_code(), 200);
    }
}

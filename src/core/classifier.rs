//! Transaction classification
//!
//! Pure queries over a payment's transaction list. The free functions cover
//! one-off questions; [`TransactionLedger`] partitions the list once by
//! (type, state) so the resolver rule tables can ask counted questions in
//! constant time.

use crate::types::{Transaction, TransactionState, TransactionType};
use thiserror::Error;

/// More than one transaction is in `Initial` state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{count} transactions are in Initial state, at most one is allowed")]
pub struct MultipleInitial {
    /// Number of `Initial` transactions found
    pub count: usize,
}

/// Whether any transaction is in `state`
pub fn includes_state(transactions: &[Transaction], state: TransactionState) -> bool {
    transactions.iter().any(|tx| tx.state == state)
}

/// All transactions of `tx_type`, in log order
pub fn filter_by_type(transactions: &[Transaction], tx_type: TransactionType) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|tx| tx.tx_type == tx_type)
        .collect()
}

/// The single transaction in `Initial` state, if any
///
/// # Returns
///
/// * `Ok(Some(&Transaction))` - exactly one `Initial` transaction
/// * `Ok(None)` - no `Initial` transaction
/// * `Err(MultipleInitial)` - the log is invalid
pub fn find_initial(transactions: &[Transaction]) -> Result<Option<&Transaction>, MultipleInitial> {
    let mut initial = transactions
        .iter()
        .filter(|tx| tx.state == TransactionState::Initial);

    let first = initial.next();
    match initial.count() {
        0 => Ok(first),
        rest => Err(MultipleInitial { count: rest + 1 }),
    }
}

/// Transaction list partitioned by (type, state)
#[derive(Debug, Clone, Copy)]
pub struct TransactionLedger<'a> {
    transactions: &'a [Transaction],
    counts: [[usize; 4]; 4],
}

impl<'a> TransactionLedger<'a> {
    /// Partition `transactions` in a single pass
    pub fn new(transactions: &'a [Transaction]) -> Self {
        let mut counts = [[0; 4]; 4];
        for tx in transactions {
            counts[tx.tx_type.index()][tx.state.index()] += 1;
        }
        TransactionLedger {
            transactions,
            counts,
        }
    }

    /// The underlying transactions, in log order
    pub fn transactions(&self) -> &'a [Transaction] {
        self.transactions
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Number of transactions of `tx_type` in `state`
    pub fn count(&self, tx_type: TransactionType, state: TransactionState) -> usize {
        self.counts[tx_type.index()][state.index()]
    }

    /// Whether a transaction of `tx_type` in `state` exists
    pub fn has(&self, tx_type: TransactionType, state: TransactionState) -> bool {
        self.count(tx_type, state) > 0
    }

    /// Number of transactions of `tx_type`, whatever their state
    pub fn count_type(&self, tx_type: TransactionType) -> usize {
        self.counts[tx_type.index()].iter().sum()
    }

    /// Whether a transaction of `tx_type` exists
    pub fn has_type(&self, tx_type: TransactionType) -> bool {
        self.count_type(tx_type) > 0
    }

    /// Number of transactions in `state`, whatever their type
    pub fn count_state(&self, state: TransactionState) -> usize {
        self.counts.iter().map(|by_state| by_state[state.index()]).sum()
    }

    /// Number of `Initial` transactions
    pub fn initial_count(&self) -> usize {
        self.count_state(TransactionState::Initial)
    }
}

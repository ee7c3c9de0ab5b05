//! Expense store - the tracked entity set and its pending counters
//!
//! Every create/update/delete bumps the matching [`PendingChanges`]
//! counter; only [`ExpenseStore::mark_synced`] (called after a successful
//! sync run) resets them. The aggregator in `ledgit-core` turns the
//! counters into the badge count.

use std::sync::Mutex;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use ledgit_core::domain::pending::PendingChanges;

/// A single tracked expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: Uuid,
    /// Free-text description
    pub description: String,
    /// Amount in cents (negative for refunds)
    pub amount_cents: i64,
    /// Category label
    pub category: String,
    /// Date the expense was incurred
    pub incurred_on: NaiveDate,
}

impl Expense {
    /// Creates an expense with a fresh id
    pub fn new(
        description: impl Into<String>,
        amount_cents: i64,
        category: impl Into<String>,
        incurred_on: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount_cents,
            category: category.into(),
            incurred_on,
        }
    }
}

#[derive(Debug, Default)]
struct ExpenseState {
    expenses: Vec<Expense>,
    pending: PendingChanges,
}

/// Shared store of expenses plus uncommitted-change counters
#[derive(Debug, Default)]
pub struct ExpenseStore {
    state: Mutex<ExpenseState>,
}

impl ExpenseStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an expense and records the pending creation
    pub fn add(&self, expense: Expense) {
        let mut state = self.state.lock().expect("expense mutex poisoned");
        debug!(id = %expense.id, "Expense added");
        state.expenses.push(expense);
        state.pending.record_added();
    }

    /// Replaces the expense with the same id, recording a pending edit
    ///
    /// Returns false (and records nothing) when the id is unknown.
    pub fn update(&self, expense: Expense) -> bool {
        let mut state = self.state.lock().expect("expense mutex poisoned");
        match state.expenses.iter_mut().find(|e| e.id == expense.id) {
            Some(slot) => {
                *slot = expense;
                state.pending.record_edited();
                true
            }
            None => {
                debug!(id = %expense.id, "Update for unknown expense, ignoring");
                false
            }
        }
    }

    /// Removes the expense with `id`, recording a pending deletion
    ///
    /// Returns false (and records nothing) when the id is unknown.
    pub fn remove(&self, id: Uuid) -> bool {
        let mut state = self.state.lock().expect("expense mutex poisoned");
        let before = state.expenses.len();
        state.expenses.retain(|e| e.id != id);
        if state.expenses.len() == before {
            debug!(%id, "Remove for unknown expense, ignoring");
            return false;
        }
        state.pending.record_deleted();
        true
    }

    /// Returns the current expense list
    pub fn snapshot(&self) -> Vec<Expense> {
        self.state
            .lock()
            .expect("expense mutex poisoned")
            .expenses
            .clone()
    }

    /// Returns the live pending-change counters
    pub fn pending(&self) -> PendingChanges {
        self.state.lock().expect("expense mutex poisoned").pending
    }

    /// Zeroes the counters after a successful sync covering them
    pub fn mark_synced(&self) {
        let mut state = self.state.lock().expect("expense mutex poisoned");
        if !state.pending.is_empty() {
            debug!(cleared = state.pending.total(), "Pending counters reset after sync");
        }
        state.pending.reset();
    }
}

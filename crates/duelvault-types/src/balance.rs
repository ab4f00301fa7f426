//! Ledger account types.
//!
//! Each (owner, asset) pair has one [`TokenAccount`]: a balance plus at most
//! one delegate allowed to spend a bounded amount of it. Approving a new
//! delegate replaces the previous one.

use serde::{Deserialize, Serialize};

use crate::Identity;

/// Spending right granted by an account owner to another identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegation {
    pub spender: Identity,
    /// Remaining amount the spender may move.
    pub allowance: u64,
}

/// A single balance account for an (owner, asset) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAccount {
    pub amount: u64,
    pub delegate: Option<Delegation>,
}

impl TokenAccount {
    /// Allowance currently granted to `spender` (zero if someone else, or
    /// nobody, is the delegate).
    #[must_use]
    pub fn allowance_for(&self, spender: &Identity) -> u64 {
        match self.delegate {
            Some(d) if d.spender == *spender => d.allowance,
            _ => 0,
        }
    }

    /// Reduce the delegate's allowance by `amount`, clearing the delegation
    /// once it is used up. Callers check the allowance first.
    pub fn consume_allowance(&mut self, amount: u64) {
        if let Some(d) = self.delegate.as_mut() {
            d.allowance = d.allowance.saturating_sub(amount);
            if d.allowance == 0 {
                self.delegate = None;
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amount == 0 && self.delegate.is_none()
    }
}

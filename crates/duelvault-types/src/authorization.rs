//! # TransferAuthorization: the vault's single-use transfer capability
//!
//! The vault never holds a party's key. Every balance movement it wants is
//! spelled out as an explicit [`TransferAuthorization`] naming source,
//! destination, asset and amount. The ledger executes it at most once.
//!
//! ## State Machine
//!
//! ```text
//!   ┌────────┐  ledger executes  ┌──────────┐
//!   │ ISSUED ├──────────────────▶│ CONSUMED │
//!   └────────┘                   └──────────┘
//! ```
//!
//! `Issued → Consumed` is irreversible; presenting a consumed authorization
//! again is rejected, which is what keeps a stake from being pulled twice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AssetId, AuthorizationId, DuelVaultError, Identity, Result};

/// The lifecycle state of a transfer authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthorizationState {
    /// Issued by the vault, not yet executed.
    Issued,
    /// Executed by the ledger. **Irreversible.**
    Consumed,
}

impl std::fmt::Display for AuthorizationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Issued => write!(f, "ISSUED"),
            Self::Consumed => write!(f, "CONSUMED"),
        }
    }
}

/// A request to move `amount` of `asset` from `from` to `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferAuthorization {
    pub id: AuthorizationId,
    pub asset: AssetId,
    pub from: Identity,
    pub to: Identity,
    pub amount: u64,
    pub state: AuthorizationState,
    pub issued_at: DateTime<Utc>,
}

impl TransferAuthorization {
    #[must_use]
    pub fn new(asset: AssetId, from: Identity, to: Identity, amount: u64) -> Self {
        Self {
            id: AuthorizationId::new(),
            asset,
            from,
            to,
            amount,
            state: AuthorizationState::Issued,
            issued_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn is_consumed(&self) -> bool {
        self.state == AuthorizationState::Consumed
    }

    /// Transition to CONSUMED.
    ///
    /// # Errors
    /// `AuthorizationConsumed` if it already was.
    pub fn mark_consumed(&mut self) -> Result<()> {
        if self.is_consumed() {
            return Err(DuelVaultError::AuthorizationConsumed(self.id));
        }
        self.state = AuthorizationState::Consumed;
        Ok(())
    }
}

//! # Duel records and their lifecycle
//!
//! ## State Machine
//!
//! ```text
//!   ┌────────────────┐ join  ┌────────┐ start  ┌────────┐ distribute  ┌───────────┐
//!   │ AWAITING_JOINER├──────▶│ JOINED ├───────▶│ ACTIVE ├────────────▶│ COMPLETED │
//!   └────────────────┘       └────────┘        └────────┘             └───────────┘
//! ```
//!
//! Transitions are **forward-only** and move exactly one step. The stage
//! carries the fields that only exist from that step on, so a winner cannot
//! be read off a duel that has not completed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AssetId, DuelId, DuelVaultError, Identity, Result, constants};

/// Flat lifecycle status, derived from [`DuelStage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum DuelStatus {
    /// Created by the organizer, waiting for a counterparty.
    AwaitingJoiner,
    /// Counterparty bound. No funds moved yet.
    Joined,
    /// Both stakes are in vault custody.
    Active,
    /// Payouts pushed. Terminal.
    Completed,
}

impl std::fmt::Display for DuelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AwaitingJoiner => write!(f, "AWAITING_JOINER"),
            Self::Joined => write!(f, "JOINED"),
            Self::Active => write!(f, "ACTIVE"),
            Self::Completed => write!(f, "COMPLETED"),
        }
    }
}

/// The three amounts a pooled stake is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub winner_amount: u64,
    pub company_amount: u64,
    pub pool_amount: u64,
}

impl Payout {
    /// Sum of all three cuts. `None` on overflow.
    #[must_use]
    pub fn total(&self) -> Option<u64> {
        self.winner_amount
            .checked_add(self.company_amount)?
            .checked_add(self.pool_amount)
    }
}

/// Funds the vault holds on behalf of one active duel.
///
/// The asset is pinned here when the stakes are pulled, so payouts go out in
/// the same asset that came in even if the registry's asset changes while
/// the duel is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelCustody {
    pub duel_id: DuelId,
    pub asset: AssetId,
    /// Pooled amount: both stakes.
    pub amount: u64,
}

/// Lifecycle stage with the fields that exist from that stage on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuelStage {
    AwaitingJoiner,
    Joined { joiner: Identity },
    Active { joiner: Identity },
    Completed {
        joiner: Identity,
        winner: Identity,
        payout: Payout,
    },
}

impl DuelStage {
    #[must_use]
    pub fn status(&self) -> DuelStatus {
        match self {
            Self::AwaitingJoiner => DuelStatus::AwaitingJoiner,
            Self::Joined { .. } => DuelStatus::Joined,
            Self::Active { .. } => DuelStatus::Active,
            Self::Completed { .. } => DuelStatus::Completed,
        }
    }
}

/// One wagering match between a host and a joiner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelRecord {
    /// Sequential id, assigned at creation.
    pub id: DuelId,
    /// The party the organizer created the duel for.
    pub host: Identity,
    /// Stake per party, in the asset's smallest unit. Immutable.
    pub wager_amount: u64,
    /// Current lifecycle stage.
    pub stage: DuelStage,
    /// When the organizer created the duel.
    pub created_at: DateTime<Utc>,
}

impl DuelRecord {
    #[must_use]
    pub fn new(id: DuelId, host: Identity, wager_amount: u64) -> Self {
        Self {
            id,
            host,
            wager_amount,
            stage: DuelStage::AwaitingJoiner,
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn status(&self) -> DuelStatus {
        self.stage.status()
    }

    /// The bound counterparty, once joined.
    #[must_use]
    pub fn joiner(&self) -> Option<Identity> {
        match &self.stage {
            DuelStage::AwaitingJoiner => None,
            DuelStage::Joined { joiner }
            | DuelStage::Active { joiner }
            | DuelStage::Completed { joiner, .. } => Some(*joiner),
        }
    }

    /// The declared winner, once completed.
    #[must_use]
    pub fn winner(&self) -> Option<Identity> {
        match &self.stage {
            DuelStage::Completed { winner, .. } => Some(*winner),
            _ => None,
        }
    }

    /// The settled payout, once completed.
    #[must_use]
    pub fn payout(&self) -> Option<Payout> {
        match &self.stage {
            DuelStage::Completed { payout, .. } => Some(*payout),
            _ => None,
        }
    }

    /// Is `who` the host or the bound joiner?
    #[must_use]
    pub fn is_party(&self, who: &Identity) -> bool {
        self.host == *who || self.joiner().as_ref() == Some(who)
    }

    /// Both stakes together.
    ///
    /// # Errors
    /// `ArithmeticOverflow` if `2 × wager` does not fit in a `u64`.
    pub fn pooled_amount(&self) -> Result<u64> {
        self.wager_amount
            .checked_mul(constants::PARTIES_PER_DUEL)
            .ok_or_else(|| {
                DuelVaultError::ArithmeticOverflow(format!(
                    "pooled stake of {} with wager {}",
                    self.id, self.wager_amount
                ))
            })
    }

    fn wrong_state(&self, expected: DuelStatus) -> DuelVaultError {
        DuelVaultError::WrongState {
            duel: self.id,
            expected,
            actual: self.status(),
        }
    }

    /// `AwaitingJoiner → Joined`.
    ///
    /// # Errors
    /// `AlreadyJoined` if the duel has left `AwaitingJoiner`.
    pub fn join(&mut self, joiner: Identity) -> Result<()> {
        if self.status() != DuelStatus::AwaitingJoiner {
            return Err(DuelVaultError::AlreadyJoined(self.id));
        }
        self.stage = DuelStage::Joined { joiner };
        Ok(())
    }

    /// `Joined → Active`.
    ///
    /// # Errors
    /// `WrongState` unless the duel is `Joined`.
    pub fn activate(&mut self) -> Result<()> {
        match self.stage {
            DuelStage::Joined { joiner } => {
                self.stage = DuelStage::Active { joiner };
                Ok(())
            }
            _ => Err(self.wrong_state(DuelStatus::Joined)),
        }
    }

    /// `Active → Completed`.
    ///
    /// # Errors
    /// - `AlreadyCompleted` if the duel is already `Completed`
    /// - `WrongState` if it is not `Active`
    /// - `InvalidWinner` if `winner` is not a party to the duel
    pub fn complete(&mut self, winner: Identity, payout: Payout) -> Result<()> {
        let joiner = match self.stage {
            DuelStage::Active { joiner } => joiner,
            DuelStage::Completed { .. } => return Err(DuelVaultError::AlreadyCompleted(self.id)),
            _ => return Err(self.wrong_state(DuelStatus::Active)),
        };
        if winner != self.host && winner != joiner {
            return Err(DuelVaultError::InvalidWinner {
                duel: self.id,
                winner,
            });
        }
        self.stage = DuelStage::Completed {
            joiner,
            winner,
            payout,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_duel() -> (DuelRecord, Identity, Identity) {
        let host = Identity::random();
        let joiner = Identity::random();
        (DuelRecord::new(DuelId(0), host, 1_000_000), host, joiner)
    }

    fn payout() -> Payout {
        Payout {
            winner_amount: 1_800_000,
            company_amount: 100_000,
            pool_amount: 100_000,
        }
    }

    #[test]
    fn new_duel_awaits_joiner() {
        let (duel, host, _) = make_duel();
        assert_eq!(duel.status(), DuelStatus::AwaitingJoiner);
        assert_eq!(duel.host, host);
        assert_eq!(duel.joiner(), None);
        assert_eq!(duel.winner(), None);
    }

    #[test]
    fn full_lifecycle() {
        let (mut duel, host, joiner) = make_duel();
        duel.join(joiner).unwrap();
        assert_eq!(duel.status(), DuelStatus::Joined);
        assert_eq!(duel.joiner(), Some(joiner));

        duel.activate().unwrap();
        assert_eq!(duel.status(), DuelStatus::Active);

        duel.complete(host, payout()).unwrap();
        assert_eq!(duel.status(), DuelStatus::Completed);
        assert_eq!(duel.winner(), Some(host));
        assert_eq!(duel.payout(), Some(payout()));
        assert_eq!(duel.joiner(), Some(joiner));
    }

    #[test]
    fn second_join_fails() {
        let (mut duel, _, joiner) = make_duel();
        duel.join(joiner).unwrap();
        let err = duel.join(Identity::random()).unwrap_err();
        assert!(matches!(err, DuelVaultError::AlreadyJoined(DuelId(0))));
        assert_eq!(duel.joiner(), Some(joiner));
    }

    #[test]
    fn activate_requires_joined() {
        let (mut duel, _, _) = make_duel();
        let err = duel.activate().unwrap_err();
        assert!(matches!(
            err,
            DuelVaultError::WrongState {
                expected: DuelStatus::Joined,
                actual: DuelStatus::AwaitingJoiner,
                ..
            }
        ));
    }

    #[test]
    fn complete_twice_fails() {
        let (mut duel, host, joiner) = make_duel();
        duel.join(joiner).unwrap();
        duel.activate().unwrap();
        duel.complete(joiner, payout()).unwrap();
        let err = duel.complete(host, payout()).unwrap_err();
        assert!(matches!(err, DuelVaultError::AlreadyCompleted(_)));
        assert_eq!(duel.winner(), Some(joiner));
    }

    #[test]
    fn complete_rejects_outsider() {
        let (mut duel, _, joiner) = make_duel();
        duel.join(joiner).unwrap();
        duel.activate().unwrap();
        let err = duel.complete(Identity::random(), payout()).unwrap_err();
        assert!(matches!(err, DuelVaultError::InvalidWinner { .. }));
        assert_eq!(duel.status(), DuelStatus::Active);
    }

    #[test]
    fn is_party() {
        let (mut duel, host, joiner) = make_duel();
        assert!(duel.is_party(&host));
        assert!(!duel.is_party(&joiner));
        duel.join(joiner).unwrap();
        assert!(duel.is_party(&joiner));
        assert!(!duel.is_party(&Identity::random()));
    }

    #[test]
    fn pooled_amount_doubles_wager() {
        let (duel, _, _) = make_duel();
        assert_eq!(duel.pooled_amount().unwrap(), 2_000_000);

        let huge = DuelRecord::new(DuelId(1), Identity::random(), u64::MAX);
        assert!(matches!(
            huge.pooled_amount(),
            Err(DuelVaultError::ArithmeticOverflow(_))
        ));
    }

    #[test]
    fn payout_total() {
        assert_eq!(payout().total(), Some(2_000_000));
        let overflow = Payout {
            winner_amount: u64::MAX,
            company_amount: 1,
            pool_amount: 0,
        };
        assert_eq!(overflow.total(), None);
    }

    #[test]
    fn serde_roundtrip() {
        let (mut duel, host, joiner) = make_duel();
        duel.join(joiner).unwrap();
        duel.activate().unwrap();
        duel.complete(host, payout()).unwrap();
        let json = serde_json::to_string(&duel).unwrap();
        let back: DuelRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(duel, back);
    }
}

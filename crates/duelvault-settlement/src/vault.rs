//! Vault controller: pulls stakes into custody and pushes payouts out.
//!
//! The vault owns no key. Its identity is derived from the program identity
//! and the ledger recognizes it in two roles:
//! - as the delegate each party approved before the duel starts, and
//! - as owner of the pooled vault account payouts are pushed from.
//!
//! The pooled account is shared by every duel. A [`DuelCustody`] entry per
//! active duel records exactly what was pulled for it, and a push must
//! match that entry, so one duel can never pay out another duel's stakes.

use std::collections::BTreeMap;

use duelvault_ledger::AssetLedger;
use duelvault_types::{
    AssetId, DuelCustody, DuelId, DuelVaultError, Identity, Payout, Result,
    TransferAuthorization, constants,
};

/// Where the three settlement cuts are paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayoutRecipients {
    pub winner: Identity,
    pub company: Identity,
    pub pool: Identity,
}

/// Keyless custodian of pooled stakes.
#[derive(Debug)]
pub struct VaultController {
    /// Derived vault identity.
    identity: Identity,
    /// Funds held per active duel.
    custody: BTreeMap<DuelId, DuelCustody>,
}

impl VaultController {
    /// The vault for `program_id`.
    #[must_use]
    pub fn derive(program_id: &Identity) -> Self {
        Self {
            identity: Identity::derive(&[constants::VAULT_SEED], program_id),
            custody: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn identity(&self) -> Identity {
        self.identity
    }

    /// Pull `wager` from each of `host` and `joiner` into custody for `duel`.
    ///
    /// Both pulls execute as one ledger batch: either both stakes move or
    /// neither does.
    ///
    /// # Errors
    /// - `VaultAsParty` if either party is the vault itself
    /// - `CustodyMismatch` if the vault already holds funds for `duel`
    /// - `ArithmeticOverflow` if `2 × wager` overflows
    /// - `InsufficientFunds` / `InsufficientAllowance` from the ledger
    pub fn pull_stakes<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        duel: DuelId,
        asset: AssetId,
        host: Identity,
        joiner: Identity,
        wager: u64,
    ) -> Result<DuelCustody> {
        // A vault-to-vault pull is owner-signed and moves nothing.
        if let Some(party) = [host, joiner].into_iter().find(|p| *p == self.identity) {
            return Err(DuelVaultError::VaultAsParty(party));
        }
        if self.custody.contains_key(&duel) {
            return Err(DuelVaultError::CustodyMismatch {
                duel,
                reason: "stakes already in custody".into(),
            });
        }
        let pooled = wager
            .checked_mul(constants::PARTIES_PER_DUEL)
            .ok_or_else(|| DuelVaultError::ArithmeticOverflow(format!("pooled stake of {duel}")))?;

        let mut batch = [
            TransferAuthorization::new(asset, host, self.identity, wager),
            TransferAuthorization::new(asset, joiner, self.identity, wager),
        ];
        ledger.execute(&self.identity, &mut batch)?;

        let custody = DuelCustody {
            duel_id: duel,
            asset,
            amount: pooled,
        };
        self.custody.insert(duel, custody.clone());

        tracing::info!(
            %duel,
            %asset,
            host = %host.short(),
            joiner = %joiner.short(),
            pooled,
            "Stakes pulled into vault custody"
        );
        Ok(custody)
    }

    /// Push `payout` for `duel` out of custody.
    ///
    /// The payout must account for exactly the amount held for the duel.
    /// All three transfers execute as one ledger batch, in the asset pinned
    /// when the stakes were pulled.
    ///
    /// # Errors
    /// - `CustodyMismatch` if nothing is held for `duel` or the payout total
    ///   differs from the held amount
    /// - any ledger error (custody is kept on failure)
    pub fn push_payout<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        duel: DuelId,
        recipients: &PayoutRecipients,
        payout: &Payout,
    ) -> Result<()> {
        let custody = self
            .custody
            .get(&duel)
            .ok_or_else(|| DuelVaultError::CustodyMismatch {
                duel,
                reason: "no stakes in custody".into(),
            })?;

        if payout.total() != Some(custody.amount) {
            return Err(DuelVaultError::CustodyMismatch {
                duel,
                reason: format!(
                    "payout {:?} does not match held amount {}",
                    payout.total(),
                    custody.amount
                ),
            });
        }

        let asset = custody.asset;
        let mut batch = [
            TransferAuthorization::new(asset, self.identity, recipients.winner, payout.winner_amount),
            TransferAuthorization::new(asset, self.identity, recipients.company, payout.company_amount),
            TransferAuthorization::new(asset, self.identity, recipients.pool, payout.pool_amount),
        ];
        ledger.execute(&self.identity, &mut batch)?;

        self.custody.remove(&duel);

        tracing::info!(
            %duel,
            %asset,
            winner = %recipients.winner.short(),
            winner_amount = payout.winner_amount,
            company_amount = payout.company_amount,
            pool_amount = payout.pool_amount,
            "Payout pushed from vault custody"
        );
        Ok(())
    }

    /// Custody held for `duel`, if it is active.
    #[must_use]
    pub fn custody(&self, duel: DuelId) -> Option<&DuelCustody> {
        self.custody.get(&duel)
    }

    /// Total of `asset` held across all active duels.
    #[must_use]
    pub fn held(&self, asset: &AssetId) -> u64 {
        self.custody
            .values()
            .filter(|c| c.asset == *asset)
            .fold(0u64, |acc, c| acc.saturating_add(c.amount))
    }

    /// Number of duels with funds in custody.
    #[must_use]
    pub fn active_custody_count(&self) -> usize {
        self.custody.len()
    }

    /// Check the vault's ledger account covers every custody entry.
    ///
    /// # Errors
    /// `SupplyInvariantViolation` if the ledger holds less than custody says.
    pub fn verify_backing<L: AssetLedger>(&self, ledger: &L, asset: &AssetId) -> Result<()> {
        let held = self.held(asset);
        let balance = ledger.balance(&self.identity, asset);
        if balance < held {
            return Err(DuelVaultError::SupplyInvariantViolation {
                reason: format!("vault holds {balance} of {asset} but custody records {held}"),
            });
        }
        Ok(())
    }
}

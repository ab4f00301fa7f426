//! # Duel lifecycle manager
//!
//! Drives a duel through `AWAITING_JOINER → JOINED → ACTIVE → COMPLETED`.
//!
//! Every operation takes the current [`FeeConfig`] and the ledger
//! explicitly. Guards run first; fund-moving steps advance a copy of the
//! record, move the funds, and only then commit the copy, so a failed
//! ledger batch leaves the record untouched.

use duelvault_ledger::AssetLedger;
use duelvault_settlement::{PayoutRecipients, VaultController, settle};
use duelvault_types::{
    DuelCustody, DuelId, DuelRecord, DuelStatus, DuelVaultError, FeeConfig, Identity, Payout,
    Result,
};

use crate::duel_store::DuelStore;
use crate::guard;

/// Duel records plus the vault that holds their stakes.
#[derive(Debug)]
pub struct DuelManager {
    store: DuelStore,
    vault: VaultController,
}

impl DuelManager {
    /// Manager whose vault is derived from `program_id`.
    #[must_use]
    pub fn new(program_id: &Identity) -> Self {
        Self {
            store: DuelStore::new(),
            vault: VaultController::derive(program_id),
        }
    }

    #[must_use]
    pub fn store(&self) -> &DuelStore {
        &self.store
    }

    #[must_use]
    pub fn vault(&self) -> &VaultController {
        &self.vault
    }

    /// Owner creates a duel for `host`. No funds move.
    pub fn create<L: AssetLedger>(
        &mut self,
        config: &FeeConfig,
        ledger: &L,
        caller: &Identity,
        host: Identity,
        wager_amount: u64,
    ) -> Result<DuelId> {
        guard::require_owner(config, caller, "create_duel")?;
        guard::require_not_vault(config, &host)?;
        if wager_amount == 0 {
            return Err(DuelVaultError::InvalidAmount(wager_amount));
        }
        guard::require_funds(ledger, &host, &config.asset, wager_amount)?;

        Ok(self.store.create(host, wager_amount))
    }

    /// `caller` joins as the counterparty. No funds move.
    pub fn join<L: AssetLedger>(
        &mut self,
        config: &FeeConfig,
        ledger: &L,
        caller: Identity,
        duel_id: DuelId,
    ) -> Result<&DuelRecord> {
        let duel = self.store.get(duel_id)?;
        guard::require_joinable(duel)?;
        guard::require_not_host(duel, &caller)?;
        guard::require_not_vault(config, &caller)?;
        guard::require_funds(ledger, &caller, &config.asset, duel.wager_amount)?;

        let duel = self.store.get_mut(duel_id)?;
        duel.join(caller)?;
        Ok(duel)
    }

    /// Owner starts a joined duel: both stakes move into vault custody in
    /// the registry's current asset.
    pub fn start<L: AssetLedger>(
        &mut self,
        config: &FeeConfig,
        ledger: &mut L,
        caller: &Identity,
        duel_id: DuelId,
    ) -> Result<DuelCustody> {
        guard::require_owner(config, caller, "start_duel")?;
        let duel = self.store.get(duel_id)?;
        guard::require_status(duel, DuelStatus::Joined)?;
        let joiner = duel.joiner().ok_or_else(|| {
            DuelVaultError::Internal(format!("{duel_id} is joined without a joiner"))
        })?;

        let mut next = duel.clone();
        next.activate()?;
        let custody = self.vault.pull_stakes(
            ledger,
            duel_id,
            config.asset,
            next.host,
            joiner,
            next.wager_amount,
        )?;
        self.store.commit(next)?;
        Ok(custody)
    }

    /// Owner declares `winner` and the pooled stake is paid out with the
    /// percentages and beneficiaries current right now.
    pub fn distribute<L: AssetLedger>(
        &mut self,
        config: &FeeConfig,
        ledger: &mut L,
        caller: &Identity,
        duel_id: DuelId,
        winner: Identity,
    ) -> Result<Payout> {
        guard::require_owner(config, caller, "distribute_rewards")?;
        let duel = self.store.get(duel_id)?;
        guard::require_settleable(duel)?;
        guard::require_party(duel, &winner)?;

        let pooled = duel.pooled_amount()?;
        let held = self.vault.custody(duel_id).map(|c| c.amount);
        if held != Some(pooled) {
            return Err(DuelVaultError::CustodyMismatch {
                duel: duel_id,
                reason: format!("expected {pooled} in custody, found {held:?}"),
            });
        }

        let payout = settle(pooled, config.company_percentage, config.pool_percentage)?;
        if payout.total() != Some(pooled) {
            return Err(DuelVaultError::SupplyInvariantViolation {
                reason: format!("payout {payout:?} does not sum to pooled {pooled}"),
            });
        }

        let mut next = duel.clone();
        next.complete(winner, payout)?;
        let recipients = PayoutRecipients {
            winner,
            company: config.company,
            pool: config.pool,
        };
        self.vault.push_payout(ledger, duel_id, &recipients, &payout)?;
        self.store.commit(next)?;
        Ok(payout)
    }
}

//! In-memory token ledger.
//!
//! Tracks per-(owner, asset) [`TokenAccount`]s with a single delegate each,
//! the way token programs model `approve`. Batches are validated in full
//! before any balance is touched, so a failing batch leaves every account
//! and every authorization exactly as it was.

use std::collections::{HashMap, HashSet};

use duelvault_types::{
    AssetId, Delegation, DuelVaultError, Identity, Result, TokenAccount, TransferAuthorization,
};

use crate::ledger::AssetLedger;
use crate::supply_conservation::SupplyConservation;

/// Balances and delegations for any number of assets.
#[derive(Debug, Default)]
pub struct TokenLedger {
    /// Per-(owner, asset) accounts.
    accounts: HashMap<(Identity, AssetId), TokenAccount>,
    /// Mint totals for the conservation check.
    supply: SupplyConservation,
}

impl TokenLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `amount` new units in `owner`'s account.
    ///
    /// # Errors
    /// `ArithmeticOverflow` if the asset's supply would exceed `u64`.
    pub fn mint_to(&mut self, owner: Identity, asset: AssetId, amount: u64) -> Result<()> {
        self.supply.record_mint(&asset, amount)?;
        // Any single balance is bounded by the asset's total supply.
        self.accounts.entry((owner, asset)).or_default().amount += amount;
        tracing::debug!(owner = %owner.short(), %asset, amount, "Minted");
        Ok(())
    }

    /// Let `spender` move up to `amount` out of `owner`'s account. Replaces
    /// any previous delegate; an amount of zero clears the delegation.
    pub fn approve(&mut self, owner: Identity, asset: AssetId, spender: Identity, amount: u64) {
        let account = self.accounts.entry((owner, asset)).or_default();
        account.delegate = (amount > 0).then_some(Delegation {
            spender,
            allowance: amount,
        });
        tracing::debug!(
            owner = %owner.short(),
            spender = %spender.short(),
            %asset,
            amount,
            "Delegation approved"
        );
    }

    /// Clear `owner`'s delegation.
    pub fn revoke(&mut self, owner: Identity, asset: AssetId) {
        if let Some(account) = self.accounts.get_mut(&(owner, asset)) {
            account.delegate = None;
        }
    }

    /// Snapshot of an account (default if it does not exist).
    #[must_use]
    pub fn account(&self, owner: &Identity, asset: &AssetId) -> TokenAccount {
        self.accounts
            .get(&(*owner, *asset))
            .cloned()
            .unwrap_or_default()
    }

    /// Sum of all balances of an asset.
    #[must_use]
    pub fn total_supply(&self, asset: &AssetId) -> u64 {
        self.accounts
            .iter()
            .filter(|((_, a), _)| a == asset)
            .fold(0u64, |acc, (_, account)| acc.saturating_add(account.amount))
    }

    /// Verify supply conservation for `asset`.
    ///
    /// # Errors
    /// `SupplyInvariantViolation` if balances do not sum to what was minted.
    pub fn verify_supply(&self, asset: &AssetId) -> Result<()> {
        self.supply.verify(asset, self.total_supply(asset))
    }

    /// Verify supply conservation for every asset ever minted.
    ///
    /// # Errors
    /// The first `SupplyInvariantViolation` found.
    pub fn verify_all_supply(&self) -> Result<()> {
        self.supply
            .tracked_assets()
            .iter()
            .try_for_each(|asset| self.verify_supply(asset))
    }

    /// Check a whole batch against current balances and allowances.
    fn validate_batch(&self, authority: &Identity, batch: &[TransferAuthorization]) -> Result<()> {
        let mut seen = HashSet::with_capacity(batch.len());
        let mut debits: HashMap<(Identity, AssetId), u64> = HashMap::new();

        for auth in batch {
            if auth.is_consumed() || !seen.insert(auth.id) {
                return Err(DuelVaultError::AuthorizationConsumed(auth.id));
            }

            let key = (auth.from, auth.asset);
            let debit = debits.entry(key).or_insert(0);
            *debit = debit.checked_add(auth.amount).ok_or_else(|| {
                DuelVaultError::ArithmeticOverflow(format!(
                    "batch debit from {}",
                    auth.from.short()
                ))
            })?;

            let account = self.accounts.get(&key);
            let available = account.map_or(0, |a| a.amount);
            if available < *debit {
                return Err(DuelVaultError::InsufficientFunds {
                    needed: *debit,
                    available,
                });
            }

            if auth.from != *authority {
                let approved = account.map_or(0, |a| a.allowance_for(authority));
                if approved < *debit {
                    return Err(DuelVaultError::InsufficientAllowance {
                        needed: *debit,
                        approved,
                    });
                }
            }
        }
        Ok(())
    }
}

impl AssetLedger for TokenLedger {
    fn balance(&self, owner: &Identity, asset: &AssetId) -> u64 {
        self.accounts
            .get(&(*owner, *asset))
            .map_or(0, |a| a.amount)
    }

    fn allowance(&self, owner: &Identity, asset: &AssetId, spender: &Identity) -> u64 {
        self.accounts
            .get(&(*owner, *asset))
            .map_or(0, |a| a.allowance_for(spender))
    }

    fn execute(
        &mut self,
        authority: &Identity,
        batch: &mut [TransferAuthorization],
    ) -> Result<()> {
        self.validate_batch(authority, batch)?;

        for auth in batch.iter_mut() {
            if let Some(from) = self.accounts.get_mut(&(auth.from, auth.asset)) {
                from.amount -= auth.amount;
                if auth.from != *authority {
                    from.consume_allowance(auth.amount);
                }
            }
            self.accounts
                .entry((auth.to, auth.asset))
                .or_default()
                .amount += auth.amount;
            auth.mark_consumed()?;
        }

        tracing::debug!(
            authority = %authority.short(),
            transfers = batch.len(),
            total = batch.iter().map(|a| u128::from(a.amount)).sum::<u128>(),
            "Transfer batch executed"
        );
        Ok(())
    }
}

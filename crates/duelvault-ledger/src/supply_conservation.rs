//! Supply conservation invariant checker.
//!
//! Invariant enforced by the ledger:
//! ```text
//! ∀ asset: Σ(account balances) == Σ(minted)
//! ```
//!
//! Stakes, custody and payouts only move balances between accounts. If the
//! sum ever drifts from what was minted, funds were created or destroyed.

use std::collections::{BTreeSet, HashMap};

use duelvault_types::{AssetId, DuelVaultError, Result};

/// Tracks per-asset mint totals and validates conservation.
#[derive(Debug, Default)]
pub struct SupplyConservation {
    /// Total minted per asset since genesis.
    minted: HashMap<AssetId, u64>,
}

impl SupplyConservation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a mint.
    ///
    /// # Errors
    /// `ArithmeticOverflow` if the asset's total supply would exceed `u64`.
    pub fn record_mint(&mut self, asset: &AssetId, amount: u64) -> Result<()> {
        let total = self.minted.entry(*asset).or_insert(0);
        *total = total.checked_add(amount).ok_or_else(|| {
            DuelVaultError::ArithmeticOverflow(format!("total supply of {asset}"))
        })?;
        Ok(())
    }

    /// Expected total supply for an asset.
    #[must_use]
    pub fn expected_supply(&self, asset: &AssetId) -> u64 {
        self.minted.get(asset).copied().unwrap_or(0)
    }

    /// Verify that the actual supply (sum of all balances) matches what was
    /// minted.
    ///
    /// # Errors
    /// Returns [`DuelVaultError::SupplyInvariantViolation`] if actual ≠ expected.
    pub fn verify(&self, asset: &AssetId, actual_supply: u64) -> Result<()> {
        let expected = self.expected_supply(asset);
        if actual_supply != expected {
            return Err(DuelVaultError::SupplyInvariantViolation {
                reason: format!(
                    "Asset {asset}: actual supply {actual_supply} != minted {expected}"
                ),
            });
        }
        Ok(())
    }

    /// All assets ever minted, in a stable order.
    #[must_use]
    pub fn tracked_assets(&self) -> Vec<AssetId> {
        self.minted.keys().copied().collect::<BTreeSet<_>>().into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_supply_is_zero() {
        let sc = SupplyConservation::new();
        let asset = AssetId::random();
        assert_eq!(sc.expected_supply(&asset), 0);
        assert!(sc.verify(&asset, 0).is_ok());
    }

    #[test]
    fn mints_accumulate() {
        let mut sc = SupplyConservation::new();
        let asset = AssetId::random();
        sc.record_mint(&asset, 1_000).unwrap();
        sc.record_mint(&asset, 500).unwrap();
        assert_eq!(sc.expected_supply(&asset), 1_500);
    }

    #[test]
    fn verify_fails_when_imbalanced() {
        let mut sc = SupplyConservation::new();
        let asset = AssetId::random();
        sc.record_mint(&asset, 10).unwrap();
        let err = sc.verify(&asset, 11).unwrap_err();
        assert!(matches!(
            err,
            DuelVaultError::SupplyInvariantViolation { .. }
        ));
    }

    #[test]
    fn mint_overflow_rejected() {
        let mut sc = SupplyConservation::new();
        let asset = AssetId::random();
        sc.record_mint(&asset, u64::MAX).unwrap();
        let err = sc.record_mint(&asset, 1).unwrap_err();
        assert!(matches!(err, DuelVaultError::ArithmeticOverflow(_)));
        assert_eq!(sc.expected_supply(&asset), u64::MAX);
    }

    #[test]
    fn multiple_assets_independent() {
        let mut sc = SupplyConservation::new();
        let a = AssetId::random();
        let b = AssetId::random();
        sc.record_mint(&a, 5).unwrap();
        sc.record_mint(&b, 50_000).unwrap();
        assert!(sc.verify(&a, 5).is_ok());
        assert!(sc.verify(&b, 50_000).is_ok());
        assert_eq!(sc.tracked_assets().len(), 2);
    }
}

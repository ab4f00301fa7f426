//! The asset-ledger trait.

use duelvault_types::{AssetId, Identity, Result, TransferAuthorization};

/// Capability the engine needs from the fungible-asset ledger.
///
/// The engine never assumes how balances are stored; it only reads them and
/// hands over explicit transfer authorizations.
pub trait AssetLedger {
    /// Balance of `owner` in `asset`. Zero for unknown accounts.
    fn balance(&self, owner: &Identity, asset: &AssetId) -> u64;

    /// Amount `spender` may still move out of `owner`'s `asset` account.
    fn allowance(&self, owner: &Identity, asset: &AssetId, spender: &Identity) -> u64;

    /// Execute a batch of transfers on behalf of `authority`, all or nothing.
    ///
    /// An entry whose `from` equals `authority` is owner-signed. Any other
    /// entry must be covered by `from`'s delegated allowance to `authority`.
    /// On success every entry is CONSUMED; on failure nothing changes,
    /// including the entries' state.
    ///
    /// # Errors
    /// - `AuthorizationConsumed` if any entry was already executed
    /// - `InsufficientFunds` if a source account cannot cover its debits
    /// - `InsufficientAllowance` if a delegated debit is not covered
    fn execute(&mut self, authority: &Identity, batch: &mut [TransferAuthorization])
    -> Result<()>;
}

//! # duelvault-ledger
//!
//! **Asset ledger seam**: the engine's only view of fungible-asset balances.
//!
//! ## Architecture
//!
//! 1. **AssetLedger**: trait the vault talks to: balances, allowances, and
//!    all-or-nothing execution of [`TransferAuthorization`] batches
//! 2. **TokenLedger**: in-memory implementation with mint / approve / revoke
//! 3. **SupplyConservation**: per-asset mint totals checked against the sum
//!    of all balances
//!
//! ## Transfer Flow
//!
//! ```text
//! Vault issues TransferAuthorization[] → AssetLedger.execute(authority, batch)
//!     → validate every entry → apply every entry → mark every entry CONSUMED
//! ```
//!
//! [`TransferAuthorization`]: duelvault_types::TransferAuthorization

pub mod ledger;
pub mod supply_conservation;
pub mod token_ledger;

pub use ledger::AssetLedger;
pub use supply_conservation::SupplyConservation;
pub use token_ledger::TokenLedger;

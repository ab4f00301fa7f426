//! # duelvault-settlement
//!
//! **Settlement plane**: partitioning pooled stakes and moving funds in and
//! out of vault custody.
//!
//! ## Architecture
//!
//! - **calculator**: pure function splitting a pooled amount into winner,
//!   company and pool cuts. Remainders go to the winner.
//! - **VaultController**: the keyless custodian. Pulls both stakes into the
//!   vault at start, pushes the three payouts at settlement, and keeps one
//!   custody entry per active duel so concurrent duels never share funds.
//!
//! Every fund movement is one atomic ledger batch of single-use
//! [`TransferAuthorization`]s.
//!
//! [`TransferAuthorization`]: duelvault_types::TransferAuthorization

pub mod calculator;
pub mod vault;

pub use calculator::settle;
pub use vault::{PayoutRecipients, VaultController};

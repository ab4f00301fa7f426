//! # duelvault-engine
//!
//! The **DuelVault** wager escrow engine.
//!
//! Two parties each stake the same amount of a fungible asset into a keyless
//! vault. The registry owner declares a winner and the pooled stake is split
//! between the winner and two fee beneficiaries.
//!
//! - [`DuelEngine`]: facade over every operation, appends to the event log
//! - [`FeeRegistry`]: singleton fee configuration, owner-only updates
//! - [`DuelManager`]: duel lifecycle over the duel store and vault
//! - [`DuelStore`]: arena of duel records, index = id
//! - [`EventLog`]: append-only record of committed operations
//! - [`guard`]: caller and state checks run before any mutation
//!
//! ## Duel Lifecycle
//!
//! ```text
//!  create_duel      join_duel       start_duel           distribute_rewards
//!  ──────────▶ AWAITING_JOINER ──▶ JOINED ──▶ ACTIVE ──────────────────▶ COMPLETED
//!                                     stakes pulled       payouts pushed
//!                                     into custody        out of custody
//! ```
//!
//! ## Safety Properties
//!
//! 1. **Fund conservation**: `winner + company + pool == 2 × wager` for every
//!    settled duel, and ledger supply never changes outside mints.
//! 2. **Single-use authorization**: every transfer the vault requests is a
//!    one-shot [`TransferAuthorization`](duelvault_types::TransferAuthorization).
//! 3. **Forward-only lifecycle**: no status is skipped or revisited.
//! 4. **All-or-nothing**: a failed call changes neither engine nor ledger.
//! 5. **Vault stays out of play**: the vault is never a party, and only the
//!    engine signs ledger batches as the vault.

pub mod duel_store;
pub mod engine;
pub mod event_log;
pub mod guard;
pub mod lifecycle;
pub mod registry;

pub use duel_store::DuelStore;
pub use engine::DuelEngine;
pub use event_log::EventLog;
pub use lifecycle::DuelManager;
pub use registry::{FeeRegistry, RegistrySetup};

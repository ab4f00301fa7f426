//! # DuelEngine
//!
//! Single entry point for every operation. Each call names its caller
//! explicitly, runs to completion or fails with no effect, and on success
//! appends exactly one event to the log.
//!
//! ```text
//!   caller ──▶ DuelEngine ──▶ guard ──▶ FeeRegistry / DuelManager ──▶ VaultController ──▶ AssetLedger
//!                  │
//!                  └──▶ EventLog (after commit)
//! ```

use duelvault_ledger::{AssetLedger, TokenLedger};
use duelvault_types::{
    AssetId, DeploymentConfig, DuelCustody, DuelId, DuelRecord, DuelVaultError, EngineEvent,
    EventRecord, FeeConfig, Identity, Payout, Result, TransferAuthorization, constants,
};

use crate::event_log::EventLog;
use crate::lifecycle::DuelManager;
use crate::registry::{FeeRegistry, RegistrySetup};

/// The wager escrow engine over an asset ledger `L`.
#[derive(Debug)]
pub struct DuelEngine<L: AssetLedger> {
    program_id: Identity,
    registry: FeeRegistry,
    duels: DuelManager,
    events: EventLog,
    ledger: L,
}

impl<L: AssetLedger> DuelEngine<L> {
    /// An uninitialized engine for `program_id`.
    pub fn new(program_id: Identity, ledger: L) -> Self {
        tracing::info!(
            engine = constants::ENGINE_NAME,
            version = constants::VERSION,
            program = %program_id.short(),
            "DuelEngine created"
        );
        Self {
            program_id,
            registry: FeeRegistry::new(),
            duels: DuelManager::new(&program_id),
            events: EventLog::new(),
            ledger,
        }
    }

    /// Build an engine from a deployment config and initialize it with
    /// `owner` as the registry owner.
    ///
    /// # Errors
    /// `Configuration` if the config does not validate.
    pub fn from_deployment(config: &DeploymentConfig, owner: Identity, ledger: L) -> Result<Self> {
        config.validate()?;
        let mut engine = Self::new(config.program_id, ledger);
        engine.initialize(
            owner,
            config.company_percentage,
            config.pool_percentage,
            config.company,
            config.pool,
            config.asset,
        )?;
        Ok(engine)
    }

    fn record(&mut self, event: EngineEvent) {
        self.events.append(event);
    }

    // ─────────────────────────── Registry ───────────────────────────

    /// Create the fee registry. `caller` becomes the owner.
    pub fn initialize(
        &mut self,
        caller: Identity,
        company_percentage: u8,
        pool_percentage: u8,
        company: Identity,
        pool: Identity,
        asset: AssetId,
    ) -> Result<()> {
        let setup = RegistrySetup {
            company_percentage,
            pool_percentage,
            company,
            pool,
            asset,
        };
        let vault = self.duels.vault().identity();
        let config = self.registry.initialize(caller, setup, vault)?;

        tracing::info!(
            owner = %caller.short(),
            company_percentage,
            pool_percentage,
            %asset,
            vault = %vault.short(),
            "Fee registry initialized"
        );
        let event = EngineEvent::Initialized {
            owner: config.owner,
            company_percentage,
            pool_percentage,
            asset,
            vault,
        };
        self.record(event);
        Ok(())
    }

    pub fn update_company_allocation(&mut self, caller: &Identity, pct: u8) -> Result<()> {
        let (old, new) = self.registry.update_company_allocation(caller, pct)?;
        tracing::info!(old, new, "Company allocation updated");
        self.record(EngineEvent::CompanyAllocationUpdated {
            old_company_percentage: old,
            new_company_percentage: new,
        });
        Ok(())
    }

    pub fn update_pool_allocation(&mut self, caller: &Identity, pct: u8) -> Result<()> {
        let (old, new) = self.registry.update_pool_allocation(caller, pct)?;
        tracing::info!(old, new, "Pool allocation updated");
        self.record(EngineEvent::PoolAllocationUpdated {
            old_pool_percentage: old,
            new_pool_percentage: new,
        });
        Ok(())
    }

    pub fn update_company_address(&mut self, caller: &Identity, company: Identity) -> Result<()> {
        let (old, new) = self.registry.update_company_address(caller, company)?;
        tracing::info!(old = %old.short(), new = %new.short(), "Company address updated");
        self.record(EngineEvent::CompanyAddressUpdated {
            old_company_address: old,
            new_company_address: new,
        });
        Ok(())
    }

    pub fn update_pool_address(&mut self, caller: &Identity, pool: Identity) -> Result<()> {
        let (old, new) = self.registry.update_pool_address(caller, pool)?;
        tracing::info!(old = %old.short(), new = %new.short(), "Pool address updated");
        self.record(EngineEvent::PoolAddressUpdated {
            old_pool_address: old,
            new_pool_address: new,
        });
        Ok(())
    }

    /// Change the asset for duels not yet started.
    pub fn update_token_mint(&mut self, caller: &Identity, asset: AssetId) -> Result<()> {
        let (old, new) = self.registry.update_token_mint(caller, asset)?;
        tracing::info!(%old, %new, "Token mint updated");
        self.record(EngineEvent::TokenMintUpdated {
            old_token_mint: old,
            new_token_mint: new,
        });
        Ok(())
    }

    // ─────────────────────────── Duels ───────────────────────────

    /// Owner creates a duel for `host` staking `wager_amount`.
    pub fn create_duel(
        &mut self,
        caller: &Identity,
        host: Identity,
        wager_amount: u64,
    ) -> Result<DuelId> {
        let config = self.registry.config()?;
        let duel_id = self
            .duels
            .create(config, &self.ledger, caller, host, wager_amount)?;

        tracing::info!(%duel_id, host = %host.short(), wager_amount, "Duel created");
        self.record(EngineEvent::DuelCreated {
            duel_id,
            host,
            wager_amount,
        });
        Ok(duel_id)
    }

    /// `caller` joins `duel_id` as the counterparty.
    pub fn join_duel(&mut self, caller: Identity, duel_id: DuelId) -> Result<()> {
        let config = self.registry.config()?;
        self.duels.join(config, &self.ledger, caller, duel_id)?;

        tracing::info!(%duel_id, joiner = %caller.short(), "Duel joined");
        self.record(EngineEvent::DuelJoined {
            duel_id,
            joiner: caller,
        });
        Ok(())
    }

    /// Owner starts a joined duel, pulling both stakes into the vault.
    pub fn start_duel(&mut self, caller: &Identity, duel_id: DuelId) -> Result<()> {
        let config = self.registry.config()?;
        let custody = self.duels.start(config, &mut self.ledger, caller, duel_id)?;
        let host = self.duels.store().get(duel_id)?.host;

        tracing::info!(
            %duel_id,
            asset = %custody.asset,
            pooled = custody.amount,
            "Duel started"
        );
        self.record(EngineEvent::DuelStarted {
            duel_id,
            host,
            pooled_amount: custody.amount,
        });
        Ok(())
    }

    /// Owner declares `winner` and the pooled stake is paid out.
    pub fn distribute_rewards(
        &mut self,
        caller: &Identity,
        duel_id: DuelId,
        winner: Identity,
    ) -> Result<Payout> {
        let config = self.registry.config()?;
        let payout = self
            .duels
            .distribute(config, &mut self.ledger, caller, duel_id, winner)?;

        tracing::info!(
            %duel_id,
            winner = %winner.short(),
            winner_amount = payout.winner_amount,
            company_amount = payout.company_amount,
            pool_amount = payout.pool_amount,
            "Duel decided"
        );
        self.record(EngineEvent::DuelDecided {
            duel_id,
            winner,
            payout,
        });
        Ok(payout)
    }

    // ─────────────────────────── Accessors ───────────────────────────

    #[must_use]
    pub fn program_id(&self) -> Identity {
        self.program_id
    }

    /// Vault identity parties must approve. Known before initialization.
    #[must_use]
    pub fn vault_identity(&self) -> Identity {
        self.duels.vault().identity()
    }

    pub fn fee_config(&self) -> Result<&FeeConfig> {
        self.registry.config()
    }

    pub fn duel(&self, duel_id: DuelId) -> Result<&DuelRecord> {
        self.duels.store().get(duel_id)
    }

    /// Number of duels ever created; also the next id.
    #[must_use]
    pub fn duel_count(&self) -> u64 {
        self.duels.store().next_id().0
    }

    pub fn duels(&self) -> impl Iterator<Item = &DuelRecord> {
        self.duels.store().iter()
    }

    /// Pooled stake held in custody for an active duel.
    #[must_use]
    pub fn custody(&self, duel_id: DuelId) -> Option<&DuelCustody> {
        self.duels.vault().custody(duel_id)
    }

    #[must_use]
    pub fn events(&self) -> &[EventRecord] {
        self.events.records()
    }

    /// Hashes match payloads and sequences are gapless.
    #[must_use]
    pub fn verify_events(&self) -> bool {
        self.events.verify()
    }

    #[must_use]
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Check the vault's ledger balance covers all custody of `asset`.
    pub fn verify_vault_backing(&self, asset: &AssetId) -> Result<()> {
        self.duels.vault().verify_backing(&self.ledger, asset)
    }
}

// Party-side ledger access. Only the engine signs as the vault, so none of
// these accept the vault identity as the acting account.
impl DuelEngine<TokenLedger> {
    fn reject_vault(&self, who: &Identity) -> Result<()> {
        if *who == self.vault_identity() {
            tracing::warn!(who = %who.short(), "Rejected ledger access as the vault");
            return Err(DuelVaultError::VaultAsParty(*who));
        }
        Ok(())
    }

    /// Mint `amount` of `asset` into `owner`'s account.
    ///
    /// # Errors
    /// `VaultAsParty` for the vault, `ArithmeticOverflow` if supply overflows.
    pub fn fund(&mut self, owner: Identity, asset: AssetId, amount: u64) -> Result<()> {
        self.reject_vault(&owner)?;
        self.ledger.mint_to(owner, asset, amount)
    }

    /// `owner` lets the vault pull up to `amount` of `asset`.
    ///
    /// # Errors
    /// `VaultAsParty` for the vault itself.
    pub fn approve_vault(&mut self, owner: Identity, asset: AssetId, amount: u64) -> Result<()> {
        self.reject_vault(&owner)?;
        let vault = self.vault_identity();
        self.ledger.approve(owner, asset, vault, amount);
        Ok(())
    }

    /// `owner` withdraws its delegation to the vault.
    ///
    /// # Errors
    /// `VaultAsParty` for the vault itself.
    pub fn revoke_vault(&mut self, owner: Identity, asset: AssetId) -> Result<()> {
        self.reject_vault(&owner)?;
        self.ledger.revoke(owner, asset);
        Ok(())
    }

    /// Owner-signed transfer out of `from`'s own account.
    ///
    /// # Errors
    /// `VaultAsParty` if `from` is the vault, otherwise any ledger rejection.
    pub fn transfer(
        &mut self,
        from: Identity,
        to: Identity,
        asset: AssetId,
        amount: u64,
    ) -> Result<()> {
        self.reject_vault(&from)?;
        let mut batch = [TransferAuthorization::new(asset, from, to, amount)];
        self.ledger.execute(&from, &mut batch)
    }
}

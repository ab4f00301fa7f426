//! Arena of duel records.
//!
//! Records are appended and never removed, so a duel's id is its index and
//! the arena length is the next id to assign.

use duelvault_types::{DuelId, DuelRecord, DuelVaultError, Identity, Result};

#[derive(Debug, Default)]
pub struct DuelStore {
    duels: Vec<DuelRecord>,
}

impl DuelStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next created duel will receive.
    #[must_use]
    pub fn next_id(&self) -> DuelId {
        DuelId(self.duels.len() as u64)
    }

    /// Append a new duel awaiting a joiner.
    pub fn create(&mut self, host: Identity, wager_amount: u64) -> DuelId {
        let id = self.next_id();
        self.duels.push(DuelRecord::new(id, host, wager_amount));
        id
    }

    fn index(id: DuelId) -> Option<usize> {
        usize::try_from(id.0).ok()
    }

    /// # Errors
    /// `DuelNotFound` for an id never assigned.
    pub fn get(&self, id: DuelId) -> Result<&DuelRecord> {
        Self::index(id)
            .and_then(|i| self.duels.get(i))
            .ok_or(DuelVaultError::DuelNotFound(id))
    }

    /// # Errors
    /// `DuelNotFound` for an id never assigned.
    pub fn get_mut(&mut self, id: DuelId) -> Result<&mut DuelRecord> {
        Self::index(id)
            .and_then(|i| self.duels.get_mut(i))
            .ok_or(DuelVaultError::DuelNotFound(id))
    }

    /// Replace a record with its advanced copy.
    ///
    /// # Errors
    /// `DuelNotFound` for an id never assigned.
    pub fn commit(&mut self, next: DuelRecord) -> Result<()> {
        let slot = self.get_mut(next.id)?;
        *slot = next;
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.duels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.duels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DuelRecord> {
        self.duels.iter()
    }
}

#[cfg(test)]
mod tests {
    use duelvault_types::DuelStatus;

    use super::*;

    #[test]
    fn ids_are_sequential_from_zero() {
        let mut store = DuelStore::new();
        assert!(store.is_empty());
        assert_eq!(store.next_id(), DuelId(0));
        for expected in 0..5u64 {
            let id = store.create(Identity::random(), 10);
            assert_eq!(id, DuelId(expected));
        }
        assert_eq!(store.len(), 5);
        assert_eq!(store.next_id(), DuelId(5));
    }

    #[test]
    fn unknown_id_not_found() {
        let mut store = DuelStore::new();
        store.create(Identity::random(), 10);
        assert!(matches!(
            store.get(DuelId(1)),
            Err(DuelVaultError::DuelNotFound(DuelId(1)))
        ));
        assert!(store.get_mut(DuelId(u64::MAX)).is_err());
    }

    #[test]
    fn commit_replaces_record() {
        let mut store = DuelStore::new();
        let id = store.create(Identity::random(), 10);
        let mut next = store.get(id).unwrap().clone();
        next.join(Identity::random()).unwrap();
        store.commit(next).unwrap();
        assert_eq!(store.get(id).unwrap().status(), DuelStatus::Joined);
        assert_eq!(store.iter().count(), 1);
    }
}

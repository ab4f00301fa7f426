//! Append-only log of committed operations.

use duelvault_types::{EngineEvent, EventRecord};

#[derive(Debug, Default)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `event` at the next sequence number.
    pub fn append(&mut self, event: EngineEvent) {
        let sequence = self.records.len() as u64;
        tracing::debug!(sequence, event = event.name(), "Event recorded");
        self.records.push(EventRecord::new(sequence, event));
    }

    #[must_use]
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    #[must_use]
    pub fn last(&self) -> Option<&EventRecord> {
        self.records.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every record's hash matches its payload and sequences are gapless.
    #[must_use]
    pub fn verify(&self) -> bool {
        self.records
            .iter()
            .enumerate()
            .all(|(i, r)| r.sequence == i as u64 && r.verify())
    }
}

#[cfg(test)]
mod tests {
    use duelvault_types::{DuelId, Identity};

    use super::*;

    #[test]
    fn sequences_start_at_zero() {
        let mut log = EventLog::new();
        assert!(log.is_empty());
        log.append(EngineEvent::DuelJoined {
            duel_id: DuelId(0),
            joiner: Identity::random(),
        });
        log.append(EngineEvent::CompanyAllocationUpdated {
            old_company_percentage: 5,
            new_company_percentage: 10,
        });
        let sequences: Vec<_> = log.records().iter().map(|r| r.sequence).collect();
        assert_eq!(sequences, [0, 1]);
        assert_eq!(log.len(), 2);
        assert_eq!(log.last().unwrap().event.name(), "COMPANY_ALLOCATION_UPDATED");
        assert!(log.verify());
    }

    #[test]
    fn tampered_record_fails_verification() {
        let mut log = EventLog::new();
        log.append(EngineEvent::PoolAllocationUpdated {
            old_pool_percentage: 5,
            new_pool_percentage: 6,
        });
        log.records[0].event = EngineEvent::PoolAllocationUpdated {
            old_pool_percentage: 5,
            new_pool_percentage: 60,
        };
        assert!(!log.verify());
    }
}

//! Validation Record Repository
//!
//! Storage abstraction for validation records. The engine is
//! storage-agnostic; a remote or database-backed implementation only
//! has to preserve the atomicity contract of `update`.

use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::error::{ValidationError, ValidationResult};
use crate::state::ValidationRecord;

/// Repository for validation record persistence.
///
/// `update` must apply the closure atomically with respect to other
/// operations on the same record: the closure sees the current record,
/// and either its mutation is stored in full or (on error) not at all.
pub trait ValidationRepository {
    /// Load a record by id
    fn get(&self, id: Uuid) -> ValidationResult<ValidationRecord>;

    /// All records, ordered by request time
    fn list(&self) -> ValidationResult<Vec<ValidationRecord>>;

    /// Insert or replace a record
    fn save(&self, record: ValidationRecord) -> ValidationResult<()>;

    /// Atomically apply a guarded mutation to one record
    fn update<F>(&self, id: Uuid, f: F) -> ValidationResult<ValidationRecord>
    where
        F: FnOnce(&mut ValidationRecord) -> ValidationResult<()>;
}

/// In-memory repository.
///
/// A single lock over the record map serializes transitions per record:
/// of two racing transitions, the loser runs against the winner's
/// post-transition state and fails its transition guard.
#[derive(Default)]
pub struct InMemoryRepository {
    records: Mutex<HashMap<Uuid, ValidationRecord>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ValidationRepository for InMemoryRepository {
    fn get(&self, id: Uuid) -> ValidationResult<ValidationRecord> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records
            .get(&id)
            .cloned()
            .ok_or(ValidationError::RecordNotFound(id))
    }

    fn list(&self) -> ValidationResult<Vec<ValidationRecord>> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        let mut all: Vec<ValidationRecord> = records.values().cloned().collect();
        all.sort_by_key(|record| record.requested_at);
        Ok(all)
    }

    fn save(&self, record: ValidationRecord) -> ValidationResult<()> {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records.insert(record.id, record);
        Ok(())
    }

    fn update<F>(&self, id: Uuid, f: F) -> ValidationResult<ValidationRecord>
    where
        F: FnOnce(&mut ValidationRecord) -> ValidationResult<()>,
    {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        let current = records
            .get_mut(&id)
            .ok_or(ValidationError::RecordNotFound(id))?;

        // Mutate a working copy so a failed guard leaves the stored
        // record untouched
        let mut working = current.clone();
        f(&mut working)?;
        *current = working.clone();
        Ok(working)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::RiskTier;
    use crate::state::ValidationStatus;

    fn sample() -> ValidationRecord {
        ValidationRecord::new(
            "EXP-2024-0042",
            RiskTier::Low,
            vec![],
            vec![],
            "intake@firm.example",
        )
    }

    #[test]
    fn test_get_missing_record_fails() {
        let repo = InMemoryRepository::new();
        let err = repo.get(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, ValidationError::RecordNotFound(_)));
    }

    #[test]
    fn test_save_then_get_round_trips() {
        let repo = InMemoryRepository::new();
        let record = sample();
        let id = record.id;

        repo.save(record).unwrap();
        let loaded = repo.get(id).unwrap();
        assert_eq!(loaded.case_id, "EXP-2024-0042");
    }

    #[test]
    fn test_failed_update_leaves_record_untouched() {
        let repo = InMemoryRepository::new();
        let record = sample();
        let id = record.id;
        repo.save(record).unwrap();

        let result = repo.update(id, |record| {
            record.status = ValidationStatus::Approved;
            Err(ValidationError::MissingJustification)
        });

        assert!(result.is_err());
        assert_eq!(repo.get(id).unwrap().status, ValidationStatus::Pending);
    }

    #[test]
    fn test_list_orders_by_request_time() {
        let repo = InMemoryRepository::new();
        let first = sample();
        let mut second = sample();
        second.requested_at = first.requested_at + chrono::Duration::seconds(1);
        let first_id = first.id;

        repo.save(first).unwrap();
        repo.save(second).unwrap();

        let all = repo.list().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first_id);
    }
}

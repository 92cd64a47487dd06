//! Validation Engine
//!
//! Owns the validation record lifecycle. Every operation runs its
//! guards, then mutates the record and appends one audit entry, all
//! atomically against the repository. Failures mutate nothing.

use std::collections::HashMap;
use uuid::Uuid;

use crate::checklist::{self, ChecklistItem};
use crate::error::{ValidationError, ValidationResult};
use crate::guards::{self, Operation};
use crate::policy::RiskTier;
use crate::repository::ValidationRepository;
use crate::state::{Actor, AuditAction, ValidationRecord, ValidationStatus};

/// Read-only case metadata lookup, owned by the case-management
/// collaborator. Consumed for display only; never mutated here.
pub trait CaseDirectory {
    fn case_summary(&self, case_id: &str) -> Option<CaseSummary>;
}

/// Case metadata for display
#[derive(Debug, Clone)]
pub struct CaseSummary {
    pub title: String,
    pub client: String,
    pub case_type: String,
}

/// Input for opening a case for conflict validation. The conflicts and
/// risk tier come from the conflict-detection collaborator.
#[derive(Debug, Clone)]
pub struct OpenValidationRequest {
    pub case_id: String,
    pub risk_tier: RiskTier,
    pub detected_conflicts: Vec<String>,
    pub checklist: Vec<ChecklistItem>,
    pub requested_by: String,
}

/// Filter for listing validation records
#[derive(Debug, Clone, Default)]
pub struct ValidationFilter {
    pub status: Option<ValidationStatus>,
    pub risk_tier: Option<RiskTier>,
    /// Case-insensitive match on case id or conflict descriptors
    pub search: Option<String>,
}

impl ValidationFilter {
    pub fn matches(&self, record: &ValidationRecord) -> bool {
        if let Some(status) = self.status {
            if record.status != status {
                return false;
            }
        }
        if let Some(tier) = self.risk_tier {
            if record.risk_tier != tier {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let in_case = record.case_id.to_lowercase().contains(&needle);
            let in_conflicts = record
                .detected_conflicts
                .iter()
                .any(|c| c.to_lowercase().contains(&needle));
            if !in_case && !in_conflicts {
                return false;
            }
        }
        true
    }
}

/// The approval state machine over a repository
pub struct ValidationEngine<R: ValidationRepository> {
    repo: R,
}

impl<R: ValidationRepository> ValidationEngine<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Open a case for conflict validation. The record starts in
    /// `pending` with an all-incomplete checklist.
    pub fn open(&self, request: OpenValidationRequest) -> ValidationResult<ValidationRecord> {
        let record = ValidationRecord::new(
            request.case_id,
            request.risk_tier,
            request.detected_conflicts,
            request.checklist,
            request.requested_by,
        );

        tracing::info!(
            record_id = %record.id,
            case_id = %record.case_id,
            risk_tier = %record.risk_tier,
            "validation record opened"
        );

        self.repo.save(record.clone())?;
        Ok(record)
    }

    /// Load a record by id
    pub fn get(&self, id: Uuid) -> ValidationResult<ValidationRecord> {
        self.repo.get(id)
    }

    /// List records matching a filter, ordered by request time
    pub fn list(&self, filter: &ValidationFilter) -> ValidationResult<Vec<ValidationRecord>> {
        let mut records = self.repo.list()?;
        records.retain(|record| filter.matches(record));
        Ok(records)
    }

    /// Begin review of a pending record
    pub fn start_review(&self, id: Uuid, actor: &Actor) -> ValidationResult<ValidationRecord> {
        self.transition(id, actor, Operation::StartReview, None)
    }

    /// Approve a record under review or escalated. Requires the approve
    /// capability, tier-sufficient authority, a complete checklist, and
    /// a justification.
    pub fn approve(
        &self,
        id: Uuid,
        actor: &Actor,
        justification: &str,
    ) -> ValidationResult<ValidationRecord> {
        self.transition(id, actor, Operation::Approve, Some(justification))
    }

    /// Reject a record under review or escalated. Checklist state is
    /// deliberately not consulted.
    pub fn reject(
        &self,
        id: Uuid,
        actor: &Actor,
        justification: &str,
    ) -> ValidationResult<ValidationRecord> {
        self.transition(id, actor, Operation::Reject, Some(justification))
    }

    /// Hand an unresolved case to higher authority. Bypasses the
    /// checklist and tier gates; not an approval.
    pub fn escalate(
        &self,
        id: Uuid,
        actor: &Actor,
        justification: &str,
    ) -> ValidationResult<ValidationRecord> {
        self.transition(id, actor, Operation::Escalate, Some(justification))
    }

    /// Set one checklist item's completed flag. Allowed in any
    /// non-terminal status. Writing the value the item already holds is
    /// a no-op and records nothing.
    pub fn toggle_checklist_item(
        &self,
        id: Uuid,
        item_id: &str,
        completed: bool,
        actor: &Actor,
    ) -> ValidationResult<ValidationRecord> {
        let updated = self.repo.update(id, |record| {
            if record.status.is_terminal() {
                return Err(ValidationError::InvalidTransition {
                    from: record.status,
                    operation: "toggle_checklist_item".to_string(),
                });
            }

            let changed = checklist::toggle_item(&mut record.checklist, item_id, completed)?;
            if changed {
                let mut details = HashMap::new();
                details.insert("item_id".to_string(), serde_json::json!(item_id));
                details.insert("completed".to_string(), serde_json::json!(completed));
                record.record_action(
                    &actor.id,
                    AuditAction::ChecklistItemToggled,
                    None,
                    details,
                );
            }
            Ok(())
        })?;

        Ok(updated)
    }

    /// Run one guarded transition atomically against the repository
    fn transition(
        &self,
        id: Uuid,
        actor: &Actor,
        op: Operation,
        justification: Option<&str>,
    ) -> ValidationResult<ValidationRecord> {
        let updated = self.repo.update(id, |record| {
            guards::check_transition(record, op)?;
            guards::check_authority(actor, op)?;
            if op == Operation::Approve {
                guards::check_tier_authority(actor, record)?;
            }
            if op.requires_justification() {
                guards::check_justification(justification)?;
            }
            if op == Operation::Approve {
                guards::check_checklist(record)?;
            }

            record.status = op.target_status();
            record.record_action(
                &actor.id,
                op.audit_action(),
                justification.map(str::to_string),
                HashMap::new(),
            );
            Ok(())
        })?;

        tracing::info!(
            record_id = %id,
            operation = op.as_str(),
            actor = %actor.id,
            status = %updated.status,
            "transition applied"
        );

        Ok(updated)
    }
}

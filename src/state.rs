//! Validation Record State Types
//!
//! Defines the record under conflict review, its status lifecycle, and
//! the append-only audit history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::checklist::ChecklistItem;
use crate::policy::RiskTier;

/// Lifecycle status of a validation record.
///
/// `Approved` and `Rejected` are terminal; no operation may be applied
/// to a record once it reaches either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Pending,
    InReview,
    Approved,
    Rejected,
    Escalated,
}

impl ValidationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ValidationStatus::Approved | ValidationStatus::Rejected)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::Pending => "pending",
            ValidationStatus::InReview => "in_review",
            ValidationStatus::Approved => "approved",
            ValidationStatus::Rejected => "rejected",
            ValidationStatus::Escalated => "escalated",
        }
    }
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action recorded in the audit history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    ReviewStarted,
    ChecklistItemToggled,
    Approved,
    Rejected,
    Escalated,
}

/// Immutable record of one action taken against a validation record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Who performed the action (user id or "system")
    pub actor: String,
    pub action: AuditAction,
    /// Reason supplied with approve/reject/escalate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
    pub timestamp: DateTime<Utc>,
    /// Additional context (e.g., which checklist item was toggled)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub details: HashMap<String, serde_json::Value>,
}

/// The current user acting on a record, supplied by the session
/// collaborator. The role is resolved fail-closed by `authority`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub role: String,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: role.into(),
        }
    }
}

/// One case file under conflict review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRecord {
    /// Unique record id
    pub id: Uuid,
    /// Reference to the external case/expediente record
    pub case_id: String,
    /// Current lifecycle status; mutated only via guarded operations
    pub status: ValidationStatus,
    /// Computed by conflict detection at creation; immutable thereafter
    pub risk_tier: RiskTier,
    /// Conflict descriptors supplied by conflict detection (opaque here)
    pub detected_conflicts: Vec<String>,
    /// Verification steps gating approval
    pub checklist: Vec<ChecklistItem>,
    /// Who opened the case for validation
    pub requested_by: String,
    pub requested_at: DateTime<Utc>,
    /// Append-only audit history; never edited or reordered
    pub history: Vec<AuditEntry>,
    pub updated_at: DateTime<Utc>,
}

impl ValidationRecord {
    /// Create a record in `pending` status with one `Created` audit
    /// entry. Called when a case enters conflict review.
    pub fn new(
        case_id: impl Into<String>,
        risk_tier: RiskTier,
        detected_conflicts: Vec<String>,
        checklist: Vec<ChecklistItem>,
        requested_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        let requested_by = requested_by.into();
        Self {
            id: Uuid::new_v4(),
            case_id: case_id.into(),
            status: ValidationStatus::Pending,
            risk_tier,
            detected_conflicts,
            checklist,
            requested_by: requested_by.clone(),
            requested_at: now,
            history: vec![AuditEntry {
                actor: requested_by,
                action: AuditAction::Created,
                justification: None,
                timestamp: now,
                details: HashMap::new(),
            }],
            updated_at: now,
        }
    }

    /// Append one audit entry and bump `updated_at`
    pub(crate) fn record_action(
        &mut self,
        actor: &str,
        action: AuditAction,
        justification: Option<String>,
        details: HashMap<String, serde_json::Value>,
    ) {
        let now = Utc::now();
        self.history.push(AuditEntry {
            actor: actor.to_string(),
            action,
            justification,
            timestamp: now,
            details,
        });
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_pending_with_created_entry() {
        let record = ValidationRecord::new(
            "EXP-2024-0042",
            RiskTier::Medium,
            vec!["prior-representation:acme".to_string()],
            vec![],
            "intake@firm.example",
        );

        assert_eq!(record.status, ValidationStatus::Pending);
        assert_eq!(record.history.len(), 1);
        assert_eq!(record.history[0].action, AuditAction::Created);
        assert_eq!(record.history[0].actor, "intake@firm.example");
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(ValidationStatus::Approved.is_terminal());
        assert!(ValidationStatus::Rejected.is_terminal());
        assert!(!ValidationStatus::Pending.is_terminal());
        assert!(!ValidationStatus::InReview.is_terminal());
        assert!(!ValidationStatus::Escalated.is_terminal());
    }

    #[test]
    fn test_record_action_appends_and_bumps_updated_at() {
        let mut record = ValidationRecord::new(
            "EXP-2024-0042",
            RiskTier::Low,
            vec![],
            vec![],
            "intake@firm.example",
        );
        let before = record.updated_at;

        record.record_action(
            "partner@firm.example",
            AuditAction::ReviewStarted,
            None,
            HashMap::new(),
        );

        assert_eq!(record.history.len(), 2);
        assert!(record.updated_at >= before);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&ValidationStatus::InReview).unwrap();
        assert_eq!(json, "\"in_review\"");
    }
}

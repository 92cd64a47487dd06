//! Transition Guard Evaluation
//!
//! Each workflow operation passes a fixed sequence of guards before any
//! mutation: transition legality, then authorization (role, and risk
//! tier for approvals), then justification, then checklist state.
//! Authorization is checked before checklist state so an unauthorized
//! actor learns nothing about the checklist.

use crate::authority::Capabilities;
use crate::checklist;
use crate::error::{ValidationError, ValidationResult};
use crate::policy;
use crate::state::{Actor, AuditAction, ValidationRecord, ValidationStatus};

/// The guarded operations of the approval state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    StartReview,
    Approve,
    Reject,
    Escalate,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::StartReview => "start_review",
            Operation::Approve => "approve",
            Operation::Reject => "reject",
            Operation::Escalate => "escalate",
        }
    }

    /// Statuses this operation may be applied from
    pub fn allowed_from(&self, status: ValidationStatus) -> bool {
        match self {
            Operation::StartReview => status == ValidationStatus::Pending,
            Operation::Approve | Operation::Reject => matches!(
                status,
                ValidationStatus::InReview | ValidationStatus::Escalated
            ),
            // Escalating an already-escalated record is not a no-op, it
            // is an error
            Operation::Escalate => matches!(
                status,
                ValidationStatus::Pending | ValidationStatus::InReview
            ),
        }
    }

    /// Status the record holds after this operation succeeds
    pub fn target_status(&self) -> ValidationStatus {
        match self {
            Operation::StartReview => ValidationStatus::InReview,
            Operation::Approve => ValidationStatus::Approved,
            Operation::Reject => ValidationStatus::Rejected,
            Operation::Escalate => ValidationStatus::Escalated,
        }
    }

    /// Audit action recorded for this operation
    pub fn audit_action(&self) -> AuditAction {
        match self {
            Operation::StartReview => AuditAction::ReviewStarted,
            Operation::Approve => AuditAction::Approved,
            Operation::Reject => AuditAction::Rejected,
            Operation::Escalate => AuditAction::Escalated,
        }
    }

    /// Does this operation require a justification?
    pub fn requires_justification(&self) -> bool {
        !matches!(self, Operation::StartReview)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Is the operation legal from the record's current status?
pub fn check_transition(record: &ValidationRecord, op: Operation) -> ValidationResult<()> {
    if op.allowed_from(record.status) {
        Ok(())
    } else {
        Err(ValidationError::InvalidTransition {
            from: record.status,
            operation: op.as_str().to_string(),
        })
    }
}

/// Does the actor's role hold the capability for this operation?
pub fn check_authority(actor: &Actor, op: Operation) -> ValidationResult<()> {
    let caps = Capabilities::for_role(&actor.role);
    let allowed = match op {
        Operation::StartReview => caps.can_start_review,
        Operation::Approve => caps.can_approve,
        Operation::Reject => caps.can_reject,
        Operation::Escalate => caps.can_escalate,
    };

    if allowed {
        Ok(())
    } else {
        Err(ValidationError::PermissionDenied {
            actor: actor.id.clone(),
            operation: op.as_str().to_string(),
        })
    }
}

/// Tier gate for approvals: elevated tiers require elevated roles.
/// Consulted in addition to `check_authority`, never instead of it.
pub fn check_tier_authority(actor: &Actor, record: &ValidationRecord) -> ValidationResult<()> {
    if policy::can_approve_given_tier(&actor.role, record.risk_tier) {
        Ok(())
    } else {
        Err(ValidationError::PermissionDenied {
            actor: actor.id.clone(),
            operation: format!("approve at tier '{}'", record.risk_tier),
        })
    }
}

/// Approve/reject/escalate require a non-empty justification
pub fn check_justification(justification: Option<&str>) -> ValidationResult<()> {
    match justification {
        Some(text) if !text.trim().is_empty() => Ok(()),
        _ => Err(ValidationError::MissingJustification),
    }
}

/// Approval requires every checklist item completed
pub fn check_checklist(record: &ValidationRecord) -> ValidationResult<()> {
    if checklist::is_complete(&record.checklist) {
        Ok(())
    } else {
        Err(ValidationError::ChecklistIncomplete {
            missing: checklist::incomplete_count(&record.checklist),
        })
    }
}

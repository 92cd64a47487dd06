//! Error types for the validation workflow.
//!
//! Every guard failure maps to one variant here. Failures are reported
//! before any mutation; a failed operation leaves the record untouched.

use thiserror::Error;
use uuid::Uuid;

use crate::state::ValidationStatus;

/// Errors raised by validation workflow operations
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Actor's role (or role + risk tier) is insufficient for the operation
    #[error("Permission denied: '{actor}' may not {operation}")]
    PermissionDenied { actor: String, operation: String },

    /// Operation is not legal from the record's current status
    #[error("Invalid transition: cannot {operation} from '{from}'")]
    InvalidTransition {
        from: ValidationStatus,
        operation: String,
    },

    /// Approval attempted before the checklist is fully satisfied
    #[error("Checklist incomplete: {missing} item(s) outstanding")]
    ChecklistIncomplete { missing: usize },

    /// Approve/reject/escalate called without a justification
    #[error("A non-empty justification is required")]
    MissingJustification,

    /// Checklist toggle on an unknown item id
    #[error("Checklist item not found: {item_id}")]
    ItemNotFound { item_id: String },

    /// No validation record with this id
    #[error("Validation record not found: {0}")]
    RecordNotFound(Uuid),

    /// Checklist template failed to parse
    #[error("Template error: {0}")]
    Template(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for convenience
pub type ValidationResult<T> = Result<T, ValidationError>;

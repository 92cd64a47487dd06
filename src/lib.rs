//! Conflict-of-Interest Validation Workflow
//!
//! A finite-state approval pipeline for law-firm case files under
//! conflict review. A case must clear a checklist before approval,
//! approval authority depends on both the actor's role and the
//! record's computed risk tier, and every transition appends to an
//! immutable audit history.
//!
//! Lifecycle: `pending -> in_review -> {approved, rejected, escalated}`;
//! `escalated -> {approved, rejected}`. Approved and rejected are
//! terminal.
//!
//! Case storage, conflict detection, and session identity are external
//! collaborators; this crate owns only the decision logic and the
//! record's data contract.

pub mod authority;
pub mod checklist;
pub mod engine;
pub mod error;
pub mod guards;
pub mod policy;
pub mod repository;
pub mod state;
pub mod template;

pub use authority::{Capabilities, Role};
pub use checklist::{is_complete, ChecklistItem};
pub use engine::{
    CaseDirectory, CaseSummary, OpenValidationRequest, ValidationEngine, ValidationFilter,
};
pub use error::{ValidationError, ValidationResult};
pub use policy::{can_approve_given_tier, RiskTier};
pub use repository::{InMemoryRepository, ValidationRepository};
pub use state::{Actor, AuditAction, AuditEntry, ValidationRecord, ValidationStatus};
pub use template::{ChecklistTemplate, TemplateLoader};

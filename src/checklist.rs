//! Checklist Engine
//!
//! Completeness evaluation and item toggling for a record's conflict
//! checklist. Item identity is stable for the life of the record; only
//! the `completed` flag ever changes.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};

/// One discrete verification step on a validation record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Stable item identifier
    pub id: String,
    /// Human-readable description of the verification step
    pub label: String,
    #[serde(default)]
    pub completed: bool,
}

impl ChecklistItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            completed: false,
        }
    }
}

/// True iff every item is completed. An empty checklist is vacuously
/// complete.
pub fn is_complete(checklist: &[ChecklistItem]) -> bool {
    checklist.iter().all(|item| item.completed)
}

/// Number of items still outstanding
pub fn incomplete_count(checklist: &[ChecklistItem]) -> usize {
    checklist.iter().filter(|item| !item.completed).count()
}

/// Set exactly one item's `completed` flag.
///
/// Writing the value an item already holds is allowed and changes
/// nothing. Returns whether the flag actually changed so callers can
/// skip audit bookkeeping on no-op writes.
pub fn toggle_item(
    checklist: &mut [ChecklistItem],
    item_id: &str,
    completed: bool,
) -> ValidationResult<bool> {
    let item = checklist
        .iter_mut()
        .find(|item| item.id == item_id)
        .ok_or_else(|| ValidationError::ItemNotFound {
            item_id: item_id.to_string(),
        })?;

    let changed = item.completed != completed;
    item.completed = completed;
    Ok(changed)
}

//! Role Authority
//!
//! Maps a role identifier to the set of workflow capabilities it holds.
//! All authorization logic lives here rather than fanned out across
//! call sites. Unknown roles resolve to no capabilities (fail-closed).

use serde::{Deserialize, Serialize};

/// Closed set of firm roles recognized by the validation workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Partner,
    SeniorAssociate,
    JuniorAssociate,
    Paralegal,
}

impl Role {
    /// Parse a role identifier as supplied by the session collaborator.
    /// Returns `None` for anything outside the closed set.
    pub fn parse(role: &str) -> Option<Role> {
        match role.trim().to_ascii_lowercase().as_str() {
            "super_admin" => Some(Role::SuperAdmin),
            "partner" => Some(Role::Partner),
            "senior_associate" => Some(Role::SeniorAssociate),
            "junior_associate" => Some(Role::JuniorAssociate),
            "paralegal" => Some(Role::Paralegal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Partner => "partner",
            Role::SeniorAssociate => "senior_associate",
            Role::JuniorAssociate => "junior_associate",
            Role::Paralegal => "paralegal",
        }
    }

    /// Highest-authority roles, trusted with high/critical risk tiers
    pub fn is_elevated(&self) -> bool {
        matches!(self, Role::SuperAdmin | Role::Partner)
    }

    /// Workflow capabilities this role holds
    pub fn capabilities(&self) -> Capabilities {
        match self {
            Role::SuperAdmin | Role::Partner => Capabilities {
                can_start_review: true,
                can_approve: true,
                can_reject: true,
                can_escalate: true,
            },
            Role::SeniorAssociate => Capabilities {
                can_start_review: true,
                can_approve: true,
                can_reject: true,
                can_escalate: true,
            },
            Role::JuniorAssociate => Capabilities {
                can_start_review: true,
                can_approve: false,
                can_reject: false,
                can_escalate: true,
            },
            // Read-only access to the validation queue
            Role::Paralegal => Capabilities::default(),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability set for one role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub can_start_review: bool,
    pub can_approve: bool,
    pub can_reject: bool,
    pub can_escalate: bool,
}

impl Capabilities {
    /// Resolve capabilities for a raw role identifier.
    ///
    /// Unrecognized roles yield the empty capability set so that a stale
    /// or garbled session role can never authorize anything.
    pub fn for_role(role: &str) -> Capabilities {
        match Role::parse(role) {
            Some(r) => r.capabilities(),
            None => {
                tracing::warn!("Unknown role '{}', denying all capabilities", role);
                Capabilities::default()
            }
        }
    }
}

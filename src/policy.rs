//! Risk Tier Policy
//!
//! A role's general approve capability is not sufficient on its own:
//! high and critical tiers additionally require an elevated role. Tier
//! is an independent gate, consulted in addition to `Capabilities`.

use serde::{Deserialize, Serialize};

use crate::authority::{Capabilities, Role};

/// Coarse sensitivity classification of a detected conflict.
///
/// Ordered by severity so callers can compare tiers directly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskTier {
    /// Tiers reserved for the firm's highest-authority roles
    pub fn requires_elevated_authority(&self) -> bool {
        matches!(self, RiskTier::High | RiskTier::Critical)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
            RiskTier::Critical => "critical",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Is this role's approval authority sufficient for the given tier?
///
/// Low/medium: any role holding the approve capability. High/critical:
/// only elevated roles, regardless of the general capability flag.
/// Exposed read-only so UIs can disable the approve action up front.
pub fn can_approve_given_tier(role: &str, tier: RiskTier) -> bool {
    if !Capabilities::for_role(role).can_approve {
        return false;
    }
    if tier.requires_elevated_authority() {
        Role::parse(role).map(|r| r.is_elevated()).unwrap_or(false)
    } else {
        true
    }
}

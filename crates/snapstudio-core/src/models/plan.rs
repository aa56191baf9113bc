//! Plan tiers, limits, and capability flags
//!
//! Tiers form a closed, ordered set (demo < agency < enterprise). Limits and
//! capabilities are exhaustive enums so a definition cannot omit a key: every
//! `PlanLimits` / `PlanCapabilities` record carries one field per key and the
//! compiler rejects partial records.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subscription tier, ordered by rank
///
/// Higher tiers unlock higher numeric ceilings, but capability flags are NOT
/// inherited by rank — each definition states every flag explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    /// Free evaluation tier with hard ceilings
    Demo,
    /// Paid tier: unlimited usage, priority support
    Agency,
    /// Top tier: white-label, custom integrations, dedicated manager
    Enterprise,
}

impl PlanTier {
    /// All tiers in ascending rank order
    pub const ALL: [PlanTier; 3] = [PlanTier::Demo, PlanTier::Agency, PlanTier::Enterprise];

    /// Ordinal rank within the tier order (0 = lowest)
    pub const fn rank(self) -> u8 {
        match self {
            PlanTier::Demo => 0,
            PlanTier::Agency => 1,
            PlanTier::Enterprise => 2,
        }
    }

    /// Tier every new session starts on
    pub const fn lowest() -> Self {
        PlanTier::Demo
    }

    /// Next tier up, or `None` at the top
    ///
    /// This is the target identifier handed to the upgrade flow; checkout
    /// URLs and payment live outside this crate.
    pub const fn next(self) -> Option<Self> {
        match self {
            PlanTier::Demo => Some(PlanTier::Agency),
            PlanTier::Agency => Some(PlanTier::Enterprise),
            PlanTier::Enterprise => None,
        }
    }

    /// Stable string id (matches the wire format)
    pub const fn as_str(self) -> &'static str {
        match self {
            PlanTier::Demo => "demo",
            PlanTier::Agency => "agency",
            PlanTier::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanTier {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "demo" => Ok(PlanTier::Demo),
            "agency" => Ok(PlanTier::Agency),
            "enterprise" => Ok(PlanTier::Enterprise),
            other => Err(CoreError::UnknownPlan {
                value: other.to_string(),
            }),
        }
    }
}

/// Countable resource with a per-tier ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LimitKey {
    MaxContacts,
    MaxConversations,
    MaxWorkflows,
    MaxCampaigns,
}

impl LimitKey {
    /// All limit keys
    pub const ALL: [LimitKey; 4] = [
        LimitKey::MaxContacts,
        LimitKey::MaxConversations,
        LimitKey::MaxWorkflows,
        LimitKey::MaxCampaigns,
    ];

    /// Human label for indicators ("Contacts", "Workflows", ...)
    pub const fn label(self) -> &'static str {
        match self {
            LimitKey::MaxContacts => "Contacts",
            LimitKey::MaxConversations => "Conversations",
            LimitKey::MaxWorkflows => "Workflows",
            LimitKey::MaxCampaigns => "Campaigns",
        }
    }
}

impl fmt::Display for LimitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Boolean feature flag, independent of numeric limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapabilityKey {
    AdvancedAnalytics,
    WhiteLabel,
    CustomIntegrations,
    PrioritySupport,
    DedicatedManager,
}

impl CapabilityKey {
    /// All capability keys
    pub const ALL: [CapabilityKey; 5] = [
        CapabilityKey::AdvancedAnalytics,
        CapabilityKey::WhiteLabel,
        CapabilityKey::CustomIntegrations,
        CapabilityKey::PrioritySupport,
        CapabilityKey::DedicatedManager,
    ];

    /// Human label for feature lists
    pub const fn label(self) -> &'static str {
        match self {
            CapabilityKey::AdvancedAnalytics => "Advanced analytics",
            CapabilityKey::WhiteLabel => "White-label",
            CapabilityKey::CustomIntegrations => "Custom integrations",
            CapabilityKey::PrioritySupport => "Priority support",
            CapabilityKey::DedicatedManager => "Dedicated account manager",
        }
    }
}

impl fmt::Display for CapabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Numeric ceiling or the unbounded sentinel
///
/// Serializes as a plain number, with `null` meaning unlimited, so API
/// consumers never see a magic `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<u64>", into = "Option<u64>")]
pub enum Limit {
    /// Hard ceiling; a count equal to the ceiling is already at the limit
    Bounded(u64),
    /// No ceiling
    Unlimited,
}

impl Limit {
    pub const fn is_unlimited(self) -> bool {
        matches!(self, Limit::Unlimited)
    }

    /// Whether one more unit fits under this ceiling
    ///
    /// Strict inequality: `current == ceiling` is full.
    pub const fn permits(self, current: u64) -> bool {
        match self {
            Limit::Unlimited => true,
            Limit::Bounded(ceiling) => current < ceiling,
        }
    }

    /// Units left before the ceiling; `None` when unlimited, floors at 0
    pub const fn remaining(self, current: u64) -> Option<u64> {
        match self {
            Limit::Unlimited => None,
            Limit::Bounded(ceiling) => Some(ceiling.saturating_sub(current)),
        }
    }
}

impl From<Option<u64>> for Limit {
    fn from(value: Option<u64>) -> Self {
        match value {
            Some(ceiling) => Limit::Bounded(ceiling),
            None => Limit::Unlimited,
        }
    }
}

impl From<Limit> for Option<u64> {
    fn from(limit: Limit) -> Self {
        match limit {
            Limit::Bounded(ceiling) => Some(ceiling),
            Limit::Unlimited => None,
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Bounded(ceiling) => write!(f, "{}", ceiling),
            Limit::Unlimited => f.write_str("unlimited"),
        }
    }
}

/// Per-tier ceilings, one field per [`LimitKey`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanLimits {
    pub max_contacts: Limit,
    pub max_conversations: Limit,
    pub max_workflows: Limit,
    pub max_campaigns: Limit,
}

impl PlanLimits {
    /// Ceiling for a key; total over [`LimitKey`]
    pub const fn get(&self, key: LimitKey) -> Limit {
        match key {
            LimitKey::MaxContacts => self.max_contacts,
            LimitKey::MaxConversations => self.max_conversations,
            LimitKey::MaxWorkflows => self.max_workflows,
            LimitKey::MaxCampaigns => self.max_campaigns,
        }
    }

    /// Every ceiling unbounded (paid tiers)
    pub const fn unlimited() -> Self {
        Self {
            max_contacts: Limit::Unlimited,
            max_conversations: Limit::Unlimited,
            max_workflows: Limit::Unlimited,
            max_campaigns: Limit::Unlimited,
        }
    }
}

/// Per-tier feature flags, one field per [`CapabilityKey`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanCapabilities {
    pub advanced_analytics: bool,
    pub white_label: bool,
    pub custom_integrations: bool,
    pub priority_support: bool,
    pub dedicated_manager: bool,
}

impl PlanCapabilities {
    /// Flag for a key; total over [`CapabilityKey`]
    pub const fn get(&self, key: CapabilityKey) -> bool {
        match key {
            CapabilityKey::AdvancedAnalytics => self.advanced_analytics,
            CapabilityKey::WhiteLabel => self.white_label,
            CapabilityKey::CustomIntegrations => self.custom_integrations,
            CapabilityKey::PrioritySupport => self.priority_support,
            CapabilityKey::DedicatedManager => self.dedicated_manager,
        }
    }

    /// All flags off (demo tier)
    pub const fn none() -> Self {
        Self {
            advanced_analytics: false,
            white_label: false,
            custom_integrations: false,
            priority_support: false,
            dedicated_manager: false,
        }
    }
}

/// Static description of one tier: display info plus its entitlement table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDefinition {
    pub tier: PlanTier,
    pub name: String,
    /// Monthly price in USD, informational only
    pub price_usd: u32,
    pub description: String,
    pub limits: PlanLimits,
    pub capabilities: PlanCapabilities,
}

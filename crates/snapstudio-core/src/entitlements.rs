//! Plan registry and entitlement evaluation
//!
//! The registry is a fixed table: one [`PlanDefinition`] per [`PlanTier`],
//! indexed by rank and validated when the table is built. Evaluation is pure:
//! the caller supplies the current tier and usage counts, and gets back
//! booleans and remaining headroom. Nothing here tracks usage or mutates
//! state, so the registry is safe to share across threads without locking.
//!
//! # Examples
//!
//! ```
//! use snapstudio_core::entitlements::PlanRegistry;
//! use snapstudio_core::models::{CapabilityKey, LimitKey, PlanTier};
//!
//! let registry = PlanRegistry::builtin();
//!
//! // Demo caps contacts at 100; the 100th contact is the last one in.
//! let demo = registry.entitlements(PlanTier::Demo);
//! assert!(demo.meets_limit(LimitKey::MaxContacts, 99));
//! assert!(!demo.meets_limit(LimitKey::MaxContacts, 100));
//!
//! // Agency is unlimited, and unlocks advanced analytics.
//! let agency = registry.entitlements(PlanTier::Agency);
//! assert!(agency.meets_limit(LimitKey::MaxContacts, 1_000_000));
//! assert!(agency.has_capability(CapabilityKey::AdvancedAnalytics));
//! assert!(!agency.has_capability(CapabilityKey::WhiteLabel));
//! ```

use crate::models::{
    CapabilityKey, Limit, LimitKey, PlanCapabilities, PlanDefinition, PlanLimits, PlanTier,
};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Built-in plan table
///
/// Capability flags are copied into every tier that should carry them; a
/// higher rank does not inherit a lower tier's flags.
static BUILTIN: Lazy<PlanRegistry> = Lazy::new(|| {
    PlanRegistry::new([
        PlanDefinition {
            tier: PlanTier::Demo,
            name: "Demo".to_string(),
            price_usd: 0,
            description: "Try out Scale Snap Studio with limited features".to_string(),
            limits: PlanLimits {
                max_contacts: Limit::Bounded(100),
                max_conversations: Limit::Bounded(25),
                max_workflows: Limit::Bounded(3),
                max_campaigns: Limit::Bounded(2),
            },
            capabilities: PlanCapabilities::none(),
        },
        PlanDefinition {
            tier: PlanTier::Agency,
            name: "Agency Plan".to_string(),
            price_usd: 99,
            description:
                "Full access with unlimited snapshots, priority support, and advanced analytics"
                    .to_string(),
            limits: PlanLimits::unlimited(),
            capabilities: PlanCapabilities {
                advanced_analytics: true,
                white_label: false,
                custom_integrations: false,
                priority_support: true,
                dedicated_manager: false,
            },
        },
        PlanDefinition {
            tier: PlanTier::Enterprise,
            name: "Enterprise Pro".to_string(),
            price_usd: 299,
            description:
                "Premium access with white-label, custom integrations, and dedicated account manager"
                    .to_string(),
            limits: PlanLimits::unlimited(),
            capabilities: PlanCapabilities {
                advanced_analytics: true,
                white_label: true,
                custom_integrations: true,
                priority_support: true,
                dedicated_manager: true,
            },
        },
    ])
});

/// Ordered set of plan definitions, one per tier
///
/// Read-only after construction.
pub struct PlanRegistry {
    /// Indexed by `PlanTier::rank()`
    definitions: [PlanDefinition; PlanTier::ALL.len()],
}

impl PlanRegistry {
    /// Build a registry from one definition per tier, in rank order
    ///
    /// Panics if a slot's definition names a different tier than its rank
    /// position. The built-in table is fixed at compile time, so a mismatch
    /// is a programming error caught at first use, not a runtime condition.
    pub fn new(definitions: [PlanDefinition; PlanTier::ALL.len()]) -> Self {
        for (slot, def) in definitions.iter().enumerate() {
            assert_eq!(
                def.tier.rank() as usize,
                slot,
                "plan registry slot {} holds definition for tier {}",
                slot,
                def.tier
            );
        }
        Self { definitions }
    }

    /// The process-wide built-in registry
    pub fn builtin() -> &'static PlanRegistry {
        &BUILTIN
    }

    /// Definition for a tier; total over [`PlanTier`]
    pub fn definition_of(&self, tier: PlanTier) -> &PlanDefinition {
        &self.definitions[tier.rank() as usize]
    }

    /// Position of a tier in the fixed order
    pub fn rank_of(&self, tier: PlanTier) -> u8 {
        tier.rank()
    }

    /// All definitions in ascending rank order
    pub fn definitions(&self) -> &[PlanDefinition] {
        &self.definitions
    }

    /// Evaluation context bound to a current tier
    pub fn entitlements(&self, tier: PlanTier) -> Entitlements<'_> {
        Entitlements {
            registry: self,
            tier,
        }
    }
}

/// Pure entitlement evaluator for one current tier
///
/// Cheap to copy and safe to pass around; holds no usage state. Callers
/// supply their own counts.
#[derive(Clone, Copy)]
pub struct Entitlements<'a> {
    registry: &'a PlanRegistry,
    tier: PlanTier,
}

impl<'a> Entitlements<'a> {
    /// The tier this context evaluates against
    pub fn tier(&self) -> PlanTier {
        self.tier
    }

    /// Definition backing this context
    pub fn plan(&self) -> &'a PlanDefinition {
        self.registry.definition_of(self.tier)
    }

    /// Whether the current tier carries a capability flag
    ///
    /// Straight flag lookup; rank never enters into it.
    pub fn has_capability(&self, key: CapabilityKey) -> bool {
        self.plan().capabilities.get(key)
    }

    /// Whether `current` leaves room under the tier's ceiling for `key`
    ///
    /// Unlimited ceilings always pass; bounded ceilings use strict `<`, so a
    /// count equal to the ceiling fails.
    pub fn meets_limit(&self, key: LimitKey, current: u64) -> bool {
        self.plan().limits.get(key).permits(current)
    }

    /// Headroom under the ceiling for `key`; `None` when unlimited
    ///
    /// Never negative: a count past the ceiling reports 0.
    pub fn remaining(&self, key: LimitKey, current: u64) -> Option<u64> {
        self.plan().limits.get(key).remaining(current)
    }

    /// Whether the current tier meets a minimum-tier gate
    pub fn has_access(&self, required: PlanTier) -> bool {
        self.tier.rank() >= required.rank()
    }

    /// Usage snapshot for a bounded limit; `None` when unlimited
    ///
    /// Indicators hide unlimited limits entirely, so there is nothing to
    /// report for them.
    pub fn limit_status(&self, key: LimitKey, current: u64) -> Option<LimitStatus> {
        let ceiling = match self.plan().limits.get(key) {
            Limit::Unlimited => return None,
            Limit::Bounded(ceiling) => ceiling,
        };
        let remaining = ceiling.saturating_sub(current);
        let usage_pct = if ceiling == 0 {
            100.0
        } else {
            ((current as f64 / ceiling as f64) * 100.0).min(100.0)
        };
        Some(LimitStatus {
            key,
            ceiling,
            current,
            remaining,
            usage_pct,
            alert: LimitAlert::from_usage(ceiling, remaining),
        })
    }
}

/// Alert level for a bounded limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitAlert {
    /// Comfortable headroom
    Ok,
    /// Remaining headroom is 20% of the ceiling or less
    NearLimit,
    /// No headroom left
    AtLimit,
}

impl LimitAlert {
    fn from_usage(ceiling: u64, remaining: u64) -> Self {
        if remaining == 0 {
            LimitAlert::AtLimit
        } else if remaining.saturating_mul(5) <= ceiling {
            LimitAlert::NearLimit
        } else {
            LimitAlert::Ok
        }
    }
}

/// Point-in-time usage report for one bounded limit
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitStatus {
    pub key: LimitKey,
    pub ceiling: u64,
    pub current: u64,
    pub remaining: u64,
    /// 0.0-100.0, clamped for display
    pub usage_pct: f64,
    pub alert: LimitAlert,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_is_total() {
        let registry = PlanRegistry::builtin();
        for tier in PlanTier::ALL {
            let def = registry.definition_of(tier);
            assert_eq!(def.tier, tier);
            assert_eq!(registry.rank_of(tier), tier.rank());
        }
        assert_eq!(registry.definitions().len(), 3);
    }

    #[test]
    #[should_panic(expected = "plan registry slot")]
    fn test_registry_rejects_misordered_definitions() {
        let builtin = PlanRegistry::builtin();
        let demo = builtin.definition_of(PlanTier::Demo).clone();
        let agency = builtin.definition_of(PlanTier::Agency).clone();
        let enterprise = builtin.definition_of(PlanTier::Enterprise).clone();
        // Agency in the demo slot
        PlanRegistry::new([agency, demo, enterprise]);
    }

    #[test]
    fn test_has_access_matches_rank_order() {
        let registry = PlanRegistry::builtin();
        for current in PlanTier::ALL {
            for required in PlanTier::ALL {
                assert_eq!(
                    registry.entitlements(current).has_access(required),
                    current.rank() >= required.rank(),
                );
            }
        }
        // Spot checks pinned to the concrete tiers
        assert!(registry
            .entitlements(PlanTier::Agency)
            .has_access(PlanTier::Demo));
        assert!(!registry
            .entitlements(PlanTier::Demo)
            .has_access(PlanTier::Enterprise));
        assert!(registry
            .entitlements(PlanTier::Enterprise)
            .has_access(PlanTier::Enterprise));
    }

    #[test]
    fn test_meets_limit_boundary() {
        // Demo contacts ceiling is 100
        let demo = PlanRegistry::builtin().entitlements(PlanTier::Demo);
        assert!(demo.meets_limit(LimitKey::MaxContacts, 99));
        assert!(!demo.meets_limit(LimitKey::MaxContacts, 100));
        assert!(!demo.meets_limit(LimitKey::MaxContacts, 101));
    }

    #[test]
    fn test_unlimited_always_passes() {
        let agency = PlanRegistry::builtin().entitlements(PlanTier::Agency);
        for key in LimitKey::ALL {
            assert!(agency.meets_limit(key, 0));
            assert!(agency.meets_limit(key, 1_000_000));
            assert!(agency.meets_limit(key, u64::MAX));
            assert_eq!(agency.remaining(key, 1_000_000), None);
        }
    }

    #[test]
    fn test_remaining_non_increasing_and_floored() {
        let demo = PlanRegistry::builtin().entitlements(PlanTier::Demo);
        let mut last = u64::MAX;
        for current in [0, 50, 99, 100, 150] {
            let remaining = demo
                .remaining(LimitKey::MaxContacts, current)
                .expect("demo contacts are bounded");
            assert!(remaining <= last);
            last = remaining;
        }
        assert_eq!(demo.remaining(LimitKey::MaxContacts, 150), Some(0));
    }

    #[test]
    fn test_remaining_none_iff_always_permitted() {
        let registry = PlanRegistry::builtin();
        for tier in PlanTier::ALL {
            let ent = registry.entitlements(tier);
            for key in LimitKey::ALL {
                let unbounded = ent.remaining(key, 0).is_none();
                // An unbounded ceiling permits any value; a bounded one
                // must fail at its own ceiling.
                if unbounded {
                    assert!(ent.meets_limit(key, u64::MAX));
                } else {
                    let ceiling = match ent.plan().limits.get(key) {
                        Limit::Bounded(c) => c,
                        Limit::Unlimited => unreachable!(),
                    };
                    assert!(!ent.meets_limit(key, ceiling));
                }
            }
        }
    }

    #[test]
    fn test_capabilities_not_inherited_by_rank() {
        let registry = PlanRegistry::builtin();
        let demo = registry.entitlements(PlanTier::Demo);
        let agency = registry.entitlements(PlanTier::Agency);
        let enterprise = registry.entitlements(PlanTier::Enterprise);

        assert!(!demo.has_capability(CapabilityKey::AdvancedAnalytics));
        assert!(agency.has_capability(CapabilityKey::AdvancedAnalytics));
        assert!(enterprise.has_capability(CapabilityKey::WhiteLabel));
        // Agency outranks demo but still lacks white-label: the flag is per
        // definition, not rank-derived.
        assert!(!agency.has_capability(CapabilityKey::WhiteLabel));
    }

    #[test]
    fn test_limit_status_levels() {
        let demo = PlanRegistry::builtin().entitlements(PlanTier::Demo);

        let status = demo.limit_status(LimitKey::MaxContacts, 50).unwrap();
        assert_eq!(status.alert, LimitAlert::Ok);
        assert_eq!(status.remaining, 50);
        assert!((status.usage_pct - 50.0).abs() < f64::EPSILON);

        // 80 used of 100 -> 20 remaining, exactly the near-limit threshold
        let status = demo.limit_status(LimitKey::MaxContacts, 80).unwrap();
        assert_eq!(status.alert, LimitAlert::NearLimit);

        let status = demo.limit_status(LimitKey::MaxContacts, 100).unwrap();
        assert_eq!(status.alert, LimitAlert::AtLimit);
        assert_eq!(status.remaining, 0);

        // Past the ceiling: clamped, still at-limit
        let status = demo.limit_status(LimitKey::MaxContacts, 150).unwrap();
        assert_eq!(status.alert, LimitAlert::AtLimit);
        assert!((status.usage_pct - 100.0).abs() < f64::EPSILON);

        // Unlimited limits have no indicator
        let agency = PlanRegistry::builtin().entitlements(PlanTier::Agency);
        assert!(agency.limit_status(LimitKey::MaxContacts, 1_000_000).is_none());
    }

    #[test]
    fn test_builtin_plan_values() {
        let registry = PlanRegistry::builtin();

        let demo = registry.definition_of(PlanTier::Demo);
        assert_eq!(demo.price_usd, 0);
        assert_eq!(demo.limits.max_conversations, Limit::Bounded(25));
        assert_eq!(demo.limits.max_workflows, Limit::Bounded(3));
        assert_eq!(demo.limits.max_campaigns, Limit::Bounded(2));

        let agency = registry.definition_of(PlanTier::Agency);
        assert_eq!(agency.price_usd, 99);
        assert!(agency.limits.max_contacts.is_unlimited());
        assert!(agency.capabilities.priority_support);
        assert!(!agency.capabilities.dedicated_manager);

        let enterprise = registry.definition_of(PlanTier::Enterprise);
        assert_eq!(enterprise.price_usd, 299);
        assert!(enterprise.capabilities.custom_integrations);
    }
}

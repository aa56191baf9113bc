//! Session-scoped subscription state
//!
//! Holds the one mutable value in the entitlement picture: which tier the
//! active session is on. Owned by the [`DataStore`](crate::store::DataStore)
//! and passed to callers explicitly; there is no global current-plan. Not
//! persisted — a profile store would be the collaborator for that.

use crate::entitlements::{Entitlements, PlanRegistry};
use crate::models::PlanTier;
use parking_lot::RwLock;

/// Current plan for the active session
///
/// Starts on the lowest tier; changes only through an explicit
/// [`set_plan`](Subscription::set_plan).
#[derive(Debug)]
pub struct Subscription {
    current: RwLock<PlanTier>,
}

impl Subscription {
    /// New session on the lowest tier
    pub fn new() -> Self {
        Self::with_plan(PlanTier::lowest())
    }

    /// New session on a specific tier
    pub fn with_plan(tier: PlanTier) -> Self {
        Self {
            current: RwLock::new(tier),
        }
    }

    pub fn current_plan(&self) -> PlanTier {
        *self.current.read()
    }

    /// Switch tiers; returns the previous tier
    ///
    /// Handles upgrades and downgrades alike — tier selection is the user's
    /// call, payment happens elsewhere.
    pub fn set_plan(&self, tier: PlanTier) -> PlanTier {
        std::mem::replace(&mut *self.current.write(), tier)
    }

    pub fn is_demo(&self) -> bool {
        self.current_plan() == PlanTier::lowest()
    }

    /// Evaluation context for the session's current tier
    pub fn entitlements<'a>(&self, registry: &'a PlanRegistry) -> Entitlements<'a> {
        registry.entitlements(self.current_plan())
    }

    /// Tier the upgrade flow should offer next, `None` at the top
    pub fn upgrade_target(&self) -> Option<PlanTier> {
        self.current_plan().next()
    }
}

impl Default for Subscription {
    fn default() -> Self {
        Self::new()
    }
}

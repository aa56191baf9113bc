//! CLI commands for plan inspection and entitlement checks
//!
//! Renders the plan registry with comfy-table and evaluates one-off
//! entitlement questions for scripting (exit code 1 on denial).

use anyhow::{bail, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table};
use snapstudio_core::entitlements::PlanRegistry;
use snapstudio_core::models::{CapabilityKey, Limit, LimitKey, PlanTier};

/// Print the plan registry as a table or JSON
pub fn run_plans(json: bool) -> Result<()> {
    let registry = PlanRegistry::builtin();

    if json {
        println!("{}", serde_json::to_string_pretty(registry.definitions())?);
        return Ok(());
    }

    let mut limits_table = Table::new();
    limits_table.set_content_arrangement(ContentArrangement::Dynamic);
    let mut header = vec!["Plan".to_string(), "Price".to_string()];
    header.extend(LimitKey::ALL.iter().map(|key| key.label().to_string()));
    limits_table.set_header(header);

    for def in registry.definitions() {
        let mut row = vec![
            Cell::new(&def.name),
            Cell::new(format!("${}/mo", def.price_usd)),
        ];
        for key in LimitKey::ALL {
            row.push(match def.limits.get(key) {
                Limit::Bounded(ceiling) => Cell::new(ceiling),
                Limit::Unlimited => Cell::new("unlimited").fg(Color::Green),
            });
        }
        limits_table.add_row(row);
    }

    let mut caps_table = Table::new();
    caps_table.set_content_arrangement(ContentArrangement::Dynamic);
    let mut header = vec!["Capability".to_string()];
    header.extend(
        registry
            .definitions()
            .iter()
            .map(|def| def.name.clone()),
    );
    caps_table.set_header(header);

    for key in CapabilityKey::ALL {
        let mut row = vec![Cell::new(key.label())];
        for def in registry.definitions() {
            row.push(if def.capabilities.get(key) {
                Cell::new("yes").fg(Color::Green)
            } else {
                Cell::new("-")
            });
        }
        caps_table.add_row(row);
    }

    println!("{limits_table}");
    println!();
    println!("{caps_table}");
    Ok(())
}

/// Evaluate one entitlement question; exits 1 when denied
pub fn run_check(
    plan: &str,
    capability: Option<&str>,
    limit: Option<&str>,
    current: Option<u64>,
    requires: Option<&str>,
) -> Result<()> {
    let tier: PlanTier = plan.parse()?;
    let registry = PlanRegistry::builtin();
    let entitlements = registry.entitlements(tier);
    let name = &entitlements.plan().name;

    let allowed = match (capability, limit, requires) {
        (Some(capability), None, None) => {
            let key = parse_capability_key(capability)?;
            let granted = entitlements.has_capability(key);
            println!(
                "{} on {}: {}",
                key.label(),
                name,
                if granted { "granted" } else { "denied" }
            );
            granted
        }
        (None, Some(limit), None) => {
            let key = parse_limit_key(limit)?;
            // clap enforces --current alongside --limit
            let current = current.unwrap_or_default();
            let allowed = entitlements.meets_limit(key, current);
            match entitlements.remaining(key, current) {
                Some(remaining) => println!(
                    "{} on {}: {} used, {} remaining: {}",
                    key.label(),
                    name,
                    current,
                    remaining,
                    if allowed { "allowed" } else { "at limit" }
                ),
                None => println!("{} on {}: unlimited: allowed", key.label(), name),
            }
            allowed
        }
        (None, None, Some(required)) => {
            let required: PlanTier = required.parse()?;
            let granted = entitlements.has_access(required);
            println!(
                "{} access from {}: {}",
                required,
                name,
                if granted { "granted" } else { "requires upgrade" }
            );
            granted
        }
        _ => bail!("pass exactly one of --capability, --limit, or --requires"),
    };

    if !allowed {
        std::process::exit(1);
    }
    Ok(())
}

fn parse_limit_key(s: &str) -> Result<LimitKey> {
    Ok(match s {
        "max-contacts" => LimitKey::MaxContacts,
        "max-conversations" => LimitKey::MaxConversations,
        "max-workflows" => LimitKey::MaxWorkflows,
        "max-campaigns" => LimitKey::MaxCampaigns,
        other => bail!(
            "unknown limit '{}' (expected one of: max-contacts, max-conversations, max-workflows, max-campaigns)",
            other
        ),
    })
}

fn parse_capability_key(s: &str) -> Result<CapabilityKey> {
    Ok(match s {
        "advanced-analytics" => CapabilityKey::AdvancedAnalytics,
        "white-label" => CapabilityKey::WhiteLabel,
        "custom-integrations" => CapabilityKey::CustomIntegrations,
        "priority-support" => CapabilityKey::PrioritySupport,
        "dedicated-manager" => CapabilityKey::DedicatedManager,
        other => bail!(
            "unknown capability '{}' (expected one of: advanced-analytics, white-label, custom-integrations, priority-support, dedicated-manager)",
            other
        ),
    })
}

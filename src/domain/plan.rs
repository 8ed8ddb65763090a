use serde::{Deserialize, Serialize};

/// A membership tier. Plans are created and edited out-of-band (see the
/// `seed` binary); within a session the server treats the catalog as
/// read-only. Invariant: `duration_days > 0` for active plans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    /// Whole pesos (COP).
    pub price: i64,
    pub duration_days: i64,
    pub is_active: bool,
}

/// The loaded catalog: active plans only, sorted by duration.
#[derive(Debug, Clone, Default)]
pub struct PlanCatalog {
    plans: Vec<Plan>,
}

impl PlanCatalog {
    pub fn new(mut plans: Vec<Plan>) -> Self {
        plans.retain(|p| p.is_active);
        plans.sort_by_key(|p| p.duration_days);
        Self { plans }
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Resolve a plan reference by exact id or case-insensitive display name.
    pub fn resolve(&self, reference: &str) -> Option<&Plan> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }
        self.plans.iter().find(|p| {
            p.id == reference || p.name.to_lowercase() == reference.to_lowercase()
        })
    }
}

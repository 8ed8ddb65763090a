use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A record of money received. Never mutated; deleted only together with its
/// owning member. The coverage window mirrors the window applied to the
/// member at the time of payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub member_id: Uuid,
    pub plan_id: String,
    /// Whole pesos (COP).
    pub amount: i64,
    /// Free-form method as entered by staff (e.g. `efectivo`).
    pub method: String,
    pub paid_at: DateTime<Utc>,
    pub coverage_start: DateTime<Utc>,
    pub coverage_end: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub registered_at: DateTime<Utc>,
    /// Current plan; absent for members imported without a recognizable plan.
    pub plan_id: Option<String>,
    pub membership_start: Option<DateTime<Utc>>,
    pub membership_end: Option<DateTime<Utc>>,
    pub status: MembershipStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Stored membership state. Redundant with the window dates on purpose: the
/// dashboard counts go by this label, while the overdue check goes by the
/// end date alone and so also catches stale `active` labels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    Active,
    Expired,
}

impl MembershipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Active => "active",
            MembershipStatus::Expired => "expired",
        }
    }

    /// Stored labels are matched case-insensitively.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "active" => Some(MembershipStatus::Active),
            "expired" => Some(MembershipStatus::Expired),
            _ => None,
        }
    }
}

/// Staff registration form: member details plus the initial payment.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterMemberRequest {
    #[validate(length(min = 1, message = "first name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last name is required"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    #[validate(email)]
    pub email: Option<String>,
    pub plan_id: String,
    /// Defaults to the plan price.
    pub amount: Option<i64>,
    #[validate(length(min = 1, message = "payment method is required"))]
    pub method: String,
    /// Payment date; defaults to today.
    pub paid_on: Option<NaiveDate>,
}

/// Renewal form: a payment recorded against an existing member.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RenewMembershipRequest {
    pub member_id: Uuid,
    pub plan_id: String,
    pub amount: Option<i64>,
    #[validate(length(min = 1, message = "payment method is required"))]
    pub method: String,
    pub paid_on: Option<NaiveDate>,
}

/// Membership fields rewritten on the member row when a renewal commits.
#[derive(Debug, Clone)]
pub struct MembershipRenewal {
    pub plan_id: String,
    pub membership_start: DateTime<Utc>,
    pub membership_end: DateTime<Utc>,
}

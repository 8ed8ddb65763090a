use std::sync::Arc;

use chrono::{Local, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dates::{add_days, noon_utc},
    domain::*,
    error::{AppError, Result},
    repository::{MemberRepository, PlanRepository},
};

pub struct MemberService {
    member_repo: Arc<dyn MemberRepository>,
    plan_repo: Arc<dyn PlanRepository>,
}

impl MemberService {
    pub fn new(member_repo: Arc<dyn MemberRepository>, plan_repo: Arc<dyn PlanRepository>) -> Self {
        Self {
            member_repo,
            plan_repo,
        }
    }

    async fn active_plan(&self, plan_id: &str) -> Result<Plan> {
        let plan = self
            .plan_repo
            .find_by_id(plan_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Plan '{}' not found", plan_id)))?;
        if !plan.is_active {
            return Err(AppError::BadRequest(format!(
                "Plan '{}' is no longer offered",
                plan_id
            )));
        }
        Ok(plan)
    }

    /// Register a member together with the initial payment, one transaction.
    /// The member always comes in active, matching the paper flow: staff
    /// register people at the desk when they pay.
    pub async fn register(&self, request: RegisterMemberRequest) -> Result<Member> {
        request.validate()?;

        let plan = self.active_plan(&request.plan_id).await?;
        let paid_on = request.paid_on.unwrap_or_else(|| Local::now().date_naive());
        let start = noon_utc(paid_on);
        let end = noon_utc(add_days(paid_on, plan.duration_days));
        let now = Utc::now();

        let member = Member {
            id: Uuid::new_v4(),
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            phone: request.phone.trim().to_string(),
            email: request
                .email
                .as_deref()
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(String::from),
            registered_at: now,
            plan_id: Some(plan.id.clone()),
            membership_start: Some(start),
            membership_end: Some(end),
            status: MembershipStatus::Active,
            created_at: now,
            updated_at: now,
        };

        let payment = Payment {
            id: Uuid::new_v4(),
            member_id: member.id,
            plan_id: plan.id.clone(),
            amount: request.amount.unwrap_or(plan.price),
            method: request.method,
            paid_at: start,
            coverage_start: start,
            coverage_end: end,
            created_at: now,
        };

        self.member_repo.register(&member, &payment).await?;
        tracing::info!(member_id = %member.id, plan = %plan.id, "registered member");
        Ok(member)
    }

    /// Record a renewal payment: new payment row plus the member's window,
    /// plan and status rewritten, one transaction.
    pub async fn record_renewal(&self, request: RenewMembershipRequest) -> Result<Member> {
        request.validate()?;

        let plan = self.active_plan(&request.plan_id).await?;
        let paid_on = request.paid_on.unwrap_or_else(|| Local::now().date_naive());
        let start = noon_utc(paid_on);
        let end = noon_utc(add_days(paid_on, plan.duration_days));
        let now = Utc::now();

        let renewal = MembershipRenewal {
            plan_id: plan.id.clone(),
            membership_start: start,
            membership_end: end,
        };
        let payment = Payment {
            id: Uuid::new_v4(),
            member_id: request.member_id,
            plan_id: plan.id.clone(),
            amount: request.amount.unwrap_or(plan.price),
            method: request.method,
            paid_at: start,
            coverage_start: start,
            coverage_end: end,
            created_at: now,
        };

        self.member_repo
            .renew(request.member_id, &renewal, &payment)
            .await?;
        tracing::info!(member_id = %request.member_id, plan = %plan.id, "recorded renewal");

        self.member_repo
            .find_by_id(request.member_id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve renewed member".to_string()))
    }

    pub async fn get(&self, id: Uuid) -> Result<Member> {
        self.member_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Member not found".to_string()))
    }

    /// List members, optionally filtered the way the desk search box works:
    /// case-insensitive substring over names and email, raw substring over
    /// the phone.
    pub async fn list(&self, filter: Option<&str>) -> Result<Vec<Member>> {
        let members = self.member_repo.list().await?;
        let needle = filter.map(str::trim).unwrap_or("").to_lowercase();
        if needle.is_empty() {
            return Ok(members);
        }
        Ok(members
            .into_iter()
            .filter(|m| {
                m.first_name.to_lowercase().contains(&needle)
                    || m.last_name.to_lowercase().contains(&needle)
                    || m.phone.contains(needle.as_str())
                    || m.email
                        .as_deref()
                        .is_some_and(|e| e.to_lowercase().contains(&needle))
            })
            .collect())
    }

    /// Remove a member and every payment referencing them.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let removed_payments = self.member_repo.delete_with_payments(id).await?;
        tracing::info!(member_id = %id, removed_payments, "deleted member");
        Ok(())
    }
}

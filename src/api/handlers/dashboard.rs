use axum::{extract::State, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    api::state::AppState,
    domain::Member,
    error::Result,
    messaging,
};

/// Dashboard entry for a member whose membership needs attention. Carries a
/// reminder link with the matching message already filled in.
#[derive(Debug, Serialize)]
pub struct ExpiryNoticeDto {
    member_id: Uuid,
    full_name: String,
    phone: String,
    ends_on: Option<String>,
    whatsapp_url: Option<String>,
}

impl ExpiryNoticeDto {
    fn new(member: &Member, gym_name: &str, already_expired: bool) -> Self {
        let ends_on = member.membership_end.map(|dt| dt.date_naive());
        let whatsapp_url = ends_on.and_then(|date| {
            let message = if already_expired {
                messaging::expired_message(gym_name, &member.first_name, date)
            } else {
                messaging::expiring_message(gym_name, &member.first_name, date)
            };
            messaging::whatsapp_link(&member.phone, &message)
        });
        Self {
            member_id: member.id,
            full_name: member.full_name(),
            phone: member.phone.clone(),
            ends_on: ends_on.map(|d| d.to_string()),
            whatsapp_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    active_count: usize,
    expired_count: usize,
    expiring_soon: Vec<ExpiryNoticeDto>,
    overdue: Vec<ExpiryNoticeDto>,
}

pub async fn summary(State(state): State<AppState>) -> Result<Json<DashboardResponse>> {
    let summary = state.service_context.dashboard_service.summary().await?;
    let gym_name = &state.settings.messaging.gym_name;

    Ok(Json(DashboardResponse {
        active_count: summary.active_count,
        expired_count: summary.expired_count,
        expiring_soon: summary
            .expiring_soon
            .iter()
            .map(|m| ExpiryNoticeDto::new(m, gym_name, false))
            .collect(),
        overdue: summary
            .overdue
            .iter()
            .map(|m| ExpiryNoticeDto::new(m, gym_name, true))
            .collect(),
    }))
}

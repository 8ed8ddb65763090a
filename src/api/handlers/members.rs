use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    api::state::AppState,
    domain::{Member, MembershipStatus, RegisterMemberRequest},
    error::Result,
    messaging,
};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Search text matched against names, phone and email.
    q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MemberDto {
    id: Uuid,
    first_name: String,
    last_name: String,
    phone: String,
    email: Option<String>,
    registered_at: String,
    plan_id: Option<String>,
    membership_start: Option<String>,
    membership_end: Option<String>,
    status: MembershipStatus,
    /// Prefilled WhatsApp conversation link, when the phone is usable.
    whatsapp_url: Option<String>,
}

impl MemberDto {
    pub fn from_member(member: Member, gym_name: &str) -> Self {
        let greeting = messaging::greeting_message(gym_name, &member.first_name);
        let whatsapp_url = messaging::whatsapp_link(&member.phone, &greeting);
        Self {
            id: member.id,
            first_name: member.first_name,
            last_name: member.last_name,
            phone: member.phone,
            email: member.email,
            registered_at: member.registered_at.to_rfc3339(),
            plan_id: member.plan_id,
            membership_start: member.membership_start.map(|dt| dt.to_rfc3339()),
            membership_end: member.membership_end.map(|dt| dt.to_rfc3339()),
            status: member.status,
            whatsapp_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    members: Vec<MemberDto>,
    total: usize,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>> {
    let members = state
        .service_context
        .member_service
        .list(params.q.as_deref())
        .await?;

    let gym_name = &state.settings.messaging.gym_name;
    let members: Vec<MemberDto> = members
        .into_iter()
        .map(|m| MemberDto::from_member(m, gym_name))
        .collect();
    let total = members.len();

    Ok(Json(ListResponse { members, total }))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MemberDto>> {
    let member = state.service_context.member_service.get(id).await?;
    Ok(Json(MemberDto::from_member(
        member,
        &state.settings.messaging.gym_name,
    )))
}

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterMemberRequest>,
) -> Result<(StatusCode, Json<MemberDto>)> {
    let member = state.service_context.member_service.register(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(MemberDto::from_member(
            member,
            &state.settings.messaging.gym_name,
        )),
    ))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode> {
    state.service_context.member_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

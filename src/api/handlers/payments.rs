use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    api::{handlers::members::MemberDto, state::AppState},
    domain::{Payment, RenewMembershipRequest},
    error::Result,
};

#[derive(Debug, Serialize)]
pub struct PaymentDto {
    id: Uuid,
    member_id: Uuid,
    plan_id: String,
    amount: i64,
    method: String,
    paid_at: String,
    coverage_start: String,
    coverage_end: String,
}

impl From<Payment> for PaymentDto {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            member_id: payment.member_id,
            plan_id: payment.plan_id,
            amount: payment.amount,
            method: payment.method,
            paid_at: payment.paid_at.to_rfc3339(),
            coverage_start: payment.coverage_start.to_rfc3339(),
            coverage_end: payment.coverage_end.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    payments: Vec<PaymentDto>,
    total: usize,
}

/// Record a renewal payment; returns the member with the extended window.
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<RenewMembershipRequest>,
) -> Result<(StatusCode, Json<MemberDto>)> {
    let member = state
        .service_context
        .member_service
        .record_renewal(request)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(MemberDto::from_member(
            member,
            &state.settings.messaging.gym_name,
        )),
    ))
}

pub async fn list_by_member(
    State(state): State<AppState>,
    Path(member_id): Path<Uuid>,
) -> Result<Json<ListResponse>> {
    let payments = state
        .service_context
        .payment_repo
        .list_by_member(member_id)
        .await?;

    let payments: Vec<PaymentDto> = payments.into_iter().map(Into::into).collect();
    let total = payments.len();
    Ok(Json(ListResponse { payments, total }))
}

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{api::state::AppState, domain::Plan, error::Result};

#[derive(Debug, Serialize)]
pub struct PlanDto {
    id: String,
    name: String,
    price: i64,
    duration_days: i64,
}

impl From<Plan> for PlanDto {
    fn from(plan: Plan) -> Self {
        Self {
            id: plan.id,
            name: plan.name,
            price: plan.price,
            duration_days: plan.duration_days,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    plans: Vec<PlanDto>,
}

/// Active catalog, shortest plan first.
pub async fn list(State(state): State<AppState>) -> Result<Json<ListResponse>> {
    let catalog = state.service_context.plan_service.catalog().await?;
    let plans = catalog
        .plans()
        .iter()
        .cloned()
        .map(Into::into)
        .collect();
    Ok(Json(ListResponse { plans }))
}

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::{
    api::state::AppState,
    error::{AppError, Result},
    import::{TEMPLATE_CSV, TEMPLATE_FILENAME},
};

/// Uploads above this size are rejected before parsing (a year of members
/// fits in a fraction of it).
const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    imported: usize,
    message: String,
}

/// Accept a spreadsheet export as a multipart file field and import it.
pub async fn import_members(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>> {
    let mut text: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart upload: {}", e)))?
    {
        if text.is_some() {
            continue;
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::Validation("File too large (max 5 MB)".to_string()));
        }
        // The export is treated as raw text; anything non-UTF-8 degrades
        // lossily instead of failing the whole import.
        text = Some(String::from_utf8_lossy(&data).into_owned());
    }

    let text = text.ok_or_else(|| AppError::BadRequest("No file in the upload".to_string()))?;
    let outcome = state
        .service_context
        .import_service
        .import_members(&text)
        .await?;

    Ok(Json(ImportResponse {
        imported: outcome.imported,
        message: format!(
            "Imported {} members. Renew them from the members list as they pay.",
            outcome.imported
        ),
    }))
}

/// The fixed template, BOM-prefixed so spreadsheet tools pick up the UTF-8
/// accents.
pub async fn download_template() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", TEMPLATE_FILENAME),
            ),
        ],
        format!("\u{feff}{}", TEMPLATE_CSV),
    )
}

//! Export Routes
//!
//! - GET /api/v1/export?format=csv|json - Download the whole item collection

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::api::dto::ExportParams;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::ledger::{export_items, ExportError, ExportFormat};

/// GET /api/v1/export
pub async fn export_data(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportParams>,
) -> ApiResult<Response> {
    let format: ExportFormat = params
        .format
        .parse()
        .map_err(|e: ExportError| ApiError::Validation(e.to_string()))?;

    let items = state.store.items().await;
    let body = export_items(&items, format).map_err(|e| ApiError::Internal(e.to_string()))?;

    let filename = format!(
        "shopledger_export_{}.{}",
        state.clock.today().format("%Y%m%d"),
        format.extension()
    );

    tracing::info!(items = items.len(), %format, "Exporting item collection");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        Body::from(body),
    )
        .into_response())
}

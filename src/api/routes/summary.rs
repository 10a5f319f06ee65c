//! Daily Summary Routes
//!
//! - GET /api/v1/summary - Today's items, investment and totals
//! - PUT /api/v1/summary/investment - Save today's investment
//! - POST /api/v1/summary/items - Add an item to today
//! - GET /api/v1/summary/report - Download the text report
//! - DELETE /api/v1/summary?confirm=true - Remove everything

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{
    ConfirmParams, InvestmentRequest, InvestmentResponse, ItemRequest, ResetResponse,
    SummaryResponse, SummaryRow,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::ledger::{DailySummary, ItemForm};
use crate::storage::Item;

fn summary_response(summary: &DailySummary) -> SummaryResponse {
    SummaryResponse {
        date: summary.date(),
        investment: summary.investment(),
        items: summary.items().iter().map(SummaryRow::from).collect(),
        totals: summary.totals(),
    }
}

/// GET /api/v1/summary
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<SummaryResponse> {
    let summary = state.summary().await;
    Json(summary_response(&summary))
}

/// PUT /api/v1/summary/investment
///
/// An empty value saves nothing and answers with a null investment.
pub async fn set_investment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<InvestmentRequest>,
) -> ApiResult<Json<InvestmentResponse>> {
    let mut summary = state.summary().await;
    let investment = summary.set_investment(&req.into_text()).await?;

    Ok(Json(InvestmentResponse {
        date: summary.date(),
        investment,
    }))
}

/// POST /api/v1/summary/items
pub async fn add_summary_item(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ItemRequest>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    let mut summary = state.summary().await;
    let item = summary.add_item(&ItemForm::from(req)).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/v1/summary/report
///
/// Served as an attachment named `Summary-<date>.txt`.
pub async fn download_report(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let summary = state.summary().await;
    let report = summary.report(&state.config.currency);

    tracing::info!(filename = %report.filename, "Serving summary report");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", report.filename),
            ),
        ],
        Body::from(report.content),
    )
        .into_response())
}

/// DELETE /api/v1/summary?confirm=true
pub async fn reset_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ConfirmParams>,
) -> ApiResult<Json<ResetResponse>> {
    let mut summary = state.summary().await;
    let cleared = summary.reset_all(|_| params.confirm).await?;
    if !cleared {
        return Err(ApiError::Validation(
            "reset requires confirm=true".to_string(),
        ));
    }

    Ok(Json(ResetResponse {
        status: "cleared".to_string(),
    }))
}

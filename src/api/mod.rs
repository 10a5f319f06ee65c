//! Shopledger REST API
//!
//! HTTP API layer over the two views, built with Axum.
//!
//! # Endpoints
//!
//! ## Item Registry
//! - `GET /api/v1/items` - List all items
//! - `POST /api/v1/items` - Add an item
//! - `PUT /api/v1/items/:id` - Edit an item
//! - `DELETE /api/v1/items/:id` - Delete an item
//! - `DELETE /api/v1/items?confirm=true` - Clear all items
//!
//! ## Daily Summary
//! - `GET /api/v1/summary` - Today's items, investment and totals
//! - `PUT /api/v1/summary/investment` - Save today's investment
//! - `POST /api/v1/summary/items` - Add an item to today
//! - `GET /api/v1/summary/report` - Download `Summary-<date>.txt`
//! - `DELETE /api/v1/summary?confirm=true` - Remove all items and the investment
//!
//! ## Export
//! - `GET /api/v1/export?format=csv|json` - Download every item
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use shopledger::api::{serve, ApiConfig, AppState};
//! use shopledger::clock::SystemClock;
//! use shopledger::storage::{LedgerStore, StorageConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(LedgerStore::open(StorageConfig::default()).await?);
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(store, Arc::new(SystemClock::default()), config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Item registry routes
        .route(
            "/items",
            get(routes::items::list_items)
                .post(routes::items::create_item)
                .delete(routes::items::reset_items),
        )
        .route(
            "/items/:id",
            put(routes::items::update_item).delete(routes::items::delete_item),
        )
        // Daily summary routes
        .route(
            "/summary",
            get(routes::summary::get_summary).delete(routes::summary::reset_summary),
        )
        .route("/summary/investment", put(routes::summary::set_investment))
        .route("/summary/items", post(routes::summary::add_summary_item))
        .route("/summary/report", get(routes::summary::download_report))
        // Export
        .route("/export", get(routes::export::export_data));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Shopledger API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Shopledger API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::{LedgerStore, StorageConfig};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use chrono::NaiveDate;
    use tempfile::tempdir;
    use tower::util::ServiceExt;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
    }

    async fn create_test_app() -> (Router, Arc<LedgerStore>, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = Arc::new(LedgerStore::open(StorageConfig::new(dir.path())).await.unwrap());
        let clock = Arc::new(FixedClock::on(today()));

        let state = AppState::new(Arc::clone(&store), clock, ApiConfig::default());
        let router = build_router(state);

        (router, store, dir)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let (app, _store, _dir) = create_test_app().await;

        for uri in ["/health/live", "/health/ready", "/health"] {
            let response = send(&app, "GET", uri, None).await;
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_list_items_empty() {
        let (app, _store, _dir) = create_test_app().await;

        let response = send(&app, "GET", "/api/v1/items", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_create_edit_delete_item() {
        let (app, store, _dir) = create_test_app().await;

        let response = send(
            &app,
            "POST",
            "/api/v1/items",
            Some(r#"{"itemName": "Pen", "costPrice": 5, "sellPrice": "8", "quantity": 10}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["date"], "2024-05-06");
        let id = created["id"].as_i64().unwrap();

        let response = send(
            &app,
            "PUT",
            &format!("/api/v1/items/{}", id),
            Some(r#"{"itemName": "Blue pen", "costPrice": 5, "sellPrice": 9, "quantity": 12}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let updated = body_json(response).await;
        assert_eq!(updated["id"], id);
        assert_eq!(updated["itemName"], "Blue pen");
        assert_eq!(updated["date"], "2024-05-06");

        let response = send(&app, "DELETE", &format!("/api/v1/items/{}", id), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(store.items().await.is_empty());

        let response = send(&app, "DELETE", &format!("/api/v1/items/{}", id), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_item_validation() {
        let (app, store, _dir) = create_test_app().await;

        let response = send(
            &app,
            "POST",
            "/api/v1/items",
            Some(r#"{"itemName": "", "costPrice": 5, "sellPrice": 8, "quantity": 10}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let response = send(&app, "POST", "/api/v1/items", Some("not json")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        assert!(store.items().await.is_empty());
    }

    #[tokio::test]
    async fn test_reset_items_requires_confirm() {
        let (app, store, _dir) = create_test_app().await;
        send(
            &app,
            "POST",
            "/api/v1/items",
            Some(r#"{"itemName": "Pen", "costPrice": 5, "sellPrice": 8, "quantity": 10}"#),
        )
        .await;

        let response = send(&app, "DELETE", "/api/v1/items", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.items().await.len(), 1);

        let response = send(&app, "DELETE", "/api/v1/items?confirm=true", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(store.items().await.is_empty());
    }

    #[tokio::test]
    async fn test_summary_flow() {
        let (app, _store, _dir) = create_test_app().await;

        let response = send(
            &app,
            "PUT",
            "/api/v1/summary/investment",
            Some(r#"{"investment": 1000}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["investment"], 1000.0);

        let response = send(
            &app,
            "POST",
            "/api/v1/summary/items",
            Some(r#"{"itemName": " Pen ", "quantity": "10", "costPrice": "5", "sellPrice": "8"}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let item = body_json(response).await;
        assert!(item.get("id").is_none());
        assert_eq!(item["itemName"], "Pen");

        let response = send(&app, "GET", "/api/v1/summary", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let summary = body_json(response).await;
        assert_eq!(summary["date"], "2024-05-06");
        assert_eq!(summary["items"].as_array().unwrap().len(), 1);
        assert_eq!(summary["items"][0]["lineSales"], 80.0);
        assert_eq!(summary["totals"]["totalCost"], 50.0);
        assert_eq!(summary["totals"]["totalSales"], 80.0);
        assert_eq!(summary["totals"]["totalProfit"], 30.0);
        assert_eq!(summary["totals"]["totalUnits"], 10);
        assert_eq!(summary["totals"]["finalBalance"], 1030.0);
    }

    #[tokio::test]
    async fn test_empty_investment_saves_nothing() {
        let (app, store, _dir) = create_test_app().await;

        let response = send(
            &app,
            "PUT",
            "/api/v1/summary/investment",
            Some(r#"{"investment": ""}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_json(response).await["investment"].is_null());
        assert_eq!(store.investment().await, None);

        let response = send(
            &app,
            "PUT",
            "/api/v1/summary/investment",
            Some(r#"{"investment": "plenty"}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_download_report() {
        let (app, _store, _dir) = create_test_app().await;
        send(
            &app,
            "POST",
            "/api/v1/summary/items",
            Some(r#"{"itemName": "Pen", "quantity": 10, "costPrice": 5, "sellPrice": 8}"#),
        )
        .await;

        let response = send(&app, "GET", "/api/v1/summary/report", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Summary-2024-05-06.txt\""
        );

        let text = body_text(response).await;
        assert!(text.starts_with("📅 Daily Summary Report - 2024-05-06"));
        assert!(text.ends_with("- Pen: Rs.8.00 × 10 = Rs.80.00 (Profit: Rs.30.00)"));
    }

    #[tokio::test]
    async fn test_export_csv() {
        let (app, _store, _dir) = create_test_app().await;
        send(
            &app,
            "POST",
            "/api/v1/items",
            Some(r#"{"itemName": "Pen", "costPrice": 5, "sellPrice": 8, "quantity": 10}"#),
        )
        .await;

        let response = send(&app, "GET", "/api/v1/export", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");

        let text = body_text(response).await;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id,itemName,costPrice,sellPrice,quantity,date");
        assert!(lines[1].ends_with(",Pen,5,8,10,2024-05-06"));

        let response = send(&app, "GET", "/api/v1/export?format=xml", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reset_summary() {
        let (app, store, _dir) = create_test_app().await;
        send(
            &app,
            "PUT",
            "/api/v1/summary/investment",
            Some(r#"{"investment": 10}"#),
        )
        .await;

        let response = send(&app, "DELETE", "/api/v1/summary?confirm=false", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(store.investment().await.is_some());

        let response = send(&app, "DELETE", "/api/v1/summary?confirm=true", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(store.investment().await, None);
    }
}

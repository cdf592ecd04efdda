// 🌐 REST API - Merchant resolution over HTTP
//
// GET /                         → health
// GET /health                   → {"status":"ok","merchants":N}
// GET /v1/merchant/resolve?q=…  → ResolveResult JSON

use crate::entities::merchant::MerchantRegistry;
use crate::matcher::resolve;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state; the registry is immutable, so no lock
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<MerchantRegistry>,
}

impl AppState {
    pub fn new(registry: MerchantRegistry) -> Self {
        AppState {
            registry: Arc::new(registry),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    merchants: usize,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Deserialize)]
pub struct ResolveQuery {
    q: Option<String>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /health - Health check
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        merchants: state.registry.len(),
    })
}

/// GET /v1/merchant/resolve?q= - Resolve a transaction description
async fn resolve_merchant(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> impl IntoResponse {
    let q = match query.q {
        Some(q) if !q.is_empty() => q,
        _ => {
            tracing::debug!("rejected resolve request without q");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "query parameter 'q' is required and must not be empty".to_string(),
                }),
            )
                .into_response();
        }
    };

    let result = resolve(&q, &state.registry);
    tracing::debug!(q = %q, merchant_id = ?result.merchant_id(), confidence = result.confidence(), "resolved");

    (StatusCode::OK, Json(result)).into_response()
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/v1/merchant/resolve", get(resolve_merchant))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// TESTS
// ============================================================================

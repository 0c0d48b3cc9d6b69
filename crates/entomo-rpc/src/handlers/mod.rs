//! JSON-RPC request handlers, split by domain.

mod catalog;
mod filters;
mod images;

use crate::server::AppState;
use crate::wrapper::wrap_response;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use entomo_core::{Catalog, CatalogError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, warn};

// ============================================================================
// JSON-RPC types
// ============================================================================

/// JSON-RPC 2.0 request structure.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 error structure.
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: String, data: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
                data,
            }),
            id,
        }
    }
}

// ============================================================================
// Parameter extraction helpers
// ============================================================================

/// Extract an optional string parameter, supporting both snake_case and camelCase.
pub(crate) fn get_str_param<'a>(params: &'a Value, snake: &str, camel: &str) -> Option<&'a str> {
    params
        .get(snake)
        .or_else(|| params.get(camel))
        .and_then(|v| v.as_str())
}

/// Extract a required string parameter or return an error.
pub(crate) fn require_str_param(
    params: &Value,
    snake: &str,
    camel: &str,
) -> entomo_core::Result<String> {
    get_str_param(params, snake, camel)
        .map(String::from)
        .ok_or_else(|| CatalogError::InvalidParams {
            message: format!("Missing required parameter: {}", snake),
        })
}

/// The category tag every catalogue method takes as `type`.
///
/// Only presence is checked here; the tag itself is validated by the core.
pub(crate) fn require_type_param(params: &Value) -> entomo_core::Result<String> {
    require_str_param(params, "type", "insectType")
}

// ============================================================================
// Blocking bridge
// ============================================================================

/// Run a synchronous catalogue call on the blocking pool.
pub(crate) async fn run_blocking<T, F>(state: &AppState, call: F) -> entomo_core::Result<T>
where
    F: FnOnce(&Catalog) -> entomo_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let catalog = Arc::clone(&state.catalog);
    tokio::task::spawn_blocking(move || call(&catalog))
        .await
        .map_err(|e| CatalogError::Other(format!("Catalogue task failed: {}", e)))?
}

// ============================================================================
// HTTP endpoints
// ============================================================================

/// Health check endpoint.
pub async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

/// Main JSON-RPC handler.
pub async fn handle_rpc(
    State(state): State<Arc<AppState>>,
    Json(request): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    let method = &request.method;
    let params = request.params.unwrap_or(Value::Object(Default::default()));
    let id = request.id.clone();

    debug!("RPC call: {}({:?})", method, params);

    // Handle built-in methods
    if method == "health_check" {
        return (
            StatusCode::OK,
            Json(JsonRpcResponse::success(id, json!({"status": "ok"}))),
        );
    }

    let result = dispatch_method(&state, method, &params).await;

    match result {
        Ok(value) => {
            let wrapped = wrap_response(method, value);
            (StatusCode::OK, Json(JsonRpcResponse::success(id, wrapped)))
        }
        Err(e) => {
            error!("RPC error for {}: {}", method, e);
            let code = e.to_rpc_error_code();
            let data = e.is_retryable().then(|| json!({"retryable": true}));
            (
                StatusCode::OK,
                Json(JsonRpcResponse::error(id, code, e.to_string(), data)),
            )
        }
    }
}

// ============================================================================
// Method dispatcher
// ============================================================================

/// Dispatch a method call to the appropriate domain handler.
async fn dispatch_method(
    state: &AppState,
    method: &str,
    params: &Value,
) -> entomo_core::Result<Value> {
    match method {
        // Search API
        "search" => catalog::search(state, params).await,
        "list_all" => catalog::list_all(state, params).await,
        "add_entity" => catalog::add_entity(state, params).await,

        // Filter vocabulary
        "get_filter_options" => filters::get_filter_options(state, params).await,

        // Images
        "match_image" => images::match_image(state, params).await,

        // Unknown method
        _ => {
            warn!("Method not found: {}", method);
            Err(CatalogError::Other(format!("Method not found: {}", method)))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

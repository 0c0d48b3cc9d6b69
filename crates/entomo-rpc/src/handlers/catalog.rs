//! Search, listing and record insertion handlers.

use super::{require_type_param, run_blocking};
use crate::server::AppState;
use entomo_core::{CatalogError, Criteria, NewEntity};
use serde_json::Value;

pub async fn search(state: &AppState, params: &Value) -> entomo_core::Result<Value> {
    let category = require_type_param(params)?;
    let criteria = Criteria::from_value(params.get("params").cloned().unwrap_or(Value::Null))?;

    let response = run_blocking(state, move |catalog| catalog.search(&category, &criteria)).await?;
    Ok(serde_json::to_value(response)?)
}

pub async fn list_all(state: &AppState, params: &Value) -> entomo_core::Result<Value> {
    let category = require_type_param(params)?;

    let response = run_blocking(state, move |catalog| catalog.list_all(&category)).await?;
    Ok(serde_json::to_value(response)?)
}

pub async fn add_entity(state: &AppState, params: &Value) -> entomo_core::Result<Value> {
    let category = require_type_param(params)?;
    let entity = params
        .get("entity")
        .cloned()
        .ok_or_else(|| CatalogError::InvalidParams {
            message: "Missing required parameter: entity".to_string(),
        })?;
    // Free-text size such as "60-72 mm" when explicit bounds are absent
    let size_text = entity.get("size").and_then(Value::as_str).map(String::from);
    let mut entity: NewEntity =
        serde_json::from_value(entity).map_err(|e| CatalogError::InvalidParams {
            message: format!("Invalid entity: {}", e),
        })?;
    if let Some(text) = size_text {
        if entity.size_min.is_none() && entity.size_max.is_none() {
            entity = entity.with_size_text(&text);
        }
    }

    let record = run_blocking(state, move |catalog| catalog.add_entity(&category, &entity)).await?;
    Ok(serde_json::to_value(record)?)
}

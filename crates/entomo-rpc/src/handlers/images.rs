//! Image matching handler.

use super::{require_str_param, require_type_param, run_blocking};
use crate::server::AppState;
use serde_json::Value;

pub async fn match_image(state: &AppState, params: &Value) -> entomo_core::Result<Value> {
    let category = require_type_param(params)?;
    let name = require_str_param(params, "name", "nameCommon")?;
    let description = params
        .get("description")
        .and_then(Value::as_str)
        .map(String::from);

    let image = run_blocking(state, move |catalog| {
        catalog.match_image(&category, &name, description.as_deref())
    })
    .await?;
    Ok(image.map(Value::String).unwrap_or(Value::Null))
}

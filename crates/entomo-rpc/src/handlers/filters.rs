//! Filter vocabulary handler.

use super::{require_type_param, run_blocking};
use crate::server::AppState;
use serde_json::Value;

pub async fn get_filter_options(state: &AppState, params: &Value) -> entomo_core::Result<Value> {
    let category = require_type_param(params)?;

    let vocabulary = run_blocking(state, move |catalog| catalog.filter_options(&category)).await?;
    Ok(serde_json::to_value(vocabulary)?)
}

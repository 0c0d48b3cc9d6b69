//! Response wrapping for frontend compatibility.
//!
//! The frontend expects `{success: true, ...}` envelopes. Handlers return the
//! raw core payload and this module shapes it per method.

use serde_json::{json, Map, Value};

/// Wrap a raw handler result in the envelope the frontend expects.
pub fn wrap_response(method: &str, result: Value) -> Value {
    match method {
        // Object payloads whose fields are lifted into the envelope
        "search" | "list_all" => merge_success(result),

        "get_filter_options" => {
            json!({
                "success": true,
                "options": if result.is_null() { json!({}) } else { result }
            })
        }

        "add_entity" => {
            json!({
                "success": true,
                "entity": result
            })
        }

        // `null` here means no image matched, which is still a success
        "match_image" => {
            json!({
                "success": true,
                "image": result
            })
        }

        _ => result,
    }
}

fn merge_success(result: Value) -> Value {
    let mut envelope = Map::new();
    envelope.insert("success".to_string(), Value::Bool(true));
    match result {
        Value::Object(fields) => envelope.extend(fields),
        Value::Null => {}
        other => {
            envelope.insert("result".to_string(), other);
        }
    }
    Value::Object(envelope)
}

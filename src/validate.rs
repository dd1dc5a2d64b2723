// src/validate.rs
//! Structural validation of parsed bulletin payloads.
//!
//! Checks run in a fixed order and stop at the first violation, so error
//! messages are deterministic across runs and producers can be pointed at
//! the exact defect. Partial acceptance is not a thing: one bad article
//! rejects the whole bulletin.

use serde_json::Value;

use crate::error::ResolveError;
use crate::types::Bulletin;

const BULLETIN_FIELDS: [&str; 5] = ["region", "date", "period", "generated_at", "articles"];
const ARTICLE_FIELDS: [&str; 3] = ["title", "summary", "category"];

pub fn validate(raw: &Value) -> Result<Bulletin, ResolveError> {
    let wrapper = raw
        .as_object()
        .ok_or_else(|| schema("payload is not an object"))?;
    let body = wrapper
        .get("bulletin")
        .ok_or_else(|| schema("missing `bulletin` wrapper"))?;
    let bulletin = body
        .as_object()
        .ok_or_else(|| schema("`bulletin` is not an object"))?;

    for field in BULLETIN_FIELDS {
        if !bulletin.contains_key(field) {
            return Err(schema(&format!("missing required field `{field}`")));
        }
    }

    let articles = bulletin
        .get("articles")
        .and_then(Value::as_array)
        .ok_or_else(|| schema("`articles` is not an array"))?;
    if articles.is_empty() {
        return Err(schema("`articles` is empty"));
    }

    for (i, article) in articles.iter().enumerate() {
        let obj = article
            .as_object()
            .ok_or_else(|| schema(&format!("article {i} is not an object")))?;
        for field in ARTICLE_FIELDS {
            if !obj.contains_key(field) {
                return Err(schema(&format!(
                    "article {i} missing required field `{field}`"
                )));
            }
        }
    }

    // Structural checks passed; let serde enforce field types and enums.
    serde_json::from_value(body.clone())
        .map_err(|e| schema(&format!("bulletin does not deserialize: {e}")))
}

fn schema(msg: &str) -> ResolveError {
    ResolveError::SchemaInvalid(msg.to_string())
}

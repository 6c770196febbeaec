//! Handler 模块

pub mod flow_handler;
pub mod survey_handler;

use axum::http::HeaderMap;

/// Extract the visitor id from the X-Visitor-Id header.
/// Falls back to "default" when the header is absent or malformed.
pub(crate) fn extract_visitor_id(headers: &HeaderMap) -> String {
    headers
        .get("X-Visitor-Id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "default".to_string())
}

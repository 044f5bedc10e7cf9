// Response projection
// A final rendering step over resolved outcomes, decoupled from the
// validation and persistence path

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Success-path rendering requested by the client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    #[default]
    Json,
    Xml,
}

/// Query parameters recognized on projected routes
#[derive(Debug, Default, Deserialize)]
pub struct FormatQuery {
    pub format: Option<String>,
}

impl ResponseFormat {
    /// `?format=xml` (case-insensitive) selects XML; anything else is JSON.
    pub fn from_query(query: &FormatQuery) -> Self {
        match query.format.as_deref() {
            Some(value) if value.eq_ignore_ascii_case("xml") => ResponseFormat::Xml,
            _ => ResponseFormat::Json,
        }
    }
}

/// Renders a resolved outcome in the requested format.
///
/// JSON success responses are wrapped in a `status`/`count` envelope keyed
/// by `resource`. Status codes >= 400 always render the data as plain JSON;
/// error payloads are not subject to the format switch.
pub fn project<T: Serialize>(
    resource: &str,
    data: &T,
    status: StatusCode,
    format: ResponseFormat,
) -> Response {
    let value = match serde_json::to_value(data) {
        Ok(value) => value,
        Err(err) => {
            tracing::error!("Response serialization failed: {}", err);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Response serialization failed"})),
            )
                .into_response();
        }
    };

    if status.is_client_error() || status.is_server_error() {
        return (status, Json(value)).into_response();
    }

    match format {
        ResponseFormat::Json => {
            let count = match &value {
                Value::Array(items) => items.len(),
                _ => 1,
            };

            let mut envelope = Map::new();
            envelope.insert("status".to_string(), json!("success"));
            envelope.insert("count".to_string(), json!(count));
            envelope.insert(resource.to_string(), value);

            (status, Json(Value::Object(envelope))).into_response()
        }
        ResponseFormat::Xml => {
            let document = xml_document(resource, &value);
            (
                status,
                [(header::CONTENT_TYPE, "application/xml")],
                document,
            )
                .into_response()
        }
    }
}

/// Builds a minimal XML document: collections become `<item>` sequences,
/// object fields become direct elements.
fn xml_document(resource: &str, value: &Value) -> String {
    let mut xml = format!("<{resource}>\n");
    match value {
        Value::Array(items) => {
            for item in items {
                xml.push_str("  <item>\n");
                if let Value::Object(fields) = item {
                    for (name, field) in fields {
                        xml.push_str(&format!("    <{name}>{}</{name}>\n", xml_text(field)));
                    }
                } else {
                    xml.push_str(&format!("    {}\n", xml_text(item)));
                }
                xml.push_str("  </item>\n");
            }
        }
        Value::Object(fields) => {
            for (name, field) in fields {
                xml.push_str(&format!("  <{name}>{}</{name}>\n", xml_text(field)));
            }
        }
        other => {
            xml.push_str(&format!("  {}\n", xml_text(other)));
        }
    }
    xml.push_str(&format!("</{resource}>"));
    xml
}

fn xml_text(value: &Value) -> String {
    match value {
        Value::String(text) => xml_escape(text),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

//! Request handling and extraction.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for every inbound request
//! - Decode inbound bodies into an opaque JSON value for forwarding
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing, echoed back on the response
//! - Body payloads are never validated against a schema

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderValue},
};
use serde_json::{Map, Value};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::http::response::ApiError;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Inbound request body as an opaque JSON value.
///
/// - `application/json` → parsed; must be an object or array
/// - `application/x-www-form-urlencoded` → nested object, see [`parse_form`]
/// - empty body or any other content type → `{}`
#[derive(Debug, Clone, PartialEq)]
pub struct InboundBody(pub Value);

impl<S> FromRequest<S> for InboundBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let kind = BodyKind::from_content_type(
            req.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        );

        let bytes = Bytes::from_request(req, state).await?;
        decode_body(&bytes, kind).map(InboundBody)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

impl BodyKind {
    fn from_content_type(content_type: Option<&str>) -> Self {
        let essence = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase());

        match essence.as_deref() {
            Some("application/json") => BodyKind::Json,
            Some("application/x-www-form-urlencoded") => BodyKind::Form,
            _ => BodyKind::Other,
        }
    }
}

fn decode_body(bytes: &[u8], kind: BodyKind) -> Result<Value, ApiError> {
    if bytes.is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    match kind {
        BodyKind::Form => Ok(parse_form(bytes)),
        BodyKind::Json => match serde_json::from_slice(bytes) {
            Ok(value @ (Value::Object(_) | Value::Array(_))) => Ok(value),
            Ok(_) => Err(ApiError::InvalidBody(
                "JSON body must be an object or an array".to_string(),
            )),
            Err(e) => Err(ApiError::InvalidBody(e.to_string())),
        },
        BodyKind::Other => Ok(Value::Object(Map::new())),
    }
}

/// Decode a urlencoded form into a nested object.
///
/// Repeated keys collect into an array, `a[b]=x` nests into `{"a": {"b": "x"}}`
/// and `a[]=x` always yields an array. When a key is used with conflicting
/// shapes the first shape wins.
fn parse_form(bytes: &[u8]) -> Value {
    let mut fields = Map::new();
    for (key, value) in url::form_urlencoded::parse(bytes) {
        let (root, path) = split_key(&key);
        insert_field(&mut fields, root, &path, Value::String(value.into_owned()));
    }
    Value::Object(fields)
}

/// `a[b][]` → `("a", ["b", ""])`. Malformed bracket keys are kept whole.
fn split_key(key: &str) -> (&str, Vec<&str>) {
    let open = match key.find('[') {
        Some(open) if open > 0 => open,
        _ => return (key, Vec::new()),
    };

    let mut segments = Vec::new();
    let mut rest = &key[open..];
    while let Some(inner) = rest.strip_prefix('[') {
        let Some(close) = inner.find(']') else {
            return (key, Vec::new());
        };
        segments.push(&inner[..close]);
        rest = &inner[close + 1..];
    }

    if !rest.is_empty() {
        return (key, Vec::new());
    }
    (&key[..open], segments)
}

fn insert_field(fields: &mut Map<String, Value>, key: &str, path: &[&str], value: Value) {
    match path.split_first() {
        None => append_field(fields, key, value),
        Some((&"", _)) => {
            if fields.contains_key(key) {
                append_field(fields, key, value);
            } else {
                fields.insert(key.to_string(), Value::Array(vec![value]));
            }
        }
        Some((next, rest)) => {
            let child = fields
                .entry(key.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(child) = child {
                insert_field(child, next, rest, value);
            }
        }
    }
}

fn append_field(fields: &mut Map<String, Value>, key: &str, value: Value) {
    match fields.get_mut(key) {
        None => {
            fields.insert(key.to_string(), value);
        }
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
    }
}

//! Request validation declared per route.
//!
//! A route's parameter struct implements [`Rules`] with a static table of
//! [`FieldRule`]s. The [`Validated`] extractor reads path, query and body
//! fields, checks and coerces them against the table, and deserializes the
//! coerced values into the struct. Any failure rejects the request with
//! `400 { "errors": [...] }` before the handler body runs.

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Map, Value};

/// Where a field is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Params,
    Query,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Int { min: Option<i64> },
    Decimal,
    Text { min_len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub location: Location,
    pub kind: Kind,
    pub optional: bool,
}

impl FieldRule {
    const fn new(name: &'static str, location: Location) -> Self {
        Self {
            name,
            location,
            kind: Kind::Text { min_len: 1 },
            optional: false,
        }
    }

    pub const fn param(name: &'static str) -> Self {
        Self::new(name, Location::Params)
    }

    pub const fn query(name: &'static str) -> Self {
        Self::new(name, Location::Query)
    }

    pub const fn body(name: &'static str) -> Self {
        Self::new(name, Location::Body)
    }

    pub const fn int(self) -> Self {
        Self {
            kind: Kind::Int { min: None },
            ..self
        }
    }

    /// Lower bound on an integer rule; only valid after [`FieldRule::int`].
    /// Rule tables are `const`, so misuse fails the build.
    pub const fn min(self, min: i64) -> Self {
        match self.kind {
            Kind::Int { .. } => Self {
                kind: Kind::Int { min: Some(min) },
                ..self
            },
            _ => panic!("min() applies to integer rules; call int() first"),
        }
    }

    pub const fn decimal(self) -> Self {
        Self {
            kind: Kind::Decimal,
            ..self
        }
    }

    /// Non-empty string (the default kind)
    pub const fn text(self) -> Self {
        self.min_len(1)
    }

    pub const fn min_len(self, min_len: usize) -> Self {
        Self {
            kind: Kind::Text { min_len },
            ..self
        }
    }

    pub const fn optional(self) -> Self {
        Self { optional: true, ..self }
    }
}

/// Parameter struct of a route. Field names in `RULES` are the wire names the
/// struct deserializes from.
pub trait Rules: DeserializeOwned {
    const RULES: &'static [FieldRule];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub location: Location,
    pub param: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub value: Value,
    pub msg: String,
}

impl FieldError {
    fn new(rule: &FieldRule, value: Value, msg: impl Into<String>) -> Self {
        Self {
            location: rule.location,
            param: rule.name.to_string(),
            value,
            msg: msg.into(),
        }
    }
}

/// Ordered list of field failures, answered as 400
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl IntoResponse for ValidationErrors {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(json!({ "errors": self.0 }))).into_response()
    }
}

/// Raw request fields, before any rule is applied
#[derive(Debug, Default, Clone)]
pub struct RequestInput {
    pub params: HashMap<String, String>,
    pub query: HashMap<String, String>,
    pub body: Map<String, Value>,
}

impl RequestInput {
    fn lookup(&self, rule: &FieldRule) -> Option<Value> {
        match rule.location {
            Location::Params => self.params.get(rule.name).cloned().map(Value::String),
            Location::Query => self.query.get(rule.name).cloned().map(Value::String),
            Location::Body => self.body.get(rule.name).filter(|v| !v.is_null()).cloned(),
        }
    }
}

/// Run every rule, collecting coerced values or all failures in rule order
pub fn evaluate(rules: &[FieldRule], input: &RequestInput) -> Result<Map<String, Value>, Vec<FieldError>> {
    let mut values = Map::new();
    let mut errors = Vec::new();

    for rule in rules {
        match input.lookup(rule) {
            None if rule.optional => {}
            None => errors.push(FieldError::new(rule, Value::Null, "is required")),
            Some(raw) => match coerce(rule.kind, &raw) {
                Ok(value) => {
                    values.insert(rule.name.to_string(), value);
                }
                Err(msg) => errors.push(FieldError::new(rule, raw, msg)),
            },
        }
    }

    if errors.is_empty() {
        Ok(values)
    } else {
        Err(errors)
    }
}

fn coerce(kind: Kind, raw: &Value) -> Result<Value, String> {
    match kind {
        Kind::Int { min } => {
            let n = match raw {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.parse::<i64>().ok(),
                _ => None,
            }
            .ok_or_else(|| "must be an integer".to_string())?;

            match min {
                Some(min) if n < min => Err(format!("must be an integer of at least {}", min)),
                _ => Ok(Value::from(n)),
            }
        }
        Kind::Decimal => {
            let text = match raw {
                Value::Number(n) => n.to_string(),
                Value::String(s) => s.clone(),
                _ => return Err("must be a decimal".to_string()),
            };
            Decimal::from_str(text.trim())
                .map(|d| Value::String(d.to_string()))
                .map_err(|_| "must be a decimal".to_string())
        }
        Kind::Text { min_len } => match raw {
            Value::String(s) if s.chars().count() >= min_len => Ok(Value::String(s.clone())),
            Value::String(_) => Err(format!("must be at least {} character(s) long", min_len)),
            _ => Err("must be a string".to_string()),
        },
    }
}

fn parse_body(bytes: &[u8]) -> Result<Map<String, Value>, FieldError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    let invalid = |msg: &str| FieldError {
        location: Location::Body,
        param: String::new(),
        value: Value::Null,
        msg: msg.to_string(),
    };

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(invalid("must be a JSON object")),
        Err(_) => Err(invalid("must be valid JSON")),
    }
}

/// Extractor running the route's rules; the inner value is the coerced
/// parameter struct.
#[derive(Debug, Clone)]
pub struct Validated<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Validated<T>
where
    T: Rules + Send,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        // Routes without captures have no params to offer
        let params = Path::<HashMap<String, String>>::from_request_parts(&mut parts, state)
            .await
            .map(|Path(p)| p)
            .unwrap_or_default();
        let query = Query::<HashMap<String, String>>::from_request_parts(&mut parts, state)
            .await
            .map(|Query(q)| q)
            .unwrap_or_default();

        let body = if T::RULES.iter().any(|r| r.location == Location::Body) {
            let bytes = Bytes::from_request(axum::http::Request::from_parts(parts, body), state)
                .await
                .map_err(IntoResponse::into_response)?;
            parse_body(&bytes).map_err(|e| ValidationErrors(vec![e]).into_response())?
        } else {
            Map::new()
        };

        let input = RequestInput { params, query, body };
        let values = evaluate(T::RULES, &input).map_err(|errors| ValidationErrors(errors).into_response())?;

        serde_json::from_value::<T>(Value::Object(values))
            .map(Validated)
            .map_err(|e| {
                ValidationErrors(vec![FieldError {
                    location: Location::Body,
                    param: String::new(),
                    value: Value::Null,
                    msg: e.to_string(),
                }])
                .into_response()
            })
    }
}

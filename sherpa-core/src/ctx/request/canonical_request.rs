use crate::ctx::request::RequestRejectError;
use http::HeaderMap;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Runtime-agnostic request handed to exactly one route handler invocation.
///
/// Built once by the transformer and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRequest {
    url: String,
    params: RequestParams,
    method: Method,
    headers: Headers,
    body: Body,
}

impl CanonicalRequest {
    pub fn new(
        url: String,
        params: RequestParams,
        method: Method,
        headers: Headers,
        body: Body,
    ) -> Self {
        Self {
            url,
            params,
            method,
            headers,
            body,
        }
    }

    /// Pathname of the request target, query stripped.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn params(&self) -> &RequestParams {
        &self.params
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn body_type(&self) -> BodyType {
        self.body.body_type()
    }

    pub fn into_inner(self) -> (String, RequestParams, Method, Headers, Body) {
        (self.url, self.params, self.method, self.headers, self.body)
    }
}

impl Serialize for CanonicalRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("CanonicalRequest", 6)?;
        s.serialize_field("url", &self.url)?;
        s.serialize_field("params", &self.params)?;
        s.serialize_field("method", &self.method)?;
        s.serialize_field("headers", &self.headers)?;
        s.serialize_field("body", &self.body)?;
        s.serialize_field("bodyType", &self.body.body_type())?;
        s.end()
    }
}

//-----------------------------------------------------------------------------
// Method
//-----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Connect,
    Trace,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
            Method::Connect => "CONNECT",
            Method::Trace => "TRACE",
        }
    }

    /// GET requests never carry a body at the canonical boundary.
    pub fn is_safe_read(self) -> bool {
        self == Method::Get
    }
}

impl FromStr for Method {
    type Err = RequestRejectError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "HEAD" => Ok(Method::Head),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            "OPTIONS" => Ok(Method::Options),
            "CONNECT" => Ok(Method::Connect),
            "TRACE" => Ok(Method::Trace),
            _ => Err(RequestRejectError::UnsupportedMethod(raw.to_string())),
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Method {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

//-----------------------------------------------------------------------------
// Body
//-----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BodyType {
    None,
    Text,
    #[serde(rename = "JSON")]
    Json,
}

/// Decoded payload. The variant doubles as the body type tag, so a body and
/// its type can never disagree.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    #[default]
    None,
    Text(String),
    Json(serde_json::Value),
}

impl Body {
    pub fn body_type(&self) -> BodyType {
        match self {
            Body::None => BodyType::None,
            Body::Text(_) => BodyType::Text,
            Body::Json(_) => BodyType::Json,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Body::None)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Body::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Body::Json(value) => Some(value),
            _ => None,
        }
    }
}

impl Serialize for Body {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Body::None => serializer.serialize_none(),
            Body::Text(text) => serializer.serialize_str(text),
            Body::Json(value) => value.serialize(serializer),
        }
    }
}

//-----------------------------------------------------------------------------
// Headers
//-----------------------------------------------------------------------------

/// Case-insensitive header lookup. Duplicate fields are already folded into a
/// single comma-separated value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Headers {
    headers: HeaderMap,
}

impl From<HeaderMap> for Headers {
    fn from(headers: HeaderMap) -> Self {
        Headers { headers }
    }
}

impl Headers {
    pub fn new(headers: HeaderMap) -> Self {
        Self { headers }
    }

    /// Looks a header up by name, ignoring case. Values that are not visible
    /// ASCII are reported as absent; see [`Headers::get_lossy`].
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Like [`Headers::get`], but any value is returned, decoded as UTF-8 with
    /// replacement characters (`obs-text` included).
    pub fn get_lossy(&self, name: &str) -> Option<Cow<'_, str>> {
        self.headers
            .get(name)
            .map(|v| String::from_utf8_lossy(v.as_bytes()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    pub fn content_length(&self) -> Option<u64> {
        self.headers
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn as_map(&self) -> &HeaderMap {
        &self.headers
    }
}

impl Serialize for Headers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sorted: BTreeMap<&str, Cow<'_, str>> = self
            .headers
            .iter()
            .map(|(name, value)| (name.as_str(), String::from_utf8_lossy(value.as_bytes())))
            .collect();

        let mut map = serializer.serialize_map(Some(sorted.len()))?;
        for (name, value) in sorted {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

//-----------------------------------------------------------------------------
// Params
//-----------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestParams {
    path: PathParams,
    query: QueryParams,
}

impl RequestParams {
    pub fn new(path: PathParams, query: QueryParams) -> Self {
        Self { path, query }
    }

    pub fn path(&self) -> &PathParams {
        &self.path
    }

    pub fn query(&self) -> &QueryParams {
        &self.query
    }
}

/// Captures of the dynamic route segments, keyed by segment name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PathParams(BTreeMap<String, String>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }
}

impl<K, V> FromIterator<(K, V)> for PathParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        PathParams(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    Single(String),
    Multiple(Vec<String>),
}

impl QueryValue {
    /// First occurrence of the parameter.
    pub fn first(&self) -> &str {
        match self {
            QueryValue::Single(value) => value,
            QueryValue::Multiple(values) => values.first().map(String::as_str).unwrap_or(""),
        }
    }

    pub fn all(&self) -> Vec<&str> {
        match self {
            QueryValue::Single(value) => vec![value.as_str()],
            QueryValue::Multiple(values) => values.iter().map(String::as_str).collect(),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            QueryValue::Single(existing) => {
                let first = std::mem::take(existing);
                *self = QueryValue::Multiple(vec![first, value]);
            }
            QueryValue::Multiple(values) => values.push(value),
        }
    }
}

/// Query string parameters. Keys seen once map to a single value, repeated
/// keys keep every value in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryParams(BTreeMap<String, QueryValue>);

impl QueryParams {
    pub fn get(&self, name: &str) -> Option<&QueryValue> {
        self.0.get(name)
    }

    pub fn first(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(QueryValue::first)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn append(&mut self, name: String, value: String) {
        match self.0.get_mut(&name) {
            Some(existing) => existing.push(value),
            None => {
                self.0.insert(name, QueryValue::Single(value));
            }
        }
    }
}

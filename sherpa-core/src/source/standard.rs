use async_trait::async_trait;
use bytes::Bytes;
use http::HeaderMap;
use std::io;
use thiserror::Error as ThisError;

/// Failure of a whole-body accessor on a [`StandardRequest`].
#[derive(Debug, ThisError)]
pub enum BodyReadError {
    #[error("request has no body")]
    Empty,

    #[error("body is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("failed to read body: {0}")]
    Transport(#[from] io::Error),

    #[error("body exceeds {limit} bytes")]
    TooLarge { limit: usize },
}

/// Promise-style request object of an edge runtime.
///
/// URL and method are always present; the body is read at most once through
/// one of the whole-body accessors.
#[async_trait]
pub trait StandardRequest: Send {
    fn url(&self) -> &str;

    fn method(&self) -> &str;

    fn headers(&self) -> &HeaderMap;

    /// Reads the whole body as UTF-8 text. An empty body yields an empty string.
    ///
    /// More than `limit` raw bytes yields [`BodyReadError::TooLarge`].
    async fn text(&mut self, limit: usize) -> Result<String, BodyReadError>;

    /// Reads and parses the whole body as JSON. An empty body yields [`BodyReadError::Empty`].
    ///
    /// The `limit` is checked against the raw bytes, before parsing.
    async fn json(&mut self, limit: usize) -> Result<serde_json::Value, BodyReadError>;
}

#[derive(Debug)]
enum BodyState {
    Pending(Bytes),
    Failed(io::Error),
    Used,
}

/// [`StandardRequest`] backed by an in-memory [`http::Request`].
#[derive(Debug)]
pub struct FetchRequest {
    url: String,
    method: String,
    headers: HeaderMap,
    body: BodyState,
}

impl FetchRequest {
    pub fn from_http(request: http::Request<Bytes>) -> Self {
        let (parts, body) = request.into_parts();

        Self {
            url: parts.uri.to_string(),
            method: parts.method.as_str().to_string(),
            headers: parts.headers,
            body: BodyState::Pending(body),
        }
    }

    /// A request whose body read fails with `err`, as when the client goes away mid-upload.
    pub fn failing(request: http::Request<()>, err: io::Error) -> Self {
        let (parts, _) = request.into_parts();

        Self {
            url: parts.uri.to_string(),
            method: parts.method.as_str().to_string(),
            headers: parts.headers,
            body: BodyState::Failed(err),
        }
    }

    fn take_body(&mut self, limit: usize) -> Result<Bytes, BodyReadError> {
        match std::mem::replace(&mut self.body, BodyState::Used) {
            BodyState::Pending(bytes) if bytes.len() > limit => {
                Err(BodyReadError::TooLarge { limit })
            }
            BodyState::Pending(bytes) => Ok(bytes),
            BodyState::Failed(err) => Err(BodyReadError::Transport(err)),
            BodyState::Used => Err(BodyReadError::Transport(io::Error::other(
                "body has already been read",
            ))),
        }
    }
}

impl From<http::Request<Bytes>> for FetchRequest {
    fn from(request: http::Request<Bytes>) -> Self {
        Self::from_http(request)
    }
}

#[async_trait]
impl StandardRequest for FetchRequest {
    fn url(&self) -> &str {
        &self.url
    }

    fn method(&self) -> &str {
        &self.method
    }

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    async fn text(&mut self, limit: usize) -> Result<String, BodyReadError> {
        let bytes = self.take_body(limit)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn json(&mut self, limit: usize) -> Result<serde_json::Value, BodyReadError> {
        let bytes = self.take_body(limit)?;
        if bytes.is_empty() {
            return Err(BodyReadError::Empty);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

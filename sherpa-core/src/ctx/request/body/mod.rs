mod standard;
mod streaming;

pub use standard::StandardAcquirer;
pub use streaming::StreamingAcquirer;

use crate::conf::types::{TransformConfig, TransportErrorPolicy};
use crate::ctx::request::{Body, Headers, Method, RequestRejectError};
use async_trait::async_trait;
use std::io;
use thiserror::Error as ThisError;

/// How the declared content type says the payload should be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// No usable `Content-Type`; any payload is discarded.
    Absent,
    Json,
    Text,
}

impl ContentKind {
    pub fn from_headers(headers: &Headers) -> Self {
        Self::from_content_type(headers.content_type())
    }

    /// Compares the MIME essence only, so `application/json; charset=utf-8` is JSON.
    /// Anything non-empty that is not JSON, parseable or not, is text.
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let Some(raw) = content_type.map(str::trim).filter(|c| !c.is_empty()) else {
            return ContentKind::Absent;
        };

        match raw.to_ascii_lowercase().parse::<mime::Mime>() {
            Ok(m) if m.essence_str() == mime::APPLICATION_JSON.essence_str() => ContentKind::Json,
            _ => ContentKind::Text,
        }
    }
}

/// Failure while a [`BodyAcquirer`] obtains the payload.
#[derive(Debug, ThisError)]
pub enum AcquireError {
    #[error("transport failed: {0}")]
    Transport(#[source] io::Error),

    #[error("malformed JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("payload exceeds {limit} bytes")]
    TooLarge { limit: usize },
}

/// Runtime-specific strategy for obtaining and decoding a request payload.
///
/// Implementations only see non-GET requests and must resolve exactly once.
#[async_trait]
pub trait BodyAcquirer: Send {
    async fn acquire(self, kind: ContentKind, limit: usize) -> Result<Body, AcquireError>;
}

/// Shared acquisition policy in front of every [`BodyAcquirer`].
///
/// - GET resolves to [`Body::None`] without touching the transport.
/// - So does a request without a usable `Content-Type`, whatever its payload.
/// - A declared `Content-Length` above the configured limit is rejected up front.
/// - Transport failures follow [`TransportErrorPolicy`].
pub async fn acquire_body<A>(
    acquirer: A,
    method: Method,
    headers: &Headers,
    config: &TransformConfig,
) -> Result<Body, RequestRejectError>
where
    A: BodyAcquirer,
{
    if method.is_safe_read() {
        return Ok(Body::None);
    }

    let kind = ContentKind::from_headers(headers);
    if kind == ContentKind::Absent {
        return Ok(Body::None);
    }

    let limit = config.max_body_bytes;
    if let Some(declared) = headers.content_length() {
        if declared > limit as u64 {
            return Err(RequestRejectError::PayloadTooLarge { limit });
        }
    }

    match acquirer.acquire(kind, limit).await {
        Ok(body) => Ok(body),
        Err(AcquireError::Malformed(e)) => Err(RequestRejectError::MalformedBody(e)),
        Err(AcquireError::TooLarge { limit }) => Err(RequestRejectError::PayloadTooLarge { limit }),
        Err(AcquireError::Transport(e)) => match config.transport_errors {
            TransportErrorPolicy::Lenient => {
                tracing::warn!(
                    error = %e,
                    %method,
                    "transport failed while reading request body, continuing without body"
                );
                Ok(Body::None)
            }
            TransportErrorPolicy::Strict => Err(RequestRejectError::TransportError(e)),
        },
    }
}

/// Decodes a fully accumulated payload according to `kind`.
pub(crate) fn classify(kind: ContentKind, payload: &[u8]) -> Result<Body, AcquireError> {
    if payload.is_empty() {
        return Ok(Body::None);
    }

    match kind {
        ContentKind::Absent => Ok(Body::None),
        ContentKind::Json => serde_json::from_slice(payload)
            .map(Body::Json)
            .map_err(AcquireError::Malformed),
        ContentKind::Text => Ok(Body::Text(String::from_utf8_lossy(payload).into_owned())),
    }
}

use http::StatusCode;
use thiserror::Error as ThisError;

/// Conditions that prevent a canonical request from being formed.
///
/// Each one is fatal for the call that raised it only.
#[derive(Debug, ThisError)]
pub enum RequestRejectError {
    #[error("request is missing its URL or method")]
    MissingRequestLine,

    #[error("invalid request url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported request method '{0}'")]
    UnsupportedMethod(String),

    #[error("malformed JSON body: {0}")]
    MalformedBody(#[source] serde_json::Error),

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("transport failed while reading request body: {0}")]
    TransportError(#[source] std::io::Error),
}

impl RequestRejectError {
    /// Status the layer above should answer with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingRequestLine
            | Self::InvalidUrl { .. }
            | Self::UnsupportedMethod(_)
            | Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::TransportError(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Stable machine-readable code, used as a log field.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingRequestLine => "missing_request_line",
            Self::InvalidUrl { .. } => "invalid_request_url",
            Self::UnsupportedMethod(_) => "unsupported_method",
            Self::MalformedBody(_) => "malformed_body",
            Self::PayloadTooLarge { .. } => "payload_too_large",
            Self::TransportError(_) => "transport_error",
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

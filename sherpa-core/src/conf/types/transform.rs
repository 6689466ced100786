use serde::{Deserialize, Serialize};

/// Default ceiling for buffered request payloads (~2mb).
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformConfig {
    /// Largest payload accepted, checked against `Content-Length` and, for the
    /// streaming runtime, against the bytes accumulated so far.
    pub max_body_bytes: usize,

    /// What to do when the transport fails while a body is being read.
    pub transport_errors: TransportErrorPolicy,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            transport_errors: TransportErrorPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportErrorPolicy {
    /// Log the failure and treat the request as having no body.
    #[default]
    Lenient,

    /// Reject the request with a transport error.
    Strict,
}

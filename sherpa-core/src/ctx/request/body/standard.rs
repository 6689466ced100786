use crate::ctx::request::Body;
use crate::ctx::request::body::{AcquireError, BodyAcquirer, ContentKind};
use crate::source::{BodyReadError, StandardRequest};
use async_trait::async_trait;

/// Body acquisition for edge runtimes: one awaited call to the accessor that
/// matches the content type. The size limit is handed to the accessor so both
/// runtimes reject the same payloads.
#[derive(Debug)]
pub struct StandardAcquirer<R> {
    request: R,
}

impl<R> StandardAcquirer<R>
where
    R: StandardRequest,
{
    pub fn new(request: R) -> Self {
        Self { request }
    }
}

#[async_trait]
impl<R> BodyAcquirer for StandardAcquirer<R>
where
    R: StandardRequest,
{
    async fn acquire(mut self, kind: ContentKind, limit: usize) -> Result<Body, AcquireError> {
        let read = match kind {
            ContentKind::Absent => return Ok(Body::None),
            ContentKind::Json => self.request.json(limit).await.map(Body::Json),
            ContentKind::Text => self.request.text(limit).await.map(|text| {
                if text.is_empty() {
                    Body::None
                } else {
                    Body::Text(text)
                }
            }),
        };

        match read {
            Ok(body) => Ok(body),
            Err(BodyReadError::Empty) => Ok(Body::None),
            Err(BodyReadError::Malformed(e)) => Err(AcquireError::Malformed(e)),
            Err(BodyReadError::Transport(e)) => Err(AcquireError::Transport(e)),
            Err(BodyReadError::TooLarge { limit }) => Err(AcquireError::TooLarge { limit }),
        }
    }
}

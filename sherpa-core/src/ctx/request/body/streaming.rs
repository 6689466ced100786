use crate::ctx::request::Body;
use crate::ctx::request::body::{AcquireError, BodyAcquirer, ContentKind, classify};
use crate::source::{BodyEvent, StreamingRequest};
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use std::io;
use tokio::sync::mpsc;

/// Accumulates a pushed body and resolves once, on end, error or overflow.
#[derive(Debug)]
pub(crate) enum Acquisition {
    Awaiting { buf: BytesMut, limit: usize },
    Resolved,
}

#[derive(Debug)]
pub(crate) enum Resolution {
    Complete(Bytes),
    Failed(io::Error),
    Overflow { limit: usize },
}

impl Acquisition {
    pub(crate) fn new(limit: usize) -> Self {
        Acquisition::Awaiting {
            buf: BytesMut::new(),
            limit,
        }
    }

    pub(crate) fn is_resolved(&self) -> bool {
        matches!(self, Acquisition::Resolved)
    }

    /// Feeds one event. Returns the resolution on the transition to
    /// `Resolved`, and `None` for every event before or after it.
    pub(crate) fn on_event(&mut self, event: BodyEvent) -> Option<Resolution> {
        let Acquisition::Awaiting { buf, limit } = self else {
            tracing::trace!(?event, "ignoring body event after resolution");
            return None;
        };

        match event {
            BodyEvent::Data(chunk) => {
                if buf.len() + chunk.len() > *limit {
                    let limit = *limit;
                    *self = Acquisition::Resolved;
                    return Some(Resolution::Overflow { limit });
                }
                buf.extend_from_slice(&chunk);
                None
            }
            BodyEvent::End => {
                let payload = std::mem::take(buf).freeze();
                *self = Acquisition::Resolved;
                Some(Resolution::Complete(payload))
            }
            BodyEvent::Error(err) => {
                *self = Acquisition::Resolved;
                Some(Resolution::Failed(err))
            }
        }
    }
}

/// Body acquisition for the local streaming server.
///
/// Chunks are concatenated in delivery order and classified only after the
/// end-of-transmission notification.
#[derive(Debug)]
pub struct StreamingAcquirer {
    events: mpsc::UnboundedReceiver<BodyEvent>,
}

impl StreamingAcquirer {
    pub fn new(request: StreamingRequest) -> Self {
        Self {
            events: request.into_events(),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_events(events: mpsc::UnboundedReceiver<BodyEvent>) -> Self {
        Self { events }
    }
}

#[async_trait]
impl BodyAcquirer for StreamingAcquirer {
    async fn acquire(mut self, kind: ContentKind, limit: usize) -> Result<Body, AcquireError> {
        let mut state = Acquisition::new(limit);

        let resolution = loop {
            let event = self.events.recv().await.unwrap_or_else(|| {
                BodyEvent::Error(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "body stream closed before end of transmission",
                ))
            });

            if let Some(resolution) = state.on_event(event) {
                break resolution;
            }
        };

        debug_assert!(state.is_resolved());

        match resolution {
            Resolution::Complete(payload) => classify(kind, &payload),
            Resolution::Failed(err) => Err(AcquireError::Transport(err)),
            Resolution::Overflow { limit } => Err(AcquireError::TooLarge { limit }),
        }
    }
}

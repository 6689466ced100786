use bytes::Bytes;
use std::io;
use tokio::sync::mpsc;

/// Notification pushed by a streaming transport while it delivers a request body.
#[derive(Debug)]
pub enum BodyEvent {
    /// Next chunk of the payload, in delivery order.
    Data(Bytes),

    /// No more data will follow.
    End,

    /// The transport failed; no more data will follow.
    Error(io::Error),
}

/// Socket-style request as handed over by the local server.
///
/// The request line may be incomplete, and the body only arrives through
/// [`BodyEvent`]s pushed by the transport on the paired [`BodySender`].
#[derive(Debug)]
pub struct StreamingRequest {
    url: Option<String>,
    method: Option<String>,
    headers: Vec<(String, String)>,
    events: mpsc::UnboundedReceiver<BodyEvent>,
}

impl StreamingRequest {
    /// Creates the request together with the transport-side handle that feeds its body.
    pub fn new(
        url: Option<String>,
        method: Option<String>,
        headers: Vec<(String, String)>,
    ) -> (Self, BodySender) {
        let (tx, rx) = mpsc::unbounded_channel();

        let request = Self {
            url,
            method,
            headers,
            events: rx,
        };

        (request, BodySender { tx })
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub(crate) fn into_events(self) -> mpsc::UnboundedReceiver<BodyEvent> {
        self.events
    }
}

/// Transport side of a [`StreamingRequest`] body.
///
/// Dropping the sender without calling [`BodySender::end`] reads as a disconnect.
#[derive(Debug)]
pub struct BodySender {
    tx: mpsc::UnboundedSender<BodyEvent>,
}

impl BodySender {
    /// Pushes a raw event. Returns `false` once the body is no longer being read.
    pub fn send(&self, event: BodyEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn data(&self, chunk: impl Into<Bytes>) -> bool {
        self.send(BodyEvent::Data(chunk.into()))
    }

    pub fn end(self) {
        let _ = self.tx.send(BodyEvent::End);
    }

    pub fn error(self, err: io::Error) {
        let _ = self.tx.send(BodyEvent::Error(err));
    }
}

use bytes::Bytes;
use sherpa_core::source::{FetchRequest, StreamingRequest};
use std::io;

/// One logical HTTP request, renderable as the native request of either runtime.
#[derive(Debug, Clone)]
pub struct LogicalRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
    /// The transport fails after delivering the body instead of ending it.
    pub broken_transport: bool,
}

impl LogicalRequest {
    pub fn new(method: &str, url: &str) -> Self {
        Self {
            method: method.to_string(),
            url: url.to_string(),
            headers: Vec::new(),
            body: Bytes::new(),
            broken_transport: false,
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn broken_transport(mut self) -> Self {
        self.broken_transport = true;
        self
    }

    /// Streaming rendition. The body is pushed in `chunk_size` pieces from a
    /// spawned task, so the transformer has to wait for the end of the stream.
    /// Must be called inside a tokio runtime.
    pub fn streaming(&self, chunk_size: usize) -> StreamingRequest {
        let (request, sender) = StreamingRequest::new(
            Some(self.url.clone()),
            Some(self.method.clone()),
            self.headers.clone(),
        );

        let body = self.body.clone();
        let broken = self.broken_transport;
        let chunk_size = chunk_size.max(1);
        tokio::spawn(async move {
            let mut offset = 0;
            while offset < body.len() {
                let end = (offset + chunk_size).min(body.len());
                sender.data(body.slice(offset..end));
                offset = end;
                tokio::task::yield_now().await;
            }
            if broken {
                sender.error(reset());
            } else {
                sender.end();
            }
        });

        request
    }

    pub fn standard(&self) -> FetchRequest {
        let mut builder = http::Request::builder()
            .method(self.method.as_str())
            .uri(self.url.as_str());
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if self.broken_transport {
            return FetchRequest::failing(
                builder
                    .body(())
                    .expect("logical request must be a valid http::Request"),
                reset(),
            );
        }

        FetchRequest::from_http(
            builder
                .body(self.body.clone())
                .expect("logical request must be a valid http::Request"),
        )
    }
}

fn reset() -> io::Error {
    io::Error::new(io::ErrorKind::ConnectionReset, "connection reset by peer")
}

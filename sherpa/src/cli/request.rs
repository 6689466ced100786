use anyhow::{Result, anyhow};
use bytes::Bytes;
use clap::{Args, ValueEnum};
use sherpa_core::source::{FetchRequest, StreamingRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Runtime {
    /// Local server, body pushed in chunks
    Streaming,
    /// Edge runtime, body read through one accessor
    Standard,
}

#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// Route template of the selected endpoint, e.g. "/users/[id]"
    #[arg(long)]
    pub route: String,

    /// Request target, origin-form ("/users/7?x=1") or absolute
    #[arg(long)]
    pub url: String,

    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,

    /// Request header as "Name: value" (repeatable)
    #[arg(long = "header", short = 'H')]
    pub headers: Vec<String>,

    /// Request payload
    #[arg(long, short = 'd')]
    pub body: Option<String>,

    /// Deliver the streaming body in chunks of this many bytes (0 = one chunk)
    #[arg(long, default_value_t = 0)]
    pub chunk_size: usize,
}

impl RequestArgs {
    pub fn header_pairs(&self) -> Result<Vec<(String, String)>> {
        self.headers
            .iter()
            .map(|raw| {
                let (name, value) = raw
                    .split_once(':')
                    .ok_or_else(|| anyhow!("header must look like \"Name: value\": {raw}"))?;
                Ok((name.trim().to_string(), value.trim().to_string()))
            })
            .collect()
    }

    pub fn streaming_request(&self) -> Result<StreamingRequest> {
        let (request, sender) = StreamingRequest::new(
            Some(self.url.clone()),
            Some(self.method.clone()),
            self.header_pairs()?,
        );

        let payload = Bytes::from(self.body.clone().unwrap_or_default());
        let chunk_size = if self.chunk_size == 0 {
            payload.len().max(1)
        } else {
            self.chunk_size
        };

        for chunk in payload.chunks(chunk_size) {
            sender.data(payload.slice_ref(chunk));
        }
        sender.end();

        Ok(request)
    }

    pub fn standard_request(&self) -> Result<FetchRequest> {
        let mut builder = http::Request::builder()
            .method(self.method.as_str())
            .uri(self.url.as_str());

        for (name, value) in self.header_pairs()? {
            builder = builder.header(name, value);
        }

        let body = Bytes::from(self.body.clone().unwrap_or_default());
        let request = builder
            .body(body)
            .map_err(|e| anyhow!("cannot build request: {e}"))?;

        Ok(FetchRequest::from_http(request))
    }
}

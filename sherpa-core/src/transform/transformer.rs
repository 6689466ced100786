use crate::conf::types::TransformConfig;
use crate::ctx::request::body::{StandardAcquirer, StreamingAcquirer, acquire_body};
use crate::ctx::request::normalization::{
    normalize_header_map, normalize_headers, parse_query, parse_request_target,
    resolve_path_params,
};
use crate::ctx::request::{
    Body, CanonicalRequest, Headers, Method, RequestParams, RequestRejectError,
};
use crate::route::RouteDescriptor;
use crate::source::{StandardRequest, StreamingRequest};

/// Converts runtime-native requests into [`CanonicalRequest`]s.
///
/// Holds no per-request state, so one transformer can serve any number of
/// concurrent calls. Both entry points produce equal output for logically
/// equal input.
#[derive(Debug, Clone, Default)]
pub struct RequestTransformer {
    config: TransformConfig,
}

/// Everything derived synchronously from the request line.
struct RequestHead {
    pathname: String,
    params: RequestParams,
    method: Method,
}

impl RequestTransformer {
    pub fn new(config: TransformConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Transforms a request received by the local streaming server.
    ///
    /// Fails with [`RequestRejectError::MissingRequestLine`] when the handle
    /// carries no URL or no method. Suspends until the transport has delivered
    /// the whole body (unless the method is GET).
    pub async fn from_streaming(
        &self,
        req: StreamingRequest,
        route: &RouteDescriptor,
    ) -> Result<CanonicalRequest, RequestRejectError> {
        let result = self.transform_streaming(req, route).await;
        log_outcome("streaming", route, &result);
        result
    }

    /// Transforms a request received by an edge runtime.
    ///
    /// Reads the body through exactly one accessor call (none for GET or when
    /// no content type is declared).
    pub async fn from_standard<R>(
        &self,
        req: R,
        route: &RouteDescriptor,
    ) -> Result<CanonicalRequest, RequestRejectError>
    where
        R: StandardRequest,
    {
        let result = self.transform_standard(req, route).await;
        log_outcome("standard", route, &result);
        result
    }

    async fn transform_streaming(
        &self,
        req: StreamingRequest,
        route: &RouteDescriptor,
    ) -> Result<CanonicalRequest, RequestRejectError> {
        let url = req.url().filter(|u| !u.is_empty());
        let method = req.method().filter(|m| !m.is_empty());

        let (Some(url), Some(method)) = (url, method) else {
            return Err(RequestRejectError::MissingRequestLine);
        };

        let head = resolve_head(url, method, route)?;
        let headers = normalize_headers(
            req.headers()
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_bytes())),
        );

        let body = acquire_body(
            StreamingAcquirer::new(req),
            head.method,
            &headers,
            &self.config,
        )
        .await?;

        Ok(assemble(head, headers, body))
    }

    async fn transform_standard<R>(
        &self,
        req: R,
        route: &RouteDescriptor,
    ) -> Result<CanonicalRequest, RequestRejectError>
    where
        R: StandardRequest,
    {
        let head = resolve_head(req.url(), req.method(), route)?;
        let headers = normalize_header_map(req.headers());

        let body = acquire_body(
            StandardAcquirer::new(req),
            head.method,
            &headers,
            &self.config,
        )
        .await?;

        Ok(assemble(head, headers, body))
    }
}

fn resolve_head(
    raw_url: &str,
    raw_method: &str,
    route: &RouteDescriptor,
) -> Result<RequestHead, RequestRejectError> {
    let method: Method = raw_method.parse()?;
    let target = parse_request_target(raw_url)?;

    let params = RequestParams::new(
        resolve_path_params(target.path(), route),
        parse_query(target.query()),
    );

    Ok(RequestHead {
        pathname: target.path().to_string(),
        params,
        method,
    })
}

fn assemble(head: RequestHead, headers: Headers, body: Body) -> CanonicalRequest {
    CanonicalRequest::new(head.pathname, head.params, head.method, headers, body)
}

fn log_outcome(
    source: &'static str,
    route: &RouteDescriptor,
    result: &Result<CanonicalRequest, RequestRejectError>,
) {
    match result {
        Ok(req) => tracing::debug!(
            source,
            route = %route,
            method = %req.method(),
            path = req.url(),
            body_type = ?req.body_type(),
            "request transformed"
        ),
        Err(err) => tracing::debug!(
            source,
            route = %route,
            code = err.code(),
            error = %err,
            "request rejected"
        ),
    }
}

use crate::conf::types::{TransformConfig, TransportErrorPolicy};
use crate::ctx::request::{Body, BodyType, Method, QueryValue, RequestRejectError};
use crate::route::RouteDescriptor;
use crate::source::{FetchRequest, StreamingRequest};
use crate::transform::RequestTransformer;
use bytes::Bytes;
use pretty_assertions::assert_eq;
use std::io;

//-----------------------------------------------------------------------------
// Test helpers
//-----------------------------------------------------------------------------
fn streaming(
    method: Option<&str>,
    url: Option<&str>,
    headers: &[(&str, &str)],
    chunks: &[&'static str],
) -> StreamingRequest {
    let (req, sender) = StreamingRequest::new(
        url.map(str::to_string),
        method.map(str::to_string),
        headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    );
    for chunk in chunks {
        sender.data(*chunk);
    }
    sender.end();
    req
}

fn standard(method: &str, url: &str, headers: &[(&str, &str)], body: &'static str) -> FetchRequest {
    let mut builder = http::Request::builder().method(method).uri(url);
    for (k, v) in headers {
        builder = builder.header(*k, *v);
    }
    FetchRequest::from_http(builder.body(Bytes::from_static(body.as_bytes())).unwrap())
}

//-----------------------------------------------------------------------------
// Streaming source
//-----------------------------------------------------------------------------
#[tokio::test]
async fn streaming_json_request_is_canonicalized() {
    // Arrange
    let route = RouteDescriptor::parse("/users/[id]");
    let req = streaming(
        Some("post"),
        Some("/users/42?expand=posts&expand=likes"),
        &[("Content-Type", "application/json")],
        &[r#"{"name":"#, r#""ada"}"#],
    );

    // Act
    let canonical = RequestTransformer::default()
        .from_streaming(req, &route)
        .await
        .unwrap();

    // Assert
    assert_eq!(canonical.url(), "/users/42");
    assert_eq!(canonical.method(), Method::Post);
    assert_eq!(canonical.params().path().get("id"), Some("42"));
    assert_eq!(
        canonical.params().query().get("expand"),
        Some(&QueryValue::Multiple(vec![
            "posts".to_string(),
            "likes".to_string()
        ]))
    );
    assert_eq!(canonical.headers().get("content-type"), Some("application/json"));
    assert_eq!(canonical.body(), &Body::Json(serde_json::json!({ "name": "ada" })));
    assert_eq!(canonical.body_type(), BodyType::Json);
}

#[tokio::test]
async fn streaming_without_url_is_missing_request_line() {
    let req = streaming(Some("GET"), None, &[], &[]);

    let err = RequestTransformer::default()
        .from_streaming(req, &RouteDescriptor::default())
        .await
        .unwrap_err();

    assert!(matches!(err, RequestRejectError::MissingRequestLine));
    assert_eq!(err.status_code(), http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn streaming_without_method_is_missing_request_line() {
    let req = streaming(None, Some("/"), &[], &[]);

    let err = RequestTransformer::default()
        .from_streaming(req, &RouteDescriptor::default())
        .await
        .unwrap_err();

    assert!(matches!(err, RequestRejectError::MissingRequestLine));
}

#[tokio::test]
async fn streaming_with_empty_method_is_missing_request_line() {
    let req = streaming(Some(""), Some("/"), &[], &[]);

    let err = RequestTransformer::default()
        .from_streaming(req, &RouteDescriptor::default())
        .await
        .unwrap_err();

    assert!(matches!(err, RequestRejectError::MissingRequestLine));
}

#[tokio::test]
async fn unknown_method_is_rejected() {
    let req = streaming(Some("BREW"), Some("/coffee"), &[], &[]);

    let err = RequestTransformer::default()
        .from_streaming(req, &RouteDescriptor::parse("/coffee"))
        .await
        .unwrap_err();

    assert!(matches!(err, RequestRejectError::UnsupportedMethod(m) if m == "BREW"));
}

#[tokio::test]
async fn streaming_get_ignores_delivered_body() {
    let req = streaming(
        Some("get"),
        Some("/notes"),
        &[("content-type", "text/plain")],
        &["sneaky"],
    );

    let canonical = RequestTransformer::default()
        .from_streaming(req, &RouteDescriptor::parse("/notes"))
        .await
        .unwrap();

    assert_eq!(canonical.method(), Method::Get);
    assert_eq!(canonical.body(), &Body::None);
}

#[tokio::test]
async fn streaming_transport_error_under_strict_policy_is_fatal() {
    // Arrange
    let (req, sender) = StreamingRequest::new(
        Some("/upload".to_string()),
        Some("PUT".to_string()),
        vec![("content-type".to_string(), "text/plain".to_string())],
    );
    sender.data("partial");
    sender.error(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
    let transformer = RequestTransformer::new(TransformConfig {
        transport_errors: TransportErrorPolicy::Strict,
        ..TransformConfig::default()
    });

    // Act
    let err = transformer
        .from_streaming(req, &RouteDescriptor::parse("/upload"))
        .await
        .unwrap_err();

    // Assert
    assert!(matches!(err, RequestRejectError::TransportError(_)));
}

//-----------------------------------------------------------------------------
// Standard source
//-----------------------------------------------------------------------------
#[tokio::test]
async fn standard_absolute_url_is_reduced_to_pathname() {
    let req = standard(
        "PATCH",
        "https://edge.example.com/orgs/acme/repos/rocket?draft",
        &[("content-type", "text/plain")],
        "rename",
    );

    let canonical = RequestTransformer::default()
        .from_standard(req, &RouteDescriptor::parse("/orgs/[org]/repos/[repo]"))
        .await
        .unwrap();

    assert_eq!(canonical.url(), "/orgs/acme/repos/rocket");
    assert_eq!(canonical.params().path().get("org"), Some("acme"));
    assert_eq!(canonical.params().path().get("repo"), Some("rocket"));
    assert_eq!(canonical.params().query().first("draft"), Some(""));
    assert_eq!(canonical.body(), &Body::Text("rename".to_string()));
}

#[tokio::test]
async fn standard_without_content_type_has_no_body() {
    let req = standard("POST", "/submit", &[], "payload");

    let canonical = RequestTransformer::default()
        .from_standard(req, &RouteDescriptor::parse("/submit"))
        .await
        .unwrap();

    assert_eq!(canonical.body_type(), BodyType::None);
}

#[tokio::test]
async fn standard_malformed_json_is_rejected() {
    let req = standard(
        "POST",
        "/submit",
        &[("content-type", "application/json")],
        "{nope",
    );

    let err = RequestTransformer::default()
        .from_standard(req, &RouteDescriptor::parse("/submit"))
        .await
        .unwrap_err();

    assert!(matches!(err, RequestRejectError::MalformedBody(_)));
}

//-----------------------------------------------------------------------------
// Equivalence
//-----------------------------------------------------------------------------
#[tokio::test]
async fn both_sources_agree_on_json_post() {
    // Arrange
    let route = RouteDescriptor::parse("/users/[id]/posts");
    let headers = [("Content-Type", "application/json"), ("X-Trace", "t-1")];
    let transformer = RequestTransformer::default();

    // Act
    let from_streaming = transformer
        .from_streaming(
            streaming(
                Some("POST"),
                Some("/users/7/posts?a=1&a=2&b=3"),
                &headers,
                &[r#"{"a":"#, "1}"],
            ),
            &route,
        )
        .await
        .unwrap();
    let from_standard = transformer
        .from_standard(
            standard(
                "POST",
                "http://localhost/users/7/posts?a=1&a=2&b=3",
                &headers,
                r#"{"a":1}"#,
            ),
            &route,
        )
        .await
        .unwrap();

    // Assert
    assert_eq!(from_streaming, from_standard);
}

#[tokio::test]
async fn concurrent_transformations_are_independent() {
    let transformer = RequestTransformer::default();
    let route = RouteDescriptor::parse("/items/[id]");

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let transformer = transformer.clone();
            let route = route.clone();
            tokio::spawn(async move {
                let (req, sender) = StreamingRequest::new(
                    Some(format!("/items/{i}")),
                    Some("POST".to_string()),
                    vec![("content-type".to_string(), "text/plain".to_string())],
                );
                sender.data(format!("item-{i}"));
                sender.end();
                transformer.from_streaming(req, &route).await
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let canonical = handle.await.unwrap().unwrap();
        let id = i.to_string();
        assert_eq!(canonical.params().path().get("id"), Some(id.as_str()));
        assert_eq!(canonical.body(), &Body::Text(format!("item-{i}")));
    }
}

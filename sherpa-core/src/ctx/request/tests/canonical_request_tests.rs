use crate::ctx::request::normalization::{normalize_headers, parse_query};
use crate::ctx::request::{
    Body, BodyType, CanonicalRequest, Method, PathParams, RequestParams, RequestRejectError,
};
use pretty_assertions::assert_eq;

#[test]
fn method_is_parsed_case_insensitively() {
    assert_eq!("get".parse::<Method>().unwrap(), Method::Get);
    assert_eq!("Post".parse::<Method>().unwrap(), Method::Post);
    assert_eq!("DELETE".parse::<Method>().unwrap(), Method::Delete);
    assert_eq!("options".parse::<Method>().unwrap(), Method::Options);
}

#[test]
fn unknown_method_is_unsupported() {
    let err = "PURGE".parse::<Method>().unwrap_err();

    assert!(matches!(err, RequestRejectError::UnsupportedMethod(m) if m == "PURGE"));
}

#[test]
fn only_get_is_safe_read() {
    assert!(Method::Get.is_safe_read());
    assert!(!Method::Head.is_safe_read());
    assert!(!Method::Post.is_safe_read());
}

#[test]
fn body_variant_determines_body_type() {
    assert_eq!(Body::None.body_type(), BodyType::None);
    assert_eq!(Body::Text("x".to_string()).body_type(), BodyType::Text);
    assert_eq!(
        Body::Json(serde_json::json!({ "a": 1 })).body_type(),
        BodyType::Json
    );
}

#[test]
fn json_body_holds_parsed_value_not_string() {
    let body = Body::Json(serde_json::json!({ "a": 1 }));

    assert_eq!(body.as_text(), None);
    assert_eq!(body.as_json().unwrap()["a"], 1);
}

#[test]
fn serializes_to_handler_shape() {
    // Arrange
    let request = CanonicalRequest::new(
        "/users/7".to_string(),
        RequestParams::new(
            [("id", "7")].into_iter().collect::<PathParams>(),
            parse_query(Some("a=1&a=2&b=3")),
        ),
        Method::Put,
        normalize_headers([("Content-Type", "application/json"), ("Accept", "*/*")]),
        Body::Json(serde_json::json!({ "a": 1 })),
    );

    // Act
    let json = serde_json::to_value(&request).unwrap();

    // Assert
    assert_eq!(
        json,
        serde_json::json!({
            "url": "/users/7",
            "params": {
                "path": { "id": "7" },
                "query": { "a": ["1", "2"], "b": "3" }
            },
            "method": "PUT",
            "headers": {
                "accept": "*/*",
                "content-type": "application/json"
            },
            "body": { "a": 1 },
            "bodyType": "JSON"
        })
    );
}

#[test]
fn absent_body_serializes_as_null() {
    let request = CanonicalRequest::new(
        "/".to_string(),
        RequestParams::default(),
        Method::Get,
        normalize_headers(Vec::<(&str, &str)>::new()),
        Body::None,
    );

    let json = serde_json::to_value(&request).unwrap();

    assert_eq!(json["body"], serde_json::Value::Null);
    assert_eq!(json["bodyType"], "None");
}

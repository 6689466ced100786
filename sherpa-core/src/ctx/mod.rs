pub mod request;

pub use request::{
    Body, BodyType, CanonicalRequest, Headers, Method, PathParams, QueryParams, QueryValue,
    RequestParams, RequestRejectError,
};

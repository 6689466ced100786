pub mod conf;
pub mod ctx;
pub mod logging;
pub mod route;
pub mod source;
pub mod transform;

pub use ctx::{Body, BodyType, CanonicalRequest, Headers, Method, RequestRejectError};
pub use route::{RouteDescriptor, Segment};
pub use transform::RequestTransformer;

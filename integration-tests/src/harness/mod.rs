pub mod request;
pub mod tracing;

pub use request::LogicalRequest;
pub use tracing::{CapturedEvent, captured_events, init_test_tracing};

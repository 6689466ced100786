//! Runtime-native request handles the transformer accepts.

pub mod standard;
pub mod streaming;

pub use standard::{BodyReadError, FetchRequest, StandardRequest};
pub use streaming::{BodyEvent, BodySender, StreamingRequest};

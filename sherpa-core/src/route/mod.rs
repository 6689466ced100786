mod segment;

pub use segment::{RouteDescriptor, Segment};

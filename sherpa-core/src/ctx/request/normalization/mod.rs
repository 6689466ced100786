mod headers;
mod path;
mod query;
#[cfg(test)]
mod tests;

pub use headers::*;
pub use path::*;
pub use query::*;

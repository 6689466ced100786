pub mod body;
mod canonical_request;
mod error;
pub mod normalization;
#[cfg(test)]
mod tests;

pub use canonical_request::*;
pub use error::*;

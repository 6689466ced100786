pub mod compare;
pub mod normalize;
pub mod request;

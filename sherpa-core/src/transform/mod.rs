mod transformer;
#[cfg(test)]
mod tests;

pub use transformer::RequestTransformer;

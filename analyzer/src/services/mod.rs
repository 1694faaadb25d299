//! Analyzer service implementations

pub mod model_client;

#[cfg(test)]
pub mod tests;

pub use model_client::*;

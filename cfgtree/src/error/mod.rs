//! Error types produced by the configuration store.

mod constructors;
mod types;

pub use types::CfgError;

#[cfg(test)]
mod tests;

//! Shared traits and handles used across routelens crates.

pub mod cancellation;

pub use cancellation::CancellationToken;

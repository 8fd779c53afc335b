//! # routelens-core
//!
//! Core types, traits, errors, configuration, events and tracing setup
//! shared by the routelens crates. Nothing in here touches source text.

pub mod config;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod traits;
pub mod types;

pub use config::RoutelensConfig;
pub use errors::{ConfigError, FileError, ScanError};
pub use traits::CancellationToken;

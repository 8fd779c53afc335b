//! Scan lifecycle events and the observer trait that receives them.
//!
//! Progress reporting goes through an injected [`handler::ScanEventHandler`]
//! instead of being printed while results are computed.

pub mod handler;
pub mod types;

pub use handler::{NoOpHandler, ScanEventHandler, TracingHandler};

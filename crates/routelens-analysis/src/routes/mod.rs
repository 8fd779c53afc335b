//! Route & input extraction.
//!
//! Pipeline per file: [`candidates`] → [`scope`] → [`inputs`], with
//! [`middleware`] as an independent pass and [`stats`] over the merged
//! result. [`engine`] drives it over many files.

pub mod cache;
pub mod candidates;
pub mod engine;
pub mod inputs;
pub mod middleware;
pub mod scope;
pub mod stats;
pub mod types;

pub(crate) mod text;

pub use engine::{analyze_source, extract_routes, FileAnalysis, FileMiddleware, RouteEngine, ScanResult};
pub use stats::{aggregate, ScanStatistics};
pub use types::{ExpectedInputs, InputCategory, MiddlewareEntry, Route, RouteCandidate};

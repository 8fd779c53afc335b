//! # routelens-analysis
//!
//! Static extraction of HTTP routes and the request inputs their handlers
//! read, from JavaScript/TypeScript source text. No code is executed and no
//! syntax tree is built; recognition is lexical.

pub mod routes;
pub mod scanner;

pub use routes::{
    aggregate, analyze_source, extract_routes, ExpectedInputs, InputCategory, MiddlewareEntry,
    Route, RouteEngine, ScanResult, ScanStatistics,
};
pub use scanner::Scanner;

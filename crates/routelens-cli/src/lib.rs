//! # routelens-cli
//!
//! Argument parsing, output rendering and exit codes for the `routelens`
//! binary. The binary itself only wires these together.

pub mod args;
pub mod exit_code;
pub mod output;

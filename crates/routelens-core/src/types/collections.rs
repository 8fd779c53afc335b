//! Fast non-cryptographic hash set.
//!
//! Iteration order is unspecified; anything that reaches output is sorted or
//! collected into a `BTreeSet` first.

pub type FxHashSet<T> = rustc_hash::FxHashSet<T>;

//! Trace-path selection and vertical grouping.
//!
//! - [`filter`]: colour/shape predicates picking plausible trace ink.
//! - [`clustering`]: centroid chaining that turns kept paths into groups.

pub mod clustering;
pub mod filter;

pub use clustering::{cluster_paths, PathClusterParams, PathGroup};
pub use filter::{filter_paths, PathFilterMode, PathFilterParams, PathFilterStats};

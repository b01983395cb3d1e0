//! Shared test utilities for the node-discovery workspace.
//!
//! This crate provides on-disk search-path fixtures so crate test suites do
//! not each re-implement them. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`tree`]: [`TestTree`] builder for search-path directory trees

pub mod tree;

pub use tree::TestTree;

//! Command implementations

mod discover;

pub use discover::run_discover;

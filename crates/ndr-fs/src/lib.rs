//! Filesystem layer for node discovery
//!
//! Provides normalized search paths, format-agnostic config loading and the
//! search-path walker used to find node definition files.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;
pub mod walk;

pub use config::ConfigStore;
pub use constants::NodeExtension;
pub use error::{Error, Result};
pub use path::{NormalizedPath, split_path_list};
pub use walk::{FoundFile, SearchWalker};

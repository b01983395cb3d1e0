//! Search configuration for a discovery engine

use crate::Result;
use ndr_fs::{ConfigStore, NodeExtension, NormalizedPath};
use serde::{Deserialize, Serialize};

/// Where to search and what to accept.
///
/// Loadable from TOML, JSON or YAML:
///
/// ```toml
/// search_paths = ["/opt/rman/lib/shaders", "/opt/rman/lib/plugins/Args"]
/// extensions = ["args", "oso", "sdraliases"]
/// follow_symlinks = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfiguration {
    /// Directories to walk, in order
    #[serde(default)]
    pub search_paths: Vec<String>,
    /// Accepted file extensions, without the dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Whether symbolic links are followed during the walk
    #[serde(default = "default_follow_symlinks")]
    pub follow_symlinks: bool,
}

fn default_extensions() -> Vec<String> {
    NodeExtension::all_strings()
}

fn default_follow_symlinks() -> bool {
    true
}

impl Default for SearchConfiguration {
    fn default() -> Self {
        Self {
            search_paths: Vec::new(),
            extensions: default_extensions(),
            follow_symlinks: default_follow_symlinks(),
        }
    }
}

impl SearchConfiguration {
    /// Configuration searching `search_paths` for the reserved extensions.
    pub fn new(search_paths: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            search_paths: search_paths.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn with_extensions(mut self, extensions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Load a configuration file; the format follows its extension.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        Ok(ConfigStore::new().load(path)?)
    }
}

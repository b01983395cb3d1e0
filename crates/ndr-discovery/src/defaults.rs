//! Process-wide discovery defaults
//!
//! Engines built with [`DiscoveryEngine::new`](crate::DiscoveryEngine::new)
//! take their search paths and symlink policy from here. A host may install
//! its own defaults once, at start-up, before any engine is built. After the
//! defaults have been installed or read they never change.

use crate::paths::{EnvSource, PathResolver, ProcessEnv};
use crate::{Error, Result};
use std::sync::OnceLock;

static DEFAULTS: OnceLock<DiscoveryDefaults> = OnceLock::new();

/// Default search paths and symlink policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryDefaults {
    pub search_paths: Vec<String>,
    pub follow_symlinks: bool,
}

impl DiscoveryDefaults {
    /// Defaults derived from an environment.
    pub fn from_env(resolver: &PathResolver, env: &impl EnvSource) -> Self {
        Self {
            search_paths: resolver.resolve(env),
            follow_symlinks: true,
        }
    }

    /// Defaults derived from the current process environment.
    pub fn from_process_env() -> Self {
        Self::from_env(&PathResolver::new(), &ProcessEnv)
    }

    pub fn with_search_paths(mut self, search_paths: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.search_paths = search_paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }
}

/// Install the process-wide defaults.
///
/// Fails with [`Error::DefaultsAlreadyInstalled`] if defaults were already
/// installed, or already read by [`defaults`].
pub fn install_defaults(defaults: DiscoveryDefaults) -> Result<()> {
    DEFAULTS
        .set(defaults)
        .map_err(|_| Error::DefaultsAlreadyInstalled)?;
    tracing::debug!("Installed process-wide discovery defaults");
    Ok(())
}

/// The process-wide defaults, computed from the process environment on
/// first use if none were installed.
pub fn defaults() -> &'static DiscoveryDefaults {
    DEFAULTS.get_or_init(|| {
        let defaults = DiscoveryDefaults::from_process_env();
        tracing::debug!(search_paths = ?defaults.search_paths, "Computed discovery defaults from environment");
        defaults
    })
}

//! Default search-path derivation from the environment
//!
//! Two families of paths are searched:
//!
//! - compiled shaders (`.oso`): `$RMAN_SHADERPATH`, otherwise
//!   `$RMANTREE/lib/shaders` plus the renderer plugin's `resources/shaders`;
//! - argument metadata (`.args`): every `$RMAN_RIXPLUGINPATH` entry's `Args`
//!   sub-directory, otherwise `$RMANTREE/lib/plugins/Args`.

use ndr_fs::{NormalizedPath, split_path_list};
use std::collections::HashMap;

/// Path list of directories holding compiled shaders.
pub const SHADER_PATH_VAR: &str = "RMAN_SHADERPATH";
/// Path list of plugin directories, each with an `Args` sub-directory.
pub const RIX_PLUGIN_PATH_VAR: &str = "RMAN_RIXPLUGINPATH";
/// Root of the renderer installation.
pub const RMANTREE_VAR: &str = "RMANTREE";

/// Source of environment variables.
pub trait EnvSource {
    /// Look up a variable. Unset and empty variables both yield `None`.
    fn var(&self, name: &str) -> Option<String>;
}

/// The current process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.is_empty())
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).filter(|v| !v.is_empty()).cloned()
    }
}

impl EnvSource for HashMap<&str, &str> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name)
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string())
    }
}

/// Computes default search paths.
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    /// Directory of the installed renderer loader plugin, if known
    plugin_dir: Option<NormalizedPath>,
}

impl PathResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also search `<plugin_dir>/resources/shaders` when `$RMAN_SHADERPATH`
    /// is not set.
    pub fn with_plugin_dir(mut self, plugin_dir: impl Into<NormalizedPath>) -> Self {
        self.plugin_dir = Some(plugin_dir.into());
        self
    }

    /// Resolve the ordered search paths: shader paths first, then
    /// argument metadata paths. Missing variables contribute nothing.
    pub fn resolve(&self, env: &impl EnvSource) -> Vec<String> {
        let mut paths = self.shader_paths(env);
        paths.extend(self.args_paths(env));
        paths.into_iter().map(String::from).collect()
    }

    fn shader_paths(&self, env: &impl EnvSource) -> Vec<NormalizedPath> {
        if let Some(shaderpath) = env.var(SHADER_PATH_VAR) {
            return split_path_list(&shaderpath);
        }

        let mut paths = Vec::new();
        if let Some(rmantree) = env.var(RMANTREE_VAR) {
            paths.push(NormalizedPath::new(rmantree).join("lib/shaders"));
        }
        if let Some(plugin_dir) = &self.plugin_dir {
            paths.push(plugin_dir.join("resources/shaders"));
        }
        paths
    }

    fn args_paths(&self, env: &impl EnvSource) -> Vec<NormalizedPath> {
        if let Some(rixpluginpath) = env.var(RIX_PLUGIN_PATH_VAR) {
            return split_path_list(&rixpluginpath)
                .iter()
                .map(|path| path.join("Args"))
                .collect();
        }

        env.var(RMANTREE_VAR)
            .map(|rmantree| NormalizedPath::new(rmantree).join("lib/plugins/Args"))
            .into_iter()
            .collect()
    }
}

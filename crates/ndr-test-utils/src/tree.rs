//! [`TestTree`] builder for node-discovery test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Alias declarations used by [`TestTree::scenario`]: `a` is aliased to `aliasA`.
pub const SCENARIO_ALIASES: &str = "a = [\"aliasA\"]\n";

/// A temporary directory acting as one or more shader search paths.
///
/// # Example
///
/// ```rust
/// use ndr_test_utils::TestTree;
///
/// let tree = TestTree::new();
/// tree.write("shaders/PxrSurface.args", "<args/>");
/// tree.assert_file_exists("shaders/PxrSurface.args");
/// ```
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// A tree holding `a.args`, `b.oso` and `c.sdraliases`, where the alias
    /// file declares `a = ["aliasA"]`.
    pub fn scenario() -> Self {
        let tree = Self::new();
        tree.write("a.args", "<args format=\"1.0\"/>");
        tree.write("b.oso", "OpenShadingLanguage 1.00");
        tree.write("c.sdraliases", SCENARIO_ALIASES);
        tree
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Root path as a search-path string.
    pub fn search_path(&self) -> String {
        self.root().to_string_lossy().into_owned()
    }

    /// Absolute path of `relative` inside the tree.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Absolute path of `relative` as a search-path string.
    pub fn path_str(&self, relative: &str) -> String {
        self.path(relative).to_string_lossy().into_owned()
    }

    /// Write a file, creating parent directories as needed.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Create a directory (and its parents).
    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Assert that a file exists relative to the tree root.
    pub fn assert_file_exists(&self, relative: &str) {
        let path = self.path(relative);
        assert!(path.is_file(), "Expected file to exist: {}", path.display());
    }
}

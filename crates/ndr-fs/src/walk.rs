//! Search-path walking for node discovery
//!
//! [`SearchWalker`] enumerates every file under a list of search roots whose
//! extension is in an allow-list. It knows nothing about nodes or aliases;
//! callers turn each [`FoundFile`] into whatever record they need.

use crate::{Error, NormalizedPath, Result};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use walkdir::WalkDir;

/// A file matched during a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundFile {
    /// Path of the file as reached from its (canonicalized) search root
    pub path: NormalizedPath,
    /// File name without its final extension
    pub identifier: String,
    /// Lowercase extension without the dot
    pub extension: String,
}

/// Walks search roots and collects files with allowed extensions.
#[derive(Debug, Clone)]
pub struct SearchWalker {
    extensions: Vec<String>,
    follow_symlinks: bool,
}

impl SearchWalker {
    /// Create a walker accepting the given extensions (with or without a
    /// leading dot, case-insensitive). Symlinks are followed by default.
    pub fn new(extensions: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        Self {
            extensions: extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
                .collect(),
            follow_symlinks: true,
        }
    }

    /// Set whether symbolic links are followed.
    ///
    /// When disabled, symlinked files and directories are skipped entirely.
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Walk every search root in order.
    ///
    /// Roots that do not exist are skipped. A root that exists but cannot be
    /// read is an error. The first file found for a given
    /// `(identifier, extension)` pair wins; later ones are ignored.
    pub fn walk(&self, search_paths: &[NormalizedPath]) -> Result<Vec<FoundFile>> {
        let mut seen = HashSet::new();
        let mut found = Vec::new();

        for root in search_paths {
            self.walk_root(root, &mut seen, &mut found)?;
        }

        Ok(found)
    }

    fn walk_root(
        &self,
        root: &NormalizedPath,
        seen: &mut HashSet<(String, String)>,
        found: &mut Vec<FoundFile>,
    ) -> Result<()> {
        let native = root.to_native();

        let metadata = match fs::metadata(&native) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(root = %root, "Search path does not exist, skipping");
                return Ok(());
            }
            Err(e) => return Err(Error::io(&native, e)),
        };

        if !metadata.is_dir() {
            return Err(Error::walk(&native, "not a directory"));
        }

        // Surface permission problems on the root itself rather than letting
        // walkdir report them as an empty tree.
        fs::read_dir(&native).map_err(|e| Error::io(&native, e))?;

        let canonical = dunce::canonicalize(&native).map_err(|e| Error::io(&native, e))?;

        let walker = WalkDir::new(&canonical)
            .follow_links(self.follow_symlinks)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(Error::walk(&canonical, e.to_string()));
                }
                Err(e) => {
                    tracing::warn!(path = ?e.path(), "Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = NormalizedPath::new(entry.path());
            let Some(extension) = path.extension().map(str::to_lowercase) else {
                continue;
            };
            if !self.extensions.contains(&extension) {
                continue;
            }
            let Some(identifier) = path.file_stem().map(str::to_string) else {
                continue;
            };

            if !seen.insert((identifier.clone(), extension.clone())) {
                tracing::debug!(
                    path = %path,
                    "Skipping {identifier}.{extension}: already found in an earlier search path"
                );
                continue;
            }

            tracing::trace!(path = %path, "Found candidate file");
            found.push(FoundFile {
                path,
                identifier,
                extension,
            });
        }

        Ok(())
    }
}

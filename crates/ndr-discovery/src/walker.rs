//! The walker seam: turning search paths into raw discovery records

use crate::{DiscoveryContext, DiscoveryRecord, Result};
use ndr_fs::{NormalizedPath, SearchWalker};

/// Enumerates candidate files as raw discovery records.
///
/// Records come back with empty aliases. Their order carries no meaning to
/// the engine beyond being preserved in its output.
pub trait NodeWalker: Send + Sync {
    fn walk(
        &self,
        search_paths: &[String],
        extensions: &[String],
        follow_symlinks: bool,
        context: &DiscoveryContext,
    ) -> Result<Vec<DiscoveryRecord>>;
}

/// Walks the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsWalker;

impl NodeWalker for FsWalker {
    fn walk(
        &self,
        search_paths: &[String],
        extensions: &[String],
        follow_symlinks: bool,
        context: &DiscoveryContext,
    ) -> Result<Vec<DiscoveryRecord>> {
        tracing::debug!(
            context = context.label().unwrap_or("-"),
            ?search_paths,
            follow_symlinks,
            "Walking search paths"
        );

        let roots: Vec<NormalizedPath> = search_paths.iter().map(NormalizedPath::new).collect();
        let found = SearchWalker::new(extensions)
            .with_follow_symlinks(follow_symlinks)
            .walk(&roots)?;

        Ok(found.into_iter().map(DiscoveryRecord::from).collect())
    }
}

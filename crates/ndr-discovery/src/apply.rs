//! Back-patching resolved aliases onto surviving records

use crate::{AliasMap, DiscoveryRecord};

/// Second pass of discovery: attaches aliases by identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct AliasApplier;

impl AliasApplier {
    /// Set `aliases` on every record whose identifier has declared aliases.
    ///
    /// Returns the number of records updated. Declarations with no matching
    /// record are dropped silently. Applying the same map twice gives the
    /// same result.
    pub fn apply(records: &mut [DiscoveryRecord], aliases: &AliasMap) -> usize {
        if aliases.is_empty() {
            return 0;
        }

        let mut updated = 0;
        for record in records.iter_mut() {
            if let Some(names) = aliases.get(&record.identifier) {
                record.aliases = names.to_vec();
                updated += 1;
            }
        }

        if updated < aliases.len() {
            tracing::trace!(
                declared = aliases.len(),
                applied = updated,
                "Some alias declarations matched no discovered node"
            );
        }

        updated
    }
}

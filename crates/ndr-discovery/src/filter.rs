//! The single filter pass over raw discovery records
//!
//! Every record goes through two steps, always in this order:
//!
//! 1. alias extraction: alias declaration files have their aliases merged
//!    into the call's [`AliasMap`] and are dropped;
//! 2. the caller's inclusion predicate, consulted only for records that are
//!    not alias declarations.

use crate::{AliasExtractor, AliasMap, DiscoveryRecord};
use std::sync::Arc;

/// Caller-supplied decision whether a non-alias record belongs in the catalog.
pub type InclusionPredicate = Arc<dyn Fn(&DiscoveryRecord) -> bool + Send + Sync>;

/// What the filter pass decided for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Alias declaration file; its aliases were extracted and it is dropped
    AliasDeclaration,
    /// Rejected by the inclusion predicate
    Rejected,
    /// Kept in the catalog
    Kept,
}

/// Result of one filter pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Surviving records, in their original relative order
    pub kept: Vec<DiscoveryRecord>,
    /// Number of alias declaration files consumed
    pub alias_files: usize,
    /// Number of records the inclusion predicate rejected
    pub rejected: usize,
}

/// Applies alias extraction and the inclusion predicate to raw records.
pub struct ResultFilter<'a> {
    extractor: &'a AliasExtractor,
    predicate: Option<&'a InclusionPredicate>,
}

impl<'a> ResultFilter<'a> {
    pub fn new(extractor: &'a AliasExtractor, predicate: Option<&'a InclusionPredicate>) -> Self {
        Self {
            extractor,
            predicate,
        }
    }

    /// Decide the fate of one record, merging its aliases if it declares any.
    pub fn classify(&self, record: &DiscoveryRecord, aliases: &mut AliasMap) -> Disposition {
        if self.extractor.try_extract_aliases(record, aliases) {
            return Disposition::AliasDeclaration;
        }

        match self.predicate {
            Some(include) if !include(record) => Disposition::Rejected,
            _ => Disposition::Kept,
        }
    }

    /// Run the filter pass over every record.
    ///
    /// When this returns, every alias declaration among `records` has been
    /// merged into `aliases`.
    pub fn apply(&self, records: Vec<DiscoveryRecord>, aliases: &mut AliasMap) -> FilterOutcome {
        let mut outcome = FilterOutcome {
            kept: Vec::with_capacity(records.len()),
            ..Default::default()
        };

        for record in records {
            let disposition = self.classify(&record, aliases);
            tracing::trace!(uri = %record.uri, ?disposition, "Filtered record");
            match disposition {
                Disposition::AliasDeclaration => outcome.alias_files += 1,
                Disposition::Rejected => outcome.rejected += 1,
                Disposition::Kept => outcome.kept.push(record),
            }
        }

        outcome
    }
}

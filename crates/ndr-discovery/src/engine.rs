//! The discovery engine
//!
//! One call to [`DiscoveryEngine::discover_nodes`] runs three stages in a
//! fixed order:
//!
//! ```text
//! Scanning   walker turns search paths into raw records
//! Filtering  alias files are parsed and dropped, the predicate drops the rest
//! Resolving  collected aliases are attached to the survivors by identifier
//! ```
//!
//! Nothing carries over between calls: each one starts with a fresh alias map.

use crate::alias::{AliasExtractor, AliasMap, AliasParser};
use crate::apply::AliasApplier;
use crate::config::SearchConfiguration;
use crate::defaults::defaults;
use crate::filter::{InclusionPredicate, ResultFilter};
use crate::walker::{FsWalker, NodeWalker};
use crate::{DiscoveryContext, DiscoveryRecord, Result};
use std::fmt;
use std::sync::Arc;

/// Stages of one discovery call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryStage {
    Configured,
    Scanning,
    Filtering,
    Resolving,
    Done,
}

impl fmt::Display for DiscoveryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Configured => "configured",
            Self::Scanning => "scanning",
            Self::Filtering => "filtering",
            Self::Resolving => "resolving",
            Self::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// Catalog from one discovery call, with per-stage counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryReport {
    /// Final catalog
    pub records: Vec<DiscoveryRecord>,
    /// Raw records returned by the walker
    pub walked: usize,
    /// Alias declaration files consumed
    pub alias_files: usize,
    /// Records rejected by the inclusion predicate
    pub rejected: usize,
    /// Records that made it into the catalog
    pub kept: usize,
    /// Catalog records that received aliases
    pub aliased: usize,
}

/// Discovers node definition files and resolves their aliases.
///
/// The search configuration is fixed at construction and shared read-only,
/// so one engine can serve concurrent calls.
#[derive(Clone)]
pub struct DiscoveryEngine {
    config: Arc<SearchConfiguration>,
    filter: Option<InclusionPredicate>,
    walker: Arc<dyn NodeWalker>,
    extractor: AliasExtractor,
}

impl DiscoveryEngine {
    /// Create an engine from the process-wide defaults.
    pub fn new() -> Self {
        let defaults = defaults();
        Self::with_config(
            SearchConfiguration::new(defaults.search_paths.iter().cloned())
                .with_follow_symlinks(defaults.follow_symlinks),
        )
    }

    /// Create an engine with an explicit search configuration.
    pub fn with_config(config: SearchConfiguration) -> Self {
        Self {
            config: Arc::new(config),
            filter: None,
            walker: Arc::new(FsWalker),
            extractor: AliasExtractor::default(),
        }
    }

    /// Keep only non-alias records for which `filter` returns `true`.
    pub fn with_filter(
        mut self,
        filter: impl Fn(&DiscoveryRecord) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Replace the filesystem walker.
    pub fn with_walker(mut self, walker: impl NodeWalker + 'static) -> Self {
        self.walker = Arc::new(walker);
        self
    }

    /// Replace the alias declaration parser.
    pub fn with_alias_parser(mut self, parser: impl AliasParser + 'static) -> Self {
        self.extractor = AliasExtractor::new(Arc::new(parser));
        self
    }

    /// Run one discovery and return the catalog.
    pub fn discover_nodes(&self, context: &DiscoveryContext) -> Result<Vec<DiscoveryRecord>> {
        Ok(self.discover_nodes_with_report(context)?.records)
    }

    /// Run one discovery and return the catalog with per-stage counts.
    ///
    /// A walker failure aborts the call; no partial catalog is returned.
    pub fn discover_nodes_with_report(&self, context: &DiscoveryContext) -> Result<DiscoveryReport> {
        let mut stage = DiscoveryStage::Configured;

        stage = advance(stage, DiscoveryStage::Scanning);
        let raw = self.walker.walk(
            &self.config.search_paths,
            &self.config.extensions,
            self.config.follow_symlinks,
            context,
        )?;
        let walked = raw.len();

        stage = advance(stage, DiscoveryStage::Filtering);
        let mut aliases = AliasMap::new();
        let outcome = ResultFilter::new(&self.extractor, self.filter.as_ref()).apply(raw, &mut aliases);

        stage = advance(stage, DiscoveryStage::Resolving);
        let mut records = outcome.kept;
        let aliased = AliasApplier::apply(&mut records, &aliases);

        advance(stage, DiscoveryStage::Done);
        let kept = records.len();
        tracing::debug!(
            walked,
            alias_files = outcome.alias_files,
            rejected = outcome.rejected,
            kept,
            aliased,
            "Discovery finished"
        );

        Ok(DiscoveryReport {
            records,
            walked,
            alias_files: outcome.alias_files,
            rejected: outcome.rejected,
            kept,
            aliased,
        })
    }

    /// The effective search paths, in search order.
    pub fn search_uris(&self) -> &[String] {
        &self.config.search_paths
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.config.extensions
    }

    pub fn follows_symlinks(&self) -> bool {
        self.config.follow_symlinks
    }

    pub fn configuration(&self) -> &SearchConfiguration {
        &self.config
    }
}

impl Default for DiscoveryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DiscoveryEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscoveryEngine")
            .field("config", &self.config)
            .field("has_filter", &self.filter.is_some())
            .finish_non_exhaustive()
    }
}

fn advance(from: DiscoveryStage, to: DiscoveryStage) -> DiscoveryStage {
    tracing::debug!("Discovery stage {} -> {}", from, to);
    to
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// Returns a fixed set of records and remembers the context label.
    struct StaticWalker {
        records: Vec<DiscoveryRecord>,
        seen_label: Mutex<Option<String>>,
    }

    impl StaticWalker {
        fn new(records: Vec<DiscoveryRecord>) -> Self {
            Self {
                records,
                seen_label: Mutex::new(None),
            }
        }
    }

    impl NodeWalker for StaticWalker {
        fn walk(
            &self,
            _search_paths: &[String],
            _extensions: &[String],
            _follow_symlinks: bool,
            context: &DiscoveryContext,
        ) -> Result<Vec<DiscoveryRecord>> {
            *self.seen_label.lock().unwrap() = context.label().map(str::to_string);
            Ok(self.records.clone())
        }
    }

    struct FailingWalker;

    impl NodeWalker for FailingWalker {
        fn walk(
            &self,
            search_paths: &[String],
            _extensions: &[String],
            _follow_symlinks: bool,
            _context: &DiscoveryContext,
        ) -> Result<Vec<DiscoveryRecord>> {
            Err(Error::Fs(ndr_fs::Error::walk(&search_paths[0], "permission denied")))
        }
    }

    struct MapParser;

    impl AliasParser for MapParser {
        fn parse_aliases(&self, record: &DiscoveryRecord) -> Result<Vec<(String, Vec<String>)>> {
            match record.identifier.as_str() {
                "first" => Ok(vec![("a".into(), vec!["one".into()])]),
                "second" => Ok(vec![("a".into(), vec!["two".into()])]),
                _ => Ok(vec![]),
            }
        }
    }

    fn scenario() -> Vec<DiscoveryRecord> {
        vec![
            DiscoveryRecord::new("a", "args", "/s/a.args"),
            DiscoveryRecord::new("b", "oso", "/s/b.oso"),
            DiscoveryRecord::new("first", "sdraliases", "/s/first.sdraliases"),
        ]
    }

    fn engine(records: Vec<DiscoveryRecord>) -> DiscoveryEngine {
        DiscoveryEngine::with_config(SearchConfiguration::new(["/s"]))
            .with_walker(StaticWalker::new(records))
            .with_alias_parser(MapParser)
    }

    #[test]
    fn test_alias_declared_after_target_is_applied() {
        let records = engine(scenario())
            .discover_nodes(&DiscoveryContext::new())
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].aliases, vec!["one"]);
        assert!(records[1].aliases.is_empty());
    }

    #[test]
    fn test_alias_declared_before_target_is_applied() {
        let mut input = scenario();
        input.rotate_right(1);

        let records = engine(input).discover_nodes(&DiscoveryContext::new()).unwrap();

        let a = records.iter().find(|r| r.identifier == "a").unwrap();
        assert_eq!(a.aliases, vec!["one"]);
    }

    #[test]
    fn test_later_alias_file_wins() {
        let mut input = scenario();
        input.push(DiscoveryRecord::new("second", "sdraliases", "/s/second.sdraliases"));

        let records = engine(input).discover_nodes(&DiscoveryContext::new()).unwrap();

        assert_eq!(records[0].aliases, vec!["two"]);
    }

    #[test]
    fn test_report_counts() {
        let report = engine(scenario())
            .with_filter(|r| r.identifier != "b")
            .discover_nodes_with_report(&DiscoveryContext::new())
            .unwrap();

        assert_eq!(report.walked, 3);
        assert_eq!(report.alias_files, 1);
        assert_eq!(report.rejected, 1);
        assert_eq!(report.kept, 1);
        assert_eq!(report.aliased, 1);
        assert_eq!(report.records.len(), 1);
    }

    #[test]
    fn test_context_passed_to_walker() {
        let walker = Arc::new(StaticWalker::new(vec![]));
        struct Shared(Arc<StaticWalker>);
        impl NodeWalker for Shared {
            fn walk(
                &self,
                search_paths: &[String],
                extensions: &[String],
                follow_symlinks: bool,
                context: &DiscoveryContext,
            ) -> Result<Vec<DiscoveryRecord>> {
                self.0.walk(search_paths, extensions, follow_symlinks, context)
            }
        }

        DiscoveryEngine::with_config(SearchConfiguration::default())
            .with_walker(Shared(Arc::clone(&walker)))
            .discover_nodes(&DiscoveryContext::new().with_label("hdPrman"))
            .unwrap();

        assert_eq!(walker.seen_label.lock().unwrap().as_deref(), Some("hdPrman"));
    }

    #[test]
    fn test_walker_failure_propagates() {
        let result = DiscoveryEngine::with_config(SearchConfiguration::new(["/locked"]))
            .with_walker(FailingWalker)
            .discover_nodes(&DiscoveryContext::new());

        assert!(matches!(result, Err(Error::Fs(ndr_fs::Error::Walk { .. }))));
    }

    #[test]
    fn test_accessors_expose_configuration() {
        let engine = DiscoveryEngine::with_config(
            SearchConfiguration::new(["/a", "/b"]).with_follow_symlinks(false),
        );

        assert_eq!(engine.search_uris(), ["/a", "/b"]);
        assert_eq!(engine.allowed_extensions(), ["args", "oso", "sdraliases"]);
        assert!(!engine.follows_symlinks());
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(DiscoveryStage::Filtering.to_string(), "filtering");
    }
}

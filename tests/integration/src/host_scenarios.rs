//! Host-level scenarios: environment-derived search paths, alternative
//! walkers and alias parsers plugged into the engine.

use ndr_discovery::{
    AliasParser, DiscoveryContext, DiscoveryDefaults, DiscoveryEngine, DiscoveryRecord, Error,
    NodeWalker, PathResolver, Result, SearchConfiguration,
};
use ndr_test_utils::TestTree;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::collections::HashMap;

/// Serves the `a.args`, `b.oso`, `c.sdraliases` scenario without touching disk.
struct InMemoryWalker;

impl NodeWalker for InMemoryWalker {
    fn walk(
        &self,
        _search_paths: &[String],
        extensions: &[String],
        _follow_symlinks: bool,
        _context: &DiscoveryContext,
    ) -> Result<Vec<DiscoveryRecord>> {
        Ok([
            DiscoveryRecord::new("c", "sdraliases", "mem://c.sdraliases"),
            DiscoveryRecord::new("a", "args", "mem://a.args"),
            DiscoveryRecord::new("b", "oso", "mem://b.oso"),
        ]
        .into_iter()
        .filter(|r| extensions.contains(&r.extension))
        .collect())
    }
}

/// Declares `a -> [aliasA]`, or fails when built as malformed.
struct ScenarioParser {
    malformed: bool,
}

impl AliasParser for ScenarioParser {
    fn parse_aliases(&self, record: &DiscoveryRecord) -> Result<Vec<(String, Vec<String>)>> {
        if self.malformed {
            return Err(Error::AliasParse {
                path: record.uri.clone().into(),
                message: "unterminated array".into(),
            });
        }
        Ok(vec![("a".into(), vec!["aliasA".into()])])
    }
}

fn in_memory_engine(malformed: bool) -> DiscoveryEngine {
    DiscoveryEngine::with_config(SearchConfiguration::new(["mem://"]))
        .with_walker(InMemoryWalker)
        .with_alias_parser(ScenarioParser { malformed })
}

fn summary(records: &[DiscoveryRecord]) -> Vec<(String, Vec<String>)> {
    records
        .iter()
        .map(|r| (r.identifier.clone(), r.aliases.clone()))
        .collect()
}

#[rstest]
#[case::keep_all(None, vec![("a", vec!["aliasA"]), ("b", vec![])])]
#[case::reject_b(Some("b"), vec![("a", vec!["aliasA"])])]
#[case::reject_a(Some("a"), vec![("b", vec![])])]
fn alias_file_consumed_whatever_the_predicate(
    #[case] reject: Option<&'static str>,
    #[case] expected: Vec<(&str, Vec<&str>)>,
) {
    let mut engine = in_memory_engine(false);
    if let Some(reject) = reject {
        engine = engine.with_filter(move |record| record.identifier != reject);
    }

    let records = engine.discover_nodes(&DiscoveryContext::new()).unwrap();

    let expected: Vec<(String, Vec<String>)> = expected
        .into_iter()
        .map(|(id, aliases)| (id.to_string(), aliases.into_iter().map(String::from).collect()))
        .collect();
    assert_eq!(summary(&records), expected);
}

#[test]
fn malformed_alias_file_does_not_abort() {
    let report = in_memory_engine(true)
        .discover_nodes_with_report(&DiscoveryContext::new())
        .unwrap();

    assert_eq!(
        summary(&report.records),
        vec![("a".to_string(), vec![]), ("b".to_string(), vec![])]
    );
    assert_eq!(report.alias_files, 1);
    assert_eq!(report.aliased, 0);
}

#[test]
fn renderer_install_layout_from_rmantree() {
    let rmantree = TestTree::new();
    rmantree.write("lib/shaders/PxrNoise.oso", "oso");
    rmantree.write("lib/shaders/legacy.sdraliases", "PxrNoise = [\"Noise\"]\n");
    rmantree.write("lib/plugins/Args/PxrSurface.args", "<args/>");
    rmantree.write("lib/plugins/Args/PxrNoise.args", "<args/>");
    rmantree.write("lib/plugins/PxrSurface.so", "binary");

    let env: HashMap<&str, &str> = [("RMANTREE", rmantree.root().to_str().unwrap())]
        .into_iter()
        .collect();
    let defaults = DiscoveryDefaults::from_env(&PathResolver::new(), &env);
    let engine = DiscoveryEngine::with_config(SearchConfiguration::new(defaults.search_paths.clone()));

    assert_eq!(engine.search_uris().len(), 2);
    assert!(engine.search_uris()[0].ends_with("lib/shaders"));
    assert!(engine.search_uris()[1].ends_with("lib/plugins/Args"));

    let records = engine.discover_nodes(&DiscoveryContext::new()).unwrap();

    let mut found: Vec<_> = records
        .iter()
        .map(|r| (format!("{}.{}", r.identifier, r.extension), r.aliases.clone()))
        .collect();
    found.sort();
    assert_eq!(
        found,
        vec![
            ("PxrNoise.args".to_string(), vec!["Noise".to_string()]),
            ("PxrNoise.oso".to_string(), vec!["Noise".to_string()]),
            ("PxrSurface.args".to_string(), vec![]),
        ]
    );
}

#[test]
fn extension_list_limits_in_memory_walker_too() {
    let engine = DiscoveryEngine::with_config(
        SearchConfiguration::new(["mem://"]).with_extensions(["oso"]),
    )
    .with_walker(InMemoryWalker)
    .with_alias_parser(ScenarioParser { malformed: false });

    let records = engine.discover_nodes(&DiscoveryContext::new()).unwrap();

    // The alias file was never walked, so nothing is aliased.
    assert_eq!(summary(&records), vec![("b".to_string(), vec![])]);
}

#[test]
fn shaderpath_and_rixpluginpath_replace_rmantree_defaults() {
    let studio = TestTree::new();
    studio.write("shaders/StudioRamp.oso", "oso");
    studio.mkdir("empty_shaders");
    studio.write("plugins/Args/StudioLight.args", "<args/>");
    studio.write("rman/lib/shaders/PxrNoise.oso", "oso");

    let shaderpath = std::env::join_paths([studio.path("shaders"), studio.path("empty_shaders")])
        .unwrap()
        .to_string_lossy()
        .into_owned();
    let rmantree = studio.path_str("rman");
    let plugins = studio.path_str("plugins");
    let env: HashMap<&str, &str> = [
        ("RMAN_SHADERPATH", shaderpath.as_str()),
        ("RMAN_RIXPLUGINPATH", plugins.as_str()),
        ("RMANTREE", rmantree.as_str()),
    ]
    .into_iter()
    .collect();

    let search_paths = PathResolver::new().resolve(&env);
    assert_eq!(search_paths.len(), 3);
    assert!(search_paths[2].ends_with("plugins/Args"));

    let records = DiscoveryEngine::with_config(SearchConfiguration::new(search_paths))
        .discover_nodes(&DiscoveryContext::new())
        .unwrap();

    let ids: Vec<&str> = records.iter().map(|r| r.identifier.as_str()).collect();
    assert_eq!(ids, vec!["StudioRamp", "StudioLight"]);
}

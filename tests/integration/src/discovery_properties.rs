//! Property tests for the two-pass alias semantics over generated trees

use ndr_discovery::{DiscoveryContext, DiscoveryEngine, SearchConfiguration};
use ndr_test_utils::TestTree;
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

type Declarations = BTreeMap<String, Vec<String>>;

fn node_strategy() -> impl Strategy<Value = BTreeSet<(String, &'static str)>> {
    proptest::collection::btree_set(("[a-f]", prop_oneof![Just("args"), Just("oso")]), 0..8)
}

fn alias_files_strategy() -> impl Strategy<Value = Vec<Declarations>> {
    proptest::collection::vec(
        proptest::collection::btree_map(
            "[a-h]",
            proptest::collection::vec("[A-Z][a-z]{0,4}", 0..3),
            0..4,
        ),
        0..3,
    )
}

fn build_tree(nodes: &BTreeSet<(String, &'static str)>, alias_files: &[Declarations]) -> TestTree {
    let tree = TestTree::new();
    for (id, ext) in nodes {
        tree.write(&format!("{id}.{ext}"), "x");
    }
    for (i, declarations) in alias_files.iter().enumerate() {
        let mut content = String::new();
        for (id, aliases) in declarations {
            let quoted: Vec<String> = aliases.iter().map(|a| format!("\"{a}\"")).collect();
            content.push_str(&format!("{id} = [{}]\n", quoted.join(", ")));
        }
        tree.write(&format!("aliases{i}.sdraliases"), &content);
    }
    tree
}

/// Aliases each identifier should end up with: the last alias file
/// declaring it wins.
fn expected_aliases(alias_files: &[Declarations]) -> Declarations {
    let mut merged = Declarations::new();
    for declarations in alias_files {
        for (id, aliases) in declarations {
            merged.insert(id.clone(), aliases.clone());
        }
    }
    merged
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn alias_files_never_in_catalog_and_aliases_follow_declarations(
        nodes in node_strategy(),
        alias_files in alias_files_strategy(),
        reject in "[a-f]",
    ) {
        let tree = build_tree(&nodes, &alias_files);
        let expected = expected_aliases(&alias_files);
        let rejected = reject.clone();
        let engine = DiscoveryEngine::with_config(SearchConfiguration::new([tree.search_path()]))
            .with_filter(move |record| record.identifier != rejected);

        let records = engine.discover_nodes(&DiscoveryContext::new()).unwrap();

        prop_assert!(records.iter().all(|r| r.extension != "sdraliases"));
        prop_assert!(records.iter().all(|r| r.identifier != reject));
        let expected_count = nodes.iter().filter(|(id, _)| *id != reject).count();
        prop_assert_eq!(records.len(), expected_count);
        for record in &records {
            let want = expected.get(&record.identifier).cloned().unwrap_or_default();
            prop_assert_eq!(&record.aliases, &want);
        }
    }

    #[test]
    fn discovery_is_deterministic(
        nodes in node_strategy(),
        alias_files in alias_files_strategy(),
    ) {
        let tree = build_tree(&nodes, &alias_files);
        let engine = DiscoveryEngine::with_config(SearchConfiguration::new([tree.search_path()]));

        let first = engine.discover_nodes(&DiscoveryContext::new()).unwrap();
        let second = engine.discover_nodes(&DiscoveryContext::new()).unwrap();

        prop_assert_eq!(first, second);
    }
}

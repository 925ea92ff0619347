//! Tests for RoamGraph construction, lookup and filtering

use super::*;
use crate::{
    codec::{BodyReader, GraphDiagnostic},
    properties::RawLink,
    source::RoamRecords,
    RoamError,
};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

fn set(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

/// n1 -> n2, n2 and n3 link nowhere. No self references.
fn three_nodes() -> RoamGraph {
    init_logging();
    let mut records = RoamRecords::default();
    records
        .push("n1", "Alpha", "/roam/alpha.org", ["math"], ["n2"])
        .push("n2", "Beta", "/roam/beta.org", ["math", "lecture"], Vec::<RawLink>::new())
        .push("n3", "Gamma", "/roam/gamma.org", Vec::<String>::new(), Vec::<RawLink>::new());
    RoamGraph::from_records(records)
}

/// A small collection shaped like an org-roam database load: every node references itself
/// first, then its body links.
fn roam_collection() -> RoamGraph {
    init_logging();
    let mut records = RoamRecords::default();
    records
        .push(
            "a",
            "monoidal category",
            "/roam/monoidal.org",
            ["category-theory"],
            vec![
                RawLink::id("a"),
                RawLink::id("b"),
                RawLink::id("b"),
                RawLink::new("https", "//ncatlab.org"),
            ],
        )
        .push(
            "b",
            "representation of group",
            "/roam/rep.org",
            ["algebra"],
            vec![RawLink::id("b"), RawLink::id("c")],
        )
        .push(
            "c",
            "group",
            "/roam/group.org",
            ["algebra", "reference"],
            vec![RawLink::id("c")],
        )
        .push(
            "d",
            "fleeting thought",
            "/roam/fleeting.org",
            ["fleeting"],
            vec![RawLink::id("d"), RawLink::id("zzz-deleted")],
        )
        .push(
            "e",
            "group",
            "/roam/group2.org",
            Vec::<String>::new(),
            vec![RawLink::id("e"), RawLink::new("file", "~/img/cayley.png")],
        );
    RoamGraph::from_records(records)
}

fn assert_no_dangling(graph: &RoamGraph) {
    for node in graph.nodes() {
        for target in node.backlinks.iter() {
            assert!(
                graph.node_index().contains_key(target),
                "{} has dangling backlink {}",
                node.id,
                target
            );
        }
    }
}

fn assert_orphan_symmetry(graph: &RoamGraph) {
    for node in graph.nodes() {
        let links_out = node.backlinks.iter().any(|t| t != &node.id);
        let linked_in = graph
            .nodes()
            .filter(|m| m.id != node.id)
            .any(|m| m.backlinks.contains(&node.id));
        assert_eq!(
            graph.orphans().contains(&node.id),
            !links_out && !linked_in,
            "orphan status of {}",
            node.id
        );
    }
}

#[test]
fn end_to_end_three_nodes() {
    let graph = three_nodes();
    assert_eq!(graph.orphans(), &set(&["n3"]));
    assert!(!graph.is_connected());
    assert_eq!(graph.size(), (3, 1));

    let filtered = graph.filter_tags(["x"], true);
    assert_eq!(filtered.size().0, 3);
    assert_eq!(filtered.orphans(), graph.orphans());
    assert_eq!(filtered, graph);
}

#[test]
fn construction_classifies_links() {
    let graph = roam_collection();
    let a = graph.node("a").unwrap();
    assert_eq!(a.backlinks, vec!["a", "b", "b"]);
    assert_eq!(a.misc_links.len(), 1);
    assert_eq!(a.misc_links[0].kind, "https");

    let d = graph.node("d").unwrap();
    assert_eq!(d.backlinks, vec!["d"]);
    assert_eq!(d.misc_links[0].kind, "id");
    assert_eq!(d.misc_links[0].content, "zzz-deleted");

    assert_no_dangling(&graph);
}

#[test]
fn graph_keeps_parallel_edges_and_self_loops() {
    let graph = roam_collection();
    // a: a,b,b  b: b,c  c: c  d: d  e: e
    assert_eq!(graph.size(), (5, 8));
    assert_eq!(graph.graph().edge_multiplicity("a", "b"), 2);
    assert_eq!(graph.graph().edge_multiplicity("b", "a"), 0);
    assert_eq!(graph.graph().edge_multiplicity("c", "c"), 1);
    assert_eq!(graph.graph().neighbors_undirected("b"), set(&["a", "c"]));
}

#[test]
fn self_references_do_not_prevent_orphanhood() {
    let graph = roam_collection();
    assert_eq!(graph.orphans(), &set(&["d", "e"]));
    assert!(!graph.is_connected());
    assert_orphan_symmetry(&graph);
}

#[test]
fn duplicate_titles_are_flagged_not_merged() {
    let graph = roam_collection();
    assert_eq!(graph.duplicate_titles(), ["group"]);
    assert!(graph.has_duplicate_titles());
    assert_eq!(graph.size().0, 5);
    assert_eq!(
        graph.diagnostics(),
        [GraphDiagnostic::DuplicateTitles(vec!["group".to_string()])]
    );

    // first match in index order
    assert_eq!(graph.node_id("group").unwrap(), "c");
}

#[test]
fn duplicate_titles_per_repeat_occurrence() {
    let mut records = RoamRecords::default();
    for (id, title) in [("1", "A"), ("2", "B"), ("3", "A"), ("4", "C"), ("5", "A")] {
        records.push(id, title, "x.org", Vec::<String>::new(), Vec::<RawLink>::new());
    }
    let graph = RoamGraph::from_records(records);
    assert_eq!(graph.duplicate_titles(), ["A", "A"]);
    assert!(graph.has_duplicate_titles());
}

#[test]
fn lookups_accept_ids_and_titles() {
    let graph = roam_collection();
    assert_eq!(graph.node_title("a").unwrap(), "monoidal category");
    assert_eq!(graph.node_title("monoidal category").unwrap(), "monoidal category");
    assert_eq!(graph.node_id("representation of group").unwrap(), "b");
    assert_eq!(graph.node_id("b").unwrap(), "b");
    assert!(graph
        .node_links("monoidal category")
        .unwrap()
        .contains(&graph.node("representation of group").unwrap().id));
}

#[test]
fn unresolved_lookups_fail_with_not_found() {
    let graph = roam_collection();
    for result in [
        graph.node("foo bar baz").map(|_| ()),
        graph.node_title("foo bar baz").map(|_| ()),
        graph.node_id("foo bar baz").map(|_| ()),
        graph.node_links("foo bar baz").map(|_| ()),
    ] {
        match result {
            Err(RoamError::NotFound(msg)) => assert!(msg.contains("foo bar baz")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}

#[test]
fn id_wins_when_title_collides_with_id() {
    let mut records = RoamRecords::default();
    records
        .push("alpha", "First", "1.org", Vec::<String>::new(), Vec::<RawLink>::new())
        .push("beta", "alpha", "2.org", Vec::<String>::new(), Vec::<RawLink>::new());
    let graph = RoamGraph::from_records(records);
    assert_eq!(graph.node("alpha").unwrap().title, "First");
}

#[test]
fn exclude_filter_prunes_backlinks() {
    let graph = roam_collection();
    let filtered = graph.filter_tags(["algebra"], true);

    assert_eq!(filtered.ids(), vec!["a", "d", "e"]);
    let a = filtered.node("a").unwrap();
    assert_eq!(a.backlinks, vec!["a"]);
    // removed targets fall back to id-kind misc links
    assert_eq!(
        a.misc_links.iter().filter(|l| l.kind == "id").count(),
        2,
        "{:?}",
        a.misc_links
    );
    assert_no_dangling(&filtered);
    assert_orphan_symmetry(&filtered);
    assert_eq!(filtered.orphans(), &set(&["a", "d", "e"]));
    assert_eq!(filtered.size(), (3, 3));

    // parent untouched
    assert_eq!(graph.size(), (5, 8));
    assert_eq!(graph.node("a").unwrap().backlinks, vec!["a", "b", "b"]);
}

#[test]
fn keep_filter_retains_only_matching_nodes() {
    let graph = roam_collection();
    let kept = graph.filter_tags(["algebra"], false);
    assert_eq!(kept.ids(), vec!["b", "c"]);
    assert_eq!(kept.node("b").unwrap().backlinks, vec!["b", "c"]);
    assert!(kept.orphans().is_empty());
    assert!(kept.is_connected());
    assert!(!kept.has_duplicate_titles());
    assert!(kept.diagnostics().is_empty());
}

#[test]
fn filter_does_not_strip_tags() {
    let graph = roam_collection();
    let kept = graph.filter_tags(["reference"], false);
    assert_eq!(kept.node("c").unwrap().tags, set(&["algebra", "reference"]));
}

#[test]
fn filtering_is_idempotent() {
    let graph = roam_collection();
    for tags in [vec!["algebra"], vec!["fleeting", "category-theory"], vec![]] {
        let once = graph.filter_tags(tags.clone(), true);
        let twice = once.filter_tags(tags.clone(), true);
        assert_eq!(once, twice, "tags {tags:?}");
        assert_eq!(once.misc_link_index(), twice.misc_link_index());
    }
}

#[test]
fn empty_and_unmatched_filters() {
    let graph = roam_collection();
    assert_eq!(graph.filter_tags(Vec::<String>::new(), true), graph);
    assert_eq!(graph.filter_tags(["nope"], true), graph);

    let empty = graph.filter_tags(Vec::<String>::new(), false);
    assert!(empty.is_empty());
    assert_eq!(empty.size(), (0, 0));
    assert!(empty.is_connected());
}

#[test]
fn regex_tag_filter() {
    let graph = roam_collection();
    let patterns = [Regex::new("alg").unwrap(), Regex::new("fleet").unwrap()];
    let filtered = graph.filter_tag_patterns(&patterns, true);
    assert_eq!(filtered.ids(), vec!["a", "e"]);
    assert_no_dangling(&filtered);
}

#[test]
fn remove_orphans_leaves_no_orphans() {
    let graph = roam_collection();
    let orphanless = graph.remove_orphans();
    assert_eq!(orphanless.ids(), vec!["a", "b", "c"]);
    assert!(orphanless.is_connected());
    assert_no_dangling(&orphanless);
    assert_eq!(graph.size().0, 5);
}

#[test]
fn removing_a_hub_creates_orphans() {
    init_logging();
    let mut records = RoamRecords::default();
    records
        .push("hub", "Hub", "h.org", ["index"], ["leaf1", "leaf2"])
        .push("leaf1", "Leaf 1", "l1.org", Vec::<String>::new(), Vec::<RawLink>::new())
        .push("leaf2", "Leaf 2", "l2.org", Vec::<String>::new(), Vec::<RawLink>::new());
    let graph = RoamGraph::from_records(records);
    assert!(graph.is_connected());

    let without_hub = graph.filter_tags(["index"], true);
    assert_eq!(without_hub.orphans(), &set(&["leaf1", "leaf2"]));
    assert!(!without_hub.is_connected());
}

#[test]
fn bulk_views() {
    let graph = roam_collection();
    assert_eq!(
        graph.all_tags(),
        set(&["algebra", "category-theory", "fleeting", "reference"])
    );
    assert_eq!(graph.backlink_index()["b"], vec!["b", "c"]);
    assert_eq!(graph.tag_index()["e"], BTreeSet::new());
    assert_eq!(graph.id_title_map()["c"], "group");
    assert_eq!(graph.title_index(), graph.id_title_map());
    assert_eq!(graph.location_index()["a"], "/roam/monoidal.org");
    assert_eq!(graph.misc_link_index()["e"][0].kind, "file");
    assert_eq!(graph.locations(true)[0], "monoidal.org");
    assert_eq!(graph.locations(false)[0], "/roam/monoidal.org");
    assert_eq!(graph.titles()[1], "representation of group");
}

#[test]
fn export_lists_every_edge() {
    let graph = three_nodes();
    let export = graph.export();
    assert_eq!(export.nodes.len(), 3);
    assert_eq!(export.edges, vec![("n1".to_string(), "n2".to_string())]);
    let json = serde_json::to_string(&export).unwrap();
    assert!(json.contains("\"Alpha\""));
}

#[test]
fn collections_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RoamGraph>();

    let graph = roam_collection();
    let child = graph.filter_tags(["algebra"], true);
    std::thread::scope(|s| {
        s.spawn(|| assert_eq!(graph.size().0, 5));
        s.spawn(|| assert_eq!(child.size().0, 3));
    });
}

struct MapReader(BTreeMap<String, String>);

impl BodyReader for MapReader {
    fn body_text(&self, _location: &str, id: &str) -> Result<String, RoamError> {
        self.0
            .get(id)
            .cloned()
            .ok_or_else(|| RoamError::NotFound(id.to_string()))
    }
}

#[test]
fn content_extraction_through_reader() {
    let graph = three_nodes();
    let reader = MapReader(BTreeMap::from([
        (
            "n1".to_string(),
            "Math \\(x^2\\)\n#+BEGIN_SRC python\nprint(1)\n#+END_SRC".to_string(),
        ),
        ("n2".to_string(), "plain".to_string()),
    ]));

    assert_eq!(graph.get_latex_snippets(&reader, "Alpha").unwrap(), vec!["x^2"]);
    assert_eq!(
        graph.get_src_blocks(&reader, "n1").unwrap(),
        vec![("python".to_string(), "print(1)".to_string())]
    );
    assert_eq!(graph.get_body(&reader, "Beta").unwrap(), "plain");
    assert!(matches!(
        graph.get_body(&reader, "nobody"),
        Err(RoamError::NotFound(_))
    ));
    // n3 has no body in the reader
    assert!(graph.body_index(&reader).is_err());

    let two = graph.filter_tags(["math"], false);
    assert_eq!(two.math_snippet_index(&reader).unwrap()["n2"], Vec::<String>::new());
    assert_eq!(two.src_block_index(&reader).unwrap()["n1"].len(), 1);
}

#[test]
#[should_panic(expected = "not parallel")]
fn mismatched_records_panic() {
    let records = RoamRecords {
        ids: vec!["a".into(), "b".into()],
        titles: vec!["A".into()],
        ..Default::default()
    };
    let _ = RoamGraph::from_records(records);
}

//! End-to-end tests for the `ypath` query engine against `Document`/`NodeRef`.

use fyaml::Document;

fn names(yaml: &str, expr: &str) -> Vec<String> {
    let doc = Document::parse_str(yaml).unwrap();
    doc.query(expr)
        .unwrap()
        .iter()
        .map(|n| n.emit().unwrap())
        .collect()
}

#[test]
fn simple_mapping_lookup() {
    let yaml = indoc::indoc! {"
        a:
          b: 1
          c: 2
    "};
    let doc = Document::parse_str(yaml).unwrap();
    let results = doc.query("/a/b").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].scalar_str().unwrap(), "1");
}

#[test]
fn every_child_over_sequence() {
    let doc = Document::parse_str("list:\n  - 10\n  - 20\n  - 30\n  - 40").unwrap();
    let results = doc.query("/list/*").unwrap();
    let vals: Vec<&str> = results.iter().map(|n| n.scalar_str().unwrap()).collect();
    assert_eq!(vals, vec!["10", "20", "30", "40"]);
}

#[test]
fn negative_index_and_slice() {
    let doc = Document::parse_str("list:\n  - 10\n  - 20\n  - 30\n  - 40").unwrap();
    let last = doc.query("/list/-1").unwrap();
    assert_eq!(last[0].scalar_str().unwrap(), "40");

    let middle = doc.query("/list/1:3").unwrap();
    let vals: Vec<&str> = middle.iter().map(|n| n.scalar_str().unwrap()).collect();
    assert_eq!(vals, vec!["20", "30"]);
}

#[test]
fn recursive_descent_finds_every_node() {
    let yaml = indoc::indoc! {"
        a:
          b: 1
          c: 2
        d: 3
    "};
    let doc = Document::parse_str(yaml).unwrap();
    let results = doc.query("/**$").unwrap();
    let vals: Vec<&str> = results.iter().map(|n| n.scalar_str().unwrap()).collect();
    assert_eq!(vals, vec!["1", "2", "3"]);
}

#[test]
fn alias_resolution() {
    let yaml = indoc::indoc! {"
        d: &anc
          x: 9
        e: *anc
    "};
    let doc = Document::parse_str(yaml).unwrap();
    let results = doc.query("/*anc/x").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].scalar_str().unwrap(), "9");
}

#[test]
fn union_deduplicates_across_branches() {
    let yaml = "a:\n  b: 1\n  c: 2\nd: 1";
    let doc = Document::parse_str(yaml).unwrap();
    let results = doc.query("/a/b,/a/b").unwrap();
    assert_eq!(results.len(), 1);
}

#[test]
fn sibling_hops_to_a_parents_other_key() {
    let yaml = indoc::indoc! {"
        a:
          b: 1
          c: 2
    "};
    let doc = Document::parse_str(yaml).unwrap();
    let results = doc.query("/a/b:c").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].scalar_str().unwrap(), "2");
}

#[test]
fn scalar_filter_excludes_collections_from_every_child() {
    let yaml = "scalar: 1\nmapping:\n  k: v";
    let doc = Document::parse_str(yaml).unwrap();
    let results = doc.query("/*$").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].scalar_str().unwrap(), "1");
}

#[test]
fn quoted_map_key_with_colon_inside() {
    let yaml = "\"a: b\": found";
    let doc = Document::parse_str(yaml).unwrap();
    let results = doc.query("/\"a: b\"").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].scalar_str().unwrap(), "found");
}

#[test]
fn bad_expression_reports_a_lex_error() {
    let doc = Document::parse_str("a: 1").unwrap();
    let err = doc.query("#").unwrap_err();
    assert!(err.to_string().contains("unexpected character"));
}

#[test]
fn missing_key_yields_empty_results_not_an_error() {
    let doc = Document::parse_str("a: 1").unwrap();
    let results = doc.query("/missing").unwrap();
    assert!(results.is_empty());
}

#[test]
fn node_level_query_matches_document_level_query() {
    let doc = Document::parse_str("a:\n  b: 1").unwrap();
    let root = doc.root().unwrap();
    let via_node = root.query("/a/b").unwrap();
    let via_doc = doc.query("/a/b").unwrap();
    assert_eq!(via_node.len(), via_doc.len());
    assert_eq!(
        via_node[0].scalar_str().unwrap(),
        via_doc[0].scalar_str().unwrap()
    );
}

#[test]
fn emitted_results_render_the_expected_names() {
    let doc = Document::parse_str("users:\n  - name: Alice\n  - name: Bob").unwrap();
    let rendered = names("users:\n  - name: Alice\n  - name: Bob", "/users/*/name");
    assert_eq!(rendered, vec!["Alice".to_string(), "Bob".to_string()]);
    drop(doc);
}

//! Matching scenarios over real Rust sources, plus attribute-operator
//! corner cases over a hand-built host.

use astq_selectors::{parse_query, Query, Queryable};
use astq_tree::{parse_source, HostNode, NodeRef, SourceAst, Tree, WalkEvent};

const SRC_MAIN: &str = "fn main() {}";
const SRC_ITEMS: &str = "use std::fmt;\nfn f() { g(); }\nfn f2() {}\n";
const SRC_STRUCT: &str = "struct S {\n    hoge: String,\n    huga: String,\n}\n";
const SRC_TYPES: &str = "struct S { x: i32 }\ntrait T {}\n";
const SRC_FNS: &str = "fn fa() {}\nfn fab() {}\nfn fb() {}\nfn fba() {}\n";

fn q(text: &str) -> Query {
    parse_query(text).unwrap()
}

fn names<'t>(matches: &[NodeRef<'t>]) -> Vec<&'t str> {
    matches.iter().map(|m| m.name()).collect()
}

fn texts<'a>(source: &'a str, matches: &[NodeRef<'_>]) -> Vec<&'a str> {
    matches.iter().map(|m| &source[m.pos()..m.end()]).collect()
}

fn fn_names<'t>(matches: &[NodeRef<'t>]) -> Vec<&'t str> {
    matches.iter().map(|m| m.attr("name").unwrap()).collect()
}

#[test]
fn test_root_type_selector() {
    let tree = parse_source(SRC_MAIN).unwrap();
    let matches = (&tree).query_all(&q("source_file"));
    assert_eq!(names(&matches), ["source_file"]);
}

#[test]
fn test_descendant_selector_finds_nested_identifier() {
    let tree = parse_source(SRC_MAIN).unwrap();
    let matches = (&tree).query_all(&q("source_file identifier"));
    assert_eq!(texts(SRC_MAIN, &matches), ["main"]);
}

#[test]
fn test_universal_matches_every_node() {
    let tree = parse_source(SRC_MAIN).unwrap();
    let matches = (&tree).query_all(&q("*"));
    assert_eq!(matches.len(), tree.len());
    assert_eq!(
        names(&matches),
        ["source_file", "function_item", "identifier", "parameters", "block"]
    );
}

#[test]
fn test_descendant_is_superset_of_child() {
    let tree = parse_source(SRC_ITEMS).unwrap();
    let descendant = (&tree).query_all(&q("function_item identifier"));
    let child = (&tree).query_all(&q("function_item > identifier"));
    assert_eq!(texts(SRC_ITEMS, &descendant), ["f", "g", "f2"]);
    assert_eq!(texts(SRC_ITEMS, &child), ["f", "f2"]);
    for node in &child {
        assert!(descendant.contains(node));
    }
}

#[test]
fn test_child_selector_requires_direct_parent() {
    let tree = parse_source(SRC_ITEMS).unwrap();
    // Call arguments live two levels below the function item.
    let matches = (&tree).query_all(&q("function_item > call_expression"));
    assert!(matches.is_empty());
}

#[test]
fn test_three_link_chain() {
    let tree = parse_source(SRC_ITEMS).unwrap();
    let matches = (&tree).query_all(&q("source_file > function_item > identifier"));
    assert_eq!(texts(SRC_ITEMS, &matches), ["f", "f2"]);
}

#[test]
fn test_next_sibling_combinator() {
    let tree = parse_source(SRC_ITEMS).unwrap();
    let matches = (&tree).query_all(&q("use_declaration + function_item"));
    assert_eq!(fn_names(&matches), ["f"]);
}

#[test]
fn test_subsequent_sibling_combinator() {
    let tree = parse_source(SRC_ITEMS).unwrap();
    let matches = (&tree).query_all(&q("use_declaration ~ function_item"));
    assert_eq!(fn_names(&matches), ["f", "f2"]);
}

#[test]
fn test_sibling_matches_inside_nested_items_stay_in_document_order() {
    // `inner2` completes the chain inside `outer`, while `after` completes
    // it at the top level; the sibling branch at `outer` fires before the
    // nested one is discovered, but the result must still read in source
    // order.
    let source = "fn outer() { fn inner() {} fn inner2() {} }\nfn after() {}\n";
    let tree = parse_source(source).unwrap();
    let adjacent = (&tree).query_all(&q("function_item + function_item"));
    assert_eq!(fn_names(&adjacent), ["inner2", "after"]);
    let positions: Vec<usize> = adjacent.iter().map(|m| m.pos()).collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(
        (&tree).query_first(&q("function_item + function_item")),
        adjacent.first().copied()
    );

    let general = (&tree).query_all(&q("function_item ~ function_item"));
    assert_eq!(fn_names(&general), ["inner2", "after"]);
}

#[test]
fn test_sibling_combinator_inside_chain() {
    let tree = parse_source(SRC_ITEMS).unwrap();
    let matches = (&tree).query_all(&q("source_file > use_declaration + function_item identifier"));
    assert_eq!(texts(SRC_ITEMS, &matches), ["f", "g"]);
}

#[test]
fn test_first_and_last_child() {
    let tree = parse_source(SRC_STRUCT).unwrap();
    let first = (&tree).query_all(&q("struct_item field_declaration:first-child"));
    assert_eq!(fn_names(&first), ["hoge"]);
    let last = (&tree).query_all(&q("struct_item field_declaration:last-child"));
    assert_eq!(fn_names(&last), ["huga"]);
}

#[test]
fn test_root_is_not_a_first_child() {
    let tree = parse_source(SRC_MAIN).unwrap();
    assert!((&tree).query_all(&q("source_file:first-child")).is_empty());
    assert!((&tree).query_all(&q("source_file:last-child")).is_empty());
}

#[test]
fn test_first_and_last_of_type() {
    let tree = parse_source(SRC_ITEMS).unwrap();
    let first = (&tree).query_all(&q("function_item:first-of-type"));
    assert_eq!(fn_names(&first), ["f"]);
    let last = (&tree).query_all(&q("function_item:last-of-type"));
    assert_eq!(fn_names(&last), ["f2"]);
    // A type with a single occurrence is both first and last of its type.
    let only = (&tree).query_all(&q("use_declaration:first-of-type, use_declaration:last-of-type"));
    assert_eq!(names(&only), ["use_declaration"]);
}

#[test]
fn test_empty_pseudo_class() {
    let no_body = parse_source(SRC_MAIN).unwrap();
    assert_eq!((&no_body).query_all(&q("block:empty")).len(), 1);

    let with_comment = parse_source("fn main() { /* nothing */ }").unwrap();
    assert_eq!((&with_comment).query_all(&q("block:empty")).len(), 1);

    let with_call = parse_source("fn main() { g(); }").unwrap();
    assert!((&with_call).query_all(&q("block:empty")).is_empty());
}

#[test]
fn test_root_pseudo_class() {
    let tree = parse_source(SRC_ITEMS).unwrap();
    let matches = (&tree).query_all(&q("*:root"));
    assert_eq!(names(&matches), ["source_file"]);
    // Bare `:root` with no name works the same.
    assert_eq!((&tree).query_all(&q(":root")), matches);
}

#[test]
fn test_attribute_presence_and_equality() {
    let tree = parse_source(SRC_FNS).unwrap();
    assert_eq!((&tree).query_all(&q("function_item[name]")).len(), 4);
    assert_eq!(fn_names(&(&tree).query_all(&q("function_item[name='fb']"))), ["fb"]);
    // Identifiers expose no fields at all; absence is "no match".
    assert!((&tree).query_all(&q("identifier[name]")).is_empty());
}

#[test]
fn test_attribute_prefix_suffix_substring() {
    let tree = parse_source(SRC_FNS).unwrap();
    assert_eq!(
        fn_names(&(&tree).query_all(&q("function_item[name^='fa']"))),
        ["fa", "fab"]
    );
    assert_eq!(
        fn_names(&(&tree).query_all(&q("function_item[name$='a']"))),
        ["fa", "fba"]
    );
    assert_eq!(
        fn_names(&(&tree).query_all(&q("function_item[name*='b']"))),
        ["fab", "fb", "fba"]
    );
}

#[test]
fn test_is_pseudo_class() {
    let tree = parse_source(SRC_TYPES).unwrap();
    let matches = (&tree).query_all(&q("*:is(struct_item, trait_item)"));
    assert_eq!(names(&matches), ["struct_item", "trait_item"]);
}

#[test]
fn test_not_pseudo_class() {
    let tree = parse_source(SRC_TYPES).unwrap();
    let matches = (&tree).query_all(&q("source_file > *:not(trait_item)"));
    assert_eq!(names(&matches), ["struct_item"]);
}

#[test]
fn test_is_and_not_partition_the_tree() {
    let tree = parse_source(SRC_TYPES).unwrap();
    let all = (&tree).query_all(&q("*")).len();
    let yes = (&tree).query_all(&q("*:is(struct_item, field_declaration)")).len();
    let no = (&tree).query_all(&q("*:not(struct_item, field_declaration)")).len();
    assert_eq!(yes + no, all);
}

#[test]
fn test_has_pseudo_class() {
    let tree = parse_source(SRC_STRUCT).unwrap();
    let matches = (&tree).query_all(&q("source_file struct_item:has(field_declaration)"));
    assert_eq!(names(&matches), ["struct_item"]);
}

#[test]
fn test_has_with_leading_child_combinator() {
    let tree = parse_source(SRC_STRUCT).unwrap();
    // Fields sit under the field declaration list, not the struct itself.
    assert!((&tree)
        .query_all(&q("struct_item:has(>field_declaration)"))
        .is_empty());
    assert_eq!(
        (&tree).query_all(&q("struct_item:has(>field_declaration_list)"))
            .len(),
        1
    );
}

#[test]
fn test_has_with_embedded_chain() {
    let tree = parse_source(SRC_ITEMS).unwrap();
    let matches = (&tree).query_all(&q("function_item:has(call_expression)"));
    assert_eq!(fn_names(&matches), ["f"]);
}

#[test]
fn test_union_deduplicates() {
    let tree = parse_source(SRC_ITEMS).unwrap();
    let once = (&tree).query_all(&q("function_item"));
    let twice = (&tree).query_all(&q("function_item, function_item"));
    assert_eq!(once, twice);
}

#[test]
fn test_union_order_is_first_producer() {
    let tree = parse_source(SRC_ITEMS).unwrap();
    let matches = (&tree).query_all(&q("function_item, use_declaration"));
    assert_eq!(
        names(&matches),
        ["function_item", "function_item", "use_declaration"]
    );
}

#[test]
fn test_query_first_matches_head_of_query_all() {
    let tree = parse_source(SRC_ITEMS).unwrap();
    for text in [
        "function_item",
        "identifier",
        "use_declaration ~ function_item",
        "enum_item",
    ] {
        let query = q(text);
        let all = (&tree).query_all(&query);
        assert_eq!((&tree).query_first(&query), all.first().copied(), "{text}");
    }
}

#[test]
fn test_query_first_falls_through_unmatched_selectors() {
    let tree = parse_source(SRC_ITEMS).unwrap();
    let found = (&tree).query_first(&q("enum_item, function_item")).unwrap();
    assert_eq!(found.attr("name"), Some("f"));
}

#[test]
fn test_empty_query_matches_nothing() {
    let tree = parse_source(SRC_ITEMS).unwrap();
    assert!((&tree).query_all(&q("")).is_empty());
    assert!((&tree).query_first(&q("")).is_none());
}

#[test]
fn test_query_from_node() {
    let tree = parse_source(SRC_ITEMS).unwrap();
    let f = (&tree).query_first(&q("function_item")).unwrap();
    let matches = f.query_all(&q("identifier"));
    assert_eq!(texts(SRC_ITEMS, &matches), ["f", "g"]);
}

// Word and dash matching need field values with interior structure, which
// the Rust grammar's token fields never produce; a canned host stands in.

struct StubHost {
    events: Vec<WalkEvent>,
}

impl SourceAst for StubHost {
    fn walk(&self, visit: &mut dyn FnMut(WalkEvent)) {
        for event in &self.events {
            visit(event.clone());
        }
    }
}

fn labelled_tree() -> Tree {
    let mut file = HostNode::new("*ast.File", 0, 50);
    file.fields = vec![("Doc".to_string(), "alpha beta-gamma unix-like".to_string())];
    Tree::wrap(&StubHost {
        events: vec![WalkEvent::Enter(file), WalkEvent::Leave],
    })
}

#[test]
fn test_attribute_word_match() {
    let tree = labelled_tree();
    assert_eq!((&tree).query_all(&q("File[Doc~='alpha']")).len(), 1);
    // `beta` is only part of the hyphenated word.
    assert!((&tree).query_all(&q("File[Doc~='beta']")).is_empty());
    assert!((&tree).query_all(&q("File[Doc~='alp']")).is_empty());
}

#[test]
fn test_attribute_dash_match_is_substring_based() {
    let tree = labelled_tree();
    assert_eq!((&tree).query_all(&q("File[Doc|='beta']")).len(), 1);
    assert_eq!((&tree).query_all(&q("File[Doc|='unix']")).len(), 1);
    assert!((&tree).query_all(&q("File[Doc|='alpha']")).is_empty());
}

#[test]
fn test_selector_matches_short_type_name() {
    let tree = labelled_tree();
    assert_eq!((&tree).query_all(&q("File")).len(), 1);
    // The qualified name is not what selectors see.
    assert!((&tree).query_all(&q("ast")).is_empty());
}

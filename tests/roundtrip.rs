use proptest::prelude::*;

use regex_tree::regex::{
    Edge, Multiplicity, ParseError, ParseOptions, Simple, SyntaxErrorKind, export, parse_regex,
    roundtrip, serialize,
};

const CORPUS: &[&str] = &[
    "abc?",
    "ab+c",
    "(ab)+c",
    "abc|d",
    "a?",
    ".*?(a|b){,9}?",
    "(XYZ)|(123)",
    "^a{2,5}b{3}$",
    "[_0-9a-z]+",
    "x{4,}?y{0}",
    "(a(b|c)*)+?",
    r"\\d\\",
    "a|",
    "()",
    "",
    "[^\"]",
    "a]b}",
    "ab[cd]",
    "a[b",
];

#[test]
fn corpus_round_trips() {
    for pattern in CORPUS {
        let tree = parse_regex(pattern).unwrap_or_else(|e| panic!("{pattern}: {e}"));
        assert_eq!(serialize(&tree), *pattern);
    }
}

#[test]
fn charset_with_dashes_and_escaped_bracket_does_not_round_trip() {
    let pattern = r#"[^-a\-f-z"\]aaaa-]?"#;
    let result = roundtrip(pattern, &ParseOptions::default()).unwrap();

    // Sorted and deduplicated, the unescaped ']' now closes the charset early.
    assert_eq!(result.canonical, r#"[^"-]af-z]?"#);
    assert!(!result.matches(pattern));

    let reparsed = parse_regex(&result.canonical).unwrap();
    assert_ne!(reparsed, result.tree);
}

#[test]
fn escaped_metachars_lose_their_escape() {
    let result = roundtrip(r"a\*", &ParseOptions::default()).unwrap();
    assert_eq!(result.canonical, "a*");
    assert_eq!(
        result.tree.branches[0].atoms[0].expr,
        Simple::literal("a*")
    );
}

#[test]
fn bracket_mid_run_reads_back_but_leading_escaped_bracket_does_not() {
    let result = roundtrip(r"a\[b", &ParseOptions::default()).unwrap();
    assert_eq!(result.canonical, "a[b");
    assert_eq!(parse_regex(&result.canonical).unwrap(), result.tree);

    // At the start of a simple expression an unescaped '[' opens a charset.
    let result = roundtrip(r"\[ab]", &ParseOptions::default()).unwrap();
    assert_eq!(result.tree.branches[0].atoms[0].expr, Simple::literal("[ab]"));
    assert_eq!(result.canonical, "[ab]");
    let reparsed = parse_regex(&result.canonical).unwrap();
    assert!(matches!(reparsed.branches[0].atoms[0].expr, Simple::Charset(_)));
}

#[test]
fn quantifier_binds_to_last_char_of_run() {
    let tree = parse_regex("hello+").unwrap();
    let atoms = &tree.branches[0].atoms;
    assert_eq!(atoms.len(), 2);
    assert_eq!(atoms[0].expr, Simple::literal("hell"));
    assert_eq!(atoms[1].expr, Simple::literal("o"));
    assert_eq!(atoms[1].mult, Multiplicity::at_least(1));
}

#[test]
fn no_partial_tree_on_error() {
    assert!(matches!(
        parse_regex("a|[abc"),
        Err(ParseError::Syntax {
            offset: 6,
            kind: SyntaxErrorKind::UnterminatedCharset,
            ..
        })
    ));
    assert!(matches!(
        parse_regex("a|b)"),
        Err(ParseError::TrailingInput { offset: 3, .. })
    ));
}

#[test]
fn export_node_counts() {
    let count = |p: &str| export(&parse_regex(p).unwrap(), p).nodes.len();
    assert_eq!(count("a"), 1);
    assert_eq!(count("(a)"), 2);
    assert_eq!(count("abc|d"), 3);
    assert_eq!(count("[abc]"), 4);
    assert_eq!(count(".*?(a|b){,9}?"), 6);
}

fn quantifier() -> impl Strategy<Value = String> {
    let repeating = prop_oneof![
        Just("*".to_string()),
        Just("+".to_string()),
        (2u32..20).prop_map(|n| format!("{{{n},}}")),
        (2u32..20).prop_map(|m| format!("{{,{m}}}")),
        (1u32..10, 1u32..10).prop_map(|(n, d)| format!("{{{n},{}}}", n + d)),
    ];
    prop_oneof![
        Just(String::new()),
        Just("?".to_string()),
        (2u32..20).prop_map(|n| format!("{{{n}}}")),
        (repeating, any::<bool>()).prop_map(|(q, lazy)| if lazy { q + "?" } else { q }),
    ]
}

fn charset() -> impl Strategy<Value = String> {
    (any::<bool>(), b'a'..=b'z', 0u8..4, any::<bool>()).prop_map(|(negated, from, span, range)| {
        let caret = if negated { "^" } else { "" };
        if range {
            let till = from.saturating_add(span).min(b'z');
            format!("[{caret}{}-{}]", from as char, till as char)
        } else {
            format!("[{caret}{}]", from as char)
        }
    })
}

fn alternative(simple: BoxedStrategy<String>) -> impl Strategy<Value = String> {
    let atom = (simple, quantifier()).prop_map(|(s, q)| s + &q);
    let sequence = prop::collection::vec(atom, 0..4).prop_map(|atoms| atoms.concat());
    prop::collection::vec(sequence, 1..3).prop_map(|branches| branches.join("|"))
}

fn pattern() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        "[a-z0-9]{1,3}",
        Just(".".to_string()),
        Just("^".to_string()),
        Just("$".to_string()),
        charset(),
    ];
    let simple = leaf.prop_recursive(3, 24, 4, |inner| {
        alternative(inner).prop_map(|a| format!("({a})"))
    });
    alternative(simple.boxed())
}

proptest! {
    #[test]
    fn canonical_patterns_round_trip(p in pattern()) {
        let tree = parse_regex(&p).unwrap();
        prop_assert_eq!(serialize(&tree), p);
    }

    #[test]
    fn exported_edges_point_at_emitted_nodes(p in pattern()) {
        let graph = export(&parse_regex(&p).unwrap(), &p);
        prop_assert_eq!(graph.root.index(), graph.nodes.len() - 1);
        for edge in &graph.edges {
            match edge {
                Edge::Children { parent, children } => {
                    prop_assert!(graph.node(*parent).is_some());
                    for child in children {
                        prop_assert!(child < parent);
                    }
                }
                Edge::Repeat { node, .. } => prop_assert!(graph.node(*node).is_some()),
            }
        }
    }
}

//! Property-based tests for cleaning and serialization
//!
//! Generated trees mix the tags that have rules with noise (buttons,
//! injected controls, banner headings) and unhandled wrappers.

use copymd::{clean, convert, serialize, Node};
use proptest::prelude::*;

/// Plain text, Markdown punctuation, line breaks and the banner phrase itself
fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,12}",
        "[a-z*_`\\[\\]()#]{1,8}",
        Just("\n".to_string()),
        Just("ChatGPT said:".to_string()),
    ]
}

fn tag_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "div", "span", "p", "h1", "h3", "h6", "strong", "em", "b", "i", "code", "pre", "ul", "ol",
        "li", "a", "br", "button", "table", "blockquote",
    ])
}

fn attrs_strategy() -> impl Strategy<Value = Vec<(&'static str, &'static str)>> {
    prop_oneof![
        Just(vec![]),
        Just(vec![("class", "cgpt-copy-md-btn")]),
        Just(vec![("class", "hljs language-rust")]),
        Just(vec![("href", "https://x.test")]),
    ]
}

fn node_strategy() -> impl Strategy<Value = Node> {
    let leaf = text_strategy().prop_map(|t| Node::text(&t));
    leaf.prop_recursive(4, 48, 5, |inner| {
        (tag_strategy(), attrs_strategy(), prop::collection::vec(inner, 0..5)).prop_map(
            |(tag, attrs, children)| Node::element_with_attrs(tag, attrs).with_children(children),
        )
    })
}

proptest! {
    #[test]
    fn clean_is_idempotent(tree in node_strategy()) {
        let root = Node::element("div").with_child(tree);
        let once = clean(&root);
        let twice = clean(&once);
        prop_assert_eq!(serialize(&once, ""), serialize(&twice, ""));
    }

    #[test]
    fn convert_is_deterministic(tree in node_strategy()) {
        let copy = tree.clone();
        prop_assert_eq!(convert(&tree), convert(&copy));
    }

    #[test]
    fn convert_never_mutates_input(tree in node_strategy()) {
        let snapshot = tree.clone();
        let _ = convert(&tree);
        prop_assert_eq!(tree, snapshot);
    }

    #[test]
    fn output_is_trimmed(tree in node_strategy()) {
        let markdown = convert(&tree);
        prop_assert_eq!(markdown.trim(), markdown.as_str());
    }

    #[test]
    fn noise_never_reaches_output(label in "[A-Z]{6,10}") {
        let root = Node::element("div").with_children([
            Node::element("p").with_child(Node::text("kept")),
            Node::element("button").with_child(Node::text(&label)),
            Node::element_with_attrs("span", vec![("class", "cgpt-foldable-btn")])
                .with_child(Node::text(&label)),
        ]);
        let markdown = convert(&root);
        prop_assert!(!markdown.contains(&label));
        prop_assert_eq!(markdown, "kept");
    }
}

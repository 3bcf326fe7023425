//! Built-in rules for rendered chat answers.
//!
//! Block rules (headings, paragraphs, fenced code, lists) end with their own
//! newline terminators so siblings separate correctly when the parent simply
//! concatenates them. Inline rules never add trailing newlines.

use super::{Filter, Rule};
use crate::node::NodeRef;
use crate::utilities::{heading_level, language_from_class, wrap_lines, HEADING_TAGS};

/// Create all built-in rules, keyed by name
pub fn markdown_rules() -> Vec<(&'static str, Rule)> {
    vec![
        ("heading", heading_rule()),
        ("paragraph", paragraph_rule()),
        ("strong", strong_rule()),
        ("emphasis", emphasis_rule()),
        ("code", code_rule()),
        ("fenced_code_block", fenced_code_block_rule()),
        ("unordered_list", unordered_list_rule()),
        ("ordered_list", ordered_list_rule()),
        ("list_item", list_item_rule()),
        ("link", link_rule()),
        ("line_break", line_break_rule()),
    ]
}

fn heading_rule() -> Rule {
    Rule::new(Filter::tags(HEADING_TAGS), |node, content, cx| {
        let level = node.tag_name().and_then(heading_level).unwrap_or(1);
        format!("{}{} {}\n\n", cx.indent(), "#".repeat(level), content)
    })
}

fn paragraph_rule() -> Rule {
    Rule::for_tag("p", |_, content, cx| format!("{}{}\n", cx.indent(), content))
}

fn strong_rule() -> Rule {
    Rule::for_tags(&["strong", "b"], |_, content, _| wrap_lines(content, "**"))
}

fn emphasis_rule() -> Rule {
    Rule::for_tags(&["em", "i"], |_, content, _| wrap_lines(content, "*"))
}

fn code_rule() -> Rule {
    Rule::for_tag("code", |node, content, _| {
        // The enclosing <pre> already fences it
        if node.parent_tag() == Some("pre") {
            return content.to_string();
        }
        format!("`{}`", content)
    })
}

fn fenced_code_block_rule() -> Rule {
    Rule::for_tag("pre", |node, content, cx| {
        let language = node
            .as_element()
            .and_then(|pre| pre.find_descendant("code"))
            .and_then(|code| code.attr("class"))
            .and_then(language_from_class)
            .unwrap_or("");

        format!("{}```{}\n{}\n```\n\n", cx.indent(), language, content)
    })
}

fn unordered_list_rule() -> Rule {
    Rule::for_tag("ul", |node, _, cx| {
        let nested = cx.nested_indent();
        list_items(node)
            .map(|li| format!("{}- {}", cx.indent(), cx.convert(li, &nested).trim()))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

fn ordered_list_rule() -> Rule {
    Rule::for_tag("ol", |node, _, cx| {
        let nested = cx.nested_indent();
        list_items(node)
            .enumerate()
            .map(|(i, li)| format!("{}{}. {}", cx.indent(), i + 1, cx.convert(li, &nested).trim()))
            .collect::<Vec<_>>()
            .join("\n\n")
    })
}

fn list_item_rule() -> Rule {
    Rule::for_tag("li", |_, content, _| content.trim().to_string())
}

fn link_rule() -> Rule {
    Rule::for_tag("a", |node, content, _| {
        let href = node.attr("href").unwrap_or("");
        format!("[{}]({})", content, href)
    })
}

fn line_break_rule() -> Rule {
    Rule::for_tag("br", |_, _, _| "\n".to_string())
}

/// Direct `<li>` children of a list
fn list_items<'a>(list: &NodeRef<'a>) -> impl Iterator<Item = NodeRef<'a>> + 'a {
    list.child_refs().filter(|child| child.tag_name() == Some("li"))
}

#[cfg(test)]
mod tests {
    use crate::node::Node;
    use crate::MarkdownConverter;

    fn serialize(node: &Node) -> String {
        MarkdownConverter::new().serialize(node, "")
    }

    fn el(tag: &str, text: &str) -> Node {
        Node::element(tag).with_child(Node::text(text))
    }

    fn list(tag: &str, items: &[&str]) -> Node {
        Node::element(tag).with_children(items.iter().map(|item| el("li", item)))
    }

    #[test]
    fn test_headings() {
        assert_eq!(serialize(&el("h1", "Title")), "# Title\n\n");
        assert_eq!(serialize(&el("h4", "Deep")), "#### Deep\n\n");
        assert_eq!(serialize(&el("h6", "Deepest")), "###### Deepest\n\n");
    }

    #[test]
    fn test_heading_keeps_indent() {
        let converter = MarkdownConverter::new();
        assert_eq!(converter.serialize(&el("h2", "T"), "    "), "    ## T\n\n");
    }

    #[test]
    fn test_paragraph() {
        assert_eq!(serialize(&el("p", "Hello")), "Hello\n");
    }

    #[test]
    fn test_strong_and_bold() {
        assert_eq!(serialize(&el("strong", "bold")), "**bold**");
        assert_eq!(serialize(&el("b", "bold")), "**bold**");
    }

    #[test]
    fn test_strong_wraps_each_line() {
        let strong = Node::element("strong").with_children([
            Node::text("first"),
            Node::element("br"),
            Node::element("br"),
            Node::text("second"),
        ]);
        assert_eq!(serialize(&strong), "**first**\n**second**");
    }

    #[test]
    fn test_empty_emphasis_renders_nothing() {
        assert_eq!(serialize(&Node::element("em")), "");
        assert_eq!(serialize(&el("i", "   ")), "");
    }

    #[test]
    fn test_inline_code() {
        assert_eq!(serialize(&el("code", "x = 1")), "`x = 1`");
    }

    #[test]
    fn test_code_inside_pre_is_verbatim() {
        let pre = Node::element("pre").with_child(el("code", "let x = 1;"));
        assert_eq!(serialize(&pre), "```\nlet x = 1;\n```\n\n");
    }

    #[test]
    fn test_code_nested_deeper_in_pre_keeps_backticks() {
        let pre = Node::element("pre").with_child(
            Node::element("div").with_child(
                Node::element_with_attrs("code", vec![("class", "language-sh")])
                    .with_child(Node::text("ls")),
            ),
        );
        assert_eq!(serialize(&pre), "```sh\n`ls`\n```\n\n");
    }

    #[test]
    fn test_fenced_code_language() {
        let pre = Node::element("pre").with_child(
            Node::element_with_attrs("code", vec![("class", "hljs language-python")])
                .with_child(Node::text("print(1)")),
        );
        assert_eq!(serialize(&pre), "```python\nprint(1)\n```\n\n");
    }

    #[test]
    fn test_pre_without_code() {
        assert_eq!(serialize(&el("pre", "raw")), "```\nraw\n```\n\n");
    }

    #[test]
    fn test_unordered_list() {
        assert_eq!(serialize(&list("ul", &["A", "B"])), "- A\n- B");
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(serialize(&list("ol", &["A", "B", "C"])), "1. A\n\n2. B\n\n3. C");
    }

    #[test]
    fn test_list_ignores_non_item_children() {
        let ul = list("ul", &["A", "B"]).with_children([Node::text("\n  "), el("div", "stray")]);
        assert_eq!(serialize(&ul), "- A\n- B");
    }

    #[test]
    fn test_list_item_trims_content() {
        let li = Node::element("li").with_child(el("p", "Item"));
        assert_eq!(serialize(&li), "Item");
    }

    #[test]
    fn test_nested_unordered_list_in_ordered_item() {
        let ol = Node::element("ol").with_child(
            Node::element("li").with_children([el("p", "Parent"), list("ul", &["X", "Y"])]),
        );
        assert_eq!(serialize(&ol), "1. Parent\n    - X\n    - Y");
    }

    #[test]
    fn test_link() {
        let a = Node::element_with_attrs("a", vec![("href", "https://x.test")])
            .with_child(Node::text("text"));
        assert_eq!(serialize(&a), "[text](https://x.test)");
    }

    #[test]
    fn test_link_without_href() {
        assert_eq!(serialize(&el("a", "text")), "[text]()");
    }

    #[test]
    fn test_line_break_ignores_children() {
        let br = Node::element("br").with_child(Node::text("ignored"));
        assert_eq!(serialize(&br), "\n");
    }
}

//! HTML parsing support.
//!
//! This module turns HTML strings into the [`Node`] tree consumed by the
//! converter, and can narrow a full page down to the elements matching a
//! CSS selector (for instance every rendered assistant answer).

use scraper::{ElementRef, Html, Node as ScraperNode, Selector};

use crate::node::Node;
use crate::{ConvertError, Result};

/// Parse an HTML fragment into a Node tree.
///
/// The returned root is the `html` wrapper created by the parser; it has no
/// rule of its own, so it unwraps to its children's output.
///
/// # Example
///
/// ```rust
/// use copymd::{parse_html, MarkdownConverter};
///
/// let node = parse_html("<h1>Hello <em>World</em></h1>");
///
/// let converter = MarkdownConverter::new();
/// assert_eq!(converter.convert(&node), "# Hello *World*");
/// ```
pub fn parse_html(html: &str) -> Node {
    let fragment = Html::parse_fragment(html);
    scraper_to_node(fragment.root_element())
}

/// Parse a full HTML document and return one Node tree per element matching `selector`.
pub fn select_html(html: &str, selector: &str) -> Result<Vec<Node>> {
    let selector = Selector::parse(selector)
        .map_err(|err| ConvertError::InvalidSelector(format!("{selector}: {err}")))?;
    let document = Html::parse_document(html);
    Ok(document.select(&selector).map(scraper_to_node).collect())
}

/// Convert a scraper ElementRef to our Node structure
fn scraper_to_node(element: ElementRef) -> Node {
    let tag = element.value().name();
    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();
    let mut node = Node::element_with_attrs(tag, attrs);

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                node.add_child(Node::text(text));
            }
            ScraperNode::Comment(comment) => {
                node.add_child(Node::comment(comment));
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(scraper_to_node(child_element));
                }
            }
            _ => {}
        }
    }

    node
}

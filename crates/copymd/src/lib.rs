//! # copymd
//!
//! Convert rendered chat answers to Markdown.
//!
//! The input is a DOM-like [`Node`] tree of an already rendered answer (the
//! region a "copy as Markdown" button sits next to). Conversion runs in two
//! pure stages:
//!
//! 1. **Noise filter**: a deep copy of the tree is stripped of `<button>`s,
//!    previously injected controls and "ChatGPT said:" banner headings.
//! 2. **Serializer**: the copy is walked recursively and each element is
//!    rendered through a tag-indexed rule table.
//!
//! Only headings, paragraphs, emphasis, inline and fenced code, lists, links
//! and line breaks have rules; every other element contributes its children's
//! text. Text is emitted as-is, without escaping Markdown characters.
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use copymd::{convert, Node};
//!
//! let answer = Node::element("div").with_children([
//!     Node::element("h3").with_child(Node::text("ChatGPT said:")),
//!     Node::element("p").with_child(Node::text("Hello World")),
//! ]);
//!
//! assert_eq!(convert(&answer), "Hello World");
//! ```
//!
//! ## Example (HTML string)
//!
//! ```rust
//! let markdown = copymd::convert_html("<ol><li>One</li><li>Two</li></ol>");
//! assert_eq!(markdown, "1. One\n\n2. Two");
//! ```

pub mod filter;
#[cfg(feature = "html")]
pub mod html;
pub mod node;
mod rules;
mod service;
mod utilities;

use once_cell::sync::Lazy;

pub use filter::NoiseFilter;
#[cfg(feature = "html")]
pub use html::{parse_html, select_html};
pub use node::{Element, Node, NodeRef};
pub use rules::{Filter, PredicateFn, ReplacementFn, Rule, Rules};
pub use service::{Context, ConvertOptions, MarkdownConverter};
pub use utilities::*;

/// Error type for copymd operations
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

static DEFAULT_CONVERTER: Lazy<MarkdownConverter> = Lazy::new(MarkdownConverter::new);

/// Clean and serialize `root` with the default options
pub fn convert(root: &Node) -> String {
    DEFAULT_CONVERTER.convert(root)
}

/// Copy of `root` with noise removed, using the default options
pub fn clean(root: &Node) -> Node {
    DEFAULT_CONVERTER.clean(root)
}

/// Serialize `node` under `indent` with the default rules, without cleaning or trimming
pub fn serialize(node: &Node, indent: &str) -> String {
    DEFAULT_CONVERTER.serialize(node, indent)
}

/// Parse an HTML fragment and convert it with the default options
#[cfg(feature = "html")]
pub fn convert_html(html: &str) -> String {
    DEFAULT_CONVERTER.convert_html(html)
}

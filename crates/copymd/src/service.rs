//! MarkdownConverter - the main entry point for node to Markdown conversion.

use tracing::{debug, debug_span, trace};

use crate::filter::NoiseFilter;
use crate::node::{Node, NodeRef};
use crate::rules::{Filter, Rule, Rules};
use crate::utilities::{BANNER_PHRASE, BUTTON_TAG, INDENT_UNIT, MARKER_CLASSES};
use crate::{ConvertError, Result};

/// Options for MarkdownConverter
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConvertOptions {
    /// Tag of interactive controls to strip
    pub button_tag: String,

    /// Classes of previously injected controls to strip
    pub marker_classes: Vec<String>,

    /// Headings containing this phrase (case-insensitive) are dropped
    pub banner_phrase: String,

    /// Prefix added per level of list nesting
    pub indent_unit: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            button_tag: BUTTON_TAG.to_string(),
            marker_classes: MARKER_CLASSES.iter().map(|c| c.to_string()).collect(),
            banner_phrase: BANNER_PHRASE.to_string(),
            indent_unit: INDENT_UNIT.to_string(),
        }
    }
}

impl ConvertOptions {
    /// Reject options that would silently break conversion
    pub fn validate(&self) -> Result<()> {
        if self.button_tag.trim().is_empty() {
            return Err(ConvertError::InvalidOptions("button tag must not be empty".into()));
        }
        if self.marker_classes.iter().any(|c| c.trim().is_empty()) {
            return Err(ConvertError::InvalidOptions(
                "marker class names must not be empty".into(),
            ));
        }
        // An empty phrase is a substring of every heading
        if self.banner_phrase.trim().is_empty() {
            return Err(ConvertError::InvalidOptions("banner phrase must not be empty".into()));
        }
        if self.indent_unit.chars().any(|c| c != ' ') {
            return Err(ConvertError::InvalidOptions(format!(
                "indent unit must only contain spaces, got {:?}",
                self.indent_unit
            )));
        }
        Ok(())
    }
}

/// State handed to rule replacements: the current indent and a way back
/// into the converter for rules that serialize children themselves.
pub struct Context<'a> {
    converter: &'a MarkdownConverter,
    indent: &'a str,
}

impl<'a> Context<'a> {
    /// Indentation prefix of the current nesting level
    pub fn indent(&self) -> &'a str {
        self.indent
    }

    /// Indentation prefix one list level deeper
    pub fn nested_indent(&self) -> String {
        format!("{}{}", self.indent, self.converter.options.indent_unit)
    }

    pub fn options(&self) -> &'a ConvertOptions {
        &self.converter.options
    }

    /// Serialize `node` under a different indent
    pub fn convert(&self, node: NodeRef<'_>, indent: &str) -> String {
        self.converter.serialize_ref(node, indent)
    }
}

/// The main service for converting rendered answer trees to Markdown
pub struct MarkdownConverter {
    options: ConvertOptions,
    rules: Rules,
    noise: NoiseFilter,
}

impl MarkdownConverter {
    /// Create a MarkdownConverter with default options
    pub fn new() -> Self {
        Self {
            noise: NoiseFilter::default(),
            rules: Rules::new(),
            options: ConvertOptions::default(),
        }
    }

    /// Create a MarkdownConverter with custom options
    pub fn with_options(options: ConvertOptions) -> Result<Self> {
        Ok(Self {
            noise: NoiseFilter::new(&options)?,
            rules: Rules::new(),
            options,
        })
    }

    /// Clean `root` and serialize it, trimming surrounding whitespace
    pub fn convert(&self, root: &Node) -> String {
        let _span = debug_span!("convert", nodes = root.subtree_len()).entered();
        let cleaned = self.clean(root);
        let markdown = self.serialize(&cleaned, "").trim().to_string();
        debug!(bytes = markdown.len(), "converted node tree to markdown");
        markdown
    }

    /// Parse an HTML fragment and convert it
    #[cfg(feature = "html")]
    pub fn convert_html(&self, html: &str) -> String {
        self.convert(&crate::html::parse_html(html))
    }

    /// Return a copy of `root` with buttons, injected controls and banner headings removed
    pub fn clean(&self, root: &Node) -> Node {
        self.noise.clean(root)
    }

    /// Serialize a node under the given indentation prefix, without cleaning or trimming
    pub fn serialize(&self, node: &Node, indent: &str) -> String {
        self.serialize_ref(NodeRef::new(node), indent)
    }

    fn serialize_ref(&self, node: NodeRef<'_>, indent: &str) -> String {
        let element = match node.node {
            Node::Text(text) => return text.clone(),
            Node::Comment(_) => return String::new(),
            Node::Element(element) => element,
        };

        let content: String = node
            .child_refs()
            .map(|child| self.serialize_ref(child, indent))
            .collect();

        match self.rules.for_element(element, &self.options) {
            Some(rule) => {
                let cx = Context {
                    converter: self,
                    indent,
                };
                rule.replace(&node, &content, &cx)
            }
            None => {
                trace!(tag = element.tag_name(), "no rule, unwrapping");
                content
            }
        }
    }

    /// Add or replace a rule
    pub fn add_rule(&mut self, key: &str, rule: Rule) -> &mut Self {
        self.rules.add(key, rule);
        self
    }

    /// Strip elements matching the filter before serializing
    pub fn remove(&mut self, filter: Filter) -> &mut Self {
        self.noise.add(filter);
        self
    }

    /// Apply a plugin
    pub fn use_plugin<F>(&mut self, plugin: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        plugin(self);
        self
    }

    /// Get the current options
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }
}

impl Default for MarkdownConverter {
    fn default() -> Self {
        Self::new()
    }
}

//! Rule system for node to Markdown conversion.

mod markdown;
mod rule;

pub use markdown::markdown_rules;
pub use rule::{Filter, PredicateFn, ReplacementFn, Rule};

use indexmap::IndexMap;

use crate::node::Element;
use crate::service::ConvertOptions;

/// Tag-indexed collection of rules.
///
/// Rules keyed purely on tag names are looked up through the tag index;
/// predicate and class rules are checked in registration order only when
/// the tag index misses. Adding a rule under an existing key replaces it.
pub struct Rules {
    rules: IndexMap<String, Rule>,
    by_tag: IndexMap<String, usize>,
    scanned: Vec<usize>,
}

impl Rules {
    /// Create a new Rules instance with the built-in Markdown rules
    pub fn new() -> Self {
        let mut rules = Self::empty();
        for (key, rule) in markdown_rules() {
            rules.rules.insert(key.to_string(), rule);
        }
        rules.reindex();
        rules
    }

    /// Create a Rules instance without any rule; every element unwraps
    pub fn empty() -> Self {
        Self {
            rules: IndexMap::new(),
            by_tag: IndexMap::new(),
            scanned: Vec::new(),
        }
    }

    /// Add or replace a rule
    pub fn add(&mut self, key: &str, rule: Rule) {
        self.rules.insert(key.to_string(), rule);
        self.reindex();
    }

    /// Number of registered rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Find the rule for an element
    pub fn for_element(&self, element: &Element, options: &ConvertOptions) -> Option<&Rule> {
        if let Some(&idx) = self.by_tag.get(element.tag_name()) {
            return self.rules.get_index(idx).map(|(_, rule)| rule);
        }

        self.scanned
            .iter()
            .filter_map(|&idx| self.rules.get_index(idx).map(|(_, rule)| rule))
            .find(|rule| rule.filter.matches(element, options))
    }

    fn reindex(&mut self) {
        self.by_tag.clear();
        self.scanned.clear();
        for (idx, rule) in self.rules.values().enumerate() {
            match rule.filter.tag_keys() {
                Some(tags) => {
                    for tag in tags {
                        self.by_tag.insert(tag.to_string(), idx);
                    }
                }
                None => self.scanned.push(idx),
            }
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}

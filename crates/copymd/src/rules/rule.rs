//! Rule and Filter types for node conversion.

use crate::node::{Element, NodeRef};
use crate::service::{Context, ConvertOptions};

/// Type alias for replacement functions
pub type ReplacementFn = Box<dyn Fn(&NodeRef<'_>, &str, &Context<'_>) -> String + Send + Sync>;

/// Type alias for filter predicates
pub type PredicateFn = Box<dyn Fn(&str, &Element, &ConvertOptions) -> bool + Send + Sync>;

/// A filter determines which elements a rule or a removal applies to
pub enum Filter {
    /// Match a single tag name
    TagName(String),
    /// Match any of multiple tag names
    TagNames(Vec<String>),
    /// Match elements carrying any of the class names
    Class(Vec<String>),
    /// Match using a predicate function
    Predicate(PredicateFn),
}

impl Filter {
    /// Create a filter for a single tag
    pub fn tag(name: &str) -> Self {
        Filter::TagName(name.to_lowercase())
    }

    /// Create a filter for multiple tags
    pub fn tags(names: &[&str]) -> Self {
        Filter::TagNames(names.iter().map(|s| s.to_lowercase()).collect())
    }

    /// Create a filter for any of the given classes
    pub fn class<S: AsRef<str>>(names: &[S]) -> Self {
        Filter::Class(names.iter().map(|s| s.as_ref().to_string()).collect())
    }

    /// Create a filter with a predicate
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&str, &Element, &ConvertOptions) -> bool + Send + Sync + 'static,
    {
        Filter::Predicate(Box::new(f))
    }

    /// Check if this filter matches an element
    pub fn matches(&self, element: &Element, options: &ConvertOptions) -> bool {
        let tag = element.tag_name();
        match self {
            Filter::TagName(t) => tag == t,
            Filter::TagNames(tags) => tags.iter().any(|t| t == tag),
            Filter::Class(classes) => element.classes().any(|c| classes.iter().any(|x| x == c)),
            Filter::Predicate(f) => f(tag, element, options),
        }
    }

    /// Tag names this filter is keyed on, if it only looks at the tag
    pub(crate) fn tag_keys(&self) -> Option<Vec<&str>> {
        match self {
            Filter::TagName(t) => Some(vec![t.as_str()]),
            Filter::TagNames(tags) => Some(tags.iter().map(String::as_str).collect()),
            Filter::Class(_) | Filter::Predicate(_) => None,
        }
    }
}

impl std::fmt::Debug for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::TagName(t) => f.debug_tuple("TagName").field(t).finish(),
            Filter::TagNames(tags) => f.debug_tuple("TagNames").field(tags).finish(),
            Filter::Class(classes) => f.debug_tuple("Class").field(classes).finish(),
            Filter::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// A rule defines how to convert a matched element to Markdown
pub struct Rule {
    /// Filter to determine which elements this rule applies to
    pub filter: Filter,
    /// Replacement function that generates Markdown
    pub replacement: ReplacementFn,
}

impl Rule {
    /// Create a new rule
    pub fn new<F>(filter: Filter, replacement: F) -> Self
    where
        F: Fn(&NodeRef<'_>, &str, &Context<'_>) -> String + Send + Sync + 'static,
    {
        Self {
            filter,
            replacement: Box::new(replacement),
        }
    }

    /// Create a rule that matches a single tag
    pub fn for_tag<F>(tag: &str, replacement: F) -> Self
    where
        F: Fn(&NodeRef<'_>, &str, &Context<'_>) -> String + Send + Sync + 'static,
    {
        Self::new(Filter::tag(tag), replacement)
    }

    /// Create a rule that matches multiple tags
    pub fn for_tags<F>(tags: &[&str], replacement: F) -> Self
    where
        F: Fn(&NodeRef<'_>, &str, &Context<'_>) -> String + Send + Sync + 'static,
    {
        Self::new(Filter::tags(tags), replacement)
    }

    /// Apply this rule's replacement
    pub fn replace(&self, node: &NodeRef<'_>, content: &str, cx: &Context<'_>) -> String {
        (self.replacement)(node, content, cx)
    }
}

//! Noise filter: strips UI controls and banner headings from a copy of the tree.

use tracing::{debug, trace};

use crate::node::{Element, Node};
use crate::rules::Filter;
use crate::service::ConvertOptions;
use crate::utilities::is_heading;
use crate::Result;

/// Ordered list of removal filters applied to a deep copy of the input.
///
/// Each filter runs as its own pass over the whole copy, so later filters
/// see the tree as left by earlier ones (a banner heading is judged on its
/// text after any buttons inside it are gone).
#[derive(Debug)]
pub struct NoiseFilter {
    filters: Vec<Filter>,
    options: ConvertOptions,
}

impl NoiseFilter {
    /// Filters for buttons, injected controls and banner headings
    pub fn new(options: &ConvertOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::build(options.clone()))
    }

    /// A filter that removes nothing
    pub fn empty() -> Self {
        Self {
            filters: Vec::new(),
            options: ConvertOptions::default(),
        }
    }

    fn build(options: ConvertOptions) -> Self {
        Self {
            filters: vec![
                Filter::tag(&options.button_tag),
                Filter::class(options.marker_classes.as_slice()),
                banner_filter(&options.banner_phrase),
            ],
            options,
        }
    }

    /// Options the filter was built from
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Add a removal filter, applied after the existing ones
    pub fn add(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    /// Return a cleaned copy of `root`. The root itself is never removed.
    pub fn clean(&self, root: &Node) -> Node {
        let mut copy = root.clone();
        let mut removed = 0;
        for filter in &self.filters {
            if let Some(element) = copy.as_element_mut() {
                removed += remove_matching(element, filter, &self.options);
            }
        }
        debug!(removed, "stripped noise from node tree");
        copy
    }
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self::build(ConvertOptions::default())
    }
}

/// Headings whose text contains `phrase`, ignoring case
fn banner_filter(phrase: &str) -> Filter {
    let phrase = phrase.to_lowercase();
    Filter::predicate(move |tag, element, _| {
        is_heading(tag) && element.text_content().trim().to_lowercase().contains(&phrase)
    })
}

/// Remove every descendant of `parent` matched by `filter`; returns the number of subtrees removed.
fn remove_matching(parent: &mut Element, filter: &Filter, options: &ConvertOptions) -> usize {
    let mut removed = 0;
    parent.children_mut().retain(|child| match child {
        Node::Element(el) if filter.matches(el, options) => {
            trace!(tag = el.tag_name(), ?filter, "removing element");
            removed += 1;
            false
        }
        _ => true,
    });
    for child in parent.children_mut() {
        if let Node::Element(el) = child {
            removed += remove_matching(el, filter, options);
        }
    }
    removed
}

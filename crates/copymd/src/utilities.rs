//! Utility functions and constants shared by the noise filter and the rules.

use once_cell::sync::Lazy;
use regex::Regex;

/// Tag of native interactive controls stripped before conversion
pub const BUTTON_TAG: &str = "button";

/// Classes of controls previously injected next to an answer (copy, fold)
pub const MARKER_CLASSES: &[&str] = &["cgpt-copy-md-btn", "cgpt-foldable-btn"];

/// Text that marks a heading as the "ChatGPT said:" banner rather than content
pub const BANNER_PHRASE: &str = "chatgpt said";

/// One level of list nesting
pub const INDENT_UNIT: &str = "    ";

/// Heading elements, h1 through h6
pub const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

static LANGUAGE_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"language-(\w+)").unwrap());

/// Heading level for `h1`..`h6`
pub fn heading_level(tag: &str) -> Option<usize> {
    if !HEADING_TAGS.contains(&tag) {
        return None;
    }
    tag[1..].parse().ok()
}

/// Check if a tag is a heading
pub fn is_heading(tag: &str) -> bool {
    heading_level(tag).is_some()
}

/// Extract `rust` from a class attribute such as `hljs language-rust`
pub fn language_from_class(class: &str) -> Option<&str> {
    LANGUAGE_CLASS
        .captures(class)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Wrap every non-blank line in `delimiter`, dropping blank lines.
///
/// Markdown emphasis cannot span a line break, so `**a\nb**` becomes
/// `**a**\n**b**`.
pub fn wrap_lines(content: &str, delimiter: &str) -> String {
    content
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| format!("{delimiter}{line}{delimiter}"))
        .collect::<Vec<_>>()
        .join("\n")
}

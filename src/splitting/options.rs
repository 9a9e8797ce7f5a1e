//! Options accepted by [`split_text`](super::split_text)
//!
//! Callers override only what they need and take the rest from `Default`:
//!
//! ```ignore
//! let options = SplitTextOptions {
//!     delimiter: Delimiter::Sentence,
//!     custom_class: Some("line".to_string()),
//!     ..Default::default()
//! };
//! ```
//!
//! For file-based configuration see [`crate::config::Loader`].

use super::delimiter::Delimiter;
use super::MARKER_CLASS;
use once_cell::sync::Lazy;
use regex::Regex;

/// Tag used when none is given or the given one is not a valid element name
pub const DEFAULT_TAG: &str = "span";

static TAG_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9._:\-]*$").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub struct SplitTextOptions {
    pub delimiter: Delimiter,
    /// Element name for wrappers
    pub tag: String,
    /// Extra class added to every wrapper
    pub custom_class: Option<String>,
    /// Give each wrapper an id of `<custom_class>-<n>`. Needs `custom_class`.
    pub generate_index_id: bool,
    /// Add a class derived from the wrapped text (character and word delimiters)
    pub generate_value_class: bool,
    /// Flatten the root to plain text before splitting
    pub strip_html_tags: bool,
    /// Label the root with its text and hide wrappers from assistive technology
    pub aria: bool,
    /// Time the traversal and report invalid tags
    pub debug: bool,
}

impl Default for SplitTextOptions {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::Word,
            tag: DEFAULT_TAG.to_string(),
            custom_class: None,
            generate_index_id: false,
            generate_value_class: false,
            strip_html_tags: false,
            aria: true,
            debug: false,
        }
    }
}

impl SplitTextOptions {
    /// The extra class, if one is set and non-empty
    pub fn custom_class(&self) -> Option<&str> {
        self.custom_class
            .as_deref()
            .map(str::trim)
            .filter(|class| !class.is_empty())
    }

    /// The tag wrappers are created with: the configured tag lowercased, or
    /// [`DEFAULT_TAG`] when it is not a valid element name.
    pub fn effective_tag(&self) -> String {
        if is_valid_tag_name(&self.tag) {
            return self.tag.to_ascii_lowercase();
        }
        if self.debug {
            tracing::warn!(
                tag = %self.tag,
                "{}: Invalid tag supplied. Defaulting to {}.",
                MARKER_CLASS,
                DEFAULT_TAG
            );
        }
        DEFAULT_TAG.to_string()
    }
}

pub fn is_valid_tag_name(tag: &str) -> bool {
    TAG_NAME_REGEX.is_match(tag)
}

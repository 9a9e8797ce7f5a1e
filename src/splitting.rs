//! Splitting element text into wrapped units
//!
//! Entry point is [`split_text`]. Given an element and [`SplitTextOptions`], every
//! unit the delimiter finds in the element's text (characters, words, sentences or
//! custom pattern matches) ends up in its own wrapper element:
//!
//! ```text
//! <p>Hey! How are you?</p>
//!
//! <p aria-label="Hey! How are you?" class="splitted-text-element-root">
//!   <span class="splitted-text-element" aria-hidden="true">Hey!</span>
//!   <span class="splitted-text-element" aria-hidden="true">How</span> ...
//! </p>
//! ```
//!
//! Only node boundaries change: the element's flattened text stays the same (unless
//! `strip_html_tags` flattens it first). Wrappers carry [`MARKER_CLASS`], and subtrees
//! carrying it are never split again, so running twice is harmless.
//!
//! Modules, leaf first:
//!
//! - `delimiter`: selector → pattern with a full match and an optional submatch
//! - `punctuation`: `{{NN}}` placeholders guarding sentence boundaries
//! - `wrapper`: builds the element for one matched slice
//! - `traversal`: the depth-first split-and-splice pass
//! - `options`: the option record and its defaults

pub mod delimiter;
pub mod options;
pub mod punctuation;
pub mod traversal;
pub mod wrapper;

pub use delimiter::{Delimiter, DelimiterMatch, DelimiterPattern};
pub use options::{SplitTextOptions, DEFAULT_TAG};
pub use traversal::Traversal;

use crate::dom;
use markup5ever_rcdom::Handle;
use std::time::Instant;

/// Class carried by every wrapper
pub const MARKER_CLASS: &str = "splitted-text-element";

/// Class added to the element that was split
pub const ROOT_CLASS: &str = "splitted-text-element-root";

/// Split the text under `root` into wrapper elements, in place.
///
/// Returns the wrappers in document order. Never fails: an invalid tag falls back to
/// [`DEFAULT_TAG`], an invalid delimiter was already replaced by the word delimiter
/// when the options were built, and detached text is left alone.
pub fn split_text(root: &Handle, options: &SplitTextOptions) -> Vec<Handle> {
    let tag = options.effective_tag();

    // Read before anything below touches the tree
    let text = dom::text_content(root);

    let is_element = dom::element_name(root).is_some();
    if options.strip_html_tags && is_element {
        dom::set_text_content(root, &text);
    }
    if options.aria {
        dom::set_attribute(root, "aria-label", &text);
    }
    dom::add_class(root, ROOT_CLASS);

    let traversal = Traversal::new(options, tag);
    if !options.debug {
        return traversal.run(root);
    }

    let started = Instant::now();
    tracing::info!("{}: traversal started", MARKER_CLASS);
    let wrappers = traversal.run(root);
    tracing::info!(
        elapsed_us = started.elapsed().as_micros() as u64,
        wrappers = wrappers.len(),
        "{}: traversal finished",
        MARKER_CLASS
    );
    wrappers
}

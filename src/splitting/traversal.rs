//! The split-and-splice pass
//!
//! One depth-first walk over the tree. Each text node is searched for the first
//! delimiter match; the match is cut out into its own text node, that node is
//! replaced by a wrapper, and the text after the match becomes the next sibling to
//! visit. A text node therefore turns into
//!
//! ```text
//! [before match] [wrapper(match)] [after match]  ← visited next
//! ```
//!
//! and repeats until its remainder has no match.
//!
//! Children are walked with an explicit index over a list that grows while it is
//! being walked. Every visit reports how many extra siblings it spliced in ahead of
//! the cursor (one wrapper per match), and the cursor steps over them.

use super::delimiter::{Delimiter, DelimiterPattern};
use super::options::SplitTextOptions;
use super::punctuation::{decode_punctuation, encode_punctuation};
use super::wrapper::WrapperBuilder;
use super::MARKER_CLASS;
use crate::dom;
use markup5ever_rcdom::{Handle, NodeData};

/// Elements whose text is never split
pub const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "select", "textarea"];

/// State for one top-level split
pub struct Traversal<'a> {
    options: &'a SplitTextOptions,
    builder: WrapperBuilder<'a>,
    pattern: DelimiterPattern,
    /// Sequential match counter, feeds index ids
    index: usize,
    wrappers: Vec<Handle>,
    /// Set before each child; the first look at a text node encodes or decodes
    /// placeholders once
    node_beginning: bool,
}

impl<'a> Traversal<'a> {
    /// `tag` is the already-validated wrapper tag.
    pub fn new(options: &'a SplitTextOptions, tag: String) -> Self {
        Self {
            options,
            builder: WrapperBuilder::new(options, tag),
            pattern: DelimiterPattern::new(&options.delimiter),
            index: 0,
            wrappers: Vec::new(),
            node_beginning: false,
        }
    }

    /// Walk `root` and return the wrappers created, in document order
    pub fn run(mut self, root: &Handle) -> Vec<Handle> {
        self.visit(root);
        tracing::debug!(
            delimiter = %self.options.delimiter,
            pattern = self.pattern.as_str(),
            matches = self.index,
            "Traversal complete"
        );
        self.wrappers
    }

    /// Returns the number of extra siblings the caller must skip
    fn visit(&mut self, node: &Handle) -> usize {
        match &node.data {
            NodeData::Text { .. } => self.visit_text(node),
            NodeData::Element { .. } => {
                if !is_skipped(node) {
                    self.visit_children(node);
                }
                0
            }
            _ => 0,
        }
    }

    fn visit_children(&mut self, element: &Handle) {
        let mut cursor = 0;
        loop {
            let Some(child) = element.children.borrow().get(cursor).cloned() else {
                break;
            };
            self.node_beginning = true;
            cursor += 1 + self.visit(&child);
        }
    }

    fn visit_text(&mut self, node: &Handle) -> usize {
        let sentence = self.options.delimiter == Delimiter::Sentence;
        let Some(mut text) = dom::text_of(node) else {
            return 0;
        };

        if self.node_beginning {
            let transformed = if sentence {
                encode_punctuation(&text)
            } else {
                decode_punctuation(&text)
            };
            if transformed != text {
                dom::set_text(node, &transformed);
                text = transformed;
            }
            self.node_beginning = false;
        }

        let Some((position, length)) = self.locate(&text) else {
            return 0;
        };
        let Some(slice) = isolate(node, position, length) else {
            return 0;
        };

        if sentence {
            if let Some(matched) = dom::text_of(&slice) {
                dom::set_text(&slice, &decode_punctuation(&matched));
            }
        }

        let Some(parent) = dom::parent_of(&slice) else {
            return 0;
        };
        let Some(wrapper) = self.builder.build(&slice, self.index) else {
            return 0;
        };
        if !dom::replace_child(&parent, wrapper.clone(), &slice) {
            return 0;
        }

        self.wrappers.push(wrapper);
        self.index += 1;
        1
    }

    /// Byte range of the slice to wrap in `text`.
    ///
    /// A zero-width match is moved one character forward so the remainder always
    /// shrinks; at the end of the text there is nowhere to move and nothing is
    /// wrapped. A submatch narrower than the full match is located by its first
    /// occurrence inside the full match.
    fn locate(&self, text: &str) -> Option<(usize, usize)> {
        let found = self.pattern.find(text)?;

        if found.text.is_empty() {
            let next = text[found.start..].chars().next()?;
            return Some((found.start + next.len_utf8(), 0));
        }

        match found.submatch {
            Some(sub) if sub != found.text => {
                let offset = found.text.find(sub).unwrap_or(0);
                Some((found.start + offset, sub.len()))
            }
            _ => Some((found.start, found.text.len())),
        }
    }
}

/// Script-like containers and subtrees that were already split
fn is_skipped(element: &Handle) -> bool {
    let skipped_tag = dom::element_name(element).is_some_and(|name| {
        SKIPPED_ELEMENTS
            .iter()
            .any(|skipped| name.eq_ignore_ascii_case(skipped))
    });
    skipped_tag || dom::has_class(element, MARKER_CLASS)
}

/// Cut `text_node[position..position + length]` out into its own text node.
///
/// The original node keeps what precedes the slice and the remainder follows the
/// slice as a new sibling. `None` if the node is detached.
fn isolate(text_node: &Handle, position: usize, length: usize) -> Option<Handle> {
    let slice = dom::split_text(text_node, position)?;
    dom::split_text(&slice, length)?;
    Some(slice)
}

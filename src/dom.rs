//! HTML DOM access built on html5ever and markup5ever_rcdom
//!
//! The splitting pass needs a handful of structural primitives from its host tree:
//! split a text node at an offset, clone a node, replace a child. The rcdom tree
//! exposes its nodes as plain `Rc<Node>` handles with `RefCell` children, so those
//! primitives live here together with attribute/class helpers and the parse and
//! serialize entry points.
//!
//! Pipeline for callers working from a string:
//!
//!     HTML string → RcDom (html5ever) → split_text on selected handles → HTML string
//!
//! All offsets are UTF-8 byte offsets and must fall on character boundaries.

use crate::error::{Result, SplitError};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::{
    ns, parse_document, serialize, serialize::SerializeOpts, serialize::TraversalScope,
    Attribute, LocalName, ParseOpts, QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A parsed HTML document
pub struct HtmlDocument {
    dom: RcDom,
}

impl HtmlDocument {
    /// Parse a complete document or a bare fragment.
    ///
    /// Fragments are placed inside the implied `<html><body>` by the parser, so
    /// [`HtmlDocument::body`] always returns the content.
    pub fn parse(html: &str) -> Self {
        let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);
        Self { dom }
    }

    pub fn body(&self) -> Option<Handle> {
        self.elements_by_tag("body").into_iter().next()
    }

    /// Outermost elements with the given tag name, in document order.
    ///
    /// Matching elements nested inside another match are not returned, so every
    /// text node belongs to at most one of the results.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<Handle> {
        let mut found = Vec::new();
        collect_by_tag(&self.dom.document, &tag.to_ascii_lowercase(), &mut found);
        found
    }

    /// Serialize the whole document, doctype included
    pub fn to_html(&self) -> Result<String> {
        serialize_handle(&self.dom.document, TraversalScope::ChildrenOnly(None))
    }

    /// Serialize only what sits inside `<body>`
    pub fn body_html(&self) -> Result<String> {
        match self.body() {
            Some(body) => inner_html(&body),
            None => Ok(String::new()),
        }
    }
}

fn collect_by_tag(node: &Handle, tag: &str, found: &mut Vec<Handle>) {
    if element_name(node) == Some(tag) {
        found.push(node.clone());
        return;
    }
    for child in node.children.borrow().iter() {
        collect_by_tag(child, tag, found);
    }
}

/// Serialize a node including its own tag
pub fn outer_html(node: &Handle) -> Result<String> {
    serialize_handle(node, TraversalScope::IncludeNode)
}

/// Serialize a node's children
pub fn inner_html(node: &Handle) -> Result<String> {
    serialize_handle(node, TraversalScope::ChildrenOnly(None))
}

fn serialize_handle(node: &Handle, scope: TraversalScope) -> Result<String> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: scope,
        ..Default::default()
    };

    let serializable = SerializableHandle::from(node.clone());
    serialize(&mut output, &serializable, opts)
        .map_err(|e| SplitError::Serialization(e.to_string()))?;

    String::from_utf8(output)
        .map_err(|e| SplitError::Serialization(format!("UTF-8 conversion failed: {}", e)))
}

/// Create an HTML element with attributes
pub fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: StrTendril::from_slice(value),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a detached text node
pub fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(StrTendril::from_slice(text)),
        },
    })
}

/// Shallow copy of a node: same data, no parent, no children.
///
/// Only text, comment and element nodes can be cloned; anything else yields `None`.
pub fn clone_node(node: &Handle) -> Option<Handle> {
    let data = match &node.data {
        NodeData::Text { contents } => NodeData::Text {
            contents: RefCell::new(contents.borrow().clone()),
        },
        NodeData::Comment { contents } => NodeData::Comment {
            contents: contents.clone(),
        },
        NodeData::Element { name, attrs, .. } => NodeData::Element {
            name: name.clone(),
            attrs: RefCell::new(attrs.borrow().clone()),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
        _ => return None,
    };

    Some(Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data,
    }))
}

/// Lowercase local name of an element, `None` for other node kinds
pub fn element_name(node: &Handle) -> Option<&str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(&*name.local),
        _ => None,
    }
}

/// Contents of a text node
pub fn text_of(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Text { contents } => Some(contents.borrow().to_string()),
        _ => None,
    }
}

/// Overwrite the contents of a text node. No-op on other node kinds.
pub fn set_text(node: &Handle, text: &str) {
    if let NodeData::Text { contents } = &node.data {
        *contents.borrow_mut() = StrTendril::from_slice(text);
    }
}

/// Flattened text of a node and all its descendants, in document order.
///
/// Mirrors the DOM's `textContent`: comments and doctypes contribute nothing,
/// script and style contents are included.
pub fn text_content(node: &Handle) -> String {
    let mut text = String::new();
    push_text_content(node, &mut text);
    text
}

fn push_text_content(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        NodeData::Element { .. } | NodeData::Document => {
            for child in node.children.borrow().iter() {
                push_text_content(child, out);
            }
        }
        _ => {}
    }
}

/// Replace every child of `node` with a single text node
pub fn set_text_content(node: &Handle, text: &str) {
    for child in node.children.borrow_mut().drain(..) {
        child.parent.set(None);
    }
    append_child(node, create_text(text));
}

pub fn parent_of(node: &Handle) -> Option<Handle> {
    let weak = node.parent.take();
    let parent = weak.as_ref().and_then(|w| w.upgrade());
    node.parent.set(weak);
    parent
}

pub fn append_child(parent: &Handle, child: Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}

fn index_in_parent(parent: &Handle, node: &Handle) -> Option<usize> {
    parent
        .children
        .borrow()
        .iter()
        .position(|child| Rc::ptr_eq(child, node))
}

/// Split a text node in two at `offset`, like the DOM's `Text.splitText`.
///
/// The node keeps everything before `offset`; a new sibling holding the rest is
/// inserted right after it and returned. Returns `None`, leaving the tree
/// untouched, when the node is not an attached text node or `offset` is out of
/// range or not on a character boundary.
pub fn split_text(node: &Handle, offset: usize) -> Option<Handle> {
    let NodeData::Text { contents } = &node.data else {
        return None;
    };
    let parent = parent_of(node)?;
    let index = index_in_parent(&parent, node)?;

    let (head, tail) = {
        let current = contents.borrow();
        if !current.is_char_boundary(offset) {
            return None;
        }
        (
            StrTendril::from_slice(&current[..offset]),
            create_text(&current[offset..]),
        )
    };
    *contents.borrow_mut() = head;

    tail.parent.set(Some(Rc::downgrade(&parent)));
    parent.children.borrow_mut().insert(index + 1, tail.clone());
    Some(tail)
}

/// Put `new_child` where `old_child` was. The old child is detached.
///
/// Returns false when `old_child` is not a child of `parent`.
pub fn replace_child(parent: &Handle, new_child: Handle, old_child: &Handle) -> bool {
    let Some(index) = index_in_parent(parent, old_child) else {
        return false;
    };
    new_child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut()[index] = new_child;
    old_child.parent.set(None);
    true
}

pub fn get_attribute(node: &Handle, name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// Set or overwrite an attribute. Attributes keep their original position.
pub fn set_attribute(node: &Handle, name: &str, value: &str) {
    let NodeData::Element { attrs, .. } = &node.data else {
        return;
    };
    let mut attrs = attrs.borrow_mut();
    match attrs.iter_mut().find(|attr| &*attr.name.local == name) {
        Some(attr) => attr.value = StrTendril::from_slice(value),
        None => attrs.push(Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: StrTendril::from_slice(value),
        }),
    }
}

/// Whether `class` appears as a whole token in the element's class list
pub fn has_class(node: &Handle, class: &str) -> bool {
    get_attribute(node, "class")
        .map(|classes| classes.split_ascii_whitespace().any(|c| c == class))
        .unwrap_or(false)
}

/// Append `class` to the class list unless it is already present
pub fn add_class(node: &Handle, class: &str) {
    if has_class(node, class) {
        return;
    }
    let classes = match get_attribute(node, "class") {
        Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing.trim(), class),
        _ => class.to_string(),
    };
    set_attribute(node, "class", &classes);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(html: &str) -> (HtmlDocument, Handle) {
        let doc = HtmlDocument::parse(html);
        let p = doc
            .elements_by_tag("p")
            .into_iter()
            .next()
            .expect("fixture has a <p>");
        (doc, p)
    }

    #[test]
    fn test_parse_fragment_into_body() {
        let doc = HtmlDocument::parse("<p>Hello <b>there</b></p>");
        let body = doc.body().expect("body is implied");
        assert_eq!(text_content(&body), "Hello there");
        assert_eq!(doc.body_html().unwrap(), "<p>Hello <b>there</b></p>");
    }

    #[test]
    fn test_elements_by_tag_returns_outermost() {
        let doc = HtmlDocument::parse("<div>a<div>b</div></div><div>c</div>");
        let divs = doc.elements_by_tag("DIV");
        assert_eq!(divs.len(), 2);
        assert_eq!(text_content(&divs[0]), "ab");
        assert_eq!(text_content(&divs[1]), "c");
    }

    #[test]
    fn test_split_text_inserts_sibling() {
        let (_doc, p) = paragraph("<p>Hello world</p>");
        let text = p.children.borrow()[0].clone();

        let tail = split_text(&text, 5).expect("attached text node splits");

        assert_eq!(text_of(&text).unwrap(), "Hello");
        assert_eq!(text_of(&tail).unwrap(), " world");
        assert_eq!(p.children.borrow().len(), 2);
        assert!(Rc::ptr_eq(&p.children.borrow()[1], &tail));
        assert!(Rc::ptr_eq(&parent_of(&tail).unwrap(), &p));
    }

    #[test]
    fn test_split_text_at_edges() {
        let (_doc, p) = paragraph("<p>abc</p>");
        let text = p.children.borrow()[0].clone();

        let tail = split_text(&text, 0).unwrap();
        assert_eq!(text_of(&text).unwrap(), "");
        assert_eq!(text_of(&tail).unwrap(), "abc");

        let end = split_text(&tail, 3).unwrap();
        assert_eq!(text_of(&end).unwrap(), "");
        assert_eq!(text_content(&p), "abc");
    }

    #[test]
    fn test_split_text_rejects_bad_offsets() {
        let (_doc, p) = paragraph("<p>héllo</p>");
        let text = p.children.borrow()[0].clone();

        // Inside the two-byte 'é'
        assert!(split_text(&text, 2).is_none());
        assert!(split_text(&text, 100).is_none());
        assert_eq!(p.children.borrow().len(), 1);
    }

    #[test]
    fn test_split_detached_text_is_refused() {
        let text = create_text("floating");
        assert!(split_text(&text, 3).is_none());
        assert_eq!(text_of(&text).unwrap(), "floating");
    }

    #[test]
    fn test_replace_child() {
        let (_doc, p) = paragraph("<p>old</p>");
        let old = p.children.borrow()[0].clone();
        let span = create_element("span", vec![("class", "new")]);

        assert!(replace_child(&p, span.clone(), &old));
        assert!(parent_of(&old).is_none());
        assert_eq!(outer_html(&p).unwrap(), "<p><span class=\"new\"></span></p>");

        assert!(!replace_child(&p, create_text("x"), &old));
    }

    #[test]
    fn test_clone_node_is_shallow() {
        let (_doc, p) = paragraph("<p class=\"a\">text</p>");
        let copy = clone_node(&p).unwrap();
        assert_eq!(get_attribute(&copy, "class").as_deref(), Some("a"));
        assert!(copy.children.borrow().is_empty());
        assert!(parent_of(&copy).is_none());

        let text = p.children.borrow()[0].clone();
        let text_copy = clone_node(&text).unwrap();
        set_text(&text_copy, "changed");
        assert_eq!(text_of(&text).unwrap(), "text");
    }

    #[test]
    fn test_class_helpers() {
        let el = create_element("div", vec![("class", "one two")]);
        assert!(has_class(&el, "two"));
        assert!(!has_class(&el, "tw"));

        add_class(&el, "three");
        add_class(&el, "one");
        assert_eq!(get_attribute(&el, "class").as_deref(), Some("one two three"));

        let bare = create_element("div", vec![]);
        add_class(&bare, "solo");
        assert_eq!(get_attribute(&bare, "class").as_deref(), Some("solo"));
    }

    #[test]
    fn test_set_text_content_replaces_children() {
        let (_doc, p) = paragraph("<p>Hi <em>there</em> you</p>");
        let em = p.children.borrow()[1].clone();

        set_text_content(&p, "plain");

        assert_eq!(p.children.borrow().len(), 1);
        assert!(parent_of(&em).is_none());
        assert_eq!(outer_html(&p).unwrap(), "<p>plain</p>");
    }

    #[test]
    fn test_text_content_skips_comments() {
        let (_doc, p) = paragraph("<p>a<!-- hidden -->b<script>c</script></p>");
        assert_eq!(text_content(&p), "abc");
    }
}

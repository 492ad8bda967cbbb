//! In-memory document model.
//!
//! A small element tree standing in for the browser page: elements carry a
//! tag, an optional id, classes, attributes, leaf text and a display state.
//! Nodes live in an arena and are addressed by [`NodeId`]; removing children
//! only detaches them, so ids stay valid for the document's lifetime.
//!
//! Lookups (`element_by_id`, `query_class`, ...) only see nodes connected to
//! the body, in document (pre-order) order.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use askama::filters::{Escaper, Html};

/// Handle to an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// CSS `display` value set directly on an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    /// No inline display set.
    #[default]
    Unset,
    Block,
    None,
}

impl Display {
    const fn as_css(self) -> Option<&'static str> {
        match self {
            Self::Unset => None,
            Self::Block => Some("block"),
            Self::None => Some("none"),
        }
    }
}

/// Elements serialized without a closing tag.
const VOID_TAGS: &[&str] = &["img", "input", "br", "hr", "meta", "link"];

/// A single element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    text: String,
    display: Display,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// The element's own text, excluding descendants.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn display(&self) -> Display {
        self.display
    }

    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Description of an element to insert, built fluently.
///
/// ```
/// use phytomed_storefront::dom::{Document, ElementSpec};
///
/// let mut doc = Document::new();
/// let body = doc.body();
/// let button = doc.append(
///     body,
///     ElementSpec::new("button")
///         .class("add-to-cart")
///         .attr("data-id", "1")
///         .text("Add to Cart"),
/// );
/// assert_eq!(doc.query_class("add-to-cart"), Some(button));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    text: String,
}

impl ElementSpec {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

/// The page: an arena of elements rooted at `body`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Element>,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document containing only a `body` element.
    #[must_use]
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            body: NodeId(0),
        };
        doc.body = doc.create(ElementSpec::new("body"));
        doc
    }

    #[must_use]
    pub const fn body(&self) -> NodeId {
        self.body
    }

    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0)
    }

    fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(node.0)
    }

    /// Create a detached element.
    pub fn create(&mut self, spec: ElementSpec) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Element {
            tag: spec.tag,
            id: spec.id,
            classes: spec.classes,
            attrs: spec.attrs,
            text: spec.text,
            display: Display::Unset,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Create an element and append it as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, spec: ElementSpec) -> NodeId {
        let child = self.create(spec);
        self.append_child(parent, child);
        child
    }

    /// Move `child` to the end of `parent`'s children.
    ///
    /// Does nothing if either handle is unknown or if `child` is `parent` or
    /// one of its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.get(parent).is_none() || self.get(child).is_none() || self.contains(child, parent) {
            return;
        }
        self.detach(child);
        if let Some(el) = self.get_mut(child) {
            el.parent = Some(parent);
        }
        if let Some(el) = self.get_mut(parent) {
            el.children.push(child);
        }
    }

    /// Remove `node` from its parent, leaving it detached.
    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.get(node).and_then(Element::parent) else {
            return;
        };
        if let Some(el) = self.get_mut(parent) {
            el.children.retain(|c| *c != node);
        }
        if let Some(el) = self.get_mut(node) {
            el.parent = None;
        }
    }

    /// Detach every child of `node`.
    pub fn clear_children(&mut self, node: NodeId) {
        let children = match self.get_mut(node) {
            Some(el) => std::mem::take(&mut el.children),
            None => return,
        };
        for child in children {
            if let Some(el) = self.get_mut(child) {
                el.parent = None;
            }
        }
    }

    /// Replace the element's content with `text`, dropping any children.
    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        self.clear_children(node);
        if let Some(el) = self.get_mut(node) {
            el.text = text.into();
        }
    }

    /// Concatenated text of the element and all descendants, in order.
    #[must_use]
    pub fn text_content(&self, node: NodeId) -> String {
        self.descendants(node)
            .filter_map(|n| self.get(n))
            .map(Element::text)
            .collect()
    }

    #[must_use]
    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node).and_then(|el| el.attr(name))
    }

    pub fn set_attr(&mut self, node: NodeId, name: impl Into<String>, value: impl Into<String>) {
        if let Some(el) = self.get_mut(node) {
            el.attrs.insert(name.into(), value.into());
        }
    }

    /// Current value of a form control (its `value` attribute).
    #[must_use]
    pub fn value(&self, node: NodeId) -> Option<&str> {
        self.attr(node, "value")
    }

    pub fn set_value(&mut self, node: NodeId, value: impl Into<String>) {
        self.set_attr(node, "value", value);
    }

    #[must_use]
    pub fn display(&self, node: NodeId) -> Display {
        self.get(node).map_or(Display::Unset, Element::display)
    }

    pub fn set_display(&mut self, node: NodeId, display: Display) {
        if let Some(el) = self.get_mut(node) {
            el.display = display;
        }
    }

    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.get(node).is_some_and(|el| el.has_class(class))
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    #[must_use]
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.get(n).and_then(Element::parent);
        }
        false
    }

    /// Whether `node` is attached to the body.
    #[must_use]
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.contains(self.body, node)
    }

    /// `node` followed by its descendants in pre-order.
    pub fn descendants(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = if self.get(node).is_some() {
            vec![node]
        } else {
            Vec::new()
        };
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            if let Some(el) = self.get(next) {
                stack.extend(el.children.iter().rev().copied());
            }
            Some(next)
        })
    }

    /// First connected element with the given id.
    #[must_use]
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.body)
            .find(|n| self.get(*n).and_then(Element::id) == Some(id))
    }

    /// First connected element carrying `class`.
    #[must_use]
    pub fn query_class(&self, class: &str) -> Option<NodeId> {
        self.descendants(self.body)
            .find(|n| self.has_class(*n, class))
    }

    /// Every connected element carrying `class`, in document order.
    #[must_use]
    pub fn query_class_all(&self, class: &str) -> Vec<NodeId> {
        self.query_class_within(self.body, class)
    }

    /// Every element carrying `class` under `root` (inclusive), in order.
    #[must_use]
    pub fn query_class_within(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(root)
            .filter(|n| self.has_class(*n, class))
            .collect()
    }

    /// Serialize `node` and its subtree to HTML.
    #[must_use]
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let Some(el) = self.get(node) else {
            return;
        };

        out.push('<');
        out.push_str(&el.tag);
        if let Some(id) = &el.id {
            write_attr(out, "id", id);
        }
        if !el.classes.is_empty() {
            write_attr(out, "class", &el.classes.join(" "));
        }
        for (name, value) in el.attrs.iter().filter(|(name, _)| *name != "style") {
            write_attr(out, name, value);
        }
        let mut style = el.attr("style").unwrap_or_default().trim().to_string();
        if let Some(display) = el.display.as_css() {
            if !style.is_empty() {
                style.push(' ');
            }
            let _ = write!(style, "display: {display};");
        }
        if !style.is_empty() {
            write_attr(out, "style", &style);
        }
        out.push('>');

        if VOID_TAGS.contains(&el.tag.as_str()) {
            return;
        }

        push_escaped(out, &el.text);
        for child in &el.children {
            self.write_html(*child, out);
        }
        let _ = write!(out, "</{}>", el.tag);
    }
}

fn write_attr(out: &mut String, name: &str, value: &str) {
    let _ = write!(out, " {name}=\"");
    push_escaped(out, value);
    out.push('"');
}

/// Append `raw` to `out`, escaped for HTML content and double-quoted
/// attributes.
fn push_escaped(out: &mut String, raw: &str) {
    let _ = Html.write_escaped_str(&mut *out, raw);
}

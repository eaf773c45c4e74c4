//! DOM (Document Object Model) implementation
//!
//! An arena of elements. Each element carries what the host layout engine
//! already knows about it: its computed style and its box metrics.

use super::geometry::BoxMetrics;
use super::style::ComputedStyle;
use std::collections::HashMap;

/// Handle to an element inside a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// How the swapper treats an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `<img>`: the `src` attribute is swapped
    Image,
    /// Anything else: the background image is swapped
    Generic,
}

/// A declaration in the element's inline `style`
#[derive(Debug, Clone, PartialEq)]
pub struct InlineDeclaration {
    pub property: String,
    pub value: String,
    pub important: bool,
}

/// Data for element nodes
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    /// Tag name (e.g., "div", "img")
    pub tag_name: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
    /// Computed style
    pub style: ComputedStyle,
    /// Inline style declarations, in insertion order
    pub inline_style: Vec<InlineDeclaration>,
    /// Rendered box sizes
    pub metrics: BoxMetrics,
}

impl ElementData {
    /// Create a new element with user-agent default styles
    pub fn new(tag_name: impl Into<String>) -> Self {
        let tag_name = tag_name.into();
        Self {
            style: ComputedStyle::for_tag(&tag_name),
            tag_name,
            attributes: HashMap::new(),
            inline_style: Vec::new(),
            metrics: BoxMetrics::default(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Append a class token
    pub fn with_class(mut self, class: &str) -> Self {
        let classes = match self.attributes.get("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        self.attributes.insert("class".to_string(), classes);
        self
    }

    /// Set a computed style property
    pub fn with_style(mut self, property: &str, value: impl Into<String>) -> Self {
        self.style.set(property, value);
        self
    }

    pub fn with_metrics(mut self, metrics: BoxMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Get an attribute value
    pub fn get_attribute(&self, name: &str) -> Option<&String> {
        self.attributes.get(name)
    }

    /// Set an attribute value
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Get the ID attribute, ignoring empty ones
    pub fn id(&self) -> Option<&String> {
        self.attributes.get("id").filter(|id| !id.is_empty())
    }

    /// Get class names
    pub fn classes(&self) -> Vec<&str> {
        self.attributes
            .get("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().contains(&class)
    }

    /// Remove every occurrence of a class token. Returns whether anything changed.
    pub fn remove_class(&mut self, class: &str) -> bool {
        let Some(current) = self.attributes.get("class") else {
            return false;
        };
        let kept: Vec<&str> = current.split_whitespace().filter(|c| *c != class).collect();
        if kept.len() == current.split_whitespace().count() {
            return false;
        }
        let kept = kept.join(" ");
        self.attributes.insert("class".to_string(), kept);
        true
    }

    pub fn kind(&self) -> ElementKind {
        if self.tag_name.eq_ignore_ascii_case("img") {
            ElementKind::Image
        } else {
            ElementKind::Generic
        }
    }

    /// Set an inline style property, replacing any previous declaration of it.
    ///
    /// Important declarations win the cascade, so they also become the
    /// computed value.
    pub fn set_style_property(&mut self, property: &str, value: impl Into<String>, important: bool) {
        let property = property.to_ascii_lowercase();
        let value = value.into();
        if important {
            self.style.set(&property, value.clone());
        }
        self.inline_style.retain(|decl| decl.property != property);
        self.inline_style.push(InlineDeclaration {
            property,
            value,
            important,
        });
    }

    /// Look up an inline style declaration
    pub fn style_property(&self, property: &str) -> Option<&InlineDeclaration> {
        self.inline_style
            .iter()
            .find(|decl| decl.property.eq_ignore_ascii_case(property))
    }
}

#[derive(Debug, Clone)]
struct Node {
    data: ElementData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// The DOM document
///
/// Elements are never removed, so a [`NodeId`] handed out by a document stays
/// valid for that document's lifetime.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    body: NodeId,
}

impl Document {
    /// Create a new document holding `<html><body></body></html>`
    pub fn new() -> Self {
        let mut document = Self {
            nodes: vec![Node {
                data: ElementData::new("html"),
                parent: None,
                children: Vec::new(),
            }],
            body: NodeId(0),
        };
        document.body = document.append_child(NodeId(0), ElementData::new("body"));
        document
    }

    /// The `<html>` element
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Append an element as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, data: ElementData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Borrow an element.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different document.
    pub fn element(&self, id: NodeId) -> &ElementData {
        &self.nodes[id.0].data
    }

    /// Mutably borrow an element.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different document.
    pub fn element_mut(&mut self, id: NodeId) -> &mut ElementData {
        &mut self.nodes[id.0].data
    }

    pub fn get(&self, id: NodeId) -> Option<&ElementData> {
        self.nodes.get(id.0).map(|node| &node.data)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// 1-based position among the parent's element children, as used by `:nth-child`
    pub fn child_index(&self, id: NodeId) -> usize {
        self.parent(id)
            .and_then(|parent| self.children(parent).iter().position(|child| *child == id))
            .map(|index| index + 1)
            .unwrap_or(1)
    }

    /// All elements carrying `class`, in document order
    pub fn elements_with_class(&self, class: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            if self.element(id).has_class(class) {
                found.push(id);
            }
            stack.extend(self.children(id).iter().rev().copied());
        }
        found
    }

    /// Number of elements, including `<html>` and `<body>`
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

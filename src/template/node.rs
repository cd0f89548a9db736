//! Tag tree types

use std::collections::BTreeMap;

/// Whether an element was written self-closing or with a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// `<name/>`: no children permitted
    Leaf,
    /// `<name>...</name>`: may hold children, possibly none
    Container,
}

/// One child of a template or element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Tag(TagNode),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }
}

impl From<TagNode> for Node {
    fn from(tag: TagNode) -> Self {
        Node::Tag(tag)
    }
}

/// A parsed element. Built once, then only read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagNode {
    name: String,
    kind: NodeKind,
    attributes: BTreeMap<String, String>,
    children: Vec<Node>,
}

impl TagNode {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Leaf,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn container(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Container,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute; a repeated name replaces the earlier value.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Append a child. Turns a leaf into a container.
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.kind = NodeKind::Container;
        self.children.push(child.into());
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Node::Text(text.into()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// A complete parsed template: the ordered top-level nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}

impl From<TagNode> for Template {
    fn from(tag: TagNode) -> Self {
        Template::new(vec![Node::Tag(tag)])
    }
}

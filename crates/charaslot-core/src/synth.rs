//! Artifact synthesizer: builds the element trees of both output documents
//!
//! Trees are plain data; turning them into text is left to the persistence
//! layer.

use crate::roster::Segment;
use crate::title::TitleTable;
use serde::{Deserialize, Serialize};

/// Placeholder text of an unassigned id
pub const DUMMY_MARKER: &str = "dummy";

/// Hash of the parameter table's root list
pub const ROOT_LIST_HASH: &str = "db_root";

/// Node of an output tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// Named element with ordered attributes and children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Add a child element
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Add a text child
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Get an attribute value
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Child elements, skipping text
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text children
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|n| match n {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }
}

/// Title table tree: `xmsbt` holding one `entry` per title
pub fn title_tree(titles: &TitleTable) -> Element {
    titles.entries().iter().fold(Element::new("xmsbt"), |root, entry| {
        root.with_child(
            Element::new("entry")
                .with_attr("label", entry.label.as_str())
                .with_child(Element::new("title").with_text(entry.title.as_str())),
        )
    })
}

/// Roster parameter tree: `struct > list[hash=db_root]` holding the segments.
///
/// Dummy runs expand to one `hash40` placeholder per id; struct entries
/// become a `struct` element holding one `byte` per slot.
pub fn roster_tree(segments: &[Segment]) -> Element {
    let mut list = Element::new("list").with_attr("hash", ROOT_LIST_HASH);

    for segment in segments {
        match segment {
            Segment::DummyRun(run) => {
                for id in &run.ids {
                    list = list.with_child(
                        Element::new("hash40")
                            .with_attr("index", id.to_string())
                            .with_text(DUMMY_MARKER),
                    );
                }
            }
            Segment::Struct(entry) => {
                let item = entry.bytes.iter().fold(
                    Element::new("struct").with_attr("index", entry.id.to_string()),
                    |item, byte| {
                        item.with_child(
                            Element::new("byte")
                                .with_attr("hash", byte.slot.as_str())
                                .with_text(byte.value.to_string()),
                        )
                    },
                );
                list = list.with_child(item);
            }
        }
    }

    Element::new("struct").with_child(list)
}

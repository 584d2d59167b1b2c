//! Node definitions: the tagged Field/Container union and the Page root.
//!
//! Field vs Container is an explicit discriminant (`kind` tag), checked
//! exhaustively at every traversal site; node kind is never inferred
//! from incidental attribute presence.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of field types the editor supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    Text,
    PlainText,
    RichText,
    Button,
    Image,
    MediaGallery,
    Collection,
}

impl FieldType {
    pub const ALL: [FieldType; 7] = [
        FieldType::Text,
        FieldType::PlainText,
        FieldType::RichText,
        FieldType::Button,
        FieldType::Image,
        FieldType::MediaGallery,
        FieldType::Collection,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::PlainText => "plainText",
            FieldType::RichText => "richText",
            FieldType::Button => "button",
            FieldType::Image => "image",
            FieldType::MediaGallery => "mediaGallery",
            FieldType::Collection => "collection",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The root of a document. Exactly one per document; owns the order of
/// its top-level containers and is never deleted while the document
/// lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub child_order: Vec<String>,
}

impl Page {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            child_order: Vec::new(),
        }
    }
}

/// A leaf node holding typed content.
///
/// `value` is opaque per type: plain string for button labels and image
/// paths, a JSON node array for rich text, a JSON object for collection
/// display options, a JSON array for media galleries. `item_prop` binds
/// the field to a property of an externally supplied item record instead
/// of its own value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    pub page_id: String,
    pub container_id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub value: String,
    pub style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_prop: Option<String>,
    /// Client-side dirty token, never persisted. Equal counters between
    /// two renders of the same id mean "no need to redraw".
    #[serde(skip)]
    pub rerender: u64,
}

/// An internal node (a "row"): a layout grouping that owns its children's
/// display order but not their storage. `container_id` is the parent
/// container; `None` means the parent is the Page itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub id: String,
    pub page_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
    pub style: String,
    #[serde(default)]
    pub child_order: Vec<String>,
    #[serde(skip)]
    pub rerender: u64,
}

/// A node in the flat document map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Node {
    Field(Field),
    Container(Container),
}

impl Node {
    pub fn id(&self) -> &str {
        match self {
            Node::Field(f) => &f.id,
            Node::Container(c) => &c.id,
        }
    }

    /// Id of the parent container, or `None` when the parent is the Page.
    pub fn parent_container_id(&self) -> Option<&str> {
        match self {
            Node::Field(f) => Some(&f.container_id),
            Node::Container(c) => c.container_id.as_deref(),
        }
    }

    /// Child order for containers; fields are leaves.
    pub fn child_order(&self) -> Option<&[String]> {
        match self {
            Node::Field(_) => None,
            Node::Container(c) => Some(&c.child_order),
        }
    }

    pub fn rerender(&self) -> u64 {
        match self {
            Node::Field(f) => f.rerender,
            Node::Container(c) => c.rerender,
        }
    }

    pub fn style(&self) -> &str {
        match self {
            Node::Field(f) => &f.style,
            Node::Container(c) => &c.style,
        }
    }

    pub fn as_field(&self) -> Option<&Field> {
        match self {
            Node::Field(f) => Some(f),
            Node::Container(_) => None,
        }
    }

    pub fn as_container(&self) -> Option<&Container> {
        match self {
            Node::Container(c) => Some(c),
            Node::Field(_) => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Field(_) => "field",
            Node::Container(_) => "container",
        }
    }
}

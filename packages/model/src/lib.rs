//! # PageForge Model
//!
//! Data definitions for the page document tree.
//!
//! A document is a single [`Page`] plus a flat, id-indexed map of
//! [`Node`]s. Containers ("rows") own the *order* of their children
//! through `child_order`; the map owns the storage. Fields are leaves
//! holding typed, opaque serialized content.
//!
//! ```text
//! Page ── childOrder ──▶ Container ── childOrder ──▶ Field
//!                            │
//!                            └── childOrder ──▶ Container (nested row)
//! ```
//!
//! Everything here is plain data: tree maintenance and mutation live in
//! `pageforge-editor`.

mod id;
mod node;
mod payload;
mod style;

pub use id::new_node_id;
pub use node::{Container, Field, FieldType, Node, Page};
pub use payload::DocumentPayload;
pub use style::{class_name, parse_style, StyleMap};

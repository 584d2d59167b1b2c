//! # PageForge Editor
//!
//! Document tree engine for the PageForge page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host: initial payload + change persistence  │
//! └─────────────────────────────────────────────┘
//!                     ↓ ingest        ↑ records
//! ┌─────────────────────────────────────────────┐
//! │ editor: TreeStore + EditSession             │
//! │  - Flat id-indexed node map                 │
//! │  - Ordered childOrder sequences             │
//! │  - Typed mutation protocol                  │
//! │  - Ancestor rerender propagation            │
//! │  - Debounced commit of rapid edits          │
//! └─────────────────────────────────────────────┘
//!                     ↓ snapshots
//! ┌─────────────────────────────────────────────┐
//! │ view: redraw subtrees whose counters moved  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The map is the source of truth**: snapshots and records are
//!    derived views
//! 2. **Ordering lives in `childOrder`**: map iteration order is never
//!    meaningful
//! 3. **Mutations are typed and total**: unknown ids fail loudly, the
//!    tree is never left half-mutated
//! 4. **Rerender counters are precise**: one bump per ancestor per
//!    logical mutation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pageforge_editor::{EditSession, FieldUpdate, TreeStore};
//! use pageforge_model::FieldType;
//!
//! let mut store = TreeStore::from_payload(payload)?;
//! store.subscribe(|record, snapshot| persist(record, snapshot));
//!
//! let row = store.add_container("page-1", None, None)?;
//! let title = store.add_field("page-1", &row, FieldType::Text, None, None)?;
//!
//! let mut session = EditSession::new(store);
//! session.queue_field_update(&title, FieldUpdate {
//!     value: Some(new_content),
//!     style: None,
//! }, Instant::now());
//! session.poll(Instant::now());
//! ```

mod debounce;
mod errors;
mod events;
mod registry;
mod session;
mod store;

pub mod factory;

pub use debounce::{Coalescer, HOVER_TOGGLE_WINDOW, RICH_TEXT_COMMIT_WINDOW};
pub use errors::StoreError;
pub use events::{ChangeKind, ChangeRecord, ChangeTarget};
pub use registry::{EditableProperty, PropertyRegistry, PropertySection, TypeProperties};
pub use session::EditSession;
pub use store::{ContainerUpdate, DocumentSnapshot, FieldUpdate, SubscriptionId, TreeStore};

// Re-export model types for convenience
pub use pageforge_model::{
    class_name, new_node_id, parse_style, Container, DocumentPayload, Field, FieldType, Node,
    Page, StyleMap,
};

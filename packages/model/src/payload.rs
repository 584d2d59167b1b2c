//! Ingest payload: the initial document supplied once at session start.

use crate::{Container, Field, Page};
use serde::{Deserialize, Serialize};

/// The document as handed over by the host at session start. The editor
/// builds its internal map from this and thereafter treats its own state
/// as the sole source of truth; a full reset requires an explicit reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPayload {
    pub page: Page,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub containers: Vec<Container>,
}

impl DocumentPayload {
    /// An empty document for the given page id.
    pub fn empty(page_id: impl Into<String>) -> Self {
        Self {
            page: Page::new(page_id),
            fields: Vec::new(),
            containers: Vec::new(),
        }
    }
}

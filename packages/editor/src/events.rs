//! Change notification: structured records emitted on every mutation.
//!
//! Records are intended for an external persistence layer to batch and
//! save. They carry only the mutated node's changed attributes; the
//! accompanying snapshot is the authority for full state (including the
//! resulting `childOrder` of affected parents).

use pageforge_model::{Container, Field};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeTarget {
    Field,
    Container,
}

/// One structural or content change, emitted alongside the updated
/// snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    pub target: ChangeTarget,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_order: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
    /// Full purged subtree on container deletion, root included, so a
    /// persistence layer can drop descendants it would otherwise orphan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed: Option<Vec<String>>,
}

impl ChangeRecord {
    pub(crate) fn created_field(field: &Field) -> Self {
        Self {
            kind: ChangeKind::Created,
            target: ChangeTarget::Field,
            id: field.id.clone(),
            value: Some(field.value.clone()),
            style: Some(field.style.clone()),
            child_order: None,
            container_id: Some(field.container_id.clone()),
            removed: None,
        }
    }

    pub(crate) fn created_container(container: &Container) -> Self {
        Self {
            kind: ChangeKind::Created,
            target: ChangeTarget::Container,
            id: container.id.clone(),
            value: None,
            style: Some(container.style.clone()),
            child_order: Some(container.child_order.clone()),
            container_id: container.container_id.clone(),
            removed: None,
        }
    }

    pub(crate) fn updated(target: ChangeTarget, id: &str) -> Self {
        Self {
            kind: ChangeKind::Updated,
            target,
            id: id.to_string(),
            value: None,
            style: None,
            child_order: None,
            container_id: None,
            removed: None,
        }
    }

    pub(crate) fn deleted_field(id: &str) -> Self {
        Self {
            kind: ChangeKind::Deleted,
            target: ChangeTarget::Field,
            id: id.to_string(),
            value: None,
            style: None,
            child_order: None,
            container_id: None,
            removed: None,
        }
    }

    pub(crate) fn deleted_container(id: &str, removed: Vec<String>) -> Self {
        Self {
            kind: ChangeKind::Deleted,
            target: ChangeTarget::Container,
            id: id.to_string(),
            value: None,
            style: None,
            child_order: None,
            container_id: None,
            removed: Some(removed),
        }
    }
}

//! # Tree Store
//!
//! The document engine: owns the authoritative node map and the root
//! page, applies structural edits while preserving child ordering, and
//! propagates precise rerender signals up the ancestor chain.
//!
//! ## Design
//!
//! - The flat map is the authoritative store; `childOrder` sequences are
//!   the only source of ordering truth.
//! - Every mutation bumps the mutated node's `rerender` counter and each
//!   strict ancestor's exactly once, so the view layer redraws only the
//!   subtrees whose counters changed.
//! - Mutations referencing unknown ids fail with typed [`StoreError`]s;
//!   the map is left untouched on failure.
//! - Observers receive owned snapshots (value semantics). All mutations
//!   route back through the store's operations.

use crate::events::{ChangeRecord, ChangeTarget};
use crate::factory;
use crate::registry::PropertyRegistry;
use crate::StoreError;
use pageforge_model::{DocumentPayload, FieldType, Node, Page};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Shallow-merge patch for a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

/// Shallow-merge patch for a container. A supplied `child_order` must be
/// a permutation of the current one: reordering is the only structural
/// edit allowed through update (insert/delete/move have their own
/// operations).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_order: Option<Vec<String>>,
}

/// Owned, read-only view of the document published to observers.
/// Mutating a snapshot never touches the store.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSnapshot {
    pub page: Page,
    pub nodes: HashMap<String, Node>,
}

impl DocumentSnapshot {
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Current dirty token for a node; equal tokens between two snapshots
    /// mean the node does not need to redraw.
    pub fn rerender(&self, id: &str) -> Option<u64> {
        self.nodes.get(id).map(Node::rerender)
    }
}

/// Handle returned by [`TreeStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&ChangeRecord, &DocumentSnapshot)>;

/// The in-memory document tree and its mutation protocol.
pub struct TreeStore {
    page: Page,
    nodes: HashMap<String, Node>,
    registry: PropertyRegistry,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl TreeStore {
    /// An empty document rooted at the given page id.
    pub fn new(page_id: impl Into<String>) -> Self {
        Self {
            page: Page::new(page_id),
            nodes: HashMap::new(),
            registry: PropertyRegistry::new(),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Build a store from the initial host payload, validating the
    /// structural invariants up front. Rerender counters start at zero
    /// regardless of what the payload carried.
    pub fn from_payload(payload: DocumentPayload) -> Result<Self, StoreError> {
        let (page, nodes) = Self::index_payload(payload)?;
        Ok(Self {
            page,
            nodes,
            registry: PropertyRegistry::new(),
            subscribers: Vec::new(),
            next_subscription: 0,
        })
    }

    /// Explicit full reset: replace the document with a new payload,
    /// keeping subscriptions. This is the only way external state enters
    /// the store after construction.
    pub fn reload(&mut self, payload: DocumentPayload) -> Result<(), StoreError> {
        let (page, nodes) = Self::index_payload(payload)?;
        self.page = page;
        self.nodes = nodes;
        Ok(())
    }

    fn index_payload(
        payload: DocumentPayload,
    ) -> Result<(Page, HashMap<String, Node>), StoreError> {
        let mut nodes = HashMap::with_capacity(payload.fields.len() + payload.containers.len());
        for mut container in payload.containers {
            container.rerender = 0;
            if container.id == payload.page.id {
                return Err(StoreError::InvariantViolation(format!(
                    "node id {} collides with the page id",
                    container.id
                )));
            }
            if let Some(previous) = nodes.insert(container.id.clone(), Node::Container(container))
            {
                return Err(StoreError::InvariantViolation(format!(
                    "duplicate node id {}",
                    previous.id()
                )));
            }
        }
        for mut field in payload.fields {
            field.rerender = 0;
            if field.id == payload.page.id {
                return Err(StoreError::InvariantViolation(format!(
                    "node id {} collides with the page id",
                    field.id
                )));
            }
            if let Some(previous) = nodes.insert(field.id.clone(), Node::Field(field)) {
                return Err(StoreError::InvariantViolation(format!(
                    "duplicate node id {}",
                    previous.id()
                )));
            }
        }
        Self::validate_structure(&payload.page, &nodes)?;
        Ok((payload.page, nodes))
    }

    /// Full structural audit: every ordered id resolves in the map, every
    /// node is referenced by exactly one parent, and back-pointers agree
    /// with that parent. Cheap enough to run after ingest and in tests.
    pub fn check_invariants(&self) -> Result<(), StoreError> {
        Self::validate_structure(&self.page, &self.nodes)
    }

    fn validate_structure(page: &Page, nodes: &HashMap<String, Node>) -> Result<(), StoreError> {
        // child id -> parent id (None = page)
        let mut parent_of: HashMap<&str, Option<&str>> = HashMap::new();

        for child in &page.child_order {
            if parent_of.insert(child, None).is_some() {
                return Err(StoreError::InvariantViolation(format!(
                    "id {child} appears in more than one childOrder"
                )));
            }
        }
        for node in nodes.values() {
            if let Node::Container(container) = node {
                for child in &container.child_order {
                    if parent_of.insert(child, Some(&container.id)).is_some() {
                        return Err(StoreError::InvariantViolation(format!(
                            "id {child} appears in more than one childOrder"
                        )));
                    }
                }
            }
        }

        for child in parent_of.keys() {
            if !nodes.contains_key(*child) {
                return Err(StoreError::InvariantViolation(format!(
                    "childOrder references missing node {child}"
                )));
            }
        }

        for node in nodes.values() {
            match parent_of.get(node.id()) {
                None => {
                    return Err(StoreError::InvariantViolation(format!(
                        "node {} is not referenced by any childOrder",
                        node.id()
                    )));
                }
                Some(parent) => {
                    if parent.as_deref() != node.parent_container_id() {
                        return Err(StoreError::InvariantViolation(format!(
                            "node {} parent pointer disagrees with childOrder placement",
                            node.id()
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn registry(&self) -> &PropertyRegistry {
        &self.registry
    }

    /// Owned copy of the current document state.
    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            page: self.page.clone(),
            nodes: self.nodes.clone(),
        }
    }

    /// Register a change observer. Observers run synchronously after each
    /// successful mutation with the change record and the new snapshot.
    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&ChangeRecord, &DocumentSnapshot) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn notify(&mut self, record: ChangeRecord) {
        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&record, &snapshot);
        }
    }

    /// Create a field in `container_id`, appended to its order or spliced
    /// immediately before `position` when that sibling is present.
    /// Returns the new field's id.
    pub fn add_field(
        &mut self,
        page_id: &str,
        container_id: &str,
        field_type: FieldType,
        position: Option<&str>,
        item_prop: Option<String>,
    ) -> Result<String, StoreError> {
        self.check_page(page_id)?;
        match self.nodes.get(container_id) {
            Some(Node::Container(_)) => {}
            Some(Node::Field(_)) => return Err(StoreError::NotAContainer(container_id.to_string())),
            None => return Err(StoreError::ParentNotFound(container_id.to_string())),
        }

        let field = factory::create_field(page_id, container_id, field_type, item_prop);
        let id = field.id.clone();
        let record = ChangeRecord::created_field(&field);
        debug!(id = id.as_str(), ty = field_type.as_str(), container = container_id, "add field");

        self.nodes.insert(id.clone(), Node::Field(field));
        if let Some(Node::Container(parent)) = self.nodes.get_mut(container_id) {
            splice(&mut parent.child_order, id.clone(), position);
        }
        self.bump_chain_from(Some(container_id));
        self.notify(record);
        Ok(id)
    }

    /// Create a container under `parent_container_id`, or at the page
    /// root when no parent is given. Returns the new container's id.
    pub fn add_container(
        &mut self,
        page_id: &str,
        parent_container_id: Option<&str>,
        position: Option<&str>,
    ) -> Result<String, StoreError> {
        self.check_page(page_id)?;
        if let Some(parent_id) = parent_container_id {
            match self.nodes.get(parent_id) {
                Some(Node::Container(_)) => {}
                Some(Node::Field(_)) => return Err(StoreError::NotAContainer(parent_id.to_string())),
                None => return Err(StoreError::ParentNotFound(parent_id.to_string())),
            }
        }

        let container = factory::create_container(page_id, parent_container_id);
        let id = container.id.clone();
        let record = ChangeRecord::created_container(&container);
        debug!(id = id.as_str(), parent = ?parent_container_id, "add container");

        self.nodes.insert(id.clone(), Node::Container(container));
        match parent_container_id {
            Some(parent_id) => {
                if let Some(Node::Container(parent)) = self.nodes.get_mut(parent_id) {
                    splice(&mut parent.child_order, id.clone(), position);
                }
                self.bump_chain_from(Some(parent_id));
            }
            None => splice(&mut self.page.child_order, id.clone(), position),
        }
        self.notify(record);
        Ok(id)
    }

    /// Shallow-merge `update` into the field, bumping the field and every
    /// ancestor.
    pub fn update_field(&mut self, id: &str, update: FieldUpdate) -> Result<(), StoreError> {
        let field_type = match self.nodes.get(id) {
            Some(Node::Field(f)) => f.field_type,
            Some(Node::Container(_)) => return Err(StoreError::NotAField(id.to_string())),
            None => return Err(StoreError::NodeNotFound(id.to_string())),
        };
        if let Some(style) = update.style.as_deref() {
            self.registry.audit_field_style(field_type, id, style);
        }

        let mut record = ChangeRecord::updated(ChangeTarget::Field, id);
        let parent = match self.nodes.get_mut(id) {
            Some(Node::Field(field)) => {
                if let Some(value) = update.value {
                    record.value = Some(value.clone());
                    field.value = value;
                }
                if let Some(style) = update.style {
                    record.style = Some(style.clone());
                    field.style = style;
                }
                field.rerender += 1;
                field.container_id.clone()
            }
            _ => return Err(StoreError::NodeNotFound(id.to_string())),
        };
        self.bump_chain_from(Some(&parent));
        self.notify(record);
        Ok(())
    }

    /// Shallow-merge `update` into the container. A `child_order` that is
    /// not a permutation of the current children is rejected: dropping or
    /// smuggling ids through a reorder is an invariant violation, never
    /// silently repaired.
    pub fn update_container(&mut self, id: &str, update: ContainerUpdate) -> Result<(), StoreError> {
        {
            let current = match self.nodes.get(id) {
                Some(Node::Container(c)) => c,
                Some(Node::Field(_)) => return Err(StoreError::NotAContainer(id.to_string())),
                None => return Err(StoreError::NodeNotFound(id.to_string())),
            };
            if let Some(next) = update.child_order.as_deref() {
                ensure_permutation(id, &current.child_order, next)?;
            }
        }
        if let Some(style) = update.style.as_deref() {
            self.registry.audit_container_style(id, style);
        }

        let mut record = ChangeRecord::updated(ChangeTarget::Container, id);
        let parent = match self.nodes.get_mut(id) {
            Some(Node::Container(container)) => {
                if let Some(style) = update.style {
                    record.style = Some(style.clone());
                    container.style = style;
                }
                if let Some(child_order) = update.child_order {
                    record.child_order = Some(child_order.clone());
                    container.child_order = child_order;
                }
                container.rerender += 1;
                container.container_id.clone()
            }
            _ => return Err(StoreError::NodeNotFound(id.to_string())),
        };
        self.bump_chain_from(parent.as_deref());
        self.notify(record);
        Ok(())
    }

    /// Remove a field from its parent's order and purge it from the map.
    pub fn delete_field(&mut self, id: &str) -> Result<(), StoreError> {
        let parent = match self.nodes.get(id) {
            Some(Node::Field(f)) => f.container_id.clone(),
            Some(Node::Container(_)) => return Err(StoreError::NotAField(id.to_string())),
            None => return Err(StoreError::NodeNotFound(id.to_string())),
        };
        debug!(id, parent = parent.as_str(), "delete field");

        self.nodes.remove(id);
        self.remove_from_order(Some(&parent), id);
        self.bump_chain_from(Some(&parent));
        self.notify(ChangeRecord::deleted_field(id));
        Ok(())
    }

    /// Remove a container and its whole subtree. Returns the complete set
    /// of purged ids (the container itself included) so callers such as a
    /// persistence layer can act on it; the same set rides on the change
    /// record.
    pub fn delete_container(&mut self, id: &str) -> Result<Vec<String>, StoreError> {
        let parent = match self.nodes.get(id) {
            Some(Node::Container(c)) => c.container_id.clone(),
            Some(Node::Field(_)) => return Err(StoreError::NotAContainer(id.to_string())),
            None => return Err(StoreError::NodeNotFound(id.to_string())),
        };

        let removed = self.collect_subtree(id);
        debug!(id, count = removed.len(), "delete container subtree");
        for removed_id in &removed {
            self.nodes.remove(removed_id);
        }
        self.remove_from_order(parent.as_deref(), id);
        self.bump_chain_from(parent.as_deref());
        self.notify(ChangeRecord::deleted_container(id, removed.clone()));
        Ok(removed)
    }

    /// Atomically relocate a field to a new container, optionally before
    /// a sibling in the new parent's order. Both the old and new ancestor
    /// chains are bumped, shared ancestors exactly once.
    pub fn move_field(
        &mut self,
        id: &str,
        new_container_id: &str,
        position: Option<&str>,
    ) -> Result<(), StoreError> {
        let old_parent = match self.nodes.get(id) {
            Some(Node::Field(f)) => f.container_id.clone(),
            Some(Node::Container(_)) => return Err(StoreError::NotAField(id.to_string())),
            None => return Err(StoreError::NodeNotFound(id.to_string())),
        };
        match self.nodes.get(new_container_id) {
            Some(Node::Container(_)) => {}
            Some(Node::Field(_)) => {
                return Err(StoreError::NotAContainer(new_container_id.to_string()))
            }
            None => return Err(StoreError::ParentNotFound(new_container_id.to_string())),
        }

        self.remove_from_order(Some(&old_parent), id);
        if let Some(Node::Container(parent)) = self.nodes.get_mut(new_container_id) {
            splice(&mut parent.child_order, id.to_string(), position);
        }
        let mut record = ChangeRecord::updated(ChangeTarget::Field, id);
        record.container_id = Some(new_container_id.to_string());
        if let Some(Node::Field(field)) = self.nodes.get_mut(id) {
            field.container_id = new_container_id.to_string();
            field.rerender += 1;
        }
        self.bump_chains(Some(&old_parent), Some(new_container_id));
        self.notify(record);
        Ok(())
    }

    /// Atomically relocate a container (and its subtree) to a new parent,
    /// or to the page root. Rejects self-parenting and moves into the
    /// container's own subtree.
    pub fn move_container(
        &mut self,
        id: &str,
        new_parent_id: Option<&str>,
        position: Option<&str>,
    ) -> Result<(), StoreError> {
        let old_parent = match self.nodes.get(id) {
            Some(Node::Container(c)) => c.container_id.clone(),
            Some(Node::Field(_)) => return Err(StoreError::NotAContainer(id.to_string())),
            None => return Err(StoreError::NodeNotFound(id.to_string())),
        };
        if let Some(parent_id) = new_parent_id {
            match self.nodes.get(parent_id) {
                Some(Node::Container(_)) => {}
                Some(Node::Field(_)) => return Err(StoreError::NotAContainer(parent_id.to_string())),
                None => return Err(StoreError::ParentNotFound(parent_id.to_string())),
            }
            if parent_id == id || self.collect_subtree(id).iter().any(|d| d == parent_id) {
                return Err(StoreError::CycleDetected);
            }
        }

        self.remove_from_order(old_parent.as_deref(), id);
        match new_parent_id {
            Some(parent_id) => {
                if let Some(Node::Container(parent)) = self.nodes.get_mut(parent_id) {
                    splice(&mut parent.child_order, id.to_string(), position);
                }
            }
            None => splice(&mut self.page.child_order, id.to_string(), position),
        }
        let mut record = ChangeRecord::updated(ChangeTarget::Container, id);
        record.container_id = new_parent_id.map(str::to_string);
        if let Some(Node::Container(container)) = self.nodes.get_mut(id) {
            container.container_id = new_parent_id.map(str::to_string);
            container.rerender += 1;
        }
        self.bump_chains(old_parent.as_deref(), new_parent_id);
        self.notify(record);
        Ok(())
    }

    fn check_page(&self, page_id: &str) -> Result<(), StoreError> {
        if page_id == self.page.id {
            Ok(())
        } else {
            Err(StoreError::PageMismatch(page_id.to_string()))
        }
    }

    /// Walk parent links from `start` up to the page, collecting each
    /// container id once. Defensive: a dangling link or a cycle stops the
    /// walk with a warning instead of wedging the store.
    fn ancestor_chain(&self, start: Option<&str>) -> Vec<String> {
        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        let mut current = start.map(str::to_string);
        while let Some(id) = current {
            if !visited.insert(id.clone()) {
                warn!(id = id.as_str(), "cycle in ancestor chain, stopping walk");
                break;
            }
            match self.nodes.get(&id) {
                Some(Node::Container(container)) => {
                    chain.push(id);
                    current = container.container_id.clone();
                }
                Some(Node::Field(_)) => {
                    warn!(id = id.as_str(), "ancestor chain hit a field, stopping walk");
                    break;
                }
                None => {
                    warn!(id = id.as_str(), "ancestor chain references missing node");
                    break;
                }
            }
        }
        chain
    }

    /// One logical mutation below `start`: bump every ancestor exactly
    /// once.
    fn bump_chain_from(&mut self, start: Option<&str>) {
        let chain = self.ancestor_chain(start);
        self.bump_each(chain);
    }

    /// Bump the union of two ancestor chains, shared ancestors once.
    fn bump_chains(&mut self, first: Option<&str>, second: Option<&str>) {
        let mut chain = self.ancestor_chain(first);
        let seen: HashSet<String> = chain.iter().cloned().collect();
        chain.extend(
            self.ancestor_chain(second)
                .into_iter()
                .filter(|id| !seen.contains(id)),
        );
        self.bump_each(chain);
    }

    fn bump_each(&mut self, ids: Vec<String>) {
        for id in ids {
            if let Some(Node::Container(container)) = self.nodes.get_mut(&id) {
                container.rerender += 1;
            }
        }
    }

    /// Detach `id` from its parent's order (page order when `parent` is
    /// `None`). A missing parent or a stale order entry is logged, not
    /// fatal: the caller has already decided the node is going away.
    fn remove_from_order(&mut self, parent: Option<&str>, id: &str) {
        let order = match parent {
            None => &mut self.page.child_order,
            Some(parent_id) => match self.nodes.get_mut(parent_id) {
                Some(Node::Container(container)) => &mut container.child_order,
                _ => {
                    warn!(parent = parent_id, id, "parent missing while detaching node");
                    return;
                }
            },
        };
        match order.iter().position(|child| child == id) {
            Some(posn) => {
                order.remove(posn);
            }
            None => warn!(id, "node absent from its parent childOrder"),
        }
    }

    /// Depth-first collection of a subtree's ids, root included. Fields
    /// and empty containers terminate branches; stale order entries that
    /// no longer resolve are still reported (there may be state to purge
    /// elsewhere) but not recursed into.
    fn collect_subtree(&self, root: &str) -> Vec<String> {
        let mut collected = Vec::new();
        let mut stack = vec![root.to_string()];
        while let Some(id) = stack.pop() {
            match self.nodes.get(&id) {
                Some(Node::Container(container)) => {
                    stack.extend(container.child_order.iter().cloned());
                }
                Some(Node::Field(_)) => {}
                None => {
                    warn!(id = id.as_str(), "childOrder references missing node during cascade");
                }
            }
            collected.push(id);
        }
        collected
    }
}

impl std::fmt::Debug for TreeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeStore")
            .field("page", &self.page)
            .field("nodes", &self.nodes.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Splice `id` immediately before `before` in `order`, shifting the
/// sibling and everything after it right by one. A missing sibling falls
/// back to an explicit append.
fn splice(order: &mut Vec<String>, id: String, before: Option<&str>) {
    match before.and_then(|sibling| order.iter().position(|child| child == sibling)) {
        Some(posn) => order.insert(posn, id),
        None => order.push(id),
    }
}

fn ensure_permutation(id: &str, current: &[String], next: &[String]) -> Result<(), StoreError> {
    if current.len() != next.len() {
        return Err(StoreError::InvariantViolation(format!(
            "childOrder update for {id} must keep the same children ({} != {})",
            next.len(),
            current.len()
        )));
    }
    let mut seen = HashSet::new();
    for child in next {
        if !seen.insert(child.as_str()) {
            return Err(StoreError::InvariantViolation(format!(
                "childOrder update for {id} repeats child {child}"
            )));
        }
        if !current.contains(child) {
            return Err(StoreError::InvariantViolation(format!(
                "childOrder update for {id} introduces foreign child {child}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_container() -> (TreeStore, String) {
        let mut store = TreeStore::new("page-1");
        let container = store.add_container("page-1", None, None).unwrap();
        (store, container)
    }

    #[test]
    fn test_splice_before_and_fallback() {
        let mut order = vec!["a".to_string(), "s".to_string(), "b".to_string()];
        splice(&mut order, "x".to_string(), Some("s"));
        assert_eq!(order, vec!["a", "x", "s", "b"]);

        splice(&mut order, "y".to_string(), None);
        assert_eq!(order, vec!["a", "x", "s", "b", "y"]);

        // missing sibling appends explicitly
        splice(&mut order, "z".to_string(), Some("nope"));
        assert_eq!(order, vec!["a", "x", "s", "b", "y", "z"]);
    }

    #[test]
    fn test_add_field_rejects_unknown_parent() {
        let mut store = TreeStore::new("page-1");
        let err = store
            .add_field("page-1", "missing", FieldType::Text, None, None)
            .unwrap_err();
        assert_eq!(err, StoreError::ParentNotFound("missing".to_string()));
        assert_eq!(store.node_count(), 0);
    }

    #[test]
    fn test_add_field_rejects_field_parent() {
        let (mut store, container) = store_with_container();
        let field = store
            .add_field("page-1", &container, FieldType::Text, None, None)
            .unwrap();
        let err = store
            .add_field("page-1", &field, FieldType::Text, None, None)
            .unwrap_err();
        assert_eq!(err, StoreError::NotAContainer(field));
    }

    #[test]
    fn test_add_rejects_wrong_page() {
        let mut store = TreeStore::new("page-1");
        let err = store.add_container("page-2", None, None).unwrap_err();
        assert_eq!(err, StoreError::PageMismatch("page-2".to_string()));
    }

    #[test]
    fn test_update_container_reorder_validation() {
        let (mut store, container) = store_with_container();
        let f1 = store
            .add_field("page-1", &container, FieldType::Text, None, None)
            .unwrap();
        let f2 = store
            .add_field("page-1", &container, FieldType::Button, None, None)
            .unwrap();

        // valid permutation
        store
            .update_container(
                &container,
                ContainerUpdate {
                    style: None,
                    child_order: Some(vec![f2.clone(), f1.clone()]),
                },
            )
            .unwrap();
        let order = store.get(&container).unwrap().child_order().unwrap();
        assert_eq!(order, &[f2.clone(), f1.clone()][..]);

        // dropping a child is rejected
        let err = store
            .update_container(
                &container,
                ContainerUpdate {
                    style: None,
                    child_order: Some(vec![f1.clone()]),
                },
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::InvariantViolation(_)));

        // duplicating a child is rejected
        let err = store
            .update_container(
                &container,
                ContainerUpdate {
                    style: None,
                    child_order: Some(vec![f1.clone(), f1.clone()]),
                },
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::InvariantViolation(_)));
        store.check_invariants().unwrap();
    }

    #[test]
    fn test_delete_field_purges_map_entry() {
        let (mut store, container) = store_with_container();
        let field = store
            .add_field("page-1", &container, FieldType::Image, None, None)
            .unwrap();
        assert!(store.contains(&field));

        store.delete_field(&field).unwrap();
        assert!(!store.contains(&field));
        assert!(store
            .get(&container)
            .unwrap()
            .child_order()
            .unwrap()
            .is_empty());
        store.check_invariants().unwrap();
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut store = TreeStore::new("page-1");
        let seen = Rc::new(RefCell::new(0usize));
        let seen_inner = Rc::clone(&seen);
        let sub = store.subscribe(move |_, _| {
            *seen_inner.borrow_mut() += 1;
        });

        store.add_container("page-1", None, None).unwrap();
        assert_eq!(*seen.borrow(), 1);

        assert!(store.unsubscribe(sub));
        store.add_container("page-1", None, None).unwrap();
        assert_eq!(*seen.borrow(), 1);
        assert!(!store.unsubscribe(sub));
    }

    #[test]
    fn test_move_field_between_containers() {
        let mut store = TreeStore::new("page-1");
        let c1 = store.add_container("page-1", None, None).unwrap();
        let c2 = store.add_container("page-1", None, None).unwrap();
        let field = store
            .add_field("page-1", &c1, FieldType::Text, None, None)
            .unwrap();

        store.move_field(&field, &c2, None).unwrap();

        assert!(store.get(&c1).unwrap().child_order().unwrap().is_empty());
        assert_eq!(
            store.get(&c2).unwrap().child_order().unwrap(),
            &[field.clone()][..]
        );
        assert_eq!(
            store.get(&field).unwrap().parent_container_id(),
            Some(c2.as_str())
        );
        store.check_invariants().unwrap();
    }

    #[test]
    fn test_move_container_rejects_cycles() {
        let mut store = TreeStore::new("page-1");
        let outer = store.add_container("page-1", None, None).unwrap();
        let inner = store.add_container("page-1", Some(&outer), None).unwrap();

        assert_eq!(
            store.move_container(&outer, Some(&inner), None),
            Err(StoreError::CycleDetected)
        );
        assert_eq!(
            store.move_container(&outer, Some(&outer), None),
            Err(StoreError::CycleDetected)
        );
        store.check_invariants().unwrap();
    }

    #[test]
    fn test_move_container_to_page_root() {
        let mut store = TreeStore::new("page-1");
        let outer = store.add_container("page-1", None, None).unwrap();
        let inner = store.add_container("page-1", Some(&outer), None).unwrap();

        store.move_container(&inner, None, Some(&outer)).unwrap();

        assert_eq!(store.page().child_order, vec![inner.clone(), outer.clone()]);
        assert_eq!(store.get(&inner).unwrap().parent_container_id(), None);
        store.check_invariants().unwrap();
    }
}

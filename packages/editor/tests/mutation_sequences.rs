//! Tests for chained mutation sequences
//!
//! This tests:
//! - Build-up / reorder / move / tear-down chains
//! - Rerender accounting across whole sequences
//! - Tree integrity after every step

use pageforge_editor::{ContainerUpdate, FieldType, FieldUpdate, StoreError, TreeStore};

#[test]
fn test_build_reorder_move_delete_chain() {
    let mut store = TreeStore::new("page-1");

    // build two rows with content
    let hero = store.add_container("page-1", None, None).unwrap();
    let footer = store.add_container("page-1", None, None).unwrap();
    let title = store
        .add_field("page-1", &hero, FieldType::Text, None, None)
        .unwrap();
    let cta = store
        .add_field("page-1", &hero, FieldType::Button, None, None)
        .unwrap();
    let legal = store
        .add_field("page-1", &footer, FieldType::PlainText, None, None)
        .unwrap();
    store.check_invariants().unwrap();

    // swap the rows at page level via move-to-root splicing
    store.move_container(&footer, None, Some(&hero)).unwrap();
    assert_eq!(store.page().child_order, vec![footer.clone(), hero.clone()]);

    // reorder the hero's children
    store
        .update_container(
            &hero,
            ContainerUpdate {
                style: None,
                child_order: Some(vec![cta.clone(), title.clone()]),
            },
        )
        .unwrap();

    // pull the call-to-action down into the footer
    store.move_field(&cta, &footer, Some(&legal)).unwrap();
    assert_eq!(
        store.get(&footer).unwrap().child_order().unwrap(),
        &[cta.clone(), legal.clone()][..]
    );
    assert_eq!(
        store.get(&hero).unwrap().child_order().unwrap(),
        &[title.clone()][..]
    );

    // tear down the footer with everything in it
    let removed = store.delete_container(&footer).unwrap();
    assert_eq!(removed.len(), 3);
    for id in [&footer, &cta, &legal] {
        assert!(removed.contains(id));
        assert!(!store.contains(id));
    }
    assert_eq!(store.page().child_order, vec![hero.clone()]);
    store.check_invariants().unwrap();
}

#[test]
fn test_deeply_nested_cascade_delete() {
    let mut store = TreeStore::new("page-1");

    let mut parent: Option<String> = None;
    let mut containers = Vec::new();
    for _ in 0..5 {
        let id = store
            .add_container("page-1", parent.as_deref(), None)
            .unwrap();
        store
            .add_field("page-1", &id, FieldType::PlainText, None, None)
            .unwrap();
        parent = Some(id.clone());
        containers.push(id);
    }
    assert_eq!(store.node_count(), 10);

    // deleting the second level takes the remaining eight nodes with it
    let removed = store.delete_container(&containers[1]).unwrap();
    assert_eq!(removed.len(), 8);
    assert_eq!(store.node_count(), 2);
    store.check_invariants().unwrap();

    // the chain above the cut survives
    assert!(store.contains(&containers[0]));
}

#[test]
fn test_rerender_totals_across_sequence() {
    let mut store = TreeStore::new("page-1");
    let outer = store.add_container("page-1", None, None).unwrap();
    let inner = store.add_container("page-1", Some(&outer), None).unwrap();
    let field = store
        .add_field("page-1", &inner, FieldType::RichText, None, None)
        .unwrap();

    // outer: inner's insert + field's insert. inner: field's insert.
    assert_eq!(store.get(&outer).unwrap().rerender(), 2);
    assert_eq!(store.get(&inner).unwrap().rerender(), 1);
    assert_eq!(store.get(&field).unwrap().rerender(), 0);

    for i in 0..3 {
        store
            .update_field(
                &field,
                FieldUpdate {
                    value: Some(format!("rev {i}")),
                    style: None,
                },
            )
            .unwrap();
    }

    assert_eq!(store.get(&field).unwrap().rerender(), 3);
    assert_eq!(store.get(&inner).unwrap().rerender(), 4);
    assert_eq!(store.get(&outer).unwrap().rerender(), 5);
}

#[test]
fn test_delete_then_reference_fails_cleanly() {
    let mut store = TreeStore::new("page-1");
    let row = store.add_container("page-1", None, None).unwrap();
    let field = store
        .add_field("page-1", &row, FieldType::Text, None, None)
        .unwrap();

    store.delete_container(&row).unwrap();

    // every follow-up against the purged subtree is a typed failure
    assert_eq!(
        store.update_field(
            &field,
            FieldUpdate {
                value: Some("late".to_string()),
                style: None
            }
        ),
        Err(StoreError::NodeNotFound(field.clone()))
    );
    assert_eq!(
        store.delete_field(&field),
        Err(StoreError::NodeNotFound(field.clone()))
    );
    assert_eq!(
        store.add_field("page-1", &row, FieldType::Text, None, None),
        Err(StoreError::ParentNotFound(row.clone()))
    );
    store.check_invariants().unwrap();
}

#[test]
fn test_interleaved_edits_keep_sibling_counters_independent() {
    let mut store = TreeStore::new("page-1");
    let left = store.add_container("page-1", None, None).unwrap();
    let right = store.add_container("page-1", None, None).unwrap();
    let left_field = store
        .add_field("page-1", &left, FieldType::Text, None, None)
        .unwrap();
    store
        .add_field("page-1", &right, FieldType::Text, None, None)
        .unwrap();

    let right_before = store.get(&right).unwrap().rerender();
    for _ in 0..4 {
        store
            .update_field(
                &left_field,
                FieldUpdate {
                    value: Some("busy".to_string()),
                    style: None,
                },
            )
            .unwrap();
    }

    // edits under one row never disturb the other
    assert_eq!(store.get(&right).unwrap().rerender(), right_before);
    assert_eq!(store.get(&left).unwrap().rerender(), 1 + 4);
}

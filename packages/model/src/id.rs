use uuid::Uuid;

/// Generate a globally unique node id.
///
/// Ids are random (UUID v4) rendered without hyphens. Uniqueness holds
/// across the whole document, not just within a sibling group, so ids can
/// be used as map keys and stable render keys without qualification.
pub fn new_node_id() -> String {
    Uuid::new_v4().simple().to_string()
}

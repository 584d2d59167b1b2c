//! Style string handling.
//!
//! A node's `style` is a serialized flat map of CSS-like property names
//! to string values. `width`/`height` carry size-bucket tokens
//! (`s`/`m`/`l`/`xl`) rather than raw CSS lengths. The engine does not
//! interpret styles beyond registry validation and the class-name
//! bucketing below; everything else is pass-through for the view layer.

use std::collections::BTreeMap;
use tracing::warn;

pub type StyleMap = BTreeMap<String, String>;

/// Parse a style string into a flat property map.
///
/// Malformed input recovers to an empty map with a logged warning: a bad
/// style on one node must never abort a render or an unrelated mutation.
pub fn parse_style(style: &str) -> StyleMap {
    if style.trim().is_empty() {
        return StyleMap::new();
    }
    match serde_json::from_str::<StyleMap>(style) {
        Ok(map) => map,
        Err(err) => {
            warn!(%err, style, "malformed style string, falling back to empty");
            StyleMap::new()
        }
    }
}

/// Compute the bucketed class tokens for a node's style.
///
/// `nested` is true when the node's parent is a container rather than the
/// Page: top-level rows get `toprow-height-*` tokens and ignore width
/// buckets (they always span the page).
pub fn class_name(style: &str, nested: bool) -> String {
    let map = parse_style(style);
    let mut tokens: Vec<String> = Vec::new();
    if nested {
        if let Some(width) = map.get("width") {
            tokens.push(format!("width-{width}"));
        }
    }
    if let Some(height) = map.get("height") {
        if nested {
            tokens.push(format!("height-{height}"));
        } else {
            tokens.push(format!("toprow-height-{height}"));
        }
    }
    if let Some(color) = map.get("color") {
        tokens.push(format!("tc-{color}-color"));
    }
    if let Some(background) = map.get("background-color") {
        tokens.push(format!("tc-{background}-background-color"));
    }
    tokens.join(" ")
}

//! Node factories: pure constructors with generated ids and per-type
//! defaults.
//!
//! Default `style` strings use the flat JSON style format with
//! size-bucket tokens; default `value` strings follow each type's opaque
//! content format (placeholder rich-text document, button label,
//! collection display options).

use pageforge_model::{new_node_id, Container, Field, FieldType};

const RICH_TEXT_PLACEHOLDER: &str = r#"[{"type": "paragraph","children":[{ "text": "Text" }]}]"#;

const TEXT_STYLE: &str = r#"{"width": "s", "height":"m", "margin-vertical":"8px"}"#;
const BUTTON_STYLE: &str = r#"{"width":"s", "height":"m", "display":"flex","align-items":"center","justify-content":"center", "font-size":"28px","font-weight":"300", "padding": "4px 8px","border-radius":"4px"}"#;
const IMAGE_STYLE: &str = r#"{"width":"m", "height":"m", "display":"flex","align-items":"center","justify-content":"center"}"#;
const MEDIA_GALLERY_STYLE: &str = r#"{"width":"xl", "height":"m", "display":"flex","align-items":"center","justify-content":"center"}"#;
const COLLECTION_STYLE: &str = r#"{"width":"xl", "height":"l"}"#;
const COLLECTION_OPTIONS: &str =
    r#"{"search":"basic","sort":"basic", "template":"List","load":"scroll","width":"xl"}"#;

const ROW_STYLE: &str = r#"{
  "display":"flex",
  "align-items":"center",
  "justify-content":"center",
  "flex-wrap":"wrap",
  "padding": "16px 32px",
  "min-height": "320px",
  "min-width":"120px",
  "width": "100%"
}"#;
const NESTED_ROW_STYLE: &str = r#"{
  "display":"flex",
  "align-items":"center",
  "justify-content":"center",
  "flex-wrap":"wrap",
  "padding": "8px 16px",
  "width": "m",
  "min-height": "280px",
  "margin": "0 1%"
}"#;

/// Build a new field of the given type with a fresh id and type-specific
/// default content and style.
pub fn create_field(
    page_id: &str,
    container_id: &str,
    field_type: FieldType,
    item_prop: Option<String>,
) -> Field {
    let (value, style) = match field_type {
        FieldType::Text | FieldType::RichText => (RICH_TEXT_PLACEHOLDER, TEXT_STYLE),
        FieldType::PlainText => ("", TEXT_STYLE),
        FieldType::Button => ("Button", BUTTON_STYLE),
        FieldType::Image => ("", IMAGE_STYLE),
        FieldType::MediaGallery => ("", MEDIA_GALLERY_STYLE),
        FieldType::Collection => (COLLECTION_OPTIONS, COLLECTION_STYLE),
    };

    Field {
        id: new_node_id(),
        page_id: page_id.to_string(),
        container_id: container_id.to_string(),
        field_type,
        value: value.to_string(),
        style: style.to_string(),
        item_prop,
        rerender: 0,
    }
}

/// Build a new container with a fresh id. A parent id selects nested-row
/// defaults (narrower, for rows placed inside another row); no parent
/// means a top-level row spanning the page.
pub fn create_container(page_id: &str, parent_container_id: Option<&str>) -> Container {
    let style = if parent_container_id.is_some() {
        NESTED_ROW_STYLE
    } else {
        ROW_STYLE
    };

    Container {
        id: new_node_id(),
        page_id: page_id.to_string(),
        container_id: parent_container_id.map(str::to_string),
        style: style.to_string(),
        child_order: Vec::new(),
        rerender: 0,
    }
}

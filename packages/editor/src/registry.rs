//! Editable-property registry.
//!
//! A static, declarative table mapping each field type (plus containers,
//! "rows") to the style properties its panel exposes, grouped into
//! ordered UI sections with labels and tooltips. Built once at startup by
//! folding flat per-type property lists through the lookup tables below;
//! read-only afterwards. Changing the supported set for a type is a
//! build-time change, not a runtime operation.
//!
//! The store uses the registry to soft-check style keys on updates; the
//! (out-of-scope) style panels use it to decide which controls to render.

use pageforge_model::{parse_style, FieldType};
use tracing::warn;

/// One editable style property as shown in a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditableProperty {
    pub key: &'static str,
    pub label: &'static str,
    pub tooltip: Option<&'static str>,
}

/// An ordered group of properties under one section heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySection {
    pub label: &'static str,
    pub properties: Vec<EditableProperty>,
}

/// All editable properties for one node type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeProperties {
    pub label: &'static str,
    pub sections: Vec<PropertySection>,
}

const PROPERTY_LABELS: &[(&str, &str)] = &[
    ("align-items", "Alignment"),
    ("background-color", "Background Color"),
    ("background-image", "Background Image"),
    ("background-opacity", "Transparency"),
    ("border", "Border"),
    ("border-radius", "Rounding"),
    ("buttonSize", "Size"),
    ("color", "Text Color"),
    ("flex-direction", "Direction"),
    ("font-size", "Text Size"),
    ("font-weight", "Text Weight"),
    ("height", "Height"),
    ("hoverBackground", "Background hover"),
    ("hoverColor", "Color hover"),
    ("line-height", "Vertical Position"),
    ("justify-content", "Spacing"),
    ("margin", "Margin"),
    ("margin-horizontal", "Gap Horizontal"),
    ("margin-vertical", "Gap Vertical"),
    ("padding", "Padding"),
    ("pageLink", "Page Link"),
    ("text-align", "Horizontal Position"),
    ("width", "Width"),
];

const PROPERTY_TOOLTIPS: &[(&str, &str)] = &[
    ("align-items", "Alignment of items"),
    ("background-image", "Set background content"),
    ("background-opacity", "Transparency of elements background"),
    ("border-radius", "Rounding of the elements corners."),
    ("flex-direction", "Direction elements are laid out in"),
    ("font-weight", "Boldness of text"),
    ("height", "Height of element"),
    ("justify-content", "Spacing between elements in this row"),
    (
        "hoverBackground",
        "Color of element background when user hovers mouse over it",
    ),
    ("hoverColor", "Color of text when user hovers mouse over it"),
    (
        "margin-horizontal",
        "Horizontal space between this element and the next one",
    ),
    (
        "margin-vertical",
        "Vertical space between this element and the next one",
    ),
    ("padding", "Spread of this elements background"),
    (
        "pageLink",
        "Set the page or address that clicking this button will link to.",
    ),
    ("width", "Width of element"),
];

/// Property key -> UI section id.
const PROPERTY_SECTIONS: &[(&str, &str)] = &[
    ("background-color", "background"),
    ("background-image", "background"),
    ("background-opacity", "background"),
    ("border", "background"),
    ("border-radius", "background"),
    ("buttonSize", "size"),
    ("color", "font"),
    ("font-size", "font"),
    ("font-weight", "font"),
    ("line-height", "font"),
    ("align-items", "layout"),
    ("flex-direction", "layout"),
    ("justify-content", "layout"),
    ("height", "size"),
    ("margin", "size"),
    ("margin-vertical", "size"),
    ("margin-horizontal", "size"),
    ("padding", "size"),
    ("width", "size"),
    ("hoverBackground", "interaction"),
    ("hoverColor", "interaction"),
    ("pageLink", "interaction"),
];

const SECTION_LABELS: &[(&str, &str)] = &[
    ("background", "Background"),
    ("font", "Text"),
    ("layout", "Content Layout"),
    ("interaction", "Interaction"),
    ("size", "Sizing"),
];

/// Structural keys the factories emit that no panel edits; accepted for
/// every type without a warning.
const BASE_STYLE_KEYS: &[&str] = &[
    "display",
    "flex-wrap",
    "min-height",
    "min-width",
    "margin",
    "align-items",
    "justify-content",
];

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, value)| *value)
}

/// Fold a flat property list into ordered sections, preserving the order
/// sections first appear in.
fn group_properties(label: &'static str, keys: &[&'static str]) -> TypeProperties {
    let mut sections: Vec<(&'static str, PropertySection)> = Vec::new();
    for &key in keys {
        let section_id = lookup(PROPERTY_SECTIONS, key).unwrap_or("size");
        let property = EditableProperty {
            key,
            label: lookup(PROPERTY_LABELS, key).unwrap_or(key),
            tooltip: lookup(PROPERTY_TOOLTIPS, key),
        };
        match sections.iter_mut().find(|(id, _)| *id == section_id) {
            Some((_, section)) => section.properties.push(property),
            None => sections.push((
                section_id,
                PropertySection {
                    label: lookup(SECTION_LABELS, section_id).unwrap_or(section_id),
                    properties: vec![property],
                },
            )),
        }
    }
    TypeProperties {
        label,
        sections: sections.into_iter().map(|(_, section)| section).collect(),
    }
}

/// Per-type editable property tables, built once at startup.
#[derive(Debug, Clone)]
pub struct PropertyRegistry {
    text: TypeProperties,
    plain_text: TypeProperties,
    rich_text: TypeProperties,
    button: TypeProperties,
    image: TypeProperties,
    media_gallery: TypeProperties,
    collection: TypeProperties,
    container: TypeProperties,
}

impl PropertyRegistry {
    pub fn new() -> Self {
        Self {
            text: group_properties(
                "Text",
                &[
                    "background-color",
                    "background-image",
                    "background-opacity",
                    "height",
                    "width",
                    "margin-horizontal",
                    "margin-vertical",
                    "padding",
                ],
            ),
            plain_text: group_properties(
                "PlainText",
                &[
                    "align-items",
                    "justify-content",
                    "background-color",
                    "background-opacity",
                    "border-radius",
                    "color",
                    "font-size",
                    "font-weight",
                    "margin-vertical",
                    "margin-horizontal",
                    "padding",
                    "width",
                ],
            ),
            rich_text: group_properties(
                "RichText",
                &[
                    "background-color",
                    "margin-vertical",
                    "margin-horizontal",
                    "padding",
                    "width",
                ],
            ),
            button: group_properties(
                "Button",
                &[
                    "background-color",
                    "background-opacity",
                    "border-radius",
                    "buttonSize",
                    "color",
                    "font-size",
                    "font-weight",
                    "hoverBackground",
                    "hoverColor",
                    "margin-vertical",
                    "margin-horizontal",
                    "padding",
                    "pageLink",
                ],
            ),
            image: group_properties(
                "Image",
                &[
                    "height",
                    "width",
                    "margin-vertical",
                    "margin-horizontal",
                    "padding",
                    "border",
                    "border-radius",
                ],
            ),
            media_gallery: group_properties(
                "MediaGallery",
                &[
                    "width",
                    "height",
                    "margin-vertical",
                    "margin-horizontal",
                    "padding",
                ],
            ),
            collection: group_properties(
                "Collection",
                &[
                    "border",
                    "border-radius",
                    "height",
                    "margin",
                    "padding",
                    "width",
                ],
            ),
            container: group_properties(
                "Row",
                &[
                    "align-items",
                    "flex-direction",
                    "justify-content",
                    "background-color",
                    "border-radius",
                    "height",
                    "width",
                    "margin-vertical",
                    "margin-horizontal",
                    "background-opacity",
                    "padding",
                ],
            ),
        }
    }

    pub fn field_properties(&self, field_type: FieldType) -> &TypeProperties {
        match field_type {
            FieldType::Text => &self.text,
            FieldType::PlainText => &self.plain_text,
            FieldType::RichText => &self.rich_text,
            FieldType::Button => &self.button,
            FieldType::Image => &self.image,
            FieldType::MediaGallery => &self.media_gallery,
            FieldType::Collection => &self.collection,
        }
    }

    pub fn container_properties(&self) -> &TypeProperties {
        &self.container
    }

    pub fn is_editable_field_property(&self, field_type: FieldType, key: &str) -> bool {
        Self::contains_key(self.field_properties(field_type), key)
    }

    pub fn is_editable_container_property(&self, key: &str) -> bool {
        Self::contains_key(&self.container, key)
    }

    fn contains_key(properties: &TypeProperties, key: &str) -> bool {
        properties
            .sections
            .iter()
            .any(|section| section.properties.iter().any(|p| p.key == key))
    }

    /// Soft-check an incoming field style against the registry: unknown
    /// keys are logged, never rejected; the store passes styles through.
    pub(crate) fn audit_field_style(&self, field_type: FieldType, node_id: &str, style: &str) {
        for key in parse_style(style).keys() {
            if !self.is_editable_field_property(field_type, key)
                && !BASE_STYLE_KEYS.contains(&key.as_str())
            {
                warn!(
                    node = node_id,
                    key = key.as_str(),
                    ty = field_type.as_str(),
                    "style key is not editable for this field type"
                );
            }
        }
    }

    pub(crate) fn audit_container_style(&self, node_id: &str, style: &str) {
        for key in parse_style(style).keys() {
            if !self.is_editable_container_property(key) && !BASE_STYLE_KEYS.contains(&key.as_str())
            {
                warn!(
                    node = node_id,
                    key = key.as_str(),
                    "style key is not editable for rows"
                );
            }
        }
    }
}

impl Default for PropertyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

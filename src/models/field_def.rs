// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Field definitions loaded from the panel's field feed (a JSON array).
//! Parsing is kept pure so it can be reused by the command worker and tests.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::models::condition::FieldId;

/// Field types the panel knows how to render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Enum,
    Text,
    Number,
    Date,
    Unknown(String),
}

impl FieldKind {
    /// Map a feed `type` token to a kind; unknown tokens are kept verbatim.
    fn from_token(raw: &str) -> Self {
        match raw {
            "enum" => Self::Enum,
            "text" => Self::Text,
            "number" => Self::Number,
            "date" => Self::Date,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Enum => "enum",
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Unknown(raw) => raw.as_str(),
        }
    }
}

/// One selectable choice of an enum field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumItem {
    pub value: String,
    pub text: String,
}

/// Descriptor of one filterable field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDef {
    pub field: FieldId,
    pub title: String,
    pub kind: FieldKind,
    pub items: Vec<EnumItem>,
    /// Only meaningful for enum fields; always false for other kinds.
    pub is_multi: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldDefRaw {
    field: String,
    #[serde(default)]
    title: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    items: Vec<EnumItemRaw>,
    #[serde(default)]
    is_multi: bool,
}

#[derive(Debug, Deserialize)]
struct EnumItemRaw {
    #[serde(default)]
    text: Option<Value>,
    #[serde(default)]
    value: Option<Value>,
}

/// Parse field descriptors from the feed JSON.
///
/// Item `text`/`value` may be strings, numbers or booleans and are normalized to strings.
/// An item missing one of the two falls back to the other. Field identifiers are trusted
/// to be unique.
///
/// # Errors
///
/// Returns an error when the input is not a JSON array of field descriptors.
///
/// # Examples
///
/// ```
/// use querypanel::models::field_def::{FieldKind, parse_field_definitions};
///
/// let json = r#"[{"field":"name","title":"Name","type":"text"}]"#;
/// let defs = parse_field_definitions(json).unwrap();
/// assert_eq!(defs[0].kind, FieldKind::Text);
/// ```
pub fn parse_field_definitions(json: &str) -> Result<Vec<FieldDef>> {
    let raw: Vec<FieldDefRaw> =
        serde_json::from_str(json).context("Failed to parse field definitions JSON")?;

    Ok(raw
        .into_iter()
        .map(|def| {
            let kind = FieldKind::from_token(def.kind.trim());
            let items = def
                .items
                .iter()
                .filter_map(|item| {
                    let value = value_to_string(item.value.as_ref());
                    let text = value_to_string(item.text.as_ref());
                    match (value, text) {
                        (Some(value), Some(text)) => Some(EnumItem { value, text }),
                        (Some(value), None) => Some(EnumItem {
                            text: value.clone(),
                            value,
                        }),
                        (None, Some(text)) => Some(EnumItem {
                            value: text.clone(),
                            text,
                        }),
                        (None, None) => None,
                    }
                })
                .collect();
            let is_multi = def.is_multi && kind == FieldKind::Enum;
            let title = if def.title.trim().is_empty() {
                def.field.clone()
            } else {
                def.title
            };

            FieldDef {
                field: FieldId::from(def.field),
                title,
                kind,
                items,
                is_multi,
            }
        })
        .collect())
}

/// Read and parse a field-definition file.
///
/// # Errors
///
/// Returns an error when the file cannot be read or does not hold valid definitions.
pub fn load_field_definitions(path: &Path) -> Result<Vec<FieldDef>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read field definitions: {}", path.display()))?;
    parse_field_definitions(&content)
        .with_context(|| format!("Invalid field definitions in {}", path.display()))
}

/// Convert a JSON scalar into its string form; `null` is treated as absent.
fn value_to_string(val: Option<&Value>) -> Option<String> {
    match val? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

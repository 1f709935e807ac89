use serde::{Deserialize, Deserializer, Serialize};

use crate::markers::Marker;

/// Markup that is passed through to the UI without escaping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText(String);

impl RichText {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RichText {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for RichText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named preset of columns and markers offered when creating a board
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub name: String,
    pub columns: Vec<String>,
    pub folded_columns: Vec<String>,
    pub description: RichText,
    pub bullets: Vec<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fold_field: Option<String>,
}

/// Ordered templates plus the display settings shared by all of them
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub fold_field: String,
    pub allowed_group_bys: Vec<String>,
    pub apply_examples_text: String,
    pub ghost_columns: Vec<String>,
    pub examples: Vec<Template>,
}

impl Catalog {
    pub fn template_names(&self) -> Vec<&str> {
        self.examples.iter().map(|t| t.name.as_str()).collect()
    }

    /// Copy of this catalog with `extra` appended after the existing templates
    pub fn with_appended(&self, extra: Vec<Template>) -> Catalog {
        let mut examples = Vec::with_capacity(self.examples.len() + extra.len());
        examples.extend(self.examples.iter().cloned());
        examples.extend(extra);
        Catalog {
            examples,
            ..self.clone()
        }
    }
}

/// Template as returned by the backend, before marker and description normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTemplate {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub columns: Vec<String>,
    #[serde(default, alias = "folded_columns", deserialize_with = "null_as_empty")]
    pub folded_columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullets: Option<Vec<String>>,
    #[serde(default, alias = "fold_field", skip_serializing_if = "Option::is_none")]
    pub fold_field: Option<String>,
}

/// Backends send `null` for a template without columns
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of the kanban examples endpoint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExamplesResponse {
    pub examples: Vec<RawTemplate>,
}

//! Operator-configured project templates and the examples payload built from them.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{CatalogError, Result};
use crate::markers::Marker;
use crate::types::{ExamplesResponse, RawTemplate};

fn default_sequence() -> i32 {
    10
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateStage {
    pub name: String,
    #[serde(default = "default_sequence")]
    pub sequence: i32,
    #[serde(default)]
    pub folded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectTemplate {
    pub name: String,
    #[serde(default = "default_sequence")]
    pub sequence: i32,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub bullet_green: bool,
    #[serde(default = "default_true")]
    pub bullet_orange: bool,
    #[serde(default)]
    pub bullet_star: bool,
    #[serde(default)]
    pub bullet_clock: bool,
    #[serde(default)]
    pub stages: Vec<TemplateStage>,
}

impl ProjectTemplate {
    /// Marker keys for the enabled flags, in fixed order
    pub fn bullet_keys(&self) -> Vec<String> {
        let flags = [self.bullet_green, self.bullet_orange, self.bullet_star, self.bullet_clock];
        Marker::ALL
            .iter()
            .zip(flags)
            .filter(|(_, enabled)| *enabled)
            .map(|(marker, _)| marker.key().to_string())
            .collect()
    }

    fn stage_names(&self, folded: bool) -> Vec<String> {
        let mut stages: Vec<&TemplateStage> = self.stages.iter().filter(|s| s.folded == folded).collect();
        stages.sort_by(|a, b| a.sequence.cmp(&b.sequence).then_with(|| a.name.cmp(&b.name)));
        stages.into_iter().map(|s| s.name.clone()).collect()
    }

    /// Example entry as served to clients
    pub fn to_example(&self) -> RawTemplate {
        RawTemplate {
            name: self.name.clone(),
            columns: self.stage_names(false),
            folded_columns: self.stage_names(true),
            description: self
                .description
                .as_ref()
                .filter(|d| !d.trim().is_empty())
                .cloned(),
            bullets: Some(self.bullet_keys()),
            fold_field: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct TemplateFile {
    #[serde(default)]
    templates: Vec<ProjectTemplate>,
}

/// The set of templates an operator has configured
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    templates: Vec<ProjectTemplate>,
}

impl TemplateStore {
    pub fn new(templates: Vec<ProjectTemplate>) -> Self {
        Self { templates }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: TemplateFile = toml::from_str(content)?;
        for t in &file.templates {
            if t.name.trim().is_empty() {
                return Err(CatalogError::Config("template name must not be empty".to_string()));
            }
            if t.stages.iter().any(|s| s.name.trim().is_empty()) {
                return Err(CatalogError::Config(format!(
                    "template '{}' has a stage without a name",
                    t.name
                )));
            }
        }
        debug!(count = file.templates.len(), "Parsed project templates");
        Ok(Self::new(file.templates))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CatalogError::Config(format!("Failed to read templates file '{}': {}", path.display(), e))
        })?;
        let store = Self::from_toml_str(&content)?;
        info!(path = %path.display(), count = store.len(), "Loaded project templates");
        Ok(store)
    }

    /// Same as [`TemplateStore::load`], reading the file without blocking the runtime
    pub async fn load_async<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            CatalogError::Config(format!("Failed to read templates file '{}': {}", path.display(), e))
        })?;
        let store = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), count = store.len(), "Reloaded project templates");
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Active templates, ordered by sequence then name
    pub fn active(&self) -> Vec<&ProjectTemplate> {
        let mut active: Vec<&ProjectTemplate> = self.templates.iter().filter(|t| t.active).collect();
        active.sort_by(|a, b| a.sequence.cmp(&b.sequence).then_with(|| a.name.cmp(&b.name)));
        active
    }

    pub fn kanban_examples(&self) -> ExamplesResponse {
        ExamplesResponse {
            examples: self.active().into_iter().map(ProjectTemplate::to_example).collect(),
        }
    }
}

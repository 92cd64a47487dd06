//! Checklist Templates and YAML Loading
//!
//! Checklist templates are defined in YAML, one per matter type, and
//! loaded at startup. A new validation record's checklist is
//! instantiated from the template for its matter type.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::checklist::ChecklistItem;
use crate::error::ValidationResult;

/// A checklist template loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistTemplate {
    /// Template identifier (e.g., "litigation_intake")
    pub template: String,
    /// Version number
    #[serde(default = "default_version")]
    pub version: u32,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Items every record of this matter type must clear
    pub items: Vec<TemplateItem>,
}

fn default_version() -> u32 {
    1
}

/// One checklist item definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateItem {
    pub id: String,
    pub label: String,
}

impl ChecklistTemplate {
    /// Instantiate a fresh (all-incomplete) checklist from this template
    pub fn instantiate(&self) -> Vec<ChecklistItem> {
        self.items
            .iter()
            .map(|item| ChecklistItem::new(item.id.clone(), item.label.clone()))
            .collect()
    }
}

/// Loader for checklist templates
pub struct TemplateLoader;

impl TemplateLoader {
    /// Load all templates from a directory of YAML files
    pub fn load_from_dir(dir: &Path) -> ValidationResult<HashMap<String, ChecklistTemplate>> {
        let mut templates = HashMap::new();

        if !dir.exists() {
            return Ok(templates);
        }

        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if path
                .extension()
                .map(|e| e == "yaml" || e == "yml")
                .unwrap_or(false)
            {
                let content = std::fs::read_to_string(&path)?;
                let template: ChecklistTemplate = serde_yaml::from_str(&content)?;
                templates.insert(template.template.clone(), template);
            }
        }

        Ok(templates)
    }

    /// Load a single template from a file
    pub fn load_from_file(path: &Path) -> ValidationResult<ChecklistTemplate> {
        let content = std::fs::read_to_string(path)?;
        let template: ChecklistTemplate = serde_yaml::from_str(&content)?;
        Ok(template)
    }

    /// Load from a YAML string
    pub fn load_from_str(yaml: &str) -> ValidationResult<ChecklistTemplate> {
        let template: ChecklistTemplate = serde_yaml::from_str(yaml)?;
        Ok(template)
    }
}

//! YAML catalog of problem templates.
//!
//! ```yaml
//! cases:
//!   - id: "last_mile_basic"
//!     name: "Last mile - basic"
//!     S: "..."
//!     hard_constraints: ["Truck capacity"]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CockpitError, CockpitResult};
use crate::representation::{DEFAULT_HARD_CONSTRAINTS, DEFAULT_SOFT_CONSTRAINTS};

/// A prefilled problem description users can start from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseTemplate {
    pub id: String,
    pub name: String,
    pub context: String,
    #[serde(rename = "S")]
    pub state: String,
    #[serde(rename = "A")]
    pub actions: String,
    #[serde(rename = "T")]
    pub transitions: String,
    #[serde(rename = "G")]
    pub goals: String,
    #[serde(rename = "C")]
    pub constraints: String,
    #[serde(rename = "R")]
    pub rewards: String,
    pub hard_constraints: Vec<String>,
    pub soft_constraints: Vec<String>,
}

impl CaseTemplate {
    /// Label shown in pickers: the name, or the id when unnamed.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            self.id.as_str()
        } else {
            self.name.as_str()
        }
    }

    /// Hard constraint options, falling back to the generic list.
    pub fn hard_options(&self) -> Vec<String> {
        options_or_default(&self.hard_constraints, &DEFAULT_HARD_CONSTRAINTS)
    }

    /// Soft constraint options, falling back to the generic list.
    pub fn soft_options(&self) -> Vec<String> {
        options_or_default(&self.soft_constraints, &DEFAULT_SOFT_CONSTRAINTS)
    }
}

fn options_or_default(options: &[String], defaults: &[&str]) -> Vec<String> {
    if options.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        options.to_vec()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub cases: Vec<CaseTemplate>,
}

impl Catalog {
    /// Load a catalog from a YAML file. A missing file is an empty catalog.
    pub fn load<P: AsRef<Path>>(path: P) -> CockpitResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::warn!("catalog {} not found, starting without templates", path.display());
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|e| CockpitError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Parse a catalog from a YAML string. An empty document is an empty catalog.
    pub fn from_yaml_str(yaml: &str) -> CockpitResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let catalog: Option<Catalog> =
            serde_yaml::from_str(yaml).map_err(|e| CockpitError::CatalogParse(e.to_string()))?;
        let catalog = catalog.unwrap_or_default();
        log::debug!("catalog loaded with {} cases", catalog.cases.len());
        Ok(catalog)
    }

    /// Find a template by name or id.
    pub fn find(&self, key: &str) -> Option<&CaseTemplate> {
        self.cases.iter().find(|c| c.name == key || c.id == key)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.cases.iter().map(CaseTemplate::label).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

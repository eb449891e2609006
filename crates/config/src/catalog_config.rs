//! Catalog source configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// What a bulk load does when it meets a line it cannot parse
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Reject the whole file; nothing from it is added
    #[default]
    Abort,
    /// Report the line and keep loading the rest
    Skip,
}

impl std::fmt::Display for MalformedPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedPolicy::Abort => write!(f, "abort"),
            MalformedPolicy::Skip => write!(f, "skip"),
        }
    }
}

impl FromStr for MalformedPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(MalformedPolicy::Abort),
            "skip" => Ok(MalformedPolicy::Skip),
            _ => Err(ValidationError::with_value(
                "catalog.on_malformed",
                "must be one of: abort, skip",
                s,
            )),
        }
    }
}

/// Where the catalog is loaded from at startup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct CatalogConfig {
    /// Text file with one `id,title,author` record per line.
    /// `None` starts with an empty catalog.
    pub source_path: Option<PathBuf>,

    /// Handling of unparseable lines during the startup load
    pub on_malformed: MalformedPolicy,
}

impl ConfigSection for CatalogConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut results = Vec::new();

        if let Some(ref path) = self.source_path {
            results.push(Validator::path_not_empty(path, "catalog.source_path"));
            results.push(Validator::not_a_directory(path, "catalog.source_path"));
        }

        Validator::collect_errors(results)
    }

    fn merge(&mut self, other: Self) {
        if other.source_path.is_some() {
            self.source_path = other.source_path;
        }
        self.on_malformed = other.on_malformed;
    }

    fn section_name(&self) -> &'static str {
        "catalog"
    }
}

//! Bootstrap file model for one-time seeding of an empty store.
//!
//! The file is either the legacy `{"breaks": [...]}` document or a bare array
//! of entries. Each entry is `{id?, start, end, description?, name?}`; entries
//! that lack `start` or `end` are reported as malformed so the caller can skip
//! them individually.

use serde::Deserialize;

use crate::error::CoreError;
use crate::time_of_day::TimeRange;
use crate::types::DbId;

/// One raw entry as it appears in the bootstrap file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BootstrapEntry {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Legacy alias for `description`.
    #[serde(default)]
    pub name: Option<String>,
}

/// A bootstrap entry whose times parsed and ordered correctly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapBreak {
    pub id: Option<DbId>,
    pub range: TimeRange,
    pub description: String,
}

impl BootstrapEntry {
    /// `description`, else `name`, else empty.
    pub fn label(&self) -> String {
        self.description
            .clone()
            .or_else(|| self.name.clone())
            .unwrap_or_default()
    }

    /// Validate the entry into a seedable break.
    pub fn validate(&self) -> Result<BootstrapBreak, CoreError> {
        let (Some(start), Some(end)) = (self.start.as_deref(), self.end.as_deref()) else {
            return Err(CoreError::Validation(
                "Bootstrap entry is missing start or end".into(),
            ));
        };
        if let Some(id) = self.id {
            if id <= 0 {
                return Err(CoreError::Validation(format!(
                    "Bootstrap entry id must be positive, got {id}"
                )));
            }
        }
        Ok(BootstrapBreak {
            id: self.id,
            range: TimeRange::parse(start, end)?,
            description: self.label(),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawBootstrap {
    Wrapped {
        #[serde(default)]
        breaks: Vec<serde_json::Value>,
    },
    Bare(Vec<serde_json::Value>),
}

/// Parsed bootstrap document.
#[derive(Debug, Default)]
pub struct BootstrapFile {
    /// Entries in file order. An element that is not even an object is
    /// carried as a default entry so that it fails `validate` like any other
    /// malformed record instead of rejecting the whole file.
    pub entries: Vec<BootstrapEntry>,
}

impl BootstrapFile {
    /// Parse the document text. Only a structurally invalid document is an error.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let raw: RawBootstrap = serde_json::from_str(text)?;
        let values = match raw {
            RawBootstrap::Wrapped { breaks } => breaks,
            RawBootstrap::Bare(values) => values,
        };
        let entries = values
            .into_iter()
            .map(|value| serde_json::from_value(value).unwrap_or_default())
            .collect();
        Ok(Self { entries })
    }
}

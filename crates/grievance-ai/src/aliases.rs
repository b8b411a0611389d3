//! Department alias table.
//!
//! Maps the informal department names a model tends to answer with
//! ("Power", "Garbage", "Law and Order") to the canonical [`Department`].
//! The table is versioned JSON data so deployments can extend it without a
//! rebuild:
//!
//! ```json
//! { "version": 1, "aliases": { "Power": "Electricity" } }
//! ```
//!
//! Every target must be one of the canonical department names; a table that
//! names anything else fails to load.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use grievance_core::Department;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Version of the table compiled into the binary.
pub const BUILTIN_VERSION: u32 = 1;

const BUILTIN_ALIASES: &[(&str, Department)] = &[
    ("Roads", Department::RoadsInfrastructure),
    ("Infrastructure", Department::RoadsInfrastructure),
    ("Roads & Infrastructure", Department::RoadsInfrastructure),
    ("Water", Department::WaterSupply),
    ("Water Supply", Department::WaterSupply),
    ("Electricity", Department::Electricity),
    ("Power", Department::Electricity),
    ("Waste", Department::WasteManagement),
    ("Sanitation", Department::WasteManagement),
    ("Garbage", Department::WasteManagement),
    ("Waste Management", Department::WasteManagement),
    ("Public Safety", Department::PublicSafety),
    ("Safety", Department::PublicSafety),
    ("Law and Order", Department::PublicSafety),
    ("Emergency", Department::EmergencyServices),
    ("Fire Department", Department::EmergencyServices),
    ("Other", Department::Other),
    ("Unassigned", Department::Other),
];

#[derive(Debug, Error)]
pub enum AliasError {
    #[error("failed to read alias table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid alias table: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Versioned alias → department mapping. Lookup is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasTable {
    pub version: u32,
    aliases: BTreeMap<String, Department>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AliasTable {
    /// The table shipped with the crate.
    pub fn builtin() -> Self {
        Self {
            version: BUILTIN_VERSION,
            aliases: BUILTIN_ALIASES
                .iter()
                .map(|(alias, dept)| (alias.to_string(), *dept))
                .collect(),
        }
    }

    /// Parse a table from its JSON form.
    pub fn from_json_str(json: &str) -> Result<Self, AliasError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a table from a JSON file. The loaded table replaces the builtin
    /// one entirely.
    pub fn from_path(path: &Path) -> Result<Self, AliasError> {
        let json = std::fs::read_to_string(path).map_err(|source| AliasError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            version = table.version,
            aliases = table.len(),
            "loaded alias table"
        );
        Ok(table)
    }

    pub fn to_json_pretty(&self) -> Result<String, AliasError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Department for an exact alias, if the table has one.
    pub fn lookup(&self, alias: &str) -> Option<Department> {
        self.aliases.get(alias).copied()
    }

    /// Resolve a raw category label: trim, look up the alias, then accept an
    /// exact canonical name; anything else is [`Department::Other`].
    pub fn resolve(&self, raw: &str) -> Department {
        let raw = raw.trim();
        self.lookup(raw)
            .or_else(|| raw.parse().ok())
            .unwrap_or(Department::Other)
    }

    /// Add or replace one alias.
    pub fn insert(&mut self, alias: impl Into<String>, department: Department) {
        self.aliases.insert(alias.into(), department);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Department)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

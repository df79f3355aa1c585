//! Declarative description of an account's containers and objects.
//!
//! Manifests seed an [`InMemoryAccount`](crate::InMemoryAccount) from TOML or
//! JSON, e.g.
//!
//! ```toml
//! [[containers]]
//! name = "logs"
//!
//! [[containers.objects]]
//! path = "2024/app.log"
//! size = 1024
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ListingError, ListingResult};

/// Top-level manifest: the containers of one account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountManifest {
    #[serde(default)]
    pub containers: Vec<ContainerManifest>,
}

/// One container and its objects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerManifest {
    pub name: String,
    #[serde(default)]
    pub quota_gib: Option<u64>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    #[serde(default)]
    pub objects: Vec<ObjectManifest>,
}

/// One object inside a container.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectManifest {
    pub path: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub folder: bool,
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
}

impl AccountManifest {
    pub fn from_toml_str(s: &str) -> ListingResult<Self> {
        toml::from_str(s).map_err(|e| ListingError::Manifest(e.to_string()))
    }

    pub fn from_json_str(s: &str) -> ListingResult<Self> {
        serde_json::from_str(s).map_err(|e| ListingError::Manifest(e.to_string()))
    }

    /// Load a manifest file, choosing the format by extension (`.json` or `.toml`).
    pub fn from_path(path: impl AsRef<Path>) -> ListingResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text),
            Some("toml") => Self::from_toml_str(&text),
            other => Err(ListingError::Manifest(format!(
                "unsupported manifest extension {other:?} for {}",
                path.display()
            ))),
        }
    }

    /// Total number of objects across all containers.
    pub fn object_count(&self) -> usize {
        self.containers.iter().map(|c| c.objects.len()).sum()
    }
}

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of entity surfaced by an enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    File,
    Folder,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Folder => write!(f, "folder"),
        }
    }
}

/// A file or folder discovered while walking a container.
///
/// Container-level traversers produce objects with `container_name == None`;
/// account-level traversal annotates each object with the container it was
/// found in before handing it to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    /// Final path component.
    pub name: String,
    /// Path relative to the container root, `/`-separated, no leading slash.
    pub relative_path: String,
    pub entity_type: EntityType,
    /// Content length in bytes. Always zero for folders.
    pub size: u64,
    pub last_modified: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_md5: Option<[u8; 16]>,
    /// Name of the container this object was enumerated from, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_name: Option<String>,
}

impl StoredObject {
    /// Create a file entry.
    pub fn file(relative_path: impl Into<String>, size: u64, last_modified: DateTime<Utc>) -> Self {
        Self::build(relative_path.into(), EntityType::File, size, last_modified)
    }

    /// Create a folder entry.
    pub fn folder(relative_path: impl Into<String>, last_modified: DateTime<Utc>) -> Self {
        Self::build(relative_path.into(), EntityType::Folder, 0, last_modified)
    }

    fn build(
        relative_path: String,
        entity_type: EntityType,
        size: u64,
        last_modified: DateTime<Utc>,
    ) -> Self {
        let relative_path = relative_path.trim_matches('/').to_string();
        let name = relative_path
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            name,
            relative_path,
            entity_type,
            size,
            last_modified,
            content_md5: None,
            container_name: None,
        }
    }

    /// Attach a content digest.
    pub fn with_md5(mut self, md5: [u8; 16]) -> Self {
        self.content_md5 = Some(md5);
        self
    }

    /// Return this object annotated with the container it came from.
    ///
    /// Any previous annotation is replaced.
    pub fn with_container(mut self, container_name: impl Into<String>) -> Self {
        self.container_name = Some(container_name.into());
        self
    }

    pub fn is_folder(&self) -> bool {
        self.entity_type == EntityType::Folder
    }

    /// Number of `/`-separated components above this object.
    ///
    /// Top-level entries have depth 0.
    pub fn depth(&self) -> usize {
        self.relative_path.matches('/').count()
    }

    /// Hex-encoded content digest, if one is known.
    pub fn content_md5_hex(&self) -> Option<String> {
        self.content_md5.map(hex::encode)
    }

    /// Path including the container name, e.g. `logs/2024/app.log`.
    ///
    /// Falls back to the relative path when no container is attached.
    pub fn qualified_path(&self) -> String {
        match &self.container_name {
            Some(container) => format!("{container}/{}", self.relative_path),
            None => self.relative_path.clone(),
        }
    }
}

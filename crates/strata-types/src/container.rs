use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Properties returned alongside a container name by a listing call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerProperties {
    pub last_modified: Option<DateTime<Utc>>,
    /// Provisioned quota, for services that report one.
    pub quota_gib: Option<u64>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

/// One container as reported by a paged listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerItem {
    pub name: String,
    #[serde(default)]
    pub properties: ContainerProperties,
}

impl ContainerItem {
    /// Create an item with empty properties.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: ContainerProperties::default(),
        }
    }

    pub fn with_properties(mut self, properties: ContainerProperties) -> Self {
        self.properties = properties;
        self
    }
}

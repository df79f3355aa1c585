//! In-memory account for tests and embedding.
//!
//! [`InMemoryAccount`] keeps containers in a `BTreeMap` behind a `RwLock`,
//! so listings come back in lexicographic order the way the service lists
//! shares. Markers are the name of the first container of the next page.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use strata_types::{ContainerItem, ContainerProperties, Marker, StoredObject};
use tracing::debug;

use crate::config::ListingConfig;
use crate::context::ListingContext;
use crate::error::{ListingError, ListingResult};
use crate::manifest::AccountManifest;
use crate::traits::{ContainerLister, ContainerPage};

#[derive(Clone, Debug, Default)]
struct InMemoryContainer {
    properties: ContainerProperties,
    objects: BTreeMap<String, StoredObject>,
}

/// An in-memory storage account implementing [`ContainerLister`].
///
/// Data is lost when the account is dropped. Page faults can be injected
/// with [`fail_page`](Self::fail_page) to exercise error paths.
pub struct InMemoryAccount {
    config: ListingConfig,
    containers: RwLock<BTreeMap<String, InMemoryContainer>>,
    faults: RwLock<HashMap<usize, (u16, String)>>,
    list_calls: AtomicUsize,
}

impl InMemoryAccount {
    /// Create an empty account.
    pub fn new(config: ListingConfig) -> Self {
        Self {
            config,
            containers: RwLock::new(BTreeMap::new()),
            faults: RwLock::new(HashMap::new()),
            list_calls: AtomicUsize::new(0),
        }
    }

    /// Build an account from a manifest.
    pub fn from_manifest(manifest: &AccountManifest, config: ListingConfig) -> ListingResult<Self> {
        config.validate()?;
        let account = Self::new(config);
        for container in &manifest.containers {
            let properties = ContainerProperties {
                last_modified: None,
                quota_gib: container.quota_gib,
                metadata: container.metadata.clone(),
            };
            account.add_container_item(
                ContainerItem::new(&container.name).with_properties(properties),
            );
            for object in &container.objects {
                let modified = object.last_modified.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
                let stored = if object.folder {
                    StoredObject::folder(&object.path, modified)
                } else {
                    StoredObject::file(&object.path, object.size, modified)
                };
                account.put_object(&container.name, stored);
            }
        }
        debug!(
            containers = manifest.containers.len(),
            objects = manifest.object_count(),
            "in-memory account loaded from manifest"
        );
        Ok(account)
    }

    pub fn config(&self) -> &ListingConfig {
        &self.config
    }

    /// Add an empty container. Returns `false` if it already existed.
    pub fn add_container(&self, name: impl Into<String>) -> bool {
        self.add_container_item(ContainerItem::new(name))
    }

    /// Add a container with properties. Returns `false` if it already existed.
    pub fn add_container_item(&self, item: ContainerItem) -> bool {
        let mut map = self.write();
        if map.contains_key(&item.name) {
            return false;
        }
        map.insert(
            item.name,
            InMemoryContainer {
                properties: item.properties,
                objects: BTreeMap::new(),
            },
        );
        true
    }

    /// Store an object, creating the container if needed.
    ///
    /// An existing object at the same relative path is replaced.
    pub fn put_object(&self, container: &str, object: StoredObject) {
        let mut map = self.write();
        map.entry(container.to_string())
            .or_default()
            .objects
            .insert(object.relative_path.clone(), object);
    }

    /// All container names in listing order.
    pub fn container_names(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// Objects of one container ordered by relative path, or `None` if the
    /// container does not exist.
    pub fn objects(&self, container: &str) -> Option<Vec<StoredObject>> {
        self.read()
            .get(container)
            .map(|c| c.objects.values().cloned().collect())
    }

    /// Number of containers.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Make the `index`-th listing call (0-based, counted across the
    /// account's lifetime) fail with a service error.
    pub fn fail_page(&self, index: usize, status: u16, code: impl Into<String>) {
        self.faults
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(index, (status, code.into()));
    }

    /// Number of listing calls made so far, including failed ones.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, InMemoryContainer>> {
        self.containers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, InMemoryContainer>> {
        self.containers.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryAccount {
    fn default() -> Self {
        Self::new(ListingConfig::default())
    }
}

impl ContainerLister for InMemoryAccount {
    fn list_containers(
        &self,
        marker: &Marker,
        ctx: &ListingContext,
    ) -> ListingResult<ContainerPage> {
        ctx.check()?;
        let call = self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some((status, code)) = self
            .faults
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&call)
        {
            return Err(ListingError::service(
                *status,
                code.clone(),
                format!("injected failure on listing call {call}"),
            ));
        }
        if !marker.is_initial() && !marker.not_done() {
            return Err(ListingError::InvalidMarker(
                "listing already complete".into(),
            ));
        }

        let page_size = self.config.page_size.max(1);
        let prefix = self.config.prefix.as_deref().unwrap_or("");
        let map = self.read();
        let start = marker.token().unwrap_or("").to_string();
        let mut matching = map
            .range(start..)
            .filter(|(name, _)| name.starts_with(prefix))
            .map(|(name, c)| ContainerItem {
                name: name.clone(),
                properties: c.properties.clone(),
            });

        let items: Vec<ContainerItem> = matching.by_ref().take(page_size).collect();
        let next_marker = matching.next().map(|item| item.name);
        Ok(ContainerPage { items, next_marker })
    }
}

impl std::fmt::Debug for InMemoryAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryAccount")
            .field("container_count", &self.len())
            .field("page_size", &self.config.page_size)
            .finish()
    }
}

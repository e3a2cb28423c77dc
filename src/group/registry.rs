//! Group registry
//!
//! Directory of groups by name, owned by whoever bootstraps the node and
//! shared by reference with everything that needs to look a group up.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::error::GroupError;
use crate::group::{Group, Loader};

// == Group Registry ==
/// Name to group directory.
#[derive(Debug, Default)]
pub struct GroupRegistry {
    groups: Mutex<HashMap<String, Arc<Group>>>,
}

impl GroupRegistry {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == New Group ==
    /// Creates a group and registers it under `name`.
    ///
    /// A group already registered under the same name is replaced; holders of
    /// the old `Arc<Group>` keep using it.
    ///
    /// # Arguments
    /// * `name` - Namespace name, also used on the wire to address peers
    /// * `cache_bytes` - Capacity of the local cache, 0 = unbounded
    /// * `loader` - Source of values missing from every cache
    pub fn new_group(
        &self,
        name: impl Into<String>,
        cache_bytes: u64,
        loader: Arc<dyn Loader>,
    ) -> Result<Arc<Group>, GroupError> {
        let name = name.into();
        if name.is_empty() {
            return Err(GroupError::EmptyName);
        }

        let group = Arc::new(Group::new(name.clone(), cache_bytes, loader));
        let previous = self.groups.lock().insert(name.clone(), Arc::clone(&group));

        if previous.is_some() {
            warn!(group = %name, "replaced existing group registration");
        }
        info!(group = %name, cache_bytes, "group registered");
        Ok(group)
    }

    // == Get Group ==
    /// Returns the group registered under `name`.
    pub fn get_group(&self, name: &str) -> Option<Arc<Group>> {
        self.groups.lock().get(name).cloned()
    }

    /// Returns registered group names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.groups.lock().keys().cloned().collect();
        names.sort();
        names
    }
}

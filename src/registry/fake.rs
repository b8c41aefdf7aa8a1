use crate::registry::client::{Instance, RegistryClient, RegistryError};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory [`RegistryClient`] for tests: a plain path-to-instances map with
/// no watches, no session, no IO. Populate it directly with [`Instance`]
/// values at whatever paths a scenario needs.
#[derive(Default)]
pub struct FakeRegistryClient {
    tree: Mutex<HashMap<String, Vec<Instance>>>,
    closed: Mutex<bool>,
}

impl FakeRegistryClient {
    pub fn new() -> Self {
        FakeRegistryClient::default()
    }

    /// Registers `instances` at `path`, overwriting whatever was there.
    pub fn set(&self, path: &str, instances: Vec<Instance>) {
        self.tree.lock().unwrap().insert(path.to_string(), instances);
    }
}

impl RegistryClient for FakeRegistryClient {
    fn list(&self, path: &str) -> Result<Vec<Instance>, RegistryError> {
        if *self.closed.lock().unwrap() {
            return Err(RegistryError::SessionClosed);
        }
        Ok(self.tree.lock().unwrap().get(path).cloned().unwrap_or_default())
    }

    fn close(&self) -> Result<(), RegistryError> {
        *self.closed.lock().unwrap() = true;
        Ok(())
    }
}

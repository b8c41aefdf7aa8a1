use crate::registry::client::{Endpoint, Instance, RegistryClient, RegistryError};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use zookeeper::{WatchedEvent, Watcher, ZkResult, ZooKeeper};

/// Wire shape of a ServerSet member znode, as written by the Finagle/Twitter
/// commons ServerSet library this backend reads. Unknown fields (`status`,
/// `shardId` typos seen in the wild, etc.) are ignored.
#[derive(Debug, Deserialize)]
struct ServerSetMember {
    #[serde(rename = "serviceEndpoint")]
    service_endpoint: WireEndpoint,
    #[serde(rename = "additionalEndpoints", default)]
    additional_endpoints: HashMap<String, WireEndpoint>,
    #[serde(default)]
    shard: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WireEndpoint {
    host: String,
    port: u16,
}

impl From<WireEndpoint> for Endpoint {
    fn from(w: WireEndpoint) -> Self {
        Endpoint { host: w.host, port: w.port }
    }
}

/// A no-op watcher: this backend never registers a persistent watch (every
/// lookup re-reads `list` fresh, per the "no caching layer" non-goal), it
/// only needs a [`Watcher`] to satisfy the session-level constructor.
struct LoggingWatcher;

impl Watcher for LoggingWatcher {
    fn handle(&self, event: WatchedEvent) {
        log::debug!("registry session event: {:?}", event);
    }
}

/// [`RegistryClient`] backed by a real ZooKeeper ensemble. Connects once at
/// construction; `list` issues a fresh, unwatched `get_children` + `get_data`
/// pair against the live tree on every call.
pub struct ZkRegistryClient {
    zk: Mutex<Option<ZooKeeper>>,
}

impl ZkRegistryClient {
    /// Connects to `connect_string` (ensemble hosts, optionally followed by
    /// `/chroot`). Fails fast: a connection error here is startup-fatal.
    pub fn connect(connect_string: &str, session_timeout: Duration) -> ZkResult<Self> {
        let zk = ZooKeeper::connect(connect_string, session_timeout, LoggingWatcher)?;
        log::info!("Connected to registry ensemble '{}'.", connect_string);
        Ok(ZkRegistryClient { zk: Mutex::new(Some(zk)) })
    }

    fn with_session<T>(&self, f: impl FnOnce(&ZooKeeper) -> Result<T, RegistryError>) -> Result<T, RegistryError> {
        let guard = self.zk.lock().unwrap();
        match guard.as_ref() {
            Some(zk) => f(zk),
            None => Err(RegistryError::SessionClosed),
        }
    }
}

impl RegistryClient for ZkRegistryClient {
    fn list(&self, path: &str) -> Result<Vec<Instance>, RegistryError> {
        self.with_session(|zk| {
            let full_path = format!("/{}", path);
            let children = match zk.get_children(&full_path, false) {
                Ok(children) => children,
                Err(zookeeper::ZkError::NoNode) => return Ok(Vec::new()),
                Err(err) => return Err(RegistryError::Io(io_error(err))),
            };

            let mut instances = Vec::with_capacity(children.len());
            for child in children {
                let child_path = format!("{}/{}", full_path, child);
                let (data, _stat) = match zk.get_data(&child_path, false) {
                    Ok(v) => v,
                    Err(zookeeper::ZkError::NoNode) => continue,
                    Err(err) => return Err(RegistryError::Io(io_error(err))),
                };
                let member: ServerSetMember = serde_json::from_slice(&data).map_err(|err| RegistryError::Decode {
                    path: child_path.clone(),
                    reason: err.to_string(),
                })?;
                instances.push(Instance {
                    service_endpoint: member.service_endpoint.into(),
                    additional_endpoints: member
                        .additional_endpoints
                        .into_iter()
                        .map(|(k, v)| (k, v.into()))
                        .collect(),
                    shard: member.shard.and_then(|s| u32::try_from(s).ok()),
                });
            }
            Ok(instances)
        })
    }

    fn close(&self) -> Result<(), RegistryError> {
        let mut guard = self.zk.lock().unwrap();
        if let Some(zk) = guard.take() {
            zk.close().map_err(|err| RegistryError::Io(io_error(err)))?;
            log::info!("Registry session closed.");
        }
        Ok(())
    }
}

fn io_error(err: zookeeper::ZkError) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
}

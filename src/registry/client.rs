use std::collections::HashMap;
use std::{fmt, io};

/// A single endpoint: host plus port, as stored at a ServerSet member node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

/// A single registered service instance, decoded from a registry node payload.
/// Opaque to the resolver beyond these three fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub service_endpoint: Endpoint,
    pub additional_endpoints: HashMap<String, Endpoint>,
    pub shard: Option<u32>,
}

/// Errors encountered talking to the registry. Transport/decode failures
/// only: "path not found" is represented by an empty `Vec`, never an error.
#[derive(Debug)]
pub enum RegistryError {
    Io(io::Error),
    Decode { path: String, reason: String },
    SessionClosed,
}

impl From<io::Error> for RegistryError {
    fn from(err: io::Error) -> Self {
        RegistryError::Io(err)
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Io(err) => write!(f, "registry io error: {}", err),
            RegistryError::Decode { path, reason } => {
                write!(f, "decoding registry node at '{}': {}", path, reason)
            }
            RegistryError::SessionClosed => write!(f, "registry session is closed"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// A type implementing [`RegistryClient`] is able to list the live children
/// of a registry path and to release its session. **The trait decouples the
/// resolution core from the transport mechanism** — production code talks to
/// ZooKeeper via [`super::ZkRegistryClient`], tests talk to an in-memory map
/// via [`super::FakeRegistryClient`].
pub trait RegistryClient: Send + Sync {
    /// Returns the current set of live instances registered under `path`.
    /// A missing path is an empty set, never an error.
    fn list(&self, path: &str) -> Result<Vec<Instance>, RegistryError>;

    /// Releases the underlying session. Called exactly once, on every exit
    /// path, by the shutdown guard in `crate::shutdown`.
    fn close(&self) -> Result<(), RegistryError>;
}

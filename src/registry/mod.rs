mod client;
mod fake;
mod zk;

pub use client::*;
pub use fake::FakeRegistryClient;
pub use zk::ZkRegistryClient;

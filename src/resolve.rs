use crate::path::CandidatePaths;
use crate::registry::{Instance, RegistryClient, RegistryError};

/// Walks `qname`'s candidate registry paths (`CandidatePaths`) against
/// `registry`, returning the first non-empty match. When a candidate carries
/// a shard, only instances matching that shard count as a match — a
/// non-empty set can still be rejected and resolution continues to the next
/// candidate. Never fails on "not found"; only transport/decode errors from
/// the registry client propagate.
pub fn resolve(registry: &dyn RegistryClient, qname: &str, basedomain: &str) -> Result<Vec<Instance>, RegistryError> {
    for (path, shard) in CandidatePaths::new(qname, basedomain) {
        let instances = registry.list(&path)?;
        if instances.is_empty() {
            continue;
        }
        match shard {
            None => return Ok(instances),
            Some(shard) => {
                let matching: Vec<Instance> = instances.into_iter().filter(|i| i.shard == Some(shard)).collect();
                if !matching.is_empty() {
                    return Ok(matching);
                }
            }
        }
    }
    Ok(Vec::new())
}

/// Candidate registry paths to probe for a given FQDN, most-specific first.
/// Not restartable: once advanced, a candidate is gone. Mirrors the teacher's
/// preference for a plain forward-only iterator over a collected `Vec` when
/// a consumer (the resolver) only ever walks it once, in order.
pub struct CandidatePaths {
    components: Vec<String>,
    shard: Option<u32>,
    done: bool,
}

impl CandidatePaths {
    /// Builds the candidate sequence for `hostname` under `basedomain`. Both
    /// may carry leading/trailing dots; `basedomain` may be empty, in which
    /// case the whole (stripped) `hostname` is used.
    pub fn new(hostname: &str, basedomain: &str) -> Self {
        let hostname = hostname.trim_matches('.');
        let basedomain = basedomain.trim_matches('.');

        let qrec = if basedomain.is_empty() {
            hostname.to_string()
        } else {
            rpartition_prefix(hostname, basedomain)
        };

        let mut components: Vec<String> = if qrec.is_empty() {
            Vec::new()
        } else {
            qrec.split('.').map(str::to_string).rev().collect()
        };

        let shard = match components.last().and_then(|last| last.parse::<u32>().ok()) {
            Some(shard) => {
                components.pop();
                Some(shard)
            }
            None => None,
        };

        let done = components.is_empty();
        CandidatePaths { components, shard, done }
    }
}

/// Removes the longest suffix of `hostname` equal to `basedomain`, returning
/// the prefix. If `basedomain` isn't a suffix of `hostname`, returns `hostname`
/// unchanged (mirroring Python's `str.rpartition` fallback behavior).
fn rpartition_prefix(hostname: &str, basedomain: &str) -> String {
    match hostname.strip_suffix(basedomain) {
        Some(prefix) => prefix.trim_end_matches('.').to_string(),
        None => hostname.to_string(),
    }
}

impl Iterator for CandidatePaths {
    type Item = (String, Option<u32>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.components.is_empty() {
            return None;
        }

        let path = self.components.join("/");
        let shard = self.shard;

        if self.components.len() == 1 {
            self.done = true;
        } else {
            let a = self.components.pop().unwrap();
            let b = self.components.pop().unwrap();
            self.components.push(format!("{}.{}", a, b));
        }

        Some((path, shard))
    }
}

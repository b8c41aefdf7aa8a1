use crate::config::Config;
use crate::records::{a_lookup, ns_lookup, soa_lookup, srv_lookup, AnswerRecord};
use crate::registry::{RegistryClient, RegistryError};

/// Routes `(qname, qtype)` to the matching synthesizer. `ANY` concatenates
/// all four in A, NS, SOA, SRV order; an unrecognized `qtype` yields nothing
/// ("no answer", not an error — see `http::envelope`).
pub fn dispatch(registry: &dyn RegistryClient, cfg: &Config, qname: &str, qtype: &str) -> Result<Vec<AnswerRecord>, RegistryError> {
    match qtype {
        "A" => a_lookup(registry, cfg, qname),
        "NS" => Ok(ns_lookup(cfg, qname)),
        "SOA" => Ok(soa_lookup(cfg, qname)),
        "SRV" => srv_lookup(registry, cfg, qname),
        "ANY" => {
            let mut records = a_lookup(registry, cfg, qname)?;
            records.extend(ns_lookup(cfg, qname));
            records.extend(soa_lookup(cfg, qname));
            records.extend(srv_lookup(registry, cfg, qname)?);
            Ok(records)
        }
        _ => Ok(Vec::new()),
    }
}

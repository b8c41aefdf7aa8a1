use crate::config::Config;
use crate::registry::{Instance, RegistryClient, RegistryError};
use crate::resolve::resolve;
use serde::Serialize;

/// A synthesized DNS answer, ready to be wrapped in the backend envelope.
/// One of `{A, NS, SOA, SRV}`; `qtype` tags the variant for JSON emission.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "qtype")]
pub enum AnswerRecord {
    A { qname: String, ttl: u32, content: String },
    NS { qname: String, ttl: u32, content: String },
    SOA { qname: String, ttl: u32, content: String },
    SRV { qname: String, ttl: u32, content: String },
}

/// `qname` dot-stripped and lowercased, the normal form NS/SOA preconditions
/// compare against.
fn normalized(qname: &str) -> String {
    qname.trim_matches('.').to_lowercase()
}

/// A-record lookup: one record per resolved instance, carrying its service
/// endpoint host as `content`.
pub fn a_lookup(registry: &dyn RegistryClient, cfg: &Config, qname: &str) -> Result<Vec<AnswerRecord>, RegistryError> {
    let instances = resolve(registry, qname, &cfg.domain)?;
    Ok(instances
        .into_iter()
        .map(|i| AnswerRecord::A {
            qname: qname.to_string(),
            ttl: cfg.ttl,
            content: i.service_endpoint.host,
        })
        .collect())
}

/// NS lookup: a single record, only at the zone apex.
pub fn ns_lookup(cfg: &Config, qname: &str) -> Vec<AnswerRecord> {
    if normalized(qname) != cfg.domain {
        return Vec::new();
    }
    vec![AnswerRecord::NS {
        qname: qname.to_string(),
        ttl: cfg.ttl,
        content: cfg.soa.ns1.clone(),
    }]
}

/// SOA lookup: a single record for the apex and any name under the zone.
pub fn soa_lookup(cfg: &Config, qname: &str) -> Vec<AnswerRecord> {
    if !normalized(qname).ends_with(&cfg.domain) {
        return Vec::new();
    }
    vec![AnswerRecord::SOA {
        qname: cfg.domain.clone(),
        ttl: cfg.soa.ttl,
        content: cfg.soa.content(),
    }]
}

/// SRV lookup: `_service._proto.a-name` → one record per resolved instance
/// that both carries a shard and exposes `service` among its additional
/// endpoints. Malformed or unsupported `_proto` values yield nothing.
pub fn srv_lookup(registry: &dyn RegistryClient, cfg: &Config, qname: &str) -> Result<Vec<AnswerRecord>, RegistryError> {
    let lower = qname.to_lowercase();
    let mut parts = lower.splitn(3, '.');
    let (service_label, proto_label, a_name) = match (parts.next(), parts.next(), parts.next()) {
        (Some(s), Some(p), Some(a)) => (s, p, a),
        _ => return Ok(Vec::new()),
    };
    if !service_label.starts_with('_') || !matches!(proto_label, "_tcp" | "_udp") {
        return Ok(Vec::new());
    }
    let service = &service_label[1..];

    let instances: Vec<Instance> = resolve(registry, a_name, &cfg.domain)?;
    Ok(instances
        .into_iter()
        .filter_map(|i| {
            let shard = i.shard?;
            let endpoint = i.additional_endpoints.get(service)?;
            Some(AnswerRecord::SRV {
                qname: qname.to_string(),
                ttl: cfg.ttl,
                content: format!("0 0 {} {}.{}", endpoint.port, shard, a_name),
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Endpoint, FakeRegistryClient};
    use crate::soa::SoaConfig;
    use std::collections::HashMap;
    use std::net::IpAddr;

    fn cfg() -> Config {
        Config {
            domain: "basedomain.example.com".to_string(),
            ttl: 60,
            soa: SoaConfig {
                ttl: 300,
                ns1: "ns1.example.com".to_string(),
                email: "root.basedomain.example.com".to_string(),
                refresh: 1200,
                retry: 180,
                expire: 86400,
                nxdomain_ttl: 60,
            },
            zk_connect_string: "localhost:2181/".to_string(),
            listen: "0.0.0.0".parse::<IpAddr>().unwrap(),
            port: 8080,
            drain_deadline_secs: 30,
        }
    }

    #[test]
    fn a_record_sharded_scenario() {
        let fake = FakeRegistryClient::new();
        fake.set(
            "buz/bas/bar/foo/job",
            vec![
                Instance {
                    service_endpoint: Endpoint { host: "10.0.0.1".to_string(), port: 0 },
                    additional_endpoints: HashMap::new(),
                    shard: Some(0),
                },
                Instance {
                    service_endpoint: Endpoint { host: "10.0.0.2".to_string(), port: 0 },
                    additional_endpoints: HashMap::new(),
                    shard: Some(1),
                },
            ],
        );

        let got = a_lookup(
            &fake,
            &cfg(),
            "0.job.foo.bar.bas.buz.basedomain.example.com.",
        )
        .unwrap();
        assert_eq!(
            got,
            vec![AnswerRecord::A {
                qname: "0.job.foo.bar.bas.buz.basedomain.example.com.".to_string(),
                ttl: 60,
                content: "10.0.0.1".to_string(),
            }]
        );
    }

    #[test]
    fn ns_lookup_only_succeeds_at_apex() {
        let c = cfg();
        assert_eq!(ns_lookup(&c, "basedomain.example.com.").len(), 1);
        assert!(ns_lookup(&c, "sub.basedomain.example.com.").is_empty());
    }

    #[test]
    fn soa_lookup_succeeds_for_apex_and_descendants() {
        let c = cfg();
        assert_eq!(soa_lookup(&c, "basedomain.example.com.").len(), 1);
        assert_eq!(soa_lookup(&c, "job.foo.basedomain.example.com.").len(), 1);
        assert!(soa_lookup(&c, "example.com.").is_empty());
    }

    #[test]
    fn soa_content_matches_serialization_scenario() {
        let c = cfg();
        let recs = soa_lookup(&c, "basedomain.example.com.");
        match &recs[0] {
            AnswerRecord::SOA { content, .. } => {
                assert_eq!(content, "ns1.example.com root.basedomain.example.com 1200 1 180 86400 60");
            }
            other => panic!("expected SOA, got {:?}", other),
        }
    }

    #[test]
    fn srv_lookup_requires_shard_and_matching_additional_endpoint() {
        let fake = FakeRegistryClient::new();
        let mut endpoints = HashMap::new();
        endpoints.insert("http".to_string(), Endpoint { host: "10.0.0.1".to_string(), port: 9090 });
        fake.set(
            "bas/bar/foo/job",
            vec![
                Instance {
                    service_endpoint: Endpoint { host: "10.0.0.1".to_string(), port: 0 },
                    additional_endpoints: endpoints,
                    shard: Some(2),
                },
                Instance {
                    service_endpoint: Endpoint { host: "10.0.0.2".to_string(), port: 0 },
                    additional_endpoints: HashMap::new(),
                    shard: None,
                },
            ],
        );

        let got = srv_lookup(
            &fake,
            &cfg(),
            "_http._tcp.job.foo.bar.bas.basedomain.example.com.",
        )
        .unwrap();
        assert_eq!(got.len(), 1);
        match &got[0] {
            AnswerRecord::SRV { content, .. } => {
                assert_eq!(content, "0 0 9090 2.job.foo.bar.bas.basedomain.example.com.");
            }
            other => panic!("expected SRV, got {:?}", other),
        }
    }

    #[test]
    fn srv_lookup_rejects_unsupported_proto() {
        let fake = FakeRegistryClient::new();
        let got = srv_lookup(&fake, &cfg(), "_http._sctp.job.basedomain.example.com.").unwrap();
        assert!(got.is_empty());
    }
}

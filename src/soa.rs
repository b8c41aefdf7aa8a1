/// SOA parameters configured once at startup and handed out by reference to
/// every request. Never mutated; no interior mutability is needed.
#[derive(Debug, Clone)]
pub struct SoaConfig {
    pub ttl: u32,
    pub ns1: String,
    pub email: String,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub nxdomain_ttl: u32,
}

impl SoaConfig {
    /// Serialize as the SOA record `content` string. The serial field is
    /// hardcoded to `1`: PowerDNS is expected to substitute it via
    /// `SOA-EDIT=EPOCH`, which `getDomainMetadata` advertises unconditionally
    /// for the configured domain (see `http::handlers::get_domain_metadata`).
    pub fn content(&self) -> String {
        format!(
            "{} {} {} 1 {} {} {}",
            self.ns1, self.email, self.refresh, self.retry, self.expire, self.nxdomain_ttl
        )
    }
}

use crate::soa::SoaConfig;
use clap::Parser;
use std::net::IpAddr;
use std::str::FromStr;

/// Startup flags for the backend. Parsed once in `main` and never mutated
/// afterwards; every field an env var can override carries a matching
/// `#[arg(env)]`, same precedence clap always gives: CLI over env over default.
#[derive(Parser, Debug, Clone)]
#[command(name = "zkns-backend")]
pub struct Args {
    /// Zookeeper ensemble (comma-delimited, optionally followed by /chroot path).
    #[arg(long, env, default_value = "localhost:2181/")]
    pub zk: String,

    /// Serve records for this DNS domain.
    #[arg(long, env, default_value = "zk.example.com")]
    pub domain: String,

    /// HTTP listen port.
    #[arg(long, env, default_value_t = 8080)]
    pub port: u16,

    /// IP address to listen for http connections.
    #[arg(long, env, default_value = "0.0.0.0")]
    pub listen: String,

    /// TTL for normal records.
    #[arg(long, env, default_value_t = 60)]
    pub ttl: u32,

    /// TTL for the SOA record itself.
    #[arg(long = "soa-ttl", env = "SOA_TTL", default_value_t = 300)]
    pub soa_ttl: u32,

    /// Authoritative nameserver for the SOA record. Uses the system hostname if left blank.
    #[arg(long = "soa-nameserver", env = "SOA_NAMESERVER", default_value = "")]
    pub soa_nameserver: String,

    /// Email address field for the SOA record. Autogenerated if left blank.
    #[arg(long = "soa-email", env = "SOA_EMAIL", default_value = "")]
    pub soa_email: String,

    /// Refresh field for the SOA record.
    #[arg(long = "soa-refresh", env = "SOA_REFRESH", default_value_t = 1200)]
    pub soa_refresh: u32,

    /// Retry field for the SOA record.
    #[arg(long = "soa-retry", env = "SOA_RETRY", default_value_t = 180)]
    pub soa_retry: u32,

    /// Expire field for the SOA record.
    #[arg(long = "soa-expire", env = "SOA_EXPIRE", default_value_t = 86400)]
    pub soa_expire: u32,

    /// Negative caching TTL for the SOA record.
    #[arg(long = "soa-nxdomain-ttl", env = "SOA_NXDOMAIN_TTL", default_value_t = 60)]
    pub soa_nxdomain_ttl: u32,

    /// How long to wait for in-flight requests to drain on shutdown.
    #[arg(long = "drain-deadline-secs", env = "DRAIN_DEADLINE_SECS", default_value_t = 30)]
    pub drain_deadline_secs: u64,

    /// Log level: error, warn, info, debug, trace.
    #[arg(long = "log-level", env = "LOG_LEVEL", default_value = "info")]
    pub log_level: log::Level,
}

/// Configuration values derived from [`Args`], validated once at startup.
/// Immutable for the lifetime of the process; shared via `Arc` with every
/// handler, no synchronization required for reads.
#[derive(Debug, Clone)]
pub struct Config {
    pub domain: String,
    pub ttl: u32,
    pub soa: SoaConfig,
    pub zk_connect_string: String,
    pub listen: IpAddr,
    pub port: u16,
    pub drain_deadline_secs: u64,
}

impl Config {
    /// Build and validate a [`Config`] from parsed [`Args`]. Mirrors the two-step
    /// parse-then-validate shape used for the on-disk config in the nameserver:
    /// nothing past this call can fail for configuration reasons.
    pub fn from_args(args: Args) -> Result<Self, String> {
        let listen = IpAddr::from_str(&args.listen).map_err(|err| format!("invalid listen address: {}", err))?;

        let domain = args.domain.trim_matches('.').to_lowercase();
        if domain.is_empty() {
            return Err("domain must not be empty".to_string());
        }

        let ns1 = if args.soa_nameserver.is_empty() {
            system_fqdn()
        } else {
            args.soa_nameserver.clone()
        };
        let email = if args.soa_email.is_empty() {
            format!("root.{}", domain)
        } else {
            args.soa_email.clone()
        };

        let soa = SoaConfig {
            ttl: args.soa_ttl,
            ns1,
            email,
            refresh: args.soa_refresh,
            retry: args.soa_retry,
            expire: args.soa_expire,
            nxdomain_ttl: args.soa_nxdomain_ttl,
        };

        Ok(Config {
            domain,
            ttl: args.ttl,
            soa,
            zk_connect_string: args.zk,
            listen,
            port: args.port,
            drain_deadline_secs: args.drain_deadline_secs,
        })
    }
}

/// Best-effort system FQDN, used as the SOA nameserver default when none is configured.
fn system_fqdn() -> String {
    crate::hostutil::get_hostname().unwrap_or_else(|| "localhost".to_string())
}

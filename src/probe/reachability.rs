//! Network reachability probe.
//!
//! Reachability is a best-effort signal: a positive answer does not promise
//! that a later network operation will succeed.

use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

/// Answers whether outbound connectivity is available.
pub trait ReachabilityProbe {
    /// Whether the network currently looks reachable.
    fn is_reachable(&self) -> bool;
}

/// Reachability via TCP connects to well-known hosts.
///
/// Tries each target in order with a per-target timeout and reports
/// reachable on the first successful connection.
#[derive(Debug, Clone)]
pub struct TcpReachability {
    targets: Vec<String>,
    timeout: Duration,
}

impl TcpReachability {
    /// Default per-target connect timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

    /// Public DNS resolvers, tried to reduce false negatives.
    pub const DEFAULT_TARGETS: &'static [&'static str] = &[
        "1.1.1.1:443", // Cloudflare DNS
        "8.8.8.8:443", // Google DNS
        "9.9.9.9:443", // Quad9 DNS
    ];

    /// Create a probe with explicit targets (`host:port` socket addresses).
    pub fn new(targets: Vec<String>, timeout: Duration) -> Self {
        Self { targets, timeout }
    }

    /// The configured targets.
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// The per-target timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for TcpReachability {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_TARGETS.iter().map(|t| t.to_string()).collect(),
            Self::DEFAULT_TIMEOUT,
        )
    }
}

impl ReachabilityProbe for TcpReachability {
    fn is_reachable(&self) -> bool {
        for target in &self.targets {
            let addr: SocketAddr = match target.parse() {
                Ok(addr) => addr,
                Err(_) => {
                    tracing::warn!("Skipping unparsable reachability target '{}'", target);
                    continue;
                }
            };
            if TcpStream::connect_timeout(&addr, self.timeout).is_ok() {
                tracing::debug!("Network reachable via {}", addr);
                return true;
            }
        }
        tracing::debug!("No reachability target answered");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn default_has_targets_and_timeout() {
        let probe = TcpReachability::default();
        assert_eq!(probe.targets().len(), 3);
        assert_eq!(probe.timeout(), Duration::from_secs(2));
    }

    #[test]
    fn no_targets_is_unreachable() {
        let probe = TcpReachability::new(vec![], Duration::from_millis(50));
        assert!(!probe.is_reachable());
    }

    #[test]
    fn unparsable_targets_are_skipped() {
        let probe = TcpReachability::new(
            vec!["not an address".to_string()],
            Duration::from_millis(50),
        );
        assert!(!probe.is_reachable());
    }

    #[test]
    fn local_listener_is_reachable() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let probe = TcpReachability::new(
            vec!["garbage".to_string(), addr.to_string()],
            Duration::from_millis(500),
        );
        assert!(probe.is_reachable());
    }

    #[test]
    fn closed_port_is_unreachable() {
        // Bind then drop to get a port nothing listens on.
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let probe = TcpReachability::new(vec![addr.to_string()], Duration::from_millis(200));
        assert!(!probe.is_reachable());
    }
}

use openssl::x509::X509;
use std::fmt;
use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    pub host: String,
    pub port: u16,
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// A target together with the address the TCP connection was made to.
#[derive(Debug, Clone)]
pub struct Target {
    pub original: TargetSpec,
    pub resolved: SocketAddr,
}

/// Which certificates the handshake accepts as roots.
///
/// Hostname verification stays on regardless of the variant.
#[derive(Clone, Default)]
pub enum TrustAnchors {
    /// The platform default trust store.
    #[default]
    Platform,
    /// The platform store plus the given certificates.
    Certificates(Vec<X509>),
}

impl fmt::Debug for TrustAnchors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrustAnchors::Platform => write!(f, "Platform"),
            TrustAnchors::Certificates(certs) => write!(f, "Certificates({})", certs.len()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProbeConfig {
    pub trust: TrustAnchors,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsInfo {
    pub cert_issuer: String,
    pub cert_subject: String,
    pub cert_valid_from: String,
    pub cert_valid_to: String,
    pub cipher: String,
    pub version: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadStopReason {
    /// No further bytes were available when polled.
    #[default]
    Drained,
    ConnectionClosed,
}

#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub target: Target,
    pub tls: TlsInfo,
    pub received: Vec<u8>,
    pub reason: ReadStopReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_spec_brackets_ipv6_hosts() {
        let spec = TargetSpec {
            host: "::1".into(),
            port: 443,
        };
        assert_eq!(spec.to_string(), "[::1]:443");

        let spec = TargetSpec {
            host: "example.com".into(),
            port: 8443,
        };
        assert_eq!(spec.to_string(), "example.com:8443");
    }

    #[test]
    fn default_config_uses_platform_trust() {
        let cfg = ProbeConfig::default();
        assert!(matches!(cfg.trust, TrustAnchors::Platform));
    }
}

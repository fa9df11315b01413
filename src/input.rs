use crate::error::ProbeError;
use crate::model::TargetSpec;
use std::net::SocketAddr;
use tokio::net::lookup_host;

/// Resolves a target to every candidate address, in resolver order.
pub async fn resolve(spec: &TargetSpec) -> Result<Vec<SocketAddr>, ProbeError> {
    let addrs: Vec<SocketAddr> = lookup_host((spec.host.as_str(), spec.port))
        .await
        .map_err(|source| ProbeError::Connection {
            stage: "resolve",
            target: spec.clone(),
            source,
        })?
        .collect();

    if addrs.is_empty() {
        return Err(ProbeError::Connection {
            stage: "resolve",
            target: spec.clone(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no addresses found"),
        });
    }

    tracing::debug!(endpoint = %spec, count = addrs.len(), "resolved target");
    Ok(addrs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_literal_addresses() {
        let spec = TargetSpec {
            host: "127.0.0.1".into(),
            port: 8443,
        };
        let addrs = resolve(&spec).await.unwrap();
        assert_eq!(addrs, vec!["127.0.0.1:8443".parse::<SocketAddr>().unwrap()]);
    }

    #[tokio::test]
    async fn resolves_ipv6_literals() {
        let spec = TargetSpec {
            host: "::1".into(),
            port: 443,
        };
        let addrs = resolve(&spec).await.unwrap();
        assert_eq!(addrs[0].port(), 443);
        assert!(addrs[0].is_ipv6());
    }

    #[tokio::test]
    async fn unresolvable_host_is_a_connection_error() {
        let spec = TargetSpec {
            host: "name.invalid".into(),
            port: 443,
        };
        let err = resolve(&spec).await.unwrap_err();
        assert!(matches!(err, ProbeError::Connection { stage: "resolve", .. }));
    }
}

use crate::error::ProbeError;
use crate::model::{TargetSpec, TlsInfo, TrustAnchors};
use openssl::error::ErrorStack;
use openssl::ssl::{SslConnector, SslMethod, SslRef, SslVerifyMode};
use openssl::x509::{X509NameRef, X509VerifyResult};
use std::pin::Pin;
use tokio::net::TcpStream;
use tokio_openssl::SslStream;

/// Builds a verifying connector: default trust paths, peer verification, and
/// any extra roots from `trust`.
pub fn connector(trust: &TrustAnchors) -> Result<SslConnector, ErrorStack> {
    let mut builder = SslConnector::builder(SslMethod::tls())?;
    builder.set_verify(SslVerifyMode::PEER);
    if let TrustAnchors::Certificates(certs) = trust {
        for cert in certs {
            builder.cert_store_mut().add_cert(cert.clone())?;
        }
    }
    Ok(builder.build())
}

/// Runs the client handshake with HTTPS-style endpoint identification
/// against `spec.host`.
pub async fn handshake(
    connector: &SslConnector,
    tcp: TcpStream,
    spec: &TargetSpec,
) -> Result<SslStream<TcpStream>, ProbeError> {
    let failed = |message: String| ProbeError::Handshake {
        target: spec.clone(),
        message,
    };

    let ssl = connector
        .configure()
        .map_err(|err| failed(format!("failed to configure TLS connector: {err}")))?
        .verify_hostname(true)
        .into_ssl(&spec.host)
        .map_err(|err| failed(format!("failed to configure TLS SNI: {err}")))?;
    let mut stream = SslStream::new(ssl, tcp)
        .map_err(|err| failed(format!("failed to initialize TLS stream: {err}")))?;

    if let Err(err) = Pin::new(&mut stream).connect().await {
        let verify = stream.ssl().verify_result();
        let message = if verify == X509VerifyResult::OK {
            err.to_string()
        } else {
            format!("certificate verification failed: {}", verify.error_string())
        };
        return Err(failed(message));
    }

    Ok(stream)
}

/// Summarises the negotiated session and the peer's leaf certificate.
pub fn session_info(ssl: &SslRef) -> TlsInfo {
    let (cert_subject, cert_issuer, cert_valid_from, cert_valid_to) = ssl
        .peer_certificate()
        .map(|cert| {
            (
                format_x509_name(cert.subject_name()),
                format_x509_name(cert.issuer_name()),
                cert.not_before().to_string(),
                cert.not_after().to_string(),
            )
        })
        .unwrap_or_default();

    TlsInfo {
        version: ssl.version_str().to_string(),
        cipher: ssl
            .current_cipher()
            .map_or_else(String::new, |cipher| cipher.name().to_string()),
        cert_subject,
        cert_issuer,
        cert_valid_from,
        cert_valid_to,
    }
}

fn format_x509_name(name: &X509NameRef) -> String {
    name.entries()
        .filter_map(|entry| {
            let key = entry.object().nid().short_name().unwrap_or("UNKNOWN");
            let value = entry.data().to_string().ok()?;
            (!value.is_empty()).then(|| format!("{key}={value}"))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use openssl::nid::Nid;
    use openssl::x509::X509Name;

    #[test]
    fn formats_distinguished_names() {
        let mut builder = X509Name::builder().unwrap();
        builder.append_entry_by_nid(Nid::COMMONNAME, "localhost").unwrap();
        builder.append_entry_by_nid(Nid::ORGANIZATIONNAME, "Probe Test").unwrap();
        let name = builder.build();
        assert_eq!(format_x509_name(&name), "CN=localhost, O=Probe Test");
    }

    #[test]
    fn fresh_session_has_no_peer_details() {
        let ctx = connector(&TrustAnchors::Platform).unwrap();
        let ssl = ctx.configure().unwrap().into_ssl("localhost").unwrap();
        let info = session_info(&ssl);
        assert!(info.cert_subject.is_empty());
        assert!(info.cipher.is_empty());
    }

    #[test]
    fn builds_connectors_for_both_trust_modes() {
        assert!(connector(&TrustAnchors::Platform).is_ok());
        assert!(connector(&TrustAnchors::Certificates(Vec::new())).is_ok());
    }
}

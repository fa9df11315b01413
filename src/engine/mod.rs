pub mod reader;

use crate::error::ProbeError;
use crate::model::{ProbeConfig, ProbeReport, Target, TargetSpec};
use crate::output::DecimalWriter;
use crate::probe::{probe_bytes, tls};
use std::io::Write;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio_openssl::SslStream;
use tracing::{debug, info, instrument, warn};

/// Runs the probe sequence: connect, handshake, write, drain, close.
///
/// The TLS stream is owned by [`Engine::run`] alone, so every early return
/// drops it and closes the socket. Only the success path performs a TLS
/// close with `close_notify`.
pub struct Engine {
    cfg: ProbeConfig,
}

impl Engine {
    pub fn new(cfg: ProbeConfig) -> Self {
        Self { cfg }
    }

    #[instrument(skip(self, out), fields(endpoint = %spec))]
    pub async fn run<W: Write>(
        &self,
        spec: &TargetSpec,
        out: &mut DecimalWriter<W>,
    ) -> Result<ProbeReport, ProbeError> {
        let connector = tls::connector(&self.cfg.trust).map_err(|err| ProbeError::Handshake {
            target: spec.clone(),
            message: format!("failed to create TLS connector: {err}"),
        })?;

        let (tcp, target) = connect(spec).await?;
        let mut stream = tls::handshake(&connector, tcp, spec).await?;
        let tls_info = tls::session_info(stream.ssl());
        debug!(
            version = %tls_info.version,
            cipher = %tls_info.cipher,
            subject = %tls_info.cert_subject,
            issuer = %tls_info.cert_issuer,
            "handshake complete"
        );

        stream
            .write_all(probe_bytes())
            .await
            .map_err(|err| ProbeError::io("write probe byte", err))?;
        stream
            .flush()
            .await
            .map_err(|err| ProbeError::io("flush probe byte", err))?;

        let result = reader::drain(&mut stream, |byte| out.emit(byte))
            .map_err(|err| ProbeError::io("drain response", err))?;
        debug!(bytes = result.bytes.len(), reason = ?result.reason, "drained response");

        close(stream).await?;
        info!(addr = %target.resolved, received = result.bytes.len(), "probe complete");

        Ok(ProbeReport {
            target,
            tls: tls_info,
            received: result.bytes,
            reason: result.reason,
        })
    }
}

/// Connects to the first resolved address that accepts.
async fn connect(spec: &TargetSpec) -> Result<(TcpStream, Target), ProbeError> {
    let mut last_err = None;
    for addr in crate::input::resolve(spec).await? {
        match TcpStream::connect(addr).await {
            Ok(stream) => {
                debug!(%addr, "connected");
                let target = Target {
                    original: spec.clone(),
                    resolved: addr,
                };
                return Ok((stream, target));
            }
            Err(err) => {
                warn!(%addr, error = %err, "connect failed");
                last_err = Some(err);
            }
        }
    }

    Err(ProbeError::Connection {
        stage: "connect to",
        target: spec.clone(),
        source: last_err
            .unwrap_or_else(|| std::io::Error::from(std::io::ErrorKind::AddrNotAvailable)),
    })
}

async fn close(mut stream: SslStream<TcpStream>) -> Result<(), ProbeError> {
    stream
        .shutdown()
        .await
        .map_err(|err| ProbeError::io("close connection", err))
}

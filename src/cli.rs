use crate::error::ProbeError;
use crate::model::TargetSpec;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about = "One-shot TLS probe", long_about = None)]
pub struct Cli {
    /// Host to connect to; the certificate must be valid for it
    #[arg(value_name = "HOST")]
    pub host: String,

    /// Port to connect to
    #[arg(value_name = "PORT", value_parser = clap::value_parser!(u16).range(1..))]
    pub port: u16,
}

impl Cli {
    pub fn into_target(self) -> Result<TargetSpec, ProbeError> {
        let host = self
            .host
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']');
        if host.is_empty() {
            return Err(ProbeError::Argument("host must not be empty".into()));
        }

        Ok(TargetSpec {
            host: host.to_string(),
            port: self.port,
        })
    }
}

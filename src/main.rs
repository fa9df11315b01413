use clap::Parser;
use std::process::ExitCode;
use tls_probe::cli::Cli;
use tls_probe::engine::Engine;
use tls_probe::error::ProbeError;
use tls_probe::model::ProbeConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            err.exit_code()
        }
    }
}

async fn run(cli: Cli) -> Result<(), ProbeError> {
    let target = cli.into_target()?;
    let engine = Engine::new(ProbeConfig::default());

    let mut out = tls_probe::output::stdout();
    engine.run(&target, &mut out).await?;
    out.finish()
        .map_err(|err| ProbeError::io("flush stdout", err))?;

    Ok(())
}

use anyhow::Result;
use bpjs_cli::{load_settings, run, run_shell, Cli, Command, ReqwestTransport};
use bpjs_core::{BpjsApi, Session};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url.clone() {
        settings.base_url = base_url;
    }

    let filter = EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    info!(base_url = %settings.base_url, "using BPJS proxy");

    let transport = ReqwestTransport::new()?;
    let session = Session::new(BpjsApi::new(&settings.base_url, transport));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = match cli.command {
        Command::Shell => {
            let stdin = std::io::stdin();
            run_shell(&session, stdin.lock(), &mut out).await
        }
        command => run(&session, command, &mut out).await,
    };

    if let Err(err) = &result {
        error!(error = %err, "command failed");
    }
    result
}

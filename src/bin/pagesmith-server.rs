use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Serves published landing pages over HTTP.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct ServerArgs {
    /// Listen address (default: $PAGESMITH_ADDR or 127.0.0.1:8080).
    #[arg(long)]
    addr: Option<SocketAddr>,

    /// Directory holding the JSON documents (default: $PAGESMITH_DATA_DIR or `pagesmith-data`).
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    pagesmith::logging::init("info,tower_http=debug")?;

    let args = ServerArgs::parse();
    tracing::info!(?args, "starting pagesmith-server");

    let addr = pagesmith::config::listen_addr(args.addr)?;
    let data_dir = pagesmith::config::data_dir(args.data_dir);
    tracing::info!(data_dir = %data_dir.display(), "serving pages");
    let app = pagesmith::server::router(pagesmith::config::open_storage(data_dir));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| anyhow::anyhow!("bind {addr}: {err}"))?;
    tracing::info!(addr = %addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

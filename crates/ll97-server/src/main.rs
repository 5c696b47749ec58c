use anyhow::Result;
use axum::serve;
use clap::Parser;
use ll97_io::Ll97Config;
use ll97_server::{build_router, AppState};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Serve the LL97 emissions calculator over HTTP", long_about = None)]
struct Opt {
    /// Configuration file (defaults to ~/.ll97/config.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Address to bind
    #[arg(long, env = "LL97_ADDR")]
    addr: Option<SocketAddr>,
    /// Port to bind, overriding the port of --addr
    #[arg(long, env = "PORT")]
    port: Option<u16>,
    /// Directory of front-end assets
    #[arg(long)]
    static_dir: Option<PathBuf>,
    /// Also write every generated report into this directory
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Emissions factor table (JSON)
    #[arg(long)]
    emissions_factors: Option<PathBuf>,
    /// Limit factor table (JSON)
    #[arg(long)]
    limit_factors: Option<PathBuf>,
    /// Penalty in dollars per tCO2e of overage
    #[arg(long)]
    penalty_rate: Option<f64>,
}

impl Opt {
    fn apply(self, mut config: Ll97Config) -> Ll97Config {
        if let Some(addr) = self.addr {
            config.server.addr = addr;
        }
        if let Some(port) = self.port {
            config.server.addr.set_port(port);
        }
        if let Some(dir) = self.static_dir {
            config.server.static_dir = dir;
        }
        if self.output_dir.is_some() {
            config.server.output_dir = self.output_dir;
        }
        if self.emissions_factors.is_some() {
            config.data.emissions_factors = self.emissions_factors;
        }
        if self.limit_factors.is_some() {
            config.data.limit_factors = self.limit_factors;
        }
        if let Some(rate) = self.penalty_rate {
            config.calc.penalty_rate = rate;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let opts = Opt::parse();
    let config = Ll97Config::resolve(opts.config.as_deref())?;
    let config = opts.apply(config);

    let state = AppState::from_config(&config)?;
    for issue in state.tables.diagnostics().issues {
        warn!("factor tables: {issue}");
    }
    info!(
        addr = %config.server.addr,
        periods = ?state.tables.periods(),
        static_dir = %state.static_root.display(),
        "serving LL97 calculator"
    );

    let app = build_router(Arc::new(state));
    let listener = TcpListener::bind(config.server.addr).await?;
    serve(listener, app).await?;

    Ok(())
}

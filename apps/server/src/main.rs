use anyhow::Context;
use roster_kernel::config::load_config;
use roster_kernel::domain::config::ApiConfig;
use roster_server::{Server, init_logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional config path as the first argument; falls back to ./roster.toml when present.
    let path = std::env::args_os().nth(1);
    let cfg: ApiConfig = load_config(path).context("Critical: Configuration is malformed")?;

    let _log = init_logging(env!("CARGO_PKG_NAME"), &cfg.logging)?;

    Server::builder().config(cfg).build()?.run().await
}

//! # Roster Server
//!
//! HTTP front end for the in-memory character registry, built on `Axum`.
//!
//! ## Example
//! ```no_run
//! use roster_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder()
//!         .port(3000)
//!         .build()?
//!         .run()
//!         .await
//! }
//! ```

mod logging;
mod router;

pub use logging::init_logging;
pub use router::App;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use axum_server::Handle;
use roster_kernel::domain::config::ApiConfig;
use roster_kernel::server::ApiState;
use roster_kernel::store::CharacterStore;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::signal;
use tracing::{error, info};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// Configures a [`Server`] before its state is assembled.
#[must_use = "call .build() to assemble the server"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: ApiConfig,
    characters: Option<CharacterStore>,
}

impl ServerBuilder {
    /// Replaces the whole configuration.
    pub fn config(mut self, cfg: ApiConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    pub fn address(mut self, address: IpAddr) -> Self {
        self.cfg.server.address = address;
        self
    }

    /// Serves an existing store instead of one seeded from `[characters]`.
    pub fn characters(mut self, store: CharacterStore) -> Self {
        self.characters = Some(store);
        self
    }

    /// Consumes the builder and assembles the application state.
    ///
    /// Unless a store was injected, the roster is seeded from the
    /// `[characters]` section of the configuration.
    ///
    /// # Errors
    /// Returns an error if the application state cannot be finalized.
    pub fn build(self) -> Result<Server> {
        let address = SocketAddr::new(self.cfg.server.address, self.cfg.server.port);
        info!(address = %address, "Initializing server");

        let mut builder = ApiState::builder().config(self.cfg);
        if let Some(store) = self.characters {
            builder = builder.characters(store);
        }
        let state = builder.build().context("Failed to finalize API state")?;

        info!(characters = state.characters.len(), "Roster loaded");
        Ok(Server { state })
    }
}

/// Assembled server, ready to bind.
#[must_use = "call .run().await to serve requests"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// Builds the complete router without binding a socket.
    #[must_use]
    pub fn app(&self) -> App {
        router::init(self.state.clone())
    }

    /// Binds the configured address and serves until SIGINT/SIGTERM.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the configured address.
    pub async fn run(self) -> Result<()> {
        let address = SocketAddr::new(self.state.config.server.address, self.state.config.server.port);
        let app = router::init(self.state);

        let handle = Handle::<SocketAddr>::new();
        let shutdown_handle = handle.clone();

        tokio::spawn(async move {
            match shutdown_signal().await {
                Ok(()) => {
                    info!(grace = ?SHUTDOWN_GRACE, "Draining connections");
                    shutdown_handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
                }
                Err(e) => error!("Shutdown listener failed: {e:#}"),
            }
        });

        info!(%address, "Listening");

        axum_server::bind(address)
            .handle(handle)
            .serve(ServiceExt::<Request>::into_make_service(app))
            .await
            .with_context(|| format!("Server on {address} stopped with an error"))?;

        info!("Server stopped");
        Ok(())
    }

    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }
}

/// Resolves on SIGINT (Ctrl+C) or, on Unix, SIGTERM.
async fn shutdown_signal() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal as unix_signal};

        let mut sigterm =
            unix_signal(SignalKind::terminate()).context("Cannot listen for SIGTERM")?;
        tokio::select! {
            res = signal::ctrl_c() => res.context("Cannot listen for Ctrl+C")?,
            _ = sigterm.recv() => {}
        }
    }

    #[cfg(not(unix))]
    signal::ctrl_c().await.context("Cannot listen for Ctrl+C")?;

    Ok(())
}

//! # Study Dashboard Server
//!
//! A web server built on `Axum`, `SurrealDB`, and a type-safe event bus.
//!
//! ## Example
//! ```no_run
//! use sdash_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder()
//!         .port(5000)
//!         .build()
//!         .await?
//!         .run()
//!         .await
//! }
//! ```

pub mod router;

use anyhow::{Context, Result, anyhow};
use axum_server::Handle;
use sdash::domain::config::{ApiConfig, SslConfig};
use sdash::kernel::server::ApiState;
use sdash_database::Database;
use sdash_event_bus::EventBus;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// A fluent builder for configuring and initializing the [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: ApiConfig,
}

impl ServerBuilder {
    /// Set up the server's configuration.
    pub fn config(mut self, cfg: ApiConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    /// Consumes the builder and initializes the server.
    ///
    /// Checks the TLS material, connects to the database (seeding demo data
    /// when `database.seed_demo` is set), wires the event bus, and registers
    /// every feature slice into the shared [`ApiState`].
    ///
    /// # Errors
    /// Returns an error if:
    /// * Database connection fails (unreachable host, invalid credentials)
    /// * SSL certificate/key files cannot be read
    /// * A feature slice fails to initialize
    pub async fn build(self) -> Result<Server> {
        if let Some(ssl) = &self.cfg.server.ssl {
            check_tls_material(ssl)?;
        }

        let address = SocketAddr::new(self.cfg.server.address, self.cfg.server.port);
        info!(%address, "Initializing server");

        let db = self.connect_database().await?;

        if self.cfg.database.seed_demo {
            let created =
                sdash_database::seed::run(&db).await.context("Failed to seed demo data")?;
            if created {
                info!("Demo data seeded");
            }
        }

        let events = EventBus::new();
        let slices = sdash::init(&self.cfg, &db, &events)
            .map_err(|e| anyhow!("Platform bootstrap failed: {e}"))?;

        let mut state = ApiState::builder().config(self.cfg).db(db).events(events);
        for slice in slices {
            state = state.register_slice(slice);
        }
        let state = state.build().context("Failed to finalize API state registry")?;

        Ok(Server { state })
    }

    async fn connect_database(&self) -> Result<Database> {
        let db_cfg = &self.cfg.database;
        let mut builder =
            Database::builder().url(&db_cfg.url).session(&db_cfg.namespace, &db_cfg.database);

        if let Some(creds) = &db_cfg.credentials {
            builder = builder.auth(&creds.username, &creds.password);
        }

        builder.init().await.context("Failed to establish database connection")
    }
}

fn check_tls_material(ssl: &SslConfig) -> Result<()> {
    if !ssl.cert.exists() {
        anyhow::bail!("SSL certificate not found at: {}", ssl.cert.display());
    }
    if !ssl.key.exists() {
        anyhow::bail!("SSL key not found at: {}", ssl.key.display());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let metadata = ssl.key.metadata()?;
        if metadata.permissions().mode() & 0o077 != 0 {
            warn!(
                "SECURITY: SSL Private Key {} has insecure permissions (should be 600)",
                ssl.key.display()
            );
        }
    }
    Ok(())
}

/// A fully initialized server instance ready to run.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
}

impl Server {
    /// Returns a new [`ServerBuilder`] to configure the server.
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// Serves the API until a shutdown signal arrives, then drains
    /// connections for up to 30 seconds.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the configured address
    /// or if SSL/TLS setup fails.
    pub async fn run(self) -> Result<()> {
        let cfg = self.state.config.clone();
        let address = SocketAddr::new(cfg.server.address, cfg.server.port);
        info!(%address, ssl = cfg.server.ssl.is_some(), "Starting server");

        let app = router::init(self.state);
        let service = app.into_make_service();

        let handle = Handle::<SocketAddr>::new();
        spawn_shutdown_listener(handle.clone());

        match &cfg.server.ssl {
            Some(ssl) => {
                info!("Listening on https://{address}");
                let tls_config =
                    axum_server::tls_rustls::RustlsConfig::from_pem_file(&ssl.cert, &ssl.key)
                        .await
                        .context("Failed to load SSL/TLS certificates")?;

                axum_server::bind_rustls(address, tls_config)
                    .handle(handle)
                    .serve(service)
                    .await
                    .context("HTTPS server failed")?;
            }
            None => {
                info!("Listening on http://{address}");
                axum_server::bind(address)
                    .handle(handle)
                    .serve(service)
                    .await
                    .context("HTTP server failed")?;
            }
        }

        info!("Server shutdown complete");
        Ok(())
    }

    /// Returns a reference to the application state.
    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }
}

fn spawn_shutdown_listener(handle: Handle<SocketAddr>) {
    tokio::spawn(async move {
        if let Err(e) = shutdown_signal().await {
            error!("Error while waiting for shutdown signal: {e}");
            return;
        }
        info!("Shutdown signal received, starting graceful shutdown...");
        handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
    });
}

/// Resolves on SIGINT (Ctrl+C) or SIGTERM.
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => res.context("Ctrl+C signal received")?,
        res = terminate => res.context("SIGTERM signal received")?,
    }

    Ok(())
}

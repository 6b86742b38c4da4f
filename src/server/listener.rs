use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;
use crate::resource::{FileHandler, ResourceStore};

/// Build the request handler described by `cfg`.
pub fn file_handler(cfg: &Config) -> FileHandler {
    FileHandler::new(ResourceStore::new(cfg.storage.root.clone()))
        .with_max_body_bytes(cfg.server.max_body_bytes)
        .with_read_timeout(cfg.read_timeout())
}

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!(
        "Listening on {} serving {}",
        cfg.server.listen_addr,
        cfg.storage.root.display()
    );

    serve(listener, cfg).await
}

/// Accept connections forever, serving at most `max_connections` at once.
///
/// A permit is taken before accepting, so excess clients wait in the
/// kernel backlog rather than in memory.
pub async fn serve(listener: TcpListener, cfg: &Config) -> anyhow::Result<()> {
    let handler = Arc::new(file_handler(cfg));
    let limits = cfg.connection_limits();
    let workers = Arc::new(Semaphore::new(cfg.server.max_connections));

    loop {
        let permit = workers.clone().acquire_owned().await?;

        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to accept connection");
                tokio::time::sleep(Duration::from_millis(100)).await;
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let handler = handler.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, handler, limits);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
            drop(permit);
        });
    }
}

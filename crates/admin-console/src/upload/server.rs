use crate::config::UploadConfig;
use crate::upload::handler::{upload_avatar, UploadState};
use crate::upload::DiskStorage;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builds the upload router. The default request body limit is disabled.
pub fn router(state: UploadState) -> Router {
    Router::new()
        .route("/upload-avatar", post(upload_avatar))
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}

/// The single-endpoint upload backend.
pub struct UploadServer {
    pub addr: SocketAddr,
    /// The bound listener, kept alive to prevent port race conditions.
    /// Populated by try_bind(), consumed by run().
    listener: Option<TcpListener>,
    state: UploadState,
}

impl UploadServer {
    pub fn new(config: &UploadConfig) -> Self {
        let storage = DiskStorage::new(config.dir.clone(), config.naming);
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)), // Will be determined at bind time
            listener: None,
            state: UploadState {
                storage: Arc::new(storage),
                field_name: Arc::from(config.field_name.as_str()),
            },
        }
    }

    /// Binds `bind_addr` and returns the actual address (port `0` picks a free one).
    pub async fn try_bind(&mut self, bind_addr: &str) -> io::Result<SocketAddr> {
        let listener = TcpListener::bind(bind_addr).await?;
        let actual_addr = listener.local_addr()?;
        self.addr = actual_addr;
        self.listener = Some(listener);
        tracing::info!("Upload server bound to {}", actual_addr);
        Ok(actual_addr)
    }

    /// Run the upload server until `shutdown` resolves.
    ///
    /// Consumes self to take ownership of the pre-bound listener.
    /// Call try_bind() before run().
    pub async fn run(self, shutdown: impl Future<Output = ()> + Send + 'static) -> io::Result<()> {
        let listener = self
            .listener
            .ok_or_else(|| io::Error::other("try_bind() must be called before run()"))?;

        tracing::info!(
            dir = %self.state.storage.dir().display(),
            field = %self.state.field_name,
            "Starting upload server on {}",
            self.addr
        );

        axum::serve(listener, router(self.state))
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Upload server stopped");
        Ok(())
    }
}

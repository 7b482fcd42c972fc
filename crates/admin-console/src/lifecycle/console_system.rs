use crate::config::ConsoleConfig;
use crate::model::{Product, User};
use crate::notifications::Notifier;
use crate::remote::{HttpResourceClient, UploadClient};
use crate::screens::{DashboardScreen, ProductsScreen, ProfileScreen, UsersScreen};
use crate::upload::UploadServer;
use store_framework::{CollectionStore, StoreHandle};
use tracing::{error, info};

/// The application root of the console.
///
/// `ConsoleSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the collection stores
/// - **Dependency Wiring**: Handing every screen the store of its record kind, the
///   matching remote client and the shared notifier
/// - **Resource Coordination**: One `reqwest::Client` (and its timeout) for all calls
///
/// # Architecture
///
/// There is exactly one store per record kind. The Users and Profile screens both edit
/// users through the same [`StoreHandle<User>`], the Products and Dashboard screens share
/// the product store.
///
/// # Example
///
/// ```ignore
/// let system = ConsoleSystem::new(ConsoleConfig::default())?;
///
/// let mut users = system.users_screen();
/// users.load().await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct ConsoleSystem {
    /// Store handle for the `/users` collection
    pub users: StoreHandle<User>,

    /// Store handle for the `/products` collection
    pub products: StoreHandle<Product>,

    pub notifier: Notifier,

    config: ConsoleConfig,
    http: reqwest::Client,

    /// Task handles for all running stores (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ConsoleSystem {
    /// Spawns one [`CollectionStore`] per record kind and builds the shared HTTP client.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: ConsoleConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.api.timeout())
            .build()?;

        // Buffer size of 32 means a store can queue up to 32 pending requests
        let (user_store, users) = CollectionStore::<User>::new(32);
        let user_handle = tokio::spawn(user_store.run());

        let (product_store, products) = CollectionStore::<Product>::new(32);
        let product_handle = tokio::spawn(product_store.run());

        info!(base_url = %config.api.base_url, "Console system started");

        Ok(Self {
            users,
            products,
            notifier: Notifier::default(),
            config,
            http,
            handles: vec![user_handle, product_handle],
        })
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    fn user_client(&self) -> HttpResourceClient<User> {
        HttpResourceClient::new(self.http.clone(), self.config.api.base_url.as_str())
    }

    fn product_client(&self) -> HttpResourceClient<Product> {
        HttpResourceClient::new(self.http.clone(), self.config.api.base_url.as_str())
    }

    pub fn upload_client(&self) -> UploadClient {
        UploadClient::new(
            self.http.clone(),
            &self.config.upload.server_url,
            self.config.upload.field_name.as_str(),
        )
    }

    pub fn users_screen(&self) -> UsersScreen {
        UsersScreen::new(self.users.clone(), self.user_client(), self.notifier.clone())
    }

    pub fn products_screen(&self) -> ProductsScreen {
        ProductsScreen::new(
            self.products.clone(),
            self.product_client(),
            self.notifier.clone(),
        )
    }

    pub fn profile_screen(&self) -> ProfileScreen {
        ProfileScreen::new(
            self.users.clone(),
            self.user_client(),
            self.upload_client(),
            self.notifier.clone(),
        )
    }

    pub fn dashboard_screen(&self) -> DashboardScreen {
        DashboardScreen::new(
            self.products.clone(),
            self.product_client(),
            self.notifier.clone(),
        )
    }

    /// An unbound upload backend configured from `[upload]`.
    pub fn upload_server(&self) -> UploadServer {
        UploadServer::new(&self.config.upload)
    }

    /// Gracefully shuts down every store.
    ///
    /// Screens may still hold store handles, so each store gets an explicit `Shutdown`
    /// request instead of waiting for its channel to close.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all stores shut down cleanly
    /// - `Err(String)` if any store task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down console system...");

        // A store that is already gone has nothing left to stop.
        let _ = self.users.shutdown().await;
        let _ = self.products.shutdown().await;

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("Console system shutdown complete.");
        Ok(())
    }
}

use crate::model::Product;
use crate::notifications::Notifier;
use crate::remote::HttpResourceClient;
use store_framework::{CollectionSync, RemoteCollection, StoreHandle, SyncError};
use tracing::instrument;

/// One tile of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelShare {
    pub level: String,
    pub count: usize,
    /// Percent of all products, `0.0..=100.0`.
    pub share: f64,
}

/// Groups products by `level`, in order of first appearance.
pub fn level_breakdown(products: &[Product]) -> Vec<LevelShare> {
    let mut tiles: Vec<LevelShare> = Vec::new();
    for product in products {
        match tiles.iter_mut().find(|tile| tile.level == product.level) {
            Some(tile) => tile.count += 1,
            None => tiles.push(LevelShare {
                level: product.level.clone(),
                count: 1,
                share: 0.0,
            }),
        }
    }
    let total = products.len() as f64;
    for tile in &mut tiles {
        tile.share = tile.count as f64 / total * 100.0;
    }
    tiles
}

/// Read-only product overview.
pub struct DashboardScreen<R: RemoteCollection<Product> = HttpResourceClient<Product>> {
    sync: CollectionSync<Product, R>,
    notifier: Notifier,
}

impl<R: RemoteCollection<Product>> DashboardScreen<R> {
    pub fn new(store: StoreHandle<Product>, remote: R, notifier: Notifier) -> Self {
        Self {
            sync: CollectionSync::new(store, remote),
            notifier,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.sync.store().snapshot().loading
    }

    /// Reloads products and returns the fresh breakdown.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<Vec<LevelShare>, SyncError<R::Error>> {
        if let Err(e) = self.sync.load().await {
            self.notifier.error("Failed to fetch data");
            return Err(e);
        }
        Ok(self.breakdown())
    }

    /// Breakdown of whatever the product store holds right now.
    pub fn breakdown(&self) -> Vec<LevelShare> {
        level_breakdown(&self.sync.store().snapshot().records)
    }
}

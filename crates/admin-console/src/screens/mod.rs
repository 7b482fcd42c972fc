//! # Screens
//!
//! Headless screen state for the console. Each screen wraps the framework's
//! [`CollectionSync`](store_framework::CollectionSync) for its record kind and reports the
//! outcome of every remote call through the shared
//! [`Notifier`](crate::notifications::Notifier). Rendering is left to the embedding UI.
//!
//! - [`UsersScreen`] / [`ProductsScreen`] - filterable list with create/edit/delete
//! - [`ProfileScreen`] - user editing plus avatar upload
//! - [`DashboardScreen`] - product count per level

pub mod collection;
pub mod dashboard;
pub mod profile;

pub use collection::{CollectionScreen, ProductsScreen, UsersScreen};
pub use dashboard::{level_breakdown, DashboardScreen, LevelShare};
pub use profile::{ProfileError, ProfileScreen};

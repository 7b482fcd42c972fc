//! # Admin Console
//!
//! The Users / Products / Profile / Dashboard screens of the admin console, built on
//! [`store_framework`], plus the small upload backend they talk to.
//!
//! ## Core Components
//!
//! - **[model]**: Closed record shapes ([`User`](model::User), [`Product`](model::Product))
//!   and their drafts, implementing [`StoreEntity`](store_framework::StoreEntity).
//! - **[remote]**: [`HttpResourceClient`](remote::HttpResourceClient) for the collection
//!   endpoints and [`UploadClient`](remote::UploadClient) for avatar uploads.
//! - **[screens]**: Headless screen state driving the confirm-then-mutate protocol.
//! - **[upload]**: The `POST /upload-avatar` backend (axum) and its disk storage.
//! - **[lifecycle]**: [`ConsoleSystem`](lifecycle::ConsoleSystem), which owns one store per
//!   record kind and builds the screens.
//! - **[config]**: `admin-console.toml` loading.
//!
//! ## Testing
//!
//! Screens are tested against [`store_framework::mock::MockRemote`]; the HTTP clients and
//! the upload backend against in-process axum servers.

pub mod config;
pub mod lifecycle;
pub mod model;
pub mod notifications;
pub mod remote;
pub mod screens;
pub mod upload;

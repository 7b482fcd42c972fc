//! # Remote Clients
//!
//! Network-facing implementations: [`HttpResourceClient`] for the collections and
//! [`UploadClient`] for the upload endpoint. Both share one `reqwest::Client` (and its
//! timeout) built by [`ConsoleSystem`](crate::lifecycle::ConsoleSystem).

pub mod http_client;
pub mod upload_client;

pub use http_client::{FailureCause, HttpResourceClient, RequestFailed};
pub use upload_client::{StoredReference, UploadClient, UploadFile};

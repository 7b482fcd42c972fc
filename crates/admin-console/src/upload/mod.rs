//! # Upload Backend
//!
//! The only server-side piece of the console: `POST /upload-avatar` takes one file from
//! a `multipart/form-data` body, writes it to disk under a generated name and answers
//! with the stored reference.
//!
//! ```text
//! 200 {"message": "...", "storedReference": "avatar-<uuid>.png",
//!      "file": {"fieldName": "avatar", "originalName": "me.png", "fileName": "...", "size": 1234}}
//! 400 "No file selected"                          (no file in the configured field)
//! 400 "Expected a multipart/form-data request"    (anything else)
//! ```
//!
//! Associating the reference with a record is the caller's job; see
//! [`ProfileScreen::upload_avatar`](crate::screens::ProfileScreen::upload_avatar).

pub mod error;
pub mod handler;
pub mod server;
pub mod storage;

pub use error::UploadError;
pub use handler::{UploadResponse, UploadState};
pub use server::{router, UploadServer};
pub use storage::{DiskStorage, NamingPolicy, StoredFile};

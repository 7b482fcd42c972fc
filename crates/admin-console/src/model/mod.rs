//! # Domain Model
//!
//! Closed record shapes for the two remote collections, their drafts, and the
//! [`ResourceKind`] / [`Operation`] vocabulary used in errors and notifications.

pub mod kind;
pub mod product;
pub mod user;

pub use kind::*;
pub use product::*;
pub use user::*;

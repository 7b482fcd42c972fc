//! # System Lifecycle & Orchestration
//!
//! This module is the console's application root: it creates the collection stores,
//! wires them to the screens and shuts them down again.
//!
//! ## The Explicit Store Object
//!
//! Screens never create their own stores. The root owns one store per record kind and
//! passes clones of its [`StoreHandle`](store_framework::StoreHandle) down, so two screens
//! showing users always agree on what the user list is:
//!
//! ```text
//!                    ┌──────────────── ConsoleSystem ────────────────┐
//!                    │  CollectionStore<User>   CollectionStore<Product>
//!                    └───────┬──────────┬───────────────┬──────────┬─┘
//!                            │          │               │          │
//!                      UsersScreen  ProfileScreen  ProductsScreen  DashboardScreen
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Send `Shutdown`** to every store (screens may still hold handles)
//! 2. **Stores exit** their loop and log their final size
//! 3. **Await completion** of every store task
//!
//! Requests made through a leftover handle afterwards fail with
//! [`StoreError::StoreClosed`](store_framework::StoreError::StoreClosed).

pub mod console_system;

pub use console_system::*;

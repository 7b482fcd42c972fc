//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the structured logger used by every binary built on the
//! framework.
//!
//! ## What Gets Traced
//!
//! - **Store Lifecycle**: startup, shutdown and final size (`entity_type`, `size`)
//! - **Confirmed Mutations**: Created / Updated / Deleted / Loaded with `%id` and `revision`
//! - **Stale Completions**: superseded or post-delete updates at `warn`
//! - **Invariant Violations**: duplicate ids and missing records at `error`
//! - **Sync Calls**: `#[instrument]` spans around `load`, `submit` and `delete`
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run      # one line per confirmed mutation
//! RUST_LOG=debug cargo run     # tickets, loading flag, payloads
//! RUST_LOG=store_framework=debug,admin_console=info cargo run
//! ```
//!
//! With `RUST_LOG=info` a create-then-delete on the users screen reads:
//!
//! ```text
//! INFO Store started entity_type="User"
//! INFO submit: Created entity_type="User" id=7 size=3
//! INFO delete{id=UserId(7)}: Deleted entity_type="User" id=7 size=2
//! ```

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type already says which store spoke
        .compact()
        .init();
}

//! JSON REST API for the Loja Social alert engine.
//!
//! Exposes an axum [`Router`] backed by any [`loja_core::store::AlertStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", loja_api::alert_router(store.clone()))
//! ```

pub mod alerts;
pub mod error;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use loja_core::store::AlertStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn alert_router<S>(store: Arc<S>) -> Router<()>
where
  S: AlertStore + 'static,
{
  Router::new()
    .route("/alerts", get(alerts::list_active::<S>))
    .route("/alerts/generate", post(alerts::generate::<S>))
    .route("/alerts/{id}/resolve", post(alerts::resolve_one::<S>))
    .with_state(store)
}

//! The `AlertStore` trait.
//!
//! Implemented by storage backends (e.g. `loja-store-sqlite`). The engine
//! and the API layer depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  alert::{Alert, Candidate},
  snapshot::{DeliverySnapshot, ProductSnapshot},
};

/// Abstraction over the document store behind the alert engine.
///
/// Snapshot reads are full scans; no pagination contract is assumed.
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait AlertStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Snapshots ─────────────────────────────────────────────────────────

  /// All product snapshots, in unspecified order.
  fn list_products(
    &self,
  ) -> impl Future<Output = Result<Vec<ProductSnapshot>, Self::Error>> + Send + '_;

  /// All delivery snapshots, in unspecified order.
  fn list_deliveries(
    &self,
  ) -> impl Future<Output = Result<Vec<DeliverySnapshot>, Self::Error>> + Send + '_;

  // ── Alerts ────────────────────────────────────────────────────────────

  /// Admit a candidate: persist it as a new unresolved alert unless an
  /// unresolved alert with the same `(kind, entity_id)` fingerprint already
  /// exists. Returns the stored alert, or `None` if suppressed.
  ///
  /// Implementations must make the absence check and the insert a single
  /// atomic unit (e.g. a uniqueness constraint over active alerts), so two
  /// concurrent runs cannot both insert for the same fingerprint.
  fn create_if_absent(
    &self,
    candidate: Candidate,
  ) -> impl Future<Output = Result<Option<Alert>, Self::Error>> + Send + '_;

  /// All alerts with `resolved == false`, newest first.
  fn active_alerts(
    &self,
  ) -> impl Future<Output = Result<Vec<Alert>, Self::Error>> + Send + '_;

  /// Mark an alert resolved and stamp `resolved_at`.
  ///
  /// Errors if the alert does not exist. Re-resolving an already-resolved
  /// alert succeeds and only rewrites `resolved_at`; `resolved` never
  /// reverts to false.
  fn resolve(
    &self,
    alert_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

/// Forwarding impl so shared handles can be used wherever a store is
/// expected (the API layer holds its backend in an `Arc`).
impl<S: AlertStore> AlertStore for std::sync::Arc<S> {
  type Error = S::Error;

  fn list_products(
    &self,
  ) -> impl Future<Output = Result<Vec<ProductSnapshot>, Self::Error>> + Send + '_
  {
    self.as_ref().list_products()
  }

  fn list_deliveries(
    &self,
  ) -> impl Future<Output = Result<Vec<DeliverySnapshot>, Self::Error>> + Send + '_
  {
    self.as_ref().list_deliveries()
  }

  fn create_if_absent(
    &self,
    candidate: Candidate,
  ) -> impl Future<Output = Result<Option<Alert>, Self::Error>> + Send + '_ {
    self.as_ref().create_if_absent(candidate)
  }

  fn active_alerts(
    &self,
  ) -> impl Future<Output = Result<Vec<Alert>, Self::Error>> + Send + '_ {
    self.as_ref().active_alerts()
  }

  fn resolve(
    &self,
    alert_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_ {
    self.as_ref().resolve(alert_id)
  }
}

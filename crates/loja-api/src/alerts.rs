//! Handlers for `/alerts` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/alerts` | Active (unresolved) alerts, newest first |
//! | `POST` | `/alerts/generate` | Body: [`RuleConfig`] (all fields optional); runs the evaluators |
//! | `POST` | `/alerts/{id}/resolve` | Marks the alert resolved |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use loja_core::{
  alert::Alert,
  engine::{AlertEngine, GenerationReport, RuleConfig},
  store::AlertStore,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /alerts`
pub async fn list_active<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Alert>>, ApiError>
where
  S: AlertStore,
{
  let alerts = AlertEngine::new(store)
    .active()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(alerts))
}

// ─── Generate ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
  /// Total alerts created across the three evaluators.
  pub created: usize,
  pub report:  GenerationReport,
}

/// `POST /alerts/generate` — body is a partial [`RuleConfig`] (`{}` at
/// minimum); omitted fields take their defaults (5 / 7 / 2 / off).
pub async fn generate<S>(
  State(store): State<Arc<S>>,
  Json(cfg): Json<RuleConfig>,
) -> Result<Json<GenerateResponse>, ApiError>
where
  S: AlertStore,
{
  let report = AlertEngine::new(store)
    .generate_all(&cfg)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(GenerateResponse { created: report.total(), report }))
}

// ─── Resolve ──────────────────────────────────────────────────────────────────

/// `POST /alerts/{id}/resolve`
pub async fn resolve_one<S>(
  State(store): State<Arc<S>>,
  Path(alert_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: AlertStore,
{
  AlertEngine::new(store)
    .resolve(alert_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(serde_json::json!({ "resolved": alert_id })))
}

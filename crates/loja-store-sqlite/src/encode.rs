//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, UUIDs as hyphenated lowercase
//! strings, delivery item lists as compact JSON, and alert kind/severity as
//! their discriminant strings.

use chrono::{DateTime, Utc};
use loja_core::{
  alert::{Alert, AlertKind, Severity},
  snapshot::DeliveryItem,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Delivery items ──────────────────────────────────────────────────────────

pub fn encode_items(items: &[DeliveryItem]) -> Result<String> {
  Ok(serde_json::to_string(items)?)
}

pub fn decode_items(s: &str) -> Result<Vec<DeliveryItem>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from an `alerts` row.
pub struct RawAlert {
  pub alert_id:    String,
  pub kind:        String,
  pub entity_id:   String,
  pub title:       String,
  pub message:     String,
  pub severity:    String,
  pub created_at:  String,
  pub resolved:    bool,
  pub resolved_at: Option<String>,
}

impl RawAlert {
  pub fn into_alert(self) -> Result<Alert> {
    Ok(Alert {
      alert_id:    decode_uuid(&self.alert_id)?,
      kind:        AlertKind::parse(&self.kind).map_err(Error::Core)?,
      entity_id:   self.entity_id,
      title:       self.title,
      message:     self.message,
      severity:    Severity::parse(&self.severity).map_err(Error::Core)?,
      created_at:  decode_dt(&self.created_at)?,
      resolved:    self.resolved,
      resolved_at: self.resolved_at.as_deref().map(decode_dt).transpose()?,
    })
  }
}

//! Alert types — the unit of surfaced risk.
//!
//! An alert is produced by a rule evaluator, admitted through the
//! deduplication gate, and lives until it is resolved. For any
//! `(kind, entity_id)` pair at most one unresolved alert exists at a time;
//! the store enforces this with a uniqueness constraint on active alerts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Severity ────────────────────────────────────────────────────────────────

/// Urgency of an alert, ordered least to most urgent. Purely descriptive;
/// no rule branches on it.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
  Info,
  Aviso,
  Perigo,
  Critico,
}

impl Severity {
  /// The string stored in the `severity` column.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Info => "INFO",
      Self::Aviso => "AVISO",
      Self::Perigo => "PERIGO",
      Self::Critico => "CRITICO",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "INFO" => Ok(Self::Info),
      "AVISO" => Ok(Self::Aviso),
      "PERIGO" => Ok(Self::Perigo),
      "CRITICO" => Ok(Self::Critico),
      other => Err(Error::UnknownSeverity(other.to_owned())),
    }
  }
}

// ─── AlertKind ───────────────────────────────────────────────────────────────

/// The rule that produced an alert. The discriminant string doubles as the
/// user-facing rule name and as half of the dedup fingerprint, so it must
/// stay stable across runs (the day count of an approaching delivery lives
/// in the title and message, never here).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
  /// Stock at exactly zero.
  #[serde(rename = "Produto esgotado")]
  OutOfStock,
  /// Stock below the configured threshold.
  #[serde(rename = "Stock baixo")]
  LowStock,
  /// Expiry date already in the past.
  #[serde(rename = "EXPIRADO")]
  Expired,
  /// Expiry date within the configured window.
  #[serde(rename = "Validade a terminar")]
  ExpiringSoon,
  /// Undelivered past the configured grace period.
  #[serde(rename = "Entrega pendente")]
  DeliveryPending,
  /// Delivery record with an empty item list.
  #[serde(rename = "Entrega sem produtos")]
  DeliveryWithoutItems,
  /// Delivery record with a blank beneficiary name.
  #[serde(rename = "Beneficiário em falta")]
  BeneficiaryMissing,
  /// An item's requested quantity exceeds current stock.
  #[serde(rename = "Stock insuficiente na entrega")]
  InsufficientStock,
  /// Scheduled date behind today.
  #[serde(rename = "Entrega atrasada")]
  DeliveryOverdue,
  /// Scheduled for today.
  #[serde(rename = "Entrega Hoje")]
  DeliveryToday,
  /// Scheduled one or two days ahead.
  #[serde(rename = "Entrega a aproximar-se")]
  DeliveryApproaching,
}

impl AlertKind {
  /// The discriminant string stored in the `kind` column.
  /// Must match the `serde(rename)` tags above.
  pub fn discriminant(self) -> &'static str {
    match self {
      Self::OutOfStock => "Produto esgotado",
      Self::LowStock => "Stock baixo",
      Self::Expired => "EXPIRADO",
      Self::ExpiringSoon => "Validade a terminar",
      Self::DeliveryPending => "Entrega pendente",
      Self::DeliveryWithoutItems => "Entrega sem produtos",
      Self::BeneficiaryMissing => "Beneficiário em falta",
      Self::InsufficientStock => "Stock insuficiente na entrega",
      Self::DeliveryOverdue => "Entrega atrasada",
      Self::DeliveryToday => "Entrega Hoje",
      Self::DeliveryApproaching => "Entrega a aproximar-se",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "Produto esgotado" => Ok(Self::OutOfStock),
      "Stock baixo" => Ok(Self::LowStock),
      "EXPIRADO" => Ok(Self::Expired),
      "Validade a terminar" => Ok(Self::ExpiringSoon),
      "Entrega pendente" => Ok(Self::DeliveryPending),
      "Entrega sem produtos" => Ok(Self::DeliveryWithoutItems),
      "Beneficiário em falta" => Ok(Self::BeneficiaryMissing),
      "Stock insuficiente na entrega" => Ok(Self::InsufficientStock),
      "Entrega atrasada" => Ok(Self::DeliveryOverdue),
      "Entrega Hoje" => Ok(Self::DeliveryToday),
      "Entrega a aproximar-se" => Ok(Self::DeliveryApproaching),
      other => Err(Error::UnknownAlertKind(other.to_owned())),
    }
  }
}

// ─── Alert ───────────────────────────────────────────────────────────────────

/// A persisted alert. `created_at` is store-assigned and never mutated;
/// `resolved` is monotone — once true it never reverts in this subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
  pub alert_id:    Uuid,
  pub kind:        AlertKind,
  /// The product or delivery the alert concerns; second half of the
  /// dedup fingerprint.
  pub entity_id:   String,
  pub title:       String,
  pub message:     String,
  pub severity:    Severity,
  pub created_at:  DateTime<Utc>,
  pub resolved:    bool,
  pub resolved_at: Option<DateTime<Utc>>,
}

// ─── Candidate ───────────────────────────────────────────────────────────────

/// A would-be alert produced by an evaluator, before the deduplication
/// gate. `alert_id` and `created_at` are assigned by the store on admission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
  pub kind:      AlertKind,
  pub entity_id: String,
  pub title:     String,
  pub message:   String,
  pub severity:  Severity,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn severity_orders_by_urgency() {
    assert!(Severity::Info < Severity::Aviso);
    assert!(Severity::Aviso < Severity::Perigo);
    assert!(Severity::Perigo < Severity::Critico);
  }

  #[test]
  fn severity_roundtrip() {
    for s in [
      Severity::Info,
      Severity::Aviso,
      Severity::Perigo,
      Severity::Critico,
    ] {
      assert_eq!(Severity::parse(s.as_str()).unwrap(), s);
    }
    assert!(Severity::parse("CRÍTICO").is_err());
  }

  #[test]
  fn kind_discriminant_roundtrip() {
    for k in [
      AlertKind::OutOfStock,
      AlertKind::LowStock,
      AlertKind::Expired,
      AlertKind::ExpiringSoon,
      AlertKind::DeliveryPending,
      AlertKind::DeliveryWithoutItems,
      AlertKind::BeneficiaryMissing,
      AlertKind::InsufficientStock,
      AlertKind::DeliveryOverdue,
      AlertKind::DeliveryToday,
      AlertKind::DeliveryApproaching,
    ] {
      assert_eq!(AlertKind::parse(k.discriminant()).unwrap(), k);
    }
  }

  #[test]
  fn kind_serde_uses_discriminant() {
    let json = serde_json::to_string(&AlertKind::OutOfStock).unwrap();
    assert_eq!(json, "\"Produto esgotado\"");
  }
}

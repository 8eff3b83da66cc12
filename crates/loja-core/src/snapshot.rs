//! Read-only snapshots of the inventory and delivery collections.
//!
//! Snapshots are owned and mutated outside this crate; during a single
//! evaluation pass they are treated as immutable inputs. Every field has a
//! serde default so one malformed record decodes to safe values instead of
//! failing the whole scan.

use serde::{Deserialize, Serialize};

// ─── Products ────────────────────────────────────────────────────────────────

/// A product as seen by the inventory evaluator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSnapshot {
  #[serde(default)]
  pub id:          String,
  #[serde(default = "default_product_name")]
  pub name:        String,
  #[serde(default)]
  pub quantity:    u32,
  /// Expiry as an epoch-millisecond instant, when the product has one.
  #[serde(default)]
  pub expire_date: Option<i64>,
}

fn default_product_name() -> String { "Produto".to_owned() }

// ─── Deliveries ──────────────────────────────────────────────────────────────

/// One line of a delivery's item list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryItem {
  #[serde(default)]
  pub product_id: String,
  #[serde(default = "default_product_name")]
  pub name:       String,
  #[serde(default)]
  pub quantity:   u32,
}

/// A delivery as seen by the lifecycle and schedule evaluators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliverySnapshot {
  #[serde(default)]
  pub id:               String,
  #[serde(default)]
  pub beneficiary_name: String,
  /// `true` once the delivery has been handed over.
  #[serde(default, rename = "state")]
  pub delivered:        bool,
  /// Free-form date string; see [`crate::dates::parse_day`] for the two
  /// accepted formats.
  #[serde(default)]
  pub date:             String,
  #[serde(default)]
  pub items:            Vec<DeliveryItem>,
}

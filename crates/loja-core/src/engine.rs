//! The alert engine: three rule evaluators, the admission gate, and the
//! orchestrator that sequences them.
//!
//! A run is synchronous from the caller's point of view: the three
//! evaluators execute one after another, each doing blocking store reads,
//! and every admission is its own unit of work. There is no transaction
//! across evaluators — a store failure aborts the run and alerts already
//! admitted stay committed.

use std::collections::HashMap;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
  alert::{Alert, Candidate},
  dates::{self, DAY_MS},
  rules,
  store::AlertStore,
};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Thresholds for a generation run. Every field has a default so callers
/// can deserialize a partial config — `{}` yields the defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
  /// Products strictly below this quantity raise "Stock baixo".
  pub low_stock_threshold:   u32,
  /// Products expiring within this many days raise "Validade a terminar".
  pub expiring_soon_days:    i64,
  /// Undelivered deliveries at least this many days old raise
  /// "Entrega pendente".
  pub delivery_overdue_days: i64,
  /// Cross-check delivery item quantities against product stock.
  /// Off by default.
  pub check_delivery_stock:  bool,
}

impl Default for RuleConfig {
  fn default() -> Self {
    Self {
      low_stock_threshold:   5,
      expiring_soon_days:    7,
      delivery_overdue_days: 2,
      check_delivery_stock:  false,
    }
  }
}

// ─── Report ──────────────────────────────────────────────────────────────────

/// Alerts created per evaluator in one run. Suppressed duplicates are not
/// counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
  pub products:           usize,
  pub delivery_lifecycle: usize,
  pub delivery_schedule:  usize,
}

impl GenerationReport {
  pub fn total(&self) -> usize {
    self.products + self.delivery_lifecycle + self.delivery_schedule
  }
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// The rule evaluator and orchestrator, generic over the storage backend.
pub struct AlertEngine<S> {
  store: S,
}

impl<S: AlertStore> AlertEngine<S> {
  pub fn new(store: S) -> Self { Self { store } }

  // ── Upward interface ──────────────────────────────────────────────────

  /// All unresolved alerts, newest first.
  pub async fn active(&self) -> Result<Vec<Alert>, S::Error> {
    self.store.active_alerts().await
  }

  /// Mark an alert resolved. Errors surface to the caller unchanged.
  pub async fn resolve(&self, alert_id: Uuid) -> Result<(), S::Error> {
    self.store.resolve(alert_id).await
  }

  /// Run all three evaluators against the current snapshots, stamping
  /// "now" once for the whole run.
  pub async fn generate_all(
    &self,
    cfg: &RuleConfig,
  ) -> Result<GenerationReport, S::Error> {
    self.generate_all_at(cfg, Local::now().naive_local()).await
  }

  /// Like [`generate_all`](Self::generate_all) with an explicit clock, so
  /// callers (and tests) can pin "today".
  pub async fn generate_all_at(
    &self,
    cfg: &RuleConfig,
    now: NaiveDateTime,
  ) -> Result<GenerationReport, S::Error> {
    let report = GenerationReport {
      products:           self.scan_products(cfg, now).await?,
      delivery_lifecycle: self.scan_delivery_lifecycle(cfg, now).await?,
      delivery_schedule:  self.scan_delivery_schedule(now).await?,
    };

    info!(
      products = report.products,
      delivery_lifecycle = report.delivery_lifecycle,
      delivery_schedule = report.delivery_schedule,
      total = report.total(),
      "alert generation run complete"
    );
    Ok(report)
  }

  // ── Gate ──────────────────────────────────────────────────────────────

  /// Admit a candidate through the deduplication gate. Returns `true` if a
  /// new alert was created, `false` if suppressed as a duplicate.
  async fn admit(&self, candidate: Candidate) -> Result<bool, S::Error> {
    let kind = candidate.kind;
    let entity = candidate.entity_id.clone();
    match self.store.create_if_absent(candidate).await? {
      Some(alert) => {
        debug!(kind = kind.discriminant(), entity_id = %entity,
               alert_id = %alert.alert_id, "alert created");
        Ok(true)
      }
      None => {
        debug!(kind = kind.discriminant(), entity_id = %entity,
               "duplicate suppressed");
        Ok(false)
      }
    }
  }

  // ── Inventory evaluator ───────────────────────────────────────────────

  /// Stock level and expiry are independent axes; one product can raise
  /// one alert on each in the same pass.
  async fn scan_products(
    &self,
    cfg: &RuleConfig,
    now: NaiveDateTime,
  ) -> Result<usize, S::Error> {
    let now_ms = dates::epoch_ms(now);
    let mut created = 0;

    for p in self.store.list_products().await? {
      if p.quantity == 0 {
        created += self.admit(rules::out_of_stock(&p)).await? as usize;
      } else if p.quantity < cfg.low_stock_threshold {
        created += self.admit(rules::low_stock(&p)).await? as usize;
      }

      if let Some(expire_ms) = p.expire_date {
        if expire_ms < now_ms {
          created += self.admit(rules::expired(&p)).await? as usize;
        } else {
          let days_until = (expire_ms - now_ms) / DAY_MS;
          if (0..=cfg.expiring_soon_days).contains(&days_until) {
            created +=
              self.admit(rules::expiring_soon(&p, days_until)).await? as usize;
          }
        }
      }
    }

    Ok(created)
  }

  // ── Delivery lifecycle evaluator ──────────────────────────────────────

  /// Checks run in a fixed order per delivery: pending, empty item list,
  /// stock cross-check, missing beneficiary. An empty item list stops
  /// evaluation of that delivery — the record is too incomplete to lint
  /// further.
  async fn scan_delivery_lifecycle(
    &self,
    cfg: &RuleConfig,
    now: NaiveDateTime,
  ) -> Result<usize, S::Error> {
    let now_ms = dates::epoch_ms(now);

    let stock_by_product: Option<HashMap<String, u32>> =
      if cfg.check_delivery_stock {
        let products = self.store.list_products().await?;
        Some(products.into_iter().map(|p| (p.id, p.quantity)).collect())
      } else {
        None
      };

    let mut created = 0;

    for d in self.store.list_deliveries().await? {
      if !d.delivered {
        if let Some(day) = dates::parse_day(&d.date) {
          let days = (now_ms - dates::epoch_ms(dates::day_start(day))) / DAY_MS;
          if days >= cfg.delivery_overdue_days {
            created +=
              self.admit(rules::delivery_pending(&d, days)).await? as usize;
          }
        }
      }

      if d.items.is_empty() {
        created += self.admit(rules::delivery_without_items(&d)).await? as usize;
        continue;
      }

      if let Some(stock) = &stock_by_product {
        for item in &d.items {
          let available = stock.get(&item.product_id).copied().unwrap_or(0);
          if item.quantity > available {
            // One candidate per offending item; the gate collapses them to
            // a single alert per delivery.
            created +=
              self.admit(rules::insufficient_stock(&d, item)).await? as usize;
          }
        }
      }

      if d.beneficiary_name.trim().is_empty() {
        created += self.admit(rules::beneficiary_missing(&d)).await? as usize;
      }
    }

    Ok(created)
  }

  // ── Delivery schedule evaluator ───────────────────────────────────────

  /// Classifies undelivered deliveries by calendar-day distance from
  /// today's midnight. Deliveries without a parseable date are skipped.
  async fn scan_delivery_schedule(
    &self,
    now: NaiveDateTime,
  ) -> Result<usize, S::Error> {
    let today = dates::day_start(now.date());
    let mut created = 0;

    for d in self.store.list_deliveries().await? {
      if d.delivered {
        continue;
      }
      let Some(day) = dates::parse_day(&d.date) else {
        continue;
      };

      let days_diff = dates::days_between(today, dates::day_start(day));
      let candidate = match days_diff {
        n if n > 0 => rules::delivery_overdue(&d, n),
        0 => rules::delivery_today(&d),
        -2 | -1 => rules::delivery_approaching(&d, -days_diff),
        _ => continue,
      };
      created += self.admit(candidate).await? as usize;
    }

    Ok(created)
  }
}

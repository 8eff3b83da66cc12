//! [`SqliteStore`] — the SQLite implementation of [`AlertStore`].

use std::path::Path;

use chrono::Utc;
use uuid::Uuid;

use loja_core::{
  alert::{Alert, Candidate},
  snapshot::{DeliverySnapshot, ProductSnapshot},
  store::AlertStore,
};

use crate::{
  Error, Result,
  encode::{RawAlert, decode_items, encode_dt, encode_items, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Loja Social store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Snapshot seeding ──────────────────────────────────────────────────

  /// Insert or replace a product snapshot. The alert engine never calls
  /// this; it exists for the owning application and for tests.
  pub async fn put_product(&self, product: &ProductSnapshot) -> Result<()> {
    let id = product.id.clone();
    let name = product.name.clone();
    let quantity = product.quantity as i64;
    let expire_date = product.expire_date;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR REPLACE INTO products (id, name, quantity, expire_date)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id, name, quantity, expire_date],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert or replace a delivery snapshot.
  pub async fn put_delivery(&self, delivery: &DeliverySnapshot) -> Result<()> {
    let id = delivery.id.clone();
    let beneficiary = delivery.beneficiary_name.clone();
    let state = delivery.delivered;
    let date = delivery.date.clone();
    let items = encode_items(&delivery.items)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR REPLACE INTO deliveries (id, beneficiary_name, state, date, items)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id, beneficiary, state, date, items],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn select_alerts(&self, only_active: bool) -> Result<Vec<Alert>> {
    let raws: Vec<RawAlert> = self
      .conn
      .call(move |conn| {
        let sql = if only_active {
          "SELECT alert_id, kind, entity_id, title, message, severity,
                  created_at, resolved, resolved_at
           FROM alerts WHERE resolved = 0
           ORDER BY created_at DESC"
        } else {
          "SELECT alert_id, kind, entity_id, title, message, severity,
                  created_at, resolved, resolved_at
           FROM alerts
           ORDER BY created_at DESC"
        };

        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawAlert {
              alert_id:    row.get(0)?,
              kind:        row.get(1)?,
              entity_id:   row.get(2)?,
              title:       row.get(3)?,
              message:     row.get(4)?,
              severity:    row.get(5)?,
              created_at:  row.get(6)?,
              resolved:    row.get(7)?,
              resolved_at: row.get(8)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAlert::into_alert).collect()
  }

  /// Every alert, resolved or not. Used by tests and maintenance tooling;
  /// the engine itself only sees the active set.
  pub async fn all_alerts(&self) -> Result<Vec<Alert>> {
    self.select_alerts(false).await
  }

  /// Test hook: run raw statements, bypassing the typed writers.
  #[cfg(test)]
  pub(crate) async fn execute_raw(&self, sql: &'static str) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(sql)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── AlertStore impl ─────────────────────────────────────────────────────────

impl AlertStore for SqliteStore {
  type Error = Error;

  // ── Snapshots ─────────────────────────────────────────────────────────

  async fn list_products(&self) -> Result<Vec<ProductSnapshot>> {
    let products = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT id, name, quantity, expire_date FROM products")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(ProductSnapshot {
              id:          row.get(0)?,
              name:        row.get(1)?,
              quantity:    row.get::<_, i64>(2)?.max(0) as u32,
              expire_date: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(products)
  }

  async fn list_deliveries(&self) -> Result<Vec<DeliverySnapshot>> {
    let raws: Vec<(String, String, bool, String, String)> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, beneficiary_name, state, date, items FROM deliveries",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok((
              row.get(0)?,
              row.get(1)?,
              row.get(2)?,
              row.get(3)?,
              row.get(4)?,
            ))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(
      raws
        .into_iter()
        .map(|(id, beneficiary_name, delivered, date, items)| {
          DeliverySnapshot {
            id,
            beneficiary_name,
            delivered,
            date,
            // A malformed item column degrades to an empty list rather than
            // failing the whole scan.
            items: decode_items(&items).unwrap_or_default(),
          }
        })
        .collect(),
    )
  }

  // ── Alerts ────────────────────────────────────────────────────────────

  async fn create_if_absent(&self, candidate: Candidate) -> Result<Option<Alert>> {
    let alert = Alert {
      alert_id:    Uuid::new_v4(),
      kind:        candidate.kind,
      entity_id:   candidate.entity_id,
      title:       candidate.title,
      message:     candidate.message,
      severity:    candidate.severity,
      created_at:  Utc::now(),
      resolved:    false,
      resolved_at: None,
    };

    let alert_id = encode_uuid(alert.alert_id);
    let kind = alert.kind.discriminant();
    let entity_id = alert.entity_id.clone();
    let title = alert.title.clone();
    let message = alert.message.clone();
    let severity = alert.severity.as_str();
    let created_at = encode_dt(alert.created_at);

    // The partial unique index on active (kind, entity_id) makes the
    // absence check and the insert one atomic statement.
    let inserted: usize = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "INSERT INTO alerts (
             alert_id, kind, entity_id, title, message, severity,
             created_at, resolved, resolved_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, NULL)
           ON CONFLICT (kind, entity_id) WHERE resolved = 0 DO NOTHING",
          rusqlite::params![
            alert_id, kind, entity_id, title, message, severity, created_at,
          ],
        )?;
        Ok(n)
      })
      .await?;

    Ok((inserted > 0).then_some(alert))
  }

  async fn active_alerts(&self) -> Result<Vec<Alert>> {
    self.select_alerts(true).await
  }

  async fn resolve(&self, alert_id: Uuid) -> Result<()> {
    let id_str = encode_uuid(alert_id);
    let at_str = encode_dt(Utc::now());

    let updated: usize = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "UPDATE alerts SET resolved = 1, resolved_at = ?2 WHERE alert_id = ?1",
          rusqlite::params![id_str, at_str],
        )?;
        Ok(n)
      })
      .await?;

    if updated == 0 {
      return Err(Error::AlertNotFound(alert_id));
    }
    Ok(())
  }
}

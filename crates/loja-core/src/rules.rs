//! The condition catalog: one constructor per rule.
//!
//! Each constructor maps a snapshot (plus any context the rule needs) to a
//! fully-worded [`Candidate`]. The user-facing copy lives here and nowhere
//! else; evaluators decide *whether* a rule fires, this module decides what
//! it says.

use crate::{
  alert::{AlertKind, Candidate, Severity},
  snapshot::{DeliveryItem, DeliverySnapshot, ProductSnapshot},
};

/// "1 dia" / "N dias".
fn dias(n: i64) -> String {
  if n == 1 { format!("{n} dia") } else { format!("{n} dias") }
}

// ─── Inventory rules ─────────────────────────────────────────────────────────

pub fn out_of_stock(p: &ProductSnapshot) -> Candidate {
  Candidate {
    kind:      AlertKind::OutOfStock,
    entity_id: p.id.clone(),
    title:     "Produto esgotado".to_owned(),
    message:   format!("O produto {} encontra-se esgotado.", p.name),
    severity:  Severity::Critico,
  }
}

pub fn low_stock(p: &ProductSnapshot) -> Candidate {
  Candidate {
    kind:      AlertKind::LowStock,
    entity_id: p.id.clone(),
    title:     "Stock baixo".to_owned(),
    message:   format!(
      "O produto {} está com stock baixo (quantidade atual: {}).",
      p.name, p.quantity
    ),
    severity:  Severity::Aviso,
  }
}

pub fn expired(p: &ProductSnapshot) -> Candidate {
  Candidate {
    kind:      AlertKind::Expired,
    entity_id: p.id.clone(),
    title:     "Produto fora de validade".to_owned(),
    message:   format!("O produto {} encontra-se fora de validade.", p.name),
    severity:  Severity::Critico,
  }
}

pub fn expiring_soon(p: &ProductSnapshot, days_until: i64) -> Candidate {
  Candidate {
    kind:      AlertKind::ExpiringSoon,
    entity_id: p.id.clone(),
    title:     "Validade a terminar".to_owned(),
    message:   format!(
      "O produto {} expira dentro de {days_until} dia(s).",
      p.name
    ),
    severity:  Severity::Perigo,
  }
}

// ─── Delivery lifecycle rules ────────────────────────────────────────────────

pub fn delivery_pending(d: &DeliverySnapshot, days: i64) -> Candidate {
  Candidate {
    kind:      AlertKind::DeliveryPending,
    entity_id: d.id.clone(),
    title:     "Entrega pendente".to_owned(),
    message:   format!(
      "A entrega ao beneficiário {} encontra-se pendente há {days} dia(s).",
      d.beneficiary_name
    ),
    severity:  Severity::Perigo,
  }
}

pub fn delivery_without_items(d: &DeliverySnapshot) -> Candidate {
  Candidate {
    kind:      AlertKind::DeliveryWithoutItems,
    entity_id: d.id.clone(),
    title:     "Entrega sem produtos".to_owned(),
    message:   format!(
      "A entrega ao beneficiário {} não tem produtos associados.",
      d.beneficiary_name
    ),
    severity:  Severity::Perigo,
  }
}

pub fn beneficiary_missing(d: &DeliverySnapshot) -> Candidate {
  Candidate {
    kind:      AlertKind::BeneficiaryMissing,
    entity_id: d.id.clone(),
    title:     "Beneficiário em falta".to_owned(),
    message:   "Existe uma entrega registada sem beneficiário associado."
      .to_owned(),
    severity:  Severity::Perigo,
  }
}

pub fn insufficient_stock(
  d: &DeliverySnapshot,
  item: &DeliveryItem,
) -> Candidate {
  Candidate {
    kind:      AlertKind::InsufficientStock,
    entity_id: d.id.clone(),
    title:     "Stock insuficiente na entrega".to_owned(),
    message:   format!(
      "Na entrega ao beneficiário {}, o produto {} tem quantidade solicitada \
       superior ao stock disponível.",
      d.beneficiary_name, item.name
    ),
    severity:  Severity::Critico,
  }
}

// ─── Delivery schedule rules ─────────────────────────────────────────────────

pub fn delivery_overdue(d: &DeliverySnapshot, days_late: i64) -> Candidate {
  Candidate {
    kind:      AlertKind::DeliveryOverdue,
    entity_id: d.id.clone(),
    title:     "Entrega atrasada".to_owned(),
    message:   format!(
      "A entrega ao beneficiário {} encontra-se atrasada por {}.",
      d.beneficiary_name,
      dias(days_late)
    ),
    severity:  Severity::Critico,
  }
}

pub fn delivery_today(d: &DeliverySnapshot) -> Candidate {
  Candidate {
    kind:      AlertKind::DeliveryToday,
    entity_id: d.id.clone(),
    title:     "Entrega Hoje".to_owned(),
    message:   format!(
      "A entrega ao beneficiário {} é hoje.",
      d.beneficiary_name
    ),
    severity:  Severity::Aviso,
  }
}

/// `days_ahead` is 1 or 2; the count appears only in the title and message,
/// never in the dedup key, so the same delivery keeps the same fingerprint
/// as it approaches.
pub fn delivery_approaching(d: &DeliverySnapshot, days_ahead: i64) -> Candidate {
  Candidate {
    kind:      AlertKind::DeliveryApproaching,
    entity_id: d.id.clone(),
    title:     format!("Entrega em {days_ahead} dia(s)"),
    message:   format!(
      "A entrega ao beneficiário {} está marcada para daqui a {}.",
      d.beneficiary_name,
      dias(days_ahead)
    ),
    severity:  Severity::Aviso,
  }
}

//! Day-granular date handling for the rule evaluators.
//!
//! Delivery dates arrive as free-form strings in one of two formats and are
//! normalized to a calendar day at local midnight. All day arithmetic is a
//! truncating division of the millisecond difference — not a rounding one —
//! to match how the thresholds were originally tuned.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// One day in milliseconds.
pub const DAY_MS: i64 = 1000 * 60 * 60 * 24;

/// Parse a delivery date string into a calendar day.
///
/// Tries `DD/MM/YYYY` first, then `YYYY-MM-DD`. Blank input, non-numeric
/// parts, wrong arity, and invalid calendar dates all yield `None`; a
/// failure of the first pattern falls through to the second.
pub fn parse_day(s: &str) -> Option<NaiveDate> {
  if s.trim().is_empty() {
    return None;
  }

  if let Some(day) = parse_parts(s, '/', |p| (p[2], p[1], p[0])) {
    return Some(day);
  }
  parse_parts(s, '-', |p| (p[0], p[1], p[2]))
}

fn parse_parts(
  s: &str,
  sep: char,
  order: fn(&[i32; 3]) -> (i32, i32, i32),
) -> Option<NaiveDate> {
  let parts: Vec<&str> = s.split(sep).collect();
  if parts.len() != 3 {
    return None;
  }

  let mut nums = [0i32; 3];
  for (n, part) in nums.iter_mut().zip(&parts) {
    *n = part.trim().parse().ok()?;
  }

  let (y, m, d) = order(&nums);
  NaiveDate::from_ymd_opt(y, m as u32, d as u32)
}

/// The canonical instant for a day: local midnight.
pub fn day_start(day: NaiveDate) -> NaiveDateTime {
  day.and_time(NaiveTime::MIN)
}

/// Epoch milliseconds of a wall-clock instant.
pub fn epoch_ms(at: NaiveDateTime) -> i64 {
  at.and_utc().timestamp_millis()
}

/// Whole days from `earlier` to `later`, truncating toward zero.
pub fn days_between(later: NaiveDateTime, earlier: NaiveDateTime) -> i64 {
  (epoch_ms(later) - epoch_ms(earlier)) / DAY_MS
}

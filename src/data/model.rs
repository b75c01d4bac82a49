use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Numeric field parsing
// ---------------------------------------------------------------------------

/// Extract the numeric value from a currency-formatted price string.
///
/// Everything except ASCII digits and `.` is stripped first, so `"$140.00"`
/// and `"$1,040.50"` both parse (to 140.0 and 1040.5). A string with no
/// digits yields `None`.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    leading_float(&cleaned)
}

/// Parse the leading float prefix of `raw` (after leading whitespace and an
/// optional sign): digits with at most one decimal point, stopping at the
/// first character that cannot extend the number. `"8.5 stars"` → 8.5.
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let (negative, rest) = split_sign(s);
    let value = leading_float(rest)?;
    Some(if negative { -value } else { value })
}

/// Parse the leading integer prefix of `raw` (after leading whitespace and
/// an optional sign), stopping at the first non-digit. `"2.5"` → 2.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = split_sign(s);
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let value: i64 = rest[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

fn split_sign(s: &str) -> (bool, &str) {
    match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    }
}

/// Longest prefix of digits and at most one `.`, parsed as f64.
/// Requires at least one digit, so `"."` and `""` yield `None`.
fn leading_float(s: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    for (i, c) in s.char_indices() {
        match c {
            '0'..='9' => {
                seen_digit = true;
                end = i + 1;
            }
            '.' if !seen_dot => {
                seen_dot = true;
                end = i + 1;
            }
            _ => break,
        }
    }
    if !seen_digit {
        return None;
    }
    s[..end].parse().ok()
}

// ---------------------------------------------------------------------------
// Record – one listing row
// ---------------------------------------------------------------------------

/// A single listing (one row of the source table): column name → trimmed
/// string value. Numeric columns stay as text and are parsed on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    pub fn new(fields: BTreeMap<String, String>) -> Self {
        Record { fields }
    }

    /// Raw string value of a column, if the row has it.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Parsed nightly price, e.g. `"$140.00"` → 140.0.
    pub fn price(&self) -> Option<f64> {
        self.get("price").and_then(parse_price)
    }

    /// Bedroom count, integer-prefix parsed.
    pub fn bedrooms(&self) -> Option<i64> {
        self.get("bedrooms").and_then(parse_int_prefix)
    }

    /// Review score, float-prefix parsed.
    pub fn review_scores_rating(&self) -> Option<f64> {
        self.get("review_scores_rating").and_then(parse_float_prefix)
    }

    pub fn room_type(&self) -> Option<&str> {
        self.get("room_type")
    }

    pub fn host_id(&self) -> Option<&str> {
        self.get("host_id")
    }

    pub fn host_location(&self) -> Option<&str> {
        self.get("host_location")
    }
}

// ---------------------------------------------------------------------------
// Table – the loaded record sequence
// ---------------------------------------------------------------------------

/// An ordered sequence of listings behind an immutable handle.
///
/// Narrowing operations (see `filter.rs`) never mutate a `Table`; each one
/// returns a new instance owning its own sequence, so superseded tables are
/// simply dropped by the caller. Filters preserve relative record order.
#[derive(Debug, Clone)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    pub fn new(records: Vec<Record>) -> Self {
        Table { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn record(pairs: &[(&str, &str)]) -> Record {
    Record::new(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

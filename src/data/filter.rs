use super::model::{Record, Table};

// ---------------------------------------------------------------------------
// Filter criteria: optional constraints, combined with AND
// ---------------------------------------------------------------------------

/// User-selected constraints. Every field is optional; `None` means "no
/// constraint" for that field, so `FilterCriteria::default()` keeps
/// everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Keep listings whose parsed price is at most this.
    pub max_price: Option<f64>,
    /// Keep listings whose `room_type` equals this exactly (case-sensitive).
    pub room_type: Option<String>,
    /// Keep listings with exactly this many bedrooms.
    pub bedrooms: Option<i64>,
    /// Keep listings whose review score is at least this.
    pub min_rating: Option<f64>,
}

/// A record passes when every active constraint holds:
///
/// * `max_price` – parsed price ≤ max; a price that does not parse to a
///   finite number fails the constraint
/// * `room_type` – exact string equality, no trimming
/// * `bedrooms` – integer-prefix parse equals the requested count
/// * `min_rating` – parsed score ≥ min; an unparsable score fails
fn passes(record: &Record, criteria: &FilterCriteria) -> bool {
    if let Some(max_price) = criteria.max_price {
        match record.price() {
            Some(price) if price.is_finite() && price <= max_price => {}
            _ => return false,
        }
    }
    if let Some(room_type) = &criteria.room_type {
        if record.room_type() != Some(room_type.as_str()) {
            return false;
        }
    }
    if let Some(bedrooms) = criteria.bedrooms {
        if record.bedrooms() != Some(bedrooms) {
            return false;
        }
    }
    if let Some(min_rating) = criteria.min_rating {
        match record.review_scores_rating() {
            Some(score) if score >= min_rating => {}
            _ => return false,
        }
    }
    true
}

impl Table {
    /// Narrow the table to the records matching `criteria`.
    ///
    /// Returns a new `Table`; the receiver is untouched and record order is
    /// preserved. Filtering with a combined criteria object yields the same
    /// set as chaining the individual constraints.
    pub fn filter(&self, criteria: &FilterCriteria) -> Table {
        Table::new(
            self.records()
                .iter()
                .filter(|rec| passes(rec, criteria))
                .cloned()
                .collect(),
        )
    }

    /// Narrow the table to records whose `host_location` contains `needle`
    /// (case-sensitive substring). Records without a `host_location` field
    /// do not match.
    pub fn filter_by_host_location(&self, needle: &str) -> Table {
        Table::new(
            self.records()
                .iter()
                .filter(|rec| rec.host_location().is_some_and(|loc| loc.contains(needle)))
                .cloned()
                .collect(),
        )
    }
}

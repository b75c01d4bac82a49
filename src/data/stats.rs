use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::model::Table;

// ---------------------------------------------------------------------------
// Aggregate statistics
// ---------------------------------------------------------------------------

/// Result of a statistics pass over a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableStats {
    /// Total number of records in the table, including those excluded from
    /// the price averages below.
    pub count: usize,
    /// Mean listed price per bedroom count.
    pub avg_price_per_bedroom: BTreeMap<i64, f64>,
}

impl Table {
    /// Compute record count and average price per bedroom count in a single
    /// pass.
    ///
    /// Records whose `price` field is missing or blank are left out of the
    /// per-bedroom sums entirely (they still contribute to `count`), as are
    /// records whose price or bedroom count does not parse.
    pub fn stats(&self) -> TableStats {
        let mut buckets: BTreeMap<i64, (f64, usize)> = BTreeMap::new();

        for rec in self.records() {
            let raw_price = rec.get("price").unwrap_or("");
            if raw_price.trim().is_empty() {
                continue;
            }
            let (Some(price), Some(bedrooms)) = (rec.price(), rec.bedrooms()) else {
                continue;
            };
            let bucket = buckets.entry(bedrooms).or_insert((0.0, 0));
            bucket.0 += price;
            bucket.1 += 1;
        }

        let avg_price_per_bedroom = buckets
            .into_iter()
            .map(|(bedrooms, (sum, n))| {
                let avg = if n == 0 { 0.0 } else { sum / n as f64 };
                (bedrooms, avg)
            })
            .collect();

        TableStats {
            count: self.len(),
            avg_price_per_bedroom,
        }
    }

    /// Count listings per host, most listings first.
    ///
    /// Hosts are grouped in order of first appearance and the sort on the
    /// count is stable, so tied hosts keep that order. Records without a
    /// `host_id` are grouped under the empty string.
    pub fn listings_per_host(&self) -> Vec<(String, u64)> {
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, u64> = HashMap::new();

        for rec in self.records() {
            let host = rec.host_id().unwrap_or("");
            match counts.get_mut(host) {
                Some(n) => *n += 1,
                None => {
                    order.push(host.to_string());
                    counts.insert(host.to_string(), 1);
                }
            }
        }

        let mut ranking: Vec<(String, u64)> = order
            .into_iter()
            .map(|host| {
                let n = counts[&host];
                (host, n)
            })
            .collect();
        ranking.sort_by(|a, b| b.1.cmp(&a.1));
        ranking
    }
}

use std::path::Path;

use crate::data::export::{self, Calculations, ExportError};
use crate::data::filter::FilterCriteria;
use crate::data::model::Table;
use crate::data::stats::TableStats;

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Everything one interactive session owns: the current table and the
/// calculation results accumulated so far.
///
/// The table reference is replaced wholesale after every narrowing call;
/// individual tables stay immutable. `calculations` is the only state that
/// mutates across menu iterations, and it is scoped to this session.
pub struct Session {
    table: Table,
    pub calculations: Calculations,
}

impl Session {
    pub fn new(table: Table) -> Self {
        Session {
            table,
            calculations: Calculations::default(),
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Replace the current table with the filtered one.
    pub fn apply_filter(&mut self, criteria: &FilterCriteria) {
        self.table = self.table.filter(criteria);
    }

    /// Narrow to listings whose host location contains `needle`, recording
    /// the resulting listing count under `locationCount`.
    pub fn filter_host_location(&mut self, needle: &str) {
        self.table = self.table.filter_by_host_location(needle);
        self.calculations.location_count = Some(self.table.len());
    }

    /// Compute and record table statistics.
    pub fn compute_stats(&mut self) -> TableStats {
        let stats = self.table.stats();
        self.calculations.stats = Some(stats.clone());
        stats
    }

    /// Compute and record the per-host listing ranking.
    pub fn rank_hosts(&mut self) -> Vec<(String, u64)> {
        let rankings = self.table.listings_per_host();
        self.calculations.rankings = Some(rankings.clone());
        rankings
    }

    /// Write the current table plus accumulated calculations to `path`.
    pub fn export(&self, path: &Path) -> Result<(), ExportError> {
        export::write_snapshot(path, &self.table, &self.calculations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn session() -> Session {
        Session::new(Table::new(vec![
            record(&[
                ("price", "$100"),
                ("bedrooms", "1"),
                ("host_id", "A"),
                ("host_location", "Berlin, Germany"),
            ]),
            record(&[
                ("price", "$300"),
                ("bedrooms", "3"),
                ("host_id", "A"),
                ("host_location", "Hamburg, Germany"),
            ]),
        ]))
    }

    #[test]
    fn filters_replace_the_current_table() {
        let mut session = session();
        session.apply_filter(&FilterCriteria {
            max_price: Some(150.0),
            ..Default::default()
        });
        assert_eq!(session.table().len(), 1);

        // Further narrowing starts from the already-filtered table.
        session.filter_host_location("Hamburg");
        assert_eq!(session.table().len(), 0);
        assert_eq!(session.calculations.location_count, Some(0));
    }

    #[test]
    fn calculations_accumulate_across_operations() {
        let mut session = session();
        session.compute_stats();
        session.rank_hosts();
        assert_eq!(session.calculations.stats.as_ref().unwrap().count, 2);
        assert_eq!(
            session.calculations.rankings.as_ref().unwrap(),
            &vec![("A".to_string(), 2)]
        );
        assert_eq!(session.calculations.location_count, None);
    }
}

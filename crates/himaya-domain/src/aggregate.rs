//! National-level roll-up of wilaya records.
//!
//! This is the aggregation that feeds the dashboards: grand totals,
//! interventions by category, by month, and by wilaya.

use std::collections::BTreeMap;

use crate::category::Category;
use crate::record::WilayaRecord;

/// Accumulated national statistics over any set of records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalStats {
    pub total_interventions: u64,
    pub total_deaths: u64,
    pub total_injured: u64,
    pub total_patients: u64,
    /// Interventions per category, keyed in `Category::ALL` order.
    pub by_category: BTreeMap<Category, u64>,
    /// Interventions per month, keyed `YYYY-MM`.
    pub by_month: BTreeMap<String, u64>,
    /// Interventions per wilaya, keyed by wilaya name.
    pub by_wilaya: BTreeMap<String, u64>,
}

impl GlobalStats {
    /// Fold one record into the running totals.
    pub fn add_record(&mut self, record: &WilayaRecord) {
        let interventions = u64::from(record.total_interventions());
        self.total_interventions += interventions;
        self.total_deaths += u64::from(record.total_deaths());
        self.total_injured += u64::from(record.total_injured());
        self.total_patients += u64::from(record.total_patients());

        for category in Category::ALL {
            *self.by_category.entry(category).or_insert(0) +=
                u64::from(record.interventions_for(category));
        }

        if let Some(month) = month_key(&record.date) {
            *self.by_month.entry(month.to_string()).or_insert(0) += interventions;
        }

        *self.by_wilaya.entry(record.name.clone()).or_insert(0) += interventions;
    }

    /// Aggregate a full set of records.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a WilayaRecord>) -> Self {
        let mut stats = Self::default();
        for record in records {
            stats.add_record(record);
        }
        stats
    }
}

/// The `YYYY-MM` prefix of a zero-padded ISO date.
fn month_key(date: &str) -> Option<&str> {
    if date.len() >= 7 { date.get(..7) } else { None }
}

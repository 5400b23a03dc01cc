use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::counts::{CoPoisoningCounts, CoverageCounts, FireCounts, InterventionCounts};

/// One day's intervention counters for one wilaya.
///
/// Identified by the composite key `(id, date)`. A later save for the same
/// key overwrites the prior value; there is no versioning and no delete.
/// Field names serialize as camelCase to match the persisted JSON schema
/// shared by both storage backends and the import/export file formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WilayaRecord {
    /// Wilaya code, zero-padded ("01" through "58").
    pub id: String,
    /// Wilaya display name.
    pub name: String,
    /// ISO-8601 date, zero-padded `YYYY-MM-DD`. The key-value backend's
    /// range-scan bound relies on this form sorting lexicographically.
    pub date: String,
    pub traffic_accidents: InterventionCounts,
    pub urban_industrial_fires: FireCounts,
    pub medical_evacuation: InterventionCounts,
    pub miscellaneous_interventions: InterventionCounts,
    pub carbon_monoxide_poisoning: CoPoisoningCounts,
    pub security_coverage: CoverageCounts,
}

impl WilayaRecord {
    /// The all-zero record the entry form starts from when no prior record
    /// exists for the selected date.
    pub fn empty(id: impl Into<String>, name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date: date.into(),
            traffic_accidents: InterventionCounts::default(),
            urban_industrial_fires: FireCounts::default(),
            medical_evacuation: InterventionCounts::default(),
            miscellaneous_interventions: InterventionCounts::default(),
            carbon_monoxide_poisoning: CoPoisoningCounts::default(),
            security_coverage: CoverageCounts::default(),
        }
    }

    /// Intervention count for a single category.
    pub fn interventions_for(&self, category: Category) -> u32 {
        match category {
            Category::TrafficAccidents => self.traffic_accidents.interventions,
            Category::UrbanIndustrialFires => self.urban_industrial_fires.interventions,
            Category::MedicalEvacuation => self.medical_evacuation.interventions,
            Category::MiscellaneousInterventions => self.miscellaneous_interventions.interventions,
            Category::CarbonMonoxidePoisoning => self.carbon_monoxide_poisoning.interventions,
            Category::SecurityCoverage => self.security_coverage.interventions,
        }
    }

    /// Sum of the `interventions` field across all six categories.
    ///
    /// Never persisted; recomputed on every read.
    pub fn total_interventions(&self) -> u32 {
        Category::ALL
            .iter()
            .map(|c| self.interventions_for(*c))
            .sum()
    }

    /// Sum of the `deaths` field across all six categories.
    pub fn total_deaths(&self) -> u32 {
        self.traffic_accidents.deaths
            + self.urban_industrial_fires.deaths
            + self.medical_evacuation.deaths
            + self.miscellaneous_interventions.deaths
            + self.carbon_monoxide_poisoning.deaths
            + self.security_coverage.deaths
    }

    /// Sum of the injured counters. Carbon-monoxide poisoning has no
    /// `injured` field; its `suffocated` counter is counted here instead,
    /// matching the dashboard's historical behavior.
    pub fn total_injured(&self) -> u32 {
        self.traffic_accidents.injured
            + self.urban_industrial_fires.injured
            + self.medical_evacuation.injured
            + self.miscellaneous_interventions.injured
            + self.carbon_monoxide_poisoning.suffocated
            + self.security_coverage.injured
    }

    /// Patients are tracked by security coverage only.
    pub fn total_patients(&self) -> u32 {
        self.security_coverage.patients
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adrar_example() -> WilayaRecord {
        let mut r = WilayaRecord::empty("01", "Adrar", "2024-01-15");
        r.traffic_accidents = InterventionCounts {
            interventions: 3,
            injured: 2,
            deaths: 1,
        };
        r
    }

    #[test]
    fn empty_record_has_zero_totals() {
        let r = WilayaRecord::empty("16", "Alger", "2024-06-01");
        assert_eq!(r.total_interventions(), 0);
        assert_eq!(r.total_deaths(), 0);
        assert_eq!(r.total_injured(), 0);
        assert_eq!(r.total_patients(), 0);
    }

    #[test]
    fn total_interventions_sums_all_six_categories() {
        let mut r = WilayaRecord::empty("01", "Adrar", "2024-01-15");
        r.traffic_accidents.interventions = 1;
        r.urban_industrial_fires.interventions = 2;
        r.medical_evacuation.interventions = 3;
        r.miscellaneous_interventions.interventions = 4;
        r.carbon_monoxide_poisoning.interventions = 5;
        r.security_coverage.interventions = 6;
        assert_eq!(r.total_interventions(), 21);
    }

    #[test]
    fn totals_are_additive_under_independent_category_changes() {
        let mut r = adrar_example();
        let before = r.total_interventions();
        r.security_coverage.interventions += 7;
        assert_eq!(r.total_interventions(), before + 7);
    }

    #[test]
    fn adrar_scenario_total_is_three() {
        assert_eq!(adrar_example().total_interventions(), 3);
    }

    #[test]
    fn co_poisoning_suffocated_counts_as_injured() {
        let mut r = WilayaRecord::empty("01", "Adrar", "2024-01-15");
        r.carbon_monoxide_poisoning.suffocated = 4;
        assert_eq!(r.total_injured(), 4);
    }

    #[test]
    fn serde_uses_camel_case_schema() {
        let r = adrar_example();
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"trafficAccidents\""));
        assert!(json.contains("\"carbonMonoxidePoisoning\""));
        assert!(json.contains("\"securityCoverage\""));
        let back: WilayaRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}

use serde::{Deserialize, Serialize};

/// The six fixed incident categories tracked per daily record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    TrafficAccidents,
    UrbanIndustrialFires,
    MedicalEvacuation,
    MiscellaneousInterventions,
    CarbonMonoxidePoisoning,
    SecurityCoverage,
}

impl Category {
    /// All categories, in the order they appear in forms and exports.
    pub const ALL: [Category; 6] = [
        Category::TrafficAccidents,
        Category::UrbanIndustrialFires,
        Category::MedicalEvacuation,
        Category::MiscellaneousInterventions,
        Category::CarbonMonoxidePoisoning,
        Category::SecurityCoverage,
    ];

    /// Human-readable label, used as the column prefix in exports.
    pub fn label(&self) -> &'static str {
        match self {
            Category::TrafficAccidents => "Traffic Accidents",
            Category::UrbanIndustrialFires => "Urban/Industrial Fires",
            Category::MedicalEvacuation => "Medical Evacuation",
            Category::MiscellaneousInterventions => "Miscellaneous",
            Category::CarbonMonoxidePoisoning => "Carbon Monoxide",
            Category::SecurityCoverage => "Security Coverage",
        }
    }
}

use serde::{Deserialize, Serialize};

/// Counters shared by the basic intervention categories
/// (traffic accidents, medical evacuation, miscellaneous).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterventionCounts {
    pub interventions: u32,
    pub injured: u32,
    pub deaths: u32,
}

/// Counters for urban and industrial fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireCounts {
    pub interventions: u32,
    pub suffocated: u32,
    pub burned: u32,
    pub injured: u32,
    pub deaths: u32,
}

/// Counters for carbon-monoxide poisoning. This category tracks
/// `suffocated` instead of `injured`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoPoisoningCounts {
    pub interventions: u32,
    pub suffocated: u32,
    pub deaths: u32,
}

/// Counters for security coverage of public events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageCounts {
    pub interventions: u32,
    pub injured: u32,
    pub patients: u32,
    pub deaths: u32,
}

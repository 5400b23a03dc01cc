use rust_xlsxwriter::Workbook;
use thiserror::Error;

use himaya_domain::WilayaRecord;

/// Errors while rendering the export workbook.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Workbook error: {0}")]
    Workbook(String),
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::Workbook(err.to_string())
    }
}

/// One cell of the flattened statistics row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Count(u32),
}

/// Flatten a record into the named export columns.
///
/// Column order and names are fixed: Date, Wilaya, the derived total, then
/// every per-category counter. Pure; no persistence side effects.
pub fn statistics_row(record: &WilayaRecord) -> Vec<(&'static str, CellValue)> {
    use CellValue::{Count, Text};

    let ta = &record.traffic_accidents;
    let fires = &record.urban_industrial_fires;
    let medevac = &record.medical_evacuation;
    let misc = &record.miscellaneous_interventions;
    let co = &record.carbon_monoxide_poisoning;
    let cover = &record.security_coverage;

    vec![
        ("Date", Text(record.date.clone())),
        ("Wilaya", Text(record.name.clone())),
        ("Total Interventions", Count(record.total_interventions())),
        ("Traffic Accidents - Interventions", Count(ta.interventions)),
        ("Traffic Accidents - Injured", Count(ta.injured)),
        ("Traffic Accidents - Deaths", Count(ta.deaths)),
        ("Urban/Industrial Fires - Interventions", Count(fires.interventions)),
        ("Urban/Industrial Fires - Suffocated", Count(fires.suffocated)),
        ("Urban/Industrial Fires - Burned", Count(fires.burned)),
        ("Urban/Industrial Fires - Injured", Count(fires.injured)),
        ("Urban/Industrial Fires - Deaths", Count(fires.deaths)),
        ("Medical Evacuation - Interventions", Count(medevac.interventions)),
        ("Medical Evacuation - Injured", Count(medevac.injured)),
        ("Medical Evacuation - Deaths", Count(medevac.deaths)),
        ("Miscellaneous - Interventions", Count(misc.interventions)),
        ("Miscellaneous - Injured", Count(misc.injured)),
        ("Miscellaneous - Deaths", Count(misc.deaths)),
        ("Carbon Monoxide - Interventions", Count(co.interventions)),
        ("Carbon Monoxide - Suffocated", Count(co.suffocated)),
        ("Carbon Monoxide - Deaths", Count(co.deaths)),
        ("Security Coverage - Interventions", Count(cover.interventions)),
        ("Security Coverage - Injured", Count(cover.injured)),
        ("Security Coverage - Patients", Count(cover.patients)),
        ("Security Coverage - Deaths", Count(cover.deaths)),
    ]
}

/// Render the single-sheet workbook: header row plus one value row.
pub fn write_workbook(record: &WilayaRecord) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Statistics")?;

    for (col, (header, value)) in statistics_row(record).into_iter().enumerate() {
        let col = col as u16;
        worksheet.write_string(0, col, header)?;
        match value {
            CellValue::Text(text) => worksheet.write_string(1, col, &text)?,
            CellValue::Count(n) => worksheet.write_number(1, col, f64::from(n))?,
        };
    }

    Ok(workbook.save_to_buffer()?)
}

/// The conventional export file name for a wilaya and date.
pub fn export_file_name(wilaya_name: &str, date: &str) -> String {
    format!("{wilaya_name}_statistics_{date}.xlsx")
}

#[cfg(test)]
mod tests {
    use super::*;
    use himaya_domain::InterventionCounts;

    fn adrar_record() -> WilayaRecord {
        let mut r = WilayaRecord::empty("01", "Adrar", "2024-01-15");
        r.traffic_accidents = InterventionCounts {
            interventions: 3,
            injured: 2,
            deaths: 1,
        };
        r
    }

    #[test]
    fn row_has_24_named_columns_in_order() {
        let row = statistics_row(&adrar_record());
        assert_eq!(row.len(), 24);
        assert_eq!(row[0].0, "Date");
        assert_eq!(row[1].0, "Wilaya");
        assert_eq!(row[2].0, "Total Interventions");
        assert_eq!(row[23].0, "Security Coverage - Deaths");
    }

    #[test]
    fn total_column_matches_derived_total() {
        let row = statistics_row(&adrar_record());
        assert_eq!(row[2].1, CellValue::Count(3));
    }

    #[test]
    fn row_carries_date_and_wilaya_name() {
        let row = statistics_row(&adrar_record());
        assert_eq!(row[0].1, CellValue::Text("2024-01-15".into()));
        assert_eq!(row[1].1, CellValue::Text("Adrar".into()));
    }

    #[test]
    fn all_zero_record_exports_zero_total() {
        let row = statistics_row(&WilayaRecord::empty("02", "Chlef", "2024-06-01"));
        assert_eq!(row[2].1, CellValue::Count(0));
    }

    #[test]
    fn workbook_renders_to_xlsx_bytes() {
        let bytes = write_workbook(&adrar_record()).unwrap();
        // xlsx is a zip container.
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn file_name_follows_the_convention() {
        assert_eq!(
            export_file_name("Adrar", "2024-01-15"),
            "Adrar_statistics_2024-01-15.xlsx"
        );
    }
}

use std::io::Write;

use serde::Serialize;

use super::domain::Employee;

#[derive(Debug, Serialize)]
struct OverviewRow<'a> {
    #[serde(rename = "ID")]
    id: &'a str,
    #[serde(rename = "Naam")]
    name: &'a str,
    #[serde(rename = "Afdeling")]
    department: &'a str,
    #[serde(rename = "Functiefamilie")]
    family: &'a str,
    #[serde(rename = "Niveau")]
    final_level: Option<u8>,
    #[serde(rename = "Standaardfunctie")]
    role_title: &'a str,
    #[serde(rename = "Laatste update")]
    saved_at: String,
    #[serde(rename = "Notities")]
    notes: &'a str,
}

impl<'a> OverviewRow<'a> {
    fn from_employee(employee: &'a Employee) -> Self {
        let assessment = employee.assessment.as_ref();
        Self {
            id: &employee.id.0,
            name: &employee.name,
            department: &employee.department,
            family: assessment.map(|a| a.family.as_str()).unwrap_or(""),
            final_level: assessment.map(|a| a.final_level),
            role_title: assessment.map(|a| a.best_role_title.as_str()).unwrap_or(""),
            saved_at: assessment
                .map(|a| a.saved_at.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
            notes: &employee.notes,
        }
    }
}

/// Write the employee overview table as CSV with a header row.
pub fn write_overview_csv<W: Write>(employees: &[Employee], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if employees.is_empty() {
        csv_writer.write_record([
            "ID",
            "Naam",
            "Afdeling",
            "Functiefamilie",
            "Niveau",
            "Standaardfunctie",
            "Laatste update",
            "Notities",
        ])?;
    }
    for employee in employees {
        csv_writer.serialize(OverviewRow::from_employee(employee))?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to encode overview CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write overview CSV: {0}")]
    Io(#[from] std::io::Error),
}

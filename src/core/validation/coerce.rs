//! Field coercion of untyped day tables
//!
//! Vitals are coerced leniently: a cell that does not parse becomes null and
//! is caught by the required-field check. Patients and encounters feed the
//! warehouse directly, so a bad cell there fails immediately.

use crate::adapters::tables::RawTable;
use crate::domain::timestamp;
use crate::domain::{Acuity, DayTable, Encounter, EncounterId, Patient, PatientId, Sex, ValidationError};
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::str::FromStr;

/// A vitals row after lenient coercion
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CoercedVital {
    pub encounter_id: Option<EncounterId>,
    pub patient_id: Option<PatientId>,
    pub event_time: Option<NaiveDateTime>,
    pub vital_type: Option<String>,
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub source: Option<String>,
}

/// Coerced vitals plus how many non-empty cells failed to parse, per column
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CoercedVitals {
    pub rows: Vec<CoercedVital>,
    pub nulled: BTreeMap<&'static str, usize>,
}

fn lenient<T>(
    raw: Option<&str>,
    column: &'static str,
    nulled: &mut BTreeMap<&'static str, usize>,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let raw = raw?;
    let parsed = parse(raw);
    if parsed.is_none() {
        *nulled.entry(column).or_insert(0) += 1;
    }
    parsed
}

fn parse_value(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Coerces the vitals table, turning unparseable cells into nulls
pub fn coerce_vitals(table: &RawTable) -> CoercedVitals {
    let encounter_col = table.column("encounter_id");
    let patient_col = table.column("patient_id");
    let time_col = table.column("event_time");
    let type_col = table.column("vital_type");
    let value_col = table.column("value");
    let unit_col = table.column("unit");
    let source_col = table.column("source");

    let mut nulled = BTreeMap::new();
    let rows = (0..table.len())
        .map(|row| CoercedVital {
            encounter_id: lenient(table.cell(row, encounter_col), "encounter_id", &mut nulled, |raw| {
                EncounterId::from_str(raw).ok()
            }),
            patient_id: lenient(table.cell(row, patient_col), "patient_id", &mut nulled, |raw| {
                PatientId::from_str(raw).ok()
            }),
            event_time: lenient(table.cell(row, time_col), "event_time", &mut nulled, timestamp::parse),
            vital_type: table.cell(row, type_col).map(str::to_string),
            value: lenient(table.cell(row, value_col), "value", &mut nulled, parse_value),
            unit: table.cell(row, unit_col).map(str::to_string),
            source: table.cell(row, source_col).map(str::to_string),
        })
        .collect();

    CoercedVitals { rows, nulled }
}

/// Strict cell accessor: present and parseable, or a coercion error
struct StrictRow<'a> {
    table: &'a RawTable,
    name: DayTable,
    row: usize,
}

impl StrictRow<'_> {
    fn get<T>(&self, column: &'static str, parse: impl Fn(&str) -> Option<T>) -> Result<T, ValidationError> {
        let raw = self.table.cell(self.row, self.table.column(column));
        raw.and_then(&parse).ok_or_else(|| ValidationError::Coercion {
            table: self.name,
            // One-based data row, header excluded
            row: self.row + 1,
            column,
            value: raw.unwrap_or_default().to_string(),
        })
    }
}

/// Coerces the patient snapshot strictly
pub fn coerce_patients(table: &RawTable) -> Result<Vec<Patient>, ValidationError> {
    (0..table.len())
        .map(|row| {
            let cells = StrictRow {
                table,
                name: DayTable::Patients,
                row,
            };
            Ok(Patient::new(
                cells.get("patient_id", |raw| PatientId::from_str(raw).ok())?,
                cells.get("age", |raw| raw.parse::<u8>().ok())?,
                cells.get("sex", |raw| Sex::from_str(raw).ok())?,
            ))
        })
        .collect()
}

/// Coerces the encounter table strictly
pub fn coerce_encounters(table: &RawTable) -> Result<Vec<Encounter>, ValidationError> {
    (0..table.len())
        .map(|row| {
            let cells = StrictRow {
                table,
                name: DayTable::Encounters,
                row,
            };
            Ok(Encounter {
                encounter_id: cells.get("encounter_id", |raw| EncounterId::from_str(raw).ok())?,
                patient_id: cells.get("patient_id", |raw| PatientId::from_str(raw).ok())?,
                admit_time: cells.get("admit_time", timestamp::parse)?,
                discharge_time: cells.get("discharge_time", timestamp::parse)?,
                scenario: cells.get("scenario", |raw| Some(raw.to_string()))?,
                acuity: cells.get("acuity", |raw| Acuity::from_str(raw).ok())?,
            })
        })
        .collect()
}

//! SQLite warehouse

use super::schema::SCHEMA;
use super::traits::{TableLoad, Warehouse, WarehouseCounts};
use crate::core::transform::FactEncounterRow;
use crate::core::validation::checks::reconcile;
use crate::domain::timestamp;
use crate::domain::{ClinSynthError, Patient, Result};
use rusqlite::{params, Connection, Transaction};
use std::path::Path;

/// Warehouse backed by a single SQLite file
pub struct SqliteWarehouse {
    conn: Connection,
}

impl SqliteWarehouse {
    /// Opens (or creates) the warehouse at `path`, creating parent directories
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "Opened warehouse");
        Self::init(conn)
    }

    /// Opens an in-memory warehouse
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}

fn count(tx: &Transaction<'_>, sql: &str) -> Result<u64> {
    tx.query_row(sql, [], |row| row.get::<_, i64>(0))
        .map(|n| n as u64)
        .map_err(|e| ClinSynthError::CommitReadFailure(format!("{sql}: {e}")))
}

fn commit_reconciled(tx: Transaction<'_>, table: &'static str, expected_sql: &str) -> Result<TableLoad> {
    let expected = count(&tx, expected_sql)?;
    let committed = count(&tx, &format!("SELECT COUNT(*) FROM {table}"))?;

    // Dropping the transaction on error rolls it back
    reconcile(table, expected, committed)?;
    tx.commit()?;

    tracing::info!(table, rows = committed, "Warehouse table replaced");
    Ok(TableLoad {
        table,
        expected,
        committed,
    })
}

impl Warehouse for SqliteWarehouse {
    fn replace_patients(&mut self, patients: &[Patient]) -> Result<TableLoad> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM raw_patients", [])?;
        tx.execute("DELETE FROM dim_patients", [])?;
        {
            let mut insert =
                tx.prepare("INSERT INTO raw_patients (patient_id, age, sex) VALUES (?1, ?2, ?3)")?;
            for patient in patients {
                insert.execute(params![
                    patient.patient_id.value() as i64,
                    patient.age,
                    patient.sex.code()
                ])?;
            }
        }
        tx.execute(
            "INSERT INTO dim_patients (patient_id, age, sex) SELECT patient_id, age, sex FROM raw_patients",
            [],
        )?;

        commit_reconciled(tx, "dim_patients", "SELECT COUNT(DISTINCT patient_id) FROM raw_patients")
    }

    fn replace_encounters(&mut self, facts: &[FactEncounterRow]) -> Result<TableLoad> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM raw_encounters", [])?;
        tx.execute("DELETE FROM fact_encounters", [])?;
        {
            let mut raw = tx.prepare(
                "INSERT INTO raw_encounters
                   (encounter_id, patient_id, admit_time, discharge_time, scenario, acuity)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            let mut fact = tx.prepare(
                "INSERT INTO fact_encounters
                   (encounter_id, patient_id, admit_time, discharge_time, scenario, acuity, los_hours)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in facts {
                let enc = &row.encounter;
                let admit = timestamp::format(&enc.admit_time);
                let discharge = timestamp::format(&enc.discharge_time);
                raw.execute(params![
                    enc.encounter_id.value() as i64,
                    enc.patient_id.value() as i64,
                    admit,
                    discharge,
                    enc.scenario,
                    enc.acuity.as_str()
                ])?;
                fact.execute(params![
                    enc.encounter_id.value() as i64,
                    enc.patient_id.value() as i64,
                    admit,
                    discharge,
                    enc.scenario,
                    enc.acuity.as_str(),
                    row.los_hours
                ])?;
            }
        }

        commit_reconciled(tx, "fact_encounters", "SELECT COUNT(*) FROM raw_encounters")
    }

    fn row_counts(&self) -> Result<WarehouseCounts> {
        let count = |table: &str| -> Result<u64> {
            let n: i64 = self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
            Ok(n as u64)
        };

        Ok(WarehouseCounts {
            raw_patients: count("raw_patients")?,
            raw_encounters: count("raw_encounters")?,
            dim_patients: count("dim_patients")?,
            fact_encounters: count("fact_encounters")?,
        })
    }
}

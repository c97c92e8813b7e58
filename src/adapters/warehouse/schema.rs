//! Warehouse DDL
//!
//! Idempotent; run on every open. Raw tables carry no keys so that duplicate
//! rows reach the reconciliation step instead of failing the insert.

pub const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS raw_patients (
    patient_id  INTEGER NOT NULL,
    age         INTEGER NOT NULL,
    sex         TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS raw_encounters (
    encounter_id    INTEGER NOT NULL,
    patient_id      INTEGER NOT NULL,
    admit_time      TEXT    NOT NULL,
    discharge_time  TEXT    NOT NULL,
    scenario        TEXT    NOT NULL,
    acuity          TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS dim_patients (
    patient_id  INTEGER NOT NULL,
    age         INTEGER NOT NULL,
    sex         TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS fact_encounters (
    encounter_id    INTEGER NOT NULL,
    patient_id      INTEGER NOT NULL,
    admit_time      TEXT    NOT NULL,   -- YYYY-MM-DDTHH:MM:SS
    discharge_time  TEXT    NOT NULL,
    scenario        TEXT    NOT NULL,
    acuity          TEXT    NOT NULL,
    los_hours       REAL    NOT NULL
);

CREATE INDEX IF NOT EXISTS fact_encounters_patient_idx ON fact_encounters(patient_id);

PRAGMA user_version = 1;
";

//! Domain identifier types
//!
//! Newtype wrappers for patient and encounter identifiers. Both are positive,
//! monotonically assigned integers; the wrappers keep the two from being mixed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Patient identifier
///
/// Assigned once when the patient joins the registry and never reused.
///
/// # Examples
///
/// ```
/// use clinsynth::domain::ids::PatientId;
/// use std::str::FromStr;
///
/// let id = PatientId::from_str("17").unwrap();
/// assert_eq!(id.value(), 17);
/// assert_eq!(id.next(), PatientId::new(18));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(u64);

impl PatientId {
    /// Wraps a raw patient identifier
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Identifier assigned to the next patient after this one
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PatientId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| format!("Invalid patient ID '{s}': {e}"))
    }
}

/// Encounter identifier
///
/// Globally unique across every generated day. The last issued value is the
/// persisted encounter counter.
///
/// # Examples
///
/// ```
/// use clinsynth::domain::ids::EncounterId;
///
/// let last = EncounterId::new(41);
/// assert_eq!(last.next().value(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncounterId(u64);

impl EncounterId {
    /// Wraps a raw encounter identifier
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Identifier allocated after this one
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for EncounterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EncounterId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| format!("Invalid encounter ID '{s}': {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patient_id_parse_trims_whitespace() {
        assert_eq!(PatientId::from_str(" 12 ").unwrap(), PatientId::new(12));
    }

    #[test]
    fn test_patient_id_parse_rejects_negative() {
        assert!(PatientId::from_str("-1").is_err());
        assert!(PatientId::from_str("abc").is_err());
    }

    #[test]
    fn test_encounter_id_ordering() {
        let a = EncounterId::new(3);
        let b = a.next();
        assert!(b > a);
        assert_eq!(b.to_string(), "4");
    }

    #[test]
    fn test_ids_serialize_as_plain_integers() {
        let json = serde_json::to_string(&EncounterId::new(9)).unwrap();
        assert_eq!(json, "9");
        let back: PatientId = serde_json::from_str("5").unwrap();
        assert_eq!(back.value(), 5);
    }
}

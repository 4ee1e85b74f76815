//! Patient records and the field-level rules applied to them.
//!
//! Request bodies arrive as raw JSON and are parsed here rather than by the
//! HTTP extractor, so the workflow decides when a malformed body is reported
//! relative to the record lookup.

use std::fmt;
use std::ops::RangeInclusive;

use serde::Deserialize;
use serde_json::{Map, Value};

/// Ages accepted when a record is updated.
pub const PATIENT_AGE_RANGE: RangeInclusive<i32> = 1..=100;

const PAYLOAD_FIELDS: [&str; 4] = ["name", "age", "gender", "note"];

/// Store-assigned patient identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatientId(i64);

impl PatientId {
    /// Wrap a raw store identifier.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Parse a path segment. Anything that is not a base-10 integer yields `None`.
    ///
    /// # Examples
    /// ```
    /// use portal::domain::PatientId;
    ///
    /// assert_eq!(PatientId::parse("7"), Some(PatientId::new(7)));
    /// assert_eq!(PatientId::parse("seven"), None);
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        raw.parse::<i64>().ok().map(Self)
    }

    /// Raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stored patient record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub note: String,
}

/// Patient fields awaiting insertion; the store assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientDraft {
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub note: String,
}

/// Reasons a patient body is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatientValidationError {
    /// The body was not a JSON object with correctly typed fields.
    #[error("malformed patient body: {reason}")]
    MalformedBody { reason: String },
    /// Age fell outside [`PATIENT_AGE_RANGE`].
    #[error("age {age} is outside 1..=100")]
    AgeOutOfRange { age: i32 },
}

/// Patient fields supplied by a client. Absent fields stay `None`.
///
/// Field names match without regard to ASCII case, so `{"Age": 40}` sets the
/// age. When both spellings are present the exact lowercase key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PatientPayload {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub note: Option<String>,
}

impl PatientPayload {
    /// Decode a JSON request body.
    ///
    /// # Examples
    /// ```
    /// use portal::domain::PatientPayload;
    ///
    /// let payload = PatientPayload::parse(br#"{"Age": 40}"#).unwrap();
    /// assert_eq!(payload.age, Some(40));
    /// assert!(PatientPayload::parse(b"not json").is_err());
    /// ```
    pub fn parse(body: &[u8]) -> Result<Self, PatientValidationError> {
        let Value::Object(fields) = serde_json::from_slice::<Value>(body).map_err(malformed)? else {
            return Err(PatientValidationError::MalformedBody {
                reason: "expected a JSON object".to_owned(),
            });
        };
        serde_json::from_value(Value::Object(fold_field_names(fields))).map_err(malformed)
    }

    /// Build a new record; absent fields take their zero values.
    pub fn into_draft(self) -> PatientDraft {
        PatientDraft {
            name: self.name.unwrap_or_default(),
            age: self.age.unwrap_or_default(),
            gender: self.gender.unwrap_or_default(),
            note: self.note.unwrap_or_default(),
        }
    }

    /// Overlay the supplied fields onto an existing record.
    pub fn apply_to(self, patient: Patient) -> Patient {
        Patient {
            id: patient.id,
            name: self.name.unwrap_or(patient.name),
            age: self.age.unwrap_or(patient.age),
            gender: self.gender.unwrap_or(patient.gender),
            note: self.note.unwrap_or(patient.note),
        }
    }
}

fn malformed(err: serde_json::Error) -> PatientValidationError {
    PatientValidationError::MalformedBody {
        reason: err.to_string(),
    }
}

/// Rename keys to their canonical field name, dropping keys that match none.
fn fold_field_names(fields: Map<String, Value>) -> Map<String, Value> {
    let mut folded = Map::new();
    for (key, value) in fields {
        let Some(name) = PAYLOAD_FIELDS
            .iter()
            .find(|name| name.eq_ignore_ascii_case(&key))
        else {
            continue;
        };
        if *name == key {
            folded.insert(key, value);
        } else {
            folded.entry(*name).or_insert(value);
        }
    }
    folded
}

/// Check the update-time age invariant.
pub fn validate_age(age: i32) -> Result<(), PatientValidationError> {
    if PATIENT_AGE_RANGE.contains(&age) {
        Ok(())
    } else {
        Err(PatientValidationError::AgeOutOfRange { age })
    }
}

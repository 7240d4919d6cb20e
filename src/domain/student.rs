//! Student record and request payload types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Rendering used for `created_at` in API responses.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Fields that must be present and non-empty when a student is created.
const REQUIRED_FIELDS: [&str; 3] = ["student_id", "name", "email"];

/// A persisted student row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    pub id: i64,
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub course: Option<String>,
    pub year: Option<i64>,
    pub address: Option<String>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: Option<NaiveDateTime>,
}

/// Every mutable column of a student row.
///
/// Used both for inserts and for full-overwrite updates. A `None` is written
/// as SQL `NULL`; the table's `NOT NULL` constraints reject it for
/// `student_id`, `name` and `email`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentDraft {
    pub student_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub course: Option<String>,
    pub year: Option<i64>,
    pub address: Option<String>,
}

/// JSON body accepted by the create and update endpoints.
///
/// Omitted `phone`, `course` and `address` become `""`; an explicit `null`
/// is kept as `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentPayload {
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "blank")]
    pub phone: Option<String>,
    #[serde(default = "blank")]
    pub course: Option<String>,
    #[serde(default)]
    pub year: Option<i64>,
    #[serde(default = "blank")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

fn blank() -> Option<String> {
    Some(String::new())
}

impl StudentPayload {
    /// Check the create-time required fields, in declaration order.
    pub fn into_new_student(self) -> Result<StudentDraft, ValidationError> {
        for (field, value) in REQUIRED_FIELDS
            .into_iter()
            .zip([&self.student_id, &self.name, &self.email])
        {
            if value.as_deref().map_or(true, str::is_empty) {
                return Err(ValidationError::MissingField(field));
            }
        }
        Ok(self.into_replacement())
    }

    /// Take the payload as-is for a full overwrite.
    pub fn into_replacement(self) -> StudentDraft {
        StudentDraft {
            student_id: self.student_id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            course: self.course,
            year: self.year,
            address: self.address,
        }
    }
}

fn serialize_timestamp<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(ts) => serializer.collect_str(&ts.format(TIMESTAMP_FORMAT)),
        None => serializer.serialize_none(),
    }
}

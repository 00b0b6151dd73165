//! Employee records and the payloads exchanged with the REST API.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed set of employment arrangements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EmploymentType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    #[serde(rename = "Contract")]
    Contract,
    #[serde(rename = "Intern")]
    Intern,
}

impl EmploymentType {
    /// Every variant in display order.
    pub const ALL: [EmploymentType; 4] = [
        EmploymentType::FullTime,
        EmploymentType::PartTime,
        EmploymentType::Contract,
        EmploymentType::Intern,
    ];

    /// Wire/display label.
    pub fn as_str(self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full-time",
            EmploymentType::PartTime => "Part-time",
            EmploymentType::Contract => "Contract",
            EmploymentType::Intern => "Intern",
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmploymentType {
    type Err = String;

    /// Accepts the wire labels case-insensitively, plus the unhyphenated
    /// spellings (`fulltime`, `part_time`) typed on command lines.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let folded: String = value
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, '-' | '_' | ' '))
            .map(|ch| ch.to_ascii_lowercase())
            .collect();
        match folded.as_str() {
            "fulltime" => Ok(EmploymentType::FullTime),
            "parttime" => Ok(EmploymentType::PartTime),
            "contract" => Ok(EmploymentType::Contract),
            "intern" => Ok(EmploymentType::Intern),
            _ => Err(format!(
                "unknown employment type '{}' (expected one of: Full-time, Part-time, Contract, Intern)",
                value.trim()
            )),
        }
    }
}

/// Employee record as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub position: String,
    pub salary: f64,
    /// `YYYY-MM-DD`; fixed width so string order equals date order.
    pub start_date: String,
    pub employment_type: EmploymentType,
}

/// Employee fields without an id: the create/update request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    pub name: String,
    pub email: String,
    pub position: String,
    pub salary: f64,
    pub start_date: String,
    pub employment_type: EmploymentType,
}

impl Employee {
    /// Attach a server-assigned id to a draft.
    pub fn from_draft(id: impl Into<String>, draft: EmployeeDraft) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            email: draft.email,
            position: draft.position,
            salary: draft.salary,
            start_date: draft.start_date,
            employment_type: draft.employment_type,
        }
    }

    /// Copy of the editable fields.
    pub fn to_draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            position: self.position.clone(),
            salary: self.salary,
            start_date: self.start_date.clone(),
            employment_type: self.employment_type,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

// Numeric ids print without a fractional part when integral, so `7`, `7.0`
// and `"7"` all normalize to `"7"`.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Signed(value) => value.to_string(),
        RawId::Unsigned(value) => value.to_string(),
        RawId::Float(value) => crate::format::plain_number(value),
    })
}

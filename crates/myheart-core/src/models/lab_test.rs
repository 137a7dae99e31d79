//! Laboratory test models.

use serde::{Deserialize, Serialize};

use super::record::{Entity, EntityKind};
use crate::validation::{Choice, FieldSpec, FormInput, Rule, Schema, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
}

impl Choice for LabStatus {
    const ALL: &'static [Self] = &[LabStatus::Pending, LabStatus::InProgress, LabStatus::Completed];

    fn as_str(&self) -> &'static str {
        match self {
            LabStatus::Pending => "pending",
            LabStatus::InProgress => "in progress",
            LabStatus::Completed => "completed",
        }
    }
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("patientName", Rule::Text { min_len: 2 }, "Patient name is required"),
    FieldSpec::new("testType", Rule::Text { min_len: 3 }, "Test type is required"),
    FieldSpec::new("date", Rule::Date, "Date is required"),
    FieldSpec::new(
        "status",
        Rule::Choice(&["pending", "in progress", "completed"]),
        "Invalid test status",
    ),
    FieldSpec::new("result", Rule::Optional, ""),
];

/// A lab order and, once available, its result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LabTest {
    pub patient_name: String,
    pub test_type: String,
    pub date: String,
    pub status: LabStatus,
    /// Free-text result, kept opaque
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl Entity for LabTest {
    const KIND: EntityKind = EntityKind::LabTest;
    const SCHEMA: Schema = Schema::new(FIELDS);

    fn validate(input: &FormInput) -> Result<Self, ValidationErrors> {
        let form = Self::SCHEMA.check(input)?;
        Ok(Self {
            patient_name: form.text("patientName"),
            test_type: form.text("testType"),
            date: form.text("date"),
            status: form.choice("status")?,
            result: form.optional("result"),
        })
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.patient_name.as_str(), self.test_type.as_str()]
    }

    fn to_form(&self) -> FormInput {
        let mut input = FormInput::new()
            .with("patientName", &self.patient_name)
            .with("testType", &self.test_type)
            .with("date", &self.date)
            .with("status", self.status.as_str());
        input.set_opt("result", self.result.as_deref());
        input
    }

    fn seed() -> Vec<Self> {
        vec![LabTest {
            patient_name: "Alice Smith".into(),
            test_type: "Blood Test".into(),
            date: "2025-04-01".into(),
            status: LabStatus::Completed,
            result: Some("Normal".into()),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_progress_literal() {
        let input = FormInput::new()
            .with("patientName", "Bob Stone")
            .with("testType", "MRI")
            .with("date", "2025-05-05")
            .with("status", "in progress");
        let test = LabTest::validate(&input).unwrap();
        assert_eq!(test.status, LabStatus::InProgress);
        assert_eq!(serde_json::to_value(test.status).unwrap(), "in progress");
    }
}

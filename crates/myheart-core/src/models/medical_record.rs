//! Medical record (dossier) models.

use serde::{Deserialize, Serialize};

use super::record::{Entity, EntityKind, RecordId};
use crate::validation::{FieldSpec, FormInput, Rule, Schema, ValidationErrors};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("patientId", Rule::Reference, "Patient is required"),
    FieldSpec::new("diagnosis", Rule::Text { min_len: 5 }, "Diagnosis is required"),
    FieldSpec::new("treatment", Rule::Text { min_len: 5 }, "Treatment is required"),
    FieldSpec::new("date", Rule::Date, "Date is required"),
];

/// A diagnosis/treatment entry in a patient's history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub patient_id: RecordId,
    pub diagnosis: String,
    pub treatment: String,
    /// ISO date (YYYY-MM-DD)
    pub date: String,
}

impl Entity for MedicalRecord {
    const KIND: EntityKind = EntityKind::MedicalRecord;
    const SCHEMA: Schema = Schema::new(FIELDS);

    fn validate(input: &FormInput) -> Result<Self, ValidationErrors> {
        let form = Self::SCHEMA.check(input)?;
        Ok(Self {
            patient_id: form.parse("patientId")?,
            diagnosis: form.text("diagnosis"),
            treatment: form.text("treatment"),
            date: form.text("date"),
        })
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.diagnosis.as_str(), self.treatment.as_str()]
    }

    fn to_form(&self) -> FormInput {
        FormInput::new()
            .with("patientId", self.patient_id.to_string())
            .with("diagnosis", &self.diagnosis)
            .with("treatment", &self.treatment)
            .with("date", &self.date)
    }

    fn seed() -> Vec<Self> {
        vec![MedicalRecord {
            patient_id: RecordId(1),
            diagnosis: "Hypertension".into(),
            treatment: "Medication for blood pressure".into(),
            date: "2025-03-15".into(),
        }]
    }
}

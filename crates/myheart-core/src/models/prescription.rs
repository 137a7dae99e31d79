//! Prescription models.

use serde::{Deserialize, Serialize};

use super::record::{Entity, EntityKind};
use crate::validation::{FieldSpec, FormInput, Rule, Schema, ValidationErrors};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("patientName", Rule::Text { min_len: 2 }, "Patient name is required"),
    FieldSpec::new("doctorName", Rule::Text { min_len: 2 }, "Doctor name is required"),
    FieldSpec::new("medication", Rule::Text { min_len: 2 }, "Medication is required"),
    FieldSpec::new("dosage", Rule::Text { min_len: 1 }, "Dosage is required"),
    FieldSpec::new("date", Rule::Date, "Date is required"),
];

/// A medication order. Patient and doctor are free-text names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub patient_name: String,
    pub doctor_name: String,
    pub medication: String,
    pub dosage: String,
    pub date: String,
}

impl Entity for Prescription {
    const KIND: EntityKind = EntityKind::Prescription;
    const SCHEMA: Schema = Schema::new(FIELDS);

    fn validate(input: &FormInput) -> Result<Self, ValidationErrors> {
        let form = Self::SCHEMA.check(input)?;
        Ok(Self {
            patient_name: form.text("patientName"),
            doctor_name: form.text("doctorName"),
            medication: form.text("medication"),
            dosage: form.text("dosage"),
            date: form.text("date"),
        })
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.patient_name.as_str()]
    }

    fn to_form(&self) -> FormInput {
        FormInput::new()
            .with("patientName", &self.patient_name)
            .with("doctorName", &self.doctor_name)
            .with("medication", &self.medication)
            .with("dosage", &self.dosage)
            .with("date", &self.date)
    }

    fn seed() -> Vec<Self> {
        vec![Prescription {
            patient_name: "John Doe".into(),
            doctor_name: "Dr. Smith".into(),
            medication: "Paracetamol".into(),
            dosage: "500mg".into(),
            date: "2025-04-01".into(),
        }]
    }
}

//! Appointment models.

use serde::{Deserialize, Serialize};

use super::record::{Entity, EntityKind, RecordId};
use crate::validation::{
    Choice, FieldSpec, FormInput, Rule, Schema, ValidationErrors, U32_MAX,
};

/// Reason for the visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentType {
    Consultation,
    Followup,
    Emergency,
    Routine,
}

impl Choice for AppointmentType {
    const ALL: &'static [Self] = &[
        AppointmentType::Consultation,
        AppointmentType::Followup,
        AppointmentType::Emergency,
        AppointmentType::Routine,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            AppointmentType::Consultation => "consultation",
            AppointmentType::Followup => "followup",
            AppointmentType::Emergency => "emergency",
            AppointmentType::Routine => "routine",
        }
    }
}

/// Appointment lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Cancelled,
    Completed,
}

impl Choice for AppointmentStatus {
    const ALL: &'static [Self] = &[
        AppointmentStatus::Scheduled,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::Completed,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
        }
    }
}

/// Duration pre-filled on a fresh form, in minutes.
pub const DEFAULT_DURATION_MINUTES: u32 = 30;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("patientId", Rule::Reference, "Patient is required"),
    FieldSpec::new("doctorId", Rule::Reference, "Doctor is required"),
    FieldSpec::new("date", Rule::Date, "Date is required"),
    FieldSpec::new("time", Rule::Time, "Time is required"),
    FieldSpec::new(
        "duration",
        Rule::Integer { min: 15, max: U32_MAX },
        "Duration must be at least 15 minutes",
    ),
    FieldSpec::new(
        "type",
        Rule::Choice(&["consultation", "followup", "emergency", "routine"]),
        "Invalid appointment type",
    ),
    FieldSpec::new("notes", Rule::Optional, ""),
    FieldSpec::new(
        "status",
        Rule::Choice(&["scheduled", "confirmed", "cancelled", "completed"]),
        "Invalid appointment status",
    ),
];

/// A scheduled visit between a patient and a doctor.
///
/// `patient_name` and `doctor_name` are denormalized from the referenced
/// records when the appointment is submitted through the clinic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub patient_id: RecordId,
    pub doctor_id: RecordId,
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub doctor_name: String,
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    /// Time of day (HH:MM)
    pub time: String,
    /// Minutes
    pub duration: u32,
    #[serde(rename = "type")]
    pub kind: AppointmentType,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Entity for Appointment {
    const KIND: EntityKind = EntityKind::Appointment;
    const SCHEMA: Schema = Schema::new(FIELDS);

    fn validate(input: &FormInput) -> Result<Self, ValidationErrors> {
        let form = Self::SCHEMA.check(input)?;
        Ok(Self {
            patient_id: form.parse("patientId")?,
            doctor_id: form.parse("doctorId")?,
            patient_name: String::new(),
            doctor_name: String::new(),
            date: form.text("date"),
            time: form.text("time"),
            duration: form.parse("duration")?,
            kind: form.choice("type")?,
            status: form.choice("status")?,
            notes: form.optional("notes"),
        })
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.patient_name.as_str(), self.doctor_name.as_str()]
    }

    fn to_form(&self) -> FormInput {
        let mut input = FormInput::new()
            .with("patientId", self.patient_id.to_string())
            .with("doctorId", self.doctor_id.to_string())
            .with("date", &self.date)
            .with("time", &self.time)
            .with("duration", self.duration.to_string())
            .with("type", self.kind.as_str())
            .with("status", self.status.as_str());
        input.set_opt("notes", self.notes.as_deref());
        input
    }

    fn seed() -> Vec<Self> {
        vec![
            Appointment {
                patient_id: RecordId(1),
                doctor_id: RecordId(1),
                patient_name: "John Doe".into(),
                doctor_name: "Dr. Smith".into(),
                date: "2024-03-20".into(),
                time: "09:00".into(),
                duration: 30,
                kind: AppointmentType::Consultation,
                status: AppointmentStatus::Scheduled,
                notes: Some("Initial consultation".into()),
            },
            Appointment {
                patient_id: RecordId(2),
                doctor_id: RecordId(2),
                patient_name: "Jane Smith".into(),
                doctor_name: "Dr. Johnson".into(),
                date: "2024-03-20".into(),
                time: "10:00".into(),
                duration: 45,
                kind: AppointmentType::Followup,
                status: AppointmentStatus::Confirmed,
                notes: Some("Follow-up appointment".into()),
            },
        ]
    }

    fn form_defaults() -> FormInput {
        FormInput::new()
            .with("duration", DEFAULT_DURATION_MINUTES.to_string())
            .with("status", AppointmentStatus::Scheduled.as_str())
    }
}

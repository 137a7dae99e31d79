//! MyHeart Core Library
//!
//! In-memory record management for a small clinic: patients, appointments,
//! medical records, doctors, prescriptions, pharmacies, lab tests, invoices
//! and notifications.
//!
//! # Architecture
//!
//! ```text
//! form input ──► Validator ──► Record Store ──► Search Filter ──► Paginator
//!     ▲              │                                               │
//!     │        field errors                                     page view
//!     └──── Form Controller ◄──────── Entity Manager ◄──────────────┘
//!                                          │
//!                                       Clinic (one manager per section,
//!                                               patient/doctor reference checks)
//! ```
//!
//! # Modules
//!
//! - [`validation`]: Form input, field rules and validation errors
//! - [`models`]: Entity types and the record envelope
//! - [`store`]: Record store, search filter and pagination
//! - [`form`]: Form controller for create/edit
//! - [`manager`]: Generic per-entity manager and the `Section` trait
//! - [`clinic`]: The nine sections plus cross-store checks
//! - [`config`]: Page size and seeding options

pub mod clinic;
pub mod config;
pub mod form;
pub mod manager;
pub mod models;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use clinic::{Clinic, SectionSummary};
pub use config::{ClinicConfig, ConfigError};
pub use form::{FormController, FormTarget};
pub use manager::{EntityManager, ManagerError, Section, Submission, ViewMode};
pub use models::{Entity, EntityKind, Record, RecordId};
pub use store::{Page, Paginator, RecordStore, StoreError};
pub use validation::{FieldSpec, FormInput, Rule, ValidationErrors};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum MyHeartError {
    #[error("{0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Lock error: {0}")]
    LockError(String),
}

impl From<ValidationErrors> for MyHeartError {
    fn from(e: ValidationErrors) -> Self {
        MyHeartError::ValidationError(e.to_string())
    }
}

impl From<StoreError> for MyHeartError {
    fn from(e: StoreError) -> Self {
        MyHeartError::NotFound(e.to_string())
    }
}

impl From<ManagerError> for MyHeartError {
    fn from(e: ManagerError) -> Self {
        match e {
            state @ (ManagerError::FormClosed | ManagerError::EditInProgress(_)) => {
                MyHeartError::InvalidState(state.to_string())
            }
            ManagerError::Invalid(errors) => errors.into(),
            ManagerError::Store(err) => err.into(),
        }
    }
}

impl From<ConfigError> for MyHeartError {
    fn from(e: ConfigError) -> Self {
        MyHeartError::ConfigError(e.to_string())
    }
}

impl From<serde_json::Error> for MyHeartError {
    fn from(e: serde_json::Error) -> Self {
        MyHeartError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for MyHeartError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        MyHeartError::LockError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open a seeded clinic with the default page sizes.
#[uniffi::export]
pub fn open_clinic() -> Arc<MyHeartCore> {
    Arc::new(MyHeartCore::new(Clinic::new()))
}

/// Open a clinic from a JSON config, e.g. `{"page_sizes":{"patient":20},"seed":false}`.
#[uniffi::export]
pub fn open_clinic_with_config(json: String) -> Result<Arc<MyHeartCore>, MyHeartError> {
    let config = ClinicConfig::from_json_str(&json)?;
    Ok(Arc::new(MyHeartCore::new(Clinic::with_config(&config))))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe clinic wrapper for FFI.
#[derive(uniffi::Object)]
pub struct MyHeartCore {
    clinic: Arc<Mutex<Clinic>>,
}

impl MyHeartCore {
    pub fn new(clinic: Clinic) -> Self {
        Self {
            clinic: Arc::new(Mutex::new(clinic)),
        }
    }
}

#[uniffi::export]
impl MyHeartCore {
    // =========================================================================
    // Sections
    // =========================================================================

    /// Dashboard cards for every section.
    pub fn overview(&self) -> Result<Vec<FfiSectionSummary>, MyHeartError> {
        let clinic = self.clinic.lock()?;
        Ok(clinic.overview().into_iter().map(|s| s.into()).collect())
    }

    pub fn record_count(&self, kind: FfiEntityKind) -> Result<u64, MyHeartError> {
        let clinic = self.clinic.lock()?;
        Ok(clinic.section(kind.into()).len() as u64)
    }

    /// Form layout of a section.
    pub fn form_fields(&self, kind: FfiEntityKind) -> Result<Vec<FfiFieldSpec>, MyHeartError> {
        let clinic = self.clinic.lock()?;
        let fields = clinic.section(kind.into()).schema();
        Ok(fields.iter().map(|f| f.into()).collect())
    }

    // =========================================================================
    // Search and Pagination
    // =========================================================================

    pub fn set_query(&self, kind: FfiEntityKind, query: String) -> Result<(), MyHeartError> {
        let mut clinic = self.clinic.lock()?;
        clinic.section_mut(kind.into()).set_query(&query);
        Ok(())
    }

    /// Returns false when already on the last page.
    pub fn next_page(&self, kind: FfiEntityKind) -> Result<bool, MyHeartError> {
        let mut clinic = self.clinic.lock()?;
        Ok(clinic.section_mut(kind.into()).next_page())
    }

    /// Returns false when already on page 1.
    pub fn prev_page(&self, kind: FfiEntityKind) -> Result<bool, MyHeartError> {
        let mut clinic = self.clinic.lock()?;
        Ok(clinic.section_mut(kind.into()).prev_page())
    }

    pub fn go_to_page(&self, kind: FfiEntityKind, page: u32) -> Result<bool, MyHeartError> {
        let mut clinic = self.clinic.lock()?;
        Ok(clinic.section_mut(kind.into()).go_to_page(page as usize))
    }

    /// Current page of the filtered records as JSON.
    pub fn current_page_json(&self, kind: FfiEntityKind) -> Result<String, MyHeartError> {
        let clinic = self.clinic.lock()?;
        Ok(clinic.section(kind.into()).current_page_json()?)
    }

    // =========================================================================
    // Forms
    // =========================================================================

    pub fn open_create_form(&self, kind: FfiEntityKind) -> Result<(), MyHeartError> {
        let mut clinic = self.clinic.lock()?;
        clinic.section_mut(kind.into()).open_create_form();
        Ok(())
    }

    pub fn open_edit_form(&self, kind: FfiEntityKind, id: u64) -> Result<(), MyHeartError> {
        let mut clinic = self.clinic.lock()?;
        clinic.section_mut(kind.into()).open_edit_form(RecordId(id))?;
        Ok(())
    }

    pub fn set_field(
        &self,
        kind: FfiEntityKind,
        name: String,
        value: String,
    ) -> Result<(), MyHeartError> {
        let mut clinic = self.clinic.lock()?;
        clinic.section_mut(kind.into()).set_field(&name, &value)?;
        Ok(())
    }

    /// Submit the open form. Field errors come back in the outcome.
    pub fn submit_form(&self, kind: FfiEntityKind) -> Result<FfiSubmitOutcome, MyHeartError> {
        let mut clinic = self.clinic.lock()?;
        FfiSubmitOutcome::from_result(clinic.submit(kind.into()))
    }

    pub fn cancel_form(&self, kind: FfiEntityKind) -> Result<(), MyHeartError> {
        let mut clinic = self.clinic.lock()?;
        clinic.section_mut(kind.into()).cancel_form();
        Ok(())
    }

    /// Create a record from a complete set of form fields.
    pub fn submit_record(
        &self,
        kind: FfiEntityKind,
        fields: HashMap<String, String>,
    ) -> Result<FfiSubmitOutcome, MyHeartError> {
        let mut clinic = self.clinic.lock()?;
        let input = FormInput::from(fields);
        FfiSubmitOutcome::from_result(clinic.submit_input(kind.into(), &input))
    }

    // =========================================================================
    // Records
    // =========================================================================

    pub fn delete_record(&self, kind: FfiEntityKind, id: u64) -> Result<(), MyHeartError> {
        let mut clinic = self.clinic.lock()?;
        clinic.delete(kind.into(), RecordId(id))?;
        Ok(())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe section selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiEntityKind {
    Patient,
    Appointment,
    MedicalRecord,
    Doctor,
    Prescription,
    Pharmacy,
    LabTest,
    Invoice,
    Notification,
}

impl From<FfiEntityKind> for EntityKind {
    fn from(kind: FfiEntityKind) -> Self {
        match kind {
            FfiEntityKind::Patient => EntityKind::Patient,
            FfiEntityKind::Appointment => EntityKind::Appointment,
            FfiEntityKind::MedicalRecord => EntityKind::MedicalRecord,
            FfiEntityKind::Doctor => EntityKind::Doctor,
            FfiEntityKind::Prescription => EntityKind::Prescription,
            FfiEntityKind::Pharmacy => EntityKind::Pharmacy,
            FfiEntityKind::LabTest => EntityKind::LabTest,
            FfiEntityKind::Invoice => EntityKind::Invoice,
            FfiEntityKind::Notification => EntityKind::Notification,
        }
    }
}

impl From<EntityKind> for FfiEntityKind {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Patient => FfiEntityKind::Patient,
            EntityKind::Appointment => FfiEntityKind::Appointment,
            EntityKind::MedicalRecord => FfiEntityKind::MedicalRecord,
            EntityKind::Doctor => FfiEntityKind::Doctor,
            EntityKind::Prescription => FfiEntityKind::Prescription,
            EntityKind::Pharmacy => FfiEntityKind::Pharmacy,
            EntityKind::LabTest => FfiEntityKind::LabTest,
            EntityKind::Invoice => FfiEntityKind::Invoice,
            EntityKind::Notification => FfiEntityKind::Notification,
        }
    }
}

/// FFI-safe field error.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct FfiFieldError {
    pub field: String,
    pub message: String,
}

/// Result of a submission: the record id on success, field errors otherwise.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct FfiSubmitOutcome {
    pub record_id: Option<u64>,
    pub errors: Vec<FfiFieldError>,
}

impl FfiSubmitOutcome {
    fn from_result(result: Result<Submission, ManagerError>) -> Result<Self, MyHeartError> {
        match result {
            Ok(submission) => Ok(Self {
                record_id: Some(submission.id().get()),
                errors: Vec::new(),
            }),
            Err(ManagerError::Invalid(errors)) => Ok(Self {
                record_id: None,
                errors: errors
                    .iter()
                    .map(|(field, message)| FfiFieldError {
                        field: field.to_string(),
                        message: message.to_string(),
                    })
                    .collect(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.record_id.is_some()
    }
}

/// FFI-safe dashboard card.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSectionSummary {
    pub kind: FfiEntityKind,
    pub title: String,
    pub description: String,
    pub route: String,
    pub record_count: u64,
}

impl From<SectionSummary> for FfiSectionSummary {
    fn from(summary: SectionSummary) -> Self {
        Self {
            kind: summary.kind.into(),
            title: summary.title.to_string(),
            description: summary.description.to_string(),
            route: summary.route.to_string(),
            record_count: summary.record_count as u64,
        }
    }
}

/// FFI-safe form field description.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFieldSpec {
    pub name: String,
    /// Input widget hint: text, date, time, email, phone, integer, decimal,
    /// choice, reference or optional
    pub input_type: String,
    pub required: bool,
    /// Allowed literals for choice fields
    pub choices: Vec<String>,
    pub message: String,
}

impl From<&FieldSpec> for FfiFieldSpec {
    fn from(spec: &FieldSpec) -> Self {
        let (input_type, choices) = match spec.rule {
            Rule::Text { .. } => ("text", Vec::new()),
            Rule::Date => ("date", Vec::new()),
            Rule::Time => ("time", Vec::new()),
            Rule::Email => ("email", Vec::new()),
            Rule::Phone { .. } => ("phone", Vec::new()),
            Rule::Integer { .. } => ("integer", Vec::new()),
            Rule::Decimal { .. } => ("decimal", Vec::new()),
            Rule::Choice(literals) => ("choice", literals.iter().map(|s| s.to_string()).collect()),
            Rule::Reference => ("reference", Vec::new()),
            Rule::Optional => ("optional", Vec::new()),
        };
        Self {
            name: spec.name.to_string(),
            input_type: input_type.to_string(),
            required: spec.is_required(),
            choices,
            message: spec.message.to_string(),
        }
    }
}

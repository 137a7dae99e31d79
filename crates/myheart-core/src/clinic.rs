//! The clinic: one manager per section, with cross-store reference checks.

use log::info;
use serde::Serialize;

use crate::config::ClinicConfig;
use crate::manager::{EntityManager, ManagerResult, Section, Submission};
use crate::models::{
    Appointment, Doctor, Entity, EntityKind, Invoice, LabTest, MedicalRecord, Notification,
    Patient, Pharmacy, Prescription, RecordId,
};
use crate::store::RecordStore;
use crate::validation::{FormInput, ValidationErrors};

pub const UNKNOWN_PATIENT: &str = "Unknown patient";
pub const UNKNOWN_DOCTOR: &str = "Unknown doctor";

/// Dashboard card for one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSummary {
    pub kind: EntityKind,
    pub title: &'static str,
    pub description: &'static str,
    pub route: &'static str,
    pub record_count: usize,
}

/// All nine sections of the clinic.
///
/// Managers are only reachable read-only or through [`Section`]; every
/// submission goes through [`Clinic::submit`] or [`Clinic::submit_input`].
#[derive(Debug, Clone)]
pub struct Clinic {
    patients: EntityManager<Patient>,
    appointments: EntityManager<Appointment>,
    medical_records: EntityManager<MedicalRecord>,
    doctors: EntityManager<Doctor>,
    prescriptions: EntityManager<Prescription>,
    pharmacies: EntityManager<Pharmacy>,
    lab_tests: EntityManager<LabTest>,
    invoices: EntityManager<Invoice>,
    notifications: EntityManager<Notification>,
}

impl Default for Clinic {
    fn default() -> Self {
        Self::new()
    }
}

fn build<E: Entity>(config: &ClinicConfig) -> EntityManager<E> {
    let store = if config.seed {
        RecordStore::seeded()
    } else {
        RecordStore::new()
    };
    EntityManager::with_store(store, config.page_size(E::KIND))
}

impl Clinic {
    /// Seeded clinic with default page sizes.
    pub fn new() -> Self {
        Self::with_config(&ClinicConfig::default())
    }

    pub fn with_config(config: &ClinicConfig) -> Self {
        let clinic = Self {
            patients: build(config),
            appointments: build(config),
            medical_records: build(config),
            doctors: build(config),
            prescriptions: build(config),
            pharmacies: build(config),
            lab_tests: build(config),
            invoices: build(config),
            notifications: build(config),
        };
        info!("Clinic ready (seeded: {})", config.seed);
        clinic
    }

    pub fn patients(&self) -> &EntityManager<Patient> {
        &self.patients
    }

    pub fn appointments(&self) -> &EntityManager<Appointment> {
        &self.appointments
    }

    pub fn medical_records(&self) -> &EntityManager<MedicalRecord> {
        &self.medical_records
    }

    pub fn doctors(&self) -> &EntityManager<Doctor> {
        &self.doctors
    }

    pub fn prescriptions(&self) -> &EntityManager<Prescription> {
        &self.prescriptions
    }

    pub fn pharmacies(&self) -> &EntityManager<Pharmacy> {
        &self.pharmacies
    }

    pub fn lab_tests(&self) -> &EntityManager<LabTest> {
        &self.lab_tests
    }

    pub fn invoices(&self) -> &EntityManager<Invoice> {
        &self.invoices
    }

    pub fn notifications(&self) -> &EntityManager<Notification> {
        &self.notifications
    }

    pub fn section(&self, kind: EntityKind) -> &dyn Section {
        match kind {
            EntityKind::Patient => &self.patients,
            EntityKind::Appointment => &self.appointments,
            EntityKind::MedicalRecord => &self.medical_records,
            EntityKind::Doctor => &self.doctors,
            EntityKind::Prescription => &self.prescriptions,
            EntityKind::Pharmacy => &self.pharmacies,
            EntityKind::LabTest => &self.lab_tests,
            EntityKind::Invoice => &self.invoices,
            EntityKind::Notification => &self.notifications,
        }
    }

    pub fn section_mut(&mut self, kind: EntityKind) -> &mut dyn Section {
        match kind {
            EntityKind::Patient => &mut self.patients,
            EntityKind::Appointment => &mut self.appointments,
            EntityKind::MedicalRecord => &mut self.medical_records,
            EntityKind::Doctor => &mut self.doctors,
            EntityKind::Prescription => &mut self.prescriptions,
            EntityKind::Pharmacy => &mut self.pharmacies,
            EntityKind::LabTest => &mut self.lab_tests,
            EntityKind::Invoice => &mut self.invoices,
            EntityKind::Notification => &mut self.notifications,
        }
    }

    /// Dashboard overview, in display order.
    pub fn overview(&self) -> Vec<SectionSummary> {
        EntityKind::ALL
            .iter()
            .map(|&kind| SectionSummary {
                kind,
                title: kind.title(),
                description: kind.description(),
                route: kind.route(),
                record_count: self.section(kind).len(),
            })
            .collect()
    }

    // =========================================================================
    // Submission with reference checks
    // =========================================================================

    /// Submit the open form of a section.
    ///
    /// Appointments and medical records have their patient/doctor ids checked
    /// against the corresponding stores first.
    pub fn submit(&mut self, kind: EntityKind) -> ManagerResult<Submission> {
        match kind {
            EntityKind::Appointment => {
                let (patients, doctors) = (&self.patients, &self.doctors);
                self.appointments
                    .submit_with(|appt| resolve_appointment(appt, patients, doctors))
            }
            EntityKind::MedicalRecord => {
                let patients = &self.patients;
                self.medical_records
                    .submit_with(|record| check_patient(record.patient_id, patients))
            }
            EntityKind::Patient => self.patients.submit(),
            EntityKind::Doctor => self.doctors.submit(),
            EntityKind::Prescription => self.prescriptions.submit(),
            EntityKind::Pharmacy => self.pharmacies.submit(),
            EntityKind::LabTest => self.lab_tests.submit(),
            EntityKind::Invoice => self.invoices.submit(),
            EntityKind::Notification => self.notifications.submit(),
        }
    }

    /// Open a create form for a section, fill it and submit.
    pub fn submit_input(&mut self, kind: EntityKind, input: &FormInput) -> ManagerResult<Submission> {
        match kind {
            EntityKind::Appointment => {
                let (patients, doctors) = (&self.patients, &self.doctors);
                self.appointments.submit_input_with(input, |appt| {
                    resolve_appointment(appt, patients, doctors)
                })
            }
            EntityKind::MedicalRecord => {
                let patients = &self.patients;
                self.medical_records
                    .submit_input_with(input, |record| check_patient(record.patient_id, patients))
            }
            EntityKind::Patient => self.patients.submit_input(input),
            EntityKind::Doctor => self.doctors.submit_input(input),
            EntityKind::Prescription => self.prescriptions.submit_input(input),
            EntityKind::Pharmacy => self.pharmacies.submit_input(input),
            EntityKind::LabTest => self.lab_tests.submit_input(input),
            EntityKind::Invoice => self.invoices.submit_input(input),
            EntityKind::Notification => self.notifications.submit_input(input),
        }
    }

    pub fn delete(&mut self, kind: EntityKind, id: RecordId) -> ManagerResult<()> {
        self.section_mut(kind).delete(id)
    }
}

fn check_patient(
    id: RecordId,
    patients: &EntityManager<Patient>,
) -> Result<(), ValidationErrors> {
    if patients.get(id).is_some() {
        Ok(())
    } else {
        Err(ValidationErrors::single("patientId", UNKNOWN_PATIENT))
    }
}

/// Check both references and denormalize the display names.
fn resolve_appointment(
    appt: &mut Appointment,
    patients: &EntityManager<Patient>,
    doctors: &EntityManager<Doctor>,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    match patients.get(appt.patient_id) {
        Some(patient) => appt.patient_name = patient.data.full_name(),
        None => errors.add("patientId", UNKNOWN_PATIENT),
    }
    match doctors.get(appt.doctor_id) {
        Some(doctor) => appt.doctor_name = doctor.data.full_name(),
        None => errors.add("doctorId", UNKNOWN_DOCTOR),
    }

    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::{ManagerError, ViewMode};

    fn appointment_input(patient: &str, doctor: &str) -> FormInput {
        Appointment::form_defaults()
            .with("patientId", patient)
            .with("doctorId", doctor)
            .with("date", "2025-07-01")
            .with("time", "11:15")
            .with("type", "consultation")
    }

    #[test]
    fn test_overview_lists_every_section() {
        let clinic = Clinic::new();
        let overview = clinic.overview();
        assert_eq!(overview.len(), 9);
        assert_eq!(overview[0].route, "patients");
        assert_eq!(overview[1].record_count, 2);
        assert!(overview.iter().all(|s| s.record_count >= 1));
    }

    #[test]
    fn test_appointment_names_denormalized() {
        let mut clinic = Clinic::new();
        let submission = clinic
            .submit_input(EntityKind::Appointment, &appointment_input("1", "1"))
            .unwrap();
        assert_eq!(submission, Submission::Created(RecordId(3)));

        let appt = &clinic.appointments.get(RecordId(3)).unwrap().data;
        assert_eq!(appt.patient_name, "John Doe");
        assert_eq!(appt.doctor_name, "Dr. John Doe");
    }

    #[test]
    fn test_dangling_references_rejected() {
        let mut clinic = Clinic::new();
        let err = clinic
            .submit_input(EntityKind::Appointment, &appointment_input("9", "8"))
            .unwrap_err();
        let ManagerError::Invalid(errors) = err else {
            panic!("expected validation errors");
        };
        assert_eq!(errors.get("patientId"), Some(UNKNOWN_PATIENT));
        assert_eq!(errors.get("doctorId"), Some(UNKNOWN_DOCTOR));
        assert_eq!(clinic.appointments.len(), 2);
        assert_eq!(clinic.appointments.mode(), ViewMode::Form);
    }

    #[test]
    fn test_medical_record_needs_known_patient() {
        let mut clinic = Clinic::new();
        let input = FormInput::new()
            .with("patientId", "2")
            .with("diagnosis", "Asthma attack")
            .with("treatment", "Inhaled bronchodilator")
            .with("date", "2025-02-02");
        assert!(clinic.submit_input(EntityKind::MedicalRecord, &input).is_err());

        clinic.medical_records.cancel_form();
        let input = input.with("patientId", "1");
        assert!(clinic.submit_input(EntityKind::MedicalRecord, &input).is_ok());
        assert_eq!(clinic.medical_records.len(), 2);
    }

    #[test]
    fn test_deleted_patient_no_longer_referenceable() {
        let mut clinic = Clinic::new();
        clinic.delete(EntityKind::Patient, RecordId(1)).unwrap();
        assert!(clinic
            .submit_input(EntityKind::Appointment, &appointment_input("1", "1"))
            .is_err());
    }

    #[test]
    fn test_submit_through_open_form() {
        let mut clinic = Clinic::new();
        let section = clinic.section_mut(EntityKind::Appointment);
        section.open_create_form();
        for (name, value) in appointment_input("1", "1").iter() {
            section.set_field(name, value).unwrap();
        }
        assert!(clinic.submit(EntityKind::Appointment).is_ok());
        assert_eq!(clinic.appointments.len(), 3);
    }

    #[test]
    fn test_section_dispatch_still_checks_references() {
        let mut clinic = Clinic::new();
        let section = clinic.section_mut(EntityKind::Appointment);
        section.open_create_form();
        for (name, value) in appointment_input("99", "99").iter() {
            section.set_field(name, value).unwrap();
        }

        let err = clinic.submit(EntityKind::Appointment).unwrap_err();
        let ManagerError::Invalid(errors) = err else {
            panic!("expected validation errors");
        };
        assert_eq!(errors.get("patientId"), Some(UNKNOWN_PATIENT));
        assert_eq!(errors.get("doctorId"), Some(UNKNOWN_DOCTOR));
        assert_eq!(clinic.appointments().len(), 2);
        assert_eq!(
            clinic.section(EntityKind::Appointment).form_errors(),
            Some(errors)
        );
    }

    #[test]
    fn test_edit_through_section_rechecks_references() {
        let mut clinic = Clinic::new();
        let section = clinic.section_mut(EntityKind::MedicalRecord);
        section.open_edit_form(RecordId(1)).unwrap();
        section.set_field("patientId", "42").unwrap();

        assert!(clinic.submit(EntityKind::MedicalRecord).is_err());
        assert_eq!(
            clinic.medical_records().get(RecordId(1)).unwrap().data.patient_id,
            RecordId(1)
        );
    }

    #[test]
    fn test_unseeded_config() {
        let config = ClinicConfig {
            seed: false,
            ..ClinicConfig::default()
        }
        .with_page_size(EntityKind::Notification, 3);
        let clinic = Clinic::with_config(&config);
        assert!(clinic.overview().iter().all(|s| s.record_count == 0));
        assert_eq!(clinic.notifications.page_size(), 3);
    }
}

//! Record envelope, identifiers and the `Entity` contract.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::validation::{FieldSpec, FormInput, Schema, ValidationErrors};

/// Store-assigned record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl RecordId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(RecordId)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        RecordId(id)
    }
}

/// The nine record kinds managed by the clinic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
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

impl EntityKind {
    /// Every kind, in dashboard order.
    pub const ALL: [EntityKind; 9] = [
        EntityKind::Patient,
        EntityKind::Appointment,
        EntityKind::MedicalRecord,
        EntityKind::Doctor,
        EntityKind::Prescription,
        EntityKind::Pharmacy,
        EntityKind::LabTest,
        EntityKind::Invoice,
        EntityKind::Notification,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Patient => "patient",
            EntityKind::Appointment => "appointment",
            EntityKind::MedicalRecord => "medical_record",
            EntityKind::Doctor => "doctor",
            EntityKind::Prescription => "prescription",
            EntityKind::Pharmacy => "pharmacy",
            EntityKind::LabTest => "lab_test",
            EntityKind::Invoice => "invoice",
            EntityKind::Notification => "notification",
        }
    }

    /// Rows per page in the list view.
    pub fn default_page_size(&self) -> usize {
        match self {
            EntityKind::Pharmacy => 5,
            _ => 10,
        }
    }

    /// Route segment of the section.
    pub fn route(&self) -> &'static str {
        match self {
            EntityKind::Patient => "patients",
            EntityKind::Appointment => "rendezvous",
            EntityKind::MedicalRecord => "dossiers",
            EntityKind::Doctor => "medecins",
            EntityKind::Prescription => "prescriptions",
            EntityKind::Pharmacy => "pharmacies",
            EntityKind::LabTest => "laboratoires",
            EntityKind::Invoice => "facturations",
            EntityKind::Notification => "notifications",
        }
    }

    /// Dashboard card title.
    pub fn title(&self) -> &'static str {
        match self {
            EntityKind::Patient => "Gestion des Patients",
            EntityKind::Appointment => "Rendez-vous",
            EntityKind::MedicalRecord => "Dossiers Médicaux",
            EntityKind::Doctor => "Médecins",
            EntityKind::Prescription => "Prescriptions",
            EntityKind::Pharmacy => "Pharmacies",
            EntityKind::LabTest => "Laboratoires",
            EntityKind::Invoice => "Facturation",
            EntityKind::Notification => "Notifications",
        }
    }

    /// Dashboard card description.
    pub fn description(&self) -> &'static str {
        match self {
            EntityKind::Patient => "Gérer les informations et dossiers des patients",
            EntityKind::Appointment => "Planifier et gérer les rendez-vous",
            EntityKind::MedicalRecord => "Accéder aux dossiers médicaux des patients",
            EntityKind::Doctor => "Gérer les informations des médecins",
            EntityKind::Prescription => "Gérer les prescriptions médicales",
            EntityKind::Pharmacy => "Accéder aux services de pharmacie",
            EntityKind::LabTest => "Gérer les résultats de laboratoire",
            EntityKind::Invoice => "Gérer la facturation et les paiements",
            EntityKind::Notification => "Centre de notifications",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored record: the validated entity plus store-managed metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Record<E> {
    /// Store-assigned identifier
    pub id: RecordId,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
    /// Entity fields
    #[serde(flatten)]
    pub data: E,
}

impl<E> Record<E> {
    /// Wrap entity data under a freshly issued id.
    pub fn new(id: RecordId, data: E) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id,
            created_at: now.clone(),
            updated_at: now,
            data,
        }
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

/// A record type managed by a generic [`crate::EntityManager`].
///
/// Implementors describe their form schema, how a validated form becomes a
/// value, which fields the search box looks at, and the mock data the
/// store starts with.
pub trait Entity:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + 'static
{
    const KIND: EntityKind;

    /// Declarative field rules.
    const SCHEMA: Schema;

    /// Validate raw form input and build the entity.
    fn validate(input: &FormInput) -> Result<Self, ValidationErrors>;

    /// Values of the designated search fields.
    fn search_fields(&self) -> Vec<&str>;

    /// Inverse of [`Entity::validate`], used to pre-fill the edit form.
    fn to_form(&self) -> FormInput;

    /// Mock records loaded into a fresh store.
    fn seed() -> Vec<Self>;

    /// Values a freshly reset form starts with.
    fn form_defaults() -> FormInput {
        FormInput::new()
    }

    fn fields() -> &'static [FieldSpec] {
        Self::SCHEMA.fields()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_parse() {
        assert_eq!(" 12 ".parse::<RecordId>().unwrap(), RecordId(12));
        assert!("abc".parse::<RecordId>().is_err());
        assert_eq!(RecordId(7).to_string(), "7");
    }

    #[test]
    fn test_page_sizes() {
        assert_eq!(EntityKind::Pharmacy.default_page_size(), 5);
        assert!(EntityKind::ALL
            .iter()
            .filter(|k| **k != EntityKind::Pharmacy)
            .all(|k| k.default_page_size() == 10));
    }

    #[test]
    fn test_routes_are_unique() {
        let routes: std::collections::HashSet<_> =
            EntityKind::ALL.iter().map(|k| k.route()).collect();
        assert_eq!(routes.len(), EntityKind::ALL.len());
    }

    #[test]
    fn test_record_touch() {
        let mut record = Record::new(RecordId(1), "x".to_string());
        let created = record.created_at.clone();
        record.touch();
        assert_eq!(record.created_at, created);
        assert!(record.updated_at >= created);
    }
}

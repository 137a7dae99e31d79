//! Patient models.

use serde::{Deserialize, Serialize};

use super::record::{Entity, EntityKind};
use crate::validation::{Choice, FieldSpec, FormInput, Rule, Schema, ValidationErrors};

/// Administrative gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Choice for Gender {
    const ALL: &'static [Self] = &[Gender::Male, Gender::Female, Gender::Other];

    fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

/// ABO/Rh blood group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BloodType {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl Choice for BloodType {
    const ALL: &'static [Self] = &[
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::OPositive,
        BloodType::ONegative,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::AbPositive => "AB+",
            BloodType::AbNegative => "AB-",
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
        }
    }
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("firstName", Rule::Text { min_len: 2 }, "First name is required"),
    FieldSpec::new("lastName", Rule::Text { min_len: 2 }, "Last name is required"),
    FieldSpec::new("dateOfBirth", Rule::Date, "Date of birth is required"),
    FieldSpec::new(
        "gender",
        Rule::Choice(&["male", "female", "other"]),
        "Gender must be male, female or other",
    ),
    FieldSpec::new("email", Rule::Email, "Invalid email address"),
    FieldSpec::new(
        "phone",
        Rule::Phone { min_digits: 10 },
        "Phone number must be at least 10 digits",
    ),
    FieldSpec::new("address", Rule::Text { min_len: 5 }, "Address is required"),
    FieldSpec::new(
        "bloodType",
        Rule::Choice(&["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"]),
        "Invalid blood type",
    ),
    FieldSpec::new("allergies", Rule::Optional, ""),
    FieldSpec::new("medicalHistory", Rule::Optional, ""),
];

/// A patient record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub first_name: String,
    pub last_name: String,
    /// ISO date (YYYY-MM-DD)
    pub date_of_birth: String,
    pub gender: Gender,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub blood_type: BloodType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    /// Free-text history, kept opaque
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
}

impl Patient {
    /// "First Last", as shown in lists and denormalized into appointments.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Entity for Patient {
    const KIND: EntityKind = EntityKind::Patient;
    const SCHEMA: Schema = Schema::new(FIELDS);

    fn validate(input: &FormInput) -> Result<Self, ValidationErrors> {
        let form = Self::SCHEMA.check(input)?;
        Ok(Self {
            first_name: form.text("firstName"),
            last_name: form.text("lastName"),
            date_of_birth: form.text("dateOfBirth"),
            gender: form.choice("gender")?,
            email: form.text("email"),
            phone: form.text("phone"),
            address: form.text("address"),
            blood_type: form.choice("bloodType")?,
            allergies: form.optional("allergies"),
            medical_history: form.optional("medicalHistory"),
        })
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.first_name.as_str(), self.last_name.as_str(), self.email.as_str()]
    }

    fn to_form(&self) -> FormInput {
        let mut input = FormInput::new()
            .with("firstName", &self.first_name)
            .with("lastName", &self.last_name)
            .with("dateOfBirth", &self.date_of_birth)
            .with("gender", self.gender.as_str())
            .with("email", &self.email)
            .with("phone", &self.phone)
            .with("address", &self.address)
            .with("bloodType", self.blood_type.as_str());
        input.set_opt("allergies", self.allergies.as_deref());
        input.set_opt("medicalHistory", self.medical_history.as_deref());
        input
    }

    fn seed() -> Vec<Self> {
        vec![Patient {
            first_name: "John".into(),
            last_name: "Doe".into(),
            date_of_birth: "1990-05-15".into(),
            gender: Gender::Male,
            email: "john.doe@example.com".into(),
            phone: "1234567890".into(),
            address: "123 Main St".into(),
            blood_type: BloodType::OPositive,
            allergies: Some("Penicillin".into()),
            medical_history: Some("Hypertension".into()),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> FormInput {
        FormInput::new()
            .with("firstName", "Jane")
            .with("lastName", "Roe")
            .with("dateOfBirth", "1985-01-01")
            .with("gender", "female")
            .with("email", "jane@x.com")
            .with("phone", "0123456789")
            .with("address", "1 Elm St")
            .with("bloodType", "A+")
    }

    #[test]
    fn test_validate_patient() {
        let patient = Patient::validate(&jane()).unwrap();
        assert_eq!(patient.full_name(), "Jane Roe");
        assert_eq!(patient.gender, Gender::Female);
        assert_eq!(patient.blood_type, BloodType::APositive);
        assert_eq!(patient.allergies, None);
    }

    #[test]
    fn test_invalid_fields_reported() {
        let mut input = jane();
        input.set("email", "not-an-email");
        input.set("bloodType", "C+");
        input.remove("lastName");

        let errors = Patient::validate(&input).unwrap_err();
        assert_eq!(errors.get("email"), Some("Invalid email address"));
        assert_eq!(errors.get("bloodType"), Some("Invalid blood type"));
        assert_eq!(errors.get("lastName"), Some("Last name is required"));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_form_round_trip() {
        let patient = Patient::seed().remove(0);
        assert_eq!(Patient::validate(&patient.to_form()).unwrap(), patient);
    }

    #[test]
    fn test_serializes_literals() {
        let json = serde_json::to_value(Patient::seed().remove(0)).unwrap();
        assert_eq!(json["bloodType"], "O+");
        assert_eq!(json["gender"], "male");
        assert_eq!(json["firstName"], "John");
    }
}

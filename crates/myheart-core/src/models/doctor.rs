//! Doctor (médecin) models.

use serde::{Deserialize, Serialize};

use super::record::{Entity, EntityKind};
use crate::validation::{FieldSpec, FormInput, Rule, Schema, ValidationErrors, U32_MAX};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("firstName", Rule::Text { min_len: 2 }, "First name is required"),
    FieldSpec::new("lastName", Rule::Text { min_len: 2 }, "Last name is required"),
    FieldSpec::new(
        "specialization",
        Rule::Text { min_len: 2 },
        "Specialization is required",
    ),
    FieldSpec::new("email", Rule::Email, "Invalid email address"),
    FieldSpec::new(
        "phone",
        Rule::Phone { min_digits: 10 },
        "Phone number must be at least 10 digits",
    ),
    FieldSpec::new("hospital", Rule::Text { min_len: 5 }, "Hospital is required"),
    FieldSpec::new(
        "experienceYears",
        Rule::Integer { min: 0, max: U32_MAX },
        "Years of experience must be a positive number",
    ),
    FieldSpec::new("address", Rule::Text { min_len: 5 }, "Address is required"),
];

/// A practitioner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    pub email: String,
    pub phone: String,
    pub hospital: String,
    pub experience_years: u32,
    pub address: String,
}

impl Doctor {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Entity for Doctor {
    const KIND: EntityKind = EntityKind::Doctor;
    const SCHEMA: Schema = Schema::new(FIELDS);

    fn validate(input: &FormInput) -> Result<Self, ValidationErrors> {
        let form = Self::SCHEMA.check(input)?;
        Ok(Self {
            first_name: form.text("firstName"),
            last_name: form.text("lastName"),
            specialization: form.text("specialization"),
            email: form.text("email"),
            phone: form.text("phone"),
            hospital: form.text("hospital"),
            experience_years: form.parse("experienceYears")?,
            address: form.text("address"),
        })
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.first_name.as_str(), self.last_name.as_str(), self.email.as_str()]
    }

    fn to_form(&self) -> FormInput {
        FormInput::new()
            .with("firstName", &self.first_name)
            .with("lastName", &self.last_name)
            .with("specialization", &self.specialization)
            .with("email", &self.email)
            .with("phone", &self.phone)
            .with("hospital", &self.hospital)
            .with("experienceYears", self.experience_years.to_string())
            .with("address", &self.address)
    }

    fn seed() -> Vec<Self> {
        vec![Doctor {
            first_name: "Dr. John".into(),
            last_name: "Doe".into(),
            specialization: "Cardiologist".into(),
            email: "johndoe@example.com".into(),
            phone: "1234567890".into(),
            hospital: "General Hospital".into(),
            experience_years: 10,
            address: "123 Main St".into(),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_experience_rejected() {
        let mut input = Doctor::seed()[0].to_form();
        input.set("experienceYears", "-1");
        let errors = Doctor::validate(&input).unwrap_err();
        assert_eq!(
            errors.get("experienceYears"),
            Some("Years of experience must be a positive number")
        );
    }

    #[test]
    fn test_non_numeric_experience() {
        let mut input = Doctor::seed()[0].to_form();
        input.set("experienceYears", "ten");
        let errors = Doctor::validate(&input).unwrap_err();
        assert_eq!(errors.get("experienceYears"), Some("Expected a number"));
    }

    #[test]
    fn test_experience_beyond_u32_rejected_with_field_message() {
        let mut input = Doctor::seed()[0].to_form();
        input.set("experienceYears", "5000000000");
        let errors = Doctor::validate(&input).unwrap_err();
        assert_eq!(
            errors.get("experienceYears"),
            Some("Years of experience must be a positive number")
        );
    }
}

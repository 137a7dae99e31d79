//! Pharmacy models.

use serde::{Deserialize, Serialize};

use super::record::{Entity, EntityKind};
use crate::validation::{FieldSpec, FormInput, Rule, Schema, ValidationErrors};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", Rule::Text { min_len: 2 }, "Le nom est requis"),
    FieldSpec::new("address", Rule::Text { min_len: 5 }, "L'adresse est requise"),
    FieldSpec::new(
        "phone",
        Rule::Phone { min_digits: 10 },
        "Le numéro de téléphone doit contenir au moins 10 chiffres",
    ),
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pharmacy {
    pub name: String,
    pub address: String,
    pub phone: String,
}

impl Entity for Pharmacy {
    const KIND: EntityKind = EntityKind::Pharmacy;
    const SCHEMA: Schema = Schema::new(FIELDS);

    fn validate(input: &FormInput) -> Result<Self, ValidationErrors> {
        let form = Self::SCHEMA.check(input)?;
        Ok(Self {
            name: form.text("name"),
            address: form.text("address"),
            phone: form.text("phone"),
        })
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }

    fn to_form(&self) -> FormInput {
        FormInput::new()
            .with("name", &self.name)
            .with("address", &self.address)
            .with("phone", &self.phone)
    }

    fn seed() -> Vec<Self> {
        vec![Pharmacy {
            name: "Pharmacie Centrale".into(),
            address: "123 Rue Principale".into(),
            phone: "0123456789".into(),
        }]
    }
}

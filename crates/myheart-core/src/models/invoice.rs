//! Invoice (facture) models.

use serde::{Deserialize, Serialize};

use super::record::{Entity, EntityKind};
use crate::validation::{Choice, FieldSpec, FormInput, Rule, Schema, ValidationErrors};

/// Payment status. Literals are the ones shown to billing staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    #[serde(rename = "payée")]
    Paid,
    #[serde(rename = "impayée")]
    Unpaid,
    #[serde(rename = "en attente")]
    Pending,
}

impl Choice for InvoiceStatus {
    const ALL: &'static [Self] = &[InvoiceStatus::Paid, InvoiceStatus::Unpaid, InvoiceStatus::Pending];

    fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Paid => "payée",
            InvoiceStatus::Unpaid => "impayée",
            InvoiceStatus::Pending => "en attente",
        }
    }
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("reference", Rule::Text { min_len: 3 }, "Référence requise"),
    FieldSpec::new("date", Rule::Date, "Date requise"),
    FieldSpec::new("amount", Rule::Decimal { min: 1.0 }, "Montant invalide"),
    FieldSpec::new(
        "status",
        Rule::Choice(&["payée", "impayée", "en attente"]),
        "Statut invalide",
    ),
    FieldSpec::new("description", Rule::Optional, ""),
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub reference: String,
    pub date: String,
    pub amount: f64,
    pub status: InvoiceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Entity for Invoice {
    const KIND: EntityKind = EntityKind::Invoice;
    const SCHEMA: Schema = Schema::new(FIELDS);

    fn validate(input: &FormInput) -> Result<Self, ValidationErrors> {
        let form = Self::SCHEMA.check(input)?;
        Ok(Self {
            reference: form.text("reference"),
            date: form.text("date"),
            amount: form.parse("amount")?,
            status: form.choice("status")?,
            description: form.optional("description"),
        })
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.reference.as_str()]
    }

    fn to_form(&self) -> FormInput {
        let mut input = FormInput::new()
            .with("reference", &self.reference)
            .with("date", &self.date)
            .with("amount", self.amount.to_string())
            .with("status", self.status.as_str());
        input.set_opt("description", self.description.as_deref());
        input
    }

    fn seed() -> Vec<Self> {
        vec![Invoice {
            reference: "FAC-001".into(),
            date: "2025-04-01".into(),
            amount: 120.5,
            status: InvoiceStatus::Paid,
            description: Some("Consultation générale".into()),
        }]
    }
}

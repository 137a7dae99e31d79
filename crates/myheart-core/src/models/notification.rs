//! Notification models.

use serde::{Deserialize, Serialize};

use super::record::{Entity, EntityKind};
use crate::validation::{Choice, FieldSpec, FormInput, Rule, Schema, ValidationErrors};

/// Delivery channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
    Push,
}

impl Choice for Channel {
    const ALL: &'static [Self] = &[Channel::Email, Channel::Sms, Channel::Push];

    fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Sms => "sms",
            Channel::Push => "push",
        }
    }
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("title", Rule::Text { min_len: 2 }, "Title is required"),
    FieldSpec::new("message", Rule::Text { min_len: 5 }, "Message is required"),
    FieldSpec::new("recipient", Rule::Email, "Invalid email address"),
    FieldSpec::new(
        "type",
        Rule::Choice(&["email", "sms", "push"]),
        "Invalid notification type",
    ),
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub title: String,
    pub message: String,
    /// Recipient email address
    pub recipient: String,
    #[serde(rename = "type")]
    pub channel: Channel,
}

impl Entity for Notification {
    const KIND: EntityKind = EntityKind::Notification;
    const SCHEMA: Schema = Schema::new(FIELDS);

    fn validate(input: &FormInput) -> Result<Self, ValidationErrors> {
        let form = Self::SCHEMA.check(input)?;
        Ok(Self {
            title: form.text("title"),
            message: form.text("message"),
            recipient: form.text("recipient"),
            channel: form.choice("type")?,
        })
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str()]
    }

    fn to_form(&self) -> FormInput {
        FormInput::new()
            .with("title", &self.title)
            .with("message", &self.message)
            .with("recipient", &self.recipient)
            .with("type", self.channel.as_str())
    }

    fn seed() -> Vec<Self> {
        vec![Notification {
            title: "Appointment Reminder".into(),
            message: "Your appointment is tomorrow at 10 AM.".into(),
            recipient: "john.doe@example.com".into(),
            channel: Channel::Email,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipient_must_be_email() {
        let input = Notification::seed()[0].to_form().with("recipient", "john.doe");
        let errors = Notification::validate(&input).unwrap_err();
        assert_eq!(errors.get("recipient"), Some("Invalid email address"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_channel_serializes_as_type() {
        let json = serde_json::to_value(&Notification::seed()[0]).unwrap();
        assert_eq!(json["type"], "email");
        assert_eq!(json["recipient"], "john.doe@example.com");
    }

    #[test]
    fn test_unknown_channel_rejected() {
        let input = Notification::seed()[0].to_form().with("type", "fax");
        let errors = Notification::validate(&input).unwrap_err();
        assert_eq!(errors.get("type"), Some("Invalid notification type"));
    }
}

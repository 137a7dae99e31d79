//! Form controller: pending input bound to a create or edit target.

use std::marker::PhantomData;

use crate::models::{Entity, RecordId};
use crate::validation::{FormInput, ValidationErrors};

/// What a successful submit will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTarget {
    /// Append a new record.
    Create,
    /// Replace the record with this id.
    Edit(RecordId),
}

/// Pending, partially-filled record plus the errors from the last submit.
#[derive(Debug, Clone)]
pub struct FormController<E: Entity> {
    target: FormTarget,
    input: FormInput,
    errors: ValidationErrors,
    _entity: PhantomData<E>,
}

impl<E: Entity> FormController<E> {
    /// An empty create form with the entity's defaults filled in.
    pub fn create() -> Self {
        Self {
            target: FormTarget::Create,
            input: E::form_defaults(),
            errors: ValidationErrors::new(),
            _entity: PhantomData,
        }
    }

    /// An edit form pre-filled from an existing record.
    pub fn edit(id: RecordId, data: &E) -> Self {
        Self {
            target: FormTarget::Edit(id),
            input: data.to_form(),
            errors: ValidationErrors::new(),
            _entity: PhantomData,
        }
    }

    pub fn target(&self) -> FormTarget {
        self.target
    }

    pub fn input(&self) -> &FormInput {
        &self.input
    }

    /// Errors from the most recent failed submit.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.input.set(name, value);
    }

    /// Overwrite several fields at once.
    pub fn fill(&mut self, input: &FormInput) {
        for (name, value) in input.iter() {
            self.input.set(name, value);
        }
    }

    /// Run validation plus an extra check; on failure keep the input and
    /// remember the errors.
    pub fn validate_with<F>(&mut self, check: F) -> Result<E, ValidationErrors>
    where
        F: FnOnce(&mut E) -> Result<(), ValidationErrors>,
    {
        let result = E::validate(&self.input).and_then(|mut data| {
            check(&mut data)?;
            Ok(data)
        });
        match result {
            Ok(data) => {
                self.errors = ValidationErrors::new();
                Ok(data)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }

    /// Clear every field back to the defaults.
    pub fn reset(&mut self) {
        self.input = E::form_defaults();
        self.errors = ValidationErrors::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Appointment, Pharmacy};

    #[test]
    fn test_create_form_has_defaults() {
        let form = FormController::<Appointment>::create();
        assert_eq!(form.input().get("duration"), "30");
        assert_eq!(form.input().get("status"), "scheduled");
        assert_eq!(form.target(), FormTarget::Create);
    }

    #[test]
    fn test_failed_validation_keeps_input() {
        let mut form = FormController::<Pharmacy>::create();
        form.set_field("name", "P");
        let errors = form.validate_with(|_| Ok(())).unwrap_err();
        assert!(errors.contains("name"));
        assert_eq!(form.input().get("name"), "P");
        assert_eq!(form.errors(), &errors);
    }

    #[test]
    fn test_extra_check_can_reject() {
        let mut form = FormController::<Pharmacy>::create();
        form.fill(
            &FormInput::new()
                .with("name", "Pharmacie du Nord")
                .with("address", "2 Rue Nord")
                .with("phone", "0600000000"),
        );
        let errors = form
            .validate_with(|_| Err(ValidationErrors::single("name", "taken")))
            .unwrap_err();
        assert_eq!(errors.get("name"), Some("taken"));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut form = FormController::<Appointment>::create();
        form.set_field("duration", "60");
        form.set_field("notes", "bring scans");
        form.reset();
        assert_eq!(form.input(), &Appointment::form_defaults());
    }
}

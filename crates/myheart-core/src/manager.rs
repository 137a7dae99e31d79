//! Generic entity manager: store + form + search + pagination.
//!
//! One `EntityManager<E>` backs each section of the clinic. It owns the
//! record store and tracks the list/form view mode, the search query and the
//! current page.

use log::{debug, warn};
use serde::Serialize;
use thiserror::Error;

use crate::form::{FormController, FormTarget};
use crate::models::{Entity, EntityKind, Record, RecordId};
use crate::store::{filter, Page, Paginator, RecordStore, StoreError};
use crate::validation::{FieldSpec, FormInput, ValidationErrors};

/// Manager errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ManagerError {
    #[error("No form is open")]
    FormClosed,

    #[error("Record {0} is being edited")]
    EditInProgress(RecordId),

    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ManagerResult<T> = Result<T, ManagerError>;

/// Which view a section is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    List,
    Form,
}

/// Outcome of a successful submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Created(RecordId),
    Updated(RecordId),
}

impl Submission {
    pub fn id(&self) -> RecordId {
        match self {
            Submission::Created(id) | Submission::Updated(id) => *id,
        }
    }
}

/// Record management for one entity kind.
#[derive(Debug, Clone)]
pub struct EntityManager<E: Entity> {
    store: RecordStore<E>,
    query: String,
    paginator: Paginator,
    form: Option<FormController<E>>,
}

impl<E: Entity> Default for EntityManager<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> EntityManager<E> {
    /// Seeded manager with the entity's default page size.
    pub fn new() -> Self {
        Self::with_store(RecordStore::seeded(), E::KIND.default_page_size())
    }

    pub fn with_store(store: RecordStore<E>, page_size: usize) -> Self {
        Self {
            store,
            query: String::new(),
            paginator: Paginator::new(page_size),
            form: None,
        }
    }

    pub fn kind(&self) -> EntityKind {
        E::KIND
    }

    pub fn store(&self) -> &RecordStore<E> {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&Record<E>> {
        self.store.get(id)
    }

    pub fn mode(&self) -> ViewMode {
        if self.form.is_some() {
            ViewMode::Form
        } else {
            ViewMode::List
        }
    }

    pub fn form(&self) -> Option<&FormController<E>> {
        self.form.as_ref()
    }

    pub fn schema(&self) -> &'static [FieldSpec] {
        E::fields()
    }

    // =========================================================================
    // Form
    // =========================================================================

    /// Switch to a blank create form, discarding any pending edits.
    pub fn open_create_form(&mut self) {
        self.form = Some(FormController::create());
    }

    /// Switch to an edit form pre-filled from the record.
    pub fn open_edit_form(&mut self, id: RecordId) -> ManagerResult<()> {
        let record = self.store.get(id).ok_or(StoreError::NotFound(id))?;
        self.form = Some(FormController::edit(id, &record.data));
        Ok(())
    }

    /// Set one input of the open form.
    pub fn set_field(&mut self, name: &str, value: &str) -> ManagerResult<()> {
        let form = self.form.as_mut().ok_or(ManagerError::FormClosed)?;
        form.set_field(name, value);
        Ok(())
    }

    /// Close the form without touching the store.
    pub fn cancel_form(&mut self) {
        if self.form.take().is_some() {
            debug!("{}: form cancelled", E::KIND);
        }
    }

    /// Validate and commit the open form.
    pub fn submit(&mut self) -> ManagerResult<Submission> {
        self.submit_with(|_| Ok(()))
    }

    /// Validate, run `check` on the candidate, then commit.
    ///
    /// `check` may reject the candidate with field errors or fill in derived
    /// fields. On any failure the form stays open with its input and errors.
    pub fn submit_with<F>(&mut self, check: F) -> ManagerResult<Submission>
    where
        F: FnOnce(&mut E) -> Result<(), ValidationErrors>,
    {
        let form = self.form.as_mut().ok_or(ManagerError::FormClosed)?;
        let data = match form.validate_with(check) {
            Ok(data) => data,
            Err(errors) => {
                warn!("{}: submission rejected: {}", E::KIND, errors);
                return Err(errors.into());
            }
        };

        let submission = match form.target() {
            FormTarget::Create => Submission::Created(self.store.insert(data)),
            FormTarget::Edit(id) => {
                self.store.update(id, data)?;
                Submission::Updated(id)
            }
        };

        self.form = None;
        let count = self.filtered_count();
        self.paginator.clamp(count);
        Ok(submission)
    }

    /// Open a create form, fill it and submit in one step.
    ///
    /// Refused while an edit form is open so pending edits are not lost; an
    /// open create form is replaced.
    pub fn submit_input(&mut self, input: &FormInput) -> ManagerResult<Submission> {
        self.submit_input_with(input, |_| Ok(()))
    }

    pub fn submit_input_with<F>(&mut self, input: &FormInput, check: F) -> ManagerResult<Submission>
    where
        F: FnOnce(&mut E) -> Result<(), ValidationErrors>,
    {
        if let Some(FormTarget::Edit(id)) = self.form.as_ref().map(|f| f.target()) {
            return Err(ManagerError::EditInProgress(id));
        }
        let mut form = FormController::create();
        form.fill(input);
        self.form = Some(form);
        self.submit_with(check)
    }

    // =========================================================================
    // Records
    // =========================================================================

    /// Delete a record and keep the page cursor in range.
    pub fn delete(&mut self, id: RecordId) -> ManagerResult<Record<E>> {
        let record = self.store.remove(id)?;
        let editing = self.form.as_ref().map(|f| f.target());
        if editing == Some(FormTarget::Edit(id)) {
            self.form = None;
        }
        let count = self.filtered_count();
        self.paginator.clamp(count);
        Ok(record)
    }

    // =========================================================================
    // Search and pagination
    // =========================================================================

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the search query; the current page is clamped to the new
    /// result count.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        let count = self.filtered_count();
        self.paginator.clamp(count);
        debug!("{}: query {:?} -> {} match(es)", E::KIND, self.query, count);
    }

    /// Records matching the current query, in store order.
    pub fn filtered(&self) -> Vec<&Record<E>> {
        filter(self.store.records(), &self.query)
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered().len()
    }

    pub fn current_page_number(&self) -> usize {
        self.paginator.current()
    }

    pub fn page_size(&self) -> usize {
        self.paginator.page_size()
    }

    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages(self.filtered_count())
    }

    pub fn current_page(&self) -> Page<&Record<E>> {
        self.paginator.page(&self.filtered())
    }

    pub fn next_page(&mut self) -> bool {
        let count = self.filtered_count();
        self.paginator.next(count)
    }

    pub fn prev_page(&mut self) -> bool {
        self.paginator.prev()
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        let count = self.filtered_count();
        self.paginator.go_to(page, count)
    }
}

/// Object-safe view of an [`EntityManager`], for dispatch by [`EntityKind`].
///
/// Submission is not part of this trait: it goes through
/// [`crate::Clinic::submit`] so reference checks cannot be skipped.
pub trait Section {
    fn kind(&self) -> EntityKind;
    fn len(&self) -> usize;
    fn mode(&self) -> ViewMode;
    fn schema(&self) -> &'static [FieldSpec];

    fn query(&self) -> &str;
    fn set_query(&mut self, query: &str);
    fn next_page(&mut self) -> bool;
    fn prev_page(&mut self) -> bool;
    fn go_to_page(&mut self, page: usize) -> bool;
    fn current_page_number(&self) -> usize;
    fn total_pages(&self) -> usize;
    /// Current page as JSON (records plus range metadata).
    fn current_page_json(&self) -> serde_json::Result<String>;

    fn open_create_form(&mut self);
    fn open_edit_form(&mut self, id: RecordId) -> ManagerResult<()>;
    fn set_field(&mut self, name: &str, value: &str) -> ManagerResult<()>;
    fn cancel_form(&mut self);
    fn form_input(&self) -> Option<FormInput>;
    fn form_errors(&self) -> Option<ValidationErrors>;

    fn delete(&mut self, id: RecordId) -> ManagerResult<()>;
}

impl<E: Entity> Section for EntityManager<E> {
    fn kind(&self) -> EntityKind {
        E::KIND
    }

    fn len(&self) -> usize {
        EntityManager::len(self)
    }

    fn mode(&self) -> ViewMode {
        EntityManager::mode(self)
    }

    fn schema(&self) -> &'static [FieldSpec] {
        E::fields()
    }

    fn query(&self) -> &str {
        EntityManager::query(self)
    }

    fn set_query(&mut self, query: &str) {
        EntityManager::set_query(self, query)
    }

    fn next_page(&mut self) -> bool {
        EntityManager::next_page(self)
    }

    fn prev_page(&mut self) -> bool {
        EntityManager::prev_page(self)
    }

    fn go_to_page(&mut self, page: usize) -> bool {
        EntityManager::go_to_page(self, page)
    }

    fn current_page_number(&self) -> usize {
        EntityManager::current_page_number(self)
    }

    fn total_pages(&self) -> usize {
        EntityManager::total_pages(self)
    }

    fn current_page_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.current_page())
    }

    fn open_create_form(&mut self) {
        EntityManager::open_create_form(self)
    }

    fn open_edit_form(&mut self, id: RecordId) -> ManagerResult<()> {
        EntityManager::open_edit_form(self, id)
    }

    fn set_field(&mut self, name: &str, value: &str) -> ManagerResult<()> {
        EntityManager::set_field(self, name, value)
    }

    fn cancel_form(&mut self) {
        EntityManager::cancel_form(self)
    }

    fn form_input(&self) -> Option<FormInput> {
        self.form.as_ref().map(|f| f.input().clone())
    }

    fn form_errors(&self) -> Option<ValidationErrors> {
        self.form.as_ref().map(|f| f.errors().clone())
    }

    fn delete(&mut self, id: RecordId) -> ManagerResult<()> {
        EntityManager::delete(self, id).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Doctor, Patient, Pharmacy};

    fn pharmacy_input(name: &str) -> FormInput {
        FormInput::new()
            .with("name", name)
            .with("address", "10 Avenue Foch")
            .with("phone", "0145000000")
    }

    #[test]
    fn test_mode_transitions() {
        let mut manager = EntityManager::<Pharmacy>::new();
        assert_eq!(manager.mode(), ViewMode::List);

        manager.open_create_form();
        assert_eq!(manager.mode(), ViewMode::Form);
        manager.cancel_form();
        assert_eq!(manager.mode(), ViewMode::List);

        manager.open_create_form();
        for (name, value) in pharmacy_input("Pharmacie Est").iter() {
            manager.set_field(name, value).unwrap();
        }
        assert_eq!(manager.submit().unwrap(), Submission::Created(RecordId(2)));
        assert_eq!(manager.mode(), ViewMode::List);
    }

    #[test]
    fn test_cancel_does_not_mutate() {
        let mut manager = EntityManager::<Pharmacy>::new();
        manager.open_create_form();
        manager.set_field("name", "Pharmacie Ouest").unwrap();
        manager.cancel_form();
        assert_eq!(manager.len(), 1);

        // reopening starts blank
        manager.open_create_form();
        assert_eq!(manager.form().unwrap().input().get("name"), "");
    }

    #[test]
    fn test_submit_without_form() {
        let mut manager = EntityManager::<Pharmacy>::new();
        assert_eq!(manager.submit(), Err(ManagerError::FormClosed));
        assert_eq!(
            manager.set_field("name", "x"),
            Err(ManagerError::FormClosed)
        );
    }

    #[test]
    fn test_invalid_submit_keeps_form_open() {
        let mut manager = EntityManager::<Doctor>::new();
        let mut input = Doctor::seed()[0].to_form();
        input.set("experienceYears", "-1");

        let err = manager.submit_input(&input).unwrap_err();
        match err {
            ManagerError::Invalid(errors) => assert!(errors.contains("experienceYears")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.mode(), ViewMode::Form);
        let form = manager.form().unwrap();
        assert_eq!(form.input().get("experienceYears"), "-1");
        assert!(form.errors().contains("experienceYears"));
    }

    #[test]
    fn test_edit_updates_in_place() {
        let mut manager = EntityManager::<Patient>::new();
        manager.open_edit_form(RecordId(1)).unwrap();
        assert_eq!(manager.form().unwrap().input().get("firstName"), "John");

        manager.set_field("phone", "0999999999").unwrap();
        assert_eq!(manager.submit().unwrap(), Submission::Updated(RecordId(1)));
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.get(RecordId(1)).unwrap().data.phone, "0999999999");
    }

    #[test]
    fn test_edit_missing_record() {
        let mut manager = EntityManager::<Patient>::new();
        assert_eq!(
            manager.open_edit_form(RecordId(42)),
            Err(ManagerError::Store(StoreError::NotFound(RecordId(42))))
        );
        assert_eq!(manager.mode(), ViewMode::List);
    }

    #[test]
    fn test_submit_input_keeps_pending_edit() {
        let mut manager = EntityManager::<Pharmacy>::new();
        manager.open_edit_form(RecordId(1)).unwrap();
        manager.set_field("name", "Pharmacie Centrale Nord").unwrap();

        assert_eq!(
            manager.submit_input(&pharmacy_input("Pharmacie Sud")),
            Err(ManagerError::EditInProgress(RecordId(1)))
        );
        assert_eq!(manager.len(), 1);
        let form = manager.form().unwrap();
        assert_eq!(form.target(), FormTarget::Edit(RecordId(1)));
        assert_eq!(form.input().get("name"), "Pharmacie Centrale Nord");
    }

    #[test]
    fn test_submit_input_replaces_open_create_form() {
        let mut manager = EntityManager::<Pharmacy>::new();
        manager.open_create_form();
        manager.set_field("name", "Brouillon").unwrap();
        assert_eq!(
            manager.submit_input(&pharmacy_input("Pharmacie Sud")),
            Ok(Submission::Created(RecordId(2)))
        );
    }

    #[test]
    fn test_delete_closes_matching_edit_form() {
        let mut manager = EntityManager::<Pharmacy>::new();
        manager.open_edit_form(RecordId(1)).unwrap();
        manager.delete(RecordId(1)).unwrap();
        assert_eq!(manager.mode(), ViewMode::List);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_query_change_clamps_page() {
        let mut manager = EntityManager::<Pharmacy>::new();
        for i in 0..10 {
            manager
                .submit_input(&pharmacy_input(&format!("Pharmacie {}", i)))
                .unwrap();
        }
        assert_eq!(manager.total_pages(), 3);
        assert!(manager.go_to_page(3));

        manager.set_query("centrale");
        assert_eq!(manager.filtered_count(), 1);
        assert_eq!(manager.current_page_number(), 1);
        assert_eq!(manager.current_page().items.len(), 1);
    }

    #[test]
    fn test_delete_clamps_page() {
        let mut manager = EntityManager::<Pharmacy>::new();
        for i in 0..5 {
            manager
                .submit_input(&pharmacy_input(&format!("Pharmacie {}", i)))
                .unwrap();
        }
        assert!(manager.next_page());
        assert_eq!(manager.current_page().items.len(), 1);

        manager.delete(RecordId(6)).unwrap();
        assert_eq!(manager.current_page_number(), 1);
        assert_eq!(manager.current_page().items.len(), 5);
    }

    #[test]
    fn test_section_page_json() {
        let manager = EntityManager::<Pharmacy>::new();
        let section: &dyn Section = &manager;
        let json: serde_json::Value =
            serde_json::from_str(&section.current_page_json().unwrap()).unwrap();
        assert_eq!(json["totalItems"], 1);
        assert_eq!(json["pageSize"], 5);
        assert_eq!(json["items"][0]["name"], "Pharmacie Centrale");
        assert_eq!(json["items"][0]["id"], 1);
    }
}

//! Item Registry
//!
//! Add, edit and delete over the full item collection. Only one row can be
//! in an edit session at a time:
//!
//! ```text
//! Viewing --begin_edit--> Editing --save_edit--> Viewing (persisted)
//!                                 --cancel_edit-> Viewing (discarded)
//! ```

use crate::clock::Clock;
use crate::ledger::error::{LedgerError, LedgerResult};
use crate::ledger::form::ItemForm;
use crate::storage::{Item, ItemId, LedgerStore};
use std::sync::Arc;

/// Prompt shown before the registry clears everything
pub const REGISTRY_RESET_PROMPT: &str = "Are you sure you want to clear all data?";

/// Display state of one row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Viewing,
    Editing,
}

/// The open edit session
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub id: ItemId,
    pub form: ItemForm,
}

pub struct ItemRegistry {
    store: Arc<LedgerStore>,
    clock: Arc<dyn Clock>,
    editing: Option<EditSession>,
}

impl ItemRegistry {
    pub fn new(store: Arc<LedgerStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            editing: None,
        }
    }

    /// Every item across all dates, in stored order
    pub async fn items(&self) -> Vec<Item> {
        self.store.items().await
    }

    /// Validate `form` and append it as a new item dated today
    pub async fn add(&self, form: &ItemForm) -> LedgerResult<Item> {
        let fields = form.validate()?;
        let item = fields.into_item(self.clock.today());
        let item = self.store.append_new(item, self.clock.now_millis()).await?;
        Ok(item)
    }

    /// Add `form` and blank it on success; a rejected form keeps its text
    pub async fn submit(&self, form: &mut ItemForm) -> LedgerResult<Item> {
        let item = self.add(form).await?;
        form.clear();
        Ok(item)
    }

    /// Open an edit session for `id`, replacing any session already open
    ///
    /// Returns the form prefilled from the stored item.
    pub async fn begin_edit(&mut self, id: ItemId) -> LedgerResult<&mut ItemForm> {
        let item = self
            .store
            .get(id)
            .await
            .ok_or(LedgerError::ItemNotFound(id))?;

        if let Some(previous) = &self.editing {
            if previous.id != id {
                tracing::debug!(previous = %previous.id, id = %id, "Switching edit session");
            }
        }

        let session = self.editing.insert(EditSession {
            id,
            form: ItemForm::from_item(&item),
        });
        Ok(&mut session.form)
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    /// Mutable access to the open session's form
    pub fn edit_form_mut(&mut self) -> Option<&mut ItemForm> {
        self.editing.as_mut().map(|session| &mut session.form)
    }

    pub fn row_state(&self, id: ItemId) -> RowState {
        match &self.editing {
            Some(session) if session.id == id => RowState::Editing,
            _ => RowState::Viewing,
        }
    }

    /// Save the open session
    ///
    /// On a validation failure the session stays open with its form intact.
    pub async fn save_edit(&mut self) -> LedgerResult<Item> {
        let session = self.editing.as_ref().ok_or(LedgerError::NotEditing)?;
        let item = self.update(session.id, &session.form).await?;
        self.editing = None;
        Ok(item)
    }

    /// Discard the open session; returns false when none was open
    pub fn cancel_edit(&mut self) -> bool {
        self.editing.take().is_some()
    }

    /// Replace the editable fields of `id` in place; id and date are kept
    pub async fn update(&self, id: ItemId, form: &ItemForm) -> LedgerResult<Item> {
        let fields = form.validate()?;
        self.store
            .update(id, fields)
            .await?
            .ok_or(LedgerError::ItemNotFound(id))
    }

    /// Remove item `id`; an edit session on that row is closed
    pub async fn delete(&mut self, id: ItemId) -> LedgerResult<Item> {
        let removed = self
            .store
            .delete(id)
            .await?
            .ok_or(LedgerError::ItemNotFound(id))?;

        if self.row_state(id) == RowState::Editing {
            self.editing = None;
        }
        Ok(removed)
    }

    /// Clear the whole item collection if `confirm` accepts the prompt
    ///
    /// Returns whether anything was cleared.
    pub async fn reset_all<F>(&mut self, confirm: F) -> LedgerResult<bool>
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(REGISTRY_RESET_PROMPT) {
            tracing::debug!("Registry reset declined");
            return Ok(false);
        }

        self.store.clear_items().await?;
        self.editing = None;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::ledger::error::ValidationError;
    use crate::storage::StorageConfig;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
    }

    async fn create_test_registry() -> (ItemRegistry, Arc<LedgerStore>, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = Arc::new(LedgerStore::open(StorageConfig::new(dir.path())).await.unwrap());
        let clock = Arc::new(FixedClock::new(today(), 1714953600000));
        let registry = ItemRegistry::new(Arc::clone(&store), clock);
        (registry, store, dir)
    }

    #[tokio::test]
    async fn test_add_appends_one_item_dated_today() {
        let (registry, store, _dir) = create_test_registry().await;

        let before = store.items().await.len();
        let item = registry
            .add(&ItemForm::new("Pen", "5", "8", "10"))
            .await
            .unwrap();

        assert_eq!(store.items().await.len(), before + 1);
        assert_eq!(item.date, today());
        assert_eq!(item.id, Some(ItemId(1714953600000)));
    }

    #[tokio::test]
    async fn test_submit_clears_form_only_on_success() {
        let (registry, store, _dir) = create_test_registry().await;

        let mut form = ItemForm::new("Pen", "5", "8", "ten");
        assert!(registry.submit(&mut form).await.is_err());
        assert_eq!(form.quantity, "ten");

        form.quantity = "10".to_string();
        registry.submit(&mut form).await.unwrap();
        assert_eq!(form, ItemForm::default());
        assert_eq!(store.items().await.len(), 1);
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_forms() {
        let (registry, store, _dir) = create_test_registry().await;
        registry.add(&ItemForm::new("Pen", "5", "8", "10")).await.unwrap();

        let err = registry.add(&ItemForm::new("", "5", "8", "10")).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::MissingField(_))
        ));

        let err = registry.add(&ItemForm::new("Ink", "5", "8", "ten")).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::NotNumeric { .. })
        ));

        assert_eq!(store.items().await.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let (mut registry, _store, _dir) = create_test_registry().await;

        let a = registry.add(&ItemForm::new("a", "1", "2", "1")).await.unwrap();
        let b = registry.add(&ItemForm::new("b", "1", "2", "1")).await.unwrap();
        let c = registry.add(&ItemForm::new("c", "1", "2", "1")).await.unwrap();

        let removed = registry.delete(b.id.unwrap()).await.unwrap();
        assert_eq!(removed, b);
        assert_eq!(registry.items().await, vec![a, c]);

        assert!(matches!(
            registry.delete(b.id.unwrap()).await,
            Err(LedgerError::ItemNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_edit_save_preserves_id_and_date() {
        let (mut registry, _store, _dir) = create_test_registry().await;
        let added = registry.add(&ItemForm::new("Pen", "5", "8", "10")).await.unwrap();
        let id = added.id.unwrap();

        let form = registry.begin_edit(id).await.unwrap();
        assert_eq!(*form, ItemForm::new("Pen", "5", "8", "10"));
        form.item_name = "Blue pen".to_string();
        form.sell_price = "9.5".to_string();
        form.quantity = "12".to_string();
        assert_eq!(registry.row_state(id), RowState::Editing);

        let saved = registry.save_edit().await.unwrap();
        assert_eq!(saved.id, Some(id));
        assert_eq!(saved.date, added.date);
        assert_eq!(saved.item_name, "Blue pen");
        assert_eq!(saved.cost_price, 5.0);
        assert_eq!(saved.sell_price, 9.5);
        assert_eq!(saved.quantity, 12);
        assert_eq!(registry.row_state(id), RowState::Viewing);
        assert_eq!(registry.items().await, vec![saved]);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_session_open() {
        let (mut registry, store, _dir) = create_test_registry().await;
        let added = registry.add(&ItemForm::new("Pen", "5", "8", "10")).await.unwrap();
        let id = added.id.unwrap();

        registry.begin_edit(id).await.unwrap().cost_price.clear();
        assert!(matches!(
            registry.save_edit().await,
            Err(LedgerError::Validation(ValidationError::MissingField("cost price")))
        ));
        assert_eq!(registry.row_state(id), RowState::Editing);
        assert_eq!(store.get(id).await, Some(added));
    }

    #[tokio::test]
    async fn test_cancel_discards_edits() {
        let (mut registry, store, _dir) = create_test_registry().await;
        let added = registry.add(&ItemForm::new("Pen", "5", "8", "10")).await.unwrap();
        let id = added.id.unwrap();

        registry.begin_edit(id).await.unwrap().item_name = "changed".to_string();
        assert!(registry.cancel_edit());
        assert!(!registry.cancel_edit());

        assert_eq!(store.get(id).await, Some(added));
        assert!(matches!(registry.save_edit().await, Err(LedgerError::NotEditing)));
    }

    #[tokio::test]
    async fn test_only_one_row_edited_at_a_time() {
        let (mut registry, _store, _dir) = create_test_registry().await;
        let a = registry.add(&ItemForm::new("a", "1", "2", "1")).await.unwrap().id.unwrap();
        let b = registry.add(&ItemForm::new("b", "1", "2", "1")).await.unwrap().id.unwrap();

        registry.begin_edit(a).await.unwrap();
        registry.begin_edit(b).await.unwrap();

        assert_eq!(registry.row_state(a), RowState::Viewing);
        assert_eq!(registry.row_state(b), RowState::Editing);
        assert_eq!(registry.edit_form_mut().unwrap().item_name, "b");
    }

    #[tokio::test]
    async fn test_reset_requires_confirmation() {
        let (mut registry, store, _dir) = create_test_registry().await;
        let id = registry.add(&ItemForm::new("Pen", "5", "8", "10")).await.unwrap().id.unwrap();
        registry.begin_edit(id).await.unwrap();

        let cleared = registry.reset_all(|_| false).await.unwrap();
        assert!(!cleared);
        assert_eq!(store.items().await.len(), 1);
        assert!(registry.editing().is_some());

        let mut prompt = String::new();
        let cleared = registry
            .reset_all(|p| {
                prompt = p.to_string();
                true
            })
            .await
            .unwrap();
        assert!(cleared);
        assert_eq!(prompt, REGISTRY_RESET_PROMPT);
        assert!(store.items().await.is_empty());
        assert!(registry.editing().is_none());
    }

    #[tokio::test]
    async fn test_begin_edit_unknown_item() {
        let (mut registry, _store, _dir) = create_test_registry().await;
        assert!(matches!(
            registry.begin_edit(ItemId(7)).await,
            Err(LedgerError::ItemNotFound(ItemId(7)))
        ));
    }
}

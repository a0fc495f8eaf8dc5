//! Client-side split store.
//!
//! The store is the single owner of the cached splits, the selected split,
//! the loading flag and the last error. Readers take snapshots; every change
//! goes through [`SplitStore::dispatch`].

use collabsplit_types::{ObjectId, SplitRecord};

#[derive(Clone, Debug, PartialEq)]
pub enum StoreAction {
    /// Replace the cached split list wholesale.
    SetSplits(Vec<SplitRecord>),
    /// Insert or refresh one cached split.
    UpsertSplit(SplitRecord),
    /// Select a cached split by id; `None` or an unknown id clears the selection.
    SelectSplit(Option<ObjectId>),
    SetLoading(bool),
    SetError(Option<String>),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SplitStore {
    splits: Vec<SplitRecord>,
    selected_split: Option<SplitRecord>,
    is_loading: bool,
    error: Option<String>,
}

impl SplitStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn splits(&self) -> &[SplitRecord] {
        &self.splits
    }

    pub fn selected_split(&self) -> Option<&SplitRecord> {
        self.selected_split.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn split(&self, id: &ObjectId) -> Option<&SplitRecord> {
        self.splits.iter().find(|s| &s.id == id)
    }

    pub fn dispatch(&mut self, action: StoreAction) {
        match action {
            StoreAction::SetSplits(splits) => self.splits = splits,
            StoreAction::UpsertSplit(record) => {
                if self
                    .selected_split
                    .as_ref()
                    .is_some_and(|s| s.id == record.id)
                {
                    self.selected_split = Some(record.clone());
                }
                match self.splits.iter_mut().find(|s| s.id == record.id) {
                    Some(existing) => *existing = record,
                    None => self.splits.push(record),
                }
            }
            StoreAction::SelectSplit(id) => {
                self.selected_split = id.and_then(|id| self.split(&id).cloned());
            }
            StoreAction::SetLoading(is_loading) => self.is_loading = is_loading,
            StoreAction::SetError(error) => self.error = error,
        }
    }
}

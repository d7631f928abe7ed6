//! Order-builder state
//!
//! [`CatalogState`] owns the catalog records for one session and funnels
//! every quantity change through named methods. Quantities are keyed by
//! product name in the selection map, which is rebuilt into the records on
//! every load. [`OrderSession`] wraps a state with a [`SelectionStore`] and
//! persists the map after each change.

use super::collection::{OrderSummary, filter_by_name, summarize_order};
use crate::Result;
use crate::app::adapters::selection_store::SelectionStore;
use crate::app::models::{CatalogItem, SelectionMap};
use std::sync::Arc;
use tracing::{debug, info};

/// Catalog records plus the selected quantities
///
/// The selection map is authoritative: it may hold names that the current
/// sheet no longer lists, and those entries survive every change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogState {
    items: Vec<CatalogItem>,
    selections: SelectionMap,
}

impl CatalogState {
    /// Build state from freshly parsed items and a saved selection map
    ///
    /// Saved names missing from the catalog are kept in the map but do not
    /// appear in the records.
    pub fn from_items(mut items: Vec<CatalogItem>, selections: &SelectionMap) -> Self {
        for item in &mut items {
            item.quantity_selected = selections.get(&item.name).copied().unwrap_or(0);
        }
        Self {
            items,
            selections: selections.clone(),
        }
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find an item by line id or by case-insensitive name
    pub fn find(&self, key: &str) -> Option<&CatalogItem> {
        let key = key.trim();
        if let Ok(id) = key.parse::<usize>() {
            if let Some(item) = self.items.iter().find(|item| item.id == id) {
                return Some(item);
            }
        }
        self.items
            .iter()
            .find(|item| item.name.eq_ignore_ascii_case(key))
    }

    /// Set an item's quantity; returns false when no item has that id
    pub fn set_quantity(&mut self, id: usize, quantity: u32) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.quantity_selected = quantity;
                record_selection(&mut self.selections, &item.name, quantity);
                true
            }
            None => false,
        }
    }

    /// Change an item's quantity by `delta`, clamping to the `u32` range
    ///
    /// Returns the new quantity, or `None` when no item has that id.
    pub fn adjust_quantity(&mut self, id: usize, delta: i64) -> Option<u32> {
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        let updated = (item.quantity_selected as i64)
            .saturating_add(delta)
            .clamp(0, u32::MAX as i64) as u32;
        item.quantity_selected = updated;
        record_selection(&mut self.selections, &item.name, updated);
        Some(updated)
    }

    /// Set every quantity back to zero and forget every saved name
    pub fn reset_all(&mut self) {
        for item in &mut self.items {
            item.quantity_selected = 0;
        }
        self.selections.clear();
    }

    /// Selection map to persist; zero quantities are never stored
    pub fn selections(&self) -> &SelectionMap {
        &self.selections
    }

    pub fn has_selection(&self) -> bool {
        self.items.iter().any(|item| item.quantity_selected > 0)
    }

    pub fn summary(&self) -> OrderSummary {
        summarize_order(&self.items)
    }

    /// Items whose name contains the search term
    pub fn filtered(&self, term: &str) -> Vec<&CatalogItem> {
        filter_by_name(&self.items, term)
    }
}

fn record_selection(selections: &mut SelectionMap, name: &str, quantity: u32) {
    if quantity == 0 {
        selections.remove(name);
    } else {
        selections.insert(name.to_string(), quantity);
    }
}

/// Catalog state that persists its selection map on every change
pub struct OrderSession {
    state: CatalogState,
    store: Arc<dyn SelectionStore>,
}

impl OrderSession {
    /// Start a session from parsed items and the store's saved map
    pub fn open(items: Vec<CatalogItem>, store: Arc<dyn SelectionStore>) -> Self {
        let saved = store.load();
        let state = CatalogState::from_items(items, &saved);
        info!(
            "Opened order session with {} items, {} selected",
            state.len(),
            state.selections().len()
        );
        Self { state, store }
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Set a quantity and persist
    pub fn set_quantity(&mut self, id: usize, quantity: u32) -> Result<bool> {
        let found = self.state.set_quantity(id, quantity);
        if found {
            self.persist()?;
        }
        Ok(found)
    }

    /// Adjust a quantity, clamped at zero, and persist
    pub fn adjust_quantity(&mut self, id: usize, delta: i64) -> Result<Option<u32>> {
        let updated = self.state.adjust_quantity(id, delta);
        if updated.is_some() {
            self.persist()?;
        }
        Ok(updated)
    }

    /// Zero every quantity and forget the saved map
    pub fn reset_all(&mut self) -> Result<()> {
        self.state.reset_all();
        self.store.clear()?;
        debug!("Cleared all selections");
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        self.store.save(self.state.selections())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::adapters::selection_store::MemorySelectionStore;

    fn sample_items() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new(1, "Almonds", 100.0).unwrap(),
            CatalogItem::new(2, "Cashew", 50.0).unwrap(),
            CatalogItem::new(4, "Pistachio", 30.0).unwrap(),
        ]
    }

    #[test]
    fn test_from_items_applies_saved_quantities() {
        let mut saved = SelectionMap::new();
        saved.insert("Cashew".to_string(), 3);
        saved.insert("Discontinued".to_string(), 9);

        let state = CatalogState::from_items(sample_items(), &saved);
        let quantities: Vec<u32> = state.items().iter().map(|i| i.quantity_selected).collect();
        assert_eq!(quantities, vec![0, 3, 0]);
        assert_eq!(state.selections(), &saved);
    }

    #[test]
    fn test_decrement_at_zero_stays_zero() {
        let mut state = CatalogState::from_items(sample_items(), &SelectionMap::new());
        assert_eq!(state.adjust_quantity(1, -1), Some(0));
        assert_eq!(state.adjust_quantity(1, 2), Some(2));
        assert_eq!(state.adjust_quantity(1, -5), Some(0));
        assert_eq!(state.adjust_quantity(99, 1), None);
    }

    #[test]
    fn test_adjust_saturates_at_both_ends() {
        let mut state = CatalogState::from_items(sample_items(), &SelectionMap::new());
        state.set_quantity(1, 1);

        assert_eq!(state.adjust_quantity(1, i64::MAX), Some(u32::MAX));
        assert_eq!(state.adjust_quantity(1, i64::MAX), Some(u32::MAX));
        assert_eq!(state.adjust_quantity(1, i64::MIN), Some(0));
        assert!(state.selections().is_empty());
    }

    #[test]
    fn test_find_by_id_or_name() {
        let state = CatalogState::from_items(sample_items(), &SelectionMap::new());
        assert_eq!(state.find("4").map(|i| i.name.as_str()), Some("Pistachio"));
        assert_eq!(state.find(" cashew ").map(|i| i.id), Some(2));
        assert!(state.find("walnut").is_none());
    }

    #[test]
    fn test_summary_follows_quantities() {
        let mut state = CatalogState::from_items(sample_items(), &SelectionMap::new());
        assert!(!state.has_selection());
        state.set_quantity(1, 2);
        state.set_quantity(4, 1);
        assert!(state.has_selection());
        assert_eq!(state.summary().total, 230.0);
    }

    #[test]
    fn test_session_persists_every_change() {
        let store = Arc::new(MemorySelectionStore::new());
        let mut session = OrderSession::open(sample_items(), store.clone());

        session.adjust_quantity(2, 1).unwrap();
        session.adjust_quantity(2, 1).unwrap();
        assert_eq!(store.load().get("Cashew"), Some(&2));

        session.set_quantity(2, 0).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_session_keeps_saved_names_missing_from_catalog() {
        let mut saved = SelectionMap::new();
        saved.insert("Walnuts".to_string(), 2);
        let store = Arc::new(MemorySelectionStore::with_selections(saved));
        let mut session = OrderSession::open(sample_items(), store.clone());

        session.adjust_quantity(1, 1).unwrap();
        session.set_quantity(2, 3).unwrap();
        session.set_quantity(2, 0).unwrap();

        let persisted = store.load();
        assert_eq!(persisted.get("Walnuts"), Some(&2));
        assert_eq!(persisted.get("Almonds"), Some(&1));
        assert_eq!(persisted.get("Cashew"), None);
        assert_eq!(session.state().summary().total, 100.0);
    }

    #[test]
    fn test_session_restores_saved_selection() {
        let mut saved = SelectionMap::new();
        saved.insert("Almonds".to_string(), 5);
        let store = Arc::new(MemorySelectionStore::with_selections(saved));

        let session = OrderSession::open(sample_items(), store);
        assert_eq!(session.state().items()[0].quantity_selected, 5);
    }

    #[test]
    fn test_reset_clears_quantities_and_store() {
        let store = Arc::new(MemorySelectionStore::new());
        let mut session = OrderSession::open(sample_items(), store.clone());
        session.set_quantity(1, 3).unwrap();
        session.set_quantity(4, 2).unwrap();

        session.reset_all().unwrap();

        assert!(session.state().items().iter().all(|i| i.quantity_selected == 0));
        assert!(!store.is_saved());
        assert!(store.load().is_empty());
    }
}

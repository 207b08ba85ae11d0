//! Search history manager
//!
//! Owns the ordered list of submitted search terms, mirrors it in full to a
//! [`KeyValueStore`] as a JSON array and re-renders a [`HistoryView`] after
//! every change.

use crate::error::Result;
use crate::storage::KeyValueStore;

/// Something that can display the history list
pub trait HistoryView {
    /// Replace everything currently shown with one entry per term, in order
    fn render(&mut self, terms: &[String]) -> Result<()>;
}

/// Outcome of a search submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The trimmed term was appended and persisted
    Added(String),
    /// Nothing but whitespace was submitted
    Ignored,
}

impl Submission {
    pub fn is_added(&self) -> bool {
        matches!(self, Submission::Added(_))
    }
}

/// Search history bound to a store and a view
pub struct HistoryManager<S, V> {
    key: String,
    terms: Vec<String>,
    store: S,
    view: V,
}

impl<S: KeyValueStore, V: HistoryView> HistoryManager<S, V> {
    /// Load the persisted history under `key`. Missing or unreadable data
    /// yields an empty history.
    pub fn load(store: S, view: V, key: impl Into<String>) -> Self {
        let key = key.into();
        let terms = read_terms(&store, &key);
        log::info!("Loaded {} search history entries from '{}'", terms.len(), key);
        Self { key, terms, store, view }
    }

    /// Re-read the history from the store, discarding in-memory state
    pub fn reload(&mut self) {
        self.terms = read_terms(&self.store, &self.key);
    }

    /// Handle a raw submission from the search input
    pub fn submit(&mut self, raw: &str) -> Result<Submission> {
        let term = raw.trim();
        if term.is_empty() {
            log::debug!("Ignoring empty search submission");
            return Ok(Submission::Ignored);
        }
        self.add(term)?;
        Ok(Submission::Added(term.to_string()))
    }

    /// Append a term, persist the whole list and re-render
    pub fn add(&mut self, term: &str) -> Result<()> {
        self.terms.push(term.to_string());
        let encoded = serde_json::to_string(&self.terms)?;
        self.store.set(&self.key, &encoded)?;
        log::debug!("Added search term ({} total)", self.terms.len());
        self.render()
    }

    /// Forget every term and remove the store entry. The view is emptied
    /// even when the store refuses the removal.
    pub fn clear(&mut self) -> Result<()> {
        self.terms.clear();
        let removed = self.store.remove(&self.key);
        self.render()?;
        removed?;
        log::debug!("Cleared search history");
        Ok(())
    }

    /// Rebuild the view from the in-memory list
    pub fn render(&mut self) -> Result<()> {
        self.view.render(&self.terms)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Tear the manager down, keeping the store
    pub fn into_store(self) -> S {
        self.store
    }
}

/// Decode the stored list, degrading to empty on any failure
fn read_terms<S: KeyValueStore>(store: &S, key: &str) -> Vec<String> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            log::warn!("Could not read search history: {}", e);
            return Vec::new();
        }
    };

    // An explicit JSON null is what an empty slot decodes to
    match serde_json::from_str::<Option<Vec<String>>>(&raw) {
        Ok(terms) => terms.unwrap_or_default(),
        Err(e) => {
            log::warn!("Discarding unreadable search history: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[derive(Default)]
    struct ListView {
        items: Vec<String>,
        renders: usize,
    }

    impl HistoryView for ListView {
        fn render(&mut self, terms: &[String]) -> Result<()> {
            self.items = terms.to_vec();
            self.renders += 1;
            Ok(())
        }
    }

    fn manager(store: MemoryStore) -> HistoryManager<MemoryStore, ListView> {
        HistoryManager::load(store, ListView::default(), "searchHistory")
    }

    #[test]
    fn test_load_missing_is_empty() {
        let history = manager(MemoryStore::new());
        assert!(history.terms().is_empty());
        assert_eq!(history.view().renders, 0);
    }

    #[test]
    fn test_load_null_is_empty() {
        let history = manager(MemoryStore::with_entry("searchHistory", "null"));
        assert!(history.terms().is_empty());
    }

    #[test]
    fn test_load_wrong_shape_is_empty() {
        let history = manager(MemoryStore::with_entry("searchHistory", r#"{"a": 1}"#));
        assert!(history.terms().is_empty());
        let history = manager(MemoryStore::with_entry("searchHistory", "[1, 2]"));
        assert!(history.terms().is_empty());
    }

    #[test]
    fn test_submit_trims() {
        let mut history = manager(MemoryStore::new());
        let outcome = history.submit("  rust wasm \n").unwrap();
        assert_eq!(outcome, Submission::Added("rust wasm".to_string()));
        assert_eq!(history.terms(), ["rust wasm"]);
        assert_eq!(history.view().items, ["rust wasm"]);
    }

    #[test]
    fn test_duplicates_kept() {
        let mut history = manager(MemoryStore::new());
        history.submit("a").unwrap();
        history.submit("a").unwrap();
        assert_eq!(history.terms(), ["a", "a"]);
        assert_eq!(
            history.store().get("searchHistory").unwrap().as_deref(),
            Some(r#"["a","a"]"#)
        );
    }

    #[test]
    fn test_clear_rerenders_even_when_empty() {
        let mut history = manager(MemoryStore::new());
        history.clear().unwrap();
        assert_eq!(history.view().renders, 1);
        assert!(history.view().items.is_empty());
    }
}

//! An in-memory input source registry.
//!
//! [`HeadlessRegistry`] behaves like a platform registry without touching the desktop session,
//! which makes it suitable for tests and for platforms without a native backend. Entries can be
//! added, renamed and removed while handles to them are alive, to exercise the parts of the API
//! that follow live registry state.
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use switchkey_core::error::ActivationError;
use switchkey_core::icon::Icon;
use switchkey_core::input_source::{InputSource, InputSourceId, InputSourceProvider};
use switchkey_core::registry::InputSourceRegistry;
use tracing::{debug, warn};

/// The data of one registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSourceEntry {
    id: InputSourceId,
    display_name: String,
    icon: Option<Icon>,
}

impl InputSourceEntry {
    pub fn new(id: impl Into<InputSourceId>, display_name: impl Into<String>) -> Self {
        Self { id: id.into(), display_name: display_name.into(), icon: None }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn id(&self) -> &InputSourceId {
        &self.id
    }
}

#[derive(Debug)]
struct Entry {
    display_name: String,
    icon: Option<Icon>,
    deny_activation: bool,
}

#[derive(Debug)]
struct State {
    entries: HashMap<InputSourceId, Entry>,
    current: InputSourceId,
    activations: usize,
}

impl State {
    fn insert(&mut self, entry: InputSourceEntry) -> bool {
        let InputSourceEntry { id, display_name, icon } = entry;
        match self.entries.get_mut(&id) {
            Some(existing) => {
                existing.display_name = display_name;
                existing.icon = icon;
                true
            },
            None => {
                self.entries.insert(id, Entry { display_name, icon, deny_activation: false });
                false
            },
        }
    }
}

/// An input source registry living in memory.
///
/// Clones share the same entries, so a test can keep one clone to mutate the registry while
/// another one is owned by [`InputSources`](crate::InputSources).
#[derive(Debug, Clone)]
pub struct HeadlessRegistry {
    state: Arc<Mutex<State>>,
}

impl HeadlessRegistry {
    /// Create a registry with a single entry, which is the current input source.
    pub fn new(current: InputSourceEntry) -> Self {
        let mut state =
            State { entries: HashMap::new(), current: current.id.clone(), activations: 0 };
        state.insert(current);
        Self { state: Arc::new(Mutex::new(state)) }
    }

    /// Add another entry, see [`insert`](Self::insert).
    pub fn with_entry(self, entry: InputSourceEntry) -> Self {
        self.insert(entry);
        self
    }

    /// Add or replace an entry.
    ///
    /// Replacing an entry updates its display name and icon but keeps
    /// [`deny_activation`](Self::deny_activation) as it was. A new entry, including one
    /// re-inserted after [`remove`](Self::remove), can be activated.
    ///
    /// Returns `true` if an entry with the same identifier was replaced.
    pub fn insert(&self, entry: InputSourceEntry) -> bool {
        self.lock().insert(entry)
    }

    /// Remove an entry. Existing handles to it become stale.
    ///
    /// The current input source cannot be removed, since the registry must always have one.
    /// Returns whether an entry was removed.
    pub fn remove(&self, id: &str) -> bool {
        let mut state = self.lock();
        if state.current == id {
            warn!(id, "refusing to remove the current input source");
            return false;
        }
        state.entries.remove(id).is_some()
    }

    /// Change the display name of an entry. Returns `false` if there is no such entry.
    pub fn set_display_name(&self, id: &str, display_name: impl Into<String>) -> bool {
        self.with_entry_mut(id, |entry| entry.display_name = display_name.into())
    }

    /// Change the icon of an entry. Returns `false` if there is no such entry.
    pub fn set_icon(&self, id: &str, icon: Option<Icon>) -> bool {
        self.with_entry_mut(id, |entry| entry.icon = icon)
    }

    /// Make activation of an entry fail with [`ActivationError::Denied`], like a platform that
    /// refuses to select it. Returns `false` if there is no such entry.
    pub fn deny_activation(&self, id: &str, deny: bool) -> bool {
        self.with_entry_mut(id, |entry| entry.deny_activation = deny)
    }

    /// How many activation requests reached the registry, successful or not.
    pub fn activation_count(&self) -> usize {
        self.lock().activations
    }

    fn with_entry_mut(&self, id: &str, f: impl FnOnce(&mut Entry)) -> bool {
        self.lock().entries.get_mut(id).map(f).is_some()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // The state stays consistent even if a test panicked while holding the lock.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn handle(&self, id: InputSourceId, display_name: String) -> InputSource {
        InputSource::new(HeadlessInputSource {
            id,
            last_display_name: Mutex::new(display_name),
            state: self.state.clone(),
        })
    }
}

impl InputSourceRegistry for HeadlessRegistry {
    fn current(&self) -> InputSource {
        let (id, display_name) = {
            let state = self.lock();
            let display_name = state
                .entries
                .get(&state.current)
                .map(|entry| entry.display_name.clone())
                .unwrap_or_default();
            (state.current.clone(), display_name)
        };
        self.handle(id, display_name)
    }

    fn lookup(&self, id: &str) -> Option<InputSource> {
        let (id, display_name) = {
            let state = self.lock();
            let (id, entry) = state.entries.get_key_value(id)?;
            (id.clone(), entry.display_name.clone())
        };
        Some(self.handle(id, display_name))
    }
}

/// Handle to an entry of a [`HeadlessRegistry`].
#[derive(Debug)]
pub struct HeadlessInputSource {
    id: InputSourceId,
    /// Reported once the entry is gone.
    last_display_name: Mutex<String>,
    state: Arc<Mutex<State>>,
}

impl HeadlessInputSource {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether the registry still has an entry for this handle.
    pub fn is_stale(&self) -> bool {
        !self.lock().entries.contains_key(&self.id)
    }
}

impl InputSourceProvider for HeadlessInputSource {
    fn id(&self) -> &InputSourceId {
        &self.id
    }

    fn display_name(&self) -> String {
        let live = self.lock().entries.get(&self.id).map(|entry| entry.display_name.clone());
        let mut last = self.last_display_name.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(live) = live {
            *last = live;
        }
        last.clone()
    }

    fn icon(&self) -> Option<Icon> {
        self.lock().entries.get(&self.id).and_then(|entry| entry.icon.clone())
    }

    fn activate(&self) -> Result<(), ActivationError> {
        let mut state = self.lock();
        state.activations += 1;
        match state.entries.get(&self.id).map(|entry| entry.deny_activation) {
            None => Err(ActivationError::NotFound(self.id.clone())),
            Some(true) => Err(ActivationError::Denied(self.id.clone())),
            Some(false) => {
                if state.current != self.id {
                    debug!(from = %state.current, to = %self.id, "switching input source");
                    state.current = self.id.clone();
                }
                Ok(())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> HeadlessRegistry {
        HeadlessRegistry::new(InputSourceEntry::new("com.apple.keylayout.US", "U.S."))
            .with_entry(InputSourceEntry::new("com.apple.keylayout.German", "German"))
    }

    #[test]
    fn insert_reports_replacement() {
        let registry = registry();
        assert!(!registry.insert(InputSourceEntry::new("com.apple.keylayout.French", "French")));
        assert!(registry.insert(InputSourceEntry::new("com.apple.keylayout.French", "Français")));
        assert_eq!(registry.lookup("com.apple.keylayout.French").unwrap().display_name(), "Français");
    }

    #[test]
    fn replacing_keeps_denied_activation() {
        let registry = registry();
        let german = registry.lookup("com.apple.keylayout.German").unwrap();
        registry.deny_activation("com.apple.keylayout.German", true);

        assert!(registry.insert(InputSourceEntry::new("com.apple.keylayout.German", "Deutsch")));
        assert_eq!(german.display_name(), "Deutsch");
        assert!(matches!(german.activate(), Err(ActivationError::Denied(_))));

        registry.remove("com.apple.keylayout.German");
        assert!(!registry.insert(InputSourceEntry::new("com.apple.keylayout.German", "German")));
        german.activate().unwrap();
        assert_eq!(registry.current(), german);
    }

    #[test]
    fn current_cannot_be_removed() {
        let registry = registry();
        assert!(!registry.remove("com.apple.keylayout.US"));
        assert!(registry.lookup("com.apple.keylayout.US").is_some());
        assert!(registry.remove("com.apple.keylayout.German"));
        assert!(!registry.remove("com.apple.keylayout.German"));
    }

    #[test]
    fn stale_handle_keeps_last_name() {
        let registry = registry();
        let german = registry.lookup("com.apple.keylayout.German").unwrap();
        registry.set_display_name("com.apple.keylayout.German", "Deutsch");
        assert_eq!(german.display_name(), "Deutsch");

        registry.remove("com.apple.keylayout.German");
        assert!(german.cast_ref::<HeadlessInputSource>().unwrap().is_stale());
        assert_eq!(german.id(), "com.apple.keylayout.German");
        assert_eq!(german.display_name(), "Deutsch");
        assert!(german.icon().is_none());
        assert!(matches!(german.activate(), Err(ActivationError::NotFound(id)) if id == "com.apple.keylayout.German"));
    }

    #[test]
    fn setters_report_missing_entries() {
        let registry = registry();
        assert!(!registry.set_display_name("nonexistent.id", "x"));
        assert!(!registry.set_icon("nonexistent.id", None));
        assert!(!registry.deny_activation("nonexistent.id", true));
    }

    #[test]
    fn failed_activations_are_counted() {
        let registry = registry();
        registry.deny_activation("com.apple.keylayout.German", true);
        let german = registry.lookup("com.apple.keylayout.German").unwrap();
        assert!(german.activate().is_err());
        assert_eq!(registry.activation_count(), 1);

        registry.deny_activation("com.apple.keylayout.German", false);
        german.activate().unwrap();
        assert_eq!(registry.activation_count(), 2);
        assert_eq!(registry.current(), german);
    }
}

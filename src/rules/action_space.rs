//! Action vocabulary: a stable index for every raw action a rule set can
//! produce.

use rustc_hash::FxHashMap;

use crate::core::EngineError;

/// Ordered list of raw actions with O(1) reverse lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionSpace {
    actions: Vec<String>,
    index: FxHashMap<String, usize>,
}

impl ActionSpace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action; duplicates keep their first index.
    pub fn push(&mut self, action: impl Into<String>) {
        let action = action.into();
        if !self.index.contains_key(&action) {
            self.index.insert(action.clone(), self.actions.len());
            self.actions.push(action);
        }
    }

    pub fn index_of(&self, action: &str) -> Result<usize, EngineError> {
        self.index
            .get(action)
            .copied()
            .ok_or_else(|| EngineError::UnknownAction(action.to_string()))
    }

    #[must_use]
    pub fn action_at(&self, index: usize) -> Option<&str> {
        self.actions.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, action: &str) -> bool {
        self.index.contains_key(action)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ActionSpace {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut space = Self::new();
        for action in iter {
            space.push(action);
        }
        space
    }
}

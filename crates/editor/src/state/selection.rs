use shared::ObjectId;

/// Object selection state (supports multi-select)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    /// Selected object IDs (in order of selection, no duplicates)
    selected: Vec<ObjectId>,
    /// Most recently selected object
    active: Option<ObjectId>,
}

impl SelectionState {
    /// Select `ids`, replacing the current selection unless `append` is set.
    ///
    /// The active object becomes the last of `ids`. An empty `ids` with
    /// `append` keeps the previous tail as active.
    pub fn select<I, S>(&mut self, ids: I, append: bool)
    where
        I: IntoIterator<Item = S>,
        S: Into<ObjectId>,
    {
        if !append {
            self.selected.clear();
        }
        let mut last = None;
        for id in ids {
            let id = id.into();
            if !self.selected.contains(&id) {
                self.selected.push(id.clone());
            }
            last = Some(id);
        }
        self.active = last.or_else(|| self.selected.last().cloned());
    }

    /// Remove `ids` from the selection. Moves the active object to the new
    /// tail if it was removed.
    pub fn deselect<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids: Vec<S> = ids.into_iter().collect();
        self.selected
            .retain(|s| !ids.iter().any(|id| id.as_ref() == s.as_str()));

        let active_removed = self
            .active
            .as_deref()
            .is_some_and(|a| ids.iter().any(|id| id.as_ref() == a));
        if active_removed {
            self.active = self.selected.last().cloned();
        }
    }

    /// Clear all selection
    pub fn clear(&mut self) {
        self.selected.clear();
        self.active = None;
    }

    /// All selected objects
    pub fn all(&self) -> &[ObjectId] {
        &self.selected
    }

    pub fn active(&self) -> Option<&ObjectId> {
        self.active.as_ref()
    }

    /// Check if an object is selected
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Number of selected objects
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

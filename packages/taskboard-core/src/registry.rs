/// Dashboard registry: board data and display name per dashboard id, plus
/// the current selection.
///
/// Boards sit behind `Arc` so cloning the registry is shallow; a board is
/// copied only when a mutation touches it while an older snapshot still
/// shares it.
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::types::{BoardData, DEFAULT_DASHBOARD_ID};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardRegistry {
    boards: BTreeMap<String, Arc<BoardData>>,
    names: BTreeMap<String, String>,
    selected: String,
}

impl DashboardRegistry {
    /// Registry holding only the default dashboard.
    pub fn new(default_name: &str, default_board: BoardData) -> Self {
        let mut boards = BTreeMap::new();
        boards.insert(DEFAULT_DASHBOARD_ID.to_string(), Arc::new(default_board));
        let mut names = BTreeMap::new();
        names.insert(DEFAULT_DASHBOARD_ID.to_string(), default_name.to_string());
        Self {
            boards,
            names,
            selected: DEFAULT_DASHBOARD_ID.to_string(),
        }
    }

    /// Build from raw parts (e.g. a decoded blob), restoring the invariants:
    /// the default dashboard exists in both maps and the selection names a board.
    pub fn from_parts(
        boards: BTreeMap<String, BoardData>,
        names: BTreeMap<String, String>,
        selected: String,
        default_name: &str,
        default_board: impl FnOnce() -> BoardData,
    ) -> Self {
        let mut boards: BTreeMap<String, Arc<BoardData>> =
            boards.into_iter().map(|(id, b)| (id, Arc::new(b))).collect();
        let mut names = names;
        if !boards.contains_key(DEFAULT_DASHBOARD_ID) {
            log::warn!("[taskboard.registry] Default dashboard missing, re-seeding it");
            boards.insert(DEFAULT_DASHBOARD_ID.to_string(), Arc::new(default_board()));
        }
        names
            .entry(DEFAULT_DASHBOARD_ID.to_string())
            .or_insert_with(|| default_name.to_string());
        let selected = if boards.contains_key(&selected) {
            selected
        } else {
            DEFAULT_DASHBOARD_ID.to_string()
        };
        Self {
            boards,
            names,
            selected,
        }
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// The selected board, if the selection names one.
    pub fn current(&self) -> Option<&BoardData> {
        self.boards.get(&self.selected).map(|b| b.as_ref())
    }

    /// Mutable access to the selected board, copying it first if an older
    /// snapshot still shares it.
    pub fn current_mut(&mut self) -> Option<&mut BoardData> {
        self.boards.get_mut(&self.selected).map(Arc::make_mut)
    }

    pub fn board(&self, id: &str) -> Option<&BoardData> {
        self.boards.get(id).map(|b| b.as_ref())
    }

    pub fn name(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.boards.contains_key(id)
    }

    pub fn boards(&self) -> impl Iterator<Item = (&str, &BoardData)> {
        self.boards.iter().map(|(id, b)| (id.as_str(), b.as_ref()))
    }

    pub fn names(&self) -> &BTreeMap<String, String> {
        &self.names
    }

    /// `(id, name)` for every board: default first, then by id.
    pub fn dashboards(&self) -> Vec<(String, String)> {
        let mut ids: Vec<&String> = self.boards.keys().collect();
        ids.sort_by(|a, b| {
            (a.as_str() != DEFAULT_DASHBOARD_ID, a).cmp(&(b.as_str() != DEFAULT_DASHBOARD_ID, b))
        });
        ids.into_iter()
            .map(|id| (id.clone(), self.names.get(id).cloned().unwrap_or_default()))
            .collect()
    }

    /// Insert a new dashboard under `id` and select it.
    pub fn create(&mut self, id: String, name: &str, board: BoardData) {
        self.boards.insert(id.clone(), Arc::new(board));
        self.names.insert(id.clone(), name.to_string());
        self.selected = id;
    }

    /// Point the selection at `id`. Not validated: an unknown id leaves
    /// board-scoped operations as no-ops until a known id is selected.
    pub fn select(&mut self, id: &str) -> bool {
        if self.selected == id {
            return false;
        }
        self.selected = id.to_string();
        true
    }

    /// Set the display name, inserting it if `id` has none.
    pub fn rename(&mut self, id: &str, name: &str) -> bool {
        if self.names.get(id).map(String::as_str) == Some(name) {
            return false;
        }
        self.names.insert(id.to_string(), name.to_string());
        true
    }

    /// Remove a dashboard. The default dashboard is never removed; deleting
    /// the selected dashboard moves the selection to the default.
    pub fn delete(&mut self, id: &str) -> bool {
        if id == DEFAULT_DASHBOARD_ID {
            return false;
        }
        let removed_board = self.boards.remove(id).is_some();
        let removed_name = self.names.remove(id).is_some();
        let reselected = if self.selected == id {
            self.selected = DEFAULT_DASHBOARD_ID.to_string();
            true
        } else {
            false
        };
        removed_board || removed_name || reselected
    }

    /// Plain copies of the maps, for serialization.
    pub fn to_parts(&self) -> (BTreeMap<String, BoardData>, BTreeMap<String, String>, String) {
        let boards = self
            .boards
            .iter()
            .map(|(id, b)| (id.clone(), b.as_ref().clone()))
            .collect();
        (boards, self.names.clone(), self.selected.clone())
    }
}

/// Board engine: the state container owned by the application's composition
/// root.
///
/// Holds the current `Snapshot` behind an `Arc`. Readers keep whatever
/// snapshot they were handed; every accepted mutation produces a new one,
/// writes it through the key-value store and publishes it to subscribers.
/// Store failures are logged and never surface from an operation.
use std::sync::Arc;

use tokio::sync::watch;

use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::ids::{HashIdSource, IdSource};
use crate::persist::{self, PersistError, PersistedState};
use crate::query::{self, ChatContext};
use crate::registry::DashboardRegistry;
use crate::storage::KeyValueStore;
use crate::types::{BoardData, ChatMessage, ChatSender, Task, TaskDraft, TaskUpdate};
use crate::ui_state::UiState;

/// Full engine state at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub registry: DashboardRegistry,
    pub ui: UiState,
}

impl Snapshot {
    fn initial(config: &EngineConfig) -> Self {
        Self {
            registry: DashboardRegistry::new(
                &config.default_dashboard_name,
                BoardData::seeded(&config.seed_columns),
            ),
            ui: UiState::new(config.dark_mode),
        }
    }

    fn from_persisted(state: PersistedState, config: &EngineConfig) -> Self {
        let registry = DashboardRegistry::from_parts(
            state.boards,
            state.dashboard_names,
            state.selected_dashboard,
            &config.default_dashboard_name,
            || BoardData::seeded(&config.seed_columns),
        );
        let mut ui = UiState::new(state.dark_mode).with_transcript(state.chat_messages);
        ui.search_query = state.search_query;
        ui.tag_search = state.tag_search;
        Self { registry, ui }
    }

    pub fn to_persisted(&self) -> PersistedState {
        let (boards, dashboard_names, selected_dashboard) = self.registry.to_parts();
        PersistedState {
            boards,
            dashboard_names,
            selected_dashboard,
            dark_mode: self.ui.dark_mode,
            search_query: self.ui.search_query.clone(),
            tag_search: self.ui.tag_search.clone(),
            chat_messages: self.ui.chat_messages().to_vec(),
        }
    }

    pub fn current_board(&self) -> Option<&BoardData> {
        self.registry.current()
    }

    /// Current board's tasks filtered by the search query and tag filter,
    /// newest first.
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        match self.registry.current() {
            Some(board) => query::filter_tasks(board, &self.ui.search_query, &self.ui.tag_search),
            None => Vec::new(),
        }
    }

    pub fn chat_context(&self) -> ChatContext {
        query::chat_context(&self.registry)
    }
}

pub struct BoardEngine<S: KeyValueStore> {
    config: EngineConfig,
    store: S,
    ids: Arc<dyn IdSource>,
    clock: Arc<dyn Clock>,
    state: Arc<Snapshot>,
    updates: watch::Sender<Arc<Snapshot>>,
}

impl<S: KeyValueStore> BoardEngine<S> {
    /// Load persisted state from `store`, using hashed ids and the system clock.
    pub fn load(store: S, config: EngineConfig) -> Self {
        Self::with_sources(store, config, Arc::new(HashIdSource::new()), Arc::new(SystemClock))
    }

    /// Load persisted state with explicit id and time sources. Absent or
    /// unreadable state falls back to a single seeded default dashboard.
    pub fn with_sources(
        store: S,
        config: EngineConfig,
        ids: Arc<dyn IdSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mut snapshot = match Self::read_state(&store, &config) {
            Ok(Some(state)) => {
                log::info!(
                    "[taskboard.engine] Loaded {} dashboard(s) from '{}'",
                    state.boards.len(),
                    config.state_key
                );
                Snapshot::from_persisted(state, &config)
            }
            Ok(None) => {
                log::info!("[taskboard.engine] No saved state, starting with default dashboard");
                Snapshot::initial(&config)
            }
            Err(e) => {
                log::warn!("[taskboard.engine] Discarding saved state: {}", e);
                Snapshot::initial(&config)
            }
        };
        snapshot.ui.external_calendar_link = Self::read_calendar_link(&store, &config);

        let state = Arc::new(snapshot);
        let (updates, _) = watch::channel(Arc::clone(&state));
        Self {
            config,
            store,
            ids,
            clock,
            state,
            updates,
        }
    }

    fn read_state(store: &S, config: &EngineConfig) -> Result<Option<PersistedState>, PersistError> {
        match store.get(&config.state_key)? {
            Some(bytes) => persist::decode(&bytes).map(Some),
            None => Ok(None),
        }
    }

    fn read_calendar_link(store: &S, config: &EngineConfig) -> Option<String> {
        match store.get(&config.calendar_key) {
            Ok(Some(bytes)) => match String::from_utf8(bytes) {
                Ok(link) => Some(link),
                Err(e) => {
                    log::warn!("[taskboard.engine] Calendar link is not UTF-8: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("[taskboard.engine] Failed to read calendar link: {}", e);
                None
            }
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The current snapshot. It stays valid and unchanged however the engine
    /// is mutated afterwards.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.state)
    }

    /// Receiver that observes every accepted mutation's snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.updates.subscribe()
    }

    pub fn registry(&self) -> &DashboardRegistry {
        &self.state.registry
    }

    pub fn ui(&self) -> &UiState {
        &self.state.ui
    }

    pub fn selected_dashboard(&self) -> &str {
        self.state.registry.selected()
    }

    pub fn current_board(&self) -> Option<&BoardData> {
        self.state.registry.current()
    }

    pub fn dashboard_name(&self, id: &str) -> Option<&str> {
        self.state.registry.name(id)
    }

    pub fn dashboards(&self) -> Vec<(String, String)> {
        self.state.registry.dashboards()
    }

    // ---- Dashboards -------------------------------------------------------

    /// Create a dashboard with seeded columns and select it.
    pub fn create_dashboard(&mut self, name: &str) -> String {
        let id = self.ids.new_id();
        let board = BoardData::seeded(&self.config.seed_columns);
        self.commit("create_dashboard", |s| {
            s.registry.create(id.clone(), name, board);
            true
        });
        log::info!("[taskboard.engine] Created dashboard {} ({})", id, name);
        id
    }

    pub fn select_dashboard(&mut self, id: &str) -> bool {
        if !self.state.registry.contains(id) {
            log::debug!("[taskboard.engine] Selecting unknown dashboard {}", id);
        }
        self.commit("select_dashboard", |s| s.registry.select(id))
    }

    pub fn rename_dashboard(&mut self, id: &str, name: &str) -> bool {
        self.commit("rename_dashboard", |s| s.registry.rename(id, name))
    }

    /// Delete a dashboard. The default dashboard is protected.
    pub fn delete_dashboard(&mut self, id: &str) -> bool {
        let deleted = self.commit("delete_dashboard", |s| s.registry.delete(id));
        if deleted {
            log::info!("[taskboard.engine] Deleted dashboard {}", id);
        }
        deleted
    }

    // ---- Columns ----------------------------------------------------------

    /// Append a column to the current board. None when no board is selected.
    pub fn add_column(&mut self, title: &str) -> Option<String> {
        let id = self.ids.new_id();
        let added = self.commit_board("add_column", |board| {
            board.add_column(id.clone(), title);
            true
        });
        added.then_some(id)
    }

    pub fn update_column(&mut self, id: &str, title: &str) -> bool {
        self.commit_board("update_column", |board| board.update_column(id, title))
    }

    /// Delete a column and all of its tasks.
    pub fn delete_column(&mut self, id: &str) -> bool {
        self.commit_board("delete_column", |board| board.delete_column(id))
    }

    // ---- Tasks ------------------------------------------------------------

    /// Append a task to the current board. `column_id` is not validated.
    pub fn add_task(&mut self, column_id: &str, draft: TaskDraft) -> Option<String> {
        let id = self.ids.new_id();
        let created_at = self.clock.now_millis();
        let added = self.commit_board("add_task", |board| {
            board.add_task(id.clone(), column_id, draft, created_at);
            true
        });
        added.then_some(id)
    }

    pub fn update_task(&mut self, id: &str, update: TaskUpdate) -> bool {
        self.commit_board("update_task", |board| board.update_task(id, update))
    }

    pub fn delete_task(&mut self, id: &str) -> bool {
        self.commit_board("delete_task", |board| board.delete_task(id))
    }

    pub fn move_task(&mut self, task_id: &str, to_column_id: &str) -> bool {
        self.commit_board("move_task", |board| board.move_task(task_id, to_column_id))
    }

    /// Same-column reorder. Cross-column or unknown ids are a no-op.
    pub fn reorder_tasks(&mut self, active_id: &str, over_id: &str) -> bool {
        self.commit_board("reorder_tasks", |board| board.reorder_tasks(active_id, over_id))
    }

    // ---- Board settings ---------------------------------------------------

    pub fn set_weather_location(&mut self, location: &str) -> bool {
        self.commit_board("set_weather_location", |board| board.set_weather_location(location))
    }

    /// Set the current board's own calendar link (distinct from the
    /// standalone link below).
    pub fn set_board_calendar_link(&mut self, link: &str) -> bool {
        self.commit_board("set_board_calendar_link", |board| board.set_external_calendar_link(link))
    }

    // ---- UI state ---------------------------------------------------------

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.commit("toggle_dark_mode", |s| {
            s.ui.toggle_dark_mode();
            true
        })
    }

    pub fn set_search_query(&mut self, query: &str) -> bool {
        self.commit("set_search_query", |s| s.ui.set_search_query(query))
    }

    pub fn set_tag_search(&mut self, tags: &str) -> bool {
        self.commit("set_tag_search", |s| s.ui.set_tag_search(tags))
    }

    /// Append to the chat transcript with a fresh id and the current time.
    pub fn append_chat_message(&mut self, sender: ChatSender, content: &str) -> String {
        let id = self.ids.new_id();
        let timestamp = self.clock.now_millis();
        self.commit("append_chat_message", |s| {
            s.ui.append_chat_message(id.clone(), sender, content, timestamp);
            true
        });
        id
    }

    pub fn chat_messages(&self) -> &[ChatMessage] {
        self.state.ui.chat_messages()
    }

    /// Set the standalone calendar link. Written under its own store key,
    /// not into the registry blob.
    pub fn set_external_calendar_link(&mut self, link: &str) -> bool {
        if self.state.ui.external_calendar_link.as_deref() == Some(link) {
            return false;
        }
        if let Err(e) = self.store.set(&self.config.calendar_key, link.as_bytes()) {
            log::warn!("[taskboard.engine] Failed to save calendar link: {}", e);
        }
        Arc::make_mut(&mut self.state).ui.external_calendar_link = Some(link.to_string());
        self.publish();
        true
    }

    pub fn clear_external_calendar_link(&mut self) -> bool {
        if self.state.ui.external_calendar_link.is_none() {
            return false;
        }
        if let Err(e) = self.store.remove(&self.config.calendar_key) {
            log::warn!("[taskboard.engine] Failed to remove calendar link: {}", e);
        }
        Arc::make_mut(&mut self.state).ui.external_calendar_link = None;
        self.publish();
        true
    }

    // ---- Queries ----------------------------------------------------------

    /// See [`Snapshot::filtered_tasks`]. Returns owned copies.
    pub fn filtered_tasks(&self) -> Vec<Task> {
        self.state.filtered_tasks().into_iter().cloned().collect()
    }

    pub fn chat_context(&self) -> ChatContext {
        self.state.chat_context()
    }

    // ---- Internals --------------------------------------------------------

    /// Apply `f` to the state. When it reports a change, persist and publish
    /// the new snapshot.
    fn commit(&mut self, op: &str, f: impl FnOnce(&mut Snapshot) -> bool) -> bool {
        let mut next = Snapshot::clone(&self.state);
        if !f(&mut next) {
            log::debug!("[taskboard.engine] {} made no change", op);
            return false;
        }
        self.state = Arc::new(next);
        self.persist(op);
        self.publish();
        true
    }

    /// Like `commit`, scoped to the selected board. A no-op when the selection
    /// names no board.
    fn commit_board(&mut self, op: &str, f: impl FnOnce(&mut BoardData) -> bool) -> bool {
        self.commit(op, |s| match s.registry.current_mut() {
            Some(board) => f(board),
            None => {
                log::debug!(
                    "[taskboard.engine] {} skipped: no board for selection {}",
                    op,
                    s.registry.selected()
                );
                false
            }
        })
    }

    fn persist(&self, op: &str) {
        let result = persist::encode(&self.state.to_persisted())
            .and_then(|bytes| Ok(self.store.set(&self.config.state_key, &bytes)?));
        match result {
            Ok(()) => log::debug!("[taskboard.engine] Saved state after {}", op),
            Err(e) => log::warn!("[taskboard.engine] Failed to save state after {}: {}", op, e),
        }
    }

    fn publish(&self) {
        self.updates.send_replace(Arc::clone(&self.state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::ids::SequentialIds;
    use crate::storage::memory::MemoryStore;
    use crate::storage::StoreError;
    use crate::types::{ChecklistItem, DEFAULT_DASHBOARD_ID};

    struct Harness {
        engine: BoardEngine<Arc<MemoryStore>>,
        store: Arc<MemoryStore>,
        clock: Arc<ManualClock>,
    }

    fn harness() -> Harness {
        harness_with_store(Arc::new(MemoryStore::new()))
    }

    fn harness_with_store(store: Arc<MemoryStore>) -> Harness {
        let clock = Arc::new(ManualClock::new(100));
        let engine = BoardEngine::with_sources(
            Arc::clone(&store),
            EngineConfig::default(),
            Arc::new(SequentialIds::new("id")),
            clock.clone(),
        );
        Harness {
            engine,
            store,
            clock,
        }
    }

    fn task_ids(tasks: &[Task]) -> Vec<String> {
        tasks.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_fresh_engine_has_seeded_default() {
        let h = harness();
        assert_eq!(h.engine.selected_dashboard(), DEFAULT_DASHBOARD_ID);
        let titles: Vec<&str> = h
            .engine
            .current_board()
            .unwrap()
            .columns
            .iter()
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(titles, vec!["To do", "In progress", "Done"]);
        assert!(h.engine.ui().dark_mode);
        assert!(h.store.is_empty());
    }

    #[test]
    fn test_work_dashboard_scenario() {
        let mut h = harness();
        let work = h.engine.create_dashboard("Work");
        assert_eq!(h.engine.selected_dashboard(), work);

        let todo = h.engine.add_column("Todo").unwrap();
        h.engine.add_task(&todo, TaskDraft::titled("Ship spec")).unwrap();

        let tasks = h.engine.filtered_tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Ship spec");

        assert!(h.engine.delete_column(&todo));
        assert!(h.engine.filtered_tasks().is_empty());
    }

    #[test]
    fn test_reorder_reflected_in_chat_context() {
        let mut h = harness();
        let a = h.engine.add_task("1", TaskDraft::titled("A")).unwrap();
        h.clock.set(200);
        let b = h.engine.add_task("1", TaskDraft::titled("B")).unwrap();

        assert!(h.engine.reorder_tasks(&a, &b));
        let board = h.engine.current_board().unwrap();
        assert_eq!(board.tasks[1].id, a);

        let ctx = h.engine.chat_context();
        assert_eq!(ctx.dashboard_name, "Main");
        let order: Vec<&str> = ctx.columns[0].tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(order, vec![b.as_str(), a.as_str()]);
        assert_eq!(ctx.columns[0].tasks[0].created_at, 200);
    }

    #[test]
    fn test_reorder_across_columns_leaves_state_untouched() {
        let mut h = harness();
        let a = h.engine.add_task("1", TaskDraft::titled("A")).unwrap();
        let b = h.engine.add_task("2", TaskDraft::titled("B")).unwrap();
        let before = h.engine.snapshot();
        assert!(!h.engine.reorder_tasks(&a, &b));
        assert!(!h.engine.reorder_tasks(&a, "missing"));
        assert_eq!(*h.engine.snapshot(), *before);
    }

    #[test]
    fn test_update_task_keeps_identity() {
        let mut h = harness();
        let id = h.engine.add_task("1", TaskDraft::titled("Draft")).unwrap();
        let update: TaskUpdate =
            serde_json::from_str(r#"{"id":"hijack","columnId":"3","title":"Final"}"#).unwrap();
        assert!(h.engine.update_task(&id, update));
        let task = h.engine.current_board().unwrap().task(&id).unwrap();
        assert_eq!(task.id, id);
        assert_eq!(task.column_id, "1");
        assert_eq!(task.title, "Final");
        assert_eq!(task.created_at, 100);
    }

    #[test]
    fn test_move_task_then_reorder() {
        let mut h = harness();
        let a = h.engine.add_task("1", TaskDraft::titled("A")).unwrap();
        let b = h.engine.add_task("2", TaskDraft::titled("B")).unwrap();
        assert!(h.engine.move_task(&a, "2"));
        assert!(h.engine.reorder_tasks(&a, &b));
        let ids: Vec<String> = h
            .engine
            .current_board()
            .unwrap()
            .tasks
            .iter()
            .map(|t| t.id.clone())
            .collect();
        assert_eq!(ids, vec![b, a]);
    }

    #[test]
    fn test_filtered_tasks_uses_ui_filters() {
        let mut h = harness();
        let urgent = TaskDraft {
            title: "Fix login".into(),
            labels: vec!["Urgent".into()],
            ..TaskDraft::default()
        };
        let fix = h.engine.add_task("1", urgent).unwrap();
        h.clock.advance(10);
        let other = h.engine.add_task("1", TaskDraft::titled("Fix docs")).unwrap();

        assert_eq!(task_ids(&h.engine.filtered_tasks()), vec![other.clone(), fix.clone()]);

        h.engine.set_tag_search("urgent, low");
        assert_eq!(task_ids(&h.engine.filtered_tasks()), vec![fix.clone()]);

        h.engine.set_tag_search("");
        h.engine.set_search_query("DOCS");
        assert_eq!(task_ids(&h.engine.filtered_tasks()), vec![other]);
    }

    #[test]
    fn test_delete_default_dashboard_is_noop() {
        let mut h = harness();
        h.engine.create_dashboard("Work");
        let before = h.engine.snapshot();
        assert!(!h.engine.delete_dashboard(DEFAULT_DASHBOARD_ID));
        assert_eq!(*h.engine.snapshot(), *before);
    }

    #[test]
    fn test_dashboard_name_lookup() {
        let mut h = harness();
        let work = h.engine.create_dashboard("Work");
        assert_eq!(h.engine.dashboard_name(&work), Some("Work"));
        assert!(h.engine.rename_dashboard(&work, "Office"));
        assert_eq!(h.engine.dashboard_name(&work), Some("Office"));
        assert_eq!(h.engine.dashboard_name(DEFAULT_DASHBOARD_ID), Some("Main"));
        assert_eq!(h.engine.dashboard_name("missing"), None);
    }

    #[test]
    fn test_board_mutation_shares_transcript_with_previous_snapshot() {
        let mut h = harness();
        h.engine.append_chat_message(ChatSender::User, "hi");
        let before = h.engine.snapshot();
        h.engine.add_column("Review").unwrap();
        let after = h.engine.snapshot();
        assert!(std::ptr::eq(
            before.ui.chat_messages().as_ptr(),
            after.ui.chat_messages().as_ptr()
        ));
    }

    #[test]
    fn test_delete_selected_dashboard_falls_back_to_default() {
        let mut h = harness();
        let work = h.engine.create_dashboard("Work");
        assert!(h.engine.delete_dashboard(&work));
        assert_eq!(h.engine.selected_dashboard(), DEFAULT_DASHBOARD_ID);
        assert_eq!(h.engine.dashboards().len(), 1);
    }

    #[test]
    fn test_unknown_selection_makes_board_ops_noops() {
        let mut h = harness();
        assert!(h.engine.select_dashboard("ghost"));
        assert!(h.engine.current_board().is_none());
        assert_eq!(h.engine.add_column("X"), None);
        assert_eq!(h.engine.add_task("1", TaskDraft::titled("t")), None);
        assert!(!h.engine.set_weather_location("Oslo"));
        assert!(h.engine.filtered_tasks().is_empty());
        assert!(h.engine.chat_context().columns.is_empty());

        assert!(h.engine.select_dashboard(DEFAULT_DASHBOARD_ID));
        assert!(h.engine.add_column("X").is_some());
    }

    #[test]
    fn test_snapshots_are_not_mutated_by_later_ops() {
        let mut h = harness();
        let before = h.engine.snapshot();
        h.engine.add_column("Review").unwrap();
        h.engine.toggle_dark_mode();
        assert_eq!(before.current_board().unwrap().columns.len(), 3);
        assert!(before.ui.dark_mode);
        assert_eq!(h.engine.current_board().unwrap().columns.len(), 4);
    }

    #[test]
    fn test_subscribers_see_new_snapshots() {
        let mut h = harness();
        let rx = h.engine.subscribe();
        h.engine.add_column("Review").unwrap();
        assert_eq!(rx.borrow().current_board().unwrap().columns.len(), 4);
        assert!(Arc::ptr_eq(&*rx.borrow(), &h.engine.snapshot()));
    }

    #[test]
    fn test_only_changes_are_persisted() {
        let mut h = harness();
        assert!(!h.engine.update_column("missing", "x"));
        assert!(h.store.get("kanban-storage").unwrap().is_none());
        assert!(h.engine.update_column("1", "Backlog"));
        assert!(h.store.get("kanban-storage").unwrap().is_some());
    }

    #[test]
    fn test_reload_round_trip() {
        let store = Arc::new(MemoryStore::new());
        let mut h = harness_with_store(Arc::clone(&store));
        let work = h.engine.create_dashboard("Work");
        let col = h.engine.add_column("Review").unwrap();
        let draft = TaskDraft {
            title: "Audit".into(),
            description: "quarterly".into(),
            labels: vec!["ops".into()],
            date: Some("2026-11-01".into()),
            media_url: Some("https://video.example/embed/1".into()),
            checklist: Some(vec![ChecklistItem::group(
                "g1",
                "Prep",
                vec![ChecklistItem::item("i1", "collect", true)],
            )]),
        };
        h.engine.add_task(&col, draft).unwrap();
        h.engine.add_task("1", TaskDraft::titled("Second")).unwrap();
        h.engine.set_weather_location("Lisbon");
        h.engine.append_chat_message(ChatSender::User, "What is due?");
        h.engine.toggle_dark_mode();
        h.engine.set_search_query("au");

        let reloaded = harness_with_store(store);
        assert_eq!(reloaded.engine.selected_dashboard(), work);
        assert_eq!(*reloaded.engine.snapshot(), *h.engine.snapshot());
    }

    #[test]
    fn test_corrupt_state_falls_back_to_default() {
        let store = Arc::new(MemoryStore::new());
        store.set("kanban-storage", b"{broken").unwrap();
        let h = harness_with_store(store);
        assert_eq!(h.engine.dashboards().len(), 1);
        assert_eq!(h.engine.current_board().unwrap().columns.len(), 3);
    }

    #[test]
    fn test_external_calendar_link_uses_own_key() {
        let store = Arc::new(MemoryStore::new());
        let mut h = harness_with_store(Arc::clone(&store));
        assert!(h.engine.set_external_calendar_link("https://calendar.example/embed"));
        assert!(!h.engine.set_external_calendar_link("https://calendar.example/embed"));
        assert_eq!(
            store.get("googleCalendarUrl").unwrap().as_deref(),
            Some(&b"https://calendar.example/embed"[..])
        );
        assert!(store.get("kanban-storage").unwrap().is_none());
        assert_eq!(h.engine.current_board().unwrap().external_calendar_link, "");

        let reloaded = harness_with_store(Arc::clone(&store));
        assert_eq!(
            reloaded.engine.ui().external_calendar_link.as_deref(),
            Some("https://calendar.example/embed")
        );

        assert!(h.engine.clear_external_calendar_link());
        assert!(!h.engine.clear_external_calendar_link());
        assert!(store.get("googleCalendarUrl").unwrap().is_none());
    }

    #[test]
    fn test_chat_transcript_appends() {
        let mut h = harness();
        let first = h.engine.append_chat_message(ChatSender::User, "hi");
        h.clock.advance(5);
        h.engine.append_chat_message(ChatSender::Assistant, "hello");
        let messages = h.engine.chat_messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].id, first);
        assert_eq!(messages[1].timestamp, 105);
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, StoreError> {
            Err(StoreError::Poisoned)
        }

        fn set(&self, _key: &str, _value: &[u8]) -> Result<(), StoreError> {
            Err(StoreError::Poisoned)
        }

        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Poisoned)
        }
    }

    #[test]
    fn test_store_failures_do_not_block_mutations() {
        let mut engine = BoardEngine::load(FailingStore, EngineConfig::default());
        assert!(engine.add_column("Review").is_some());
        assert!(engine.set_external_calendar_link("https://calendar.example"));
        assert_eq!(engine.current_board().unwrap().columns.len(), 4);
    }
}

use std::sync::Arc;

use crate::types::{ChatMessage, ChatSender};

/// Interface state that lives next to the boards but carries no structural
/// invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub dark_mode: bool,
    pub search_query: String,
    /// Comma-delimited label filter, e.g. `"urgent, low"`.
    pub tag_search: String,
    /// Standalone calendar link, persisted under its own key.
    pub external_calendar_link: Option<String>,
    /// Shared between snapshots until the next append.
    chat_messages: Arc<Vec<ChatMessage>>,
}

impl UiState {
    pub fn new(dark_mode: bool) -> Self {
        Self {
            dark_mode,
            search_query: String::new(),
            tag_search: String::new(),
            external_calendar_link: None,
            chat_messages: Arc::new(Vec::new()),
        }
    }

    pub(crate) fn with_transcript(mut self, chat_messages: Vec<ChatMessage>) -> Self {
        self.chat_messages = Arc::new(chat_messages);
        self
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    pub fn set_search_query(&mut self, query: &str) -> bool {
        replace_if_changed(&mut self.search_query, query)
    }

    pub fn set_tag_search(&mut self, tags: &str) -> bool {
        replace_if_changed(&mut self.tag_search, tags)
    }

    /// Chat transcript, oldest first. Append-only.
    pub fn chat_messages(&self) -> &[ChatMessage] {
        &self.chat_messages
    }

    pub fn append_chat_message(&mut self, id: String, sender: ChatSender, content: &str, timestamp: i64) {
        Arc::make_mut(&mut self.chat_messages).push(ChatMessage {
            id,
            sender,
            content: content.to_string(),
            timestamp,
        });
    }
}

fn replace_if_changed(slot: &mut String, value: &str) -> bool {
    if slot == value {
        return false;
    }
    *slot = value.to_string();
    true
}

/// Read-only views over the current board: the filtered task list and the
/// compact summary handed to the chat assistant.
use serde::Serialize;

use crate::registry::DashboardRegistry;
use crate::types::{BoardData, ChecklistItem, Task};

/// Split a comma-delimited tag filter into trimmed, lower-cased, non-empty tags.
pub fn parse_tag_search(tag_search: &str) -> Vec<String> {
    tag_search
        .to_lowercase()
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tasks whose title contains `search_query` (case-insensitive) and, when the
/// tag filter is non-empty, that carry at least one of its tags. Newest first;
/// equal timestamps keep board order.
pub fn filter_tasks<'a>(board: &'a BoardData, search_query: &str, tag_search: &str) -> Vec<&'a Task> {
    let query = search_query.to_lowercase();
    let tags = parse_tag_search(tag_search);

    let mut matches: Vec<&Task> = board
        .tasks
        .iter()
        .filter(|task| task.title.to_lowercase().contains(&query))
        .filter(|task| {
            tags.is_empty()
                || task
                    .labels
                    .iter()
                    .any(|label| tags.contains(&label.to_lowercase()))
        })
        .collect();
    // Stable: ties keep board order.
    matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    matches
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatContext {
    pub dashboard_name: String,
    pub columns: Vec<ChatColumn>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatColumn {
    pub id: String,
    pub title: String,
    pub tasks: Vec<ChatTask>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTask {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub labels: Vec<String>,
    pub checklist: ChecklistCounts,
    pub created_at: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChecklistCounts {
    pub total: usize,
    pub completed: usize,
}

impl ChecklistCounts {
    /// Counts top-level entries only; group children are not descended into.
    pub fn top_level(checklist: &[ChecklistItem]) -> Self {
        Self {
            total: checklist.len(),
            completed: checklist.iter().filter(|item| item.is_completed()).count(),
        }
    }
}

/// Summary of the selected dashboard, tasks grouped under their columns in
/// board order. Empty when the selection names no board.
pub fn chat_context(registry: &DashboardRegistry) -> ChatContext {
    let dashboard_name = registry
        .name(registry.selected())
        .unwrap_or_default()
        .to_string();
    let Some(board) = registry.current() else {
        return ChatContext {
            dashboard_name,
            columns: Vec::new(),
        };
    };

    let columns = board
        .columns
        .iter()
        .map(|column| ChatColumn {
            id: column.id.clone(),
            title: column.title.clone(),
            tasks: board
                .tasks_in_column(&column.id)
                .map(|task| ChatTask {
                    id: task.id.clone(),
                    title: task.title.clone(),
                    description: task.description.clone(),
                    date: task.date.clone(),
                    labels: task.labels.clone(),
                    checklist: ChecklistCounts::top_level(&task.checklist),
                    created_at: task.created_at,
                })
                .collect(),
        })
        .collect();

    ChatContext {
        dashboard_name,
        columns,
    }
}

use serde::{Deserialize, Serialize};

/// Reserved dashboard id. Always present, never deletable.
pub const DEFAULT_DASHBOARD_ID: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub title: String,
}

/// A checklist node. Only groups carry children; nesting depth is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChecklistItem {
    Item {
        id: String,
        #[serde(default)]
        text: String,
        #[serde(default)]
        completed: bool,
    },
    Group {
        id: String,
        #[serde(default)]
        text: String,
        #[serde(default)]
        completed: bool,
        #[serde(default)]
        items: Vec<ChecklistItem>,
    },
}

impl ChecklistItem {
    pub fn item(id: impl Into<String>, text: impl Into<String>, completed: bool) -> Self {
        Self::Item {
            id: id.into(),
            text: text.into(),
            completed,
        }
    }

    pub fn group(id: impl Into<String>, text: impl Into<String>, items: Vec<ChecklistItem>) -> Self {
        Self::Group {
            id: id.into(),
            text: text.into(),
            completed: false,
            items,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Item { id, .. } | Self::Group { id, .. } => id,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Item { text, .. } | Self::Group { text, .. } => text,
        }
    }

    pub fn is_completed(&self) -> bool {
        match self {
            Self::Item { completed, .. } | Self::Group { completed, .. } => *completed,
        }
    }

    /// Children of a group; items have none.
    pub fn children(&self) -> &[ChecklistItem] {
        match self {
            Self::Item { .. } => &[],
            Self::Group { items, .. } => items,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub column_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub labels: Vec<String>,
    /// Milliseconds since the Unix epoch, fixed at creation.
    #[serde(default)]
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Opaque media reference: an embedded image payload or a video embed URL.
    /// Empty when the task has no media.
    #[serde(default)]
    pub media_url: String,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
}

/// Caller-supplied fields for a new task. The engine assigns id, column and
/// creation time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub labels: Vec<String>,
    pub date: Option<String>,
    pub media_url: Option<String>,
    pub checklist: Option<Vec<ChecklistItem>>,
}

impl TaskDraft {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial update for an existing task. `id` and `columnId` are not part of
/// the payload; a serialized update carrying them has those keys ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub labels: Option<Vec<String>>,
    /// Explicit caller override; the engine never reassigns creation time.
    pub created_at: Option<i64>,
    /// `Some(None)` clears the date.
    #[serde(with = "double_option", skip_serializing_if = "Option::is_none")]
    pub date: Option<Option<String>>,
    pub media_url: Option<String>,
    pub checklist: Option<Vec<ChecklistItem>>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.labels.is_none()
            && self.created_at.is_none()
            && self.date.is_none()
            && self.media_url.is_none()
            && self.checklist.is_none()
    }
}

/// Distinguishes an absent key from an explicit `null`.
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Option<String>>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            None => s.serialize_none(),
            Some(inner) => inner.serialize(s),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Option<String>>, D::Error> {
        Option::<String>::deserialize(d).map(Some)
    }
}

/// Column, task and settings data belonging to one dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardData {
    #[serde(default)]
    pub columns: Vec<Column>,
    /// Flat task list spanning every column. Position is render order.
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Per-board external calendar link.
    #[serde(default, rename = "googleCalendarUrl")]
    pub external_calendar_link: String,
    #[serde(default)]
    pub weather_location: String,
}

impl BoardData {
    /// Empty board with seeded columns. Seed ids are the 1-based positions.
    pub fn seeded<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            columns: titles
                .into_iter()
                .enumerate()
                .map(|(idx, title)| Column {
                    id: (idx + 1).to_string(),
                    title: title.as_ref().to_string(),
                })
                .collect(),
            ..Self::default()
        }
    }

    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks of one column in board order.
    pub fn tasks_in_column<'a>(&'a self, column_id: &'a str) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.iter().filter(move |t| t.column_id == column_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatSender {
    User,
    #[serde(alias = "ai")]
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub sender: ChatSender,
    pub content: String,
    pub timestamp: i64,
}

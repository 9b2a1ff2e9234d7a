/// Board-level mutations.
///
/// Each operation edits one `BoardData` and reports whether anything changed.
/// Unknown ids are silent no-ops; nothing here returns an error.
use crate::types::{BoardData, Column, Task, TaskDraft, TaskUpdate};

impl BoardData {
    /// Append a column.
    pub fn add_column(&mut self, id: String, title: &str) {
        self.columns.push(Column {
            id,
            title: title.to_string(),
        });
    }

    pub fn update_column(&mut self, id: &str, title: &str) -> bool {
        match self.columns.iter_mut().find(|c| c.id == id) {
            Some(col) => {
                col.title = title.to_string();
                true
            }
            None => false,
        }
    }

    /// Remove a column and every task assigned to it.
    pub fn delete_column(&mut self, id: &str) -> bool {
        let columns_before = self.columns.len();
        let tasks_before = self.tasks.len();
        self.columns.retain(|c| c.id != id);
        self.tasks.retain(|t| t.column_id != id);
        self.columns.len() != columns_before || self.tasks.len() != tasks_before
    }

    /// Append a task built from `draft`. `column_id` is taken as given; a
    /// column that does not exist leaves the task dangling.
    pub fn add_task(&mut self, id: String, column_id: &str, draft: TaskDraft, created_at: i64) {
        let TaskDraft {
            title,
            description,
            labels,
            date,
            media_url,
            checklist,
        } = draft;
        self.tasks.push(Task {
            id,
            column_id: column_id.to_string(),
            title,
            description,
            labels,
            created_at,
            date: date.filter(|d| !d.is_empty()),
            media_url: media_url.unwrap_or_default(),
            checklist: checklist.unwrap_or_default(),
        });
    }

    /// Merge the fields present in `update` into the task. Id and column
    /// assignment are never touched.
    pub fn update_task(&mut self, id: &str, update: TaskUpdate) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        let before = task.clone();
        if let Some(title) = update.title {
            task.title = title;
        }
        if let Some(description) = update.description {
            task.description = description;
        }
        if let Some(labels) = update.labels {
            task.labels = labels;
        }
        if let Some(created_at) = update.created_at {
            task.created_at = created_at;
        }
        if let Some(date) = update.date {
            task.date = date;
        }
        if let Some(media_url) = update.media_url {
            task.media_url = media_url;
        }
        if let Some(checklist) = update.checklist {
            task.checklist = checklist;
        }
        *task != before
    }

    pub fn delete_task(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Reassign a task to another column, keeping its position in the list.
    pub fn move_task(&mut self, task_id: &str, to_column_id: &str) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task_id) {
            Some(task) if task.column_id != to_column_id => {
                task.column_id = to_column_id.to_string();
                true
            }
            _ => false,
        }
    }

    /// Move `active_id` to the list position currently held by `over_id`.
    ///
    /// Both tasks must exist and share a column. The splice runs on the flat
    /// list: remove the active task, then insert it at the target's
    /// pre-removal index.
    pub fn reorder_tasks(&mut self, active_id: &str, over_id: &str) -> bool {
        let Some(active_index) = self.tasks.iter().position(|t| t.id == active_id) else {
            return false;
        };
        let Some(over_index) = self.tasks.iter().position(|t| t.id == over_id) else {
            return false;
        };
        if active_index == over_index
            || self.tasks[active_index].column_id != self.tasks[over_index].column_id
        {
            return false;
        }

        let task = self.tasks.remove(active_index);
        self.tasks.insert(over_index, task);
        true
    }

    pub fn set_weather_location(&mut self, location: &str) -> bool {
        if self.weather_location == location {
            return false;
        }
        self.weather_location = location.to_string();
        true
    }

    pub fn set_external_calendar_link(&mut self, link: &str) -> bool {
        if self.external_calendar_link == link {
            return false;
        }
        self.external_calendar_link = link.to_string();
        true
    }
}

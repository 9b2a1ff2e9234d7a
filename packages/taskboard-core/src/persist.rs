/// Versioned JSON blob holding the registry and the persisted UI state.
///
/// Shape: `{"version": 1, "state": {"boards": {...}, "dashboardNames": {...},
/// "selectedDashboard": "...", "darkMode": true, "searchQuery": "",
/// "tagSearch": "", "chatMessages": [...]}}`. Missing fields fall back to
/// defaults on load. The standalone calendar link is not part of the blob.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::storage::StoreError;
use crate::types::{BoardData, ChatMessage, DEFAULT_DASHBOARD_ID};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("Failed to serialize state: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to parse persisted state: {0}")]
    Deserialize(#[source] serde_json::Error),

    #[error("Unsupported state version {found} (newest known: {})", SCHEMA_VERSION)]
    UnsupportedVersion { found: u32 },

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub boards: BTreeMap<String, BoardData>,
    #[serde(default)]
    pub dashboard_names: BTreeMap<String, String>,
    #[serde(default = "default_selected")]
    pub selected_dashboard: String,
    #[serde(default = "default_dark_mode")]
    pub dark_mode: bool,
    #[serde(default)]
    pub search_query: String,
    #[serde(default)]
    pub tag_search: String,
    #[serde(default)]
    pub chat_messages: Vec<ChatMessage>,
}

fn default_selected() -> String {
    DEFAULT_DASHBOARD_ID.to_string()
}

fn default_dark_mode() -> bool {
    true
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    state: &'a PersistedState,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    version: u32,
    state: PersistedState,
}

pub fn encode(state: &PersistedState) -> Result<Vec<u8>, PersistError> {
    serde_json::to_vec(&EnvelopeRef {
        version: SCHEMA_VERSION,
        state,
    })
    .map_err(PersistError::Serialize)
}

/// Parse a blob. Older versions load with field defaulting; newer ones are
/// rejected.
pub fn decode(bytes: &[u8]) -> Result<PersistedState, PersistError> {
    let envelope: Envelope = serde_json::from_slice(bytes).map_err(PersistError::Deserialize)?;
    if envelope.version > SCHEMA_VERSION {
        return Err(PersistError::UnsupportedVersion {
            found: envelope.version,
        });
    }
    Ok(envelope.state)
}

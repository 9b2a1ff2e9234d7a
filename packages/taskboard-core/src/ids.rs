/// Identifier allocation for columns, tasks, dashboards and chat messages.
///
/// Ids are opaque: callers compare them for equality and never parse them.
use std::sync::atomic::{AtomicU64, Ordering};

use sha2::{Digest, Sha256};

pub trait IdSource: Send + Sync {
    /// Return an id never handed out before by this source.
    fn new_id(&self) -> String;
}

/// 10 hex chars hashed from a counter and a nanosecond timestamp, followed by
/// the counter in hex. The fixed-width prefix plus the counter suffix makes ids
/// unique within the process; the timestamp keeps ids from different runs apart.
#[derive(Debug, Default)]
pub struct HashIdSource {
    counter: AtomicU64,
}

impl HashIdSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for HashIdSource {
    fn new_id(&self) -> String {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let mut hasher = Sha256::new();
        hasher.update(seq.to_le_bytes());
        hasher.update(ts.to_le_bytes());
        let hash = hasher.finalize();
        format!("{}{:x}", hex::encode(&hash[..5]), seq)
    }
}

/// Deterministic ids (`prefix-1`, `prefix-2`, ...), for tests and fixtures.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdSource for SequentialIds {
    fn new_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}

//! In-memory relay state: poll cursor and last-seen markers.
//!
//! Markers are never evicted: one entry stays per submission seen since the
//! process started. A user has a handful of submissions, so the map stays
//! small for the life of the process and is dropped on restart.

use std::collections::HashMap;

use serde_json::Value;

/// Gets current Unix timestamp in seconds.
pub(crate) fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}

/// State carried between polling cycles. Lost on restart.
#[derive(Debug, Clone, Default)]
pub struct RelayState {
    /// `from_date` sent with the next request.
    poll_cursor: i64,

    /// Last processed `date_updated`, keyed per submission.
    last_seen: HashMap<String, Value>,
}

impl RelayState {
    /// Creates state whose cursor starts at `poll_cursor`.
    #[must_use]
    pub fn new(poll_cursor: i64) -> Self {
        Self {
            poll_cursor,
            last_seen: HashMap::new(),
        }
    }

    /// Creates state whose cursor starts at the current time.
    #[must_use]
    pub fn starting_now() -> Self {
        Self::new(now_unix())
    }

    /// Lower bound for the next request.
    #[must_use]
    pub const fn poll_cursor(&self) -> i64 {
        self.poll_cursor
    }

    /// Moves the cursor forward to `now`. Never moves it backwards.
    pub fn advance_cursor(&mut self, now: i64) {
        self.poll_cursor = self.poll_cursor.max(now);
    }

    /// Records the update time of `homework`.
    ///
    /// Returns `true` if it differs from the last one seen for the same
    /// submission (or the submission is new), `false` if it is a repeat.
    pub fn record_update(&mut self, homework: &Value) -> bool {
        let updated = homework.get("date_updated").cloned().unwrap_or(Value::Null);
        let key = submission_key(homework);

        if self.last_seen.get(&key) == Some(&updated) {
            return false;
        }
        self.last_seen.insert(key, updated);
        true
    }

    /// Number of submissions with a recorded marker.
    #[must_use]
    pub fn tracked(&self) -> usize {
        self.last_seen.len()
    }
}

/// Identity of a submission: its `id` when present, else its name.
fn submission_key(homework: &Value) -> String {
    match homework.get("id") {
        Some(Value::String(id)) => format!("id:{id}"),
        Some(Value::Number(id)) => format!("id:{id}"),
        _ => {
            let name = homework
                .get("homework_name")
                .and_then(Value::as_str)
                .unwrap_or_default();
            format!("name:{name}")
        }
    }
}

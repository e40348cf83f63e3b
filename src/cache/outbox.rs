use crate::ballot::BallotSubmission;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// OutboxSeq orders outbox entries. It only ever increases for one cache.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OutboxSeq(u64);

impl OutboxSeq {
    pub fn new(seq: u64) -> Self {
        OutboxSeq(seq)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OutboxSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncState {
    Pending,
    Synced,
    SkippedPermanent { reason: String },
}

impl SyncState {
    /// Settled entries are never replayed again.
    pub fn is_settled(&self) -> bool {
        !matches!(self, SyncState::Pending)
    }
}

/// OutboxEntry is one local submission attempt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutboxEntry {
    pub seq: OutboxSeq,
    pub submission: BallotSubmission,
    pub submitted_at: DateTime<Utc>,
    pub state: SyncState,
    #[serde(default)]
    pub note: Option<String>,
}

use crate::ballot::{BallotSubmission, Candidate, ElectionStatus, VoterProfile};
use crate::cache::{CacheError, KeyValueStore, OutboxEntry, OutboxSeq, SyncState};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, Mutex};

const VOTERS_KEY: &str = "voters";
const CANDIDATES_KEY: &str = "candidates";
const ELECTION_STATUS_KEY: &str = "election_status";
const OUTBOX_KEY: &str = "outbox";
const OUTBOX_NEXT_SEQ_KEY: &str = "outbox_next_seq";

/// LocalCache is the typed view over the client's key-value store: cached server data plus the
/// vote outbox.
pub struct LocalCache {
    logger: slog::Logger,
    store: Arc<dyn KeyValueStore>,
    outbox_capacity: usize,
    // Held across every read-modify-write of the outbox.
    outbox_lock: Mutex<()>,
}

impl LocalCache {
    pub fn new(logger: slog::Logger, store: Arc<dyn KeyValueStore>, outbox_capacity: usize) -> Self {
        LocalCache {
            logger,
            store,
            outbox_capacity: outbox_capacity.max(1),
            outbox_lock: Mutex::new(()),
        }
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| CacheError::corrupt(key, e)),
            None => Ok(None),
        }
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value).map_err(|e| CacheError::corrupt(key, e))?;
        self.store.set(key, &raw)
    }

    pub fn voters(&self) -> Result<Vec<VoterProfile>, CacheError> {
        Ok(self.read(VOTERS_KEY)?.unwrap_or_default())
    }

    pub fn set_voters(&self, voters: &[VoterProfile]) -> Result<(), CacheError> {
        self.write(VOTERS_KEY, voters)
    }

    /// The cached candidate list, or the default roster when nothing was cached yet.
    pub fn candidates(&self) -> Result<Vec<Candidate>, CacheError> {
        Ok(self.read(CANDIDATES_KEY)?.unwrap_or_else(Candidate::default_roster))
    }

    pub fn set_candidates(&self, candidates: &[Candidate]) -> Result<(), CacheError> {
        self.write(CANDIDATES_KEY, candidates)
    }

    pub fn election_status(&self) -> Result<ElectionStatus, CacheError> {
        Ok(self.read(ELECTION_STATUS_KEY)?.unwrap_or_default())
    }

    pub fn set_election_status(&self, status: &ElectionStatus) -> Result<(), CacheError> {
        self.write(ELECTION_STATUS_KEY, status)
    }

    /// Outbox in insertion order.
    pub fn outbox(&self) -> Result<Vec<OutboxEntry>, CacheError> {
        let _guard = self.outbox_lock.lock().map_err(|_| CacheError::Poisoned)?;
        self.read_outbox()
    }

    fn read_outbox(&self) -> Result<Vec<OutboxEntry>, CacheError> {
        Ok(self.read(OUTBOX_KEY)?.unwrap_or_default())
    }

    /// Appends a new entry, evicting old ones past capacity.
    pub fn append_outbox(
        &self,
        submission: BallotSubmission,
        state: SyncState,
        note: Option<String>,
        submitted_at: DateTime<Utc>,
    ) -> Result<OutboxEntry, CacheError> {
        let _guard = self.outbox_lock.lock().map_err(|_| CacheError::Poisoned)?;

        let next_seq: u64 = self.read(OUTBOX_NEXT_SEQ_KEY)?.unwrap_or(1);
        let entry = OutboxEntry {
            seq: OutboxSeq::new(next_seq),
            submission,
            submitted_at,
            state,
            note,
        };

        let mut outbox = self.read_outbox()?;
        outbox.push(entry.clone());
        self.evict_over_capacity(&mut outbox);

        // Sequence first: a crash in between leaves a gap, never a reused seq.
        self.write(OUTBOX_NEXT_SEQ_KEY, &(next_seq + 1))?;
        self.write(OUTBOX_KEY, &outbox)?;

        Ok(entry)
    }

    /// Moves an entry to a new state. Returns false when the entry is gone (evicted).
    pub fn update_outbox_entry(
        &self,
        seq: OutboxSeq,
        state: SyncState,
        note: Option<String>,
    ) -> Result<bool, CacheError> {
        let _guard = self.outbox_lock.lock().map_err(|_| CacheError::Poisoned)?;

        let mut outbox = self.read_outbox()?;
        let entry = match outbox.iter_mut().find(|e| e.seq == seq) {
            Some(entry) => entry,
            None => return Ok(false),
        };
        entry.state = state;
        entry.note = note;

        self.write(OUTBOX_KEY, &outbox)?;
        Ok(true)
    }

    // Settled entries go first, oldest first. Pending entries are only dropped when nothing
    // settled is left.
    fn evict_over_capacity(&self, outbox: &mut Vec<OutboxEntry>) {
        while outbox.len() > self.outbox_capacity {
            let victim = outbox
                .iter()
                .position(|e| e.state.is_settled())
                .unwrap_or(0);
            let evicted = outbox.remove(victim);
            if !evicted.state.is_settled() {
                slog::warn!(
                    self.logger,
                    "Outbox full. Dropped pending entry {} of voter {}",
                    evicted.seq,
                    evicted.submission.voter_id
                );
            }
        }
    }
}

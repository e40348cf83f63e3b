use crate::ballot::{SubmitBallotInput, VoterId};
use crate::cache::{CacheError, LocalCache, OutboxEntry, SyncState};
use crate::client::remote_gateway::{RemoteGateway, RemoteOutcome};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

const VOTER_NOT_FOUND: &str = "voter not found";

/// ReplayReport summarizes one pass over the outbox.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub synced: usize,
    pub skipped: usize,
    pub still_pending: usize,
}

enum EntryOutcome {
    Synced,
    Skipped,
    // Left Pending. `transport` ends the pass, the server can't be reached anymore.
    Deferred { transport: bool },
}

/// OutboxReplayer re-applies Pending outbox entries against the server, oldest first.
pub(super) struct OutboxReplayer {
    logger: slog::Logger,
    gateway: Arc<RemoteGateway>,
    cache: Arc<LocalCache>,
    // One pass at a time.
    pass_lock: Mutex<()>,
}

impl OutboxReplayer {
    pub(super) fn new(logger: slog::Logger, gateway: Arc<RemoteGateway>, cache: Arc<LocalCache>) -> Self {
        OutboxReplayer {
            logger,
            gateway,
            cache,
            pass_lock: Mutex::new(()),
        }
    }

    /// Processes every Pending entry at most once. Settled entries are never looked at again, so
    /// an interrupted pass simply resumes on the next call.
    pub(super) async fn replay(&self) -> Result<ReplayReport, CacheError> {
        let _pass = self.pass_lock.lock().await;

        let pending: Vec<OutboxEntry> = self
            .cache
            .outbox()?
            .into_iter()
            .filter(|e| !e.state.is_settled())
            .collect();
        if pending.is_empty() {
            return Ok(ReplayReport::default());
        }
        slog::info!(self.logger, "Replaying {} pending outbox entries", pending.len());

        let mut report = ReplayReport::default();
        // Voters with an entry left Pending in this pass. Their later entries wait too, or a later
        // submission could land before an earlier one.
        let mut held_back: HashSet<VoterId> = HashSet::new();
        let mut transport_down = false;

        for entry in pending {
            if transport_down || held_back.contains(&entry.submission.voter_id) {
                report.still_pending += 1;
                continue;
            }

            match self.replay_entry(&entry).await? {
                EntryOutcome::Synced => report.synced += 1,
                EntryOutcome::Skipped => report.skipped += 1,
                EntryOutcome::Deferred { transport } => {
                    report.still_pending += 1;
                    transport_down = transport;
                    held_back.insert(entry.submission.voter_id.clone());
                }
            }
        }

        slog::info!(
            self.logger,
            "Replay pass done: {} synced, {} skipped, {} still pending",
            report.synced,
            report.skipped,
            report.still_pending
        );
        Ok(report)
    }

    async fn replay_entry(&self, entry: &OutboxEntry) -> Result<EntryOutcome, CacheError> {
        let logger = self.logger.new(slog::o!(
            "Entry" => entry.seq.to_string(),
            "Voter" => entry.submission.voter_id.to_string(),
        ));

        let voter_id = entry.submission.voter_id.clone();
        let exists = self
            .gateway
            .call("voter_exists", move |api| async move { api.voter_exists(&voter_id).await })
            .await;
        match exists {
            RemoteOutcome::Done(true) => {}
            RemoteOutcome::Done(false) => {
                slog::warn!(logger, "Voter no longer exists, skipping entry for good");
                let skipped = SyncState::SkippedPermanent {
                    reason: VOTER_NOT_FOUND.to_string(),
                };
                self.record(entry, skipped, None)?;
                return Ok(EntryOutcome::Skipped);
            }
            RemoteOutcome::Failed(e) => {
                return self.defer(entry, e.to_string(), e.is_transport());
            }
            RemoteOutcome::Offline => {
                return self.defer(entry, "offline".to_string(), true);
            }
        }

        let input = SubmitBallotInput::from(entry.submission.clone());
        let submitted = self
            .gateway
            .call("submit_ballot", move |api| async move { api.submit_ballot(input).await })
            .await;
        match submitted {
            RemoteOutcome::Done(output) => {
                slog::info!(logger, "Replayed. Inserted {}, deleted {}", output.inserted, output.deleted);
                self.record(entry, SyncState::Synced, None)?;
                Ok(EntryOutcome::Synced)
            }
            RemoteOutcome::Failed(e) if e.is_permanent() => {
                slog::warn!(logger, "Server refused replayed entry for good: {}", e);
                self.record(entry, SyncState::SkippedPermanent { reason: e.to_string() }, None)?;
                Ok(EntryOutcome::Skipped)
            }
            RemoteOutcome::Failed(e) => self.defer(entry, e.to_string(), e.is_transport()),
            RemoteOutcome::Offline => self.defer(entry, "offline".to_string(), true),
        }
    }

    fn record(&self, entry: &OutboxEntry, state: SyncState, note: Option<String>) -> Result<(), CacheError> {
        if !self.cache.update_outbox_entry(entry.seq, state, note)? {
            slog::warn!(self.logger, "Outbox entry {} was evicted during replay", entry.seq);
        }

        Ok(())
    }

    fn defer(&self, entry: &OutboxEntry, note: String, transport: bool) -> Result<EntryOutcome, CacheError> {
        self.record(entry, SyncState::Pending, Some(note))?;
        Ok(EntryOutcome::Deferred { transport })
    }
}

use crate::ballot::{
    Ballot, BallotError, BallotSubmission, Candidate, ElectionStatus, SubmitBallotInput, SubmitBallotOutput, VoterId,
    VoterProfile,
};
use crate::cache::{CacheError, LocalCache, OutboxEntry, OutboxSeq, SyncState};
use crate::client::in_flight::InFlightVoters;
use crate::client::local_aggregation;
use crate::client::remote_gateway::{RemoteGateway, RemoteOutcome};
use crate::client::replay::{OutboxReplayer, ReplayReport};
use crate::connectivity::{Connectivity, ConnectivityListener, NetworkSignal};
use crate::remote::RemoteError;
use crate::tally::{CandidateTally, ElectionStatistics};
use chrono::Utc;
use std::convert::TryFrom;
use std::sync::Arc;

/// SubmitReceipt tells the caller where its submission ended up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub entry: OutboxSeq,
    pub delivery: Delivery,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delivery {
    /// The server committed the ballot.
    Synced { inserted: u32, deleted: u32 },
    /// Stored locally as Pending. `note` says why it wasn't sent.
    Queued { note: String },
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitBallotError {
    /// Refused for good, locally or by the server. Resubmitting the same input won't help.
    #[error(transparent)]
    Rejected(BallotError),

    #[error("a submission for voter '{0}' is already being processed")]
    InFlight(VoterId),

    #[error("local cache failure")]
    Cache(CacheError),
}

// ------- Conversions --------

impl From<BallotError> for SubmitBallotError {
    fn from(e: BallotError) -> Self {
        SubmitBallotError::Rejected(e)
    }
}

impl From<CacheError> for SubmitBallotError {
    fn from(e: CacheError) -> Self {
        SubmitBallotError::Cache(e)
    }
}

const OFFLINE_NOTE: &str = "offline";
const QUEUED_BEHIND_NOTE: &str = "queued behind an earlier pending submission";

/// SyncClient lets voters submit ballots and read results whether or not the server is reachable.
///
/// Every remote-capable operation goes through `RemoteGateway`: online it asks the server, and on
/// any failure (or while offline) it answers from the local cache instead. Submissions always land
/// in the outbox, either mirrored as Synced or queued as Pending for replay.
pub struct SyncClient {
    logger: slog::Logger,
    gateway: Arc<RemoteGateway>,
    cache: Arc<LocalCache>,
    replayer: OutboxReplayer,
    in_flight: InFlightVoters,
}

impl SyncClient {
    pub(super) fn new(logger: slog::Logger, gateway: Arc<RemoteGateway>, cache: Arc<LocalCache>) -> Self {
        let replayer = OutboxReplayer::new(logger.clone(), gateway.clone(), cache.clone());

        SyncClient {
            logger,
            gateway,
            cache,
            replayer,
            in_flight: InFlightVoters::default(),
        }
    }

    pub fn is_online(&self) -> bool {
        self.gateway.monitor().is_online()
    }

    pub fn connectivity(&self) -> Connectivity {
        self.gateway.monitor().state()
    }

    pub fn subscribe_connectivity(&self) -> ConnectivityListener {
        self.gateway.monitor().subscribe()
    }

    /// Forces a probe now instead of waiting for the probe timer.
    pub async fn probe(&self) -> Connectivity {
        self.gateway.monitor().probe().await
    }

    pub async fn handle_network_signal(&self, signal: NetworkSignal) -> Connectivity {
        self.gateway.monitor().handle_network_signal(signal).await
    }

    /// Submits a ballot for one category, replacing the voter's earlier ballot in that category.
    ///
    /// Only invalid or forbidden input, a permanent server rejection, a concurrent submission for
    /// the same voter, or a broken local cache surface as errors. Connectivity problems never do:
    /// the submission is queued and replayed later.
    pub async fn submit_ballot(&self, input: SubmitBallotInput) -> Result<SubmitReceipt, SubmitBallotError> {
        let submission = BallotSubmission::try_from(input)?;
        if let Err(e) = submission.ensure_voter_permitted() {
            slog::warn!(
                self.logger,
                "Security: reserved placeholder id '{}' attempted to vote",
                submission.voter_id
            );
            return Err(e.into());
        }

        let _in_flight = self
            .in_flight
            .try_acquire(&submission.voter_id)
            .ok_or_else(|| SubmitBallotError::InFlight(submission.voter_id.clone()))?;

        // Earlier Pending entries of this voter must reach the server first.
        if self.is_online() && self.has_pending(&submission.voter_id)? {
            self.replay_outbox().await?;
            if self.has_pending(&submission.voter_id)? {
                return self.queue(submission, QUEUED_BEHIND_NOTE.to_string());
            }
        }

        let input = SubmitBallotInput::from(submission.clone());
        let outcome = self
            .gateway
            .call("submit_ballot", move |api| async move { api.submit_ballot(input).await })
            .await;

        match outcome {
            RemoteOutcome::Done(output) => self.mirror_synced(submission, output),
            RemoteOutcome::Failed(RemoteError::Rejected(rejection)) if rejection.is_permanent() => {
                let reason = rejection.to_string();
                self.cache.append_outbox(
                    submission,
                    SyncState::SkippedPermanent { reason: reason.clone() },
                    Some(reason),
                    Utc::now(),
                )?;
                Err(SubmitBallotError::Rejected(rejection))
            }
            RemoteOutcome::Failed(e) => {
                slog::warn!(self.logger, "Submission queued after remote failure: {}", e);
                self.queue(submission, e.to_string())
            }
            RemoteOutcome::Offline => self.queue(submission, OFFLINE_NOTE.to_string()),
        }
    }

    fn mirror_synced(
        &self,
        submission: BallotSubmission,
        output: SubmitBallotOutput,
    ) -> Result<SubmitReceipt, SubmitBallotError> {
        let entry = self
            .cache
            .append_outbox(submission, SyncState::Synced, None, Utc::now())
            .map_err(|e| {
                slog::error!(self.logger, "Ballot committed remotely but the local mirror failed: {}", e);
                e
            })?;

        Ok(SubmitReceipt {
            entry: entry.seq,
            delivery: Delivery::Synced {
                inserted: output.inserted,
                deleted: output.deleted,
            },
        })
    }

    fn queue(&self, submission: BallotSubmission, note: String) -> Result<SubmitReceipt, SubmitBallotError> {
        let entry = self
            .cache
            .append_outbox(submission, SyncState::Pending, Some(note.clone()), Utc::now())?;
        slog::info!(self.logger, "Queued outbox entry {} ({})", entry.seq, note);

        Ok(SubmitReceipt {
            entry: entry.seq,
            delivery: Delivery::Queued { note },
        })
    }

    fn has_pending(&self, voter_id: &VoterId) -> Result<bool, CacheError> {
        Ok(self
            .cache
            .outbox()?
            .iter()
            .any(|e| &e.submission.voter_id == voter_id && !e.state.is_settled()))
    }

    /// Replays Pending outbox entries against the server. Runs automatically on every transition
    /// to Online, and may be called at any time.
    pub async fn replay_outbox(&self) -> Result<ReplayReport, CacheError> {
        self.replayer.replay().await
    }

    pub fn outbox(&self) -> Result<Vec<OutboxEntry>, CacheError> {
        self.cache.outbox()
    }

    /// Server results when reachable, otherwise the same table rebuilt from the outbox.
    pub async fn get_results(&self) -> Result<Vec<CandidateTally>, CacheError> {
        let outcome = self
            .gateway
            .call("get_results", |api| async move { api.get_results().await })
            .await;

        match outcome {
            RemoteOutcome::Done(results) => Ok(results),
            RemoteOutcome::Failed(_) | RemoteOutcome::Offline => {
                let candidates = self.cache.candidates()?;
                let outbox = self.cache.outbox()?;
                Ok(local_aggregation::local_results(&candidates, &outbox))
            }
        }
    }

    pub async fn get_statistics(&self) -> Result<ElectionStatistics, CacheError> {
        let outcome = self
            .gateway
            .call("get_statistics", |api| async move { api.get_statistics().await })
            .await;

        match outcome {
            RemoteOutcome::Done(statistics) => Ok(statistics),
            RemoteOutcome::Failed(_) | RemoteOutcome::Offline => {
                let voters = self.cache.voters()?;
                let outbox = self.cache.outbox()?;
                Ok(local_aggregation::local_statistics(&voters, &outbox))
            }
        }
    }

    /// The ballots the server holds for `voter_id`. Offline, the ballots the outbox will leave
    /// behind once replayed: the voter's latest Pending or Synced entry per category.
    pub async fn get_voter_ballots(&self, voter_id: &VoterId) -> Result<Vec<Ballot>, CacheError> {
        let remote_voter_id = voter_id.clone();
        let outcome = self
            .gateway
            .call("get_voter_ballots", move |api| async move {
                api.get_voter_ballots(&remote_voter_id).await
            })
            .await;

        match outcome {
            RemoteOutcome::Done(ballots) => Ok(ballots),
            RemoteOutcome::Failed(_) | RemoteOutcome::Offline => {
                let outbox = self.cache.outbox()?;
                Ok(local_aggregation::local_voter_ballots(voter_id, &outbox))
            }
        }
    }

    pub async fn get_voters(&self) -> Result<Vec<VoterProfile>, CacheError> {
        let outcome = self
            .gateway
            .call("get_voters", |api| async move { api.get_voters().await })
            .await;

        match outcome {
            RemoteOutcome::Done(voters) => {
                self.keep_cached("voters", self.cache.set_voters(&voters));
                Ok(voters)
            }
            RemoteOutcome::Failed(_) | RemoteOutcome::Offline => self.cache.voters(),
        }
    }

    pub async fn get_candidates(&self) -> Result<Vec<Candidate>, CacheError> {
        let outcome = self
            .gateway
            .call("get_candidates", |api| async move { api.get_candidates().await })
            .await;

        match outcome {
            RemoteOutcome::Done(candidates) => {
                self.keep_cached("candidates", self.cache.set_candidates(&candidates));
                Ok(candidates)
            }
            RemoteOutcome::Failed(_) | RemoteOutcome::Offline => self.cache.candidates(),
        }
    }

    pub async fn get_election_status(&self) -> Result<ElectionStatus, CacheError> {
        let outcome = self
            .gateway
            .call("get_election_status", |api| async move { api.get_election_status().await })
            .await;

        match outcome {
            RemoteOutcome::Done(status) => {
                self.keep_cached("election_status", self.cache.set_election_status(&status));
                Ok(status)
            }
            RemoteOutcome::Failed(_) | RemoteOutcome::Offline => self.cache.election_status(),
        }
    }

    /// Pulls voters, candidates and election status into the cache. Returns false when any of
    /// them had to be served from the cache instead.
    pub async fn refresh_cache(&self) -> Result<bool, CacheError> {
        let was_online = self.is_online();
        self.get_voters().await?;
        self.get_candidates().await?;
        self.get_election_status().await?;

        Ok(was_online && self.is_online())
    }

    // A remote answer is still good when caching it failed.
    fn keep_cached(&self, what: &str, result: Result<(), CacheError>) {
        if let Err(e) = result {
            slog::warn!(self.logger, "Could not cache {}: {}", what, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ballot::{BallotPair, Category, VotingStatus};
    use crate::cache::InMemoryKeyValueStore;
    use crate::connectivity::ConnectivityMonitor;
    use crate::remote::ElectionApi;
    use crate::store::ElectionStore;
    use crate::tally;
    use crate::test_utils::{discard_logger, voter, ToggleableApi};
    use tokio::time::Duration;

    fn create_client(api: &Arc<ToggleableApi>, call_timeout: Duration) -> SyncClient {
        let remote: Arc<dyn ElectionApi> = api.clone();
        let monitor = Arc::new(ConnectivityMonitor::new(discard_logger(), remote.clone(), call_timeout));
        let gateway = Arc::new(RemoteGateway::new(discard_logger(), remote, monitor, call_timeout));
        let cache = Arc::new(LocalCache::new(
            discard_logger(),
            Arc::new(InMemoryKeyValueStore::new()),
            100,
        ));

        SyncClient::new(discard_logger(), gateway, cache)
    }

    async fn online_client(api: &Arc<ToggleableApi>) -> SyncClient {
        let client = create_client(api, Duration::from_secs(1));
        assert_eq!(client.probe().await, Connectivity::Online);
        client
    }

    fn stored(api: &ToggleableApi, voter_id: &str, category: Category) -> Vec<(String, u32)> {
        let mut rows: Vec<(String, u32)> = api
            .store()
            .ballots()
            .unwrap()
            .into_iter()
            .filter(|b| b.voter_id.as_str() == voter_id && b.category == category)
            .map(|b| (b.candidate_id.into_inner(), b.weight))
            .collect();
        rows.sort();
        rows
    }

    fn states(client: &SyncClient) -> Vec<SyncState> {
        client.outbox().unwrap().into_iter().map(|e| e.state).collect()
    }

    fn row(candidate: &str, weight: u32) -> (String, u32) {
        (candidate.to_string(), weight)
    }

    #[tokio::test]
    async fn online_submission_is_stored_and_mirrored() {
        let api = ToggleableApi::new(vec![voter("V1", 20)]);
        let client = online_client(&api).await;

        let receipt = client
            .submit_ballot(SubmitBallotInput::new(
                "V1",
                "presiden",
                &[("presiden1", 5), ("presiden2", 15)],
            ))
            .await
            .unwrap();

        assert_eq!(
            receipt.delivery,
            Delivery::Synced {
                inserted: 2,
                deleted: 0
            }
        );
        assert_eq!(
            stored(&api, "V1", Category::Presiden),
            vec![row("presiden1", 5), row("presiden2", 15)]
        );
        let v1 = api.store().voter(&VoterId::new("V1")).unwrap().unwrap();
        assert_eq!(v1.status, VotingStatus::Voted);
        assert_eq!(states(&client), vec![SyncState::Synced]);
    }

    #[tokio::test]
    async fn resubmission_replaces_the_category() {
        let api = ToggleableApi::new(vec![voter("V1", 20)]);
        let client = online_client(&api).await;
        client
            .submit_ballot(SubmitBallotInput::new(
                "V1",
                "presiden",
                &[("presiden1", 5), ("presiden2", 15)],
            ))
            .await
            .unwrap();

        let receipt = client
            .submit_ballot(SubmitBallotInput::new("V1", "presiden", &[("presiden1", 20)]))
            .await
            .unwrap();

        assert_eq!(
            receipt.delivery,
            Delivery::Synced {
                inserted: 1,
                deleted: 2
            }
        );
        assert_eq!(stored(&api, "V1", Category::Presiden), vec![row("presiden1", 20)]);
    }

    #[tokio::test]
    async fn all_zero_weights_never_leave_the_client() {
        let api = ToggleableApi::new(vec![voter("V1", 20)]);
        let client = online_client(&api).await;

        let result = client
            .submit_ballot(SubmitBallotInput::new("V1", "pm", &[("pm1", 0), ("pm2", 0)]))
            .await;

        assert!(matches!(
            result,
            Err(SubmitBallotError::Rejected(BallotError::InvalidInput(_)))
        ));
        assert_eq!(api.submit_calls(), 0);
        assert!(client.outbox().unwrap().is_empty());
        assert!(api.store().ballots().unwrap().is_empty());
    }

    #[tokio::test]
    async fn reserved_ids_are_forbidden_online_and_offline() {
        let api = ToggleableApi::new(vec![voter("user_482", 20)]);
        let online = online_client(&api).await;
        let offline = create_client(&api, Duration::from_secs(1));
        assert!(!offline.is_online());

        for client in &[&online, &offline] {
            let result = client
                .submit_ballot(SubmitBallotInput::new("user_482", "pm", &[("pm1", 3)]))
                .await;

            assert!(matches!(
                result,
                Err(SubmitBallotError::Rejected(BallotError::Forbidden(_)))
            ));
            assert!(client.outbox().unwrap().is_empty());
        }
        assert_eq!(api.submit_calls(), 0);
    }

    #[tokio::test]
    async fn offline_submission_is_replayed_exactly_once() {
        let api = ToggleableApi::new(vec![voter("V2", 20)]);
        let client = create_client(&api, Duration::from_secs(1));

        let receipt = client
            .submit_ballot(SubmitBallotInput::new("V2", "parlemen", &[("parlemen3", 12)]))
            .await
            .unwrap();
        assert_eq!(
            receipt.delivery,
            Delivery::Queued {
                note: OFFLINE_NOTE.to_string()
            }
        );
        assert_eq!(api.submit_calls(), 0);
        assert_eq!(states(&client), vec![SyncState::Pending]);

        assert_eq!(client.probe().await, Connectivity::Online);
        let report = client.replay_outbox().await.unwrap();

        assert_eq!(
            report,
            ReplayReport {
                synced: 1,
                skipped: 0,
                still_pending: 0
            }
        );
        assert_eq!(states(&client), vec![SyncState::Synced]);
        assert_eq!(stored(&api, "V2", Category::Parlemen), vec![row("parlemen3", 12)]);

        // Synced entries are never looked at again.
        assert_eq!(client.replay_outbox().await.unwrap(), ReplayReport::default());
        assert_eq!(api.submit_calls(), 1);
    }

    #[tokio::test]
    async fn replay_applies_the_later_submission_last() {
        let api = ToggleableApi::new(vec![voter("V1", 20)]);
        let client = create_client(&api, Duration::from_secs(1));
        client
            .submit_ballot(SubmitBallotInput::new(
                "V1",
                "presiden",
                &[("presiden1", 5), ("presiden2", 15)],
            ))
            .await
            .unwrap();
        client
            .submit_ballot(SubmitBallotInput::new("V1", "presiden", &[("presiden2", 7)]))
            .await
            .unwrap();

        client.probe().await;
        let report = client.replay_outbox().await.unwrap();

        assert_eq!(report.synced, 2);
        assert_eq!(stored(&api, "V1", Category::Presiden), vec![row("presiden2", 7)]);
    }

    #[tokio::test]
    async fn replay_skips_entries_that_can_never_succeed() {
        let api = ToggleableApi::new(vec![voter("user_482", 20), voter("V1", 20)]);
        let client = online_client(&api).await;
        let queued = |voter_id: &str| BallotSubmission {
            voter_id: VoterId::new(voter_id),
            category: Category::Pm,
            pairs: vec![BallotPair::new("pm1", 4)],
        };
        // Entries written by an older client that did not check ids itself.
        for voter_id in &["user_482", "ghost", "V1"] {
            client
                .cache
                .append_outbox(queued(*voter_id), SyncState::Pending, None, Utc::now())
                .unwrap();
        }

        let report = client.replay_outbox().await.unwrap();

        assert_eq!(
            report,
            ReplayReport {
                synced: 1,
                skipped: 2,
                still_pending: 0
            }
        );
        let outbox = client.outbox().unwrap();
        match &outbox[0].state {
            SyncState::SkippedPermanent { reason } => assert!(reason.contains("reserved"), "{}", reason),
            other => panic!("Unexpected state {:?}", other),
        }
        assert_eq!(
            outbox[1].state,
            SyncState::SkippedPermanent {
                reason: "voter not found".to_string()
            }
        );
        assert_eq!(outbox[2].state, SyncState::Synced);

        let voter_checks = api.voter_exists_calls();
        client.replay_outbox().await.unwrap();
        assert_eq!(api.voter_exists_calls(), voter_checks);
    }

    #[tokio::test]
    async fn unreachable_server_queues_and_goes_offline() {
        let api = ToggleableApi::new(vec![voter("V1", 20)]);
        let client = online_client(&api).await;
        api.set_reachable(false);

        let receipt = client
            .submit_ballot(SubmitBallotInput::new("V1", "pm", &[("pm2", 8)]))
            .await
            .unwrap();

        match receipt.delivery {
            Delivery::Queued { note } => assert!(note.contains("unreachable"), "{}", note),
            other => panic!("Unexpected delivery {:?}", other),
        }
        assert_eq!(client.connectivity(), Connectivity::Offline);
        assert_eq!(states(&client), vec![SyncState::Pending]);
    }

    #[tokio::test]
    async fn timed_out_submission_is_queued() {
        let api = ToggleableApi::new(vec![voter("V1", 20)]);
        let client = create_client(&api, Duration::from_millis(50));
        assert_eq!(client.probe().await, Connectivity::Online);
        api.set_delay(Some(Duration::from_millis(500)));

        let receipt = client
            .submit_ballot(SubmitBallotInput::new("V1", "pm", &[("pm2", 8)]))
            .await
            .unwrap();

        assert!(matches!(receipt.delivery, Delivery::Queued { .. }));
        assert!(!client.is_online());
        assert_eq!(api.submit_calls(), 0);
    }

    #[tokio::test]
    async fn concurrent_submission_for_the_same_voter_is_refused() {
        let api = ToggleableApi::new(vec![voter("V1", 20)]);
        let client = online_client(&api).await;
        api.set_delay(Some(Duration::from_millis(100)));

        let (first, second) = tokio::join!(
            client.submit_ballot(SubmitBallotInput::new("V1", "pm", &[("pm1", 4)])),
            client.submit_ballot(SubmitBallotInput::new("V1", "pm", &[("pm2", 4)])),
        );

        assert!(matches!(first.unwrap().delivery, Delivery::Synced { .. }));
        assert!(matches!(second, Err(SubmitBallotError::InFlight(v)) if v == VoterId::new("V1")));
        assert_eq!(stored(&api, "V1", Category::Pm), vec![row("pm1", 4)]);
    }

    #[tokio::test]
    async fn permanent_server_rejection_is_surfaced_and_recorded() {
        let api = ToggleableApi::new(vec![voter("V1", 20)]);
        let client = online_client(&api).await;

        let result = client
            .submit_ballot(SubmitBallotInput::new("V1", "pm", &[("pm9", 4)]))
            .await;

        assert!(matches!(
            result,
            Err(SubmitBallotError::Rejected(BallotError::NotFound(_)))
        ));
        assert!(matches!(
            states(&client).as_slice(),
            [SyncState::SkippedPermanent { .. }]
        ));
        assert!(client.is_online());
    }

    #[tokio::test]
    async fn pending_entries_go_out_before_a_new_submission() {
        let api = ToggleableApi::new(vec![voter("V1", 20)]);
        let client = create_client(&api, Duration::from_secs(1));
        client
            .submit_ballot(SubmitBallotInput::new("V1", "presiden", &[("presiden1", 5)]))
            .await
            .unwrap();
        client.probe().await;

        let receipt = client
            .submit_ballot(SubmitBallotInput::new("V1", "presiden", &[("presiden2", 9)]))
            .await
            .unwrap();

        assert!(matches!(receipt.delivery, Delivery::Synced { deleted: 1, .. }));
        assert_eq!(stored(&api, "V1", Category::Presiden), vec![row("presiden2", 9)]);
        assert_eq!(states(&client), vec![SyncState::Synced, SyncState::Synced]);
    }

    #[tokio::test]
    async fn offline_reads_keep_the_online_shape() {
        let api = ToggleableApi::new(vec![voter("V1", 20), voter("V2", 20)]);
        let client = create_client(&api, Duration::from_secs(1));
        client
            .submit_ballot(SubmitBallotInput::new("V1", "pm", &[("pm1", 4)]))
            .await
            .unwrap();

        let offline = client.get_results().await.unwrap();
        let pm1 = offline.iter().find(|t| t.candidate_id.as_str() == "pm1").unwrap();
        assert_eq!(pm1.total_weight, 4);
        let statistics = client.get_statistics().await.unwrap();
        assert_eq!((statistics.total_voters, statistics.voted_voters), (1, 1));

        client.probe().await;
        client.replay_outbox().await.unwrap();
        let online = client.get_results().await.unwrap();

        assert_eq!(online, offline);
        let ids = |tallies: &[CandidateTally]| tallies.iter().map(|t| t.candidate_id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&online), ids(&tally::tally(&Candidate::default_roster(), Vec::new())));
        assert_eq!(client.get_statistics().await.unwrap(), ElectionStatistics::new(2, 1, 4));
    }

    #[tokio::test]
    async fn cached_reads_survive_losing_the_server() {
        let api = ToggleableApi::new(vec![voter("V1", 20), voter("V2", 20)]);
        let client = online_client(&api).await;
        assert!(client.refresh_cache().await.unwrap());

        api.set_reachable(false);
        let voters = client.get_voters().await.unwrap();

        assert_eq!(voters.len(), 2);
        assert!(!client.is_online());
        assert_eq!(client.get_candidates().await.unwrap(), Candidate::default_roster());
        assert!(!client.refresh_cache().await.unwrap());
    }

    #[tokio::test]
    async fn rejected_resubmission_leaves_offline_results_matching_the_server() {
        let api = ToggleableApi::new(vec![voter("V1", 20)]);
        let client = online_client(&api).await;
        client
            .submit_ballot(SubmitBallotInput::new("V1", "presiden", &[("presiden1", 5)]))
            .await
            .unwrap();
        let over_allotment = client
            .submit_ballot(SubmitBallotInput::new("V1", "presiden", &[("presiden1", 25)]))
            .await;
        assert!(matches!(
            over_allotment,
            Err(SubmitBallotError::Rejected(BallotError::InvalidInput(_)))
        ));
        let online = client.get_results().await.unwrap();

        api.set_reachable(false);
        client.probe().await;
        let offline = client.get_results().await.unwrap();

        assert_eq!(offline, online);
        let presiden1 = offline.iter().find(|t| t.candidate_id.as_str() == "presiden1").unwrap();
        assert_eq!(presiden1.total_weight, 5);
    }

    #[tokio::test]
    async fn voter_ballots_online_and_offline() {
        let api = ToggleableApi::new(vec![voter("V1", 20)]);
        let client = online_client(&api).await;
        client
            .submit_ballot(SubmitBallotInput::new("V1", "pm", &[("pm2", 6)]))
            .await
            .unwrap();

        let online = client.get_voter_ballots(&VoterId::new("V1")).await.unwrap();
        assert_eq!(online.len(), 1);
        assert_eq!((online[0].candidate_id.as_str(), online[0].weight), ("pm2", 6));

        api.set_reachable(false);
        client
            .submit_ballot(SubmitBallotInput::new("V1", "parlemen", &[("parlemen1", 4)]))
            .await
            .unwrap();
        assert!(!client.is_online());

        let offline = client.get_voter_ballots(&VoterId::new("V1")).await.unwrap();
        let rows: Vec<(Category, &str, u32)> = offline
            .iter()
            .map(|b| (b.category, b.candidate_id.as_str(), b.weight))
            .collect();
        assert_eq!(rows, vec![(Category::Pm, "pm2", 6), (Category::Parlemen, "parlemen1", 4)]);
        assert!(client.get_voter_ballots(&VoterId::new("V2")).await.unwrap().is_empty());
    }
}

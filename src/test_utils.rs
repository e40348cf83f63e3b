use crate::ballot::{
    Ballot, Candidate, ElectionStatus, SubmitBallotInput, SubmitBallotOutput, Voter, VoterId, VoterProfile, VotingStatus,
};
use crate::remote::{ElectionApi, RemoteError};
use crate::server::ElectionService;
use crate::store::InMemoryStore;
use crate::tally::{CandidateTally, ElectionStatistics};
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub(crate) fn discard_logger() -> slog::Logger {
    slog::Logger::root(slog::Discard, slog::o!())
}

pub(crate) fn voter(id: &str, allotted_weight: u32) -> Voter {
    Voter {
        id: VoterId::new(id),
        name: format!("Voter {}", id),
        login: id.to_lowercase(),
        credential: "secret".into(),
        allotted_weight,
        status: VotingStatus::NotVoted,
        last_activity: None,
    }
}

pub(crate) async fn with_sanity_timeout<F: Future>(future: F) -> F::Output {
    tokio::time::timeout(Duration::from_secs(5), future)
        .await
        .expect("Unexpected timeout")
}

pub(crate) async fn assert_still_pending<F: Future>(future: F)
where
    F::Output: std::fmt::Debug,
{
    tokio::time::timeout(Duration::from_millis(20), future)
        .await
        .expect_err("Expected timeout");
}

/// ToggleableApi is an in-process election server whose network can be unplugged.
pub(crate) struct ToggleableApi {
    service: ElectionService,
    store: Arc<InMemoryStore>,
    reachable: AtomicBool,
    delay: Mutex<Option<Duration>>,
    submit_calls: AtomicUsize,
    voter_exists_calls: AtomicUsize,
}

impl ToggleableApi {
    pub(crate) fn new(voters: Vec<Voter>) -> Arc<Self> {
        let store = Arc::new(InMemoryStore::seeded(voters, Candidate::default_roster()).expect("seed store"));
        let service = ElectionService::new(discard_logger(), store.clone());

        Arc::new(ToggleableApi {
            service,
            store,
            reachable: AtomicBool::new(true),
            delay: Mutex::new(None),
            submit_calls: AtomicUsize::new(0),
            voter_exists_calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    /// Every call sleeps this long (real time) before answering.
    pub(crate) fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock().unwrap() = delay;
    }

    pub(crate) fn store(&self) -> &Arc<InMemoryStore> {
        &self.store
    }

    pub(crate) fn service(&self) -> &ElectionService {
        &self.service
    }

    pub(crate) fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn voter_exists_calls(&self) -> usize {
        self.voter_exists_calls.load(Ordering::SeqCst)
    }

    async fn wire(&self) -> Result<(), RemoteError> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.reachable.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(RemoteError::Unreachable("connection refused".into()))
        }
    }
}

#[async_trait::async_trait]
impl ElectionApi for ToggleableApi {
    async fn get_voters(&self) -> Result<Vec<VoterProfile>, RemoteError> {
        self.wire().await?;
        Ok(self.service.get_voters()?)
    }

    async fn get_candidates(&self) -> Result<Vec<Candidate>, RemoteError> {
        self.wire().await?;
        Ok(self.service.get_candidates()?)
    }

    async fn get_election_status(&self) -> Result<ElectionStatus, RemoteError> {
        self.wire().await?;
        Ok(self.service.get_election_status()?)
    }

    async fn submit_ballot(&self, input: SubmitBallotInput) -> Result<SubmitBallotOutput, RemoteError> {
        self.wire().await?;
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.service.submit_ballot(input)?)
    }

    async fn get_results(&self) -> Result<Vec<CandidateTally>, RemoteError> {
        self.wire().await?;
        Ok(self.service.get_results()?)
    }

    async fn get_statistics(&self) -> Result<ElectionStatistics, RemoteError> {
        self.wire().await?;
        Ok(self.service.get_statistics()?)
    }

    async fn voter_exists(&self, voter_id: &VoterId) -> Result<bool, RemoteError> {
        self.wire().await?;
        self.voter_exists_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.service.voter_exists(voter_id)?)
    }

    async fn get_voter_ballots(&self, voter_id: &VoterId) -> Result<Vec<Ballot>, RemoteError> {
        self.wire().await?;
        Ok(self.service.get_voter_ballots(voter_id)?)
    }
}

use crate::ballot::{
    Ballot, BallotError, Candidate, ElectionStatus, SubmitBallotInput, SubmitBallotOutput, VoterId, VoterProfile,
};
use crate::tally::{CandidateTally, ElectionStatistics};
use std::time::Duration;

/// ElectionApi is the remote surface the sync client talks to. One method per server action.
#[async_trait::async_trait]
pub trait ElectionApi: Send + Sync {
    async fn get_voters(&self) -> Result<Vec<VoterProfile>, RemoteError>;

    async fn get_candidates(&self) -> Result<Vec<Candidate>, RemoteError>;

    async fn get_election_status(&self) -> Result<ElectionStatus, RemoteError>;

    async fn submit_ballot(&self, input: SubmitBallotInput) -> Result<SubmitBallotOutput, RemoteError>;

    async fn get_results(&self) -> Result<Vec<CandidateTally>, RemoteError>;

    async fn get_statistics(&self) -> Result<ElectionStatistics, RemoteError>;

    async fn voter_exists(&self, voter_id: &VoterId) -> Result<bool, RemoteError>;

    /// The ballots the server holds for `voter_id`, by category.
    async fn get_voter_ballots(&self, voter_id: &VoterId) -> Result<Vec<Ballot>, RemoteError>;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RemoteError {
    // The server looked at the request and refused it.
    #[error("rejected by server: {0}")]
    Rejected(BallotError),

    #[error("server unreachable: {0}")]
    Unreachable(String),

    #[error("remote call timed out after {0:?}")]
    Timeout(Duration),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("server fault: {0}")]
    ServerFault(String),
}

impl RemoteError {
    /// Permanent errors will repeat on every retry of the same request.
    pub fn is_permanent(&self) -> bool {
        match self {
            RemoteError::Rejected(e) => e.is_permanent(),
            _ => false,
        }
    }

    /// Transport errors mean the server could not be talked to at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, RemoteError::Unreachable(_) | RemoteError::Timeout(_))
    }
}

// ------- Conversions --------

impl From<BallotError> for RemoteError {
    fn from(e: BallotError) -> Self {
        RemoteError::Rejected(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ballot::StorageFault;

    #[test]
    fn classification() {
        let permanent = vec![
            RemoteError::Rejected(BallotError::InvalidInput("x".into())),
            RemoteError::Rejected(BallotError::NotFound("x".into())),
            RemoteError::Rejected(BallotError::Forbidden("x".into())),
            RemoteError::Rejected(BallotError::CorruptRecord("x".into())),
            RemoteError::Rejected(BallotError::Storage(StorageFault::ConstraintViolation("x".into()))),
        ];
        for e in permanent {
            assert!(e.is_permanent(), "{:?}", e);
            assert!(!e.is_transport(), "{:?}", e);
        }

        let transient = vec![
            RemoteError::Rejected(BallotError::Storage(StorageFault::Unavailable("x".into()))),
            RemoteError::ServerFault("x".into()),
            RemoteError::MalformedResponse("x".into()),
        ];
        for e in transient {
            assert!(!e.is_permanent(), "{:?}", e);
            assert!(!e.is_transport(), "{:?}", e);
        }

        assert!(RemoteError::Timeout(Duration::from_secs(1)).is_transport());
        assert!(RemoteError::Unreachable("refused".into()).is_transport());
    }
}

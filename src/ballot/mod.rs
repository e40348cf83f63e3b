//! Election data model shared by the server and the sync client.
mod error;
mod submission;
mod types;

pub use error::BallotError;
pub use error::StorageFault;
pub use submission::is_reserved_voter_id;
pub use submission::BallotSubmission;
pub use submission::SubmitBallotInput;
pub use submission::SubmitBallotOutput;
pub use types::Ballot;
pub use types::BallotPair;
pub use types::Candidate;
pub use types::CandidateId;
pub use types::Category;
pub use types::ElectionPhase;
pub use types::ElectionStatus;
pub use types::UnknownCategory;
pub use types::Voter;
pub use types::VoterId;
pub use types::VoterProfile;
pub use types::VotingStatus;
pub use types::DEFAULT_ALLOTTED_WEIGHT;

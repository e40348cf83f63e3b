mod ballot;
mod cache;
mod client;
mod connectivity;
mod remote;
mod server;
mod store;
mod tally;
#[cfg(test)]
mod test_utils;
mod wire;
mod grpc {
    include!("../generated/election.rs");
}

pub use ballot::is_reserved_voter_id;
pub use ballot::Ballot;
pub use ballot::BallotError;
pub use ballot::BallotPair;
pub use ballot::BallotSubmission;
pub use ballot::Candidate;
pub use ballot::CandidateId;
pub use ballot::Category;
pub use ballot::ElectionPhase;
pub use ballot::ElectionStatus;
pub use ballot::StorageFault;
pub use ballot::SubmitBallotInput;
pub use ballot::SubmitBallotOutput;
pub use ballot::UnknownCategory;
pub use ballot::Voter;
pub use ballot::VoterId;
pub use ballot::VoterProfile;
pub use ballot::VotingStatus;
pub use ballot::DEFAULT_ALLOTTED_WEIGHT;
pub use cache::CacheError;
pub use cache::FileKeyValueStore;
pub use cache::InMemoryKeyValueStore;
pub use cache::KeyValueStore;
pub use cache::LocalCache;
pub use cache::OutboxEntry;
pub use cache::OutboxSeq;
pub use cache::SyncState;
pub use client::try_create_election_client;
pub use client::ClientCreationError;
pub use client::Delivery;
pub use client::ElectionClient;
pub use client::ReplayReport;
pub use client::SubmitBallotError;
pub use client::SubmitReceipt;
pub use client::SyncClient;
pub use client::SyncClientConfig;
pub use client::SyncOptions;
pub use connectivity::Connectivity;
pub use connectivity::ConnectivityListener;
pub use connectivity::ConnectivityMonitor;
pub use connectivity::NetworkSignal;
pub use connectivity::ProbeTimerHandle;
pub use remote::ElectionApi;
pub use remote::GrpcElectionApi;
pub use remote::InvalidEndpoint;
pub use remote::RemoteError;
pub use server::shutdown_signal;
pub use server::ElectionService;
pub use server::RpcServer;
pub use server::RpcServerShutdownHandle;
pub use server::RpcServerShutdownSignal;
pub use store::AuditEntry;
pub use store::ElectionStore;
pub use store::InMemoryStore;
pub use store::StoreTransaction;
pub use tally::participation_rate;
pub use tally::tally;
pub use tally::CandidateTally;
pub use tally::ElectionStatistics;

// Learning 1: `create::{root_mod}` should not have any code. Just `mod` and `pub use` statements.
// Learning 2: All `mod` statements, anywhere, should not be `pub`. Only export `pub` via individual
//             use statements.
//
// This keeps the `crate::{root_mod}` root_mod only responsible for exporting types to the rest of
// crate, and allows me to organize my root_mod impl however I want.

//! The voting side: submissions that survive losing the server, and results that keep their shape.
mod in_flight;
mod local_aggregation;
mod options;
mod remote_gateway;
mod replay;
mod replay_trigger;
mod sync_client;
mod wiring;

pub use options::SyncOptions;
pub use replay::ReplayReport;
pub use sync_client::Delivery;
pub use sync_client::SubmitBallotError;
pub use sync_client::SubmitReceipt;
pub use sync_client::SyncClient;
pub use wiring::try_create_election_client;
pub use wiring::ClientCreationError;
pub use wiring::ElectionClient;
pub use wiring::SyncClientConfig;

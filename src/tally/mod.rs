//! Aggregation rules shared by the server and the offline client.
mod tally;

pub use tally::participation_rate;
pub use tally::tally;
pub use tally::CandidateTally;
pub use tally::ElectionStatistics;

use crate::ballot::{
    Ballot, Candidate, CandidateId, Category, ElectionStatus, StorageFault, Voter, VoterId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// ElectionStore is the authoritative relational store: voters, candidates, ballots, the
/// election status row and the audit trail.
///
/// Reads outside of a transaction see only committed state. All ballot writes go through
/// `begin()`, and implementations must serialize transactions so a second transaction either
/// fully precedes or fully follows the first.
pub trait ElectionStore: Send + Sync {
    /// begin() opens a transaction. Dropping it without `commit()` is a rollback.
    fn begin(&self) -> Result<Box<dyn StoreTransaction + '_>, StorageFault>;

    fn voters(&self) -> Result<Vec<Voter>, StorageFault>;

    fn voter(&self, voter_id: &VoterId) -> Result<Option<Voter>, StorageFault>;

    fn upsert_voter(&self, voter: Voter) -> Result<(), StorageFault>;

    fn candidates(&self) -> Result<Vec<Candidate>, StorageFault>;

    fn upsert_candidate(&self, candidate: Candidate) -> Result<(), StorageFault>;

    fn ballots(&self) -> Result<Vec<Ballot>, StorageFault>;

    /// None when the status row was never written.
    fn election_status(&self) -> Result<Option<ElectionStatus>, StorageFault>;

    fn set_election_status(&self, status: ElectionStatus) -> Result<(), StorageFault>;

    fn append_audit(&self, entry: AuditEntry) -> Result<(), StorageFault>;

    /// Most recent entries last.
    fn audit_log(&self) -> Result<Vec<AuditEntry>, StorageFault>;
}

/// StoreTransaction is one atomic unit of work. Nothing it writes is visible until commit.
pub trait StoreTransaction {
    fn voter(&self, voter_id: &VoterId) -> Result<Option<Voter>, StorageFault>;

    fn candidate(&self, candidate_id: &CandidateId) -> Result<Option<Candidate>, StorageFault>;

    fn ballots_of(&self, voter_id: &VoterId) -> Result<Vec<Ballot>, StorageFault>;

    /// Deletes every ballot of `voter_id` in `category` and returns how many rows went away.
    fn delete_ballots(&mut self, voter_id: &VoterId, category: Category) -> Result<usize, StorageFault>;

    /// Inserts a ballot row, enforcing: voter exists, candidate exists, candidate belongs to
    /// the ballot's category, and (voter, candidate) is unique.
    fn insert_ballot(&mut self, ballot: Ballot) -> Result<(), StorageFault>;

    /// Flips the voter to Voted and refreshes its last activity.
    fn mark_voted(&mut self, voter_id: &VoterId, at: DateTime<Utc>) -> Result<(), StorageFault>;

    fn commit(self: Box<Self>) -> Result<(), StorageFault>;

    fn rollback(self: Box<Self>);
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub actor: String,
    pub action: String,
    pub details: String,
    pub at: DateTime<Utc>,
}

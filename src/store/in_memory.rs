use crate::ballot::{
    Ballot, Candidate, CandidateId, Category, ElectionStatus, StorageFault, Voter, VoterId, VotingStatus,
};
use crate::store::{AuditEntry, ElectionStore, StoreTransaction};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

// A relational store modeled in memory. A transaction holds the table lock for its whole
// lifetime, which makes every transaction serializable against every other one.
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    fail_commits: AtomicBool,
    fail_audit: AtomicBool,
}

#[derive(Default)]
struct Tables {
    voters: BTreeMap<VoterId, Voter>,
    candidates: BTreeMap<CandidateId, Candidate>,
    ballots: Vec<Ballot>,
    election_status: Option<ElectionStatus>,
    audit: Vec<AuditEntry>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        InMemoryStore {
            tables: Mutex::new(Tables::default()),
            fail_commits: AtomicBool::new(false),
            fail_audit: AtomicBool::new(false),
        }
    }

    /// Store pre-loaded with voters and candidates.
    pub fn seeded(voters: Vec<Voter>, candidates: Vec<Candidate>) -> Result<Self, StorageFault> {
        let store = Self::new();
        for candidate in candidates {
            store.upsert_candidate(candidate)?;
        }
        for voter in voters {
            store.upsert_voter(voter)?;
        }

        Ok(store)
    }

    /// While set, every commit fails with `StorageFault::Unavailable` and rolls back. Lets
    /// operators and tests exercise the rollback path against a live store.
    pub fn set_fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::Release);
    }

    /// While set, appending to the audit trail fails.
    pub fn set_fail_audit(&self, fail: bool) {
        self.fail_audit.store(fail, Ordering::Release);
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StorageFault> {
        self.tables
            .lock()
            .map_err(|_| StorageFault::Unavailable("store lock poisoned".into()))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ElectionStore for InMemoryStore {
    fn begin(&self) -> Result<Box<dyn StoreTransaction + '_>, StorageFault> {
        let tables = self.lock()?;
        let staged_voters = tables.voters.clone();
        let staged_ballots = tables.ballots.clone();

        Ok(Box::new(InMemoryTransaction {
            tables,
            staged_voters,
            staged_ballots,
            fail_commit: self.fail_commits.load(Ordering::Acquire),
        }))
    }

    fn voters(&self) -> Result<Vec<Voter>, StorageFault> {
        Ok(self.lock()?.voters.values().cloned().collect())
    }

    fn voter(&self, voter_id: &VoterId) -> Result<Option<Voter>, StorageFault> {
        Ok(self.lock()?.voters.get(voter_id).cloned())
    }

    fn upsert_voter(&self, voter: Voter) -> Result<(), StorageFault> {
        self.lock()?.voters.insert(voter.id.clone(), voter);
        Ok(())
    }

    fn candidates(&self) -> Result<Vec<Candidate>, StorageFault> {
        Ok(self.lock()?.candidates.values().cloned().collect())
    }

    fn upsert_candidate(&self, candidate: Candidate) -> Result<(), StorageFault> {
        self.lock()?.candidates.insert(candidate.id.clone(), candidate);
        Ok(())
    }

    fn ballots(&self) -> Result<Vec<Ballot>, StorageFault> {
        Ok(self.lock()?.ballots.clone())
    }

    fn election_status(&self) -> Result<Option<ElectionStatus>, StorageFault> {
        Ok(self.lock()?.election_status.clone())
    }

    fn set_election_status(&self, status: ElectionStatus) -> Result<(), StorageFault> {
        self.lock()?.election_status.replace(status);
        Ok(())
    }

    fn append_audit(&self, entry: AuditEntry) -> Result<(), StorageFault> {
        if self.fail_audit.load(Ordering::Acquire) {
            return Err(StorageFault::Unavailable("audit table unavailable".into()));
        }

        self.lock()?.audit.push(entry);
        Ok(())
    }

    fn audit_log(&self) -> Result<Vec<AuditEntry>, StorageFault> {
        Ok(self.lock()?.audit.clone())
    }
}

struct InMemoryTransaction<'a> {
    tables: MutexGuard<'a, Tables>,
    // Only tables a transaction can write are staged.
    staged_voters: BTreeMap<VoterId, Voter>,
    staged_ballots: Vec<Ballot>,
    fail_commit: bool,
}

impl<'a> StoreTransaction for InMemoryTransaction<'a> {
    fn voter(&self, voter_id: &VoterId) -> Result<Option<Voter>, StorageFault> {
        Ok(self.staged_voters.get(voter_id).cloned())
    }

    fn candidate(&self, candidate_id: &CandidateId) -> Result<Option<Candidate>, StorageFault> {
        Ok(self.tables.candidates.get(candidate_id).cloned())
    }

    fn ballots_of(&self, voter_id: &VoterId) -> Result<Vec<Ballot>, StorageFault> {
        Ok(self
            .staged_ballots
            .iter()
            .filter(|b| &b.voter_id == voter_id)
            .cloned()
            .collect())
    }

    fn delete_ballots(&mut self, voter_id: &VoterId, category: Category) -> Result<usize, StorageFault> {
        let before = self.staged_ballots.len();
        self.staged_ballots
            .retain(|b| !(&b.voter_id == voter_id && b.category == category));

        Ok(before - self.staged_ballots.len())
    }

    fn insert_ballot(&mut self, ballot: Ballot) -> Result<(), StorageFault> {
        if !self.staged_voters.contains_key(&ballot.voter_id) {
            return Err(StorageFault::ConstraintViolation(format!(
                "ballot references unknown voter '{}'",
                ballot.voter_id
            )));
        }
        match self.tables.candidates.get(&ballot.candidate_id) {
            None => {
                return Err(StorageFault::ConstraintViolation(format!(
                    "ballot references unknown candidate '{}'",
                    ballot.candidate_id
                )));
            }
            Some(candidate) if candidate.category != ballot.category => {
                return Err(StorageFault::ConstraintViolation(format!(
                    "candidate '{}' runs in '{}', not '{}'",
                    ballot.candidate_id, candidate.category, ballot.category
                )));
            }
            Some(_) => {}
        }
        let duplicate = self
            .staged_ballots
            .iter()
            .any(|b| b.voter_id == ballot.voter_id && b.candidate_id == ballot.candidate_id);
        if duplicate {
            return Err(StorageFault::ConstraintViolation(format!(
                "duplicate ballot for voter '{}' and candidate '{}'",
                ballot.voter_id, ballot.candidate_id
            )));
        }

        self.staged_ballots.push(ballot);
        Ok(())
    }

    fn mark_voted(&mut self, voter_id: &VoterId, at: DateTime<Utc>) -> Result<(), StorageFault> {
        match self.staged_voters.get_mut(voter_id) {
            Some(voter) => {
                voter.status = VotingStatus::Voted;
                voter.last_activity.replace(at);
                Ok(())
            }
            None => Err(StorageFault::ConstraintViolation(format!(
                "cannot update unknown voter '{}'",
                voter_id
            ))),
        }
    }

    fn commit(self: Box<Self>) -> Result<(), StorageFault> {
        if self.fail_commit {
            return Err(StorageFault::Unavailable("commit failed".into()));
        }

        let mut this = *self;
        this.tables.voters = this.staged_voters;
        this.tables.ballots = this.staged_ballots;
        Ok(())
    }

    fn rollback(self: Box<Self>) {
        // Staged state is discarded with the guard.
    }
}

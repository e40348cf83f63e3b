use crate::ballot::{
    Ballot, BallotError, BallotSubmission, Candidate, ElectionStatus, StorageFault, SubmitBallotInput,
    SubmitBallotOutput, Voter, VoterId, VoterProfile, VotingStatus,
};
use crate::store::{AuditEntry, ElectionStore, StoreTransaction};
use crate::tally::{self, CandidateTally, ElectionStatistics};
use chrono::{DateTime, Utc};
use std::convert::TryFrom;
use std::sync::Arc;

const CAST_BALLOT_ACTION: &str = "cast_ballot";

/// ElectionService is the server-side core: the vote submission transaction plus the
/// aggregation reads, backed by the authoritative store.
pub struct ElectionService {
    logger: slog::Logger,
    store: Arc<dyn ElectionStore>,
}

impl ElectionService {
    pub fn new(logger: slog::Logger, store: Arc<dyn ElectionStore>) -> Self {
        ElectionService { logger, store }
    }

    pub fn store(&self) -> &Arc<dyn ElectionStore> {
        &self.store
    }

    /// Replaces every ballot the voter holds in the submission's category with the weighted
    /// pairs of `input` and marks the voter as Voted. All of it commits or none of it does.
    pub fn submit_ballot(&self, input: SubmitBallotInput) -> Result<SubmitBallotOutput, BallotError> {
        let submission = BallotSubmission::try_from(input).map_err(|e| {
            slog::info!(self.logger, "Rejecting malformed ballot: {}", e);
            e
        })?;
        let logger = self.logger.new(slog::o!(
            "Voter" => submission.voter_id.to_string(),
            "Category" => submission.category.as_str(),
        ));

        let mut tx = self.store.begin().map_err(|fault| {
            slog::error!(logger, "Failed to open transaction: {}", fault);
            BallotError::from(fault)
        })?;

        let now = Utc::now();
        match self.apply_submission(&logger, tx.as_mut(), &submission, now) {
            Ok(output) => {
                if let Err(fault) = tx.commit() {
                    slog::error!(logger, "Commit failed, ballot rolled back: {}", fault);
                    return Err(fault.into());
                }

                slog::info!(
                    logger,
                    "Ballot cast. Inserted {} rows, deleted {} rows.",
                    output.inserted,
                    output.deleted
                );
                self.append_audit(&logger, &submission, now);

                Ok(output)
            }
            Err(e) => {
                tx.rollback();
                Err(e)
            }
        }
    }

    fn apply_submission(
        &self,
        logger: &slog::Logger,
        tx: &mut (dyn StoreTransaction + '_),
        submission: &BallotSubmission,
        now: DateTime<Utc>,
    ) -> Result<SubmitBallotOutput, BallotError> {
        let voter = Self::load_voter(logger, tx, &submission.voter_id)?;

        submission.ensure_voter_permitted().map_err(|e| {
            slog::warn!(logger, "Security: reserved placeholder id attempted to vote");
            e
        })?;

        for pair in submission.pairs.iter() {
            if tx.candidate(&pair.candidate_id).map_err(|f| Self::storage(logger, f))?.is_none() {
                return Err(BallotError::NotFound(format!("candidate '{}'", pair.candidate_id)));
            }
        }

        let held_elsewhere: u64 = tx
            .ballots_of(&submission.voter_id)
            .map_err(|f| Self::storage(logger, f))?
            .iter()
            .filter(|b| b.category != submission.category)
            .map(|b| u64::from(b.weight))
            .sum();
        let requested = held_elsewhere + submission.total_weight();
        if requested > u64::from(voter.allotted_weight) {
            slog::info!(
                logger,
                "Ballot exceeds allotment: {} requested, {} allotted",
                requested,
                voter.allotted_weight
            );
            return Err(BallotError::InvalidInput(format!(
                "ballot weight {} exceeds the voter's allotment of {}",
                requested, voter.allotted_weight
            )));
        }

        Self::replace_category_ballots(tx, submission, now).map_err(|f| Self::storage(logger, f))
    }

    fn load_voter(logger: &slog::Logger, tx: &(dyn StoreTransaction + '_), voter_id: &VoterId) -> Result<Voter, BallotError> {
        let voter = tx
            .voter(voter_id)
            .map_err(|f| Self::storage(logger, f))?
            .ok_or_else(|| BallotError::NotFound(format!("voter '{}'", voter_id)))?;

        if !voter.is_complete() {
            slog::error!(logger, "Voter record is missing name, login or credential");
            return Err(BallotError::CorruptRecord(voter_id.to_string()));
        }

        Ok(voter)
    }

    fn replace_category_ballots(
        tx: &mut (dyn StoreTransaction + '_),
        submission: &BallotSubmission,
        now: DateTime<Utc>,
    ) -> Result<SubmitBallotOutput, StorageFault> {
        let deleted = tx.delete_ballots(&submission.voter_id, submission.category)?;

        let mut inserted = 0;
        for pair in submission.weighted_pairs() {
            tx.insert_ballot(Ballot {
                voter_id: submission.voter_id.clone(),
                candidate_id: pair.candidate_id.clone(),
                category: submission.category,
                weight: pair.weight,
                cast_at: now,
            })?;
            inserted += 1;
        }

        tx.mark_voted(&submission.voter_id, now)?;

        Ok(SubmitBallotOutput {
            inserted,
            deleted: row_count(deleted)?,
        })
    }

    fn append_audit(&self, logger: &slog::Logger, submission: &BallotSubmission, at: DateTime<Utc>) {
        let details = submission
            .weighted_pairs()
            .map(|p| format!("{}={}", p.candidate_id, p.weight))
            .collect::<Vec<_>>()
            .join(",");
        let entry = AuditEntry {
            actor: submission.voter_id.to_string(),
            action: CAST_BALLOT_ACTION.to_string(),
            details: format!("{}: {}", submission.category, details),
            at,
        };

        if let Err(fault) = self.store.append_audit(entry) {
            slog::warn!(logger, "Audit entry dropped: {}", fault);
        }
    }

    fn storage(logger: &slog::Logger, fault: StorageFault) -> BallotError {
        slog::error!(logger, "Storage failure: {}", fault);
        BallotError::Storage(fault)
    }

    pub fn get_voters(&self) -> Result<Vec<VoterProfile>, BallotError> {
        let voters = self.store.voters().map_err(|f| Self::storage(&self.logger, f))?;
        Ok(voters.iter().map(Voter::profile).collect())
    }

    /// Candidates in ballot order: category, then position on the ballot.
    pub fn get_candidates(&self) -> Result<Vec<Candidate>, BallotError> {
        let mut candidates = self.store.candidates().map_err(|f| Self::storage(&self.logger, f))?;
        candidates.sort_by(|a, b| (a.category, a.position, &a.id).cmp(&(b.category, b.position, &b.id)));

        Ok(candidates)
    }

    /// The stored status, or `Stopped` when none was ever recorded.
    pub fn get_election_status(&self) -> Result<ElectionStatus, BallotError> {
        let status = self
            .store
            .election_status()
            .map_err(|f| Self::storage(&self.logger, f))?;

        Ok(status.unwrap_or_default())
    }

    pub fn set_election_status(&self, status: ElectionStatus) -> Result<(), BallotError> {
        slog::info!(self.logger, "Election phase is now '{}'", status.phase.as_str());
        self.store
            .set_election_status(status)
            .map_err(|f| Self::storage(&self.logger, f))
    }

    pub fn get_results(&self) -> Result<Vec<CandidateTally>, BallotError> {
        let candidates = self.get_candidates()?;
        let ballots = self.store.ballots().map_err(|f| Self::storage(&self.logger, f))?;

        Ok(tally::tally(
            &candidates,
            ballots.into_iter().map(|b| (b.candidate_id, u64::from(b.weight))),
        ))
    }

    pub fn get_statistics(&self) -> Result<ElectionStatistics, BallotError> {
        let voters = self.store.voters().map_err(|f| Self::storage(&self.logger, f))?;
        let ballots = self.store.ballots().map_err(|f| Self::storage(&self.logger, f))?;

        let voted = voters.iter().filter(|v| v.status == VotingStatus::Voted).count();
        let total_weight = ballots.iter().map(|b| u64::from(b.weight)).sum();

        Ok(ElectionStatistics::new(voters.len() as u32, voted as u32, total_weight))
    }

    /// Every ballot `voter_id` holds, by category. A voter who never voted, or doesn't exist, has
    /// none.
    pub fn get_voter_ballots(&self, voter_id: &VoterId) -> Result<Vec<Ballot>, BallotError> {
        if voter_id.as_str().is_empty() {
            return Err(BallotError::InvalidInput("voter id is required".to_string()));
        }

        let mut ballots: Vec<Ballot> = self
            .store
            .ballots()
            .map_err(|f| Self::storage(&self.logger, f))?
            .into_iter()
            .filter(|b| &b.voter_id == voter_id)
            .collect();
        Ballot::sort_by_category(&mut ballots);

        Ok(ballots)
    }

    pub fn voter_exists(&self, voter_id: &VoterId) -> Result<bool, BallotError> {
        let voter = self
            .store
            .voter(voter_id)
            .map_err(|f| Self::storage(&self.logger, f))?;

        Ok(voter.is_some())
    }
}

fn row_count(rows: usize) -> Result<u32, StorageFault> {
    u32::try_from(rows).map_err(|_| StorageFault::Unavailable(format!("row count {} out of range", rows)))
}

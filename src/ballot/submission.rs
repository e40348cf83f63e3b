use crate::ballot::error::BallotError;
use crate::ballot::types::{BallotPair, CandidateId, Category, VoterId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::convert::TryFrom;

const RESERVED_VOTER_ID_PREFIX: &str = "user_";

/// Placeholder ids look like `user_482`: the reserved prefix followed only by digits. Such
/// voters are created by bulk tooling and may never cast a ballot.
pub fn is_reserved_voter_id(voter_id: &str) -> bool {
    match voter_id.strip_prefix(RESERVED_VOTER_ID_PREFIX) {
        Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// SubmitBallotInput is a submission as it arrives from a caller, before any validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitBallotInput {
    pub voter_id: String,
    pub category: String,
    pub pairs: Vec<(String, i64)>,
}

impl SubmitBallotInput {
    pub fn new(voter_id: &str, category: &str, pairs: &[(&str, i64)]) -> Self {
        SubmitBallotInput {
            voter_id: voter_id.to_string(),
            category: category.to_string(),
            pairs: pairs.iter().map(|(c, w)| (c.to_string(), *w)).collect(),
        }
    }
}

/// BallotSubmission is a structurally valid submission: known category, at least one pair,
/// non-negative weights with a positive total, no candidate named twice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotSubmission {
    pub voter_id: VoterId,
    pub category: Category,
    pub pairs: Vec<BallotPair>,
}

impl BallotSubmission {
    pub fn total_weight(&self) -> u64 {
        self.pairs.iter().map(|p| p.weight as u64).sum()
    }

    /// Pairs that produce a stored ballot. Zero-weight pairs are dropped.
    pub fn weighted_pairs(&self) -> impl Iterator<Item = &BallotPair> {
        self.pairs.iter().filter(|p| p.weight > 0)
    }

    /// Fails with `Forbidden` when the voter id is a reserved placeholder.
    pub fn ensure_voter_permitted(&self) -> Result<(), BallotError> {
        if is_reserved_voter_id(self.voter_id.as_str()) {
            return Err(BallotError::Forbidden(self.voter_id.to_string()));
        }

        Ok(())
    }
}

impl From<BallotSubmission> for SubmitBallotInput {
    fn from(submission: BallotSubmission) -> Self {
        SubmitBallotInput {
            voter_id: submission.voter_id.into_inner(),
            category: submission.category.as_str().to_string(),
            pairs: submission
                .pairs
                .into_iter()
                .map(|p| (p.candidate_id.into_inner(), i64::from(p.weight)))
                .collect(),
        }
    }
}

/// SubmitBallotOutput counts the rows a committed submission touched.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitBallotOutput {
    pub inserted: u32,
    pub deleted: u32,
}

impl TryFrom<SubmitBallotInput> for BallotSubmission {
    type Error = BallotError;

    fn try_from(input: SubmitBallotInput) -> Result<Self, Self::Error> {
        if input.voter_id.trim().is_empty() {
            return Err(BallotError::InvalidInput("voter id is required".into()));
        }
        if input.category.trim().is_empty() {
            return Err(BallotError::InvalidInput("category is required".into()));
        }
        let category = input
            .category
            .parse::<Category>()
            .map_err(|e| BallotError::InvalidInput(e.to_string()))?;
        if input.pairs.is_empty() {
            return Err(BallotError::InvalidInput("at least one ballot pair is required".into()));
        }

        let mut seen = HashSet::with_capacity(input.pairs.len());
        let mut pairs = Vec::with_capacity(input.pairs.len());
        for (candidate_id, weight) in input.pairs {
            if candidate_id.trim().is_empty() {
                return Err(BallotError::InvalidInput("every pair needs a candidate id".into()));
            }
            if weight < 0 {
                return Err(BallotError::InvalidInput(format!(
                    "weight for '{}' is negative ({})",
                    candidate_id, weight
                )));
            }
            let weight = u32::try_from(weight).map_err(|_| {
                BallotError::InvalidInput(format!("weight for '{}' is out of range ({})", candidate_id, weight))
            })?;
            if !seen.insert(candidate_id.clone()) {
                return Err(BallotError::InvalidInput(format!(
                    "candidate '{}' appears more than once",
                    candidate_id
                )));
            }
            pairs.push(BallotPair {
                candidate_id: CandidateId::new(candidate_id),
                weight,
            });
        }

        let submission = BallotSubmission {
            voter_id: VoterId::new(input.voter_id),
            category,
            pairs,
        };
        if submission.total_weight() == 0 {
            return Err(BallotError::InvalidInput("at least one weight must be positive".into()));
        }

        Ok(submission)
    }
}

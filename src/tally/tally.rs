use crate::ballot::{Candidate, CandidateId, Category};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// CandidateTally is one line of election results.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTally {
    pub candidate_id: CandidateId,
    pub candidate_name: String,
    pub category: Category,
    pub position: u32,
    pub total_weight: u64,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionStatistics {
    pub total_voters: u32,
    pub voted_voters: u32,
    pub total_weight: u64,
    /// Whole percent, 0..=100.
    pub participation_rate: u32,
}

impl ElectionStatistics {
    pub fn new(total_voters: u32, voted_voters: u32, total_weight: u64) -> Self {
        ElectionStatistics {
            total_voters,
            voted_voters,
            total_weight,
            participation_rate: participation_rate(voted_voters, total_voters),
        }
    }
}

/// Builds the results table: every candidate appears, even with no weight, ordered by category
/// then ballot position. Weights naming a candidate outside `candidates` are ignored.
///
/// Both the server and the offline client render results through this function so the shape of
/// the table never changes when the client switches source.
pub fn tally<I>(candidates: &[Candidate], weights: I) -> Vec<CandidateTally>
where
    I: IntoIterator<Item = (CandidateId, u64)>,
{
    let mut totals: HashMap<CandidateId, u64> = candidates.iter().map(|c| (c.id.clone(), 0)).collect();
    for (candidate_id, weight) in weights {
        if let Some(total) = totals.get_mut(&candidate_id) {
            *total += weight;
        }
    }

    let mut tallies: Vec<CandidateTally> = candidates
        .iter()
        .map(|c| CandidateTally {
            candidate_id: c.id.clone(),
            candidate_name: c.name.clone(),
            category: c.category,
            position: c.position,
            total_weight: totals.get(&c.id).copied().unwrap_or(0),
        })
        .collect();
    tallies.sort_by(|a, b| {
        (a.category, a.position, &a.candidate_id).cmp(&(b.category, b.position, &b.candidate_id))
    });
    tallies.dedup_by(|a, b| a.candidate_id == b.candidate_id);

    tallies
}

/// Share of voters that voted, rounded half-up to a whole percent. 0 when nobody is registered.
pub fn participation_rate(voted: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }

    let voted = u64::from(voted.min(total));
    let total = u64::from(total);
    ((voted * 100 + total / 2) / total) as u32
}

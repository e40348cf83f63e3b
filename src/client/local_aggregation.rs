use crate::ballot::{Ballot, Candidate, Category, VoterId, VoterProfile};
use crate::cache::{OutboxEntry, SyncState};
use crate::tally::{self, CandidateTally, ElectionStatistics};
use std::collections::{BTreeSet, HashMap};

// Offline aggregation over the outbox. Pending and Synced entries count; a later one for the same
// (voter, category) replaces the earlier one, the same way the server replaces a category on
// resubmission. SkippedPermanent entries never reached the store, so they neither count nor
// replace anything.

fn effective_entries(outbox: &[OutboxEntry]) -> Vec<&OutboxEntry> {
    let mut latest: HashMap<(&VoterId, Category), &OutboxEntry> = HashMap::new();
    for entry in outbox.iter().filter(|e| counts_locally(&e.state)) {
        let key = (&entry.submission.voter_id, entry.submission.category);
        match latest.get(&key) {
            Some(current) if current.seq > entry.seq => {}
            _ => {
                latest.insert(key, entry);
            }
        }
    }

    let mut entries: Vec<&OutboxEntry> = latest.into_iter().map(|(_, entry)| entry).collect();
    entries.sort_by_key(|e| e.seq);
    entries
}

fn counts_locally(state: &SyncState) -> bool {
    !matches!(state, SyncState::SkippedPermanent { .. })
}

pub(crate) fn local_results(candidates: &[Candidate], outbox: &[OutboxEntry]) -> Vec<CandidateTally> {
    let weights = effective_entries(outbox).into_iter().flat_map(|entry| {
        entry
            .submission
            .weighted_pairs()
            .map(|p| (p.candidate_id.clone(), u64::from(p.weight)))
    });

    tally::tally(candidates, weights)
}

/// Participation is voters with at least one counted outbox entry over every voter known locally:
/// the cached voter list plus anyone who only shows up in the outbox.
pub(crate) fn local_statistics(voters: &[VoterProfile], outbox: &[OutboxEntry]) -> ElectionStatistics {
    let effective = effective_entries(outbox);
    let voted: BTreeSet<&VoterId> = effective.iter().map(|e| &e.submission.voter_id).collect();
    let known: BTreeSet<&VoterId> = voters.iter().map(|v| &v.id).chain(voted.iter().copied()).collect();
    let total_weight = effective.iter().map(|e| e.submission.total_weight()).sum();

    ElectionStatistics::new(known.len() as u32, voted.len() as u32, total_weight)
}

/// What the voter's stored ballots will be once the outbox is through: one row per weighted pair
/// of their latest counted entry in each category, cast when it was submitted.
pub(crate) fn local_voter_ballots(voter_id: &VoterId, outbox: &[OutboxEntry]) -> Vec<Ballot> {
    let mut ballots: Vec<Ballot> = effective_entries(outbox)
        .into_iter()
        .filter(|entry| &entry.submission.voter_id == voter_id)
        .flat_map(|entry| {
            entry.submission.weighted_pairs().map(move |pair| Ballot {
                voter_id: entry.submission.voter_id.clone(),
                candidate_id: pair.candidate_id.clone(),
                category: entry.submission.category,
                weight: pair.weight,
                cast_at: entry.submitted_at,
            })
        })
        .collect();
    Ballot::sort_by_category(&mut ballots);

    ballots
}

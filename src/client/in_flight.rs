use crate::ballot::VoterId;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

/// InFlightVoters tracks voters whose submission is still being processed.
#[derive(Default)]
pub(super) struct InFlightVoters {
    voters: Mutex<HashSet<VoterId>>,
}

/// Releases the voter when dropped.
pub(super) struct InFlightGuard<'a> {
    owner: &'a InFlightVoters,
    voter_id: VoterId,
}

impl InFlightVoters {
    fn lock(&self) -> MutexGuard<'_, HashSet<VoterId>> {
        // The set stays consistent even if a holder panicked.
        match self.voters.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// None when the voter already has a submission in flight.
    pub(super) fn try_acquire(&self, voter_id: &VoterId) -> Option<InFlightGuard<'_>> {
        if !self.lock().insert(voter_id.clone()) {
            return None;
        }

        Some(InFlightGuard {
            owner: self,
            voter_id: voter_id.clone(),
        })
    }
}

impl<'a> Drop for InFlightGuard<'a> {
    fn drop(&mut self) {
        self.owner.lock().remove(&self.voter_id);
    }
}

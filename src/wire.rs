use crate::ballot::{
    Ballot, BallotError, Candidate, CandidateId, Category, ElectionPhase, ElectionStatus, StorageFault, VoterId,
    VoterProfile, VotingStatus,
};
use crate::grpc::{
    ProtoBallot, ProtoCandidate, ProtoCandidateTally, ProtoFailure, ProtoFailureKind, ProtoGetElectionStatusSuccess,
    ProtoGetStatisticsSuccess, ProtoVoter,
};
use crate::remote::RemoteError;
use crate::tally::{CandidateTally, ElectionStatistics};
use chrono::{DateTime, TimeZone, Utc};

// Timestamps travel as unix millis, 0 meaning absent.

pub(crate) fn millis_from_timestamp(timestamp: Option<DateTime<Utc>>) -> i64 {
    timestamp.map(|t| t.timestamp_millis()).unwrap_or(0)
}

pub(crate) fn timestamp_from_millis(millis: i64) -> Option<DateTime<Utc>> {
    match millis {
        0 => None,
        millis => Utc.timestamp_millis_opt(millis).single(),
    }
}

fn parse_category(raw: &str) -> Result<Category, RemoteError> {
    raw.parse::<Category>()
        .map_err(|e| RemoteError::MalformedResponse(e.to_string()))
}

// ------- Failures --------

pub(crate) fn failure_from_error(error: &BallotError) -> ProtoFailure {
    let (kind, message) = match error {
        BallotError::InvalidInput(m) => (ProtoFailureKind::InvalidInput, m.clone()),
        BallotError::NotFound(m) => (ProtoFailureKind::NotFound, m.clone()),
        BallotError::Forbidden(m) => (ProtoFailureKind::Forbidden, m.clone()),
        BallotError::CorruptRecord(m) => (ProtoFailureKind::CorruptRecord, m.clone()),
        BallotError::Storage(StorageFault::ConstraintViolation(m)) => (ProtoFailureKind::ConstraintViolation, m.clone()),
        // The cause stays in the server log.
        BallotError::Storage(StorageFault::Unavailable(_)) => (ProtoFailureKind::ServerFault, error.to_string()),
    };

    ProtoFailure {
        kind: kind as i32,
        message,
    }
}

pub(crate) fn error_from_failure(failure: ProtoFailure) -> RemoteError {
    let message = failure.message;
    match ProtoFailureKind::from_i32(failure.kind) {
        Some(ProtoFailureKind::InvalidInput) => RemoteError::Rejected(BallotError::InvalidInput(message)),
        Some(ProtoFailureKind::NotFound) => RemoteError::Rejected(BallotError::NotFound(message)),
        Some(ProtoFailureKind::Forbidden) => RemoteError::Rejected(BallotError::Forbidden(message)),
        Some(ProtoFailureKind::CorruptRecord) => RemoteError::Rejected(BallotError::CorruptRecord(message)),
        Some(ProtoFailureKind::ConstraintViolation) => {
            RemoteError::Rejected(BallotError::Storage(StorageFault::ConstraintViolation(message)))
        }
        Some(ProtoFailureKind::ServerFault) => RemoteError::ServerFault(message),
        None => RemoteError::MalformedResponse(format!("unknown failure kind {}", failure.kind)),
    }
}

// ------- Entities --------

pub(crate) fn voter_to_proto(voter: VoterProfile) -> ProtoVoter {
    ProtoVoter {
        id: voter.id.into_inner(),
        name: voter.name,
        login: voter.login,
        allotted_weight: voter.allotted_weight,
        has_voted: voter.status == VotingStatus::Voted,
        last_activity_ms: millis_from_timestamp(voter.last_activity),
    }
}

pub(crate) fn voter_from_proto(proto: ProtoVoter) -> VoterProfile {
    VoterProfile {
        id: VoterId::new(proto.id),
        name: proto.name,
        login: proto.login,
        allotted_weight: proto.allotted_weight,
        status: if proto.has_voted {
            VotingStatus::Voted
        } else {
            VotingStatus::NotVoted
        },
        last_activity: timestamp_from_millis(proto.last_activity_ms),
    }
}

pub(crate) fn candidate_to_proto(candidate: Candidate) -> ProtoCandidate {
    ProtoCandidate {
        id: candidate.id.into_inner(),
        name: candidate.name,
        category: candidate.category.as_str().to_string(),
        position: candidate.position,
        media: candidate.media,
    }
}

pub(crate) fn candidate_from_proto(proto: ProtoCandidate) -> Result<Candidate, RemoteError> {
    Ok(Candidate {
        id: CandidateId::new(proto.id),
        name: proto.name,
        category: parse_category(&proto.category)?,
        position: proto.position,
        media: proto.media,
    })
}

pub(crate) fn ballot_to_proto(ballot: Ballot) -> ProtoBallot {
    ProtoBallot {
        voter_id: ballot.voter_id.into_inner(),
        candidate_id: ballot.candidate_id.into_inner(),
        category: ballot.category.as_str().to_string(),
        weight: ballot.weight,
        cast_at_ms: ballot.cast_at.timestamp_millis(),
    }
}

pub(crate) fn ballot_from_proto(proto: ProtoBallot) -> Result<Ballot, RemoteError> {
    let cast_at = timestamp_from_millis(proto.cast_at_ms)
        .ok_or_else(|| RemoteError::MalformedResponse(format!("ballot without cast time: {:?}", proto)))?;

    Ok(Ballot {
        category: parse_category(&proto.category)?,
        voter_id: VoterId::new(proto.voter_id),
        candidate_id: CandidateId::new(proto.candidate_id),
        weight: proto.weight,
        cast_at,
    })
}

pub(crate) fn tally_to_proto(tally: CandidateTally) -> ProtoCandidateTally {
    ProtoCandidateTally {
        candidate_id: tally.candidate_id.into_inner(),
        candidate_name: tally.candidate_name,
        category: tally.category.as_str().to_string(),
        position: tally.position,
        total_weight: tally.total_weight,
    }
}

pub(crate) fn tally_from_proto(proto: ProtoCandidateTally) -> Result<CandidateTally, RemoteError> {
    Ok(CandidateTally {
        candidate_id: CandidateId::new(proto.candidate_id),
        candidate_name: proto.candidate_name,
        category: parse_category(&proto.category)?,
        position: proto.position,
        total_weight: proto.total_weight,
    })
}

pub(crate) fn status_to_proto(status: ElectionStatus) -> ProtoGetElectionStatusSuccess {
    ProtoGetElectionStatusSuccess {
        phase: status.phase.as_str().to_string(),
        started_at_ms: millis_from_timestamp(status.started_at),
        ended_at_ms: millis_from_timestamp(status.ended_at),
    }
}

pub(crate) fn status_from_proto(proto: ProtoGetElectionStatusSuccess) -> Result<ElectionStatus, RemoteError> {
    let phase = proto
        .phase
        .parse::<ElectionPhase>()
        .map_err(RemoteError::MalformedResponse)?;

    Ok(ElectionStatus {
        phase,
        started_at: timestamp_from_millis(proto.started_at_ms),
        ended_at: timestamp_from_millis(proto.ended_at_ms),
    })
}

pub(crate) fn statistics_to_proto(statistics: ElectionStatistics) -> ProtoGetStatisticsSuccess {
    ProtoGetStatisticsSuccess {
        total_voters: statistics.total_voters,
        voted_voters: statistics.voted_voters,
        total_weight: statistics.total_weight,
        participation_rate: statistics.participation_rate,
    }
}

pub(crate) fn statistics_from_proto(proto: ProtoGetStatisticsSuccess) -> Result<ElectionStatistics, RemoteError> {
    if proto.voted_voters > proto.total_voters || proto.participation_rate > 100 {
        return Err(RemoteError::MalformedResponse(format!(
            "inconsistent statistics {:?}",
            proto
        )));
    }

    Ok(ElectionStatistics {
        total_voters: proto.total_voters,
        voted_voters: proto.voted_voters,
        total_weight: proto.total_weight,
        participation_rate: proto.participation_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_millis_means_absent() {
        assert_eq!(timestamp_from_millis(0), None);
        assert_eq!(millis_from_timestamp(None), 0);

        let at = Utc.timestamp_millis_opt(1_700_000_000_123).single();
        assert_eq!(timestamp_from_millis(millis_from_timestamp(at)), at);
    }

    #[test]
    fn storage_cause_is_not_sent_to_callers() {
        let failure = failure_from_error(&BallotError::Storage(StorageFault::Unavailable(
            "disk /dev/sda1 on fire".into(),
        )));

        assert_eq!(failure.kind, ProtoFailureKind::ServerFault as i32);
        assert!(!failure.message.contains("sda1"));
        assert!(matches!(error_from_failure(failure), RemoteError::ServerFault(_)));
    }

    #[test]
    fn rejections_keep_their_kind() {
        let errors = vec![
            BallotError::InvalidInput("bad".into()),
            BallotError::NotFound("voter 'V9'".into()),
            BallotError::Forbidden("user_1".into()),
            BallotError::CorruptRecord("V3".into()),
            BallotError::Storage(StorageFault::ConstraintViolation("dup".into())),
        ];

        for error in errors {
            let decoded = error_from_failure(failure_from_error(&error));
            assert_eq!(decoded, RemoteError::Rejected(error));
        }
    }

    #[test]
    fn ballot_without_cast_time_is_malformed() {
        let proto = ProtoBallot {
            voter_id: "V1".into(),
            candidate_id: "pm1".into(),
            category: "pm".into(),
            weight: 3,
            cast_at_ms: 0,
        };

        assert!(matches!(ballot_from_proto(proto), Err(RemoteError::MalformedResponse(_))));
    }

    #[test]
    fn unknown_category_is_malformed() {
        let proto = ProtoCandidate {
            id: "x".into(),
            name: "X".into(),
            category: "mayor".into(),
            position: 1,
            media: String::new(),
        };

        assert!(matches!(candidate_from_proto(proto), Err(RemoteError::MalformedResponse(_))));
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ballot weight handed to a voter when the registration record doesn't say otherwise.
pub const DEFAULT_ALLOTTED_WEIGHT: u32 = 20;

/// VoterId is assigned externally at registration. It is never generated by this crate.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct VoterId(String);

impl VoterId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        VoterId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for VoterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CandidateId(String);

impl CandidateId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        CandidateId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Category is one of the fixed electoral races. Declaration order is display order.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Presiden,
    Pm,
    Parlemen,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Presiden, Category::Pm, Category::Parlemen];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Presiden => "presiden",
            Category::Pm => "pm",
            Category::Parlemen => "parlemen",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "presiden" => Ok(Category::Presiden),
            "pm" => Ok(Category::Pm),
            "parlemen" => Ok(Category::Parlemen),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum VotingStatus {
    NotVoted,
    Voted,
}

impl Default for VotingStatus {
    fn default() -> Self {
        VotingStatus::NotVoted
    }
}

/// Voter is the authoritative voter record as the server stores it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Voter {
    pub id: VoterId,
    pub name: String,
    pub login: String,
    pub credential: String,
    #[serde(default = "default_allotted_weight")]
    pub allotted_weight: u32,
    #[serde(default)]
    pub status: VotingStatus,
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
}

fn default_allotted_weight() -> u32 {
    DEFAULT_ALLOTTED_WEIGHT
}

impl Voter {
    /// A record is complete when none of its identifying text fields are blank.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.login.trim().is_empty() && !self.credential.trim().is_empty()
    }

    pub fn profile(&self) -> VoterProfile {
        VoterProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            login: self.login.clone(),
            allotted_weight: self.allotted_weight,
            status: self.status,
            last_activity: self.last_activity,
        }
    }
}

/// VoterProfile is the credential-free view of a voter that leaves the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VoterProfile {
    pub id: VoterId,
    pub name: String,
    pub login: String,
    pub allotted_weight: u32,
    pub status: VotingStatus,
    pub last_activity: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub category: Category,
    pub position: u32,
    #[serde(default)]
    pub media: String,
}

impl Candidate {
    pub fn new(id: &str, name: &str, category: Category, position: u32) -> Self {
        Candidate {
            id: CandidateId::new(id),
            name: name.to_string(),
            category,
            position,
            media: String::new(),
        }
    }

    /// The roster the election was configured with. Used whenever no candidate list is known.
    pub fn default_roster() -> Vec<Candidate> {
        vec![
            Candidate::new("presiden1", "NENENG & INAYAH", Category::Presiden, 1),
            Candidate::new("presiden2", "AISYAH & EVI", Category::Presiden, 2),
            Candidate::new("pm1", "KUKUH", Category::Pm, 1),
            Candidate::new("pm2", "SAYYIDAH", Category::Pm, 2),
            Candidate::new("parlemen1", "ADINUR KHOLIFAH", Category::Parlemen, 1),
            Candidate::new("parlemen2", "ENI FATMAWATI", Category::Parlemen, 2),
            Candidate::new("parlemen3", "FAIZAH MAULIDA", Category::Parlemen, 3),
            Candidate::new("parlemen4", "AHMAD NASHUKA", Category::Parlemen, 4),
        ]
    }
}

/// BallotPair is one (candidate, weight) line of a submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotPair {
    pub candidate_id: CandidateId,
    pub weight: u32,
}

impl BallotPair {
    pub fn new(candidate_id: &str, weight: u32) -> Self {
        BallotPair {
            candidate_id: CandidateId::new(candidate_id),
            weight,
        }
    }
}

/// Ballot is one stored row. At most one exists per (voter, candidate).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ballot {
    pub voter_id: VoterId,
    pub candidate_id: CandidateId,
    pub category: Category,
    pub weight: u32,
    pub cast_at: DateTime<Utc>,
}

impl Ballot {
    /// Orders one voter's ballots by category, then by when they were cast.
    pub fn sort_by_category(ballots: &mut [Ballot]) {
        ballots.sort_by(|a, b| (a.category, a.cast_at, &a.candidate_id).cmp(&(b.category, b.cast_at, &b.candidate_id)));
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElectionPhase {
    Stopped,
    Running,
    Ended,
}

impl ElectionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElectionPhase::Stopped => "stopped",
            ElectionPhase::Running => "running",
            ElectionPhase::Ended => "ended",
        }
    }
}

impl FromStr for ElectionPhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stopped" => Ok(ElectionPhase::Stopped),
            "running" => Ok(ElectionPhase::Running),
            "ended" => Ok(ElectionPhase::Ended),
            other => Err(format!("unknown election phase '{}'", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElectionStatus {
    pub phase: ElectionPhase,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl Default for ElectionStatus {
    fn default() -> Self {
        ElectionStatus {
            phase: ElectionPhase::Stopped,
            started_at: None,
            ended_at: None,
        }
    }
}

/// BallotError is every way a ballot submission can be refused.
///
/// Everything except `Storage(StorageFault::Unavailable)` is permanent: resubmitting the same
/// input will be refused the same way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BallotError {
    #[error("invalid ballot: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("voter id '{0}' is reserved and may not vote")]
    Forbidden(String),

    #[error("voter record '{0}' is incomplete")]
    CorruptRecord(String),

    // Callers see a generic failure. The fault carries the cause for logs.
    #[error("storage failure")]
    Storage(StorageFault),
}

impl BallotError {
    pub fn is_permanent(&self) -> bool {
        match self {
            BallotError::InvalidInput(_)
            | BallotError::NotFound(_)
            | BallotError::Forbidden(_)
            | BallotError::CorruptRecord(_) => true,
            BallotError::Storage(fault) => fault.is_permanent(),
        }
    }
}

/// StorageFault is a failure inside the authoritative store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageFault {
    // Referential or uniqueness constraint. Retrying can't succeed.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StorageFault {
    pub fn is_permanent(&self) -> bool {
        matches!(self, StorageFault::ConstraintViolation(_))
    }
}

// ------- Conversions --------

impl From<StorageFault> for BallotError {
    fn from(fault: StorageFault) -> Self {
        BallotError::Storage(fault)
    }
}

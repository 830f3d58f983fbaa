use crate::matches::MatchStatus;
use crate::team::MAX_ROSTER_SIZE;

/// Validation and state errors raised by the domain model.
///
/// These are caught before anything touches storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Home and away teams must be different")]
    SameTeams,
    #[error("End date must be after start date")]
    InvalidDateRange,
    #[error("Invalid score: {0:?}")]
    InvalidScore(String),
    #[error("Maximum {} players allowed per team", MAX_ROSTER_SIZE)]
    RosterFull,
    #[error("Player not found: {0}")]
    PlayerNotFound(String),
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: MatchStatus, to: MatchStatus },
    #[error("Unknown {kind}: {value:?}")]
    UnknownVariant { kind: &'static str, value: String },
}

//! Closed filter states for the match, team and tournament lists.

use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::matches::{Match, MatchStatus};
use crate::team::Team;
use crate::tournament::{Tournament, TournamentStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchStatusFilter {
    #[default]
    All,
    Only(MatchStatus),
}

impl MatchStatusFilter {
    pub fn matches(self, m: &Match) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => m.status == status,
        }
    }
}

impl fmt::Display for MatchStatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => f.write_str(status.as_str()),
        }
    }
}

impl FromStr for MatchStatusFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// How the current user relates to a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TeamRelationFilter {
    #[default]
    All,
    Joined,
    Invitations,
    Left,
}

impl TeamRelationFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Joined => "joined",
            Self::Invitations => "invitations",
            Self::Left => "left",
        }
    }

    pub fn matches(self, team: &Team, user_id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Joined => team.is_member(user_id),
            Self::Invitations => team.is_invited(user_id),
            Self::Left => team.has_left(user_id),
        }
    }
}

impl fmt::Display for TeamRelationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TeamRelationFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::All, Self::Joined, Self::Invitations, Self::Left]
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| DomainError::UnknownVariant {
                kind: "team filter",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TournamentStatusFilter {
    #[default]
    All,
    Only(TournamentStatus),
}

impl TournamentStatusFilter {
    pub fn matches(self, t: &Tournament) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => t.status == status,
        }
    }
}

impl fmt::Display for TournamentStatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => f.write_str(status.as_str()),
        }
    }
}

impl FromStr for TournamentStatusFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

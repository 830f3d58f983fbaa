use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::team::require;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    Upcoming,
    Ongoing,
    Completed,
}

impl TournamentStatus {
    pub const ALL: [TournamentStatus; 3] = [Self::Upcoming, Self::Ongoing, Self::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TournamentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::UnknownVariant {
                kind: "tournament status",
                value: s.to_string(),
            })
    }
}

/// A tournament groups teams and matches by id. Neither list is checked
/// against the team or match collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: String,
    pub name: String,
    pub location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: TournamentStatus,
    #[serde(default)]
    pub teams: Vec<String>,
    #[serde(default)]
    pub matches: Vec<String>,
    pub invite_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prize: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub rules: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

impl Tournament {
    /// Build an upcoming tournament with no teams or matches.
    pub fn from_draft(
        id: impl Into<String>,
        invite_code: impl Into<String>,
        draft: &TournamentDraft,
    ) -> Result<Self, DomainError> {
        draft.validate()?;
        Ok(Self {
            id: id.into(),
            name: draft.name.trim().to_string(),
            location: draft.location.trim().to_string(),
            start_date: draft.start_date,
            end_date: draft.end_date,
            status: TournamentStatus::Upcoming,
            teams: Vec::new(),
            matches: Vec::new(),
            invite_code: invite_code.into(),
            prize: non_empty(&draft.prize),
            description: non_empty(&draft.description),
            rules: draft.rules.clone(),
            created_by: None,
        })
    }

    pub fn has_team(&self, team_id: &str) -> bool {
        self.teams.iter().any(|t| t == team_id)
    }

    /// Returns `false` if the team is already participating.
    pub fn add_team(&mut self, team_id: &str) -> bool {
        if self.has_team(team_id) {
            return false;
        }
        self.teams.push(team_id.to_string());
        true
    }

    /// Returns `false` if the match is already listed.
    pub fn add_match(&mut self, match_id: &str) -> bool {
        if self.matches.iter().any(|m| m == match_id) {
            return false;
        }
        self.matches.push(match_id.to_string());
        true
    }
}

/// User input for creating a tournament.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentDraft {
    pub name: String,
    pub location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub prize: Option<String>,
    pub description: Option<String>,
    pub rules: Vec<String>,
}

impl TournamentDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        require("Tournament name", &self.name)?;
        require("Location", &self.location)?;
        if self.end_date <= self.start_date {
            return Err(DomainError::InvalidDateRange);
        }
        Ok(())
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

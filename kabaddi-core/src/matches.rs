use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::team::require;

/// Match lifecycle. Strictly forward: scheduled -> in-progress -> completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    Completed,
}

impl MatchStatus {
    pub const ALL: [MatchStatus; 3] = [Self::Scheduled, Self::InProgress, Self::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    fn rank(self) -> u8 {
        match self {
            Self::Scheduled => 0,
            Self::InProgress => 1,
            Self::Completed => 2,
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            Self::Scheduled => Some(Self::InProgress),
            Self::InProgress => Some(Self::Completed),
            Self::Completed => None,
        }
    }

    /// Any strictly forward move is allowed, including skipping ahead.
    pub fn can_transition_to(self, to: Self) -> bool {
        to.rank() > self.rank()
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::UnknownVariant {
                kind: "match status",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub home_score: i32,
    pub away_score: i32,
    /// `None` means the match was tied.
    pub winner_team_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_raider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_defender: Option<String>,
}

/// Pick the winning team id from the final scores. Ties have no winner.
pub fn winner<'a>(
    home_team_id: &'a str,
    away_team_id: &'a str,
    home_score: i32,
    away_score: i32,
) -> Option<&'a str> {
    match home_score.cmp(&away_score) {
        Ordering::Greater => Some(home_team_id),
        Ordering::Less => Some(away_team_id),
        Ordering::Equal => None,
    }
}

/// Scores as entered by the user, parsed into integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreInput {
    pub home: i32,
    pub away: i32,
}

impl ScoreInput {
    pub fn new(home: i32, away: i32) -> Self {
        Self { home, away }
    }

    pub fn parse(home: &str, away: &str) -> Result<Self, DomainError> {
        Ok(Self {
            home: parse_score(home)?,
            away: parse_score(away)?,
        })
    }
}

fn parse_score(raw: &str) -> Result<i32, DomainError> {
    raw.trim()
        .parse()
        .map_err(|_| DomainError::InvalidScore(raw.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub home_team_id: String,
    pub away_team_id: String,
    pub location: String,
    pub ground_name: String,
    pub start_time: DateTime<Utc>,
    pub status: MatchStatus,
    #[serde(default)]
    pub result: Option<MatchResult>,
}

impl Match {
    /// Build a scheduled match from a validated draft.
    pub fn from_draft(id: impl Into<String>, draft: &MatchDraft) -> Result<Self, DomainError> {
        draft.validate()?;
        Ok(Self {
            id: id.into(),
            home_team_id: draft.home_team_id.trim().to_string(),
            away_team_id: draft.away_team_id.trim().to_string(),
            location: draft.location.trim().to_string(),
            ground_name: draft.ground_name.trim().to_string(),
            start_time: draft.start_time,
            status: MatchStatus::Scheduled,
            result: None,
        })
    }

    /// Apply edited fields. Status and result are left alone.
    pub fn apply_draft(&mut self, draft: &MatchDraft) -> Result<(), DomainError> {
        draft.validate()?;
        self.home_team_id = draft.home_team_id.trim().to_string();
        self.away_team_id = draft.away_team_id.trim().to_string();
        self.location = draft.location.trim().to_string();
        self.ground_name = draft.ground_name.trim().to_string();
        self.start_time = draft.start_time;
        Ok(())
    }

    /// Set the status without checking the transition.
    ///
    /// The result is not touched, so a match can be `completed` without one.
    pub fn set_status(&mut self, status: MatchStatus) {
        self.status = status;
    }

    /// Move the status forward, rejecting backward and same-state moves.
    pub fn advance_to(&mut self, to: MatchStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(to) {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }

    pub fn start(&mut self) -> Result<(), DomainError> {
        self.advance_to(MatchStatus::InProgress)
    }

    /// Record final scores and mark the match completed.
    ///
    /// The winner is fixed at this point; editing scores later means recording
    /// the result again.
    pub fn record_result(
        &mut self,
        scores: ScoreInput,
        best_raider: Option<String>,
        best_defender: Option<String>,
    ) -> &MatchResult {
        let winner_team_id = winner(
            &self.home_team_id,
            &self.away_team_id,
            scores.home,
            scores.away,
        )
        .map(str::to_string);
        self.status = MatchStatus::Completed;
        self.result.insert(MatchResult {
            home_score: scores.home,
            away_score: scores.away,
            winner_team_id,
            best_raider: best_raider.filter(|s| !s.trim().is_empty()),
            best_defender: best_defender.filter(|s| !s.trim().is_empty()),
        })
    }

    pub fn involves(&self, team_id: &str) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    pub fn winner_team_id(&self) -> Option<&str> {
        self.result.as_ref()?.winner_team_id.as_deref()
    }
}

/// User input for creating or editing a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDraft {
    pub home_team_id: String,
    pub away_team_id: String,
    pub location: String,
    pub ground_name: String,
    pub start_time: DateTime<Utc>,
}

impl MatchDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        require("Home team", &self.home_team_id)?;
        require("Away team", &self.away_team_id)?;
        require("Location", &self.location)?;
        require("Ground name", &self.ground_name)?;
        if self.home_team_id.trim() == self.away_team_id.trim() {
            return Err(DomainError::SameTeams);
        }
        Ok(())
    }
}

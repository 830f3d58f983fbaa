//! User intents on top of the storage helper.
//!
//! Each method validates its input first and only then touches storage, so a
//! rejected request leaves every collection unchanged. Edits to an existing
//! record run inside the collection lock from read to write, so two intents on
//! the same record never overwrite each other. Nothing here enforces
//! referential integrity: deleting a team leaves matches and tournaments that
//! point at it as they are.

use kabaddi_core::{
    generate_id, generate_invite_code, invite_codes_match, share_message, DomainError, Ground,
    InviteKind, Match, MatchDraft, MatchStatus, MatchStatusFilter, Player, PlayerDraft,
    ScoreInput, Team, TeamDraft, TeamRelationFilter, Tournament, TournamentDraft,
    TournamentStatus, TournamentStatusFilter,
};

use crate::error::PersistenceError;
use crate::helper::StorageHelper;
use crate::kv::KeyValueStore;
use crate::record::Record;

#[derive(Debug, thiserror::Error)]
pub enum OrganizerError {
    #[error(transparent)]
    Invalid(#[from] DomainError),
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("Storage error: {0}")]
    Persistence(#[from] PersistenceError),
}

pub type OrganizerResult<T> = Result<T, OrganizerError>;

/// A match with both teams resolved. A team is `None` if it was deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchDetails {
    pub fixture: Match,
    pub home: Option<Team>,
    pub away: Option<Team>,
}

/// A tournament with its team and match ids resolved. Dangling ids are skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct TournamentDetails {
    pub tournament: Tournament,
    pub teams: Vec<Team>,
    pub matches: Vec<Match>,
}

pub struct Organizer<S> {
    helper: StorageHelper<S>,
    user_id: String,
}

impl<S: KeyValueStore> Organizer<S> {
    pub fn new(helper: StorageHelper<S>, user_id: impl Into<String>) -> Self {
        Self {
            helper,
            user_id: user_id.into(),
        }
    }

    pub fn helper(&self) -> &StorageHelper<S> {
        &self.helper
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    async fn require<R: Record>(&self, id: &str) -> OrganizerResult<R> {
        self.helper
            .try_get_by_id::<R>(id)
            .await?
            .ok_or_else(|| OrganizerError::NotFound {
                kind: R::LABEL,
                id: id.to_string(),
            })
    }

    /// Change one record under the collection lock. Nothing is written if
    /// `apply` fails.
    async fn update<R: Record, T>(
        &self,
        id: &str,
        apply: impl FnOnce(&mut R) -> OrganizerResult<T>,
    ) -> OrganizerResult<T> {
        self.helper
            .try_update(id, apply)
            .await?
            .ok_or_else(|| OrganizerError::NotFound {
                kind: R::LABEL,
                id: id.to_string(),
            })
    }

    // ---- teams --------------------------------------------------------------

    pub async fn create_team(&self, draft: &TeamDraft) -> OrganizerResult<Team> {
        draft.validate()?;
        let mut team = Team::new(generate_id(), "", "");
        team.apply_draft(draft)?;
        team.invite_code = Some(generate_invite_code(&team.name));
        team.created_by = Some(self.user_id.clone());
        team.members.push(self.user_id.clone());

        self.helper.try_save_one(&team).await?;
        tracing::info!(team_id = %team.id, name = %team.name, "Created team");
        Ok(team)
    }

    pub async fn update_team(&self, team_id: &str, draft: &TeamDraft) -> OrganizerResult<Team> {
        draft.validate()?;
        self.update(team_id, |team: &mut Team| {
            team.apply_draft(draft)?;
            Ok(team.clone())
        })
        .await
    }

    /// Returns `true` if a team was removed. Matches referencing it are kept.
    pub async fn delete_team(&self, team_id: &str) -> OrganizerResult<bool> {
        let removed = self.helper.try_delete_one::<Team>(team_id).await?;
        Ok(removed > 0)
    }

    pub async fn add_player(&self, team_id: &str, draft: &PlayerDraft) -> OrganizerResult<Player> {
        draft.validate()?;
        let player = Player::new(draft.number.trim(), draft.name.trim());
        self.update(team_id, |team: &mut Team| Ok(team.add_player(player.clone())?))
            .await?;
        Ok(player)
    }

    pub async fn update_player(
        &self,
        team_id: &str,
        player_id: &str,
        draft: &PlayerDraft,
    ) -> OrganizerResult<Player> {
        draft.validate()?;
        let player = Player {
            id: player_id.to_string(),
            number: draft.number.trim().to_string(),
            name: draft.name.trim().to_string(),
        };
        self.update(team_id, |team: &mut Team| Ok(team.update_player(player.clone())?))
            .await?;
        Ok(player)
    }

    pub async fn remove_player(&self, team_id: &str, player_id: &str) -> OrganizerResult<bool> {
        self.update(team_id, |team: &mut Team| Ok(team.remove_player(player_id)))
            .await
    }

    pub async fn invite_to_team(&self, team_id: &str, user_id: &str) -> OrganizerResult<bool> {
        self.update(team_id, |team: &mut Team| Ok(team.invite(user_id)))
            .await
    }

    /// Join the team holding `code`. Returns `None` if no team has that code
    /// or the current user is already a member.
    pub async fn join_team_by_code(&self, code: &str) -> OrganizerResult<Option<Team>> {
        let joined = self
            .helper
            .try_update_where(
                |t: &Team| {
                    t.invite_code
                        .as_deref()
                        .is_some_and(|stored| invite_codes_match(stored, code))
                },
                |team: &mut Team| -> OrganizerResult<Option<Team>> {
                    Ok(team.join(&self.user_id).then(|| team.clone()))
                },
            )
            .await?
            .flatten();
        if let Some(team) = &joined {
            tracing::info!(team_id = %team.id, user = %self.user_id, "Joined team");
        }
        Ok(joined)
    }

    pub async fn leave_team(&self, team_id: &str) -> OrganizerResult<bool> {
        self.update(team_id, |team: &mut Team| Ok(team.leave(&self.user_id)))
            .await
    }

    pub async fn teams(&self, filter: TeamRelationFilter) -> Vec<Team> {
        self.helper
            .get_teams()
            .await
            .into_iter()
            .filter(|t| filter.matches(t, &self.user_id))
            .collect()
    }

    pub async fn team(&self, team_id: &str) -> OrganizerResult<Team> {
        self.require(team_id).await
    }

    /// Share text for a team's invite code, if it has one.
    pub async fn team_share_message(&self, team_id: &str) -> OrganizerResult<Option<String>> {
        let team: Team = self.require(team_id).await?;
        Ok(team
            .invite_code
            .as_deref()
            .map(|code| share_message(InviteKind::Team, &team.name, code)))
    }

    // ---- matches ------------------------------------------------------------

    pub async fn create_match(&self, draft: &MatchDraft) -> OrganizerResult<Match> {
        let fixture = Match::from_draft(generate_id(), draft)?;
        self.helper.try_save_one(&fixture).await?;
        tracing::info!(match_id = %fixture.id, "Created match");
        Ok(fixture)
    }

    pub async fn update_match(&self, match_id: &str, draft: &MatchDraft) -> OrganizerResult<Match> {
        draft.validate()?;
        self.update(match_id, |fixture: &mut Match| {
            fixture.apply_draft(draft)?;
            Ok(fixture.clone())
        })
        .await
    }

    pub async fn delete_match(&self, match_id: &str) -> OrganizerResult<bool> {
        let removed = self.helper.try_delete_one::<Match>(match_id).await?;
        Ok(removed > 0)
    }

    /// Overwrite the status without transition checks. The result is left as is.
    pub async fn set_match_status(
        &self,
        match_id: &str,
        status: MatchStatus,
    ) -> OrganizerResult<Match> {
        self.update(match_id, |fixture: &mut Match| {
            fixture.set_status(status);
            Ok(fixture.clone())
        })
        .await
    }

    /// Move a scheduled match to in-progress.
    pub async fn start_match(&self, match_id: &str) -> OrganizerResult<Match> {
        self.update(match_id, |fixture: &mut Match| {
            fixture.start()?;
            Ok(fixture.clone())
        })
        .await
    }

    /// Record final scores. The winner is computed now and the match completed.
    pub async fn record_result(
        &self,
        match_id: &str,
        scores: ScoreInput,
        best_raider: Option<String>,
        best_defender: Option<String>,
    ) -> OrganizerResult<Match> {
        let fixture = self
            .update(match_id, |fixture: &mut Match| {
                fixture.record_result(scores, best_raider, best_defender);
                Ok(fixture.clone())
            })
            .await?;
        tracing::info!(
            match_id = %fixture.id,
            home = scores.home,
            away = scores.away,
            winner = ?fixture.winner_team_id(),
            "Recorded result"
        );
        Ok(fixture)
    }

    pub async fn matches(&self, filter: MatchStatusFilter) -> Vec<Match> {
        self.helper
            .get_matches()
            .await
            .into_iter()
            .filter(|m| filter.matches(m))
            .collect()
    }

    pub async fn match_details(&self, match_id: &str) -> OrganizerResult<MatchDetails> {
        let fixture: Match = self.require(match_id).await?;
        let teams: Vec<Team> = self.helper.try_get_all().await?;
        let find = |id: &str| teams.iter().find(|t| t.id == id).cloned();
        Ok(MatchDetails {
            home: find(&fixture.home_team_id),
            away: find(&fixture.away_team_id),
            fixture,
        })
    }

    // ---- tournaments --------------------------------------------------------

    pub async fn create_tournament(&self, draft: &TournamentDraft) -> OrganizerResult<Tournament> {
        let code = generate_invite_code(&draft.name);
        let mut tournament = Tournament::from_draft(generate_id(), code, draft)?;
        tournament.created_by = Some(self.user_id.clone());
        self.helper.try_save_one(&tournament).await?;
        tracing::info!(tournament_id = %tournament.id, name = %tournament.name, "Created tournament");
        Ok(tournament)
    }

    /// Enter `team_id` into the tournament holding `code`. Returns `None` if
    /// the code is unknown or the team already participates.
    pub async fn join_tournament_by_code(
        &self,
        code: &str,
        team_id: &str,
    ) -> OrganizerResult<Option<Tournament>> {
        let joined = self
            .helper
            .try_update_where(
                |t: &Tournament| invite_codes_match(&t.invite_code, code),
                |tournament: &mut Tournament| -> OrganizerResult<Option<Tournament>> {
                    Ok(tournament.add_team(team_id).then(|| tournament.clone()))
                },
            )
            .await?
            .flatten();
        if let Some(tournament) = &joined {
            tracing::info!(tournament_id = %tournament.id, team_id, "Team joined tournament");
        }
        Ok(joined)
    }

    pub async fn add_match_to_tournament(
        &self,
        tournament_id: &str,
        match_id: &str,
    ) -> OrganizerResult<bool> {
        self.update(tournament_id, |tournament: &mut Tournament| {
            Ok(tournament.add_match(match_id))
        })
        .await
    }

    pub async fn set_tournament_status(
        &self,
        tournament_id: &str,
        status: TournamentStatus,
    ) -> OrganizerResult<Tournament> {
        self.update(tournament_id, |tournament: &mut Tournament| {
            tournament.status = status;
            Ok(tournament.clone())
        })
        .await
    }

    pub async fn delete_tournament(&self, tournament_id: &str) -> OrganizerResult<bool> {
        let removed = self
            .helper
            .try_delete_one::<Tournament>(tournament_id)
            .await?;
        Ok(removed > 0)
    }

    pub async fn tournaments(&self, filter: TournamentStatusFilter) -> Vec<Tournament> {
        self.helper
            .get_tournaments()
            .await
            .into_iter()
            .filter(|t| filter.matches(t))
            .collect()
    }

    pub async fn tournament_details(&self, tournament_id: &str) -> OrganizerResult<TournamentDetails> {
        let tournament: Tournament = self.require(tournament_id).await?;
        let all_teams: Vec<Team> = self.helper.try_get_all().await?;
        let all_matches: Vec<Match> = self.helper.try_get_all().await?;

        let teams = tournament
            .teams
            .iter()
            .filter_map(|id| all_teams.iter().find(|t| &t.id == id).cloned())
            .collect();
        let matches = tournament
            .matches
            .iter()
            .filter_map(|id| all_matches.iter().find(|m| &m.id == id).cloned())
            .collect();

        Ok(TournamentDetails {
            tournament,
            teams,
            matches,
        })
    }

    pub async fn tournament_share_message(&self, tournament_id: &str) -> OrganizerResult<String> {
        let tournament: Tournament = self.require(tournament_id).await?;
        Ok(share_message(
            InviteKind::Tournament,
            &tournament.name,
            &tournament.invite_code,
        ))
    }

    // ---- grounds ------------------------------------------------------------

    pub async fn grounds(&self) -> Vec<Ground> {
        self.helper.get_grounds().await
    }

    pub async fn ground(&self, ground_id: &str) -> OrganizerResult<Ground> {
        self.require(ground_id).await
    }

    /// The ground's upcoming matches that still exist.
    pub async fn ground_upcoming_matches(&self, ground_id: &str) -> OrganizerResult<Vec<Match>> {
        let ground: Ground = self.require(ground_id).await?;
        let all_matches: Vec<Match> = self.helper.try_get_all().await?;
        Ok(ground
            .upcoming_matches
            .iter()
            .filter_map(|id| all_matches.iter().find(|m| &m.id == id).cloned())
            .collect())
    }
}

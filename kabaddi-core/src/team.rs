use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::generate_id;

/// Maximum number of players on a team roster.
pub const MAX_ROSTER_SIZE: usize = 12;

/// A rostered player. Owned by exactly one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    /// Jersey number, kept as entered.
    pub number: String,
    pub name: String,
}

impl Player {
    pub fn new(number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            number: number.into(),
            name: name.into(),
        }
    }
}

/// User input for adding or editing a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerDraft {
    pub number: String,
    pub name: String,
}

impl PlayerDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        require("Player name", &self.name)?;
        require("Jersey number", &self.number)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// User ids that joined the team.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
    /// User ids with a pending invitation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invited: Vec<String>,
    /// User ids that left the team.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub former_members: Vec<String>,
}

impl Team {
    pub fn new(id: impl Into<String>, name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            city: city.into(),
            players: Vec::new(),
            description: None,
            invite_code: None,
            created_by: None,
            members: Vec::new(),
            invited: Vec::new(),
            former_members: Vec::new(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= MAX_ROSTER_SIZE
    }

    /// Append a player to the roster, refusing once the roster is full.
    pub fn add_player(&mut self, player: Player) -> Result<(), DomainError> {
        if self.is_full() {
            return Err(DomainError::RosterFull);
        }
        self.players.push(player);
        Ok(())
    }

    /// Replace the player with the same id, keeping roster order.
    pub fn update_player(&mut self, player: Player) -> Result<(), DomainError> {
        let slot = self
            .players
            .iter_mut()
            .find(|p| p.id == player.id)
            .ok_or_else(|| DomainError::PlayerNotFound(player.id.clone()))?;
        *slot = player;
        Ok(())
    }

    /// Returns `true` if a player was removed.
    pub fn remove_player(&mut self, player_id: &str) -> bool {
        let before = self.players.len();
        self.players.retain(|p| p.id != player_id);
        self.players.len() != before
    }

    /// Apply edited team-level fields. The roster is left untouched.
    pub fn apply_draft(&mut self, draft: &TeamDraft) -> Result<(), DomainError> {
        draft.validate()?;
        self.name = draft.name.trim().to_string();
        self.city = draft.city.trim().to_string();
        self.description = draft.description.clone();
        Ok(())
    }

    pub fn is_creator(&self, user_id: &str) -> bool {
        self.created_by.as_deref() == Some(user_id)
    }

    pub fn is_member(&self, user_id: &str) -> bool {
        self.is_creator(user_id) || self.members.iter().any(|m| m == user_id)
    }

    pub fn is_invited(&self, user_id: &str) -> bool {
        self.invited.iter().any(|m| m == user_id)
    }

    pub fn has_left(&self, user_id: &str) -> bool {
        self.former_members.iter().any(|m| m == user_id)
    }

    /// Record a pending invitation. Returns `false` for existing members or
    /// users already invited.
    pub fn invite(&mut self, user_id: &str) -> bool {
        if self.is_member(user_id) || self.is_invited(user_id) {
            return false;
        }
        self.invited.push(user_id.to_string());
        true
    }

    /// Add a member. Returns `false` if the user is already a member.
    ///
    /// Joining clears any pending invitation and any earlier departure.
    pub fn join(&mut self, user_id: &str) -> bool {
        if self.is_member(user_id) {
            return false;
        }
        self.invited.retain(|u| u != user_id);
        self.former_members.retain(|u| u != user_id);
        self.members.push(user_id.to_string());
        true
    }

    /// Move a member to the former-members list. Returns `false` if the user
    /// was not a (non-creator) member.
    pub fn leave(&mut self, user_id: &str) -> bool {
        if self.is_creator(user_id) {
            return false;
        }
        let before = self.members.len();
        self.members.retain(|u| u != user_id);
        if self.members.len() == before {
            return false;
        }
        if !self.has_left(user_id) {
            self.former_members.push(user_id.to_string());
        }
        true
    }
}

/// User input for creating or editing a team.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TeamDraft {
    pub name: String,
    pub city: String,
    pub description: Option<String>,
}

impl TeamDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        require("Team name", &self.name)?;
        require("City", &self.city)?;
        Ok(())
    }
}

pub(crate) fn require(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::MissingField(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team_with_players(n: usize) -> Team {
        let mut team = Team::new("t1", "Thunderbolts", "Mumbai");
        for i in 0..n {
            team.add_player(Player {
                id: format!("p{i}"),
                number: i.to_string(),
                name: format!("Player {i}"),
            })
            .unwrap();
        }
        team
    }

    #[test]
    fn test_roster_cap() {
        let mut team = team_with_players(MAX_ROSTER_SIZE);
        assert!(team.is_full());
        let err = team.add_player(Player::new("99", "Extra")).unwrap_err();
        assert_eq!(err, DomainError::RosterFull);
        assert_eq!(team.players.len(), MAX_ROSTER_SIZE);
    }

    #[test]
    fn test_update_player_keeps_order() {
        let mut team = team_with_players(3);
        team.update_player(Player {
            id: "p1".into(),
            number: "7".into(),
            name: "Arjun Singh".into(),
        })
        .unwrap();
        assert_eq!(team.players[1].name, "Arjun Singh");
        assert_eq!(team.players[0].id, "p0");
        assert_eq!(team.players[2].id, "p2");
    }

    #[test]
    fn test_update_missing_player() {
        let mut team = team_with_players(1);
        let err = team.update_player(Player::new("1", "Ghost")).unwrap_err();
        assert!(matches!(err, DomainError::PlayerNotFound(_)));
    }

    #[test]
    fn test_remove_player() {
        let mut team = team_with_players(2);
        assert!(team.remove_player("p0"));
        assert!(!team.remove_player("p0"));
        assert_eq!(team.players.len(), 1);
    }

    #[test]
    fn test_membership_lifecycle() {
        let mut team = Team::new("t1", "Thunderbolts", "Mumbai");
        team.created_by = Some("owner".into());

        assert!(team.is_member("owner"));
        assert!(!team.invite("owner"));

        assert!(team.invite("alice"));
        assert!(!team.invite("alice"));
        assert!(team.join("alice"));
        assert!(!team.is_invited("alice"));
        assert!(!team.join("alice"));

        assert!(team.leave("alice"));
        assert!(team.has_left("alice"));
        assert!(!team.is_member("alice"));
        assert!(!team.leave("alice"));

        assert!(team.join("alice"));
        assert!(!team.has_left("alice"));
    }

    #[test]
    fn test_draft_requires_name_and_city() {
        let draft = TeamDraft {
            name: "  ".into(),
            city: "Mumbai".into(),
            description: None,
        };
        assert_eq!(
            draft.validate().unwrap_err(),
            DomainError::MissingField("Team name")
        );
    }

    #[test]
    fn test_reads_legacy_json_without_optional_fields() {
        let json = r#"{"id":"t1","name":"Thunderbolts","city":"Mumbai","players":[{"id":"p1","number":"7","name":"Arjun Singh"}]}"#;
        let team: Team = serde_json::from_str(json).unwrap();
        assert_eq!(team.players.len(), 1);
        assert!(team.invite_code.is_none());
        assert!(team.members.is_empty());
    }

    #[test]
    fn test_serializes_camel_case() {
        let mut team = Team::new("t1", "Thunderbolts", "Mumbai");
        team.invite_code = Some("THU-ABCDEF".into());
        team.former_members.push("bob".into());
        let json = serde_json::to_value(&team).unwrap();
        assert_eq!(json["inviteCode"], "THU-ABCDEF");
        assert_eq!(json["formerMembers"][0], "bob");
        assert!(json.get("createdBy").is_none());
    }
}

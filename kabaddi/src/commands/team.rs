use clap::Subcommand;
use kabaddi_core::{PlayerDraft, Team, TeamDraft, TeamRelationFilter, MAX_ROSTER_SIZE};
use kabaddi_store::KeyValueStore;
use serde_json::json;

use super::{or_dash, CommandError, Context};

#[derive(Subcommand)]
pub enum TeamAction {
    /// Create a team owned by the current user.
    Create {
        name: String,
        city: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List teams, optionally by your relation to them.
    List {
        /// all, joined, invitations or left
        #[arg(long, default_value_t = TeamRelationFilter::All)]
        filter: TeamRelationFilter,
    },
    /// Show a team and its roster.
    Show { team_id: String },
    /// Edit a team's name, city or description.
    Update {
        team_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a team. Matches that reference it are kept.
    Delete { team_id: String },
    /// Add a player to the roster.
    AddPlayer {
        team_id: String,
        number: String,
        name: String,
    },
    /// Change a player's jersey number or name.
    UpdatePlayer {
        team_id: String,
        player_id: String,
        number: String,
        name: String,
    },
    /// Remove a player from the roster.
    RemovePlayer { team_id: String, player_id: String },
    /// Invite a user to the team.
    Invite { team_id: String, user: String },
    /// Join a team with its invite code.
    Join { code: String },
    /// Leave a team you joined.
    Leave { team_id: String },
    /// Print the invite message for a team.
    Share { team_id: String },
}

pub async fn run<S: KeyValueStore>(ctx: &Context<S>, action: TeamAction) -> anyhow::Result<()> {
    let org = &ctx.org;
    match action {
        TeamAction::Create {
            name,
            city,
            description,
        } => {
            let team = org
                .create_team(&TeamDraft {
                    name,
                    city,
                    description,
                })
                .await?;
            ctx.emit(&team, || {
                format!(
                    "Created team {} ({})\nInvite code: {}",
                    team.name,
                    team.id,
                    or_dash(team.invite_code.as_deref())
                )
            })
        }
        TeamAction::List { filter } => {
            let teams = org.teams(filter).await;
            ctx.emit(&teams, || {
                if teams.is_empty() {
                    return format!("No teams ({filter})");
                }
                teams.iter().map(team_line).collect::<Vec<_>>().join("\n")
            })
        }
        TeamAction::Show { team_id } => {
            let team = org.team(&team_id).await?;
            ctx.emit(&team, || team_card(&team))
        }
        TeamAction::Update {
            team_id,
            name,
            city,
            description,
        } => {
            let current = org.team(&team_id).await?;
            let draft = TeamDraft {
                name: name.unwrap_or(current.name),
                city: city.unwrap_or(current.city),
                description: description.or(current.description),
            };
            let team = org.update_team(&team_id, &draft).await?;
            ctx.emit(&team, || format!("Updated team {}", team.name))
        }
        TeamAction::Delete { team_id } => {
            if !org.delete_team(&team_id).await? {
                return Err(CommandError::Rejected(format!("team not found: {team_id}")).into());
            }
            ctx.emit(&json!({ "deleted": team_id }), || {
                format!("Deleted team {team_id}")
            })
        }
        TeamAction::AddPlayer {
            team_id,
            number,
            name,
        } => {
            let player = org
                .add_player(&team_id, &PlayerDraft { number, name })
                .await?;
            ctx.emit(&player, || {
                format!("Added #{} {} ({})", player.number, player.name, player.id)
            })
        }
        TeamAction::UpdatePlayer {
            team_id,
            player_id,
            number,
            name,
        } => {
            let player = org
                .update_player(&team_id, &player_id, &PlayerDraft { number, name })
                .await?;
            ctx.emit(&player, || format!("Updated #{} {}", player.number, player.name))
        }
        TeamAction::RemovePlayer { team_id, player_id } => {
            if !org.remove_player(&team_id, &player_id).await? {
                return Err(CommandError::Rejected(format!("player not found: {player_id}")).into());
            }
            ctx.emit(&json!({ "removed": player_id }), || {
                format!("Removed player {player_id}")
            })
        }
        TeamAction::Invite { team_id, user } => {
            if org.invite_to_team(&team_id, &user).await? {
                ctx.note(format!("Invited {user}"));
            } else {
                ctx.note(format!("{user} is already a member or invited"));
            }
            Ok(())
        }
        TeamAction::Join { code } => match org.join_team_by_code(&code).await? {
            Some(team) => ctx.emit(&team, || format!("Joined {}", team.name)),
            None => Err(CommandError::UnknownInviteCode { kind: "team", code }.into()),
        },
        TeamAction::Leave { team_id } => {
            if !org.leave_team(&team_id).await? {
                return Err(CommandError::Rejected(format!(
                    "{} is not a member who can leave {team_id}",
                    org.user_id()
                ))
                .into());
            }
            ctx.note(format!("Left team {team_id}"));
            Ok(())
        }
        TeamAction::Share { team_id } => match org.team_share_message(&team_id).await? {
            Some(message) => ctx.emit(&message, || message.clone()),
            None => Err(CommandError::Rejected(format!("team {team_id} has no invite code")).into()),
        },
    }
}

fn team_line(team: &Team) -> String {
    format!(
        "{}  {} ({})  {}/{} players",
        team.id,
        team.name,
        team.city,
        team.players.len(),
        MAX_ROSTER_SIZE
    )
}

fn team_card(team: &Team) -> String {
    let mut out = format!(
        "{} - {}\nid: {}\ninvite code: {}\n",
        team.name,
        team.city,
        team.id,
        or_dash(team.invite_code.as_deref())
    );
    if let Some(description) = team.description.as_deref() {
        out.push_str(description);
        out.push('\n');
    }
    out.push_str(&format!("players ({}/{}):", team.players.len(), MAX_ROSTER_SIZE));
    for player in &team.players {
        out.push_str(&format!("\n  #{:<3} {}  [{}]", player.number, player.name, player.id));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kabaddi_core::Player;

    #[test]
    fn test_team_card_lists_roster() {
        let mut team = Team::new("t1", "Thunderbolts", "Mumbai");
        team.players.push(Player {
            id: "p1".into(),
            number: "7".into(),
            name: "Arjun Singh".into(),
        });
        let card = team_card(&team);
        assert!(card.starts_with("Thunderbolts - Mumbai"));
        assert!(card.contains("players (1/12):"));
        assert!(card.contains("#7   Arjun Singh  [p1]"));
    }

    #[test]
    fn test_team_line() {
        let team = Team::new("t2", "Desert Storm", "Jaipur");
        assert_eq!(team_line(&team), "t2  Desert Storm (Jaipur)  0/12 players");
    }
}

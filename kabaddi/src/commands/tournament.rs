use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::Subcommand;
use kabaddi_core::{Tournament, TournamentDraft, TournamentStatus, TournamentStatusFilter};
use kabaddi_store::{KeyValueStore, TournamentDetails};
use serde_json::json;

use super::{or_dash, CommandError, Context};

#[derive(Subcommand)]
pub enum TournamentAction {
    /// Create a tournament owned by the current user.
    Create {
        name: String,
        #[arg(long)]
        location: String,
        /// First day, YYYY-MM-DD
        #[arg(long)]
        start: NaiveDate,
        /// Last day, YYYY-MM-DD
        #[arg(long)]
        end: NaiveDate,
        #[arg(long)]
        prize: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Repeat for each rule.
        #[arg(long = "rule")]
        rules: Vec<String>,
    },
    /// List tournaments.
    List {
        /// all, upcoming, ongoing or completed
        #[arg(long, default_value_t = TournamentStatusFilter::All)]
        status: TournamentStatusFilter,
    },
    /// Show a tournament with its teams and matches.
    Show { tournament_id: String },
    /// Enter a team using the tournament's invite code.
    Join { code: String, team_id: String },
    /// Attach a match to a tournament.
    AddMatch {
        tournament_id: String,
        match_id: String,
    },
    /// Set a tournament's status.
    Status {
        tournament_id: String,
        status: TournamentStatus,
    },
    /// Delete a tournament.
    Delete { tournament_id: String },
    /// Print the invite message for a tournament.
    Share { tournament_id: String },
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
}

pub async fn run<S: KeyValueStore>(ctx: &Context<S>, action: TournamentAction) -> anyhow::Result<()> {
    let org = &ctx.org;
    match action {
        TournamentAction::Create {
            name,
            location,
            start,
            end,
            prize,
            description,
            rules,
        } => {
            let tournament = org
                .create_tournament(&TournamentDraft {
                    name,
                    location,
                    start_date: day_start(start),
                    end_date: day_start(end),
                    prize,
                    description,
                    rules,
                })
                .await?;
            ctx.emit(&tournament, || {
                format!(
                    "Created tournament {} ({})\nInvite code: {}",
                    tournament.name, tournament.id, tournament.invite_code
                )
            })
        }
        TournamentAction::List { status } => {
            let tournaments = org.tournaments(status).await;
            ctx.emit(&tournaments, || {
                if tournaments.is_empty() {
                    return format!("No tournaments ({status})");
                }
                tournaments
                    .iter()
                    .map(tournament_line)
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
        TournamentAction::Show { tournament_id } => {
            let details = org.tournament_details(&tournament_id).await?;
            let value = json!({
                "tournament": details.tournament,
                "teams": details.teams,
                "matches": details.matches,
            });
            ctx.emit(&value, || tournament_card(&details))
        }
        TournamentAction::Join { code, team_id } => {
            match org.join_tournament_by_code(&code, &team_id).await? {
                Some(tournament) => {
                    ctx.emit(&tournament, || format!("{team_id} joined {}", tournament.name))
                }
                None => Err(CommandError::UnknownInviteCode {
                    kind: "tournament",
                    code,
                }
                .into()),
            }
        }
        TournamentAction::AddMatch {
            tournament_id,
            match_id,
        } => {
            if org.add_match_to_tournament(&tournament_id, &match_id).await? {
                ctx.note(format!("Added match {match_id}"));
            } else {
                ctx.note(format!("Match {match_id} is already listed"));
            }
            Ok(())
        }
        TournamentAction::Status {
            tournament_id,
            status,
        } => {
            let tournament = org.set_tournament_status(&tournament_id, status).await?;
            ctx.emit(&tournament, || {
                format!("Tournament {} is {}", tournament.name, tournament.status)
            })
        }
        TournamentAction::Delete { tournament_id } => {
            if !org.delete_tournament(&tournament_id).await? {
                return Err(
                    CommandError::Rejected(format!("tournament not found: {tournament_id}")).into(),
                );
            }
            ctx.emit(&json!({ "deleted": tournament_id }), || {
                format!("Deleted tournament {tournament_id}")
            })
        }
        TournamentAction::Share { tournament_id } => {
            let message = org.tournament_share_message(&tournament_id).await?;
            ctx.emit(&message, || message.clone())
        }
    }
}

fn tournament_line(t: &Tournament) -> String {
    format!(
        "{}  {}  [{}]  {} to {}  {} teams",
        t.id,
        t.name,
        t.status,
        t.start_date.format("%Y-%m-%d"),
        t.end_date.format("%Y-%m-%d"),
        t.teams.len()
    )
}

fn tournament_card(details: &TournamentDetails) -> String {
    let t = &details.tournament;
    let mut out = format!(
        "{} ({})\nid: {}\nlocation: {}\ndates: {} to {}\nprize: {}\ninvite code: {}",
        t.name,
        t.status,
        t.id,
        t.location,
        t.start_date.format("%Y-%m-%d"),
        t.end_date.format("%Y-%m-%d"),
        or_dash(t.prize.as_deref()),
        t.invite_code
    );
    if !t.rules.is_empty() {
        out.push_str("\nrules:");
        for rule in &t.rules {
            out.push_str(&format!("\n  - {rule}"));
        }
    }
    out.push_str(&format!("\nteams ({}):", details.teams.len()));
    for team in &details.teams {
        out.push_str(&format!("\n  {}  {}", team.id, team.name));
    }
    out.push_str(&format!("\nmatches ({}):", details.matches.len()));
    for m in &details.matches {
        out.push_str(&format!(
            "\n  {}  {} vs {}  [{}]",
            m.id, m.home_team_id, m.away_team_id, m.status
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_day_start_is_midnight_utc() {
        let date = NaiveDate::from_ymd_opt(2026, 11, 2).unwrap();
        let start = day_start(date);
        assert_eq!(start.to_rfc3339(), "2026-11-02T00:00:00+00:00");
        assert_eq!(start.day(), 2);
    }

    #[test]
    fn test_tournament_line() {
        let start = day_start(NaiveDate::from_ymd_opt(2026, 11, 2).unwrap());
        let end = day_start(NaiveDate::from_ymd_opt(2026, 11, 5).unwrap());
        let draft = TournamentDraft {
            name: "Monsoon Cup".into(),
            location: "Pune".into(),
            start_date: start,
            end_date: end,
            prize: None,
            description: None,
            rules: Vec::new(),
        };
        let t = Tournament::from_draft("x1", "MON-ABC123", &draft).unwrap();
        assert_eq!(
            tournament_line(&t),
            "x1  Monsoon Cup  [upcoming]  2026-11-02 to 2026-11-05  0 teams"
        );
    }
}

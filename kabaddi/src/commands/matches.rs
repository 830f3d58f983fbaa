use chrono::{DateTime, Utc};
use clap::Subcommand;
use kabaddi_core::{Match, MatchDraft, MatchStatus, MatchStatusFilter, ScoreInput, Team};
use kabaddi_store::{KeyValueStore, MatchDetails};
use serde_json::json;

use super::{or_dash, CommandError, Context};

#[derive(Subcommand)]
pub enum MatchAction {
    /// Schedule a match between two teams.
    Create {
        home_team_id: String,
        away_team_id: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        ground: String,
        /// RFC 3339 start time, e.g. 2026-11-02T18:30:00Z
        #[arg(long)]
        start: DateTime<Utc>,
    },
    /// List matches.
    List {
        /// all, scheduled, in-progress or completed
        #[arg(long, default_value_t = MatchStatusFilter::All)]
        status: MatchStatusFilter,
    },
    /// Edit a match's teams, venue or start time. Status and result are kept.
    Update {
        match_id: String,
        #[arg(long)]
        home: Option<String>,
        #[arg(long)]
        away: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        ground: Option<String>,
        /// RFC 3339 start time
        #[arg(long)]
        start: Option<DateTime<Utc>>,
    },
    /// Show a match with both teams.
    Show { match_id: String },
    /// Move a scheduled match to in-progress.
    Start { match_id: String },
    /// Record the final score and complete the match.
    Complete {
        match_id: String,
        home_score: String,
        away_score: String,
        #[arg(long)]
        best_raider: Option<String>,
        #[arg(long)]
        best_defender: Option<String>,
    },
    /// Overwrite a match's status without transition checks.
    Status { match_id: String, status: MatchStatus },
    /// Show the recorded result of a match.
    Result { match_id: String },
    /// Delete a match.
    Delete { match_id: String },
}

pub async fn run<S: KeyValueStore>(ctx: &Context<S>, action: MatchAction) -> anyhow::Result<()> {
    let org = &ctx.org;
    match action {
        MatchAction::Create {
            home_team_id,
            away_team_id,
            location,
            ground,
            start,
        } => {
            let fixture = org
                .create_match(&MatchDraft {
                    home_team_id,
                    away_team_id,
                    location,
                    ground_name: ground,
                    start_time: start,
                })
                .await?;
            ctx.emit(&fixture, || format!("Scheduled match {}", fixture.id))
        }
        MatchAction::List { status } => {
            let matches = org.matches(status).await;
            let teams = org.helper().get_teams().await;
            ctx.emit(&matches, || {
                if matches.is_empty() {
                    return format!("No matches ({status})");
                }
                matches
                    .iter()
                    .map(|m| match_line(m, &teams))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
        MatchAction::Update {
            match_id,
            home,
            away,
            location,
            ground,
            start,
        } => {
            let current = org.match_details(&match_id).await?.fixture;
            let draft = MatchDraft {
                home_team_id: home.unwrap_or(current.home_team_id),
                away_team_id: away.unwrap_or(current.away_team_id),
                location: location.unwrap_or(current.location),
                ground_name: ground.unwrap_or(current.ground_name),
                start_time: start.unwrap_or(current.start_time),
            };
            let fixture = org.update_match(&match_id, &draft).await?;
            ctx.emit(&fixture, || format!("Updated match {}", fixture.id))
        }
        MatchAction::Show { match_id } => {
            let details = org.match_details(&match_id).await?;
            let value = json!({
                "match": details.fixture,
                "homeTeam": details.home,
                "awayTeam": details.away,
            });
            ctx.emit(&value, || match_card(&details))
        }
        MatchAction::Start { match_id } => {
            let fixture = org.start_match(&match_id).await?;
            ctx.emit(&fixture, || format!("Match {} is {}", fixture.id, fixture.status))
        }
        MatchAction::Complete {
            match_id,
            home_score,
            away_score,
            best_raider,
            best_defender,
        } => {
            let scores = ScoreInput::parse(&home_score, &away_score)?;
            let fixture = org
                .record_result(&match_id, scores, best_raider, best_defender)
                .await?;
            ctx.emit(&fixture, || {
                format!(
                    "Final {}-{}, winner: {}",
                    scores.home,
                    scores.away,
                    fixture.winner_team_id().unwrap_or("draw")
                )
            })
        }
        MatchAction::Status { match_id, status } => {
            let fixture = org.set_match_status(&match_id, status).await?;
            ctx.emit(&fixture, || format!("Match {} is {}", fixture.id, fixture.status))
        }
        MatchAction::Result { match_id } => {
            let details = org.match_details(&match_id).await?;
            let Some(result) = details.fixture.result.as_ref() else {
                return Err(CommandError::Rejected(format!("match {match_id} has no result")).into());
            };
            ctx.emit(result, || result_text(&details))
        }
        MatchAction::Delete { match_id } => {
            if !org.delete_match(&match_id).await? {
                return Err(CommandError::Rejected(format!("match not found: {match_id}")).into());
            }
            ctx.emit(&json!({ "deleted": match_id }), || {
                format!("Deleted match {match_id}")
            })
        }
    }
}

fn team_name<'a>(teams: &'a [Team], id: &'a str) -> &'a str {
    teams
        .iter()
        .find(|t| t.id == id)
        .map(|t| t.name.as_str())
        .unwrap_or(id)
}

fn match_line(m: &Match, teams: &[Team]) -> String {
    let score = m
        .result
        .as_ref()
        .map(|r| format!("  {}-{}", r.home_score, r.away_score))
        .unwrap_or_default();
    format!(
        "{}  {} vs {}  [{}]  {}{}",
        m.id,
        team_name(teams, &m.home_team_id),
        team_name(teams, &m.away_team_id),
        m.status,
        m.start_time.format("%Y-%m-%d %H:%M"),
        score
    )
}

fn side_name<'a>(team: Option<&'a Team>, id: &'a str) -> &'a str {
    team.map(|t| t.name.as_str()).unwrap_or(id)
}

fn match_card(details: &MatchDetails) -> String {
    let m = &details.fixture;
    let mut out = format!(
        "{} vs {}\nid: {}\nstatus: {}\nstart: {}\nground: {}, {}",
        side_name(details.home.as_ref(), &m.home_team_id),
        side_name(details.away.as_ref(), &m.away_team_id),
        m.id,
        m.status,
        m.start_time.to_rfc3339(),
        m.ground_name,
        m.location
    );
    if m.result.is_some() {
        out.push('\n');
        out.push_str(&result_text(details));
    }
    out
}

fn result_text(details: &MatchDetails) -> String {
    let m = &details.fixture;
    let Some(result) = m.result.as_ref() else {
        return "no result".to_string();
    };
    let winner = match result.winner_team_id.as_deref() {
        Some(id) if id == m.home_team_id => side_name(details.home.as_ref(), id),
        Some(id) if id == m.away_team_id => side_name(details.away.as_ref(), id),
        Some(id) => id,
        None => "draw",
    };
    format!(
        "score: {}-{}\nwinner: {}\nbest raider: {}\nbest defender: {}",
        result.home_score,
        result.away_score,
        winner,
        or_dash(result.best_raider.as_deref()),
        or_dash(result.best_defender.as_deref())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kabaddi_store::fixtures;

    fn details(id: &str) -> MatchDetails {
        let teams = fixtures::sample_teams();
        let fixture = fixtures::sample_matches()
            .into_iter()
            .find(|m| m.id == id)
            .unwrap();
        let find = |id: &str| teams.iter().find(|t| t.id == id).cloned();
        MatchDetails {
            home: find(&fixture.home_team_id),
            away: find(&fixture.away_team_id),
            fixture,
        }
    }

    #[test]
    fn test_result_text_names_winner() {
        let text = result_text(&details("m2"));
        assert!(text.contains("score: 35-32"));
        assert!(text.contains("winner: Desert Storm"));
        assert!(text.contains("best raider: Vikram Rathore"));
    }

    #[test]
    fn test_match_card_with_deleted_team() {
        let mut d = details("m1");
        d.home = None;
        let card = match_card(&d);
        assert!(card.starts_with("t1 vs Desert Storm"));
        assert!(card.contains("status: scheduled"));
        assert!(!card.contains("score:"));
    }

    #[test]
    fn test_match_line_shows_score() {
        let teams = fixtures::sample_teams();
        let m2 = details("m2").fixture;
        let line = match_line(&m2, &teams);
        assert!(line.starts_with("m2  Desert Storm vs Thunderbolts  [completed]"));
        assert!(line.ends_with("35-32"));
    }
}

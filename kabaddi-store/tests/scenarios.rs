use chrono::{Duration, Utc};
use kabaddi_core::{
    winner, DomainError, MatchDraft, MatchStatus, ScoreInput, Team, TeamDraft,
};
use kabaddi_store::{
    FileStore, KeyValueStore, MemoryStore, Organizer, OrganizerError, StorageHelper,
};

fn draft(home: &str, away: &str) -> MatchDraft {
    MatchDraft {
        home_team_id: home.into(),
        away_team_id: away.into(),
        location: "Mumbai Arena".into(),
        ground_name: "Kabaddi Ground 1".into(),
        start_time: Utc::now() + Duration::days(1),
    }
}

async fn organizer_with_two_teams() -> Organizer<MemoryStore> {
    let helper = StorageHelper::new(MemoryStore::new());
    helper
        .save_teams(&[
            Team::new("t1", "Thunderbolts", "Mumbai"),
            Team::new("t2", "Desert Storm", "Jaipur"),
        ])
        .await;
    Organizer::new(helper, "current-user")
}

#[tokio::test]
async fn scheduled_match_played_to_completion() {
    let org = organizer_with_two_teams().await;
    let fixture = org.create_match(&draft("t1", "t2")).await.unwrap();
    assert_eq!(fixture.status, MatchStatus::Scheduled);
    assert!(fixture.result.is_none());

    let started = org.start_match(&fixture.id).await.unwrap();
    assert_eq!(started.status, MatchStatus::InProgress);

    org.record_result(&fixture.id, ScoreInput::new(35, 32), None, None)
        .await
        .unwrap();

    let stored = org.helper().get_match_by_id(&fixture.id).await.unwrap();
    assert_eq!(stored.status, MatchStatus::Completed);
    let result = stored.result.unwrap();
    assert_eq!((result.home_score, result.away_score), (35, 32));
    assert_eq!(result.winner_team_id.as_deref(), Some("t1"));
}

#[tokio::test]
async fn drawn_match_has_no_winner() {
    let org = organizer_with_two_teams().await;
    let fixture = org.create_match(&draft("t1", "t2")).await.unwrap();
    let done = org
        .record_result(&fixture.id, ScoreInput::new(30, 30), None, None)
        .await
        .unwrap();
    assert_eq!(done.winner_team_id(), None);
    assert_eq!(winner("t1", "t2", 30, 30), None);
}

#[tokio::test]
async fn match_against_itself_is_rejected_without_writing() {
    let org = organizer_with_two_teams().await;
    let before = org.helper().store().raw("matches");

    let err = org.create_match(&draft("t1", "t1")).await.unwrap_err();
    assert!(matches!(err, OrganizerError::Invalid(DomainError::SameTeams)));
    assert_eq!(org.helper().store().raw("matches"), before);
    assert!(org.helper().get_matches().await.is_empty());
}

#[tokio::test]
async fn deleting_a_team_leaves_its_matches() {
    let org = organizer_with_two_teams().await;
    let fixture = org.create_match(&draft("t1", "t2")).await.unwrap();

    assert!(org.delete_team("t1").await.unwrap());

    let stored = org.helper().get_match_by_id(&fixture.id).await.unwrap();
    assert_eq!(stored, fixture);
    let details = org.match_details(&fixture.id).await.unwrap();
    assert!(details.home.is_none());
    assert_eq!(details.away.map(|t| t.name).as_deref(), Some("Desert Storm"));
}

#[tokio::test]
async fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let team = {
        let org = Organizer::new(StorageHelper::new(FileStore::new(dir.path())), "owner");
        org.create_team(&TeamDraft {
            name: "Thunderbolts".into(),
            city: "Mumbai".into(),
            description: Some("League side".into()),
        })
        .await
        .unwrap()
    };

    let reopened = Organizer::new(StorageHelper::new(FileStore::new(dir.path())), "friend");
    assert_eq!(reopened.team(&team.id).await.unwrap(), team);

    let code = team.invite_code.clone().unwrap();
    let joined = reopened.join_team_by_code(&code).await.unwrap().unwrap();
    assert!(joined.is_member("friend"));

    let raw = FileStore::new(dir.path()).get("teams").await.unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["inviteCode"], code.as_str());
    assert_eq!(value[0]["createdBy"], "owner");
}

#[tokio::test]
async fn unreadable_collection_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("matches.json"), "[{\"id\": ").unwrap();

    let helper = StorageHelper::new(FileStore::new(dir.path()));
    assert!(helper.get_matches().await.is_empty());
    assert!(helper.get_match_by_id("m1").await.is_none());
}

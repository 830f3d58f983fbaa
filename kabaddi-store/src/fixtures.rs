//! Sample data set: two teams, three matches and three grounds.
//!
//! Used to seed an empty data directory (`kabaddi seed`) and as the contents
//! of [`MemoryStore::seeded`](crate::MemoryStore::seeded).

use chrono::{Duration, Utc};
use kabaddi_core::{
    Amenity, AmenityKind, Ground, GroundStatus, Match, MatchResult, MatchStatus, Player, Team,
};

use crate::error::PersistenceError;
use crate::record::Record;

pub fn sample_players() -> Vec<Player> {
    [("p1", "7", "Arjun Singh"), ("p2", "12", "Vikram Rathore"), ("p3", "5", "Kabir Khan")]
        .into_iter()
        .map(|(id, number, name)| Player {
            id: id.to_string(),
            number: number.to_string(),
            name: name.to_string(),
        })
        .collect()
}

pub fn sample_teams() -> Vec<Team> {
    let mut thunderbolts = Team::new("t1", "Thunderbolts", "Mumbai");
    thunderbolts.players = sample_players();
    let mut desert_storm = Team::new("t2", "Desert Storm", "Jaipur");
    desert_storm.players = sample_players();
    vec![thunderbolts, desert_storm]
}

pub fn sample_matches() -> Vec<Match> {
    let now = Utc::now();
    vec![
        Match {
            id: "m1".into(),
            home_team_id: "t1".into(),
            away_team_id: "t2".into(),
            location: "Mumbai Arena".into(),
            ground_name: "Kabaddi Ground 1".into(),
            start_time: now + Duration::days(2),
            status: MatchStatus::Scheduled,
            result: None,
        },
        Match {
            id: "m2".into(),
            home_team_id: "t2".into(),
            away_team_id: "t1".into(),
            location: "Jaipur Stadium".into(),
            ground_name: "Pink Arena".into(),
            start_time: now - Duration::days(3),
            status: MatchStatus::Completed,
            result: Some(MatchResult {
                home_score: 35,
                away_score: 32,
                winner_team_id: Some("t2".into()),
                best_raider: Some("Vikram Rathore".into()),
                best_defender: Some("Kabir Khan".into()),
            }),
        },
        Match {
            id: "m3".into(),
            home_team_id: "t1".into(),
            away_team_id: "t2".into(),
            location: "Delhi Stadium".into(),
            ground_name: "Central Court".into(),
            start_time: now,
            status: MatchStatus::InProgress,
            result: None,
        },
    ]
}

fn amenity(name: &str, distance: &str, kind: AmenityKind) -> Amenity {
    Amenity {
        name: name.to_string(),
        distance: distance.to_string(),
        kind,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn sample_grounds() -> Vec<Ground> {
    vec![
        Ground {
            id: "g1".into(),
            name: "Sunrise Arena".into(),
            location: "Mumbai, India".into(),
            address: "123 Sports Complex, Andheri East, Mumbai 400069".into(),
            description: "Indoor arena with seating for 5,000 spectators. Hosts league matches through the year.".into(),
            facilities: strings(&["Changing rooms", "Spectator seating", "Floodlights", "Medical room", "Cafeteria", "Parking"]),
            contact_number: "+91 9876543210".into(),
            capacity: 5000,
            status: GroundStatus::Open,
            rating: 4.8,
            booking_fee: 15000,
            photos: Vec::new(),
            map_url: "https://maps.google.com/?q=19.1136,72.8697".into(),
            upcoming_matches: strings(&["m1", "m3"]),
            nearby_amenities: vec![
                amenity("Sports Cafe", "0.2 km", AmenityKind::Restaurant),
                amenity("Metro Station", "0.5 km", AmenityKind::Transport),
                amenity("City Hospital", "1.2 km", AmenityKind::Hospital),
                amenity("Hotel Comfort", "0.8 km", AmenityKind::Hotel),
            ],
        },
        Ground {
            id: "g2".into(),
            name: "Twilight Turf".into(),
            location: "Jaipur, India".into(),
            address: "45 Heritage Sports Lane, Pink City, Jaipur 302001".into(),
            description: "Traditional clay-surface ground with open-air seating.".into(),
            facilities: strings(&["Basic changing areas", "Traditional seating", "Clay surface", "Water facilities"]),
            contact_number: "+91 9876543211".into(),
            capacity: 2000,
            status: GroundStatus::Closed,
            rating: 4.2,
            booking_fee: 8000,
            photos: Vec::new(),
            map_url: "https://maps.google.com/?q=26.9124,75.7873".into(),
            upcoming_matches: strings(&["m2"]),
            nearby_amenities: vec![
                amenity("Royal Spice Restaurant", "0.3 km", AmenityKind::Restaurant),
                amenity("City Bus Station", "1.0 km", AmenityKind::Transport),
                amenity("Heritage Hospital", "2.0 km", AmenityKind::Hospital),
                amenity("Pink Palace Hotel", "0.5 km", AmenityKind::Hotel),
            ],
        },
        Ground {
            id: "g3".into(),
            name: "Central Court".into(),
            location: "Delhi, India".into(),
            address: "67 National Sports Complex, New Delhi 110001".into(),
            description: "Air-conditioned indoor court with synthetic mats.".into(),
            facilities: strings(&["Air conditioning", "VIP lounge", "Premium seating", "Media box", "Food court", "Pro shop", "Gym"]),
            contact_number: "+91 9876543212".into(),
            capacity: 8000,
            status: GroundStatus::Maintenance,
            rating: 4.9,
            booking_fee: 25000,
            photos: Vec::new(),
            map_url: "https://maps.google.com/?q=28.6139,77.2090".into(),
            upcoming_matches: Vec::new(),
            nearby_amenities: vec![
                amenity("Delhi Food Plaza", "0.1 km", AmenityKind::Restaurant),
                amenity("Metro Junction", "0.3 km", AmenityKind::Transport),
                amenity("AIIMS Branch", "1.5 km", AmenityKind::Hospital),
                amenity("Luxury Inn", "0.7 km", AmenityKind::Hotel),
                amenity("Multi-level Parking", "0.2 km", AmenityKind::Parking),
            ],
        },
    ]
}

/// The sample data as raw `(key, json)` pairs, ready to write into a store.
pub fn sample_entries() -> Result<Vec<(&'static str, String)>, PersistenceError> {
    Ok(vec![
        (Team::KEY, serde_json::to_string(&sample_teams())?),
        (Match::KEY, serde_json::to_string(&sample_matches())?),
        (Ground::KEY, serde_json::to_string(&sample_grounds())?),
    ])
}

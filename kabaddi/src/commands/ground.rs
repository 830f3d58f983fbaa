use clap::Subcommand;
use kabaddi_core::{AmenityKind, Ground};
use kabaddi_store::KeyValueStore;
use serde_json::json;

use super::Context;

#[derive(Subcommand)]
pub enum GroundAction {
    /// List playing grounds.
    List {
        /// Only grounds currently open for play.
        #[arg(long)]
        open: bool,
    },
    /// Show a ground with its upcoming matches.
    Show { ground_id: String },
}

const AMENITY_ORDER: [AmenityKind; 5] = [
    AmenityKind::Restaurant,
    AmenityKind::Transport,
    AmenityKind::Hospital,
    AmenityKind::Hotel,
    AmenityKind::Parking,
];

pub async fn run<S: KeyValueStore>(ctx: &Context<S>, action: GroundAction) -> anyhow::Result<()> {
    let org = &ctx.org;
    match action {
        GroundAction::List { open } => {
            let grounds: Vec<Ground> = org
                .grounds()
                .await
                .into_iter()
                .filter(|g| !open || g.is_open())
                .collect();
            ctx.emit(&grounds, || {
                if grounds.is_empty() {
                    return "No grounds".to_string();
                }
                grounds.iter().map(ground_line).collect::<Vec<_>>().join("\n")
            })
        }
        GroundAction::Show { ground_id } => {
            let ground = org.ground(&ground_id).await?;
            let upcoming = org.ground_upcoming_matches(&ground_id).await?;
            let value = json!({ "ground": ground, "upcomingMatches": upcoming });
            ctx.emit(&value, || {
                let mut out = ground_card(&ground);
                out.push_str(&format!("\nupcoming matches ({}):", upcoming.len()));
                for m in &upcoming {
                    out.push_str(&format!(
                        "\n  {}  {} vs {}  {}",
                        m.id,
                        m.home_team_id,
                        m.away_team_id,
                        m.start_time.format("%Y-%m-%d %H:%M")
                    ));
                }
                out
            })
        }
    }
}

fn ground_line(g: &Ground) -> String {
    format!(
        "{}  {}  {}  [{}]  rating {:.1}",
        g.id,
        g.name,
        g.location,
        g.status.as_str(),
        g.rating
    )
}

fn ground_card(g: &Ground) -> String {
    let mut out = format!(
        "{}\n{}\nstatus: {}\ncapacity: {}\nbooking fee: {}\nrating: {:.1}\ncontact: {}",
        g.name,
        g.address,
        g.status.as_str(),
        g.capacity,
        g.booking_fee,
        g.rating,
        g.contact_number
    );
    if !g.facilities.is_empty() {
        out.push_str(&format!("\nfacilities: {}", g.facilities.join(", ")));
    }
    for kind in AMENITY_ORDER {
        for amenity in g.amenities_of(kind) {
            out.push_str(&format!("\nnearby: {} ({})", amenity.name, amenity.distance));
        }
    }
    out
}

//! Domain model for the kabaddi organizer.
//!
//! Entities (teams, matches, tournaments, grounds) are plain serde structs whose
//! JSON shape matches what the app has always written to its key-value store.
//! Behaviour that belongs to the entities themselves lives here: roster edits,
//! the match status state machine, winner determination, invite codes, and the
//! list filters. Persistence is handled by `kabaddi-store`.

pub mod error;
pub mod filter;
pub mod ground;
pub mod ids;
pub mod invite;
pub mod matches;
pub mod team;
pub mod tournament;

pub use error::DomainError;
pub use filter::{MatchStatusFilter, TeamRelationFilter, TournamentStatusFilter};
pub use ground::{Amenity, AmenityKind, Ground, GroundStatus};
pub use ids::generate_id;
pub use invite::{generate_invite_code, invite_codes_match, share_message, InviteKind};
pub use matches::{winner, Match, MatchDraft, MatchResult, MatchStatus, ScoreInput};
pub use team::{Player, PlayerDraft, Team, TeamDraft, MAX_ROSTER_SIZE};
pub use tournament::{Tournament, TournamentDraft, TournamentStatus};

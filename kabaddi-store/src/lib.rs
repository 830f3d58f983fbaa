//! Local persistence for the kabaddi organizer.
//!
//! Each entity kind is stored as one JSON array under a fixed key in a
//! [`KeyValueStore`]. [`StorageHelper`] provides get-all / save-all /
//! upsert / delete over those arrays, and [`Organizer`] layers the user
//! intents (create a team, record a result, join by invite code, ...) on top,
//! validating input before anything is written.

mod error;
mod file_store;
mod helper;
mod kv;
mod memory_store;
mod organizer;
mod record;

pub mod fixtures;

pub use error::PersistenceError;
pub use file_store::FileStore;
pub use helper::StorageHelper;
pub use kv::KeyValueStore;
pub use memory_store::MemoryStore;
pub use organizer::{MatchDetails, Organizer, OrganizerError, OrganizerResult, TournamentDetails};
pub use record::Record;

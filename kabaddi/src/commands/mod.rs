//! Subcommand handlers. Each handler runs one organizer intent and prints
//! either a short text rendering or the JSON of the affected records.

use kabaddi_store::{fixtures, FileStore, KeyValueStore, Organizer, PersistenceError};
use serde::Serialize;

pub mod ground;
pub mod matches;
pub mod team;
pub mod tournament;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("no {kind} found for invite code {code}")]
    UnknownInviteCode { kind: &'static str, code: String },
    #[error("{0}")]
    Rejected(String),
}

pub struct Context<S = FileStore> {
    pub org: Organizer<S>,
    pub json: bool,
}

impl<S: KeyValueStore> Context<S> {
    pub fn new(org: Organizer<S>, json: bool) -> Self {
        Self { org, json }
    }

    /// Print `value` as pretty JSON in `--json` mode, otherwise `text`.
    pub fn emit<T: Serialize + ?Sized>(&self, value: &T, text: impl FnOnce() -> String) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", text());
        }
        Ok(())
    }

    /// Print a plain confirmation line. Nothing is printed in `--json` mode.
    pub fn note(&self, message: impl AsRef<str>) {
        if !self.json {
            println!("{}", message.as_ref());
        }
    }
}

/// Outcome of seeding one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Written,
    Skipped,
}

/// Write the sample collections into `store`. Existing collections are kept
/// unless `force` is set.
pub async fn seed_store<S: KeyValueStore>(
    store: &S,
    force: bool,
) -> Result<Vec<(&'static str, SeedOutcome)>, PersistenceError> {
    let mut outcomes = Vec::new();
    for (key, value) in fixtures::sample_entries()? {
        if !force && store.get(key).await?.is_some() {
            tracing::info!(key, "Collection exists, not seeding");
            outcomes.push((key, SeedOutcome::Skipped));
            continue;
        }
        store.set(key, value).await?;
        outcomes.push((key, SeedOutcome::Written));
    }
    Ok(outcomes)
}

pub async fn seed<S: KeyValueStore>(ctx: &Context<S>, force: bool) -> anyhow::Result<()> {
    let outcomes = seed_store(ctx.org.helper().store(), force).await?;
    for (key, outcome) in outcomes {
        match outcome {
            SeedOutcome::Written => ctx.note(format!("Seeded {key}")),
            SeedOutcome::Skipped => ctx.note(format!("Skipped {key} (already present, use --force)")),
        }
    }
    Ok(())
}

/// Render an optional field for text output.
pub(crate) fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

use kabaddi_core::{Ground, Match, Team, Tournament};
use serde::{de::DeserializeOwned, Serialize};

/// An entity kind persisted as one JSON array under a fixed key.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Store key holding the whole collection.
    const KEY: &'static str;
    /// Human-readable kind, used in errors and logs.
    const LABEL: &'static str;

    fn id(&self) -> &str;
}

impl Record for Team {
    const KEY: &'static str = "teams";
    const LABEL: &'static str = "team";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Match {
    const KEY: &'static str = "matches";
    const LABEL: &'static str = "match";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Tournament {
    const KEY: &'static str = "tournaments";
    const LABEL: &'static str = "tournament";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Ground {
    const KEY: &'static str = "grounds";
    const LABEL: &'static str = "ground";

    fn id(&self) -> &str {
        &self.id
    }
}

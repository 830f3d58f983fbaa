use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use kabaddi_core::{Ground, Match, Team, Tournament};
use tokio::sync::OwnedMutexGuard;

use crate::error::PersistenceError;
use crate::kv::KeyValueStore;
use crate::record::Record;

/// Per-collection CRUD over a [`KeyValueStore`].
///
/// Every operation reads or writes the whole JSON array for one key. The plain
/// methods (`get_all`, `save_one`, ...) log failures and carry on: a read
/// failure looks like an empty collection and a write failure is dropped. The
/// `try_*` methods return the error instead.
///
/// Mutations on one collection are serialized through a per-key async lock, so
/// overlapping `save_one` / `delete_one` / `try_update` calls never lose each
/// other's writes.
pub struct StorageHelper<S> {
    store: S,
    locks: Mutex<HashMap<&'static str, Arc<tokio::sync::Mutex<()>>>>,
}

impl<S: KeyValueStore> StorageHelper<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn lock_collection(&self, key: &'static str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(key).or_default())
        };
        lock.lock_owned().await
    }

    async fn write_all<R: Record>(&self, items: &[R]) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(items)?;
        self.store.set(R::KEY, json).await
    }

    // ---- fallible API -------------------------------------------------------

    pub async fn try_get_all<R: Record>(&self) -> Result<Vec<R>, PersistenceError> {
        match self.store.get(R::KEY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    pub async fn try_get_by_id<R: Record>(&self, id: &str) -> Result<Option<R>, PersistenceError> {
        Ok(self
            .try_get_all::<R>()
            .await?
            .into_iter()
            .find(|item| item.id() == id))
    }

    pub async fn try_save_all<R: Record>(&self, items: &[R]) -> Result<(), PersistenceError> {
        let _guard = self.lock_collection(R::KEY).await;
        self.write_all(items).await
    }

    /// Replace the record with the same id in place, or append it.
    pub async fn try_save_one<R: Record>(&self, item: &R) -> Result<(), PersistenceError> {
        let _guard = self.lock_collection(R::KEY).await;
        let mut items = self.try_get_all::<R>().await?;
        match items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(slot) => *slot = item.clone(),
            None => items.push(item.clone()),
        }
        self.write_all(&items).await?;
        tracing::debug!(key = R::KEY, id = item.id(), "Saved record");
        Ok(())
    }

    /// Remove the record with the given id. Returns how many were removed.
    pub async fn try_delete_one<R: Record>(&self, id: &str) -> Result<usize, PersistenceError> {
        let _guard = self.lock_collection(R::KEY).await;
        let mut items = self.try_get_all::<R>().await?;
        let before = items.len();
        items.retain(|item| item.id() != id);
        let removed = before - items.len();
        if removed > 0 {
            self.write_all(&items).await?;
        }
        tracing::debug!(key = R::KEY, id, removed, "Deleted record");
        Ok(removed)
    }

    /// Change the first record matching `select` in place.
    ///
    /// The collection lock is held from the read to the write, so concurrent
    /// updates of one collection apply one after another. Returns `Ok(None)`
    /// if nothing matched. If `apply` fails nothing is written.
    pub async fn try_update_where<R, T, E>(
        &self,
        mut select: impl FnMut(&R) -> bool,
        apply: impl FnOnce(&mut R) -> Result<T, E>,
    ) -> Result<Option<T>, E>
    where
        R: Record,
        E: From<PersistenceError>,
    {
        let _guard = self.lock_collection(R::KEY).await;
        let mut items = self.try_get_all::<R>().await?;
        let Some(item) = items.iter_mut().find(|item| select(&**item)) else {
            return Ok(None);
        };
        let out = apply(item)?;
        self.write_all(&items).await?;
        tracing::debug!(key = R::KEY, "Updated record");
        Ok(Some(out))
    }

    /// [`try_update_where`](Self::try_update_where) by id.
    pub async fn try_update<R, T, E>(
        &self,
        id: &str,
        apply: impl FnOnce(&mut R) -> Result<T, E>,
    ) -> Result<Option<T>, E>
    where
        R: Record,
        E: From<PersistenceError>,
    {
        self.try_update_where(|item: &R| item.id() == id, apply)
            .await
    }

    // ---- logging API --------------------------------------------------------

    pub async fn get_all<R: Record>(&self) -> Vec<R> {
        self.try_get_all().await.unwrap_or_else(|e| {
            tracing::warn!(key = R::KEY, "Failed to load {}s: {}", R::LABEL, e);
            Vec::new()
        })
    }

    pub async fn get_by_id<R: Record>(&self, id: &str) -> Option<R> {
        self.get_all::<R>()
            .await
            .into_iter()
            .find(|item| item.id() == id)
    }

    pub async fn save_all<R: Record>(&self, items: &[R]) {
        if let Err(e) = self.try_save_all(items).await {
            tracing::warn!(key = R::KEY, "Failed to save {}s: {}", R::LABEL, e);
        }
    }

    pub async fn save_one<R: Record>(&self, item: &R) {
        if let Err(e) = self.try_save_one(item).await {
            tracing::warn!(key = R::KEY, id = item.id(), "Failed to save {}: {}", R::LABEL, e);
        }
    }

    pub async fn delete_one<R: Record>(&self, id: &str) {
        if let Err(e) = self.try_delete_one::<R>(id).await {
            tracing::warn!(key = R::KEY, id, "Failed to delete {}: {}", R::LABEL, e);
        }
    }

    // ---- named collections --------------------------------------------------

    pub async fn get_teams(&self) -> Vec<Team> {
        self.get_all().await
    }

    pub async fn get_team_by_id(&self, id: &str) -> Option<Team> {
        self.get_by_id(id).await
    }

    pub async fn save_teams(&self, teams: &[Team]) {
        self.save_all(teams).await
    }

    pub async fn save_team(&self, team: &Team) {
        self.save_one(team).await
    }

    pub async fn delete_team(&self, id: &str) {
        self.delete_one::<Team>(id).await
    }

    pub async fn get_matches(&self) -> Vec<Match> {
        self.get_all().await
    }

    pub async fn get_match_by_id(&self, id: &str) -> Option<Match> {
        self.get_by_id(id).await
    }

    pub async fn save_matches(&self, matches: &[Match]) {
        self.save_all(matches).await
    }

    pub async fn save_match(&self, m: &Match) {
        self.save_one(m).await
    }

    pub async fn delete_match(&self, id: &str) {
        self.delete_one::<Match>(id).await
    }

    pub async fn get_tournaments(&self) -> Vec<Tournament> {
        self.get_all().await
    }

    pub async fn get_tournament_by_id(&self, id: &str) -> Option<Tournament> {
        self.get_by_id(id).await
    }

    pub async fn save_tournaments(&self, tournaments: &[Tournament]) {
        self.save_all(tournaments).await
    }

    pub async fn save_tournament(&self, tournament: &Tournament) {
        self.save_one(tournament).await
    }

    pub async fn delete_tournament(&self, id: &str) {
        self.delete_one::<Tournament>(id).await
    }

    pub async fn get_grounds(&self) -> Vec<Ground> {
        self.get_all().await
    }

    pub async fn get_ground_by_id(&self, id: &str) -> Option<Ground> {
        self.get_by_id(id).await
    }

    pub async fn save_grounds(&self, grounds: &[Ground]) {
        self.save_all(grounds).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_store::MemoryStore;
    use kabaddi_core::Player;

    fn sample_team(id: &str, name: &str) -> Team {
        let mut team = Team::new(id, name, "Mumbai");
        team.players.push(Player {
            id: format!("{id}-p1"),
            number: "7".into(),
            name: "Arjun Singh".into(),
        });
        team
    }

    #[tokio::test]
    async fn test_empty_collection() {
        let helper = StorageHelper::new(MemoryStore::new());
        assert!(helper.get_teams().await.is_empty());
        assert!(helper.get_team_by_id("t1").await.is_none());
    }

    #[tokio::test]
    async fn test_save_one_then_get_all() {
        let helper = StorageHelper::new(MemoryStore::new());
        let team = sample_team("t1", "Thunderbolts");
        helper.save_team(&team).await;

        let teams = helper.get_teams().await;
        let hits: Vec<_> = teams.iter().filter(|t| t.id == "t1").collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0], &team);
    }

    #[tokio::test]
    async fn test_save_one_replaces_in_place() {
        let helper = StorageHelper::new(MemoryStore::new());
        helper.save_team(&sample_team("t1", "Thunderbolts")).await;
        helper.save_team(&sample_team("t2", "Desert Storm")).await;

        let mut renamed = sample_team("t1", "Thunder");
        renamed.city = "Pune".into();
        helper.save_team(&renamed).await;

        let teams = helper.get_teams().await;
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0], renamed);
        assert_eq!(teams[1].id, "t2");
    }

    #[tokio::test]
    async fn test_save_one_is_idempotent() {
        let helper = StorageHelper::new(MemoryStore::new());
        let team = sample_team("t1", "Thunderbolts");
        helper.save_team(&team).await;
        let once = helper.get_teams().await;
        helper.save_team(&team).await;
        assert_eq!(helper.get_teams().await, once);
    }

    #[tokio::test]
    async fn test_delete_one_counts() {
        let helper = StorageHelper::new(MemoryStore::new());
        helper.save_team(&sample_team("t1", "Thunderbolts")).await;
        helper.save_team(&sample_team("t2", "Desert Storm")).await;

        assert_eq!(helper.try_delete_one::<Team>("t1").await.unwrap(), 1);
        assert_eq!(helper.try_delete_one::<Team>("t1").await.unwrap(), 0);

        let teams = helper.get_teams().await;
        assert!(teams.iter().all(|t| t.id != "t1"));
        assert_eq!(teams.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_on_missing_key_writes_nothing() {
        let helper = StorageHelper::new(MemoryStore::new());
        helper.delete_team("t1").await;
        assert!(helper.store().raw(Team::KEY).is_none());
    }

    #[tokio::test]
    async fn test_corrupt_json_reads_as_empty() {
        let store = MemoryStore::new();
        store.insert("teams", "{not json");
        let helper = StorageHelper::new(store);

        assert!(helper.get_teams().await.is_empty());
        assert!(matches!(
            helper.try_get_all::<Team>().await,
            Err(PersistenceError::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_save_one_keeps_corrupt_data_untouched() {
        let store = MemoryStore::new();
        store.insert("teams", "{not json");
        let helper = StorageHelper::new(store);

        helper.save_team(&sample_team("t1", "Thunderbolts")).await;
        assert_eq!(helper.store().raw("teams").as_deref(), Some("{not json"));
    }

    #[tokio::test]
    async fn test_save_all_overwrites() {
        let helper = StorageHelper::new(MemoryStore::new());
        helper.save_team(&sample_team("t1", "Thunderbolts")).await;
        helper
            .save_teams(&[sample_team("t3", "Raiders"), sample_team("t4", "Bulls")])
            .await;
        let ids: Vec<_> = helper.get_teams().await.into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["t3", "t4"]);
    }

    #[tokio::test]
    async fn test_collections_are_independent() {
        let helper = StorageHelper::new(MemoryStore::seeded().unwrap());
        let teams_before = helper.get_teams().await;
        helper.delete_match("m1").await;
        assert_eq!(helper.get_teams().await, teams_before);
        assert!(helper.get_match_by_id("m1").await.is_none());
        assert!(helper.get_match_by_id("m2").await.is_some());
    }

    #[tokio::test]
    async fn test_update_changes_in_place() {
        let helper = StorageHelper::new(MemoryStore::new());
        helper.save_team(&sample_team("t1", "Thunderbolts")).await;
        helper.save_team(&sample_team("t2", "Desert Storm")).await;

        let city = helper
            .try_update("t2", |team: &mut Team| {
                team.city = "Pune".into();
                Ok::<_, PersistenceError>(team.city.clone())
            })
            .await
            .unwrap();
        assert_eq!(city.as_deref(), Some("Pune"));

        let teams = helper.get_teams().await;
        assert_eq!(teams[0].city, "Mumbai");
        assert_eq!(teams[1].city, "Pune");
    }

    #[tokio::test]
    async fn test_update_missing_or_failed_writes_nothing() {
        let helper = StorageHelper::new(MemoryStore::new());
        helper.save_team(&sample_team("t1", "Thunderbolts")).await;
        let before = helper.store().raw(Team::KEY);

        let missing = helper
            .try_update("t9", |_: &mut Team| Ok::<_, PersistenceError>(()))
            .await
            .unwrap();
        assert!(missing.is_none());

        let failed = helper
            .try_update("t1", |team: &mut Team| {
                team.name = "Renamed".into();
                Err::<(), _>(PersistenceError::Io(std::io::Error::other("rejected")))
            })
            .await;
        assert!(failed.is_err());
        assert_eq!(helper.store().raw(Team::KEY), before);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_lose_nothing() {
        let helper = Arc::new(StorageHelper::new(MemoryStore::new()));
        helper.save_team(&sample_team("t1", "Thunderbolts")).await;

        let mut handles = Vec::new();
        for i in 0..10 {
            let helper = Arc::clone(&helper);
            handles.push(tokio::spawn(async move {
                helper
                    .try_update("t1", move |team: &mut Team| {
                        team.invite(&format!("user{i}"));
                        Ok::<_, PersistenceError>(())
                    })
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        let team = helper.get_team_by_id("t1").await.unwrap();
        assert_eq!(team.invited.len(), 10);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_upserts_lose_nothing() {
        let helper = Arc::new(StorageHelper::new(MemoryStore::new()));
        let mut handles = Vec::new();
        for i in 0..32 {
            let helper = Arc::clone(&helper);
            handles.push(tokio::spawn(async move {
                let team = sample_team(&format!("t{i}"), &format!("Team {i}"));
                helper.save_team(&team).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(helper.get_teams().await.len(), 32);
    }
}

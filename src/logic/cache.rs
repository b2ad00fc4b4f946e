//! Per-player cache of games and their summary, keyed by a version counter.
//!
//! Single invalidation rule: every game create, replace or delete for a player bumps that
//! player's version, and an entry computed at an older version is rebuilt on next access.

use crate::logic::aggregation::PlayerSummary;
use crate::models::{Game, MatchLogError, PlayerId};
use crate::store::RecordStore;
use log::debug;
use std::collections::HashMap;

/// A player's games together with the summary computed from them.
#[derive(Clone, Debug)]
pub struct PlayerSnapshot {
    pub games: Vec<Game>,
    pub summary: PlayerSummary,
}

impl PlayerSnapshot {
    pub fn from_games(games: Vec<Game>) -> Self {
        let summary = PlayerSummary::from_games(&games);
        Self { games, summary }
    }
}

#[derive(Debug)]
struct CachedSnapshot {
    version: u64,
    snapshot: PlayerSnapshot,
}

#[derive(Debug, Default)]
pub struct SummaryCache {
    versions: HashMap<PlayerId, u64>,
    entries: HashMap<PlayerId, CachedSnapshot>,
}

impl SummaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&self, player_id: PlayerId) -> u64 {
        self.versions.get(&player_id).copied().unwrap_or(0)
    }

    /// Mark the player's games as changed.
    pub fn invalidate(&mut self, player_id: PlayerId) {
        *self.versions.entry(player_id).or_insert(0) += 1;
        debug!(
            "Summary cache for player {} now at version {}",
            player_id,
            self.version(player_id)
        );
    }

    /// Whether a current entry exists for the player.
    pub fn is_fresh(&self, player_id: PlayerId) -> bool {
        let version = self.version(player_id);
        self.entries
            .get(&player_id)
            .is_some_and(|e| e.version == version)
    }

    /// Cached snapshot for the player, fetching games from the store when stale or absent.
    pub async fn snapshot<S>(
        &mut self,
        store: &S,
        player_id: PlayerId,
    ) -> Result<&PlayerSnapshot, MatchLogError>
    where
        S: RecordStore + ?Sized,
    {
        let version = self.version(player_id);
        let cached = match self.entries.remove(&player_id) {
            Some(cached) if cached.version == version => {
                debug!("Summary cache hit for player {}", player_id);
                cached
            }
            _ => {
                debug!("Summary cache miss for player {}", player_id);
                let games = store.list_games(player_id).await?;
                CachedSnapshot {
                    version,
                    snapshot: PlayerSnapshot::from_games(games),
                }
            }
        };
        Ok(&self.entries.entry(player_id).or_insert(cached).snapshot)
    }

    /// Cached summary for the player.
    pub async fn summary<S>(
        &mut self,
        store: &S,
        player_id: PlayerId,
    ) -> Result<PlayerSummary, MatchLogError>
    where
        S: RecordStore + ?Sized,
    {
        Ok(self.snapshot(store, player_id).await?.summary.clone())
    }
}

//! Session context: the known player profiles and which one is current.
//!
//! The current player is explicit state passed to whoever needs it. The host persists the
//! most recently selected id and hands it back to [`Session::start`].

use crate::logic::validation::validate_profile;
use crate::models::{MatchLogError, Player, PlayerId, ProfileDraft, RecordKind};
use crate::store::RecordStore;
use chrono::NaiveDate;
use log::{info, warn};

#[derive(Clone, Debug, Default)]
pub struct Session {
    players: Vec<Player>,
    current: Option<PlayerId>,
}

impl Session {
    /// Resolve the current player: the persisted id if it names a known player, else the first
    /// player, else none.
    pub fn new(players: Vec<Player>, persisted: Option<PlayerId>) -> Self {
        let current = persisted
            .filter(|id| players.iter().any(|p| p.id == *id))
            .or_else(|| players.first().map(|p| p.id));
        Self { players, current }
    }

    pub async fn start<S>(store: &S, persisted: Option<PlayerId>) -> Result<Self, MatchLogError>
    where
        S: RecordStore + ?Sized,
    {
        let players = store.list_players().await.map_err(|e| {
            warn!("Failed to load player profiles: {}", e);
            e
        })?;
        Ok(Self::new(players, persisted))
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_id(&self) -> Option<PlayerId> {
        self.current
    }

    pub fn current(&self) -> Option<&Player> {
        self.current
            .and_then(|id| self.players.iter().find(|p| p.id == id))
    }

    /// The current player, or `NoCurrentPlayer` when no profile exists yet.
    pub fn require_current(&self) -> Result<&Player, MatchLogError> {
        self.current().ok_or(MatchLogError::NoCurrentPlayer)
    }

    /// Select another known player. Local only, so it applies immediately.
    pub fn switch_player(&mut self, id: PlayerId) -> Result<&Player, MatchLogError> {
        let player = self
            .players
            .iter()
            .find(|p| p.id == id)
            .ok_or(MatchLogError::NotFound {
                kind: RecordKind::Player,
                id,
            })?;
        self.current = Some(player.id);
        info!("Switched profile to {}", player.name);
        Ok(player)
    }

    /// Create a profile joined `today` and make it current.
    pub async fn create_profile<S>(
        &mut self,
        store: &S,
        draft: &ProfileDraft,
        today: NaiveDate,
    ) -> Result<&Player, MatchLogError>
    where
        S: RecordStore + ?Sized,
    {
        let new = validate_profile(draft, today)?;
        let saved = store.create_player(new).await.map_err(|e| {
            warn!("Failed to create profile: {}", e);
            e
        })?;
        info!("Profile created for {}", saved.name);
        let id = saved.id;
        self.players.push(saved);
        self.switch_player(id)
    }
}

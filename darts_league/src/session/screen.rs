//! Tournament session: the single owner of a tournament being edited.

use super::{
    api::{
        ActionResult, LiveChannel, LiveSessionRequest, MatchScorePatch, RoundPatch, TournamentApi,
        TournamentPatch,
    },
    errors::{SaveError, SessionError, SessionResult},
};
use crate::{
    prompt::{self, Prompts},
    tournament::{
        editor,
        errors::{EditorError, EditorResult},
        models::{PlayerRef, Tournament, TournamentId},
        round,
    },
};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Clears an in-flight flag when the call finishes or is dropped
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Holds the tournament being edited and synchronises it with the server
///
/// Edits are applied locally first. Every successful save or patch replaces
/// the local tournament with the server's canonical copy; a refused one keeps
/// the local edits and raises [`SaveError`].
pub struct TournamentSession<A: TournamentApi> {
    api: A,
    live: Option<Arc<dyn LiveChannel>>,
    tournament: RwLock<Tournament>,
    save_error: RwLock<Option<SaveError>>,
    saving: AtomicBool,
    patching: AtomicBool,
}

impl<A: TournamentApi> TournamentSession<A> {
    /// Start a session for a tournament already in hand
    pub fn new(api: A, tournament: Tournament) -> Self {
        Self {
            api,
            live: None,
            tournament: RwLock::new(tournament),
            save_error: RwLock::new(None),
            saving: AtomicBool::new(false),
            patching: AtomicBool::new(false),
        }
    }

    /// Fetch a tournament and start a session for it
    pub async fn load(api: A, id: TournamentId) -> SessionResult<Self> {
        let tournament = api.get(id).await?.ok_or(SessionError::NotFound(id))?;
        log::info!("Loaded tournament {} ({} sides)", id, tournament.sides.len());
        Ok(Self::new(api, tournament))
    }

    /// Publish canonical tournaments through `live` after each successful save
    pub fn with_live_channel(mut self, live: Arc<dyn LiveChannel>) -> Self {
        self.live = Some(live);
        self
    }

    /// A copy of the current tournament
    pub async fn tournament(&self) -> Tournament {
        self.tournament.read().await.clone()
    }

    /// Whether a whole-tournament save is in flight
    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::Acquire)
    }

    /// Whether a partial update is in flight
    pub fn is_patching(&self) -> bool {
        self.patching.load(Ordering::Acquire)
    }

    /// The error panel raised by the last refused action
    pub async fn save_error(&self) -> Option<SaveError> {
        self.save_error.read().await.clone()
    }

    /// Dismiss the error panel
    pub async fn dismiss_error(&self) {
        *self.save_error.write().await = None;
    }

    /// Apply a local edit, returning the updated tournament
    pub async fn edit<F>(&self, change: F) -> EditorResult<Tournament>
    where
        F: FnOnce(&Tournament) -> EditorResult<Tournament>,
    {
        let mut tournament = self.tournament.write().await;
        let updated = change(&tournament)?;
        *tournament = updated.clone();
        Ok(updated)
    }

    /// Overwrite the local tournament with one pushed by the server
    ///
    /// Updates for other tournaments are ignored. Returns whether the update
    /// was applied.
    pub async fn apply_live_update(&self, update: Tournament) -> bool {
        let mut tournament = self.tournament.write().await;
        if update.id != tournament.id {
            log::warn!(
                "Ignoring live update for tournament {} in session for {}",
                update.id,
                tournament.id
            );
            return false;
        }
        *tournament = update;
        true
    }

    /// Save the whole tournament
    ///
    /// Returns `Ok(false)` when a save is already in flight or the server
    /// refused it.
    pub async fn save(&self) -> SessionResult<bool> {
        let Some(_in_flight) = InFlight::acquire(&self.saving) else {
            log::debug!("Save already in flight, ignoring");
            return Ok(false);
        };

        let snapshot = self.tournament().await;
        let result = self.api.update(&snapshot).await?;
        Ok(self.accept(result).await)
    }

    /// Send a partial update
    ///
    /// Returns `Ok(false)` when a patch is already in flight or the server
    /// refused it.
    pub async fn patch(&self, patch: TournamentPatch) -> SessionResult<bool> {
        let Some(_in_flight) = InFlight::acquire(&self.patching) else {
            log::debug!("Patch already in flight, ignoring");
            return Ok(false);
        };

        let id = self.tournament.read().await.id;
        let result = self.api.patch(id, &patch).await?;
        Ok(self.accept(result).await)
    }

    /// Record the scores of a match locally and send them as a round patch
    ///
    /// Returns `Ok(false)` without touching the local copy when a patch is
    /// already in flight; the caller should retry once [`Self::is_patching`]
    /// clears.
    pub async fn record_scores(
        &self,
        match_id: Uuid,
        score_a: Option<u32>,
        score_b: Option<u32>,
    ) -> SessionResult<bool> {
        if self.is_patching() {
            log::debug!("Patch already in flight, scores for match {} not recorded", match_id);
            return Ok(false);
        }

        let mut depth = None;
        self.edit(|t| {
            let root = t.round.as_ref().ok_or(EditorError::MatchNotFound(match_id))?;
            depth = root
                .iter()
                .position(|r| r.matches.iter().any(|m| m.id == match_id));
            let updated = round::update_match(root, match_id, |m| {
                m.score_a = score_a;
                m.score_b = score_b;
            })?;
            Ok(editor::set_round(t, Some(updated)))
        })
        .await?;

        let depth = depth.ok_or(EditorError::MatchNotFound(match_id))?;
        let patch = TournamentPatch {
            round: Some(RoundPatch::at_depth(
                depth,
                MatchScorePatch {
                    match_id,
                    score_a,
                    score_b,
                },
            )),
            ..TournamentPatch::default()
        };
        self.patch(patch).await
    }

    /// Record a 180 and send it as a patch
    pub async fn add_one_eighty(&self, player: PlayerRef) -> SessionResult<bool> {
        self.edit(|t| Ok(editor::add_one_eighty(t, player.clone())))
            .await?;

        self.patch(TournamentPatch {
            additional_180: Some(player),
            ..TournamentPatch::default()
        })
        .await
    }

    /// Record a high checkout and send it as a patch
    pub async fn add_high_checkout(
        &self,
        player: PlayerRef,
        score: u32,
        prompts: &mut dyn Prompts,
    ) -> SessionResult<bool> {
        let updated = self
            .edit(|t| editor::add_high_checkout(t, player, score, prompts))
            .await?;

        self.patch(TournamentPatch {
            additional_over_100_checkout: updated.over_100_checkouts.last().cloned(),
            ..TournamentPatch::default()
        })
        .await
    }

    /// Attach a live-scoring session to a match, returning its id
    ///
    /// A match that already has a session keeps it.
    pub async fn start_live_scoring(&self, match_id: Uuid) -> SessionResult<Option<Uuid>> {
        let (tournament_id, options, existing) = {
            let tournament = self.tournament.read().await;
            let (round, index) = tournament
                .rounds()
                .find_map(|r| {
                    r.matches
                        .iter()
                        .position(|m| m.id == match_id)
                        .map(|index| (r, index))
                })
                .ok_or(EditorError::MatchNotFound(match_id))?;
            (
                tournament.id,
                round.options_for(index, tournament.best_of),
                round.matches[index].sayg_id,
            )
        };

        if existing.is_some() {
            return Ok(existing);
        }

        let request = LiveSessionRequest {
            tournament_id,
            match_id,
            match_options: options,
        };
        let result = self.api.add_live_session(&request).await?;
        if !self.accept(result).await {
            return Ok(None);
        }

        let tournament = self.tournament.read().await;
        Ok(tournament.find_match(match_id).and_then(|m| m.sayg_id))
    }

    /// Delete the live-scoring session of a match after confirmation
    pub async fn delete_live_scoring(
        &self,
        match_id: Uuid,
        prompts: &mut dyn Prompts,
    ) -> SessionResult<bool> {
        if !prompts.confirm(prompt::CONFIRM_DELETE_LIVE_SCORING) {
            return Ok(false);
        }

        let id = self.tournament.read().await.id;
        let result = self.api.delete_live_session(id, match_id).await?;
        Ok(self.accept(result).await)
    }

    /// Take the server's answer: replace local state on success, raise the error panel otherwise
    async fn accept(&self, result: ActionResult<Tournament>) -> bool {
        match result {
            ActionResult {
                success: true,
                result: Some(canonical),
                ..
            } => {
                *self.tournament.write().await = canonical.clone();
                *self.save_error.write().await = None;

                if let Some(live) = &self.live
                    && let Err(e) = live.publish(&canonical).await
                {
                    log::warn!("Failed to publish tournament {}: {}", canonical.id, e);
                }
                true
            }
            refused => {
                log::warn!("Server refused tournament update: {:?}", refused.errors);
                *self.save_error.write().await = Some(SaveError::from(refused));
                false
            }
        }
    }
}

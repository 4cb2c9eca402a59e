//! Contract of the tournament server and its wire DTOs.

use crate::tournament::models::{HighCheckout, MatchOptions, PlayerRef, Tournament, TournamentId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors talking to the tournament server
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Request could not be sent or completed
    #[error("Request failed: {0}")]
    Request(String),

    /// Server answered with an unexpected status
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    Decode(String),
}

/// Result type for server calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Outcome of a server-side action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult<T> {
    pub success: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub messages: Vec<String>,
}

impl<T> ActionResult<T> {
    /// A successful result carrying `result`
    pub fn ok(result: T) -> Self {
        Self {
            success: true,
            result: Some(result),
            errors: Vec::new(),
            warnings: Vec::new(),
            messages: Vec::new(),
        }
    }

    /// A failed result with the given errors
    pub fn failed(errors: Vec<String>) -> Self {
        Self {
            success: false,
            result: None,
            errors,
            warnings: Vec::new(),
            messages: Vec::new(),
        }
    }
}

/// New scores for a single match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScorePatch {
    pub match_id: Uuid,
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
}

/// Patch addressed to a round, nested along the round chain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundPatch {
    #[serde(rename = "match")]
    pub match_scores: Option<MatchScorePatch>,
    pub next_round: Option<Box<RoundPatch>>,
}

impl RoundPatch {
    /// Patch the match of the round `depth` steps after the root
    pub fn at_depth(depth: usize, scores: MatchScorePatch) -> Self {
        let mut patch = RoundPatch {
            match_scores: Some(scores),
            next_round: None,
        };
        for _ in 0..depth {
            patch = RoundPatch {
                match_scores: None,
                next_round: Some(Box::new(patch)),
            };
        }
        patch
    }

    /// Number of rounds after the root that the patch addresses
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Some(next) = current.next_round.as_deref() {
            depth += 1;
            current = next;
        }
        depth
    }
}

/// Partial update of a tournament
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentPatch {
    pub round: Option<RoundPatch>,
    pub additional_180: Option<PlayerRef>,
    pub additional_over_100_checkout: Option<HighCheckout>,
}

/// Request to attach a live-scoring session to a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveSessionRequest {
    pub tournament_id: TournamentId,
    pub match_id: Uuid,
    pub match_options: MatchOptions,
}

/// The tournament server
#[async_trait]
pub trait TournamentApi: Send + Sync {
    /// Fetch a tournament, `None` when it does not exist
    async fn get(&self, id: TournamentId) -> ApiResult<Option<Tournament>>;

    /// Replace the whole tournament
    async fn update(&self, tournament: &Tournament) -> ApiResult<ActionResult<Tournament>>;

    /// Apply a partial update
    async fn patch(
        &self,
        id: TournamentId,
        patch: &TournamentPatch,
    ) -> ApiResult<ActionResult<Tournament>>;

    /// Create a live-scoring session for a match
    async fn add_live_session(
        &self,
        request: &LiveSessionRequest,
    ) -> ApiResult<ActionResult<Tournament>>;

    /// Delete the live-scoring session of a match
    async fn delete_live_session(
        &self,
        id: TournamentId,
        match_id: Uuid,
    ) -> ApiResult<ActionResult<Tournament>>;
}

/// Channel that pushes canonical tournaments to every viewer
#[async_trait]
pub trait LiveChannel: Send + Sync {
    /// Publish the canonical tournament
    async fn publish(&self, tournament: &Tournament) -> ApiResult<()>;
}

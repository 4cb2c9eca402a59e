//! Session module tying local tournament edits to the tournament server.
//!
//! This module provides:
//! - The [`TournamentApi`] contract the server fulfils
//! - [`TournamentSession`], which owns the tournament being edited, guards
//!   against overlapping saves and adopts the server's canonical copy
//! - [`LiveUpdateHub`], an in-process publish/subscribe channel per tournament
//!
//! ## Example
//!
//! ```no_run
//! use darts_league::session::{LiveUpdateHub, TournamentApi, TournamentSession};
//! use std::sync::Arc;
//! use uuid::Uuid;
//!
//! async fn run<A: TournamentApi>(api: A, id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
//!     let hub = Arc::new(LiveUpdateHub::default());
//!     let session = TournamentSession::load(api, id).await?.with_live_channel(hub);
//!
//!     if !session.save().await? {
//!         println!("Save refused: {:?}", session.save_error().await);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod errors;
pub mod live;
pub mod screen;

pub use api::{
    ActionResult, ApiError, ApiResult, LiveChannel, LiveSessionRequest, MatchScorePatch,
    RoundPatch, TournamentApi, TournamentPatch,
};
pub use errors::{SaveError, SessionError, SessionResult};
pub use live::{LiveSubscription, LiveUpdateHub};
pub use screen::TournamentSession;

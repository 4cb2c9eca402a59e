//! Side module for building the entrants of a tournament.
//!
//! A side is either bound to a team or made of hand-picked players. This
//! module offers the teams and players that may be picked for a side in the
//! current season and division, flags players already committed elsewhere,
//! keeps auto-generated names in step with the players, and validates a side
//! before it is applied.

pub mod editor;
pub mod models;

pub use editor::{
    SideEditorContext, delete, save, set_name, set_team, toggle_no_show, toggle_player, validate,
};
pub use models::{AlreadyPlaying, CommittedTournament, PlayerOption, Team, TeamPlayer, TeamSeason};

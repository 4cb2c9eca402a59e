//! Tournament module for knockout darts tournaments.
//!
//! This module provides the tournament aggregate and its editing operations:
//! - Sides, player references, matches and the round chain
//! - Adding, renaming and removing sides with propagation into matches
//! - Round and match mutation on copies
//! - Accolade bookkeeping (180s and high checkouts)
//!
//! ## Example
//!
//! ```
//! use darts_league::tournament::{editor, models::{PlayerRef, Side, Tournament}};
//! use chrono::NaiveDate;
//! use uuid::Uuid;
//!
//! let tournament = Tournament::new(Uuid::new_v4(), NaiveDate::from_ymd_opt(2024, 5, 4).unwrap());
//! let side = Side::from_players(vec![PlayerRef::new(Uuid::new_v4(), "Amy")]);
//!
//! let tournament = editor::add_side(&tournament, side);
//! assert_eq!(tournament.sides[0].name, "Amy");
//! ```

pub mod editor;
pub mod errors;
pub mod models;
pub mod round;

pub use errors::{EditorError, EditorResult};
pub use models::{
    HighCheckout, Match, MatchOptions, MatchSlot, PlayerRef, Round, Side, SideId, Tournament,
    TournamentId, derive_side_name,
};

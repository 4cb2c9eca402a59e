//! # Darts League
//!
//! The tournament core of a darts-league scoring application: knockout
//! brackets of sides, the rounds they play, and the editing that keeps them
//! consistent.
//!
//! ## Architecture
//!
//! A tournament holds its sides and a singly linked chain of rounds. Each
//! round owns its matches and, optionally, the next round:
//!
//! - **Sides**: team-bound or hand-picked players, named from their players
//! - **Rounds**: matches with per-match options (legs, starting score)
//! - **Bracket**: printable stages projected from the round chain, with byes
//!   and names counted back from the final
//! - **Session**: the edited tournament kept in step with the server
//!
//! ## Core Modules
//!
//! - [`tournament`]: Data model, side and round editing, accolades
//! - [`side`]: Team and player selection for a side
//! - [`bracket`]: Layout projection and winner resolution
//! - [`session`]: Server contract, save/patch session, live updates
//! - [`prompt`]: Confirmation and alert seam
//!
//! ## Example
//!
//! ```
//! use darts_league::{bracket, tournament::{editor, models::{PlayerRef, Side, Tournament}}};
//! use chrono::NaiveDate;
//! use uuid::Uuid;
//!
//! let mut tournament = Tournament::new(Uuid::new_v4(), NaiveDate::from_ymd_opt(2024, 2, 3).unwrap());
//! for name in ["Amy", "Bob"] {
//!     let side = Side::from_players(vec![PlayerRef::new(Uuid::new_v4(), name)]);
//!     tournament = editor::add_side(&tournament, side);
//! }
//!
//! let rounds = bracket::bracket_layout(&tournament);
//! assert_eq!(rounds.len(), 1);
//! assert_eq!(rounds[0].name, "Final");
//! ```

/// Knockout bracket projection and winner resolution.
pub mod bracket;

/// Confirmation and alert prompts.
pub mod prompt;

/// Server contract, editing session and live updates.
pub mod session;

/// Team and player selection for sides.
pub mod side;

/// Tournament data model and editing.
pub mod tournament;

pub use bracket::{RoundLayout, bracket_layout, winning_side_id};
pub use prompt::Prompts;
pub use tournament::{Match, PlayerRef, Round, Side, Tournament};

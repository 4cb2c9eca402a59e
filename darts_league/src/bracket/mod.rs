//! Knockout bracket projection and winner resolution.
//!
//! This module turns the round chain of a tournament into printable stages:
//! - Unplayed projection from the number of sides, with byes for odd counts
//! - Played projection along the stored rounds, with placeholders for the rest
//! - Round naming counted back from the final
//! - Winner resolution from the final match
//!
//! ## Example
//!
//! ```
//! use darts_league::bracket::unplayed_layout;
//!
//! let rounds = unplayed_layout(6);
//! let names: Vec<&str> = rounds.iter().map(|r| r.name.as_str()).collect();
//! assert_eq!(names, vec!["Quarter-Final", "Semi-Final", "Final"]);
//! ```

pub mod layout;
pub mod winner;

pub use layout::{
    Entrant, MatchLayout, RoundLayout, bracket_layout, round_name, unplayed_layout,
};
pub use winner::{resolve_winner, winning_side_id};

//! Team roster and player selection models.

use crate::tournament::models::{PlayerRef, TournamentId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A player on a team's roster for one season
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPlayer {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub captain: bool,
}

/// A team's entry for one season
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSeason {
    pub season_id: Uuid,
    pub division_id: Uuid,
    #[serde(default)]
    pub players: Vec<TeamPlayer>,
}

/// A team and its seasons
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub seasons: Vec<TeamSeason>,
}

impl Team {
    /// The team's entry for a season, when it plays in the given division (or any division)
    pub fn season_entry(&self, season_id: Uuid, division_id: Option<Uuid>) -> Option<&TeamSeason> {
        self.seasons.iter().find(|ts| {
            ts.season_id == season_id && division_id.is_none_or(|d| ts.division_id == d)
        })
    }
}

/// Another tournament a player is already committed to on the same date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommittedTournament {
    pub id: TournamentId,
    /// Label shown to the editor, e.g. the type or address of the tournament
    pub label: String,
}

/// Players already committed elsewhere, keyed by player id
pub type AlreadyPlaying = HashMap<Uuid, Vec<CommittedTournament>>;

/// A player offered for selection into a side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerOption {
    pub player: PlayerRef,
    pub team_name: String,
    /// Already on the side being edited
    pub selected: bool,
    /// Committed to another tournament on the same date
    pub playing_elsewhere: Option<CommittedTournament>,
    /// Name of another side of this tournament the player is already on
    pub selected_on_side: Option<String>,
}

impl PlayerOption {
    /// Whether the option is shown but may not be selected
    pub fn disabled(&self) -> bool {
        !self.selected && (self.playing_elsewhere.is_some() || self.selected_on_side.is_some())
    }
}

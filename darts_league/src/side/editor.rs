//! Side editing: team and player selection, naming, validation.

use super::models::{AlreadyPlaying, CommittedTournament, PlayerOption, Team};
use crate::{
    prompt::{self, Prompts},
    tournament::{
        errors::{EditorError, EditorResult},
        models::{PlayerRef, Side, TournamentId, derive_side_name},
    },
};
use uuid::Uuid;

/// Everything the side editor needs to know about the surrounding tournament
#[derive(Debug, Clone, Copy)]
pub struct SideEditorContext<'a> {
    /// Tournament being edited, excluded from the already-playing lookup
    pub tournament_id: Option<TournamentId>,
    pub season_id: Uuid,
    /// Division filter; `None` accepts every division
    pub division_id: Option<Uuid>,
    pub teams: &'a [Team],
    pub already_playing: &'a AlreadyPlaying,
    /// All sides of the tournament, including the one being edited
    pub sides: &'a [Side],
}

impl<'a> SideEditorContext<'a> {
    /// Teams playing in the current season (and division), sorted by name
    pub fn eligible_teams(&self) -> Vec<&'a Team> {
        let mut teams: Vec<&Team> = self
            .teams
            .iter()
            .filter(|t| t.season_entry(self.season_id, self.division_id).is_some())
            .collect();
        teams.sort_by(|a, b| a.name.cmp(&b.name));
        teams
    }

    /// Players that may be selected into `side`, sorted by name
    ///
    /// Players committed elsewhere stay in the list but are disabled.
    pub fn player_options(&self, side: &Side) -> Vec<PlayerOption> {
        let mut options: Vec<PlayerOption> = Vec::new();

        for team in self.eligible_teams() {
            if side.team_id.is_some_and(|id| id != team.id) {
                continue;
            }
            let Some(entry) = team.season_entry(self.season_id, self.division_id) else {
                continue;
            };

            for player in &entry.players {
                if options.iter().any(|o| o.player.id == player.id) {
                    continue;
                }
                options.push(PlayerOption {
                    player: PlayerRef {
                        id: player.id,
                        name: player.name.clone(),
                        division_id: Some(entry.division_id),
                    },
                    team_name: team.name.clone(),
                    selected: side.has_player(player.id),
                    playing_elsewhere: self.playing_elsewhere(player.id),
                    selected_on_side: self.selected_on_other_side(side.id, player.id),
                });
            }
        }

        options.sort_by(|a, b| a.player.name.cmp(&b.player.name));
        options
    }

    fn playing_elsewhere(&self, player_id: Uuid) -> Option<CommittedTournament> {
        self.already_playing
            .get(&player_id)?
            .iter()
            .find(|t| Some(t.id) != self.tournament_id)
            .cloned()
    }

    fn selected_on_other_side(&self, side_id: Uuid, player_id: Uuid) -> Option<String> {
        self.sides
            .iter()
            .find(|s| s.id != side_id && s.has_player(player_id))
            .map(|s| s.name.clone())
    }
}

/// Select or deselect a player
///
/// When the side still carries the name derived from its players, the name is
/// regenerated; a name typed by hand is kept. A hand-typed name that happens
/// to equal the derived one is indistinguishable and will be regenerated too.
pub fn toggle_player(side: &Side, player: &PlayerRef) -> Side {
    let auto_named = side.has_derived_name();
    let mut updated = side.clone();

    if updated.has_player(player.id) {
        updated.players.retain(|p| p.id != player.id);
    } else {
        updated.players.push(player.clone());
    }

    if auto_named {
        updated.name = derive_side_name(&updated.players);
    }
    updated
}

/// Bind the side to a team (or unbind it)
///
/// Binding clears explicit players and names the side after the team when it
/// has no name yet.
pub fn set_team(side: &Side, team: Option<&Team>) -> Side {
    let mut updated = side.clone();
    match team {
        Some(team) => {
            updated.team_id = Some(team.id);
            updated.players.clear();
            if updated.name.trim().is_empty() {
                updated.name = team.name.clone();
            }
        }
        None => updated.team_id = None,
    }
    updated
}

/// Rename the side
pub fn set_name(side: &Side, name: &str) -> Side {
    Side {
        name: name.to_string(),
        ..side.clone()
    }
}

/// Flip the no-show flag
pub fn toggle_no_show(side: &Side) -> Side {
    Side {
        no_show: !side.no_show,
        ..side.clone()
    }
}

/// Check a side can be applied
pub fn validate(side: &Side) -> EditorResult<()> {
    if side.team_id.is_none() && side.players.is_empty() {
        return Err(EditorError::Validation(prompt::SELECT_TEAM_OR_PLAYERS.to_string()));
    }
    if side.name.trim().is_empty() {
        return Err(EditorError::Validation(prompt::ENTER_A_NAME.to_string()));
    }
    Ok(())
}

/// Validate the side and hand it to `on_apply`, alerting instead when it is invalid
///
/// Returns whether the side was applied.
pub fn save<F>(side: Side, prompts: &mut dyn Prompts, on_apply: F) -> bool
where
    F: FnOnce(Side),
{
    if let Err(err) = validate(&side) {
        prompts.alert(&err.to_string());
        return false;
    }

    on_apply(side);
    true
}

/// Ask for confirmation and hand the side to `on_delete`
///
/// Returns whether the side was deleted.
pub fn delete<F>(side: &Side, prompts: &mut dyn Prompts, on_delete: F) -> bool
where
    F: FnOnce(&Side),
{
    if !prompts.confirm(&prompt::confirm_remove_side(&side.name)) {
        return false;
    }

    log::info!("Removing side {} '{}'", side.id, side.name);
    on_delete(side);
    true
}

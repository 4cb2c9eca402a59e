//! Tournament aggregate editing.
//!
//! Every operation takes the current tournament by reference and returns the
//! updated aggregate, leaving the input untouched. Sides are held by value in
//! matches, so replacing a side walks the whole round chain and rewrites every
//! slot that carries its id.

use super::{
    errors::{EditorError, EditorResult},
    models::{
        HighCheckout, MAX_CHECKOUT, MIN_HIGH_CHECKOUT, PlayerRef, Round, Side, SideId, Tournament,
    },
};
use crate::prompt::{self, Prompts};
use uuid::Uuid;

/// Append a side, assigning an id when it has none
pub fn add_side(tournament: &Tournament, mut side: Side) -> Tournament {
    if side.id.is_nil() {
        side.id = Uuid::new_v4();
    }
    side.name = side.name.trim().to_string();

    log::debug!("Adding side {} '{}' to tournament {}", side.id, side.name, tournament.id);

    let mut updated = tournament.clone();
    updated.sides.push(side);
    updated
}

/// Replace the side at `index` and propagate it into every match that references it
pub fn update_side(tournament: &Tournament, index: usize, mut side: Side) -> EditorResult<Tournament> {
    let len = tournament.sides.len();
    if index >= len {
        return Err(EditorError::SideIndexOutOfRange { index, len });
    }
    side.name = side.name.trim().to_string();

    let mut updated = tournament.clone();
    if let Some(round) = updated.round.as_mut() {
        let replaced = propagate_side(round, &side);
        log::debug!("Side {} replaced in {} match slot(s)", side.id, replaced);
    }
    updated.sides[index] = side;

    Ok(updated)
}

/// Remove a side by id
///
/// Matches that still reference the side keep their copy; resolving them is
/// left to the caller.
pub fn remove_side(tournament: &Tournament, side_id: SideId) -> EditorResult<Tournament> {
    if tournament.side(side_id).is_none() {
        return Err(EditorError::SideNotFound(side_id));
    }

    let mut updated = tournament.clone();
    updated.sides.retain(|s| s.id != side_id);
    Ok(updated)
}

/// Replace the root round
pub fn set_round(tournament: &Tournament, round: Option<Round>) -> Tournament {
    let mut updated = tournament.clone();
    updated.round = round;
    updated
}

/// Overwrite every match slot holding `side`'s id with `side`, returning the number of slots replaced
pub fn propagate_side(round: &mut Round, side: &Side) -> usize {
    let mut replaced = 0;
    let mut current = Some(round);

    while let Some(round) = current {
        for m in &mut round.matches {
            for slot in [&mut m.side_a, &mut m.side_b] {
                if slot.as_ref().is_some_and(|s| s.id == side.id) {
                    *slot = Some(side.clone());
                    replaced += 1;
                }
            }
        }
        current = round.next_round.as_deref_mut();
    }

    replaced
}

/// Record a 180 thrown by a player
pub fn add_one_eighty(tournament: &Tournament, player: PlayerRef) -> Tournament {
    let mut updated = tournament.clone();
    updated.one_eighties.push(player);
    updated
}

/// Remove the 180 at `index`
pub fn remove_one_eighty(tournament: &Tournament, index: usize) -> EditorResult<Tournament> {
    if index >= tournament.one_eighties.len() {
        return Err(EditorError::AccoladeIndexOutOfRange(index));
    }

    let mut updated = tournament.clone();
    updated.one_eighties.remove(index);
    Ok(updated)
}

/// Record a high checkout, alerting when the score is out of range
pub fn add_high_checkout(
    tournament: &Tournament,
    player: PlayerRef,
    score: u32,
    prompts: &mut dyn Prompts,
) -> EditorResult<Tournament> {
    if !(MIN_HIGH_CHECKOUT..=MAX_CHECKOUT).contains(&score) {
        prompts.alert(prompt::CHECKOUT_OUT_OF_RANGE);
        return Err(EditorError::Validation(prompt::CHECKOUT_OUT_OF_RANGE.to_string()));
    }

    let mut updated = tournament.clone();
    updated.over_100_checkouts.push(HighCheckout { player, score });
    Ok(updated)
}

/// Remove the high checkout at `index`
pub fn remove_high_checkout(tournament: &Tournament, index: usize) -> EditorResult<Tournament> {
    if index >= tournament.over_100_checkouts.len() {
        return Err(EditorError::AccoladeIndexOutOfRange(index));
    }

    let mut updated = tournament.clone();
    updated.over_100_checkouts.remove(index);
    Ok(updated)
}

/// Players who may be credited with accolades: every distinct player of every side, by name
pub fn accolade_candidates(tournament: &Tournament) -> Vec<PlayerRef> {
    let mut players: Vec<PlayerRef> = Vec::new();
    for player in tournament.sides.iter().flat_map(|s| s.players.iter()) {
        if !players.iter().any(|p| p.id == player.id) {
            players.push(player.clone());
        }
    }
    players.sort_by(|a, b| a.name.cmp(&b.name));
    players
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::RecordingPrompts;
    use crate::tournament::models::Match;
    use chrono::NaiveDate;

    fn tournament() -> Tournament {
        Tournament::new(Uuid::new_v4(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    }

    #[test]
    fn test_add_side_assigns_id_and_trims() {
        let side = Side {
            name: "  Riverside  ".to_string(),
            ..Side::default()
        };
        let updated = add_side(&tournament(), side);

        assert_eq!(updated.sides.len(), 1);
        assert_eq!(updated.sides[0].name, "Riverside");
        assert!(!updated.sides[0].id.is_nil());
    }

    #[test]
    fn test_update_side_rejects_bad_index() {
        let err = update_side(&tournament(), 0, Side::default()).unwrap_err();
        assert_eq!(err, EditorError::SideIndexOutOfRange { index: 0, len: 0 });
    }

    #[test]
    fn test_propagate_side_counts_slots() {
        let side = Side::from_players(vec![PlayerRef::new(Uuid::new_v4(), "Amy")]);
        let other = Side::from_players(vec![PlayerRef::new(Uuid::new_v4(), "Bob")]);
        let mut round = Round::with_matches(vec![Match::new(Some(side.clone()), Some(other))])
            .then(Round::with_matches(vec![Match::new(None, Some(side.clone()))]));

        let renamed = Side {
            name: "Amy's side".to_string(),
            ..side
        };
        assert_eq!(propagate_side(&mut round, &renamed), 2);
        assert_eq!(round.matches[0].side_a.as_ref().unwrap().name, "Amy's side");
    }

    #[test]
    fn test_high_checkout_range() {
        let player = PlayerRef::new(Uuid::new_v4(), "Amy");
        let mut prompts = RecordingPrompts::default();

        assert!(add_high_checkout(&tournament(), player.clone(), 100, &mut prompts).is_err());
        assert!(add_high_checkout(&tournament(), player.clone(), 171, &mut prompts).is_err());
        assert_eq!(prompts.alerts.len(), 2);

        let updated = add_high_checkout(&tournament(), player, 170, &mut prompts).unwrap();
        assert_eq!(updated.over_100_checkouts[0].score, 170);
    }

    #[test]
    fn test_remove_one_eighty() {
        let player = PlayerRef::new(Uuid::new_v4(), "Amy");
        let with = add_one_eighty(&tournament(), player);
        assert!(remove_one_eighty(&with, 1).is_err());
        assert!(remove_one_eighty(&with, 0).unwrap().one_eighties.is_empty());
    }
}

//! Round and match mutation.
//!
//! Operations copy the round (and its matches) and return the copy, so the
//! caller can compare old and new values to detect a change.

use super::{
    errors::{EditorError, EditorResult},
    models::{Match, MatchOptions, MatchSlot, Round, Side},
};
use crate::prompt::{self, Prompts};
use uuid::Uuid;

fn check_index(round: &Round, index: usize) -> EditorResult<()> {
    if index >= round.matches.len() {
        return Err(EditorError::MatchIndexOutOfRange {
            index,
            len: round.matches.len(),
        });
    }
    Ok(())
}

/// Append a match with optional options
pub fn add_match(round: &Round, new_match: Match, options: Option<MatchOptions>) -> Round {
    let mut updated = round.clone();
    // keep the options list aligned with the matches before appending
    updated.match_options.resize(updated.matches.len(), None);
    updated.matches.push(new_match);
    updated.match_options.push(options);
    updated
}

/// Remove the match at `index` after confirmation
pub fn remove_match(round: &Round, index: usize, prompts: &mut dyn Prompts) -> EditorResult<Round> {
    check_index(round, index)?;

    if !prompts.confirm(prompt::CONFIRM_REMOVE_MATCH) {
        return Err(EditorError::Cancelled);
    }

    let mut updated = round.clone();
    updated.matches.remove(index);
    if index < updated.match_options.len() {
        updated.match_options.remove(index);
    }
    Ok(updated)
}

/// Record the scores of the match at `index`
pub fn set_scores(
    round: &Round,
    index: usize,
    score_a: Option<u32>,
    score_b: Option<u32>,
) -> EditorResult<Round> {
    check_index(round, index)?;

    let mut updated = round.clone();
    let m = &mut updated.matches[index];
    m.score_a = score_a;
    m.score_b = score_b;
    Ok(updated)
}

/// Change the options of the match at `index`
pub fn set_match_options(round: &Round, index: usize, options: MatchOptions) -> EditorResult<Round> {
    check_index(round, index)?;

    let mut updated = round.clone();
    updated.match_options.resize(updated.matches.len(), None);
    updated.match_options[index] = Some(options);
    Ok(updated)
}

/// Put a side (or nothing) into one slot of the match at `index`
pub fn set_side(round: &Round, index: usize, slot: MatchSlot, side: Option<Side>) -> EditorResult<Round> {
    check_index(round, index)?;

    let mut updated = round.clone();
    let m = &mut updated.matches[index];
    match slot {
        MatchSlot::SideA => m.side_a = side,
        MatchSlot::SideB => m.side_b = side,
    }
    Ok(updated)
}

/// Rename the round; a blank name clears it
pub fn set_name(round: &Round, name: Option<String>) -> Round {
    let mut updated = round.clone();
    updated.name = name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());
    updated
}

/// Replace the next round
pub fn set_next_round(round: &Round, next: Option<Round>) -> Round {
    let mut updated = round.clone();
    updated.next_round = next.map(Box::new);
    updated
}

/// Apply `change` to the match with `match_id` wherever it sits in the chain
pub fn update_match<F>(round: &Round, match_id: Uuid, change: F) -> EditorResult<Round>
where
    F: FnOnce(&mut Match),
{
    let mut updated = round.clone();
    let mut current = Some(&mut updated);

    while let Some(round) = current {
        if let Some(m) = round.matches.iter_mut().find(|m| m.id == match_id) {
            change(m);
            return Ok(updated);
        }
        current = round.next_round.as_deref_mut();
    }

    Err(EditorError::MatchNotFound(match_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::RecordingPrompts;

    fn two_match_round() -> Round {
        let mut round = Round::with_matches(vec![Match::default(), Match::default()]);
        round.match_options = vec![Some(MatchOptions::best_of(3)), Some(MatchOptions::best_of(7))];
        round
    }

    #[test]
    fn test_add_match_keeps_options_aligned() {
        let round = Round::with_matches(vec![Match::default()]);
        let updated = add_match(&round, Match::default(), Some(MatchOptions::best_of(9)));

        assert_eq!(updated.matches.len(), 2);
        assert_eq!(updated.match_options, vec![None, Some(MatchOptions::best_of(9))]);
        assert!(round.match_options.is_empty());
    }

    #[test]
    fn test_remove_match_declined() {
        let round = two_match_round();
        let mut prompts = RecordingPrompts::declining();

        let err = remove_match(&round, 0, &mut prompts).unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(prompts.confirmations, vec![prompt::CONFIRM_REMOVE_MATCH]);
    }

    #[test]
    fn test_remove_match_drops_options() {
        let round = two_match_round();
        let mut prompts = RecordingPrompts::accepting();

        let updated = remove_match(&round, 0, &mut prompts).unwrap();
        assert_eq!(updated.matches.len(), 1);
        assert_eq!(updated.match_options, vec![Some(MatchOptions::best_of(7))]);
        assert_eq!(round.matches.len(), 2);
    }

    #[test]
    fn test_set_scores_out_of_range() {
        let err = set_scores(&Round::new(), 0, Some(1), None).unwrap_err();
        assert_eq!(err, EditorError::MatchIndexOutOfRange { index: 0, len: 0 });
    }

    #[test]
    fn test_set_name_blank_clears() {
        let round = set_name(&Round::new(), Some("Plate".to_string()));
        assert_eq!(round.name.as_deref(), Some("Plate"));
        assert_eq!(set_name(&round, Some("  ".to_string())).name, None);
    }

    #[test]
    fn test_set_next_round_leaves_input() {
        let round = two_match_round();
        let final_round = Round::with_matches(vec![Match::new(None, None)]);

        let updated = set_next_round(&round, Some(final_round.clone()));
        assert_eq!(updated.next_round.as_deref(), Some(&final_round));
        assert_eq!(updated.matches, round.matches);
        assert!(round.next_round.is_none());

        assert!(set_next_round(&updated, None).next_round.is_none());
        assert!(updated.next_round.is_some());
    }

    #[test]
    fn test_update_match_in_next_round() {
        let target = Match::new(None, None);
        let id = target.id;
        let round = Round::with_matches(vec![Match::new(None, None)])
            .then(Round::with_matches(vec![target]));

        let updated = update_match(&round, id, |m| m.score_a = Some(3)).unwrap();
        let next = updated.next_round.as_deref().unwrap();
        assert_eq!(next.matches[0].score_a, Some(3));
        assert!(update_match(&round, Uuid::new_v4(), |_| {}).is_err());
    }
}

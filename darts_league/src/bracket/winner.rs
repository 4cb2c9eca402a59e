//! Overall winner of a knockout tournament.

use crate::tournament::models::{Round, Side, SideId, Tournament};

/// The side that won the final, if the bracket has finished
///
/// The terminal round must hold exactly one match with both sides and both
/// scores present, and one score must beat the other while exceeding half the
/// number of legs.
pub fn resolve_winner(round: &Round, default_best_of: Option<u32>) -> Option<&Side> {
    let terminal = round.terminal();
    let [final_match] = terminal.matches.as_slice() else {
        return None;
    };

    final_match.side_a.as_ref()?;
    final_match.side_b.as_ref()?;

    let options = terminal.options_for(0, default_best_of);
    final_match.winner(&options)
}

/// The id of the tournament winner, used to highlight the side list
pub fn winning_side_id(tournament: &Tournament) -> Option<SideId> {
    let round = tournament.round.as_ref()?;
    resolve_winner(round, tournament.best_of).map(|side| side.id)
}

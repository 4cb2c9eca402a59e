//! Bracket layout projection.
//!
//! Turns a tournament's round chain into one [`RoundLayout`] per stage, root
//! round first and final last. Until the root round has a recorded score the
//! whole bracket is projected from the number of sides alone; afterwards the
//! stored rounds are walked and whatever is left after the last stored round
//! is projected from placeholders.

use crate::tournament::models::{Match, MatchSlot, Round, Side, SideId, Tournament};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// An entrant occupying a slot of a bracket layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Entrant {
    /// Nobody is known for this slot yet
    Unknown,
    /// A known side
    Side { id: SideId, name: String },
    /// Whoever wins the match with this number
    WinnerOf { number: usize },
}

impl Entrant {
    /// The id of the side, when known
    pub fn side_id(&self) -> Option<SideId> {
        match self {
            Entrant::Side { id, .. } => Some(*id),
            _ => None,
        }
    }
}

impl From<&Side> for Entrant {
    fn from(side: &Side) -> Self {
        Entrant::Side {
            id: side.id,
            name: side.name.clone(),
        }
    }
}

impl From<Option<&Side>> for Entrant {
    fn from(side: Option<&Side>) -> Self {
        side.map_or(Entrant::Unknown, Entrant::from)
    }
}

impl fmt::Display for Entrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entrant::Unknown => Ok(()),
            Entrant::Side { name, .. } => write!(f, "{name}"),
            Entrant::WinnerOf { number } => write!(f, "winner(M{number})"),
        }
    }
}

/// One match of a round layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchLayout {
    /// Bracket-wide match number, starting at 1
    pub number: usize,
    pub side_a: Entrant,
    pub side_b: Entrant,
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
    pub winner: Option<MatchSlot>,
    pub sayg_id: Option<Uuid>,
}

impl MatchLayout {
    fn placeholder(number: usize, side_a: Entrant, side_b: Entrant) -> Self {
        Self {
            number,
            side_a,
            side_b,
            score_a: None,
            score_b: None,
            winner: None,
            sayg_id: None,
        }
    }

    /// Short label for the match, e.g. `M3`
    pub fn mnemonic(&self) -> String {
        format!("M{}", self.number)
    }

    /// The entrant that won, if the match has been decided
    pub fn winning_entrant(&self) -> Option<&Entrant> {
        self.winner.map(|slot| match slot {
            MatchSlot::SideA => &self.side_a,
            MatchSlot::SideB => &self.side_b,
        })
    }
}

/// Layout of a single bracket stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundLayout {
    pub name: String,
    pub matches: Vec<MatchLayout>,
    pub byes: Vec<Entrant>,
}

/// Default name of a round, given its 1-based position from the root and the number of rounds
pub fn round_name(position: usize, total_rounds: usize) -> String {
    match total_rounds.saturating_sub(position) {
        0 => "Final".to_string(),
        1 => "Semi-Final".to_string(),
        2 => "Quarter-Final".to_string(),
        _ => format!("Round: {position}"),
    }
}

/// Rounds collected before names can be assigned
struct PendingRound {
    name: Option<String>,
    matches: Vec<MatchLayout>,
    byes: Vec<Entrant>,
}

/// Accumulates rounds in root-first order
struct LayoutBuilder {
    best_of: Option<u32>,
    next_number: usize,
    rounds: Vec<PendingRound>,
}

impl LayoutBuilder {
    fn new(best_of: Option<u32>) -> Self {
        Self {
            best_of,
            next_number: 1,
            rounds: Vec::new(),
        }
    }

    fn take_number(&mut self) -> usize {
        let number = self.next_number;
        self.next_number += 1;
        number
    }

    /// Project stages for entrants that have not played yet, halving until one remains
    fn unplayed(&mut self, mut entrants: Vec<Entrant>, mut name: Option<String>) {
        while entrants.len() > 1 {
            let bye = if entrants.len() % 2 == 1 {
                entrants.pop()
            } else {
                None
            };

            let mut matches = Vec::with_capacity(entrants.len() / 2);
            let mut pairs = entrants.into_iter();
            while let (Some(side_a), Some(side_b)) = (pairs.next(), pairs.next()) {
                let number = self.take_number();
                matches.push(MatchLayout::placeholder(number, side_a, side_b));
            }

            entrants = matches
                .iter()
                .map(|m| Entrant::WinnerOf { number: m.number })
                .chain(bye.clone())
                .collect();

            self.rounds.push(PendingRound {
                name: name.take(),
                matches,
                byes: bye.into_iter().collect(),
            });
        }
    }

    /// Walk a stored round and everything after it
    fn played(&mut self, round: &Round, entrants: Vec<Entrant>) {
        if round.matches.is_empty() {
            self.unplayed(entrants, round.name.clone());
            return;
        }

        let mut matches = Vec::with_capacity(round.matches.len());
        let mut advancing = Vec::with_capacity(entrants.len());

        for (index, m) in round.matches.iter().enumerate() {
            let options = round.options_for(index, self.best_of);
            let winner = m.winning_slot(&options);
            let number = self.take_number();

            advancing.push(match winner {
                Some(slot) => Entrant::from(m.side(slot)),
                None => Entrant::WinnerOf { number },
            });
            matches.push(match_layout(number, m, winner));
        }

        let byes: Vec<Entrant> = entrants
            .into_iter()
            .filter(|e| {
                e.side_id()
                    .is_some_and(|id| !round.matches.iter().any(|m| m.involves(id)))
            })
            .collect();
        advancing.extend(byes.iter().cloned());

        self.rounds.push(PendingRound {
            name: round.name.clone(),
            matches,
            byes,
        });

        match round.next_round.as_deref() {
            Some(next) => self.played(next, advancing),
            None => self.unplayed(advancing, None),
        }
    }

    fn finish(self) -> Vec<RoundLayout> {
        let total = self.rounds.len();
        self.rounds
            .into_iter()
            .enumerate()
            .map(|(index, round)| RoundLayout {
                name: round.name.unwrap_or_else(|| round_name(index + 1, total)),
                matches: round.matches,
                byes: round.byes,
            })
            .collect()
    }
}

fn match_layout(number: usize, m: &Match, winner: Option<MatchSlot>) -> MatchLayout {
    MatchLayout {
        number,
        side_a: Entrant::from(m.side_a.as_ref()),
        side_b: Entrant::from(m.side_b.as_ref()),
        score_a: m.score_a,
        score_b: m.score_b,
        winner,
        sayg_id: m.sayg_id,
    }
}

/// Project the bracket for a number of sides with nothing played
pub fn unplayed_layout(side_count: usize) -> Vec<RoundLayout> {
    let mut builder = LayoutBuilder::new(None);
    builder.unplayed(vec![Entrant::Unknown; side_count], None);
    builder.finish()
}

/// Project the bracket of a tournament
pub fn bracket_layout(tournament: &Tournament) -> Vec<RoundLayout> {
    let sides: Vec<&Side> = tournament.playing_sides().collect();
    let mut builder = LayoutBuilder::new(tournament.best_of);

    match tournament.round.as_ref().filter(|r| r.has_scores()) {
        Some(round) => {
            log::debug!(
                "Projecting played bracket for tournament {} ({} sides)",
                tournament.id,
                sides.len()
            );
            builder.played(round, sides.into_iter().map(Entrant::from).collect());
        }
        None => builder.unplayed(vec![Entrant::Unknown; sides.len()], None),
    }

    builder.finish()
}

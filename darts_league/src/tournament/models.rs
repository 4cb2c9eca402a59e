//! Tournament data models: sides, matches, the round chain and the aggregate.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tournament ID type
pub type TournamentId = Uuid;

/// Side ID type
pub type SideId = Uuid;

/// Default number of legs in a match
pub const DEFAULT_BEST_OF: u32 = 5;

/// Default starting score for a leg
pub const DEFAULT_STARTING_SCORE: u32 = 501;

/// Lowest checkout that counts as a high checkout
pub const MIN_HIGH_CHECKOUT: u32 = 101;

/// Highest possible checkout with three darts
pub const MAX_CHECKOUT: u32 = 170;

/// A player copied into a side or an accolade list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRef {
    pub id: Uuid,
    pub name: String,
    pub division_id: Option<Uuid>,
}

impl PlayerRef {
    /// Create a player reference without a division
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            division_id: None,
        }
    }
}

/// A competing entrant: either bound to a team or an ad-hoc group of players
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Side {
    pub id: SideId,
    pub name: String,
    pub team_id: Option<Uuid>,
    #[serde(default)]
    pub players: Vec<PlayerRef>,
    #[serde(default)]
    pub no_show: bool,
}

impl Side {
    /// Create a player-bound side, naming it from its players
    pub fn from_players(players: Vec<PlayerRef>) -> Self {
        let name = derive_side_name(&players);
        Self {
            id: Uuid::new_v4(),
            name,
            team_id: None,
            players,
            no_show: false,
        }
    }

    /// Create a team-bound side
    pub fn for_team(team_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            team_id: Some(team_id),
            players: Vec::new(),
            no_show: false,
        }
    }

    /// Whether the current name is the one derived from the players
    pub fn has_derived_name(&self) -> bool {
        self.name == derive_side_name(&self.players)
    }

    /// Whether the side contains the given player
    pub fn has_player(&self, player_id: Uuid) -> bool {
        self.players.iter().any(|p| p.id == player_id)
    }
}

/// Derive a side name from its players: sorted by name, joined with ", "
pub fn derive_side_name(players: &[PlayerRef]) -> String {
    let mut names: Vec<&str> = players.iter().map(|p| p.name.as_str()).collect();
    names.sort_unstable();
    names.join(", ")
}

/// Per-match options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOptions {
    /// Number of legs (best-of)
    pub number_of_legs: u32,
    /// Starting score of each leg
    pub starting_score: u32,
}

impl MatchOptions {
    /// Options with the given best-of and the default starting score
    pub fn best_of(number_of_legs: u32) -> Self {
        Self {
            number_of_legs,
            starting_score: DEFAULT_STARTING_SCORE,
        }
    }

    /// Whether a score wins a match played under these options
    pub fn is_winning_score(&self, score: u32) -> bool {
        f64::from(score) > f64::from(self.number_of_legs) / 2.0
    }
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self::best_of(DEFAULT_BEST_OF)
    }
}

/// Which slot of a match a side occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchSlot {
    SideA,
    SideB,
}

/// A single match between two (optional) sides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: Uuid,
    pub side_a: Option<Side>,
    pub side_b: Option<Side>,
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
    /// Live-scoring session attached to this match
    pub sayg_id: Option<Uuid>,
}

impl Match {
    /// Create an unscored match between two sides
    pub fn new(side_a: Option<Side>, side_b: Option<Side>) -> Self {
        Self {
            id: Uuid::new_v4(),
            side_a,
            side_b,
            score_a: None,
            score_b: None,
            sayg_id: None,
        }
    }

    /// Set both scores
    pub fn with_scores(mut self, score_a: u32, score_b: u32) -> Self {
        self.score_a = Some(score_a);
        self.score_b = Some(score_b);
        self
    }

    /// Whether any score has been recorded
    pub fn has_score(&self) -> bool {
        self.score_a.is_some() || self.score_b.is_some()
    }

    /// Whether either slot holds the given side
    pub fn involves(&self, side_id: SideId) -> bool {
        self.side(MatchSlot::SideA).is_some_and(|s| s.id == side_id)
            || self.side(MatchSlot::SideB).is_some_and(|s| s.id == side_id)
    }

    /// The side in a slot
    pub fn side(&self, slot: MatchSlot) -> Option<&Side> {
        match slot {
            MatchSlot::SideA => self.side_a.as_ref(),
            MatchSlot::SideB => self.side_b.as_ref(),
        }
    }

    /// The slot whose side won under the given options, if any
    ///
    /// A side wins when its score exceeds half the number of legs. Missing
    /// scores or ties produce no winner.
    pub fn winning_slot(&self, options: &MatchOptions) -> Option<MatchSlot> {
        let (a, b) = (self.score_a?, self.score_b?);
        if options.is_winning_score(a) && a > b {
            Some(MatchSlot::SideA)
        } else if options.is_winning_score(b) && b > a {
            Some(MatchSlot::SideB)
        } else {
            None
        }
    }

    /// The side that won under the given options, if any
    pub fn winner(&self, options: &MatchOptions) -> Option<&Side> {
        self.winning_slot(options).and_then(|slot| self.side(slot))
    }
}

/// One stage of a single-elimination bracket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub id: Uuid,
    pub name: Option<String>,
    #[serde(default)]
    pub matches: Vec<Match>,
    /// Options for each match, index-aligned with `matches`
    #[serde(default)]
    pub match_options: Vec<Option<MatchOptions>>,
    pub next_round: Option<Box<Round>>,
}

impl Round {
    /// Create an empty round
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            ..Self::default()
        }
    }

    /// Create a round holding the given matches
    pub fn with_matches(matches: Vec<Match>) -> Self {
        Self {
            id: Uuid::new_v4(),
            matches,
            ..Self::default()
        }
    }

    /// Attach the next round
    pub fn then(mut self, next: Round) -> Self {
        self.next_round = Some(Box::new(next));
        self
    }

    /// Options for the match at `index`, falling back to `default_best_of`
    pub fn options_for(&self, index: usize, default_best_of: Option<u32>) -> MatchOptions {
        self.match_options
            .get(index)
            .copied()
            .flatten()
            .unwrap_or_else(|| MatchOptions::best_of(default_best_of.unwrap_or(DEFAULT_BEST_OF)))
    }

    /// Whether any match in this round has a recorded score
    pub fn has_scores(&self) -> bool {
        self.matches.iter().any(Match::has_score)
    }

    /// Iterate over this round and every round after it
    pub fn iter(&self) -> RoundIter<'_> {
        RoundIter {
            current: Some(self),
        }
    }

    /// The last round of the chain
    pub fn terminal(&self) -> &Round {
        let mut round = self;
        while let Some(next) = round.next_round.as_deref() {
            round = next;
        }
        round
    }

    /// Number of rounds in the chain, including this one
    pub fn depth(&self) -> usize {
        self.iter().count()
    }
}

/// Iterator over a round chain, root first
pub struct RoundIter<'a> {
    current: Option<&'a Round>,
}

impl<'a> Iterator for RoundIter<'a> {
    type Item = &'a Round;

    fn next(&mut self) -> Option<Self::Item> {
        let round = self.current?;
        self.current = round.next_round.as_deref();
        Some(round)
    }
}

/// A high checkout recorded against a player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighCheckout {
    #[serde(flatten)]
    pub player: PlayerRef,
    pub score: u32,
}

/// Tournament aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: TournamentId,
    pub date: NaiveDate,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "type", default)]
    pub tournament_type: Option<String>,
    pub notes: Option<String>,
    pub season_id: Uuid,
    pub division_id: Option<Uuid>,
    #[serde(default)]
    pub sides: Vec<Side>,
    pub round: Option<Round>,
    #[serde(default)]
    pub one_eighties: Vec<PlayerRef>,
    #[serde(default)]
    pub over_100_checkouts: Vec<HighCheckout>,
    /// Superleague: a single round of matches between two sides
    #[serde(default)]
    pub single_round: bool,
    pub best_of: Option<u32>,
    #[serde(default = "default_true")]
    pub accolades_count: bool,
    pub updated: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl Tournament {
    /// Create an empty tournament for a season and date
    pub fn new(season_id: Uuid, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            address: String::new(),
            tournament_type: None,
            notes: None,
            season_id,
            division_id: None,
            sides: Vec::new(),
            round: None,
            one_eighties: Vec::new(),
            over_100_checkouts: Vec::new(),
            single_round: false,
            best_of: None,
            accolades_count: true,
            updated: None,
        }
    }

    /// Find a side by id
    pub fn side(&self, side_id: SideId) -> Option<&Side> {
        self.sides.iter().find(|s| s.id == side_id)
    }

    /// Sides taking part in the bracket (no-shows excluded)
    pub fn playing_sides(&self) -> impl Iterator<Item = &Side> {
        self.sides.iter().filter(|s| !s.no_show)
    }

    /// Iterate over every round of the bracket, root first
    pub fn rounds(&self) -> RoundIter<'_> {
        RoundIter {
            current: self.round.as_ref(),
        }
    }

    /// Find a match anywhere in the round chain
    pub fn find_match(&self, match_id: Uuid) -> Option<&Match> {
        self.rounds()
            .flat_map(|r| r.matches.iter())
            .find(|m| m.id == match_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str) -> PlayerRef {
        PlayerRef::new(Uuid::new_v4(), name)
    }

    #[test]
    fn test_derive_side_name_sorts_by_name() {
        let players = vec![player("Zed"), player("Amy"), player("Bob")];
        assert_eq!(derive_side_name(&players), "Amy, Bob, Zed");
        assert_eq!(derive_side_name(&[]), "");
    }

    #[test]
    fn test_winning_score_threshold() {
        let options = MatchOptions::best_of(5);
        assert!(!options.is_winning_score(2));
        assert!(options.is_winning_score(3));

        let even = MatchOptions::best_of(4);
        assert!(!even.is_winning_score(2));
        assert!(even.is_winning_score(3));
    }

    #[test]
    fn test_match_winning_slot() {
        let options = MatchOptions::default();
        let m = Match::new(Some(Side::default()), Some(Side::default()));

        assert_eq!(m.clone().with_scores(3, 1).winning_slot(&options), Some(MatchSlot::SideA));
        assert_eq!(m.clone().with_scores(0, 3).winning_slot(&options), Some(MatchSlot::SideB));
        assert_eq!(m.clone().with_scores(2, 2).winning_slot(&options), None);
        assert_eq!(m.clone().with_scores(2, 1).winning_slot(&options), None);
        assert_eq!(m.winning_slot(&options), None);
    }

    #[test]
    fn test_round_options_fallback() {
        let mut round = Round::with_matches(vec![Match::default(), Match::default()]);
        round.match_options = vec![Some(MatchOptions::best_of(7))];

        assert_eq!(round.options_for(0, None).number_of_legs, 7);
        assert_eq!(round.options_for(1, None).number_of_legs, DEFAULT_BEST_OF);
        assert_eq!(round.options_for(1, Some(3)).number_of_legs, 3);
    }

    #[test]
    fn test_round_chain_iteration() {
        let round = Round::new().then(Round::new().then(Round::new()));
        assert_eq!(round.depth(), 3);
        assert!(round.terminal().next_round.is_none());
    }

    #[test]
    fn test_tournament_serializes_camel_case() {
        let tournament = Tournament::new(Uuid::nil(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let json = serde_json::to_value(&tournament).unwrap();
        assert!(json.get("seasonId").is_some());
        assert!(json.get("oneEighties").is_some());
        assert!(json.get("singleRound").is_some());
    }
}

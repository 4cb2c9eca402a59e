//! Plain-text printable bracket.

use darts_league::{
    bracket::{Entrant, MatchLayout, RoundLayout, bracket_layout},
    tournament::{PlayerRef, Side, Tournament},
};
use std::fmt;

/// Width of the entrant columns
const NAME_WIDTH: usize = 24;

/// Label printed for a slot nobody occupies yet
const UNKNOWN_LABEL: &str = "TBC";

/// A tournament ready to print: header, bracket stages, winner and accolades
pub struct PrintableBracket<'a> {
    tournament: &'a Tournament,
    rounds: Vec<RoundLayout>,
}

impl<'a> PrintableBracket<'a> {
    pub fn new(tournament: &'a Tournament) -> Self {
        Self {
            tournament,
            rounds: bracket_layout(tournament),
        }
    }

    /// The winning side, once the last projected stage is a single decided match
    fn winner(&self) -> Option<&'a Side> {
        let last = self.rounds.last().filter(|round| round.matches.len() == 1)?;
        let id = last.matches[0].winning_entrant()?.side_id()?;
        self.tournament.side(id)
    }
}

fn entrant_label(entrant: &Entrant) -> String {
    match entrant {
        Entrant::Unknown => UNKNOWN_LABEL.to_string(),
        other => other.to_string(),
    }
}

fn write_match(f: &mut fmt::Formatter<'_>, m: &MatchLayout) -> fmt::Result {
    let winner = m.winning_entrant();
    let mark = |entrant: &Entrant| {
        let label = entrant_label(entrant);
        if winner == Some(entrant) {
            format!("{label}*")
        } else {
            label
        }
    };

    let score = match (m.score_a, m.score_b) {
        (None, None) => " vs  ".to_string(),
        (a, b) => format!(
            "{} - {}",
            a.map_or("-".to_string(), |s| s.to_string()),
            b.map_or("-".to_string(), |s| s.to_string())
        ),
    };

    write!(
        f,
        "  {:<4}{:>width$}  {}  {}",
        m.mnemonic(),
        mark(&m.side_a),
        score,
        mark(&m.side_b),
        width = NAME_WIDTH
    )?;
    if m.sayg_id.is_some() {
        write!(f, "  (live)")?;
    }
    writeln!(f)
}

fn write_round(f: &mut fmt::Formatter<'_>, round: &RoundLayout) -> fmt::Result {
    writeln!(f, "{}", round.name)?;
    writeln!(f, "{}", "-".repeat(round.name.chars().count()))?;
    for m in &round.matches {
        write_match(f, m)?;
    }
    for bye in &round.byes {
        writeln!(f, "  Bye: {}", entrant_label(bye))?;
    }
    writeln!(f)
}

/// Players in name order with how many times each appears
fn tally(players: impl Iterator<Item = PlayerRef>) -> Vec<(String, usize)> {
    let mut counts: Vec<(PlayerRef, usize)> = Vec::new();
    for player in players {
        match counts.iter_mut().find(|(p, _)| p.id == player.id) {
            Some((_, count)) => *count += 1,
            None => counts.push((player, 1)),
        }
    }
    counts.sort_by(|(a, _), (b, _)| a.name.cmp(&b.name));
    counts.into_iter().map(|(p, count)| (p.name, count)).collect()
}

impl fmt::Display for PrintableBracket<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.tournament;

        let title = t.tournament_type.as_deref().unwrap_or("Tournament");
        write!(f, "{} - {}", title, t.date.format("%a %d %b %Y"))?;
        if !t.address.is_empty() {
            write!(f, " @ {}", t.address)?;
        }
        writeln!(f)?;
        if let Some(notes) = t.notes.as_deref().filter(|n| !n.trim().is_empty()) {
            writeln!(f, "{}", notes.trim())?;
        }
        writeln!(f)?;

        if self.rounds.is_empty() {
            writeln!(f, "Not enough sides for a bracket")?;
        }
        for round in &self.rounds {
            write_round(f, round)?;
        }

        if let Some(winner) = self.winner() {
            writeln!(f, "Winner: {}", winner.name)?;
        }

        if t.accolades_count && !t.one_eighties.is_empty() {
            let names: Vec<String> = tally(t.one_eighties.iter().cloned())
                .into_iter()
                .map(|(name, count)| if count > 1 { format!("{name} x{count}") } else { name })
                .collect();
            writeln!(f, "180s: {}", names.join(", "))?;
        }

        if t.accolades_count && !t.over_100_checkouts.is_empty() {
            let mut checkouts: Vec<_> = t.over_100_checkouts.iter().collect();
            checkouts.sort_by(|a, b| b.score.cmp(&a.score).then(a.player.name.cmp(&b.player.name)));
            let entries: Vec<String> = checkouts
                .iter()
                .map(|c| format!("{} ({})", c.player.name, c.score))
                .collect();
            writeln!(f, "Hi-checks: {}", entries.join(", "))?;
        }

        Ok(())
    }
}

/// Render a tournament as printable text
pub fn render_tournament(tournament: &Tournament) -> String {
    PrintableBracket::new(tournament).to_string()
}

//! Integration tests for bracket projection
//!
//! These tests build tournaments the way the editors do and verify the
//! printable stages, byes, names and winner that come out of them.

use chrono::NaiveDate;
use darts_league::{
    bracket::{Entrant, bracket_layout, unplayed_layout, winning_side_id},
    tournament::{
        editor,
        models::{Match, MatchOptions, MatchSlot, PlayerRef, Round, Side, Tournament},
    },
};
use uuid::Uuid;

fn side(name: &str) -> Side {
    Side::from_players(vec![PlayerRef::new(Uuid::new_v4(), name)])
}

fn tournament_with(names: &[&str]) -> Tournament {
    let mut tournament = Tournament::new(
        Uuid::new_v4(),
        NaiveDate::from_ymd_opt(2024, 4, 20).unwrap(),
    );
    for name in names {
        tournament = editor::add_side(&tournament, side(name));
    }
    tournament
}

fn scored(a: &Side, b: &Side, score_a: u32, score_b: u32) -> Match {
    Match::new(Some(a.clone()), Some(b.clone())).with_scores(score_a, score_b)
}

// ============================================================================
// Unplayed projection
// ============================================================================

#[test]
fn test_two_sides_unplayed() {
    let tournament = tournament_with(&["Amy", "Bob"]);
    let layout = bracket_layout(&tournament);

    assert_eq!(layout.len(), 1);
    assert_eq!(layout[0].name, "Final");
    assert_eq!(layout[0].matches.len(), 1);
    assert!(layout[0].byes.is_empty());
    assert_eq!(winning_side_id(&tournament), None);
}

#[test]
fn test_unscored_round_still_projects_from_count() {
    let mut tournament = tournament_with(&["Amy", "Bob", "Cat", "Dan"]);
    let (a, b) = (tournament.sides[0].clone(), tournament.sides[1].clone());
    tournament.round = Some(Round::with_matches(vec![Match::new(Some(a), Some(b))]));

    let layout = bracket_layout(&tournament);
    let names: Vec<&str> = layout.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Semi-Final", "Final"]);
    assert_eq!(layout[0].matches[0].side_a, Entrant::Unknown);
}

#[test]
fn test_sixteen_sides_names() {
    let layout = unplayed_layout(16);
    let names: Vec<&str> = layout.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Round: 1", "Quarter-Final", "Semi-Final", "Final"]);
    assert_eq!(layout[0].matches.len(), 8);
}

#[test]
fn test_no_show_sides_excluded() {
    let mut tournament = tournament_with(&["Amy", "Bob", "Cat"]);
    tournament.sides[2].no_show = true;

    let layout = bracket_layout(&tournament);
    assert_eq!(layout.len(), 1);
    assert!(layout[0].byes.is_empty());
}

// ============================================================================
// Played projection
// ============================================================================

#[test]
fn test_played_semi_finals_project_final() {
    let mut tournament = tournament_with(&["Amy", "Bob", "Cat", "Dan"]);
    let s = tournament.sides.clone();
    tournament.round = Some(Round::with_matches(vec![
        scored(&s[0], &s[1], 3, 1),
        scored(&s[2], &s[3], 1, 3),
    ]));

    let layout = bracket_layout(&tournament);
    assert_eq!(layout.len(), 2);
    assert_eq!(layout[0].name, "Semi-Final");
    assert_eq!(layout[0].matches[0].winner, Some(MatchSlot::SideA));
    assert_eq!(layout[0].matches[1].winner, Some(MatchSlot::SideB));

    let final_match = &layout[1].matches[0];
    assert_eq!(layout[1].name, "Final");
    assert_eq!(final_match.number, 3);
    assert_eq!(final_match.side_a.side_id(), Some(s[0].id));
    assert_eq!(final_match.side_b.side_id(), Some(s[3].id));
    assert_eq!(final_match.score_a, None);
}

#[test]
fn test_started_round_uses_placeholders() {
    let mut tournament = tournament_with(&["Amy", "Bob", "Cat"]);
    let s = tournament.sides.clone();
    tournament.round = Some(Round::with_matches(vec![scored(&s[0], &s[1], 1, 0)]));

    let layout = bracket_layout(&tournament);
    assert_eq!(layout.len(), 2);

    assert_eq!(layout[0].byes.len(), 1);
    assert_eq!(layout[0].byes[0].side_id(), Some(s[2].id));
    assert_eq!(layout[0].matches[0].winner, None);

    let final_match = &layout[1].matches[0];
    assert_eq!(final_match.side_a.to_string(), "winner(M1)");
    assert_eq!(final_match.side_b.to_string(), "Cat");
}

#[test]
fn test_stored_final_and_winner() {
    let mut tournament = tournament_with(&["Amy", "Bob", "Cat", "Dan"]);
    let s = tournament.sides.clone();
    let semis = Round::with_matches(vec![scored(&s[0], &s[1], 3, 1), scored(&s[2], &s[3], 1, 3)]);
    let final_round = Round::with_matches(vec![scored(&s[0], &s[3], 2, 3)]);
    tournament.round = Some(semis.then(final_round));

    let layout = bracket_layout(&tournament);
    assert_eq!(layout.len(), 2);
    assert_eq!(
        layout[1].matches[0].winning_entrant().and_then(Entrant::side_id),
        Some(s[3].id)
    );
    assert_eq!(winning_side_id(&tournament), Some(s[3].id));
}

#[test]
fn test_explicit_round_name_overrides() {
    let mut tournament = tournament_with(&["Amy", "Bob"]);
    let s = tournament.sides.clone();
    let mut round = Round::with_matches(vec![scored(&s[0], &s[1], 1, 1)]);
    round.name = Some("Plate Final".to_string());
    tournament.round = Some(round);

    let layout = bracket_layout(&tournament);
    assert_eq!(layout[0].name, "Plate Final");
}

#[test]
fn test_match_options_decide_winner() {
    let mut tournament = tournament_with(&["Amy", "Bob"]);
    let s = tournament.sides.clone();
    let mut round = Round::with_matches(vec![scored(&s[0], &s[1], 3, 1)]);
    round.match_options = vec![Some(MatchOptions::best_of(7))];
    tournament.round = Some(round);

    let layout = bracket_layout(&tournament);
    assert_eq!(layout[0].matches[0].winner, None);
    assert_eq!(winning_side_id(&tournament), None);

    tournament.best_of = Some(3);
    tournament.round.as_mut().unwrap().match_options.clear();
    assert_eq!(winning_side_id(&tournament), Some(s[0].id));
}

#[test]
fn test_rename_shows_in_layout() {
    let mut tournament = tournament_with(&["Amy", "Bob"]);
    let s = tournament.sides.clone();
    tournament.round = Some(Round::with_matches(vec![scored(&s[0], &s[1], 3, 0)]));

    let renamed = Side {
        name: "Amy & Co".to_string(),
        ..s[0].clone()
    };
    let tournament = editor::update_side(&tournament, 0, renamed).unwrap();

    let layout = bracket_layout(&tournament);
    assert_eq!(layout[0].matches[0].side_a.to_string(), "Amy & Co");
}

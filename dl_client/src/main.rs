//! A darts league tournament client.
//!
//! The client loads a tournament from the league server, prints its bracket,
//! and optionally follows live updates, reprinting on every change.

use anyhow::{Context, Result};
use darts_league::{
    session::TournamentSession,
    side::{AlreadyPlaying, SideEditorContext},
    tournament::Tournament,
};
use dl_client::{
    api_client::ApiClient,
    config::ClientConfig,
    logging,
    render::render_tournament,
    websocket_client::LiveUpdateClient,
};
use pico_args::Arguments;
use uuid::Uuid;

const HELP: &str = "\
Print a darts league tournament bracket

USAGE:
  dl_client [OPTIONS] --tournament ID

OPTIONS:
  --server URL          Server URL  [default: $DARTS_API_URL or http://localhost:5000]
  --tournament ID       Tournament to load

FLAGS:
  --teams               List the teams eligible for the tournament
  --watch               Follow live updates and reprint the bracket
  -h, --help            Print help information
";

struct Args {
    server_url: Option<String>,
    tournament_id: Uuid,
    list_teams: bool,
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        server_url: pargs.opt_value_from_str("--server")?,
        tournament_id: pargs
            .value_from_str("--tournament")
            .context("--tournament ID is required")?,
        list_teams: pargs.contains("--teams"),
        watch: pargs.contains("--watch"),
    };

    logging::init();
    run(args).await
}

async fn run(args: Args) -> Result<()> {
    let config = ClientConfig::from_env(args.server_url);
    config.validate()?;
    tracing::info!(api_url = %config.api_url, "Using tournament server");

    let api = ApiClient::with_timeout(config.api_url.clone(), config.request_timeout)?;
    let session = TournamentSession::load(api.clone(), args.tournament_id)
        .await
        .context("Failed to load tournament")?;

    let tournament = session.tournament().await;
    println!("{}", render_tournament(&tournament));

    if args.list_teams {
        print_eligible_teams(&api, &tournament).await?;
    }

    if args.watch {
        watch(&session, &config.live_url).await?;
    }

    Ok(())
}

async fn print_eligible_teams(api: &ApiClient, tournament: &Tournament) -> Result<()> {
    let seasons = api.list_seasons().await?;
    match seasons.iter().find(|s| s.id == tournament.season_id) {
        Some(season) => println!("Season: {}", season.name),
        None => tracing::warn!(season_id = %tournament.season_id, "Unknown season"),
    }
    if let Some(division_id) = tournament.division_id {
        let divisions = api.list_divisions().await?;
        if let Some(division) = divisions.iter().find(|d| d.id == division_id) {
            println!("Division: {}", division.name);
        }
    }

    let teams = api.list_teams().await?;
    let already_playing = AlreadyPlaying::new();
    let context = SideEditorContext {
        tournament_id: Some(tournament.id),
        season_id: tournament.season_id,
        division_id: tournament.division_id,
        teams: &teams,
        already_playing: &already_playing,
        sides: &tournament.sides,
    };

    let eligible = context.eligible_teams();
    if eligible.is_empty() {
        println!("No teams are playing in this season");
        return Ok(());
    }

    println!("Eligible teams:");
    for team in eligible {
        let players = team
            .season_entry(tournament.season_id, tournament.division_id)
            .map_or(0, |entry| entry.players.len());
        let entered = tournament.sides.iter().any(|s| s.team_id == Some(team.id));
        println!(
            "  {} ({} players){}",
            team.name,
            players,
            if entered { " - entered" } else { "" }
        );
    }
    Ok(())
}

async fn watch(session: &TournamentSession<ApiClient>, live_url: &str) -> Result<()> {
    let tournament_id = session.tournament().await.id;
    let mut updates = LiveUpdateClient::new(live_url.to_string())
        .subscribe(tournament_id)
        .await?;

    println!(
        "Watching tournament {} for live updates (Ctrl+C to stop)...\n",
        updates.tournament_id()
    );

    loop {
        tokio::select! {
            update = updates.next_update() => match update? {
                Some(tournament) => {
                    if session.apply_live_update(tournament).await {
                        // Clear screen and move cursor to top
                        print!("\x1B[2J\x1B[1;1H");
                        println!("{}", render_tournament(&session.tournament().await));
                    }
                }
                None => return Ok(()),
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Stopping live updates");
                break;
            }
        }
    }

    updates.close().await
}

mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use feed::config::PitchsideConfig;
use feed::generator::OllamaClient;
use feed::refresh::{self, NO_LIVE_MATCHES};
use feed::session::{MatchSession, select_match};
use feed::sources::ApiFootballClient;
use pitchside_types::{Fixture, FixtureId};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::warn;

#[derive(Parser)]
#[command(
    name = "pitchside",
    about = "Live football commentary from API-Football events and a local model"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the matches that are live right now.
    Fixtures,

    /// Follow one match: press Enter to fetch new commentary, `s` to switch
    /// match, `q` to quit.
    Follow {
        /// Fixture id to follow. Prompts with the live list when omitted.
        fixture: Option<FixtureId>,
    },
}

struct App {
    source: ApiFootballClient,
    generator: OllamaClient,
    poll_interval_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = PitchsideConfig::from_env()?;
    let app = App {
        source: ApiFootballClient::from_config(&config).context("build api-football client")?,
        generator: OllamaClient::from_config(&config)?,
        poll_interval_secs: config.poll_interval_secs,
    };

    match cli.command {
        Some(Commands::Fixtures) => run_fixtures(&app).await,
        Some(Commands::Follow { fixture }) => run_follow(&app, fixture).await,
        None => run_follow(&app, None).await,
    }
}

async fn run_fixtures(app: &App) -> Result<()> {
    let fixtures = load_fixtures(app).await;
    print!("{}", render::render_fixtures(&fixtures));
    Ok(())
}

async fn run_follow(app: &App, fixture: Option<FixtureId>) -> Result<()> {
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();

    let mut fixtures = Vec::new();
    let first = match fixture {
        Some(id) => id,
        None => {
            fixtures = load_fixtures(app).await;
            match pick_fixture(&fixtures, &mut stdin).await? {
                Some(id) => id,
                None => return Ok(()),
            }
        }
    };

    let mut session = select_match(None, first);
    announce(&session, &fixtures, app.poll_interval_secs);

    loop {
        println!("[Enter] fetch latest commentary  [s] switch match  [q] quit");
        let Some(input) = stdin.next_line().await? else {
            return Ok(());
        };
        match input.trim() {
            "q" | "quit" => return Ok(()),
            "s" | "switch" => {
                fixtures = load_fixtures(app).await;
                if let Some(id) = pick_fixture(&fixtures, &mut stdin).await? {
                    session = select_match(Some(session), id);
                    announce(&session, &fixtures, app.poll_interval_secs);
                }
            }
            _ => {
                println!("Fetching events and generating commentary...");
                let outcome = refresh::refresh(&mut session, &app.source, &app.generator).await;
                if let Some(error) = &outcome.error {
                    warn!(fixture = session.fixture_id(), "refresh failed");
                    eprintln!("{error}");
                }
                if let Some(notice) = outcome.notice() {
                    println!("{notice}");
                }
                println!("\n🗣️  Live Commentary Feed (latest on top)");
                print!("{}", render::render_feed(&session));
            }
        }
    }
}

async fn load_fixtures(app: &App) -> Vec<Fixture> {
    let listing = refresh::list_fixtures(&app.source).await;
    if let Some(error) = &listing.error {
        warn!("live fixture listing failed");
        eprintln!("{error}");
    } else if listing.fixtures.is_empty() {
        eprintln!("{NO_LIVE_MATCHES}");
    }
    listing.fixtures
}

async fn pick_fixture(
    fixtures: &[Fixture],
    stdin: &mut Lines<BufReader<Stdin>>,
) -> Result<Option<FixtureId>> {
    if fixtures.is_empty() {
        return Ok(None);
    }
    print!("{}", render::render_fixtures(fixtures));
    loop {
        println!("Select a live match (number or fixture id, empty to cancel):");
        let Some(input) = stdin.next_line().await? else {
            return Ok(None);
        };
        if input.trim().is_empty() {
            return Ok(None);
        }
        match render::parse_choice(&input, fixtures) {
            Some(id) => return Ok(Some(id)),
            None => eprintln!("no match for {:?}", input.trim()),
        }
    }
}

fn announce(session: &MatchSession, fixtures: &[Fixture], poll_interval_secs: u64) {
    let label = fixtures
        .iter()
        .find(|f| f.id == session.fixture_id())
        .map(Fixture::label)
        .unwrap_or_else(|| format!("fixture {}", session.fixture_id()));
    println!("📺 Tracking match: {label}");
    println!("⏱️  Refresh interval suggestion: {poll_interval_secs} seconds (manual refresh)");
}

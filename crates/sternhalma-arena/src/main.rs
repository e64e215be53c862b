//! Sternhalma Arena - plays computer matches and records them.

use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use sternhalma_arena::config::{ArenaConfig, Overrides};
use sternhalma_arena::json_output::write_json;
use sternhalma_arena::runner::MatchRunner;
use sternhalma_arena::storage::SqliteGateway;
use sternhalma_core::PlayerCount;
use sternhalma_engine::movegen::perft_divide;
use sternhalma_engine::{Board, Controller, GameSession, SessionConfig, VictoryRule};
use tokio::signal;

#[derive(Parser)]
#[command(name = "sternhalma-arena")]
#[command(about = "Sternhalma computer player arena")]
struct Cli {
    /// Configuration file
    #[arg(long, default_value_os_t = ArenaConfig::config_path())]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play matches between computer players
    Match {
        /// Agent for each seat, comma separated (e.g. greedy,random)
        #[arg(short, long, value_delimiter = ',')]
        players: Option<Vec<String>>,
        /// Number of games to play
        #[arg(short, long)]
        games: Option<u32>,
        /// Turn limit per game
        #[arg(long)]
        max_turns: Option<u32>,
        /// Base seed for random players
        #[arg(long)]
        seed: Option<u64>,
        /// Victory rule: standard or lenient
        #[arg(long)]
        victory: Option<VictoryRule>,
        /// Path to SQLite database
        #[arg(long)]
        db: Option<PathBuf>,
        /// Directory for JSON exports
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },
    /// Count move sequences from the starting position
    Perft {
        /// Number of players
        #[arg(short, long, default_value = "2")]
        players: u8,
        /// Search depth in turns
        #[arg(short, long, default_value = "2")]
        depth: u32,
    },
    /// Print the starting board
    Show {
        /// Number of players
        #[arg(short, long, default_value = "2")]
        players: u8,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Match {
            players,
            games,
            max_turns,
            seed,
            victory,
            db,
            export_dir,
        } => {
            let mut config = ArenaConfig::load_from(&cli.config)?;
            config.apply(Overrides {
                players,
                games,
                max_turns,
                seed,
                victory,
                database: db,
                export_dir,
            });
            run_matches(config).await
        }
        Commands::Perft { players, depth } => {
            let count = player_count(players)?;
            let board = Board::starting(count);
            let divide = perft_divide(&board, count.corners(), depth);
            let mut total = 0;
            for (m, nodes) in &divide {
                println!("{}: {}", m, nodes);
                total += nodes;
            }
            println!();
            println!("Moves: {}", divide.len());
            println!("Nodes: {}", total);
            Ok(())
        }
        Commands::Show { players } => {
            let count = player_count(players)?;
            let board = Board::starting(count);
            println!("{}", board);
            println!("{}", board.to_notation());
            Ok(())
        }
    }
}

fn player_count(players: u8) -> anyhow::Result<PlayerCount> {
    PlayerCount::new(players)
        .ok_or_else(|| anyhow::anyhow!("unsupported number of players: {}", players))
}

async fn run_matches(config: ArenaConfig) -> anyhow::Result<()> {
    let players = config.player_count()?;
    tracing::info!("Players: {}", config.players.join(", "));
    tracing::info!("Games: {}, turn limit: {}", config.games, config.max_turns);
    tracing::info!("Database: {:?}", config.database);

    if let Some(parent) = config.database.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if let Some(dir) = &config.export_dir {
        std::fs::create_dir_all(dir)?;
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl+c: {}", e);
            return;
        }
        tracing::info!("Shutdown signal received");
        shutdown_clone.store(true, Ordering::SeqCst);
    });

    let runner = MatchRunner::new(config.max_turns).with_shutdown(shutdown.clone());
    let mut gateway = SqliteGateway::open(&config.database)?;
    let mut wins: BTreeMap<String, u32> = BTreeMap::new();
    let mut unfinished = 0;

    for game in 1..=config.games {
        if shutdown.load(Ordering::SeqCst) {
            break;
        }
        let session_config = SessionConfig::new(players.get() as u8)?
            .with_controllers(std::iter::repeat(Controller::Computer))
            .with_victory(config.victory);
        let agents = config.build_agents(game)?;
        let mut session = GameSession::new(session_config, gateway);
        let report = runner.run(&mut session, agents).await?;
        gateway = session.into_gateway();
        let id = gateway.match_id().to_string();

        if report.persistence_degraded {
            tracing::warn!("Match {} was only partially recorded", id);
        }
        if let Err(e) = gateway.save_result(&report) {
            tracing::error!("Failed to save match {}: {}", id, e);
        }
        if let Some(dir) = &config.export_dir {
            let path = dir.join(format!("{}.json", id));
            if let Err(e) = write_json(&path, &id, &report) {
                tracing::error!("Failed to write {:?}: {}", path, e);
            }
        }

        match report.winner_name() {
            Some(name) => {
                *wins.entry(name.to_string()).or_default() += 1;
                println!(
                    "Game {}: {} ({}) wins in {} turns",
                    game,
                    report.winner().map(|c| c.to_string()).unwrap_or_default(),
                    name,
                    report.turns
                );
            }
            None => {
                unfinished += 1;
                println!("Game {}: no winner after {} turns", game, report.turns);
            }
        }
    }

    println!();
    for (name, count) in &wins {
        let (games, total_wins) = gateway.agent_stats(name).unwrap_or_else(|e| {
            tracing::warn!("Failed to read stats for {}: {}", name, e);
            (0, 0)
        });
        println!("{}: {} wins this run ({}/{} overall)", name, count, total_wins, games);
    }
    println!("Unfinished: {}", unfinished);
    Ok(())
}

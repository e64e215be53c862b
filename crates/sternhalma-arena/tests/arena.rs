use sternhalma_arena::config::ArenaConfig;
use sternhalma_arena::json_output::write_json;
use sternhalma_arena::runner::{MatchEnd, MatchRunner};
use sternhalma_arena::storage::SqliteGateway;
use sternhalma_engine::{Board, Controller, GameSession, PersistenceGateway, SessionConfig};

fn computer_session(players: u8, gateway: SqliteGateway) -> GameSession<SqliteGateway> {
    let config = SessionConfig::new(players)
        .unwrap()
        .with_controllers(std::iter::repeat(Controller::Computer));
    GameSession::new(config, gateway)
}

fn config(players: &[&str]) -> ArenaConfig {
    ArenaConfig {
        players: players.iter().map(|p| p.to_string()).collect(),
        ..ArenaConfig::default()
    }
}

#[tokio::test]
async fn test_every_move_is_stored() {
    let arena = config(&["random", "random", "random"]);
    let mut session = computer_session(3, SqliteGateway::open_in_memory().unwrap());
    let report = MatchRunner::new(30)
        .run(&mut session, arena.build_agents(1).unwrap())
        .await
        .unwrap();

    assert_eq!(report.end, MatchEnd::TurnLimit);
    assert!(!report.persistence_degraded);

    let gateway = session.gateway();
    let stored = gateway.moves_for(gateway.match_id()).unwrap();
    let played: usize = report.history.iter().map(|t| t.chain.len()).sum();
    assert_eq!(stored.len(), played);
    // One row per played turn plus the turn left open when the limit hit.
    assert_eq!(gateway.turn_count(gateway.match_id()).unwrap(), 31);
}

#[tokio::test]
async fn test_piece_ids_follow_the_final_board() {
    let arena = config(&["greedy", "random"]);
    let mut session = computer_session(2, SqliteGateway::open_in_memory().unwrap());
    MatchRunner::new(40)
        .run(&mut session, arena.build_agents(1).unwrap())
        .await
        .unwrap();

    let board = session.board().clone();
    let gateway = session.gateway();
    for corner in session.seats().iter().map(|s| s.corner) {
        let mut ids: Vec<String> = board
            .pieces_of(corner)
            .map(|cell| gateway.lookup_piece_id(cell).unwrap().0)
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 10);
        assert!(ids.iter().all(|id| id.starts_with(&format!("P{}-", corner.index()))));
    }
}

#[tokio::test]
async fn test_gateway_is_reused_across_games() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("arena.db");
    let arena = config(&["random", "random"]);
    let runner = MatchRunner::new(10);
    let mut gateway = SqliteGateway::open(&db).unwrap();
    let mut ids = Vec::new();

    for game in 1..=2 {
        let mut session = computer_session(2, gateway);
        let report = runner
            .run(&mut session, arena.build_agents(game).unwrap())
            .await
            .unwrap();
        gateway = session.into_gateway();
        gateway.save_result(&report).unwrap();
        ids.push(gateway.match_id().to_string());
    }

    assert_ne!(ids[0], ids[1]);
    assert_eq!(gateway.agent_stats("random").unwrap(), (4, 0));
    for id in &ids {
        assert_eq!(gateway.turn_count(id).unwrap(), 11);
    }
}

#[tokio::test]
async fn test_exported_match_replays_to_final_board() {
    let dir = tempfile::tempdir().unwrap();
    let arena = config(&["random", "greedy"]);
    let mut session = computer_session(2, SqliteGateway::open_in_memory().unwrap());
    let report = MatchRunner::new(25)
        .run(&mut session, arena.build_agents(3).unwrap())
        .await
        .unwrap();

    let path = dir.path().join("match.json");
    write_json(&path, session.gateway().match_id(), &report).unwrap();
    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

    let mut board = Board::starting(sternhalma_core::PlayerCount::TWO);
    for turn in parsed["history"].as_array().unwrap() {
        let chain: sternhalma_core::MoveChain =
            serde_json::from_value(turn["chain"].clone()).unwrap();
        for m in &chain {
            board = board.with_move(m);
        }
    }
    assert_eq!(board.to_notation(), report.final_board);
}

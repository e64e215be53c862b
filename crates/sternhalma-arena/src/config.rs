//! Configuration file loading for the arena.
//!
//! Settings come from `arena.toml` in the working directory, if present,
//! with command-line flags layered on top through [`Overrides`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use sternhalma_bots::{agent_by_name, GreedyAgent, GreedyWeights, MctsAgent, MctsSettings, UnknownAgent};
use sternhalma_core::PlayerCount;
use sternhalma_engine::{Agent, VictoryRule};
use thiserror::Error;

/// Errors that can occur when loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The player list does not form a 2, 3, 4 or 6 player game.
    #[error("Unsupported number of players: {0} (expected 2, 3, 4 or 6)")]
    UnsupportedPlayers(usize),
    /// A player names an agent that does not exist.
    #[error(transparent)]
    UnknownAgent(#[from] UnknownAgent),
}

/// Main arena configuration.
///
/// `players` lists one agent name per seat, in seating order. Its length
/// decides the number of players.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ArenaConfig {
    /// Agent name for each seat. Defaults to two greedy players.
    #[serde(default = "default_players")]
    pub players: Vec<String>,
    /// Number of games to play. Defaults to 1.
    #[serde(default = "default_games")]
    pub games: u32,
    /// Turns after which an unfinished game is abandoned. Defaults to 600.
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
    /// Base seed for random agents.
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub victory: VictoryRule,
    /// SQLite database path. Defaults to `data/arena.db`.
    #[serde(default = "default_database")]
    pub database: PathBuf,
    /// Directory for JSON exports. Nothing is exported when unset.
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
    /// Heuristic weights for greedy players.
    #[serde(default)]
    pub greedy: GreedyWeights,
    /// Search budget for Monte Carlo players.
    #[serde(default)]
    pub mcts: MctsSettings,
}

fn default_players() -> Vec<String> {
    vec!["greedy".to_string(), "greedy".to_string()]
}

fn default_games() -> u32 {
    1
}

fn default_max_turns() -> u32 {
    600
}

fn default_database() -> PathBuf {
    PathBuf::from("data/arena.db")
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            players: default_players(),
            games: default_games(),
            max_turns: default_max_turns(),
            seed: 0,
            victory: VictoryRule::default(),
            database: default_database(),
            export_dir: None,
            greedy: GreedyWeights::default(),
            mcts: MctsSettings::default(),
        }
    }
}

/// Command-line values that replace configured ones when present.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub players: Option<Vec<String>>,
    pub games: Option<u32>,
    pub max_turns: Option<u32>,
    pub seed: Option<u64>,
    pub victory: Option<VictoryRule>,
    pub database: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
}

impl ArenaConfig {
    /// Loads configuration from `path`, falling back to defaults if the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default path to the configuration file, `arena.toml` in
    /// the current working directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("arena.toml")
    }

    /// Replaces every configured value that `overrides` sets.
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(players) = overrides.players {
            self.players = players;
        }
        if let Some(games) = overrides.games {
            self.games = games;
        }
        if let Some(max_turns) = overrides.max_turns {
            self.max_turns = max_turns;
        }
        if let Some(seed) = overrides.seed {
            self.seed = seed;
        }
        if let Some(victory) = overrides.victory {
            self.victory = victory;
        }
        if let Some(database) = overrides.database {
            self.database = database;
        }
        if overrides.export_dir.is_some() {
            self.export_dir = overrides.export_dir;
        }
    }

    /// Returns the number of players implied by the seat list.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedPlayers`] for any seat count other
    /// than 2, 3, 4 or 6.
    pub fn player_count(&self) -> Result<PlayerCount, ConfigError> {
        u8::try_from(self.players.len())
            .ok()
            .and_then(PlayerCount::new)
            .ok_or(ConfigError::UnsupportedPlayers(self.players.len()))
    }

    /// Builds one agent per seat for game number `game` (starting at 1).
    ///
    /// Random and Monte Carlo agents are seeded from the base seed, the game number and the
    /// seat, so every game of a run plays out differently but reproducibly.
    pub fn build_agents(&self, game: u32) -> Result<Vec<Box<dyn Agent + Send>>, ConfigError> {
        self.player_count()?;
        self.players
            .iter()
            .enumerate()
            .map(|(seat, name)| {
                let agent: Box<dyn Agent + Send> = match name.as_str() {
                    "greedy" => Box::new(GreedyAgent::with_weights(self.greedy)),
                    "mcts" => Box::new(MctsAgent::with_settings(self.mcts, self.agent_seed(game, seat))),
                    other => agent_by_name(other, self.agent_seed(game, seat))?,
                };
                Ok(agent)
            })
            .collect()
    }

    fn agent_seed(&self, game: u32, seat: usize) -> u64 {
        self.seed
            .wrapping_add(u64::from(game).wrapping_mul(1_000))
            .wrapping_add(seat as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
players = ["greedy", "random", "random"]
games = 5
max_turns = 200
seed = 42
victory = "lenient"
database = "/tmp/sternhalma.db"
export_dir = "exports"

[greedy]
progress = 2.0
reverse = 0.0

[mcts]
simulations = 64
"#;

        let config: ArenaConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.players, vec!["greedy", "random", "random"]);
        assert_eq!(config.games, 5);
        assert_eq!(config.max_turns, 200);
        assert_eq!(config.seed, 42);
        assert_eq!(config.victory, VictoryRule::Lenient);
        assert_eq!(config.database, PathBuf::from("/tmp/sternhalma.db"));
        assert_eq!(config.export_dir, Some(PathBuf::from("exports")));
        assert_eq!(config.greedy.progress, 2.0);
        assert_eq!(config.greedy.reverse, 0.0);
        assert_eq!(config.greedy.win, GreedyWeights::default().win);
        assert_eq!(config.mcts.simulations, 64);
        assert_eq!(config.mcts.rollout_depth, MctsSettings::default().rollout_depth);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: ArenaConfig = toml::from_str("").unwrap();
        assert_eq!(config, ArenaConfig::default());
        assert_eq!(config.players, vec!["greedy", "greedy"]);
        assert_eq!(config.games, 1);
        assert_eq!(config.max_turns, 600);
        assert_eq!(config.victory, VictoryRule::Standard);
        assert_eq!(config.database, PathBuf::from("data/arena.db"));
        assert!(config.export_dir.is_none());
    }

    #[test]
    fn test_invalid_victory_rule_fails_to_parse() {
        let result: Result<ArenaConfig, _> = toml::from_str(r#"victory = "strict""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_path() {
        assert_eq!(ArenaConfig::config_path(), PathBuf::from("arena.toml"));
    }

    #[test]
    fn test_load_from_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = ArenaConfig::load_from(dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, ArenaConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arena.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "players = [\"random\", \"random\", \"random\", \"random\"]").unwrap();
        writeln!(file, "max_turns = 50").unwrap();

        let config = ArenaConfig::load_from(&path).unwrap();
        assert_eq!(config.players.len(), 4);
        assert_eq!(config.max_turns, 50);
        assert_eq!(config.games, 1);
    }

    #[test]
    fn test_load_from_invalid_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arena.toml");
        std::fs::write(&path, "players = [").unwrap();

        let result = ArenaConfig::load_from(&path);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_overrides_replace_only_set_values() {
        let mut config = ArenaConfig {
            export_dir: Some(PathBuf::from("exports")),
            ..ArenaConfig::default()
        };
        config.apply(Overrides {
            players: Some(vec!["random".to_string(); 6]),
            seed: Some(9),
            victory: Some(VictoryRule::Lenient),
            ..Overrides::default()
        });

        assert_eq!(config.players.len(), 6);
        assert_eq!(config.seed, 9);
        assert_eq!(config.victory, VictoryRule::Lenient);
        assert_eq!(config.max_turns, 600);
        assert_eq!(config.export_dir, Some(PathBuf::from("exports")));
    }

    #[test]
    fn test_player_count_validation() {
        let mut config = ArenaConfig::default();
        assert_eq!(config.player_count().unwrap(), PlayerCount::TWO);

        config.players = vec!["greedy".to_string(); 6];
        assert_eq!(config.player_count().unwrap(), PlayerCount::SIX);

        for n in [0, 1, 5, 7] {
            config.players = vec!["greedy".to_string(); n];
            assert!(matches!(
                config.player_count(),
                Err(ConfigError::UnsupportedPlayers(len)) if len == n
            ));
        }
    }

    #[test]
    fn test_build_agents() {
        let config = ArenaConfig {
            players: vec!["greedy".into(), "random".into(), "random".into()],
            ..ArenaConfig::default()
        };
        let agents = config.build_agents(1).unwrap();
        let names: Vec<&str> = agents.iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["greedy", "random", "random"]);
    }

    #[test]
    fn test_build_mcts_agent_with_configured_budget() {
        let config = ArenaConfig {
            players: vec!["mcts".into(), "random".into()],
            mcts: MctsSettings {
                simulations: 12,
                ..MctsSettings::default()
            },
            ..ArenaConfig::default()
        };
        let agents = config.build_agents(2).unwrap();
        assert_eq!(agents[0].name(), "mcts");
        assert_eq!(agents[1].name(), "random");
    }

    #[test]
    fn test_build_agents_rejects_unknown_name() {
        let config = ArenaConfig {
            players: vec!["greedy".into(), "minimax".into()],
            ..ArenaConfig::default()
        };
        let err = config.build_agents(1).err().unwrap();
        assert!(matches!(err, ConfigError::UnknownAgent(UnknownAgent(ref name)) if name == "minimax"));
        assert!(err.to_string().contains("minimax"));
    }

    #[test]
    fn test_agent_seeds_differ_per_game_and_seat() {
        let config = ArenaConfig::default();
        assert_ne!(config.agent_seed(1, 0), config.agent_seed(1, 1));
        assert_ne!(config.agent_seed(1, 0), config.agent_seed(2, 0));
        assert_eq!(config.agent_seed(3, 1), config.agent_seed(3, 1));
    }
}

//! Victory rules.
//!
//! Movement is the same in every game; what varies is when a player counts
//! as finished. The [`RuleSet`] trait abstracts over that, and
//! [`VictoryRule`] selects an implementation by name from configuration.

mod lenient;
mod standard;

pub use lenient::LenientRules;
pub use standard::StandardRules;

use crate::Board;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use sternhalma_core::Corner;

/// Trait for victory conditions.
///
/// # Example
///
/// ```
/// use sternhalma_engine::{build_board, RuleSet, StandardRules};
/// use sternhalma_core::Corner;
///
/// let board = build_board(2).unwrap();
/// assert!(!StandardRules.has_won(&board, Corner::North));
/// assert_eq!(StandardRules.check_victory(&board, &[Corner::North, Corner::South]), None);
/// ```
pub trait RuleSet {
    /// Returns true if the corner has finished.
    fn has_won(&self, board: &Board, corner: Corner) -> bool;

    /// Returns the first seated corner that has finished, in seat order.
    fn check_victory(&self, board: &Board, seats: &[Corner]) -> Option<Corner> {
        seats.iter().copied().find(|&corner| self.has_won(board, corner))
    }
}

/// Selects a [`RuleSet`] by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VictoryRule {
    /// All ten pieces in the target triangle.
    #[default]
    Standard,
    /// Every remaining piece in the target triangle.
    Lenient,
}

impl VictoryRule {
    /// Returns the rule set this selects.
    pub fn rules(self) -> &'static dyn RuleSet {
        match self {
            VictoryRule::Standard => &StandardRules,
            VictoryRule::Lenient => &LenientRules,
        }
    }
}

impl fmt::Display for VictoryRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VictoryRule::Standard => write!(f, "standard"),
            VictoryRule::Lenient => write!(f, "lenient"),
        }
    }
}

impl FromStr for VictoryRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(VictoryRule::Standard),
            "lenient" => Ok(VictoryRule::Lenient),
            other => Err(format!(
                "unknown victory rule '{}' (expected \"standard\" or \"lenient\")",
                other
            )),
        }
    }
}

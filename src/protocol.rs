//! Messages exchanged with the transport layer.

use serde::{Deserialize, Serialize};

/// One board update as delivered by the game server.
///
/// The diffs are relative to the running full sequences the session keeps
/// between ticks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickEvent {
    /// Server turn counter.
    pub turn: u32,
    /// Diff against the previous flat map sequence.
    #[serde(alias = "mapDiff")]
    pub map_diff: Vec<i32>,
    /// Diff against the previous city list.
    #[serde(alias = "citiesDiff")]
    pub cities_diff: Vec<i32>,
    /// General tile per player, `-1` when undiscovered.
    pub generals: Vec<i32>,
    /// Swamp tiles. Only the first update of a match carries them.
    #[serde(default)]
    pub swamps: Vec<usize>,
}

/// A single troop movement between adjacent tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Command {
    /// Tile the army leaves.
    pub from: usize,
    /// Adjacent tile the army enters.
    pub to: usize,
    /// Move only half of the source army.
    #[serde(default)]
    pub half: bool,
}

impl Command {
    /// A full-army move.
    #[must_use]
    pub const fn new(from: usize, to: usize) -> Self {
        Self {
            from,
            to,
            half: false,
        }
    }

    /// A half-army move.
    #[must_use]
    pub const fn half(from: usize, to: usize) -> Self {
        Self {
            from,
            to,
            half: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_event_camel_case_aliases() {
        let json = r#"{"turn": 3, "mapDiff": [0, 1, 5], "citiesDiff": [], "generals": [4, -1]}"#;
        let event: TickEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.turn, 3);
        assert_eq!(event.map_diff, vec![0, 1, 5]);
        assert!(event.swamps.is_empty());
    }

    #[test]
    fn test_command_json() {
        let json = serde_json::to_string(&Command::half(4, 5)).unwrap();
        assert_eq!(json, r#"{"from":4,"to":5,"half":true}"#);
        let parsed: Command = serde_json::from_str(r#"{"from":1,"to":2}"#).unwrap();
        assert_eq!(parsed, Command::new(1, 2));
    }
}

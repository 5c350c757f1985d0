//! Game options and board sizing.

use serde::{Serialize, Deserialize};

use crate::game::state::{GameError, Result};

/// Host-chosen options for a game.
///
/// Timer fields are carried for the host's timer policy; the rules engine
/// itself only reads `number_of_teams`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    /// Turn timer length in milliseconds (0 = no timer)
    #[serde(skip_serializing_if = "is_zero")]
    pub timer_duration_ms: i64,

    /// Whether the host rejects guesses after the timer runs out
    #[serde(skip_serializing_if = "is_false")]
    pub enforce_timer: bool,

    /// Number of competing teams (2, 3 or 4)
    pub number_of_teams: u32,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            timer_duration_ms: 0,
            enforce_timer: false,
            number_of_teams: 2,
        }
    }
}

impl GameOptions {
    /// Options for `teams` teams with no timer.
    pub fn with_teams(teams: u32) -> Self {
        Self {
            number_of_teams: teams,
            ..Self::default()
        }
    }

    /// Board shape for these options.
    pub fn layout(&self) -> Result<BoardLayout> {
        BoardLayout::for_teams(self.number_of_teams)
    }
}

fn is_zero(v: &i64) -> bool {
    *v == 0
}

fn is_false(v: &bool) -> bool {
    !*v
}

/// Board size and cell quotas for a team count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardLayout {
    /// Total cells (5x5, 6x6 or 7x7)
    pub cells: usize,
    /// Owned cells per team, largest first
    pub quotas: &'static [usize],
    /// Bystander cells
    pub neutral: usize,
}

/// Two teams, 5x5 = 25 cells
const TWO_TEAMS: BoardLayout = BoardLayout { cells: 25, quotas: &[9, 8], neutral: 7 };
/// Three teams, 6x6 = 36 cells
const THREE_TEAMS: BoardLayout = BoardLayout { cells: 36, quotas: &[9, 8, 7], neutral: 11 };
/// Four teams, 7x7 = 49 cells
const FOUR_TEAMS: BoardLayout = BoardLayout { cells: 49, quotas: &[10, 9, 8, 7], neutral: 14 };

impl BoardLayout {
    /// Look up the board shape for a team count.
    pub fn for_teams(teams: u32) -> Result<Self> {
        match teams {
            2 => Ok(TWO_TEAMS),
            3 => Ok(THREE_TEAMS),
            4 => Ok(FOUR_TEAMS),
            _ => Err(GameError::InvalidOptions { teams }),
        }
    }

    /// Number of teams this layout is for.
    pub fn teams(&self) -> usize {
        self.quotas.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layouts_add_up() {
        for teams in 2..=4 {
            let layout = BoardLayout::for_teams(teams).unwrap();
            let owned: usize = layout.quotas.iter().sum();
            assert_eq!(owned + layout.neutral + 1, layout.cells);
            assert_eq!(layout.teams(), teams as usize);
        }
    }

    #[test]
    fn test_invalid_team_counts() {
        for teams in [0, 1, 5, 100] {
            assert!(matches!(
                BoardLayout::for_teams(teams),
                Err(GameError::InvalidOptions { teams: t }) if t == teams
            ));
        }
    }

    #[test]
    fn test_options_wire_format() {
        let json = serde_json::to_string(&GameOptions::default()).unwrap();
        assert_eq!(json, r#"{"number_of_teams":2}"#);

        let opts: GameOptions =
            serde_json::from_str(r#"{"timer_duration_ms":60000,"enforce_timer":true}"#).unwrap();
        assert_eq!(opts.timer_duration_ms, 60000);
        assert!(opts.enforce_timer);
        assert_eq!(opts.number_of_teams, 2);
    }
}

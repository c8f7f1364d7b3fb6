use std::fmt;

use super::{Entity, GridCoord};
use crate::PlayerId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PauseReason {
    Bumped,
    MaxScore,
    EscapeKey,
    Requested,
    Error,
}

impl PauseReason {
    pub fn message(self) -> &'static str {
        match self {
            PauseReason::Bumped => "Bumped into something",
            PauseReason::MaxScore => "Max score reached",
            PauseReason::EscapeKey => "Escape key pressed",
            PauseReason::Requested => "Paused by player",
            PauseReason::Error => "Error occurred",
        }
    }
}

impl fmt::Display for PauseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Everything that happens in a session, in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Play { delay_secs: u64 },
    Countdown { remaining_secs: u64 },
    Paused { reason: PauseReason },
    PlayerJoined { player: PlayerId },
    PlayerLost { player: PlayerId },
    AteFood { player: PlayerId, at: GridCoord },
    ScoreBumped { player: PlayerId, score: u32 },
    MaxScore { player: PlayerId, max_score: u32 },
    Bump { player: PlayerId, entity: Entity },
}

impl GameEvent {
    /// Text for the notification sink. Per-tick chatter is only announced
    /// with `debug` on.
    pub fn announcement(&self, debug: bool) -> Option<String> {
        let message = match self {
            GameEvent::Play { delay_secs } => {
                format!("Game started with delay of {}s", delay_secs)
            }
            GameEvent::Countdown { remaining_secs } => {
                format!("Starting in {}...", remaining_secs)
            }
            GameEvent::Paused { reason } => format!("Game paused with reason \"{}\"", reason),
            GameEvent::PlayerJoined { player } => format!("Player \"{}\" joined", player),
            GameEvent::PlayerLost { player } => format!("Player \"{}\" lost!", player),
            GameEvent::MaxScore { player, max_score } => {
                format!("Max score of \"{}\" reached by \"{}\"", max_score, player)
            }
            GameEvent::AteFood { player, .. } if debug => format!("Player \"{}\" ate food", player),
            GameEvent::ScoreBumped { player, score } if debug => {
                format!("Score of \"{}\" increased to {}!", player, score)
            }
            GameEvent::Bump { player, entity } if debug => {
                format!("\"{}\" bumped into \"{}\"", player, entity.label())
            }
            GameEvent::AteFood { .. } | GameEvent::ScoreBumped { .. } | GameEvent::Bump { .. } => {
                return None;
            }
        };
        Some(message)
    }
}

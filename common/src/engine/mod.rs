pub(crate) mod collaborators;
mod coords;
mod direction;
mod entity;
mod events;
mod game_state;
mod grid;
mod keys;
mod movement;
mod player;
mod players;
mod score;
mod session_rng;
mod snake;

pub mod session;

pub use collaborators::{Notifier, NullRenderer, Renderer, ScoreLine};
pub use coords::{CanvasCoord, Coord, GridCoord, Scales, SpriteCoord};
pub use direction::Direction;
pub use entity::{Entity, EntityKind, Owner, SegmentRole, VisualKind};
pub use events::{GameEvent, PauseReason};
pub use game_state::{GameState, Rules};
pub use grid::{Grid, RANDOM_PLACEMENT_ATTEMPTS, SPAWN_MARGIN};
pub use keys::{ControlKey, ENTER_KEY, ESCAPE_KEY, KeySet, KeyThrottle};
pub use movement::{MoveOutcome, MoveTarget, move_entity, resolve_target};
pub use player::Player;
pub use players::{JoinError, Players};
pub use score::{Score, ScoreBump};
pub use session::{GameSession, RunState, SessionCommand};
pub use session_rng::SessionRng;
pub use snake::{INITIAL_MAX_SIZE, Snake};

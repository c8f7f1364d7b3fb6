use std::fmt;

use super::{Direction, GridCoord};
use crate::PlayerId;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Owner {
    /// Food and empty space.
    System,
    Player(PlayerId),
}

impl Owner {
    pub fn name(&self) -> &str {
        match self {
            Owner::System => "system",
            Owner::Player(id) => id.as_str(),
        }
    }

    pub fn player(&self) -> Option<&PlayerId> {
        match self {
            Owner::System => None,
            Owner::Player(id) => Some(id),
        }
    }
}

/// Position of a segment inside its snake. `Piece` marks a freshly grown
/// segment until the snake re-tags its chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SegmentRole {
    Piece,
    Head,
    Body,
    Tail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Empty,
    Food,
    SnakeSegment(SegmentRole),
}

/// What the renderer should draw for a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisualKind {
    Empty,
    Food,
    SnakePiece(Direction),
    SnakeHead(Direction),
    SnakeBody(Direction),
    SnakeTail(Direction),
}

impl VisualKind {
    pub fn facing(&self) -> Option<Direction> {
        match self {
            VisualKind::Empty | VisualKind::Food => None,
            VisualKind::SnakePiece(direction)
            | VisualKind::SnakeHead(direction)
            | VisualKind::SnakeBody(direction)
            | VisualKind::SnakeTail(direction) => Some(*direction),
        }
    }
}

/// Occupant of one grid cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    pub coord: GridCoord,
    /// Orientation used for drawing only.
    pub facing: Direction,
    pub owner: Owner,
    pub kind: EntityKind,
}

impl Entity {
    pub fn empty(coord: GridCoord) -> Self {
        Self {
            coord,
            facing: Direction::Up,
            owner: Owner::System,
            kind: EntityKind::Empty,
        }
    }

    pub fn food(coord: GridCoord) -> Self {
        Self {
            coord,
            facing: Direction::Up,
            owner: Owner::System,
            kind: EntityKind::Food,
        }
    }

    pub fn segment(
        owner: PlayerId,
        coord: GridCoord,
        facing: Direction,
        role: SegmentRole,
    ) -> Self {
        Self {
            coord,
            facing,
            owner: Owner::Player(owner),
            kind: EntityKind::SnakeSegment(role),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind == EntityKind::Empty
    }

    pub fn is_food(&self) -> bool {
        self.kind == EntityKind::Food
    }

    pub fn is_segment(&self) -> bool {
        matches!(self.kind, EntityKind::SnakeSegment(_))
    }

    pub fn role(&self) -> Option<SegmentRole> {
        match self.kind {
            EntityKind::SnakeSegment(role) => Some(role),
            _ => None,
        }
    }

    pub fn visual(&self) -> VisualKind {
        match self.kind {
            EntityKind::Empty => VisualKind::Empty,
            EntityKind::Food => VisualKind::Food,
            EntityKind::SnakeSegment(SegmentRole::Piece) => VisualKind::SnakePiece(self.facing),
            EntityKind::SnakeSegment(SegmentRole::Head) => VisualKind::SnakeHead(self.facing),
            EntityKind::SnakeSegment(SegmentRole::Body) => VisualKind::SnakeBody(self.facing),
            EntityKind::SnakeSegment(SegmentRole::Tail) => VisualKind::SnakeTail(self.facing),
        }
    }

    pub fn label(&self) -> &'static str {
        match self.kind {
            EntityKind::Empty => "empty space",
            EntityKind::Food => "food",
            EntityKind::SnakeSegment(SegmentRole::Piece) => "snake piece",
            EntityKind::SnakeSegment(SegmentRole::Head) => "snake head",
            EntityKind::SnakeSegment(SegmentRole::Body) => "snake body",
            EntityKind::SnakeSegment(SegmentRole::Tail) => "snake tail",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.owner {
            Owner::System => write!(f, "{} at {}", self.label(), self.coord),
            Owner::Player(id) => write!(f, "{} of \"{}\" at {}", self.label(), id, self.coord),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_owned_entities() {
        let food = Entity::food(GridCoord::new(1, 2));
        assert!(food.is_food());
        assert_eq!(food.owner, Owner::System);
        assert_eq!(food.owner.name(), "system");
        assert_eq!(food.visual(), VisualKind::Food);
        assert!(Entity::empty(GridCoord::new(0, 0)).is_empty());
    }

    #[test]
    fn test_segment_visual_carries_facing() {
        let head = Entity::segment(
            PlayerId::new("alice"),
            GridCoord::new(3, 3),
            Direction::Left,
            SegmentRole::Head,
        );
        assert_eq!(head.visual(), VisualKind::SnakeHead(Direction::Left));
        assert_eq!(head.visual().facing(), Some(Direction::Left));
        assert_eq!(head.owner.player(), Some(&PlayerId::new("alice")));
        assert_eq!(head.to_string(), "snake head of \"alice\" at (3, 3)");
    }
}

use super::{Direction, Entity, Grid, GridCoord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveTarget {
    /// One wrapped step; updates the mover's facing.
    Direction(Direction),
    /// Jump straight to a cell; facing is left alone.
    Coord(GridCoord),
}

impl From<Direction> for MoveTarget {
    fn from(direction: Direction) -> Self {
        MoveTarget::Direction(direction)
    }
}

impl From<GridCoord> for MoveTarget {
    fn from(coord: GridCoord) -> Self {
        MoveTarget::Coord(coord)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved(GridCoord),
    AteFood(GridCoord),
    /// The target held something solid. Nothing changed.
    Bumped(Entity),
}

impl MoveOutcome {
    pub fn destination(&self) -> Option<GridCoord> {
        match self {
            MoveOutcome::Moved(coord) | MoveOutcome::AteFood(coord) => Some(*coord),
            MoveOutcome::Bumped(_) => None,
        }
    }
}

pub fn resolve_target(grid: &Grid, from: GridCoord, target: MoveTarget) -> GridCoord {
    match target {
        MoveTarget::Direction(direction) => grid.wrap(from, direction),
        MoveTarget::Coord(coord) => coord,
    }
}

/// Moves the occupant of `from`. Empty targets are entered, food is eaten,
/// anything else is a bump and leaves the grid untouched.
pub fn move_entity(grid: &mut Grid, from: GridCoord, target: MoveTarget) -> MoveOutcome {
    assert!(!grid.get(from).is_empty(), "cannot move empty space at {}", from);

    let to = resolve_target(grid, from, target);
    let occupant = grid.get(to);
    let ate_food = if occupant.is_empty() {
        false
    } else if occupant.is_food() {
        true
    } else {
        return MoveOutcome::Bumped(occupant.clone());
    };

    grid.relocate(from, to, false);
    if let MoveTarget::Direction(direction) = target {
        grid.update(to, |entity| entity.facing = direction);
    }

    if ate_food {
        MoveOutcome::AteFood(to)
    } else {
        MoveOutcome::Moved(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlayerId;
    use crate::engine::SegmentRole;

    fn place_head(grid: &mut Grid, x: usize, y: usize, owner: &str) -> GridCoord {
        let coord = GridCoord::new(x, y);
        grid.set(Entity::segment(PlayerId::new(owner), coord, Direction::Up, SegmentRole::Head));
        coord
    }

    #[test]
    fn test_move_into_empty_cell() {
        let mut grid = Grid::new(5, 5);
        let head = place_head(&mut grid, 2, 2, "a");
        let outcome = move_entity(&mut grid, head, Direction::Right.into());
        assert_eq!(outcome, MoveOutcome::Moved(GridCoord::new(3, 2)));
        assert!(grid.get(head).is_empty());
        assert_eq!(grid.get(GridCoord::new(3, 2)).facing, Direction::Right);
        assert!(grid.check_consistency().is_ok());
    }

    #[test]
    fn test_move_onto_food_consumes_it() {
        let mut grid = Grid::new(5, 5);
        let head = place_head(&mut grid, 2, 2, "a");
        grid.set(Entity::food(GridCoord::new(2, 1)));
        let outcome = move_entity(&mut grid, head, Direction::Up.into());
        assert_eq!(outcome, MoveOutcome::AteFood(GridCoord::new(2, 1)));
        assert!(grid.get(GridCoord::new(2, 1)).is_segment());
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_bump_leaves_grid_unchanged() {
        let mut grid = Grid::new(5, 5);
        let head = place_head(&mut grid, 2, 2, "a");
        place_head(&mut grid, 1, 2, "b");
        let before = grid.clone();

        let outcome = move_entity(&mut grid, head, Direction::Left.into());
        match outcome {
            MoveOutcome::Bumped(entity) => {
                assert_eq!(entity.coord, GridCoord::new(1, 2));
                assert_eq!(entity.owner.name(), "b");
            }
            other => panic!("expected bump, got {:?}", other),
        }
        assert!(grid.cells().eq(before.cells()));
        assert_eq!(grid.get(head).facing, Direction::Up);
    }

    #[test]
    fn test_coordinate_move_keeps_facing() {
        let mut grid = Grid::new(5, 5);
        let food = GridCoord::new(0, 0);
        grid.set(Entity::food(food));
        grid.update(food, |entity| entity.facing = Direction::Left);
        let outcome = move_entity(&mut grid, food, GridCoord::new(4, 4).into());
        assert_eq!(outcome.destination(), Some(GridCoord::new(4, 4)));
        assert_eq!(grid.get(GridCoord::new(4, 4)).facing, Direction::Left);
        assert!(grid.get(food).is_empty());
    }

    #[test]
    fn test_move_wraps_around() {
        let mut grid = Grid::new(5, 5);
        let head = place_head(&mut grid, 0, 0, "a");
        let outcome = move_entity(&mut grid, head, Direction::Up.into());
        assert_eq!(outcome, MoveOutcome::Moved(GridCoord::new(0, 4)));
    }
}

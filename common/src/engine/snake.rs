use super::movement::{MoveOutcome, MoveTarget, move_entity};
use super::{Direction, Entity, EntityKind, Grid, GridCoord, SegmentRole};
use crate::PlayerId;

/// `max_size` of a freshly spawned snake. The head grows its first body
/// segment on the first move.
pub const INITIAL_MAX_SIZE: usize = 2;

/// Ordered chain of segment cells, head first. The segment entities live in
/// the grid; the snake only remembers where they are.
#[derive(Clone, Debug)]
pub struct Snake {
    owner: PlayerId,
    segments: Vec<GridCoord>,
    max_size: usize,
}

impl Snake {
    pub fn spawn(grid: &mut Grid, owner: PlayerId, head: GridCoord, facing: Direction) -> Self {
        Self::from_segments(grid, owner, &[head], facing, INITIAL_MAX_SIZE)
    }

    /// Places a snake occupying `coords` (head first), every segment facing `facing`.
    pub fn from_segments(
        grid: &mut Grid,
        owner: PlayerId,
        coords: &[GridCoord],
        facing: Direction,
        max_size: usize,
    ) -> Self {
        assert!(!coords.is_empty(), "a snake needs at least one segment");
        assert!(max_size >= coords.len(), "snake is longer than its max size");

        for coord in coords {
            assert!(
                grid.get(*coord).is_empty(),
                "cannot place a snake segment on {}",
                grid.get(*coord)
            );
            grid.set(Entity::segment(owner.clone(), *coord, facing, SegmentRole::Piece));
        }

        let snake = Self {
            owner,
            segments: coords.to_vec(),
            max_size,
        };
        snake.retag(grid);
        snake
    }

    pub fn owner(&self) -> &PlayerId {
        &self.owner
    }

    pub fn head(&self) -> GridCoord {
        *self
            .segments
            .first()
            .expect("Snake segments should never be empty")
    }

    pub fn tail(&self) -> GridCoord {
        *self
            .segments
            .last()
            .expect("Snake segments should never be empty")
    }

    pub fn segments(&self) -> &[GridCoord] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn contains(&self, coord: GridCoord) -> bool {
        self.segments.contains(&coord)
    }

    pub fn facing(&self, grid: &Grid) -> Direction {
        grid.get(self.head()).facing
    }

    /// Lets the snake grow by one segment on its next move.
    pub fn grow(&mut self) {
        self.max_size += 1;
    }

    /// Follow-the-leader move. The head steps in `direction`; every other
    /// segment takes the cell and facing its predecessor had before the move.
    /// A bumped head aborts the whole move.
    pub fn advance(&mut self, grid: &mut Grid, direction: Direction) -> MoveOutcome {
        let head = self.head();
        let mut carry_facing = grid.get(head).facing;
        let mut carry_coord = head;

        let outcome = move_entity(grid, head, MoveTarget::Direction(direction));
        let Some(new_head) = outcome.destination() else {
            return outcome;
        };
        self.segments[0] = new_head;

        for index in 1..self.segments.len() {
            let current = self.segments[index];
            let current_facing = grid.get(current).facing;

            grid.update(current, |entity| entity.facing = carry_facing);
            let followed = move_entity(grid, current, MoveTarget::Coord(carry_coord));
            let Some(destination) = followed.destination() else {
                panic!(
                    "segment {} of \"{}\" could not follow into {}: {:?}",
                    index, self.owner, carry_coord, followed
                );
            };
            self.segments[index] = destination;

            carry_coord = current;
            carry_facing = current_facing;
        }

        if self.max_size > self.segments.len() {
            // Growth copy: the old tail cell is not vacated, the copy lands on
            // the cell the tail just left.
            grid.relocate(self.tail(), carry_coord, true);
            grid.update(carry_coord, |entity| {
                entity.facing = carry_facing;
                entity.kind = EntityKind::SnakeSegment(SegmentRole::Piece);
            });
            self.segments.push(carry_coord);
        }

        self.retag(grid);
        outcome
    }

    /// Head, body and tail roles follow the segment order.
    fn retag(&self, grid: &mut Grid) {
        let last = self.segments.len() - 1;
        for (index, coord) in self.segments.iter().enumerate() {
            let role = if index == 0 {
                SegmentRole::Head
            } else if index == last {
                SegmentRole::Tail
            } else {
                SegmentRole::Body
            };
            if grid.get(*coord).role() != Some(role) {
                grid.update(*coord, |entity| {
                    entity.kind = EntityKind::SnakeSegment(role)
                });
            }
        }
    }

    /// Removes every segment from the grid.
    pub fn clear(&mut self, grid: &mut Grid) {
        for coord in self.segments.drain(..) {
            grid.delete(coord);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::VisualKind;

    fn owner() -> PlayerId {
        PlayerId::new("alice")
    }

    fn c(x: usize, y: usize) -> GridCoord {
        GridCoord::new(x, y)
    }

    fn roles(snake: &Snake, grid: &Grid) -> Vec<SegmentRole> {
        snake
            .segments()
            .iter()
            .map(|coord| grid.get(*coord).role().unwrap())
            .collect()
    }

    #[test]
    fn test_spawn_places_head() {
        let mut grid = Grid::new(8, 8);
        let snake = Snake::spawn(&mut grid, owner(), c(4, 4), Direction::Up);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.max_size(), INITIAL_MAX_SIZE);
        assert_eq!(grid.get(c(4, 4)).visual(), VisualKind::SnakeHead(Direction::Up));
    }

    #[test]
    fn test_first_move_grows_to_initial_size() {
        let mut grid = Grid::new(8, 8);
        let mut snake = Snake::spawn(&mut grid, owner(), c(4, 4), Direction::Up);
        snake.advance(&mut grid, Direction::Up);
        assert_eq!(snake.segments(), &[c(4, 3), c(4, 4)]);
        assert_eq!(roles(&snake, &grid), vec![SegmentRole::Head, SegmentRole::Tail]);
    }

    #[test]
    fn test_segments_follow_the_leader() {
        let mut grid = Grid::new(8, 8);
        let mut snake = Snake::from_segments(
            &mut grid,
            owner(),
            &[c(3, 3), c(3, 4), c(3, 5)],
            Direction::Up,
            3,
        );
        let outcome = snake.advance(&mut grid, Direction::Right);
        assert_eq!(outcome, MoveOutcome::Moved(c(4, 3)));
        assert_eq!(snake.segments(), &[c(4, 3), c(3, 3), c(3, 4)]);
        assert!(grid.get(c(3, 5)).is_empty());
        assert_eq!(grid.occupied_count(), 3);
        assert_eq!(
            roles(&snake, &grid),
            vec![SegmentRole::Head, SegmentRole::Body, SegmentRole::Tail]
        );
        assert!(grid.check_consistency().is_ok());
    }

    #[test]
    fn test_facing_propagates_one_tick_behind() {
        let mut grid = Grid::new(8, 8);
        let mut snake = Snake::from_segments(
            &mut grid,
            owner(),
            &[c(3, 3), c(3, 4), c(3, 5)],
            Direction::Up,
            3,
        );
        snake.advance(&mut grid, Direction::Right);
        let facings: Vec<Direction> =
            snake.segments().iter().map(|coord| grid.get(*coord).facing).collect();
        assert_eq!(facings, vec![Direction::Right, Direction::Up, Direction::Up]);

        snake.advance(&mut grid, Direction::Right);
        let facings: Vec<Direction> =
            snake.segments().iter().map(|coord| grid.get(*coord).facing).collect();
        assert_eq!(facings, vec![Direction::Right, Direction::Right, Direction::Up]);

        snake.advance(&mut grid, Direction::Right);
        let facings: Vec<Direction> =
            snake.segments().iter().map(|coord| grid.get(*coord).facing).collect();
        assert_eq!(facings, vec![Direction::Right, Direction::Right, Direction::Right]);
    }

    #[test]
    fn test_growth_lands_on_vacated_tail_cell() {
        let mut grid = Grid::new(8, 8);
        let mut snake = Snake::from_segments(
            &mut grid,
            owner(),
            &[c(2, 2), c(3, 2), c(4, 2)],
            Direction::Left,
            3,
        );
        snake.grow();
        let old_tail = snake.tail();

        snake.advance(&mut grid, Direction::Left);

        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), old_tail);
        assert_eq!(snake.segments(), &[c(1, 2), c(2, 2), c(3, 2), c(4, 2)]);
        assert_eq!(grid.get(old_tail).role(), Some(SegmentRole::Tail));
        assert_eq!(grid.occupied_count(), 4);
        assert!(grid.check_consistency().is_ok());
    }

    #[test]
    fn test_length_never_exceeds_max_size() {
        let mut grid = Grid::new(10, 10);
        let mut snake = Snake::spawn(&mut grid, owner(), c(5, 5), Direction::Right);
        for _ in 0..5 {
            snake.advance(&mut grid, Direction::Right);
            assert!(snake.len() <= snake.max_size());
        }
        assert_eq!(snake.len(), INITIAL_MAX_SIZE);
    }

    #[test]
    fn test_bump_into_own_body_after_wrap_changes_nothing() {
        let mut grid = Grid::new(2, 4);
        let mut snake =
            Snake::from_segments(&mut grid, owner(), &[c(0, 0), c(1, 0)], Direction::Left, 2);
        let before = grid.clone();

        let outcome = snake.advance(&mut grid, Direction::Left);

        match outcome {
            MoveOutcome::Bumped(entity) => {
                assert_eq!(entity.coord, c(1, 0));
                assert_eq!(entity.owner.name(), "alice");
            }
            other => panic!("expected bump, got {:?}", other),
        }
        assert_eq!(snake.segments(), &[c(0, 0), c(1, 0)]);
        assert!(grid.cells().eq(before.cells()));
    }

    #[test]
    fn test_wrap_into_free_cell_moves() {
        let mut grid = Grid::new(8, 8);
        let mut snake =
            Snake::from_segments(&mut grid, owner(), &[c(0, 0), c(1, 0)], Direction::Left, 2);
        let outcome = snake.advance(&mut grid, Direction::Left);
        assert_eq!(outcome, MoveOutcome::Moved(c(7, 0)));
        assert_eq!(snake.segments(), &[c(7, 0), c(0, 0)]);
    }

    #[test]
    fn test_clear_removes_segments() {
        let mut grid = Grid::new(8, 8);
        let mut snake =
            Snake::from_segments(&mut grid, owner(), &[c(1, 1), c(1, 2)], Direction::Up, 2);
        snake.clear(&mut grid);
        assert!(snake.is_empty());
        assert_eq!(grid.occupied_count(), 0);
    }
}

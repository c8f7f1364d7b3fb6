use super::{Direction, Entity, GridCoord, Renderer, Scales, SessionRng};

/// Cells kept clear along each edge when picking a random spawn or food cell.
pub const SPAWN_MARGIN: usize = 2;
/// Random draws tried before falling back to scanning every free cell.
pub const RANDOM_PLACEMENT_ATTEMPTS: usize = 64;

/// Occupancy map indexed `[y][x]`. Every cell always holds exactly one entity;
/// vacated cells hold [`Entity::empty`].
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<Entity>>,
    dirty: Vec<GridCoord>,
    dirty_flags: Vec<bool>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid must not be empty");

        let cells = (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| Entity::empty(GridCoord::new(x, y)))
                    .collect()
            })
            .collect();

        let mut grid = Self {
            width,
            height,
            cells,
            dirty: Vec::with_capacity(width * height),
            dirty_flags: vec![false; width * height],
        };
        grid.redraw_all();
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Panics when `coord` is outside the grid; callers wrap first.
    pub fn get(&self, coord: GridCoord) -> &Entity {
        self.assert_in_bounds(coord);
        &self.cells[coord.y][coord.x]
    }

    /// Writes `entity` into the cell at `entity.coord` and returns the previous occupant.
    pub fn set(&mut self, entity: Entity) -> Entity {
        let coord = entity.coord;
        self.assert_in_bounds(coord);
        self.mark_dirty(coord);
        std::mem::replace(&mut self.cells[coord.y][coord.x], entity)
    }

    pub fn delete(&mut self, coord: GridCoord) -> Entity {
        self.set(Entity::empty(coord))
    }

    /// Moves the occupant of `from` to `to`, overwriting whatever is there.
    /// With `copy` the source cell keeps its occupant.
    pub fn relocate(&mut self, from: GridCoord, to: GridCoord, copy: bool) {
        let mut entity = if copy {
            self.get(from).clone()
        } else {
            self.delete(from)
        };
        entity.coord = to;
        self.set(entity);
    }

    /// Applies `update` to the occupant of `coord` and schedules a redraw.
    /// The occupant's coordinate is restored afterwards.
    pub fn update<F>(&mut self, coord: GridCoord, update: F)
    where
        F: FnOnce(&mut Entity),
    {
        self.assert_in_bounds(coord);
        let entity = &mut self.cells[coord.y][coord.x];
        update(entity);
        entity.coord = coord;
        self.mark_dirty(coord);
    }

    /// One step from `coord` in `direction` on a torus.
    pub fn wrap(&self, coord: GridCoord, direction: Direction) -> GridCoord {
        let (dx, dy) = direction.movement();
        let x = coord.x as i64 + dx;
        let y = coord.y as i64 + dy;
        let max_x = self.width as i64 - 1;
        let max_y = self.height as i64 - 1;

        let x = if x < 0 {
            max_x
        } else if x > max_x {
            0
        } else {
            x
        };
        let y = if y < 0 {
            max_y
        } else if y > max_y {
            0
        } else {
            y
        };

        GridCoord::new(x as usize, y as usize)
    }

    pub fn neighbours(&self, coord: GridCoord) -> [(Direction, &Entity); 4] {
        Direction::ALL.map(|direction| (direction, self.get(self.wrap(coord, direction))))
    }

    pub fn cells(&self) -> impl Iterator<Item = &Entity> {
        self.cells.iter().flatten()
    }

    pub fn free_cells(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.cells()
            .filter(|entity| entity.is_empty())
            .map(|entity| entity.coord)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells().filter(|entity| !entity.is_empty()).count()
    }

    /// A random empty cell, preferring cells at least [`SPAWN_MARGIN`] away
    /// from the edges. Returns `None` only when the grid is full.
    pub fn random_free_coord(&self, rng: &mut SessionRng) -> Option<GridCoord> {
        let margin = if self.width > SPAWN_MARGIN * 2 && self.height > SPAWN_MARGIN * 2 {
            SPAWN_MARGIN
        } else {
            0
        };
        let max_x = self.width - 1 - margin;
        let max_y = self.height - 1 - margin;
        let within_margin = |coord: &GridCoord| {
            (margin..=max_x).contains(&coord.x) && (margin..=max_y).contains(&coord.y)
        };

        for _ in 0..RANDOM_PLACEMENT_ATTEMPTS {
            let coord = GridCoord::new(
                rng.random_inclusive(margin, max_x),
                rng.random_inclusive(margin, max_y),
            );
            if self.get(coord).is_empty() {
                return Some(coord);
            }
        }

        let free: Vec<GridCoord> = self.free_cells().collect();
        let preferred: Vec<GridCoord> = free.iter().copied().filter(within_margin).collect();
        rng.choose(&preferred)
            .or_else(|| rng.choose(&free))
            .copied()
    }

    pub fn redraw_all(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                self.mark_dirty(GridCoord::new(x, y));
            }
        }
    }

    pub fn has_pending_draws(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Draws every cell changed since the previous flush. Returns the number of draws.
    pub fn flush(&mut self, renderer: &mut dyn Renderer, scales: &Scales, ui_height: u32) -> usize {
        let dirty = std::mem::take(&mut self.dirty);
        // No flag may outlive its entry in the dirty list, even if a draw panics.
        for coord in &dirty {
            self.dirty_flags[coord.y * self.width + coord.x] = false;
        }
        let size = scales.cell_size();
        for coord in &dirty {
            let entity = &self.cells[coord.y][coord.x];
            renderer.draw(coord.to_canvas(scales, ui_height), size, entity.visual());
        }
        dirty.len()
    }

    /// Checks that every occupant reports the coordinate of the cell holding it.
    pub fn check_consistency(&self) -> Result<(), String> {
        for (y, row) in self.cells.iter().enumerate() {
            if row.len() != self.width {
                return Err(format!("row {} has {} cells, expected {}", y, row.len(), self.width));
            }
            for (x, entity) in row.iter().enumerate() {
                if entity.coord != GridCoord::new(x, y) {
                    return Err(format!("cell ({}, {}) holds {}", x, y, entity));
                }
            }
        }
        Ok(())
    }

    fn mark_dirty(&mut self, coord: GridCoord) {
        let index = coord.y * self.width + coord.x;
        if !self.dirty_flags[index] {
            self.dirty_flags[index] = true;
            self.dirty.push(coord);
        }
    }

    fn assert_in_bounds(&self, coord: GridCoord) {
        assert!(
            self.contains(coord),
            "{} is outside the {}x{} grid",
            coord,
            self.width,
            self.height
        );
    }
}

//! Grid, canvas and sprite-sheet coordinates.
//!
//! Every coordinate carries the scale of its space. Conversions between spaces
//! go through [`Coord::to_scaled_array`], `value * scale / target_scale`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::Validate;

/// Scale factors of the three coordinate spaces, in pixels per unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scales {
    /// Canvas pixels covered by one grid cell.
    pub grid: u32,
    /// Atlas pixels covered by one sprite.
    pub sprite: u32,
    pub canvas: u32,
}

impl Scales {
    /// Edge length of one grid cell in canvas units.
    pub fn cell_size(&self) -> f64 {
        self.grid as f64 / self.canvas as f64
    }
}

impl Default for Scales {
    fn default() -> Self {
        Self {
            grid: 10,
            sprite: 64,
            canvas: 1,
        }
    }
}

impl Validate for Scales {
    fn validate(&self) -> Result<(), String> {
        if self.grid == 0 || self.sprite == 0 || self.canvas == 0 {
            return Err("scales must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coord {
    x: f64,
    y: f64,
    scale: f64,
}

impl Coord {
    /// Panics unless `x` and `y` are finite and non-negative and `scale` is finite and positive.
    pub fn new(x: f64, y: f64, scale: f64) -> Self {
        assert!(
            x.is_finite() && y.is_finite(),
            "coordinate ({}, {}) is not finite",
            x,
            y
        );
        assert!(x >= 0.0 && y >= 0.0, "coordinate ({}, {}) is negative", x, y);
        assert_valid_scale(scale);
        Self { x, y, scale }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn to_scaled_array(&self, target_scale: f64) -> [f64; 2] {
        assert_valid_scale(target_scale);
        let x = self.x * self.scale / target_scale;
        let y = self.y * self.scale / target_scale;
        assert!(
            x.is_finite() && y.is_finite(),
            "scaled coordinate ({}, {}) is not finite",
            x,
            y
        );
        [x, y]
    }
}

fn assert_valid_scale(scale: f64) {
    assert!(
        scale.is_finite() && scale > 0.0,
        "scale {} must be finite and positive",
        scale
    );
}

/// Cell indices on the occupancy grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoord {
    pub x: usize,
    pub y: usize,
}

impl GridCoord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn to_coord(&self, scales: &Scales) -> Coord {
        Coord::new(self.x as f64, self.y as f64, scales.grid as f64)
    }

    /// Top-left canvas pixel of the cell. The grid starts below the UI band.
    pub fn to_canvas(&self, scales: &Scales, ui_height: u32) -> CanvasCoord {
        let [x, y] = self.to_coord(scales).to_scaled_array(scales.canvas as f64);
        CanvasCoord::new(x, y + ui_height as f64, scales)
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasCoord(Coord);

impl CanvasCoord {
    pub fn new(x: f64, y: f64, scales: &Scales) -> Self {
        Self(Coord::new(x, y, scales.canvas as f64))
    }

    pub fn x(&self) -> f64 {
        self.0.x()
    }

    pub fn y(&self) -> f64 {
        self.0.y()
    }

    /// The grid cell under this pixel, `None` inside the UI band.
    pub fn to_grid(&self, scales: &Scales, ui_height: u32) -> Option<GridCoord> {
        let ui_height = ui_height as f64;
        if self.y() < ui_height {
            return None;
        }
        let shifted = Coord::new(self.x(), self.y() - ui_height, self.0.scale());
        let [x, y] = shifted.to_scaled_array(scales.grid as f64);
        Some(GridCoord::new(x.floor() as usize, y.floor() as usize))
    }
}

/// Column and row of a sprite in the atlas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteCoord(Coord);

impl SpriteCoord {
    pub fn new(column: u32, row: u32, scales: &Scales) -> Self {
        Self(Coord::new(column as f64, row as f64, scales.sprite as f64))
    }

    pub fn column(&self) -> u32 {
        self.0.x() as u32
    }

    pub fn row(&self) -> u32 {
        self.0.y() as u32
    }

    /// Pixel offset of the sprite's top-left corner inside the atlas.
    pub fn to_pixel_offset(&self, scales: &Scales) -> CanvasCoord {
        let [x, y] = self.0.to_scaled_array(scales.canvas as f64);
        CanvasCoord::new(x, y, scales)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_array_converts_between_scales() {
        let coord = Coord::new(3.0, 4.0, 10.0);
        assert_eq!(coord.to_scaled_array(1.0), [30.0, 40.0]);
        assert_eq!(coord.to_scaled_array(20.0), [1.5, 2.0]);
    }

    #[test]
    #[should_panic(expected = "not finite")]
    fn test_non_finite_coordinate_panics() {
        Coord::new(f64::NAN, 1.0, 1.0);
    }

    #[test]
    #[should_panic(expected = "negative")]
    fn test_negative_coordinate_panics() {
        Coord::new(-1.0, 1.0, 1.0);
    }

    #[test]
    #[should_panic(expected = "finite and positive")]
    fn test_zero_target_scale_panics() {
        Coord::new(1.0, 1.0, 1.0).to_scaled_array(0.0);
    }

    #[test]
    fn test_grid_to_canvas_adds_ui_band() {
        let scales = Scales::default();
        let canvas = GridCoord::new(3, 2).to_canvas(&scales, 50);
        assert_eq!(canvas.x(), 30.0);
        assert_eq!(canvas.y(), 70.0);
    }

    #[test]
    fn test_canvas_to_grid_inverts_grid_to_canvas() {
        let scales = Scales::default();
        let cell = GridCoord::new(7, 11);
        assert_eq!(cell.to_canvas(&scales, 50).to_grid(&scales, 50), Some(cell));

        let inside = CanvasCoord::new(75.0, 169.0, &scales);
        assert_eq!(inside.to_grid(&scales, 50), Some(GridCoord::new(7, 11)));
    }

    #[test]
    fn test_canvas_inside_ui_band_has_no_cell() {
        let scales = Scales::default();
        assert_eq!(CanvasCoord::new(10.0, 49.0, &scales).to_grid(&scales, 50), None);
    }

    #[test]
    fn test_sprite_offset_uses_sprite_scale() {
        let scales = Scales::default();
        let offset = SpriteCoord::new(2, 1, &scales).to_pixel_offset(&scales);
        assert_eq!((offset.x(), offset.y()), (128.0, 64.0));
    }

    #[test]
    fn test_cell_size() {
        let scales = Scales {
            grid: 20,
            sprite: 64,
            canvas: 2,
        };
        assert_eq!(scales.cell_size(), 10.0);
    }
}

use common::engine::{Direction, Scales, SpriteCoord, VisualKind};
use eframe::egui;
use image::{Rgba, RgbaImage};

use crate::colors;

const COLUMNS: u32 = 5;
const ROWS: u32 = 4;

const HEAD_ROW: u32 = 0;
const BODY_ROW: u32 = 1;
const TAIL_ROW: u32 = 2;
const PIECE_ROW: u32 = 3;
const FOOD_COLUMN: u32 = 4;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);
const EYE: Rgba<u8> = Rgba([0, 0, 0, 255]);

#[derive(Clone)]
pub struct Sprite {
    pixels: Vec<u8>,
    width: usize,
    height: usize,
    name: String,
}

impl Sprite {
    fn from_image(image: &RgbaImage, name: &str) -> Self {
        Sprite {
            pixels: image.as_raw().clone(),
            width: image.width() as usize,
            height: image.height() as usize,
            name: name.to_string(),
        }
    }

    pub fn to_egui_texture(&self, ctx: &egui::Context) -> egui::TextureHandle {
        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [self.width, self.height],
            &self.pixels,
        );
        ctx.load_texture(&self.name, color_image, Default::default())
    }
}

/// Sprite sheet with one tile per visual. Heads, bodies, tails and single
/// pieces take a row each with one column per direction; food sits at the
/// end of the head row.
pub struct SpriteAtlas {
    sheet: Sprite,
    scales: Scales,
}

impl SpriteAtlas {
    pub fn generate(scales: Scales) -> Self {
        let size = scales.sprite;
        let mut image = RgbaImage::from_pixel(size * COLUMNS, size * ROWS, TRANSPARENT);

        for direction in Direction::ALL {
            let column = direction_column(direction);
            paint_tile(&mut image, column, HEAD_ROW, size, direction, head_pixel);
            paint_tile(&mut image, column, BODY_ROW, size, direction, body_pixel);
            paint_tile(&mut image, column, TAIL_ROW, size, direction, tail_pixel);
            paint_tile(&mut image, column, PIECE_ROW, size, direction, piece_pixel);
        }
        paint_tile(&mut image, FOOD_COLUMN, HEAD_ROW, size, Direction::Up, food_pixel);

        Self {
            sheet: Sprite::from_image(&image, "sprite_atlas"),
            scales,
        }
    }

    pub fn locate(&self, visual: VisualKind) -> Option<SpriteCoord> {
        let (column, row) = match visual {
            VisualKind::Empty => return None,
            VisualKind::Food => (FOOD_COLUMN, HEAD_ROW),
            VisualKind::SnakeHead(direction) => (direction_column(direction), HEAD_ROW),
            VisualKind::SnakeBody(direction) => (direction_column(direction), BODY_ROW),
            VisualKind::SnakeTail(direction) => (direction_column(direction), TAIL_ROW),
            VisualKind::SnakePiece(direction) => (direction_column(direction), PIECE_ROW),
        };
        Some(SpriteCoord::new(column, row, &self.scales))
    }

    /// Normalized texture rect of the visual's tile.
    pub fn uv_rect(&self, visual: VisualKind) -> Option<egui::Rect> {
        let offset = self.locate(visual)?.to_pixel_offset(&self.scales);
        let canvas = self.scales.canvas as f32;
        let tile_width = 1.0 / COLUMNS as f32;
        let tile_height = 1.0 / ROWS as f32;
        let min = egui::pos2(
            offset.x() as f32 * canvas / self.sheet.width as f32,
            offset.y() as f32 * canvas / self.sheet.height as f32,
        );
        Some(egui::Rect::from_min_size(min, egui::vec2(tile_width, tile_height)))
    }

    pub fn to_egui_texture(&self, ctx: &egui::Context) -> egui::TextureHandle {
        self.sheet.to_egui_texture(ctx)
    }
}

fn direction_column(direction: Direction) -> u32 {
    match direction {
        Direction::Up => 0,
        Direction::Right => 1,
        Direction::Down => 2,
        Direction::Left => 3,
    }
}

fn rgba(color: egui::Color32) -> Rgba<u8> {
    Rgba([color.r(), color.g(), color.b(), 255])
}

/// Shapes are described facing up and rotated into place.
fn paint_tile(
    image: &mut RgbaImage,
    column: u32,
    row: u32,
    size: u32,
    facing: Direction,
    shape: fn(f32, f32) -> Option<Rgba<u8>>,
) {
    let last = size - 1;
    for v in 0..size {
        for u in 0..size {
            let (fu, fv) = ((u as f32 + 0.5) / size as f32, (v as f32 + 0.5) / size as f32);
            let Some(color) = shape(fu, fv) else {
                continue;
            };
            let (x, y) = match facing {
                Direction::Up => (u, v),
                Direction::Right => (last - v, u),
                Direction::Down => (last - u, last - v),
                Direction::Left => (v, last - u),
            };
            image.put_pixel(column * size + x, row * size + y, color);
        }
    }
}

const MARGIN: f32 = 0.125;

fn within(value: f32, low: f32, high: f32) -> bool {
    value >= low && value < high
}

fn in_circle(u: f32, v: f32, cx: f32, cy: f32, radius: f32) -> bool {
    (u - cx).powi(2) + (v - cy).powi(2) <= radius * radius
}

fn head_pixel(u: f32, v: f32) -> Option<Rgba<u8>> {
    if in_circle(u, v, 0.33, 0.35, 0.08) || in_circle(u, v, 0.67, 0.35, 0.08) {
        return Some(EYE);
    }
    let rounded = v >= 0.5 || in_circle(u, v, 0.5, 0.5, 0.5 - MARGIN);
    let inside = within(u, MARGIN, 1.0 - MARGIN) && within(v, MARGIN, 1.0) && rounded;
    inside.then(|| rgba(colors::SNAKE))
}

fn body_pixel(u: f32, _v: f32) -> Option<Rgba<u8>> {
    within(u, MARGIN, 1.0 - MARGIN).then(|| rgba(colors::SNAKE))
}

fn tail_pixel(u: f32, v: f32) -> Option<Rgba<u8>> {
    let half_width = (0.5 - MARGIN) * (1.0 - 0.6 * v);
    ((u - 0.5).abs() < half_width).then(|| rgba(colors::SNAKE))
}

fn piece_pixel(u: f32, v: f32) -> Option<Rgba<u8>> {
    let inside = within(u, MARGIN, 1.0 - MARGIN) && within(v, MARGIN, 1.0 - MARGIN);
    inside.then(|| rgba(colors::SNAKE))
}

fn food_pixel(u: f32, v: f32) -> Option<Rgba<u8>> {
    in_circle(u, v, 0.5, 0.5, 0.5 - MARGIN).then(|| rgba(colors::FOOD))
}

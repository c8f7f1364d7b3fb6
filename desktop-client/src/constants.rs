pub const NOTIFICATION_BUFFER_SIZE: usize = 100;
pub const SIDE_PANEL_WIDTH: f32 = 240.0;
pub const DEFAULT_CONFIG_PATH: &str = "grid_snake.yaml";

use eframe::egui;

pub const SNAKE: egui::Color32 = egui::Color32::from_rgb(0x00, 0xff, 0x00);
pub const FOOD: egui::Color32 = egui::Color32::from_rgb(0xff, 0x00, 0x00);
pub const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(0x00, 0x00, 0x00);
pub const UI: egui::Color32 = egui::Color32::from_rgb(0x66, 0x66, 0x66);
pub const UI_TEXT: egui::Color32 = egui::Color32::from_rgb(0xff, 0xff, 0xff);

/// Stable per-player colour for the score band, spread over the hue circle
/// by a hash of the username.
pub fn player_color(username: &str) -> egui::Color32 {
    let hash = username
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
    let hue = (hash % 360) as f32 / 360.0;
    egui::epaint::Hsva::new(hue, 0.7, 0.95, 1.0).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_color_is_stable() {
        assert_eq!(player_color("alice"), player_color("alice"));
        assert_ne!(player_color("alice"), player_color("bob"));
    }

    #[test]
    fn test_player_color_is_opaque() {
        assert_eq!(player_color("carol").a(), 255);
    }
}

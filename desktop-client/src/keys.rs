use common::engine::{ENTER_KEY, ESCAPE_KEY};
use eframe::egui;

/// Name the session's key sets use for `key`: arrows as `ArrowUp` and
/// friends, letters and digits lowercased.
pub fn key_name(key: egui::Key) -> Option<String> {
    let name = match key {
        egui::Key::ArrowUp => "ArrowUp",
        egui::Key::ArrowDown => "ArrowDown",
        egui::Key::ArrowLeft => "ArrowLeft",
        egui::Key::ArrowRight => "ArrowRight",
        egui::Key::Escape => ESCAPE_KEY,
        egui::Key::Enter => ENTER_KEY,
        other => {
            let name = other.name();
            let mut chars = name.chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphanumeric() => {
                    Some(c.to_ascii_lowercase().to_string())
                }
                _ => None,
            };
        }
    };
    Some(name.to_string())
}

/// Fresh key presses of this frame, auto-repeat excluded.
pub fn pressed_keys(input: &egui::InputState) -> Vec<String> {
    input
        .events
        .iter()
        .filter_map(|event| match event {
            egui::Event::Key {
                key,
                pressed: true,
                repeat: false,
                ..
            } => key_name(*key),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_names() {
        assert_eq!(key_name(egui::Key::ArrowUp).as_deref(), Some("ArrowUp"));
        assert_eq!(key_name(egui::Key::ArrowLeft).as_deref(), Some("ArrowLeft"));
    }

    #[test]
    fn test_letters_are_lowercased() {
        assert_eq!(key_name(egui::Key::W).as_deref(), Some("w"));
        assert_eq!(key_name(egui::Key::D).as_deref(), Some("d"));
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(key_name(egui::Key::Escape).as_deref(), Some(ESCAPE_KEY));
        assert_eq!(key_name(egui::Key::Enter).as_deref(), Some(ENTER_KEY));
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(key_name(egui::Key::F5), None);
        assert_eq!(key_name(egui::Key::Tab), None);
    }
}

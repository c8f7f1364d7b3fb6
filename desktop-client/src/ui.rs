use common::config::GameConfig;
use common::engine::{RunState, SessionCommand};
use eframe::egui;
use std::time::Instant;

use crate::colors::{self, player_color};
use crate::command_sender::CommandSender;
use crate::constants::SIDE_PANEL_WIDTH;
use crate::keys::pressed_keys;
use crate::sprites::SpriteAtlas;
use crate::state::SharedState;

pub struct SnakeApp {
    shared_state: SharedState,
    command_sender: CommandSender,
    config: GameConfig,
    atlas: SpriteAtlas,
    texture: Option<egui::TextureHandle>,
    username_input: String,
    shutting_down: bool,
}

impl SnakeApp {
    pub fn new(
        shared_state: SharedState,
        command_sender: CommandSender,
        config: GameConfig,
    ) -> Self {
        Self {
            shared_state,
            command_sender,
            atlas: SpriteAtlas::generate(config.scales),
            config,
            texture: None,
            username_input: String::new(),
            shutting_down: false,
        }
    }

    fn submit_username(&mut self) {
        let username = self.username_input.trim().to_string();
        if username.is_empty() {
            return;
        }
        self.command_sender.send(SessionCommand::Join { username });
        self.username_input.clear();
    }

    fn forward_keys(&self, ctx: &egui::Context) {
        let text_focused = ctx.memory(|m| m.focused().is_some());
        if text_focused {
            return;
        }
        let at = Instant::now();
        for name in ctx.input(pressed_keys) {
            self.command_sender.send(SessionCommand::Key { name, at });
        }
    }

    fn render_side_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Join");
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.username_input)
                    .hint_text("Username")
                    .desired_width(140.0),
            );
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Join").clicked() || submitted {
                self.submit_username();
            }
        });

        ui.add_space(8.0);
        let label = match self.shared_state.get_run_state() {
            RunState::Running => "Pause (Esc)",
            RunState::Stopped => "Play (Enter)",
        };
        if ui.button(label).clicked() {
            self.command_sender.send(SessionCommand::Toggle);
        }

        ui.separator();
        ui.heading("Players");
        let scores = self.shared_state.get_scores();
        if scores.is_empty() {
            ui.label("Nobody has joined yet");
        }
        for line in &scores {
            ui.colored_label(
                player_color(line.player.as_str()),
                format!("{} ({} lives)", line, line.lives),
            );
        }

        ui.separator();
        ui.heading("Log");
        egui::ScrollArea::vertical()
            .stick_to_bottom(true)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for message in self.shared_state.get_notifications() {
                    ui.label(message);
                }
            });
    }

    fn render_canvas(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let canvas = &self.config.canvas;
        let scales = self.config.scales;
        let (response, painter) = ui.allocate_painter(
            egui::vec2(canvas.width as f32, canvas.height as f32),
            egui::Sense::hover(),
        );
        let origin = response.rect.min;

        let band_size = egui::vec2(canvas.width as f32, canvas.ui_height as f32);
        let band = egui::Rect::from_min_size(origin, band_size);
        painter.rect_filled(band, 0.0, colors::UI);

        let board = egui::Rect::from_min_max(egui::pos2(origin.x, band.max.y), response.rect.max);
        painter.rect_filled(board, 0.0, colors::BACKGROUND);

        let scores = self.shared_state.get_scores();
        let mut x = origin.x + 8.0;
        for line in &scores {
            let galley = painter.layout_no_wrap(
                line.to_string(),
                egui::FontId::proportional(16.0),
                player_color(line.player.as_str()),
            );
            let width = galley.size().x;
            let pos = egui::pos2(x, band.center().y - galley.size().y / 2.0);
            painter.galley(pos, galley, colors::UI_TEXT);
            x += width + 24.0;
        }

        let status = match self.shared_state.get_run_state() {
            RunState::Running => "Running",
            RunState::Stopped => "Paused",
        };
        painter.text(
            egui::pos2(band.max.x - 8.0, band.center().y),
            egui::Align2::RIGHT_CENTER,
            status,
            egui::FontId::proportional(14.0),
            colors::UI_TEXT,
        );

        let texture = self.texture.get_or_insert_with(|| self.atlas.to_egui_texture(ctx));
        let cell_size = scales.cell_size() as f32;
        let frame = self.shared_state.get_frame();
        for (cell, visual) in frame.occupied() {
            let Some(uv) = self.atlas.uv_rect(visual) else {
                continue;
            };
            let at = cell.to_canvas(&scales, canvas.ui_height);
            let rect = egui::Rect::from_min_size(
                origin + egui::vec2(at.x() as f32, at.y() as f32),
                egui::vec2(cell_size, cell_size),
            );
            painter.image(texture.id(), rect, uv, egui::Color32::WHITE);
        }
    }
}

impl eframe::App for SnakeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.shared_state.has_context() {
            self.shared_state.set_context(ctx.clone());
        }

        if ctx.input(|i| i.viewport().close_requested()) && !self.shutting_down {
            self.command_sender.send(SessionCommand::Shutdown);
            self.shutting_down = true;
        }

        self.forward_keys(ctx);

        egui::SidePanel::right("side_panel")
            .exact_width(SIDE_PANEL_WIDTH)
            .show(ctx, |ui| self.render_side_panel(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.render_canvas(ui, ctx));
    }
}

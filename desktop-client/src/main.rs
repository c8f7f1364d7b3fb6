mod colors;
mod command_sender;
mod constants;
mod keys;
mod notifier;
mod renderer;
mod sprites;
mod state;
mod ui;

use clap::Parser;
use common::config::{ConfigManager, FileContentConfigProvider, GameConfig, YamlConfigSerializer};
use common::engine::{GameSession, SessionCommand, SessionRng};
use common::{log, logger};
use eframe::egui;
use tokio::sync::mpsc;

use command_sender::CommandSender;
use constants::{DEFAULT_CONFIG_PATH, SIDE_PANEL_WIDTH};
use notifier::UiNotifier;
use renderer::FrameRenderer;
use state::SharedState;
use ui::SnakeApp;

#[derive(Parser)]
#[command(name = "grid_snake_client")]
struct Args {
    /// YAML game config; defaults are used when the file does not exist.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Joins a player before the window opens. Repeat for more players.
    #[arg(long)]
    username: Vec<String>,

    /// Seed for food placement and spawn points.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    debug: bool,

    /// Writes the effective config back to the config file.
    #[arg(long)]
    save_config: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager: ConfigManager<FileContentConfigProvider, GameConfig, YamlConfigSerializer> =
        ConfigManager::from_yaml_file(&args.config);
    let mut config = config_manager.get_config()?;
    config.debug |= args.debug;
    logger::set_debug(config.debug);
    if args.save_config {
        config_manager.set_config(&config)?;
        log!("Config written to {}", args.config);
    }

    let shared_state = SharedState::new(config.grid_width(), config.grid_height());
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let command_sender = CommandSender::new(command_tx);

    for username in args.username {
        command_sender.send(SessionCommand::Join { username });
    }

    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    let session_config = config.clone();
    let session_state = shared_state.clone();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let renderer = FrameRenderer::new(
                session_state.clone(),
                session_config.scales,
                session_config.canvas.ui_height,
            );
            let notifier = UiNotifier::new(session_state);
            let session = GameSession::new(session_config, rng, renderer, notifier);
            session.run(command_rx).await;
        });
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                config.canvas.width as f32 + SIDE_PANEL_WIDTH,
                config.canvas.height as f32,
            ])
            .with_title("Grid Snake"),
        ..Default::default()
    };

    eframe::run_native(
        "Grid Snake",
        options,
        Box::new(|_cc| Ok(Box::new(SnakeApp::new(shared_state, command_sender, config)))),
    )?;

    Ok(())
}

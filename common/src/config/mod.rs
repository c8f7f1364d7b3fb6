mod config_content_provider;
mod config_manager;
mod config_serializer;
mod game_config;

pub use config_content_provider::{ConfigContentProvider, FileContentConfigProvider};
#[cfg(test)]
pub(crate) use config_content_provider::InMemoryConfigProvider;
pub use config_manager::ConfigManager;
pub use config_serializer::{ConfigSerializer, YamlConfigSerializer};
pub use game_config::{CanvasConfig, GameConfig, MIN_CANVAS_HEIGHT};

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

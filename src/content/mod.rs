//! Content domain: game configuration data, loading and validation.

mod data;
mod loader;
mod validation;


pub use data::{ControllerTuning, GameConfig, SceneConfig, SheetConfig, Vec2Def, WindowConfig};
pub use loader::{ConfigLoadError, ConfigSource, load_config, parse_config};
pub use validation::{ATTACK_RATE_MULTIPLIER_RANGE, ValidationError, validate_config};

/// Path of the configuration file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/data/game_config.ron";

use bevy::prelude::*;

/// Installs the loaded configuration as resources and reports where it came from.
pub struct ContentPlugin {
    pub config: GameConfig,
    pub source: ConfigSource,
}

impl ContentPlugin {
    pub fn load(path: &str) -> Self {
        let (config, source) = GameConfig::load_or_default(path);
        Self { config, source }
    }
}

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        self.source.report(&self.config);

        app.insert_resource(self.config.controller.clone())
            .insert_resource(self.config.scene.clone());
    }
}

//! Validation for configuration values that the controller relies on.

use super::data::{GameConfig, SheetConfig};

/// Attack swings must read as fast regardless of walk speed, within this band.
pub const ATTACK_RATE_MULTIPLIER_RANGE: (f32, f32) = (2.5, 7.0);

/// A validation error naming the offending field.
#[derive(Debug)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

macro_rules! check_positive {
    ($errors:expr, $value:expr, $field:expr) => {
        if !($value > 0.0) {
            $errors.push(ValidationError {
                field: $field,
                message: format!("must be positive, got {}", $value),
            });
        }
    };
}

fn check_sheet(errors: &mut Vec<ValidationError>, sheet: &SheetConfig, field: &'static str) {
    if sheet.frame_size == 0 || sheet.columns == 0 || sheet.rows == 0 {
        errors.push(ValidationError {
            field,
            message: format!(
                "grid must be non-empty, got {}px {}x{}",
                sheet.frame_size, sheet.columns, sheet.rows
            ),
        });
    }
    if sheet.path.is_empty() {
        errors.push(ValidationError {
            field,
            message: "path is empty".to_string(),
        });
    }
}

/// Validate a loaded configuration.
/// Returns a list of validation errors, empty if the configuration is usable.
pub fn validate_config(config: &GameConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let controller = &config.controller;

    check_positive!(errors, controller.base_speed, "controller.base_speed");
    check_positive!(errors, controller.walk_frame_rate, "controller.walk_frame_rate");
    check_positive!(errors, config.scene.render_scale, "scene.render_scale");

    let (min, max) = ATTACK_RATE_MULTIPLIER_RANGE;
    if !(min..=max).contains(&controller.attack_rate_multiplier) {
        errors.push(ValidationError {
            field: "controller.attack_rate_multiplier",
            message: format!(
                "must be within {}..={}, got {}",
                min, max, controller.attack_rate_multiplier
            ),
        });
    }

    if !(0.0..1.0).contains(&controller.stick_dead_zone) {
        errors.push(ValidationError {
            field: "controller.stick_dead_zone",
            message: format!("must be within 0..1, got {}", controller.stick_dead_zone),
        });
    }

    check_sheet(&mut errors, &config.scene.player_sheet, "scene.player_sheet");
    if let Some(weapon) = &config.scene.weapon_sheet {
        check_sheet(&mut errors, weapon, "scene.weapon_sheet");
        if weapon.frame_count() < 9 {
            errors.push(ValidationError {
                field: "scene.weapon_sheet",
                message: format!(
                    "needs at least 9 frames for the swing cycles, got {}",
                    weapon.frame_count()
                ),
            });
        }
    }

    if config.scene.player_sheet.frame_count() < 7 {
        errors.push(ValidationError {
            field: "scene.player_sheet",
            message: format!(
                "needs at least 7 frames for the walk cycles, got {}",
                config.scene.player_sheet.frame_count()
            ),
        });
    }

    errors
}

//! Application configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `molecula.ron` file (if exists)
//! 3. Environment variables prefixed with `MOLECULA_`
//!
//! Example environment variable: `MOLECULA_BRUSH__RADIUS=25`

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub sim: SimConfig,

    #[serde(default)]
    pub brush: BrushConfig,
}

/// Window and grid display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Window width in pixels
    pub window_width: u32,
    /// Window height in pixels
    pub window_height: u32,
    /// Display pixels per grid cell
    pub cell_scale: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            window_width: 1600,
            window_height: 800,
            cell_scale: 4,
        }
    }
}

impl DisplayConfig {
    /// Grid dimensions derived from the window size and cell scale
    pub fn grid_size(&self) -> (i32, i32) {
        let scale = self.cell_scale.max(1);
        (
            (self.window_width / scale) as i32,
            (self.window_height / scale) as i32,
        )
    }
}

/// Simulation timing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Generations advanced per second
    pub tick_rate: u32,
    /// Catch-up cap when frames fall behind the tick rate
    pub max_ticks_per_frame: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            max_ticks_per_frame: 4,
        }
    }
}

/// Brush defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrushConfig {
    /// Initial brush radius in display pixels
    pub radius: u32,
    /// Fraction of covered cells a stroke actually paints (0.0-1.0)
    pub coverage: f32,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            radius: 10,
            coverage: 1.0,
        }
    }
}

impl AppConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `molecula.ron` file (if exists)
    /// 3. Environment variables prefixed with `MOLECULA_` (highest priority)
    pub fn load() -> Result<Self> {
        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("display.window_width", 1600_i64)?
            .set_default("display.window_height", 800_i64)?
            .set_default("display.cell_scale", 4_i64)?
            .set_default("sim.tick_rate", 60_i64)?
            .set_default("sim.max_ticks_per_frame", 4_i64)?
            .set_default("brush.radius", 10_i64)?
            .set_default("brush.coverage", 1.0)?
            // Layer 2: Config file (optional, won't error if missing)
            .add_source(
                File::with_name("molecula")
                    .format(config::FileFormat::Ron)
                    .required(false),
            )
            // Layer 3: Environment variables (MOLECULA_BRUSH__RADIUS, etc.)
            .add_source(Environment::with_prefix("MOLECULA").separator("__"));

        let config = builder.build().context("Failed to build configuration")?;

        let mut config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Normalize geometry and reject settings the simulation cannot
    /// run with. Runs once at load; the rest of the app trusts the
    /// values.
    fn validate(&mut self) -> Result<()> {
        self.display.cell_scale = self.display.cell_scale.max(1);
        let scale = self.display.cell_scale;
        if self.display.window_width < scale || self.display.window_height < scale {
            anyhow::bail!(
                "Window {}x{} does not fit a single {}px cell",
                self.display.window_width,
                self.display.window_height,
                scale
            );
        }
        // Round down to whole cells so the window and the rasterized
        // world texture have identical dimensions
        self.display.window_width -= self.display.window_width % scale;
        self.display.window_height -= self.display.window_height % scale;

        if self.sim.max_ticks_per_frame == 0 {
            anyhow::bail!("sim.max_ticks_per_frame must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.display.window_width, 1600);
        assert_eq!(config.display.window_height, 800);
        assert_eq!(config.display.cell_scale, 4);
        assert_eq!(config.sim.tick_rate, 60);
        assert_eq!(config.brush.radius, 10);
    }

    #[test]
    fn test_grid_size_derives_from_window() {
        let config = DisplayConfig::default();
        assert_eq!(config.grid_size(), (400, 200));

        let odd = DisplayConfig {
            window_width: 810,
            window_height: 601,
            cell_scale: 4,
        };
        assert_eq!(odd.grid_size(), (202, 150));
    }

    #[test]
    fn test_zero_cell_scale_is_treated_as_one() {
        let config = DisplayConfig {
            window_width: 100,
            window_height: 50,
            cell_scale: 0,
        };
        assert_eq!(config.grid_size(), (100, 50));
    }

    #[test]
    fn test_load_config_with_defaults() {
        // Should load defaults when no config file exists
        let config = AppConfig::load().expect("Failed to load config");
        assert_eq!(config.display.cell_scale, 4);
        assert_eq!(config.sim.tick_rate, 60);
    }

    #[test]
    fn test_validate_rounds_window_down_to_whole_cells() {
        let mut config = AppConfig::default();
        config.display.window_width = 810;
        config.display.window_height = 601;

        config.validate().unwrap();

        assert_eq!(config.display.window_width, 808);
        assert_eq!(config.display.window_height, 600);
        // The rounded window is exactly the rasterized texture size
        let (grid_w, grid_h) = config.display.grid_size();
        let scale = config.display.cell_scale;
        assert_eq!(grid_w as u32 * scale, config.display.window_width);
        assert_eq!(grid_h as u32 * scale, config.display.window_height);
    }

    #[test]
    fn test_validate_rejects_window_smaller_than_one_cell() {
        let mut config = AppConfig::default();
        config.display.cell_scale = 2000;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_normalizes_zero_cell_scale() {
        let mut config = AppConfig::default();
        config.display.cell_scale = 0;

        config.validate().unwrap();

        assert_eq!(config.display.cell_scale, 1);
        assert_eq!(config.display.grid_size(), (1600, 800));
    }

    #[test]
    fn test_validate_rejects_zero_max_ticks_per_frame() {
        let mut config = AppConfig::default();
        config.sim.max_ticks_per_frame = 0;

        assert!(config.validate().is_err());
    }
}

//! Configuration persistence for snapstack settings

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::StackAxis;

/// Serializable color representation for config storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for ShapeColor {
    fn default() -> Self {
        // Cyan outline
        Self {
            r: 0.0,
            g: 1.0,
            b: 1.0,
        }
    }
}

impl ShapeColor {
    /// Convert to image crate RGBA format (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            255,
        ]
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No configuration directory available on this system")]
    NoConfigDir,
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the viewer's save action writes its PNG
    pub output_path: PathBuf,
    /// Also dump every confirmed capture as BMP to this path
    pub capture_dump: Option<PathBuf>,
    /// Axis used to concatenate stacked captures
    pub stack_axis: StackAxis,
    /// Outline color of drawn shapes
    pub overlay_color: ShapeColor,
    /// Outline width of drawn shapes in scene pixels
    pub overlay_stroke_width: f32,
    /// Corner radius of drawn rectangles
    pub corner_radius: f32,
    pub antialiasing: bool,
    /// Paint the checkerboard under the image when saving
    pub view_background: bool,
    /// Frame the image bounds when saving
    pub view_outline: bool,
    /// Keep the viewer above other windows when it opens
    pub pin_viewer_on_show: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("output.png"),
            capture_dump: None,
            stack_axis: StackAxis::Vertical,
            overlay_color: ShapeColor::default(),
            overlay_stroke_width: 2.0,
            corner_radius: 10.0,
            antialiasing: true,
            view_background: true,
            view_outline: false,
            pin_viewer_on_show: true,
        }
    }
}

impl Config {
    /// Directory name under the platform config dir
    pub const ID: &'static str = "snapstack";
    const FILE_NAME: &'static str = "config.json";

    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join(Self::FILE_NAME))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            log::warn!("No config directory, using defaults");
            return Self::default();
        };
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {err}");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Style applied to newly drawn shapes
    pub fn shape_style(&self) -> crate::domain::ShapeStyle {
        crate::domain::ShapeStyle {
            color: self.overlay_color,
            stroke_width: self.overlay_stroke_width,
            corner_radius: self.corner_radius,
        }
    }
}

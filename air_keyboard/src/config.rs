//! Run configuration.
//!
//! Sources, later wins: built-in defaults, then the JSON file named by
//! `--config PATH`, then `--layout NAME` and `--inject`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use hand_gestures::GestureConfig;
use key_layout::{KeyboardLayout, LayoutKind};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::arbiter::ArbiterConfig;
use crate::error::AppError;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Layout name, case-insensitive; unknown names fall back to QWERTY.
    pub layout:             String,
    pub frame_width:        u32,
    pub frame_height:       u32,
    pub cooldown_ms:        u64,
    pub activation_pinch:   f32,
    pub press_animation_ms: u64,
    pub display_text_len:   usize,
    /// Fingertip samples kept for tap and swipe detection.
    pub history_capacity:   usize,
    /// Send key presses to the focused OS window (needs the `inject` feature).
    pub inject:             bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            layout:             "qwerty".to_string(),
            frame_width:        800,
            frame_height:       600,
            cooldown_ms:        500,
            activation_pinch:   0.04,
            press_animation_ms: 200,
            display_text_len:   50,
            history_capacity:   10,
            inject:             false,
        }
    }
}

impl AppConfig {
    pub fn from_json(text: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = fs::read_to_string(path).map_err(|source| AppError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_json(&text)?;
        debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    }

    /// Build the configuration from command-line arguments (program name
    /// already skipped).
    pub fn from_args<I>(args: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config_path: Option<PathBuf> = None;
        let mut layout:      Option<String>  = None;
        let mut inject = false;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let v = args.next().ok_or(AppError::MissingValue("--config"))?;
                    config_path = Some(PathBuf::from(v));
                }
                "--layout" => {
                    layout = Some(args.next().ok_or(AppError::MissingValue("--layout"))?);
                }
                "--inject" => inject = true,
                "--quick"  => {}
                _          => return Err(AppError::UnknownArgument(arg)),
            }
        }

        let mut cfg = match config_path {
            Some(p) => Self::load(&p)?,
            None    => Self::default(),
        };
        if let Some(name) = layout { cfg.layout = name; }
        if inject { cfg.inject = true; }
        Ok(cfg)
    }

    // ── derived settings ──────────────────────────────────────────────────

    pub fn layout(&self) -> &'static KeyboardLayout {
        LayoutKind::from_name(&self.layout).layout()
    }

    pub fn arbiter_config(&self) -> ArbiterConfig {
        ArbiterConfig {
            activation_pinch: self.activation_pinch,
            cooldown:         Duration::from_millis(self.cooldown_ms),
            press_animation:  Duration::from_millis(self.press_animation_ms),
            display_text_len: self.display_text_len,
        }
    }

    /// Gesture thresholds.  The history is never shorter than the tap and
    /// swipe windows, or those detectors could never fire.
    pub fn gesture_config(&self) -> GestureConfig {
        let defaults = GestureConfig::default();
        let min_capacity = defaults.swipe_window.max(defaults.tap_window);
        if self.history_capacity < min_capacity {
            warn!(
                configured = self.history_capacity,
                used = min_capacity,
                "history_capacity too small for swipe detection, raised"
            );
        }
        GestureConfig {
            history_capacity: self.history_capacity.max(min_capacity),
            ..defaults
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

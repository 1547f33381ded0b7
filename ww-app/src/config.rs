//! This module contains [`AppConfig`] and how it's loaded.

use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};
use ww_animation::SceneConfig;
use ww_capture::SourceConfig;
use ww_frame::Viewport;

/// The environment variable that names the config file.
pub const CONFIG_ENV_VAR: &str = "WW_CONFIG";

/// The config file to use if [`CONFIG_ENV_VAR`] isn't set.
pub const DEFAULT_CONFIG_FILENAME: &str = "gesture_tree.ron";

/// Everything the app can be configured with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// The animated scene itself.
    pub scene: SceneConfig,

    /// Where the hand landmarks come from.
    pub source: SourceConfig,

    /// How many frames to render per second.
    pub render_fps: f32,

    /// How many camera frames to run detection on per second.
    pub detection_fps: f32,

    /// The size of the surface at startup.
    pub viewport: Viewport,

    /// Where to write log files, if anywhere.
    pub log_dir: Option<PathBuf>,

    /// Stop after this many seconds. Runs until interrupted if not set.
    pub run_for_secs: Option<f32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scene: SceneConfig::default(),
            source: SourceConfig::default(),
            render_fps: 60.,
            detection_fps: 60.,
            viewport: Viewport::default(),
            log_dir: None,
            run_for_secs: None,
        }
    }
}

/// The shortest period we'll tick at. `tokio::time::interval` panics on a zero period.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Turn a rate into a period, falling back to `fallback_fps` if the rate is nonsense or too slow
/// to represent. Very fast rates are clamped to [`MIN_PERIOD`].
fn period(fps: f32, fallback_fps: f32) -> Duration {
    let fallback = || Duration::from_secs_f32(1. / fallback_fps);

    if !(fps.is_finite() && fps > 0.) {
        return fallback();
    }

    Duration::try_from_secs_f32(1. / fps)
        .map(|period| period.max(MIN_PERIOD))
        .unwrap_or_else(|_| fallback())
}

impl AppConfig {
    /// The filename given by [`CONFIG_ENV_VAR`], or [`DEFAULT_CONFIG_FILENAME`].
    pub fn filename() -> PathBuf {
        env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME))
    }

    /// Load the config from the file, or use the default if the file is unavailable. Also save
    /// the default to the file for future editing.
    pub fn from_file(filename: &Path) -> Self {
        let write_and_return_default = || -> Self {
            let default = Self::default();
            default.save_to_file(filename);
            default
        };

        let Ok(text) = fs::read_to_string(filename) else {
            return write_and_return_default();
        };

        ron::from_str(&text).unwrap_or_else(|_| write_and_return_default())
    }

    /// Save the config to the given file, ignoring any errors.
    pub fn save_to_file(&self, filename: &Path) {
        if let Some(parent) = filename.parent() {
            let _ = fs::DirBuilder::new().recursive(true).create(parent);
        }

        if let Ok(text) =
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default().struct_names(true))
        {
            let _ = fs::write(filename, text);
        }
    }

    /// The time between rendered frames.
    pub fn render_period(&self) -> Duration {
        period(self.render_fps, 60.)
    }

    /// The time between detection frames.
    pub fn detection_period(&self) -> Duration {
        period(self.detection_fps, 60.)
    }

    /// How long to run for, if there's a limit. A limit too long to represent counts as no limit.
    pub fn run_for(&self) -> Option<Duration> {
        self.run_for_secs.and_then(|secs| Duration::try_from_secs_f32(secs).ok())
    }
}

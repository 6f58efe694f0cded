/// Terminal settings, loaded from `hero.ron` at startup
use hero_core::MotionPreference;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable consulted when neither the CLI nor the config decides
pub const REDUCED_MOTION_ENV: &str = "HERO_REDUCED_MOTION";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Settings for the terminal surface. Every field has a default, so a partial
/// file (or none at all) is fine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HeroConfig {
    /// Frames drawn per second.
    #[serde(default = "default_target_fps")]
    pub target_fps: u32,
    /// Overrides the environment when set. Written as `Some(true)` in RON.
    #[serde(default)]
    pub reduced_motion: Option<bool>,
    /// Write logs here instead of stderr.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    /// Largest tower viewport in columns.
    #[serde(default = "default_viewport_cols")]
    pub viewport_cols: u16,
    /// Largest tower viewport in rows.
    #[serde(default = "default_viewport_rows")]
    pub viewport_rows: u16,
}

fn default_target_fps() -> u32 {
    30
}
fn default_viewport_cols() -> u16 {
    44
}
fn default_viewport_rows() -> u16 {
    24
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            target_fps: default_target_fps(),
            reduced_motion: None,
            log_file: None,
            viewport_cols: default_viewport_cols(),
            viewport_rows: default_viewport_rows(),
        }
    }
}

impl HeroConfig {
    /// Load config from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        ron::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Time budget of one frame, with the rate kept between 1 and 120 fps
    pub fn frame_time(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps.clamp(1, 120) as f64)
    }

    /// Resolve the reduced-motion preference: CLI flag, then config, then environment
    pub fn motion_preference(&self, cli_flag: bool) -> MotionPreference {
        let env = std::env::var(REDUCED_MOTION_ENV).ok();
        MotionPreference {
            reduced: cli_flag || self.reduced_motion.unwrap_or_else(|| env_flag(env.as_deref())),
        }
    }
}

/// Interpret an environment flag; anything but empty, `0`, `false` or `no` counts as set
fn env_flag(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") => false,
        Some(v) => !matches!(v.to_ascii_lowercase().as_str(), "0" | "false" | "no"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: HeroConfig = ron::from_str("(target_fps: 60)").unwrap();
        assert_eq!(config.target_fps, 60);
        assert_eq!(config.viewport_cols, 44);
        assert_eq!(config.reduced_motion, None);
    }

    #[test]
    fn test_reduced_motion_and_log_file() {
        let config: HeroConfig =
            ron::from_str(r#"(reduced_motion: Some(true), log_file: Some("hero.log"))"#).unwrap();
        assert_eq!(config.reduced_motion, Some(true));
        assert_eq!(config.log_file, Some(PathBuf::from("hero.log")));
        assert!(config.motion_preference(false).reduced);
    }

    #[test]
    fn test_config_beats_environment() {
        let config = HeroConfig {
            reduced_motion: Some(false),
            ..Default::default()
        };
        assert!(!config.motion_preference(false).reduced);
        assert!(config.motion_preference(true).reduced);
    }

    #[test]
    fn test_env_flag_values() {
        assert!(!env_flag(None));
        assert!(!env_flag(Some("")));
        assert!(!env_flag(Some("0")));
        assert!(!env_flag(Some("False")));
        assert!(env_flag(Some("1")));
        assert!(env_flag(Some("yes")));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = HeroConfig::load(Path::new("does/not/exist/hero.ron")).unwrap();
        assert_eq!(config, HeroConfig::default());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let name = format!("hero-config-test-{}.ron", std::process::id());
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, "(target_fps: \"fast\")").unwrap();
        let result = HeroConfig::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_frame_time_is_clamped() {
        let config = HeroConfig {
            target_fps: 0,
            ..Default::default()
        };
        assert_eq!(config.frame_time(), Duration::from_secs(1));
        let config = HeroConfig {
            target_fps: 1000,
            ..Default::default()
        };
        assert!(config.frame_time() >= Duration::from_secs_f64(1.0 / 120.0));
    }
}

use crate::wheel::{
    FindMode, OverlaySurface, SurfaceName, SurfaceQuery, SurfaceRegistry, WheelSettings,
};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use rondelctl::geom::{ItemLabel, Point};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A drawable the daemon exposes to the wheel's surface lookup.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CanvasConfig {
    pub name: SurfaceName,
    pub tag: Option<SurfaceName>,
    #[serde(default)]
    pub origin: Point,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub wheel: WheelSettings,
    #[serde(default = "default_surface")]
    pub surface: SurfaceQuery,
    #[serde(default = "default_canvases")]
    pub canvases: Vec<CanvasConfig>,
    #[serde(default)]
    pub items: Vec<ItemLabel>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wheel: WheelSettings::default(),
            surface: default_surface(),
            canvases: default_canvases(),
            items: ["Home", "Search", "Library", "Settings"]
                .into_iter()
                .map(ItemLabel::new)
                .collect(),
        }
    }
}

fn default_surface() -> SurfaceQuery {
    SurfaceQuery::new(FindMode::Tag, "WheelCanvas")
}

fn default_canvases() -> Vec<CanvasConfig> {
    vec![CanvasConfig {
        name: SurfaceName::new("MainCanvas"),
        tag: Some(SurfaceName::new("WheelCanvas")),
        origin: Point::default(),
    }]
}

impl Config {
    pub fn surfaces(&self) -> SurfaceRegistry {
        let mut registry = SurfaceRegistry::new();
        for canvas in &self.canvases {
            registry.register(
                canvas.name.clone(),
                canvas.tag.clone(),
                OverlaySurface::new(canvas.origin),
            );
        }
        registry
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "rondel", "rondel").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("RONDEL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut config: Config = s.try_deserialize()?;
    config.wheel = config.wheel.sanitized();
    Ok(config)
}

/// First run writes the bundled config so there is a file to edit and watch.
pub fn load_or_setup() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        match write_default_config() {
            Ok(path) => log::info!("Wrote default config to {}", path.display()),
            Err(e) => log::warn!("Could not write default config: {}", e),
        }
    }

    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to default config: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("{}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::SurfaceLocator;

    fn parse_toml(src: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(src, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_bundled_default_config_parses() {
        let cfg = parse_toml(DEFAULT_CONFIG);
        assert_eq!(cfg.surface, SurfaceQuery::new(FindMode::Tag, "WheelCanvas"));
        assert_eq!(cfg.items.len(), 8);
        assert_eq!(cfg.wheel.sanitized(), cfg.wheel);
        assert!(cfg.surfaces().locate(&cfg.surface).is_some());
    }

    #[test]
    fn test_missing_tables_use_defaults() {
        let cfg = parse_toml("items = [\"a\", \"b\"]\n[wheel]\nradius = 320.0\n");
        assert_eq!(cfg.wheel.radius, 320.0);
        assert_eq!(cfg.wheel.snap_speed, 1.0);
        assert_eq!(cfg.surface.find_mode, FindMode::Tag);
        assert_eq!(cfg.canvases.len(), 1);
        assert_eq!(cfg.items, vec![ItemLabel::new("a"), ItemLabel::new("b")]);
    }

    #[test]
    fn test_surface_find_mode_is_case_insensitive() {
        let cfg = parse_toml("[surface]\nfind_mode = \"NAME\"\nname = \"MainCanvas\"\n");
        assert_eq!(cfg.surface.find_mode, FindMode::Name);
    }
}
